//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (velocities are pixels per frame)
//! - Stable iteration order (obstacles in level order)
//! - No rendering or platform dependencies

pub mod body;
pub mod level;
pub mod obstacle;
pub mod quiz;
pub mod rect;
pub mod resolve;
pub mod state;
pub mod tick;

pub use body::KinematicBody;
pub use level::{Level, parse_grid, platformer_level, quiz_level};
pub use obstacle::{Obstacle, ObstacleKind};
pub use quiz::{ClickOutcome, Question, QuestionBank, QuizPhase, QuizSession};
pub use rect::Rect;
pub use resolve::{Axis, ResolutionReport, Touch, WorldBounds, resolve};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
