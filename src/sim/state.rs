//! World state
//!
//! The world exclusively owns the body, the obstacles, and the open quiz (if
//! any). Nothing else holds references into it between ticks.

use glam::{IVec2, Vec2};

use super::body::KinematicBody;
use super::level::{self, Level};
use super::obstacle::Obstacle;
use super::quiz::{QuestionBank, QuizSession};
use super::resolve::WorldBounds;
use crate::consts::*;
use crate::settings::{GameMode, Settings, Tuning};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Body moves and interacts
    Playing,
    /// Quiz popup open, movement suspended
    Quiz,
    /// Player asked to quit; the host loop stops
    Quit,
}

/// Things that happened during a tick, drained by the host
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    QuizOpened { tag: String },
    /// Walked into a question block whose question is not in the bank
    QuizMissing { tag: String },
    QuizAnswered { tag: String, correct: bool },
    QuizClosed { tag: String },
    EchoToggled { obstacle: usize, solid: bool },
    Respawned,
    Quit,
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub mode: GameMode,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub body: KinematicBody,
    /// Fixed for the session, in level order
    pub obstacles: Vec<Obstacle>,
    /// Set for the platformer; the quiz map is enclosed by walls
    pub bounds: Option<WorldBounds>,
    /// View size in pixels
    pub screen: IVec2,
    pub bank: QuestionBank,
    pub quiz: Option<QuizSession>,
    /// Last pointer position, for button hover
    pub pointer: Option<Vec2>,
    /// Tag of the last block found missing from the bank, cleared once the
    /// body stops touching question blocks
    pub(crate) missing_tag: Option<String>,
    pub events: Vec<GameEvent>,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Build the world for the mode selected in `settings`
    pub fn new(settings: &Settings, bank: QuestionBank) -> Self {
        match settings.mode {
            GameMode::Quiz => Self::quiz(settings.tuning, bank),
            GameMode::Platformer => Self::platformer(settings.tuning),
        }
    }

    /// Tile-walking quiz world
    pub fn quiz(tuning: Tuning, bank: QuestionBank) -> Self {
        let level = level::quiz_level();
        Self::from_level(GameMode::Quiz, tuning, level, WALKER_SIZE, None, bank)
    }

    /// Echo-bridge platformer world
    pub fn platformer(tuning: Tuning) -> Self {
        let level = level::platformer_level(tuning.echo_range);
        let bounds = WorldBounds {
            width: level.size.x,
            height: level.size.y,
        };
        Self::from_level(
            GameMode::Platformer,
            tuning,
            level,
            PLATFORMER_BODY_SIZE,
            Some(bounds),
            QuestionBank::new(),
        )
    }

    pub fn from_level(
        mode: GameMode,
        tuning: Tuning,
        level: Level,
        body_size: IVec2,
        bounds: Option<WorldBounds>,
        bank: QuestionBank,
    ) -> Self {
        log::info!(
            "Built {} level: {} obstacles, spawn at ({}, {})",
            mode.as_str(),
            level.obstacles.len(),
            level.spawn.x,
            level.spawn.y
        );
        Self {
            mode,
            tuning,
            phase: GamePhase::Playing,
            body: KinematicBody::new(level.spawn, body_size),
            obstacles: level.obstacles,
            bounds,
            screen: level.size,
            bank,
            quiz: None,
            pointer: None,
            missing_tag: None,
            events: Vec::new(),
            time_ticks: 0,
        }
    }

    /// Take the events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_running(&self) -> bool {
        self.phase != GamePhase::Quit
    }
}
