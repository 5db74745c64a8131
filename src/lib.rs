//! Echo Quest - tile quiz RPG and echo-platform prototype
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collision resolution, levels, quiz, game state)
//! - `renderer`: WebGPU rendering pipeline
//! - `settings`: Tuning and presentation preferences
//! - `input`: Held-key tracking for the frame loop
//! - `error`: Non-fatal load and lookup errors

pub mod error;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::LoadError;
pub use settings::{GameMode, Settings, Tuning};

/// Game configuration constants
pub mod consts {
    use glam::{IVec2, Vec2};

    /// Frames per second; all velocities are pixels per frame at this rate
    pub const FPS: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const FRAME_DT: f32 = 1.0 / FPS as f32;
    /// Maximum ticks per rendered frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Quiz map cell size
    pub const TILE_SIZE: i32 = 40;
    /// Tile walker body (narrower than a tile so it fits corridors)
    pub const WALKER_SIZE: IVec2 = IVec2::new(24, 40);

    /// Platformer playfield
    pub const PLATFORMER_SCREEN: IVec2 = IVec2::new(800, 600);
    pub const PLATFORMER_BODY_SIZE: IVec2 = IVec2::new(25, 40);
    pub const PLATFORMER_SPAWN: Vec2 = Vec2::new(100.0, 400.0);

    /// Tile walker speed (pixels/frame)
    pub const WALK_SPEED: f32 = 3.0;
    /// Platformer horizontal speed (pixels/frame)
    pub const RUN_SPEED: f32 = 5.0;
    /// Downward acceleration (pixels/frame²)
    pub const GRAVITY: f32 = 0.7;
    /// Vertical velocity applied on jump (negative is up)
    pub const JUMP_POWER: f32 = -15.0;
    /// Fall speed cap
    pub const TERMINAL_VELOCITY: f32 = 15.0;

    /// Distance from the player's center within which an echo can be activated
    pub const ECHO_INTERACTION_RANGE: f32 = 80.0;
}
