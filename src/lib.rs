//! Flappy Gap - a Flappy Bird clone that runs in your terminal
//!
//! Core modules:
//! - `sim`: deterministic fixed-tick simulation (avatar, obstacles, session)
//! - `controller`: menu/playing mode switch, input routing, timestep
//! - `scores`: high score history file
//! - `audio`: background music and sound effects
//! - `screen`: half-block pixel renderer
//! - `config`: command-line options

pub mod audio;
pub mod config;
pub mod controller;
pub mod scores;
pub mod screen;
pub mod sim;

pub use config::Config;
pub use controller::{Controller, Input, Mode};
pub use scores::{ScoreError, ScoreFile};

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Logical canvas size in world pixels
    pub const CANVAS_WIDTH: i32 = 600;
    pub const CANVAS_HEIGHT: i32 = 800;

    /// Fixed simulation timestep
    pub const TICK: Duration = Duration::from_millis(20);
    /// Maximum ticks per `advance` call
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Start input is ignored this long after a game ends
    pub const GAME_OVER_LOCKOUT: Duration = Duration::from_millis(500);

    /// Avatar start position and side length
    pub const AVATAR_START_X: i32 = 100;
    pub const AVATAR_START_Y: i32 = 200;
    pub const AVATAR_SIZE: i32 = 40;
    /// Pixels/tick² added to the avatar velocity every tick
    pub const GRAVITY: i32 = 1;
    /// Velocity set by a jump (negative is up)
    pub const JUMP_VELOCITY: i32 = -15;

    pub const OBSTACLE_WIDTH: i32 = 80;
    pub const OBSTACLE_GAP: i32 = 200;
    /// Horizontal pixels per tick
    pub const OBSTACLE_SPEED: i32 = 5;
    /// Gap tops are drawn from `GAP_MARGIN..CANVAS_HEIGHT - GAP_MARGIN`
    pub const GAP_MARGIN: i32 = 100;
    /// A new obstacle joins every time the score reaches a multiple of this
    pub const SPAWN_EVERY: u32 = 10;
}
