//! Flappy Web - A scrolling pipe-gap arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, obstacles, collisions, scoring)
//! - `game`: Session driver with frame/spawn lifecycle and render snapshots
//! - `config`: Tunable game constants
//! - `platform`: Browser glue (viewport, frame and interval handles; wasm32 only)

pub mod config;
pub mod game;
#[cfg(target_arch = "wasm32")]
pub mod platform;
pub mod sim;

pub use config::{ConfigError, GameConfig, Integration};
pub use game::{Game, ObstacleView, Snapshot};

/// Default game constants
pub mod consts {
    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 0.09;
    /// Velocity damping applied every tick
    pub const DAMPING: f32 = 0.99;
    /// Velocity set by a jump (negative = upward)
    pub const JUMP_IMPULSE: f32 = -2.9;

    /// Sprite box (the sprite is square)
    pub const SPRITE_WIDTH: f32 = 40.0;
    pub const SPRITE_HEIGHT: f32 = 40.0;
    /// Sprite left edge used for collision tests
    pub const SPRITE_X: f32 = 0.0;
    /// Sprite top edge on a fresh session
    pub const SPRITE_START_Y: f32 = 100.0;

    /// Pipe segment width
    pub const PIPE_WIDTH: f32 = 50.0;
    /// Vertical gap between the upper and lower segment
    pub const PIPE_GAP: f32 = 200.0;
    /// Gap start is drawn from [GAP_START_MIN, GAP_START_MAX)
    pub const GAP_START_MIN: u32 = 50;
    pub const GAP_START_MAX: u32 = 250;
    /// Height of the lower segment (runs past the floor)
    pub const FLOOR_SEGMENT_HEIGHT: f32 = 500.0;

    /// Wall-clock interval between pipe pairs
    pub const SPAWN_INTERVAL_MS: u32 = 1500;
    /// Scroll speed at session start (pixels per tick)
    pub const INITIAL_SCROLL_SPEED: f32 = 4.0;
    /// Scroll speed gained each time the score crosses a step
    pub const SCROLL_SPEED_INCREMENT: f32 = 0.5;
    /// Score interval for difficulty ramps
    pub const SCORE_STEP: u32 = 10;
}
