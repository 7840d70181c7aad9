//! Ocean Run - endless runner simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, spawning, collisions, run state machine)
//! - `highscores`: High score read/write contract and storage backends
//! - `tuning`: Data-driven game balance
//! - `platform`: Browser bindings for the host page

pub mod highscores;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use highscores::{HighScoreStore, MemoryHighScores};
pub use sim::{Command, RunController, RunPhase, TickInput, WorldSnapshot};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
///
/// All movement values are per tick; the fixed delta is folded into them.
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz display frame)
    pub const SIM_DT: f64 = 1.0 / 60.0;

    /// Visible playfield width
    pub const WORLD_WIDTH: f64 = 800.0;
    /// Entities spawn just past the right edge
    pub const SPAWN_X: f64 = WORLD_WIDTH + 20.0;
    /// Entities are pruned once their trailing edge passes -OFFSCREEN_MARGIN
    pub const OFFSCREEN_MARGIN: f64 = 50.0;

    /// Player's fixed left edge
    pub const PLAYER_X: f64 = 80.0;
    pub const PLAYER_WIDTH: f64 = 40.0;
    pub const PLAYER_HEIGHT: f64 = 50.0;
    /// Ducking hitbox: shorter and wider than standing
    pub const DUCK_WIDTH: f64 = 55.0;
    pub const DUCK_HEIGHT: f64 = 28.0;

    /// Gravity (velocity lost per tick while airborne)
    pub const GRAVITY: f64 = 0.5;
    pub const JUMP_IMPULSE: f64 = 11.0;
    /// Weaker than the first jump
    pub const DOUBLE_JUMP_IMPULSE: f64 = 8.0;
    /// Downward velocity floor applied by ducking mid-air
    pub const FAST_FALL_SPEED: f64 = 14.0;

    /// World speed (pixels per tick)
    pub const INITIAL_SPEED: f64 = 6.0;
    pub const MAX_SPEED: f64 = 14.0;
    pub const SPEED_INCREMENT: f64 = 0.001;

    /// Obstacle cadence (ticks)
    pub const OBSTACLE_BASE_GAP: i32 = 110;
    pub const OBSTACLE_MIN_GAP: i32 = 48;
    pub const OBSTACLE_GAP_SPEED_FACTOR: f64 = 5.0;
    pub const OBSTACLE_JITTER: i32 = 30;
    pub const INITIAL_OBSTACLE_COUNTDOWN: i32 = 60;

    /// Coin cadence (ticks), not speed-scaled
    pub const COIN_GAP: i32 = 70;
    pub const COIN_JITTER: i32 = 80;
    pub const INITIAL_COIN_COUNTDOWN: i32 = 90;
    pub const COIN_SIZE: f64 = 20.0;
    pub const COIN_MIN_HEIGHT: f64 = 20.0;
    pub const COIN_MAX_HEIGHT: f64 = 110.0;
    pub const COIN_PICKUP_RADIUS: f64 = 28.0;

    /// Ground obstacle (reef rock) dimensions
    pub const GROUND_OBSTACLE_WIDTH: f64 = 30.0;
    pub const GROUND_OBSTACLE_HEIGHT: f64 = 40.0;
    /// Flying obstacle (gull) dimensions and vertical band
    pub const FLYING_OBSTACLE_WIDTH: f64 = 40.0;
    pub const FLYING_OBSTACLE_HEIGHT: f64 = 30.0;
    pub const FLYING_MIN_OFFSET: f64 = 32.0;
    pub const FLYING_MAX_OFFSET: f64 = 40.0;

    /// Inset applied to both hitboxes before overlap tests
    pub const COLLISION_INSET: f64 = 4.0;

    /// Score
    pub const DISTANCE_SCORE_FACTOR: f64 = 0.125;
    pub const COIN_BONUS: f64 = 50.0;
}
