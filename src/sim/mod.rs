//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, storage or platform dependencies

pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod kinematics;
pub mod score;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod world;

pub use clock::Clock;
pub use collision::{CollisionOutcome, Rect, resolve};
pub use snapshot::{PlayerPose, WorldSnapshot};
pub use state::{Coin, Obstacle, ObstacleKind, Player, RunEvent, RunPhase, WorldState};
pub use tick::{Command, RunController, TickInput};
