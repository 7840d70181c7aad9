//! Read-only view of a run handed to the host after every tick

use serde::{Deserialize, Serialize};

use super::collision::player_rect;
use super::state::{Coin, Obstacle, Player, RunEvent, RunPhase};
use crate::tuning::Tuning;

/// Player pose for drawing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerPose {
    /// Hitbox left edge
    pub x: f64,
    /// Hitbox bottom edge above the baseline
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub vertical_velocity: f64,
    pub is_airborne: bool,
    pub is_ducking: bool,
    pub can_double_jump: bool,
}

impl PlayerPose {
    pub fn new(player: &Player, tuning: &Tuning) -> Self {
        let rect = player_rect(player, tuning);
        Self {
            x: rect.min.x,
            y: rect.min.y,
            width: rect.max.x - rect.min.x,
            height: rect.max.y - rect.min.y,
            vertical_velocity: player.vertical_velocity,
            is_airborne: player.is_airborne,
            is_ducking: player.is_ducking,
            can_double_jump: player.can_double_jump,
        }
    }
}

/// Everything a renderer or HUD needs after one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub phase: RunPhase,
    pub frame: u64,
    /// Simulated seconds since the run started
    pub elapsed: f64,
    /// Zero while idle
    pub speed: f64,
    /// Floored score
    pub score: i64,
    pub coins_collected: u32,
    pub high_score: Option<i64>,
    pub player: PlayerPose,
    pub obstacles: Vec<Obstacle>,
    pub coins: Vec<Coin>,
    /// Events produced since the previous snapshot
    pub events: Vec<RunEvent>,
}

impl WorldSnapshot {
    /// Serialize for a JS host
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn has_event(&self, event: RunEvent) -> bool {
        self.events.contains(&event)
    }
}
