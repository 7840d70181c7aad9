//! Collision detection between the player and the world
//!
//! Hazards use inset axis-aligned boxes: both boxes shrink by
//! `collision_inset` on every side so sprites that only graze each other
//! don't end the run. Coins use a per-axis pickup radius around the player's
//! hitbox center instead of a box.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::state::{Obstacle, Player, WorldState};
use crate::tuning::Tuning;

/// Axis-aligned rectangle, y up from the baseline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: DVec2,
    pub max: DVec2,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            min: DVec2::new(x, y),
            max: DVec2::new(x + width, y + height),
        }
    }

    /// Shrink every side by `amount`
    pub fn inset(&self, amount: f64) -> Self {
        Self {
            min: self.min + DVec2::splat(amount),
            max: self.max - DVec2::splat(amount),
        }
    }

    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    /// Strict overlap on both axes (touching edges don't count)
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Player hitbox for the current pose
pub fn player_rect(player: &Player, tuning: &Tuning) -> Rect {
    let (width, height) = player.size(tuning);
    Rect::new(tuning.player_x, player.vertical_position, width, height)
}

pub fn obstacle_rect(obstacle: &Obstacle) -> Rect {
    Rect::new(
        obstacle.horizontal_position,
        obstacle.ground_offset,
        obstacle.width,
        obstacle.height,
    )
}

/// Result of one collision pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionOutcome {
    None,
    /// The run ends on this obstacle
    Lethal { obstacle_id: u32 },
    CoinPickup { coin_id: u32 },
}

/// Resolve the player against every live obstacle and coin.
///
/// The first overlapping obstacle wins outright; coins are only considered
/// when nothing lethal was found.
pub fn resolve(player: &Player, world: &WorldState, tuning: &Tuning) -> CollisionOutcome {
    let body = player_rect(player, tuning);
    let hurtbox = body.inset(tuning.collision_inset);

    if let Some(hit) = world
        .obstacles
        .iter()
        .find(|o| hurtbox.overlaps(&obstacle_rect(o).inset(tuning.collision_inset)))
    {
        return CollisionOutcome::Lethal { obstacle_id: hit.id };
    }

    let center = body.center();
    let radius = tuning.coin_pickup_radius;
    world
        .coins
        .iter()
        .filter(|c| !c.collected)
        .find(|c| {
            (c.horizontal_position - center.x).abs() < radius
                && (c.vertical_position - center.y).abs() < radius
        })
        .map_or(CollisionOutcome::None, |c| CollisionOutcome::CoinPickup { coin_id: c.id })
}
