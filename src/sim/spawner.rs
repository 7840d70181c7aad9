//! Procedural obstacle and coin spawning
//!
//! Both channels run on their own countdown. The obstacle gap shrinks as the
//! world speeds up but never drops below `obstacle_min_gap`, which tuning
//! validation keeps at or above a full jump's airtime.

use rand::Rng;

use super::state::{Coin, Obstacle, ObstacleKind, WorldState};
use crate::tuning::Tuning;

/// Speed-adjusted obstacle gap in ticks, before jitter
pub fn obstacle_gap(speed: f64, tuning: &Tuning) -> i32 {
    let scaled = (tuning.obstacle_base_gap as f64 - tuning.obstacle_gap_speed_factor * speed).floor();
    (scaled as i32).max(tuning.obstacle_min_gap)
}

/// Count down the obstacle channel and emit an obstacle when it expires.
///
/// The caller owns insertion into the world.
pub fn spawn_obstacle<R: Rng>(
    world: &mut WorldState,
    tuning: &Tuning,
    frame: u64,
    rng: &mut R,
) -> Option<Obstacle> {
    world.spawn_countdown = (world.spawn_countdown - 1).max(0);
    if world.spawn_countdown > 0 {
        return None;
    }

    let kind = ObstacleKind::ALL[rng.random_range(0..ObstacleKind::ALL.len())];
    let offset = match kind {
        ObstacleKind::Ground => 0.0,
        ObstacleKind::Flying => rng.random_range(tuning.flying_min_offset..=tuning.flying_max_offset),
    };
    let id = world.next_entity_id();
    let obstacle = Obstacle::new(id, kind, tuning.spawn_x, offset, frame, tuning);

    world.spawn_countdown =
        obstacle_gap(world.speed, tuning) + rng.random_range(0..=tuning.obstacle_jitter);

    log::debug!(
        "frame {}: spawned {:?} obstacle #{} (next in {} ticks)",
        frame,
        kind,
        id,
        world.spawn_countdown
    );
    Some(obstacle)
}

/// Count down the coin channel and emit a coin when it expires.
pub fn spawn_coin<R: Rng>(world: &mut WorldState, tuning: &Tuning, rng: &mut R) -> Option<Coin> {
    world.coin_countdown = (world.coin_countdown - 1).max(0);
    if world.coin_countdown > 0 {
        return None;
    }

    let id = world.next_entity_id();
    let coin = Coin {
        id,
        horizontal_position: tuning.spawn_x,
        vertical_position: rng.random_range(tuning.coin_min_height..=tuning.coin_max_height),
        collected: false,
    };

    world.coin_countdown = tuning.coin_gap + rng.random_range(0..=tuning.coin_jitter);
    Some(coin)
}
