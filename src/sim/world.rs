//! Horizontal scrolling, pruning and speed ramp

use super::state::WorldState;
use crate::tuning::Tuning;

/// Move every entity left by `dx` and drop whatever has scrolled off-screen.
///
/// Collected coins are dropped here too. With `dx = 0` a second call is a no-op.
pub fn advance_entities(world: &mut WorldState, dx: f64, tuning: &Tuning) {
    for obstacle in &mut world.obstacles {
        obstacle.horizontal_position -= dx;
    }
    for coin in &mut world.coins {
        coin.horizontal_position -= dx;
    }

    let threshold = -tuning.offscreen_margin;
    let half_coin = tuning.coin_size / 2.0;
    world.obstacles.retain(|o| o.trailing_edge() >= threshold);
    world
        .coins
        .retain(|c| !c.collected && c.horizontal_position + half_coin >= threshold);
}

/// Ramp the world speed toward the cap
pub fn accelerate(world: &mut WorldState, tuning: &Tuning) {
    world.speed = (world.speed + tuning.speed_increment).min(tuning.max_speed);
}

/// One tick of world movement at the current speed, then speed up
pub fn advance(world: &mut WorldState, tuning: &Tuning) {
    advance_entities(world, world.speed, tuning);
    accelerate(world, tuning);
}
