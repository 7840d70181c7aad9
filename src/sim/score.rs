//! Distance and coin scoring

use super::state::WorldState;
use crate::tuning::Tuning;

/// Distance score for one tick at the current speed
pub fn add_distance(world: &mut WorldState, tuning: &Tuning) {
    world.elapsed_score += world.speed * tuning.distance_score_factor;
}

/// Flat bonus, independent of speed
pub fn add_coin(world: &mut WorldState, tuning: &Tuning) {
    world.elapsed_score += tuning.coin_bonus;
    world.coins_collected += 1;
}

/// Integer score shown to the player and persisted
pub fn final_score(world: &WorldState) -> i64 {
    world.elapsed_score.floor() as i64
}

/// True if `score` beats the stored best (a zero score never counts)
pub fn is_new_high_score(score: i64, best: Option<i64>) -> bool {
    score > best.unwrap_or(0)
}
