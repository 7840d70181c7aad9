//! Attract-mode AI
//!
//! Plays the run for idle/demo screens: jump ground obstacles, duck under
//! flying ones, stand back up once clear. Always starts a run when none is
//! active.

use super::state::{ObstacleKind, Player, RunPhase, WorldState};
use super::tick::TickInput;
use crate::tuning::Tuning;

/// Ticks of warning before a ground obstacle reaches the player
const JUMP_LEAD_TICKS: f64 = 10.0;
/// Ticks of warning before a flying obstacle reaches the player
const DUCK_LEAD_TICKS: f64 = 6.0;

/// Pick this tick's commands
pub fn decide(phase: RunPhase, player: &Player, world: Option<&WorldState>, tuning: &Tuning) -> TickInput {
    let mut input = TickInput::default();

    let world = match (phase, world) {
        (RunPhase::Playing, Some(world)) => world,
        _ => {
            input.jump = true;
            return input;
        }
    };

    let player_front = tuning.player_x + player.size(tuning).0;

    // Nearest obstacle not yet fully behind the player
    let next = world
        .obstacles
        .iter()
        .filter(|o| o.trailing_edge() >= tuning.player_x)
        .min_by(|a, b| {
            a.horizontal_position
                .partial_cmp(&b.horizontal_position)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let Some(obstacle) = next else {
        input.duck_end = player.is_ducking;
        return input;
    };

    let distance = obstacle.horizontal_position - player_front;
    match obstacle.kind {
        ObstacleKind::Ground => {
            if player.is_ducking {
                input.duck_end = true;
            }
            if player.is_grounded() && distance <= world.speed * JUMP_LEAD_TICKS {
                input.jump = true;
            }
        }
        ObstacleKind::Flying => {
            if distance <= world.speed * DUCK_LEAD_TICKS && !player.is_ducking {
                // Mid-air this becomes a fast-fall
                input.duck_start = true;
            }
        }
    }

    input
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_run_when_idle() {
        let tuning = Tuning::default();
        let input = decide(RunPhase::Idle, &Player::default(), None, &tuning);
        assert!(input.jump);
    }

    #[test]
    fn test_jumps_near_ground_obstacle() {
        let tuning = Tuning::default();
        let mut world = WorldState::new(&tuning);
        world.place_obstacle(ObstacleKind::Ground, 600.0, 0.0, 0, &tuning);
        let far = decide(RunPhase::Playing, &Player::default(), Some(&world), &tuning);
        assert!(!far.jump);

        world.obstacles[0].horizontal_position = tuning.player_x + tuning.player_width + 30.0;
        let near = decide(RunPhase::Playing, &Player::default(), Some(&world), &tuning);
        assert!(near.jump);
    }

    #[test]
    fn test_ducks_under_flying_and_stands_after() {
        let tuning = Tuning::default();
        let mut world = WorldState::new(&tuning);
        world.place_obstacle(ObstacleKind::Flying, tuning.player_x + 60.0, 40.0, 0, &tuning);
        let input = decide(RunPhase::Playing, &Player::default(), Some(&world), &tuning);
        assert!(input.duck_start);
        assert!(!input.jump);

        world.obstacles.clear();
        let ducking = Player {
            is_ducking: true,
            ..Default::default()
        };
        let input = decide(RunPhase::Playing, &ducking, Some(&world), &tuning);
        assert!(input.duck_end);
    }
}
