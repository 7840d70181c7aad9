//! Vertical player physics
//!
//! Gravity, jump impulses, ducking and fast-fall. Every command is total:
//! anything inapplicable in the current pose is silently dropped.

use super::state::{Player, RunEvent};
use crate::tuning::Tuning;

/// Apply a jump command.
///
/// Grounded: full impulse and the double jump becomes available.
/// Airborne: one weaker impulse per airborne phase, then nothing.
pub fn jump(player: &mut Player, tuning: &Tuning) -> Option<RunEvent> {
    if player.is_grounded() {
        if player.is_ducking {
            return None;
        }
        player.vertical_velocity = tuning.jump_impulse;
        player.is_airborne = true;
        player.can_double_jump = true;
        Some(RunEvent::Jumped)
    } else if player.can_double_jump {
        player.vertical_velocity = tuning.double_jump_impulse;
        player.can_double_jump = false;
        Some(RunEvent::DoubleJumped)
    } else {
        None
    }
}

/// Grounded: crouch. Airborne: fast-fall without crouching.
pub fn duck_start(player: &mut Player, tuning: &Tuning) {
    if player.is_grounded() {
        player.is_ducking = true;
    } else {
        player.vertical_velocity = player.vertical_velocity.min(-tuning.fast_fall_speed);
    }
}

pub fn duck_end(player: &mut Player) {
    if player.is_grounded() {
        player.is_ducking = false;
    }
}

/// Integrate one tick of vertical motion. Returns true on the landing tick.
pub fn step(player: &mut Player, tuning: &Tuning) -> bool {
    if !player.is_airborne {
        return false;
    }

    player.vertical_velocity -= tuning.gravity;
    player.vertical_position += player.vertical_velocity;

    if player.vertical_position <= 0.0 && player.vertical_velocity < 0.0 {
        player.vertical_position = 0.0;
        player.vertical_velocity = 0.0;
        player.is_airborne = false;
        player.can_double_jump = true;
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn land(player: &mut Player, tuning: &Tuning) -> u32 {
        let mut ticks = 0;
        while !step(player, tuning) {
            ticks += 1;
            assert!(ticks < 1000, "player never landed");
        }
        ticks + 1
    }

    #[test]
    fn test_jump_from_ground() {
        let tuning = Tuning::default();
        let mut player = Player::default();
        assert_eq!(jump(&mut player, &tuning), Some(RunEvent::Jumped));
        assert!(player.is_airborne);
        assert!(player.can_double_jump);
        assert_eq!(player.vertical_velocity, tuning.jump_impulse);
    }

    #[test]
    fn test_no_triple_jump() {
        let tuning = Tuning::default();
        let mut player = Player::default();
        let impulses = (0..3).filter(|_| jump(&mut player, &tuning).is_some()).count();
        assert_eq!(impulses, 2);
        assert_eq!(player.vertical_velocity, tuning.double_jump_impulse);
        assert!(!player.can_double_jump);
    }

    #[test]
    fn test_double_jump_restored_only_on_landing() {
        let tuning = Tuning::default();
        let mut player = Player::default();
        jump(&mut player, &tuning);
        jump(&mut player, &tuning);

        // Still airborne for a while: no double jump
        for _ in 0..5 {
            step(&mut player, &tuning);
            assert!(!player.can_double_jump);
        }

        land(&mut player, &tuning);
        assert!(player.is_grounded());
        assert!(player.can_double_jump);
        assert_eq!(player.vertical_position, 0.0);
        assert_eq!(player.vertical_velocity, 0.0);
    }

    #[test]
    fn test_single_jump_airtime_matches_tuning() {
        let tuning = Tuning::default();
        let mut player = Player::default();
        jump(&mut player, &tuning);
        let ticks = land(&mut player, &tuning);
        assert!(ticks as i32 <= tuning.jump_airtime_ticks());
    }

    #[test]
    fn test_duck_grounded_toggles_flag() {
        let tuning = Tuning::default();
        let mut player = Player::default();
        duck_start(&mut player, &tuning);
        assert!(player.is_ducking);
        assert_eq!(player.vertical_velocity, 0.0);
        duck_end(&mut player);
        assert!(!player.is_ducking);
    }

    #[test]
    fn test_jump_while_ducking_is_ignored() {
        let tuning = Tuning::default();
        let mut player = Player::default();
        duck_start(&mut player, &tuning);
        assert_eq!(jump(&mut player, &tuning), None);
        assert!(player.is_grounded());
    }

    #[test]
    fn test_duck_midair_fast_falls_without_crouching() {
        let tuning = Tuning::default();
        let mut player = Player::default();
        jump(&mut player, &tuning);
        step(&mut player, &tuning);

        duck_start(&mut player, &tuning);
        assert!(!player.is_ducking);
        assert_eq!(player.vertical_velocity, -tuning.fast_fall_speed);

        // Already falling faster than the floor: untouched
        player.vertical_velocity = -tuning.fast_fall_speed - 3.0;
        duck_start(&mut player, &tuning);
        assert_eq!(player.vertical_velocity, -tuning.fast_fall_speed - 3.0);

        duck_end(&mut player);
        assert!(!player.is_ducking);
    }

    #[test]
    fn test_grounded_step_is_noop() {
        let tuning = Tuning::default();
        let mut player = Player::default();
        assert!(!step(&mut player, &tuning));
        assert_eq!(player, Player::default());
    }
}
