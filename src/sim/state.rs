//! Run state and core simulation types
//!
//! Everything a single run mutates lives here. A [`WorldState`] is created
//! fresh by `start()` and dropped at the next run boundary.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Current phase of the run state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunPhase {
    /// No world yet, waiting for a start command
    #[default]
    Idle,
    /// Active gameplay
    Playing,
    /// Run ended on a lethal hit; world is frozen until restart
    GameOver,
}

/// Something that happened during a tick, for host audio/effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunEvent {
    RunStarted,
    Jumped,
    DoubleJumped,
    Landed,
    CoinCollected { coin_id: u32 },
    Died { obstacle_id: u32 },
    NewHighScore { score: i64 },
}

/// The player actor. Horizontal position is fixed by tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Distance above the ground baseline (0 = grounded)
    pub vertical_position: f64,
    pub vertical_velocity: f64,
    pub is_airborne: bool,
    /// Available once per airborne phase, restored on landing
    pub can_double_jump: bool,
    /// Only ever set while grounded
    pub is_ducking: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            vertical_position: 0.0,
            vertical_velocity: 0.0,
            is_airborne: false,
            can_double_jump: true,
            is_ducking: false,
        }
    }
}

impl Player {
    /// Hitbox size for the current pose (width, height)
    pub fn size(&self, tuning: &Tuning) -> (f64, f64) {
        if self.is_ducking {
            (tuning.duck_width, tuning.duck_height)
        } else {
            (tuning.player_width, tuning.player_height)
        }
    }

    pub fn is_grounded(&self) -> bool {
        !self.is_airborne
    }
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Sits on the baseline; jump over it
    Ground,
    /// Hovers in the flying band; duck under it
    Flying,
}

impl ObstacleKind {
    /// Every kind the spawner draws from
    pub const ALL: [ObstacleKind; 2] = [ObstacleKind::Ground, ObstacleKind::Flying];
}

/// A hazard. Only `horizontal_position` changes after spawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub horizontal_position: f64,
    pub width: f64,
    pub height: f64,
    pub kind: ObstacleKind,
    /// Bottom edge above the baseline (0 for ground obstacles)
    pub ground_offset: f64,
    /// Frame on which the obstacle appeared
    pub spawned_at: u64,
}

impl Obstacle {
    /// Build an obstacle of `kind` with the tuned dimensions
    pub fn new(
        id: u32,
        kind: ObstacleKind,
        horizontal_position: f64,
        ground_offset: f64,
        spawned_at: u64,
        tuning: &Tuning,
    ) -> Self {
        let (width, height, ground_offset) = match kind {
            ObstacleKind::Ground => (tuning.ground_obstacle_width, tuning.ground_obstacle_height, 0.0),
            ObstacleKind::Flying => (
                tuning.flying_obstacle_width,
                tuning.flying_obstacle_height,
                ground_offset,
            ),
        };
        Self {
            id,
            horizontal_position,
            width,
            height,
            kind,
            ground_offset,
            spawned_at,
        }
    }

    /// Right edge
    pub fn trailing_edge(&self) -> f64 {
        self.horizontal_position + self.width
    }
}

/// A collectible. Position is the coin's center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    pub horizontal_position: f64,
    pub vertical_position: f64,
    /// Inert once set; pruned on the next pass
    pub collected: bool,
}

/// Live world for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldState {
    /// Clamped to [initial_speed, max_speed], never decreases
    pub speed: f64,
    /// Unfloored running score
    pub elapsed_score: f64,
    pub coins_collected: u32,
    pub obstacles: Vec<Obstacle>,
    pub coins: Vec<Coin>,
    /// Ticks until the next obstacle
    pub spawn_countdown: i32,
    /// Ticks until the next coin
    pub coin_countdown: i32,
    next_id: u32,
}

impl WorldState {
    /// Fresh world at the start of a run
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            speed: tuning.initial_speed,
            elapsed_score: 0.0,
            coins_collected: 0,
            obstacles: Vec::new(),
            coins: Vec::new(),
            spawn_countdown: tuning.initial_obstacle_countdown,
            coin_countdown: tuning.initial_coin_countdown,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Place an obstacle directly (scripted sections, tests)
    pub fn place_obstacle(
        &mut self,
        kind: ObstacleKind,
        horizontal_position: f64,
        ground_offset: f64,
        frame: u64,
        tuning: &Tuning,
    ) -> u32 {
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle::new(
            id,
            kind,
            horizontal_position,
            ground_offset,
            frame,
            tuning,
        ));
        id
    }

    /// Place a coin directly (scripted sections, tests)
    pub fn place_coin(&mut self, horizontal_position: f64, vertical_position: f64) -> u32 {
        let id = self.next_entity_id();
        self.coins.push(Coin {
            id,
            horizontal_position,
            vertical_position,
            collected: false,
        });
        id
    }

    pub fn coin(&self, id: u32) -> Option<&Coin> {
        self.coins.iter().find(|c| c.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duck_hitbox_is_shorter_and_wider() {
        let tuning = Tuning::default();
        let mut player = Player::default();
        let (w, h) = player.size(&tuning);
        player.is_ducking = true;
        let (dw, dh) = player.size(&tuning);
        assert!(dw > w);
        assert!(dh < h);
    }

    #[test]
    fn test_ground_obstacle_ignores_offset() {
        let tuning = Tuning::default();
        let obstacle = Obstacle::new(1, ObstacleKind::Ground, 100.0, 40.0, 0, &tuning);
        assert_eq!(obstacle.ground_offset, 0.0);
        assert_eq!(obstacle.trailing_edge(), 100.0 + tuning.ground_obstacle_width);
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let tuning = Tuning::default();
        let mut world = WorldState::new(&tuning);
        let a = world.place_coin(10.0, 10.0);
        let b = world.place_obstacle(ObstacleKind::Flying, 50.0, 40.0, 0, &tuning);
        let c = world.place_coin(20.0, 10.0);
        assert!(a != b && b != c && a != c);
        assert_eq!(world.speed, tuning.initial_speed);
    }
}
