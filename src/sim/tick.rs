//! Fixed timestep run controller
//!
//! Owns the run state machine and advances the world once per host frame:
//! commands, kinematics, world scroll, spawning, collision, then scoring.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::Clock;
use super::collision::{self, CollisionOutcome};
use super::snapshot::{PlayerPose, WorldSnapshot};
use super::state::{ObstacleKind, Player, RunEvent, RunPhase, WorldState};
use super::{autopilot, kinematics, score, spawner, world};
use crate::consts::SIM_DT;
use crate::highscores::{HighScoreStore, MemoryHighScores};
use crate::tuning::{Tuning, TuningError};

/// Abstract player commands, translated from keys/touch by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Jump,
    DuckStart,
    DuckEnd,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Jump, or start a run when none is active
    pub jump: bool,
    /// Crouch (grounded) or fast-fall (airborne)
    pub duck_start: bool,
    /// Stand back up
    pub duck_end: bool,
    /// Idle/demo mode - AI plays the run
    pub idle_mode: bool,
}

impl TickInput {
    /// Add a command to the set
    pub fn with(mut self, command: Command) -> Self {
        match command {
            Command::Jump => self.jump = true,
            Command::DuckStart => self.duck_start = true,
            Command::DuckEnd => self.duck_end = true,
        }
        self
    }
}

impl FromIterator<Command> for TickInput {
    fn from_iter<I: IntoIterator<Item = Command>>(iter: I) -> Self {
        iter.into_iter().fold(Self::default(), Self::with)
    }
}

/// Drives runs from start to game over.
///
/// The world is owned by value; hosts only ever see [`WorldSnapshot`]s.
pub struct RunController {
    tuning: Tuning,
    phase: RunPhase,
    player: Player,
    /// `None` while idle
    world: Option<WorldState>,
    clock: Clock,
    rng: Pcg32,
    spawning: bool,
    store: Box<dyn HighScoreStore>,
    high_score: Option<i64>,
    runs: u32,
    /// Events since the last snapshot
    events: Vec<RunEvent>,
}

impl RunController {
    /// Controller with default tuning and an in-memory high score
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// Controller with custom tuning, validated first
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        Self {
            tuning,
            phase: RunPhase::Idle,
            player: Player::default(),
            world: None,
            clock: Clock::new(),
            rng: Pcg32::seed_from_u64(seed),
            spawning: true,
            store: Box::new(MemoryHighScores::new()),
            high_score: None,
            runs: 0,
            events: Vec::new(),
        }
    }

    /// Swap in a host storage backend and read the stored best
    pub fn with_store(mut self, store: Box<dyn HighScoreStore>) -> Self {
        self.high_score = store.load_high_score();
        self.store = store;
        self
    }

    /// Enable or disable both spawn channels (tutorials, attract screens)
    pub fn set_spawning(&mut self, enabled: bool) {
        self.spawning = enabled;
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn world(&self) -> Option<&WorldState> {
        self.world.as_ref()
    }

    /// Script an obstacle into the live world (tutorials, set pieces).
    ///
    /// Returns `None` when no run is in progress.
    pub fn place_obstacle(
        &mut self,
        kind: ObstacleKind,
        horizontal_position: f64,
        ground_offset: f64,
    ) -> Option<u32> {
        if self.phase != RunPhase::Playing {
            return None;
        }
        let frame = self.clock.frame;
        let world = self.world.as_mut()?;
        Some(world.place_obstacle(kind, horizontal_position, ground_offset, frame, &self.tuning))
    }

    /// Script a coin into the live world. Returns `None` when no run is in progress.
    pub fn place_coin(&mut self, horizontal_position: f64, vertical_position: f64) -> Option<u32> {
        if self.phase != RunPhase::Playing {
            return None;
        }
        let world = self.world.as_mut()?;
        Some(world.place_coin(horizontal_position, vertical_position))
    }

    pub fn high_score(&self) -> Option<i64> {
        self.high_score
    }

    /// Frames simulated in the current run
    pub fn frame(&self) -> u64 {
        self.clock.frame
    }

    /// Begin a fresh run. Ignored while a run is in progress.
    pub fn start(&mut self) {
        if self.phase == RunPhase::Playing {
            log::debug!("start ignored: run in progress");
            return;
        }

        self.player = Player::default();
        self.world = Some(WorldState::new(&self.tuning));
        self.clock = Clock::new();
        self.runs += 1;
        self.phase = RunPhase::Playing;
        self.events.push(RunEvent::RunStarted);
        log::info!("Run {} started (best: {:?})", self.runs, self.high_score);
    }

    /// Leave the game over screen for idle. Ignored in other phases.
    pub fn reset(&mut self) {
        if self.phase != RunPhase::GameOver {
            return;
        }
        self.player = Player::default();
        self.world = None;
        self.clock = Clock::new();
        self.phase = RunPhase::Idle;
    }

    /// Advance one fixed step and report the result.
    ///
    /// Outside `Playing` only a jump does anything: it starts a run.
    pub fn tick(&mut self, input: &TickInput) -> WorldSnapshot {
        let input = if input.idle_mode {
            autopilot::decide(self.phase, &self.player, self.world.as_ref(), &self.tuning)
        } else {
            *input
        };

        match self.phase {
            RunPhase::Idle | RunPhase::GameOver => {
                if input.jump {
                    self.start();
                }
            }
            RunPhase::Playing => self.step(&input),
        }

        let events = std::mem::take(&mut self.events);
        self.build_snapshot(events)
    }

    /// Current view without advancing
    pub fn snapshot(&self) -> WorldSnapshot {
        self.build_snapshot(self.events.clone())
    }

    fn step(&mut self, input: &TickInput) {
        let tuning = &self.tuning;
        let Some(world) = self.world.as_mut() else {
            return;
        };
        let player = &mut self.player;

        if input.duck_end {
            kinematics::duck_end(player);
        }
        // A jump that fired this tick wins over a same-tick duck
        let mut jumped = false;
        if input.jump {
            if let Some(event) = kinematics::jump(player, tuning) {
                self.events.push(event);
                jumped = true;
            }
        }
        if input.duck_start && !jumped {
            kinematics::duck_start(player, tuning);
        }

        self.clock.advance(SIM_DT);
        if kinematics::step(player, tuning) {
            self.events.push(RunEvent::Landed);
        }

        world::advance(world, tuning);

        if self.spawning {
            if let Some(obstacle) = spawner::spawn_obstacle(world, tuning, self.clock.frame, &mut self.rng) {
                world.obstacles.push(obstacle);
            }
            if let Some(coin) = spawner::spawn_coin(world, tuning, &mut self.rng) {
                world.coins.push(coin);
            }
        }

        let outcome = collision::resolve(player, world, tuning);

        score::add_distance(world, tuning);
        match outcome {
            CollisionOutcome::None => {}
            CollisionOutcome::CoinPickup { coin_id } => {
                if let Some(coin) = world.coins.iter_mut().find(|c| c.id == coin_id) {
                    coin.collected = true;
                    score::add_coin(world, tuning);
                    self.events.push(RunEvent::CoinCollected { coin_id });
                }
            }
            CollisionOutcome::Lethal { obstacle_id } => {
                let final_score = score::final_score(world);
                self.phase = RunPhase::GameOver;
                self.events.push(RunEvent::Died { obstacle_id });
                log::info!(
                    "Run {} over at frame {}: score {}, coins {}",
                    self.runs,
                    self.clock.frame,
                    final_score,
                    world.coins_collected
                );

                if score::is_new_high_score(final_score, self.high_score) {
                    self.store.save_high_score(final_score);
                    self.high_score = Some(final_score);
                    self.events.push(RunEvent::NewHighScore { score: final_score });
                    log::info!("New high score: {}", final_score);
                }
            }
        }
    }

    fn build_snapshot(&self, events: Vec<RunEvent>) -> WorldSnapshot {
        let (speed, score, coins_collected, obstacles, coins) = match &self.world {
            Some(world) => (
                world.speed,
                score::final_score(world),
                world.coins_collected,
                world.obstacles.clone(),
                world.coins.clone(),
            ),
            None => (0.0, 0, 0, Vec::new(), Vec::new()),
        };

        WorldSnapshot {
            phase: self.phase,
            frame: self.clock.frame,
            elapsed: self.clock.elapsed,
            speed,
            score,
            coins_collected,
            high_score: self.high_score,
            player: PlayerPose::new(&self.player, &self.tuning),
            obstacles,
            coins,
            events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing(seed: u64) -> RunController {
        let mut run = RunController::new(seed);
        run.start();
        run
    }

    #[test]
    fn test_idle_to_playing() {
        let mut run = RunController::new(12345);
        assert_eq!(run.phase(), RunPhase::Idle);

        // Tick without input - stays idle, no world
        let snap = run.tick(&TickInput::default());
        assert_eq!(snap.phase, RunPhase::Idle);
        assert!(run.world().is_none());

        // Duck does nothing while idle
        run.tick(&TickInput::default().with(Command::DuckStart));
        assert_eq!(run.phase(), RunPhase::Idle);

        // Jump is an implicit start
        let snap = run.tick(&TickInput::default().with(Command::Jump));
        assert_eq!(snap.phase, RunPhase::Playing);
        assert!(snap.has_event(RunEvent::RunStarted));
        assert_eq!(snap.speed, run.tuning().initial_speed);
        assert!(run.player().is_grounded());
    }

    #[test]
    fn test_commands_reach_player() {
        let mut run = playing(1);
        run.set_spawning(false);

        let snap = run.tick(&[Command::Jump].into_iter().collect::<TickInput>());
        assert!(snap.player.is_airborne);
        assert!(snap.has_event(RunEvent::Jumped));

        let snap = run.tick(&TickInput::default().with(Command::Jump));
        assert!(snap.has_event(RunEvent::DoubleJumped));

        let mut landed = false;
        for _ in 0..200 {
            if run.tick(&TickInput::default()).has_event(RunEvent::Landed) {
                landed = true;
                break;
            }
        }
        assert!(landed);
        assert!(run.player().can_double_jump);
    }

    #[test]
    fn test_duck_release_and_jump_same_tick() {
        let mut run = playing(1);
        run.set_spawning(false);
        run.tick(&TickInput::default().with(Command::DuckStart));
        assert!(run.player().is_ducking);

        let input: TickInput = [Command::DuckEnd, Command::Jump].into_iter().collect();
        run.tick(&input);
        assert!(!run.player().is_ducking);
        assert!(run.player().is_airborne);
    }

    #[test]
    fn test_jump_beats_same_tick_duck() {
        let mut run = playing(1);
        run.set_spawning(false);

        let input: TickInput = [Command::Jump, Command::DuckStart].into_iter().collect();
        let snap = run.tick(&input);
        assert!(snap.has_event(RunEvent::Jumped));
        assert!(!snap.has_event(RunEvent::Landed));
        assert!(snap.player.is_airborne);
        assert!(snap.player.y > 0.0);
        assert!(!snap.player.is_ducking);

        // Next tick the duck is a fast-fall straight back down
        let snap = run.tick(&TickInput::default().with(Command::DuckStart));
        assert!(snap.has_event(RunEvent::Landed));
        assert!(!snap.player.is_ducking);
    }

    #[test]
    fn test_placement_needs_live_run() {
        let mut run = RunController::new(4);
        assert_eq!(run.place_obstacle(ObstacleKind::Ground, 300.0, 0.0), None);
        assert_eq!(run.place_coin(300.0, 40.0), None);

        run.start();
        let obstacle = run.place_obstacle(ObstacleKind::Ground, 300.0, 0.0).unwrap();
        let coin = run.place_coin(300.0, 40.0).unwrap();
        assert_ne!(obstacle, coin);
        let snap = run.snapshot();
        assert!(snap.obstacles.iter().any(|o| o.id == obstacle));
        assert!(snap.coins.iter().any(|c| c.id == coin));
    }

    #[test]
    fn test_lethal_hit_ends_run_and_freezes() {
        let mut run = playing(5);
        run.set_spawning(false);
        let x = run.tuning().player_x;
        run.place_obstacle(ObstacleKind::Ground, x, 0.0).unwrap();

        let snap = run.tick(&TickInput::default());
        assert_eq!(snap.phase, RunPhase::GameOver);
        assert!(snap.events.iter().any(|e| matches!(e, RunEvent::Died { .. })));

        let frozen = snap.score;
        let frame = snap.frame;
        for _ in 0..10 {
            let snap = run.tick(&TickInput::default().with(Command::DuckStart));
            assert_eq!(snap.phase, RunPhase::GameOver);
            assert_eq!(snap.score, frozen);
            assert_eq!(snap.frame, frame);
        }
    }

    #[test]
    fn test_game_over_restart_paths() {
        let mut run = playing(5);
        run.set_spawning(false);
        let x = run.tuning().player_x;
        run.place_obstacle(ObstacleKind::Ground, x, 0.0).unwrap();
        run.tick(&TickInput::default());
        assert_eq!(run.phase(), RunPhase::GameOver);

        // Explicit restart command goes back to idle
        run.reset();
        assert_eq!(run.phase(), RunPhase::Idle);
        assert!(run.world().is_none());

        // Jump from idle starts a clean world
        let snap = run.tick(&TickInput::default().with(Command::Jump));
        assert_eq!(snap.phase, RunPhase::Playing);
        assert!(snap.obstacles.is_empty());
        assert_eq!(snap.score, 0);
        assert_eq!(snap.frame, 0);
    }

    #[test]
    fn test_start_ignored_while_playing() {
        let mut run = playing(9);
        run.set_spawning(false);
        for _ in 0..10 {
            run.tick(&TickInput::default());
        }
        run.start();
        assert_eq!(run.frame(), 10);
        run.reset();
        assert_eq!(run.phase(), RunPhase::Playing);
    }

    #[test]
    fn test_high_score_kept_when_not_beaten() {
        let store = MemoryHighScores::with_score(1_000_000);
        let mut run = RunController::new(3).with_store(Box::new(store.clone()));
        assert_eq!(run.high_score(), Some(1_000_000));

        run.start();
        run.set_spawning(false);
        for _ in 0..20 {
            run.tick(&TickInput::default());
        }
        let x = run.tuning().player_x;
        run.place_obstacle(ObstacleKind::Ground, x, 0.0).unwrap();
        let snap = run.tick(&TickInput::default());
        assert_eq!(snap.phase, RunPhase::GameOver);
        assert!(!snap.events.iter().any(|e| matches!(e, RunEvent::NewHighScore { .. })));
        assert_eq!(store.load_high_score(), Some(1_000_000));
    }

    #[test]
    fn test_first_score_becomes_high_score() {
        let store = MemoryHighScores::new();
        let mut run = RunController::new(3).with_store(Box::new(store.clone()));
        run.start();
        run.set_spawning(false);
        for _ in 0..20 {
            run.tick(&TickInput::default());
        }
        let x = run.tuning().player_x;
        run.place_obstacle(ObstacleKind::Ground, x, 0.0).unwrap();
        let snap = run.tick(&TickInput::default());
        assert!(snap.has_event(RunEvent::NewHighScore { score: snap.score }));
        assert_eq!(store.load_high_score(), Some(snap.score));
        assert_eq!(snap.high_score, Some(snap.score));
    }

    #[test]
    fn test_invalid_tuning_rejected() {
        let tuning = Tuning {
            max_speed: 1.0,
            ..Default::default()
        };
        assert!(RunController::with_tuning(1, tuning).is_err());
    }

    #[test]
    fn test_determinism() {
        // Two controllers with the same seed produce identical runs
        let mut a = playing(99999);
        let mut b = playing(99999);

        let inputs = [
            TickInput::default(),
            TickInput::default().with(Command::Jump),
            TickInput::default(),
            TickInput::default().with(Command::DuckStart),
        ];

        for i in 0..2000 {
            let input = inputs[i % inputs.len()];
            assert_eq!(a.tick(&input), b.tick(&input));
        }
    }

    #[test]
    fn test_idle_mode_plays_itself() {
        let mut run = RunController::new(2024);
        let demo = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        let snap = run.tick(&demo);
        assert_eq!(snap.phase, RunPhase::Playing);

        // Game overs restart on the following tick
        let playing_ticks = (0..600)
            .filter(|_| run.tick(&demo).phase == RunPhase::Playing)
            .count();
        assert!(playing_ticks > 500);
    }
}
