//! Data-driven game balance
//!
//! [`Tuning`] mirrors every constant in [`crate::consts`]. A host can ship a
//! JSON override and any missing key falls back to the compile-time default,
//! so a minimal file can adjust just the values being tuned.
//!
//! Tuning is checked by [`Tuning::validate`] before a run uses it. The checks
//! encode the fairness guarantees of the course: every obstacle can be
//! cleared, and consecutive obstacles leave room to land.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Runtime-tunable movement, spawning and scoring parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // ── Player ───────────────────────────────────────────────────────────────
    pub player_x: f64,
    pub player_width: f64,
    pub player_height: f64,
    pub duck_width: f64,
    pub duck_height: f64,

    // ── Kinematics ───────────────────────────────────────────────────────────
    pub gravity: f64,
    pub jump_impulse: f64,
    pub double_jump_impulse: f64,
    pub fast_fall_speed: f64,

    // ── World ────────────────────────────────────────────────────────────────
    pub initial_speed: f64,
    pub max_speed: f64,
    pub speed_increment: f64,
    pub spawn_x: f64,
    pub offscreen_margin: f64,

    // ── Obstacle cadence ─────────────────────────────────────────────────────
    pub obstacle_base_gap: i32,
    pub obstacle_min_gap: i32,
    pub obstacle_gap_speed_factor: f64,
    pub obstacle_jitter: i32,
    pub initial_obstacle_countdown: i32,

    // ── Obstacle shapes ──────────────────────────────────────────────────────
    pub ground_obstacle_width: f64,
    pub ground_obstacle_height: f64,
    pub flying_obstacle_width: f64,
    pub flying_obstacle_height: f64,
    pub flying_min_offset: f64,
    pub flying_max_offset: f64,

    // ── Coins ────────────────────────────────────────────────────────────────
    pub coin_gap: i32,
    pub coin_jitter: i32,
    pub initial_coin_countdown: i32,
    pub coin_size: f64,
    pub coin_min_height: f64,
    pub coin_max_height: f64,
    pub coin_pickup_radius: f64,

    // ── Collision & score ────────────────────────────────────────────────────
    pub collision_inset: f64,
    pub distance_score_factor: f64,
    pub coin_bonus: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_x: PLAYER_X,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            duck_width: DUCK_WIDTH,
            duck_height: DUCK_HEIGHT,

            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            double_jump_impulse: DOUBLE_JUMP_IMPULSE,
            fast_fall_speed: FAST_FALL_SPEED,

            initial_speed: INITIAL_SPEED,
            max_speed: MAX_SPEED,
            speed_increment: SPEED_INCREMENT,
            spawn_x: SPAWN_X,
            offscreen_margin: OFFSCREEN_MARGIN,

            obstacle_base_gap: OBSTACLE_BASE_GAP,
            obstacle_min_gap: OBSTACLE_MIN_GAP,
            obstacle_gap_speed_factor: OBSTACLE_GAP_SPEED_FACTOR,
            obstacle_jitter: OBSTACLE_JITTER,
            initial_obstacle_countdown: INITIAL_OBSTACLE_COUNTDOWN,

            ground_obstacle_width: GROUND_OBSTACLE_WIDTH,
            ground_obstacle_height: GROUND_OBSTACLE_HEIGHT,
            flying_obstacle_width: FLYING_OBSTACLE_WIDTH,
            flying_obstacle_height: FLYING_OBSTACLE_HEIGHT,
            flying_min_offset: FLYING_MIN_OFFSET,
            flying_max_offset: FLYING_MAX_OFFSET,

            coin_gap: COIN_GAP,
            coin_jitter: COIN_JITTER,
            initial_coin_countdown: INITIAL_COIN_COUNTDOWN,
            coin_size: COIN_SIZE,
            coin_min_height: COIN_MIN_HEIGHT,
            coin_max_height: COIN_MAX_HEIGHT,
            coin_pickup_radius: COIN_PICKUP_RADIUS,

            collision_inset: COLLISION_INSET,
            distance_score_factor: DISTANCE_SCORE_FACTOR,
            coin_bonus: COIN_BONUS,
        }
    }
}

/// Rejected tuning values.
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    /// The JSON document could not be parsed.
    Parse(String),

    /// A value was NaN or infinite.
    NotFinite { name: &'static str, value: f64 },

    /// A value that must be strictly positive was zero or negative.
    NotPositive { name: &'static str, value: f64 },

    /// A value that must not be negative was negative.
    Negative { name: &'static str, value: f64 },

    /// `initial_speed` exceeds `max_speed`.
    SpeedRange { initial: f64, max: f64 },

    /// The double jump must be weaker than the first jump.
    DoubleJumpTooStrong { jump: f64, double_jump: f64 },

    /// Obstacles could arrive faster than the player can land between them.
    GapBelowClearance { min_gap: i32, airtime: i32 },

    /// A full jump does not clear a ground obstacle.
    JumpTooLow { apex: f64, obstacle_height: f64 },

    /// The flying band reaches down into the duck hitbox.
    FlyingBandOverlapsDuck { flying_min_offset: f64, duck_height: f64 },

    /// The top of the flying band passes over a standing player.
    FlyingBandHarmless { flying_max_offset: f64, reach: f64 },

    /// `flying_min_offset` is above `flying_max_offset`.
    FlyingBandInverted { min: f64, max: f64 },

    /// The duck hitbox must be shorter and wider than the standing one.
    DuckHitboxShape,

    /// `coin_min_height` is above `coin_max_height`.
    CoinBandInverted { min: f64, max: f64 },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(msg) => write!(f, "invalid tuning JSON: {}", msg),
            TuningError::NotFinite { name, value } => {
                write!(f, "'{}' must be finite, got {}", name, value)
            }
            TuningError::NotPositive { name, value } => {
                write!(f, "'{}' must be positive, got {}", name, value)
            }
            TuningError::Negative { name, value } => {
                write!(f, "'{}' must not be negative, got {}", name, value)
            }
            TuningError::SpeedRange { initial, max } => write!(
                f,
                "initial speed {} is above max speed {}",
                initial, max
            ),
            TuningError::DoubleJumpTooStrong { jump, double_jump } => write!(
                f,
                "double jump impulse {} must be weaker than jump impulse {}",
                double_jump, jump
            ),
            TuningError::GapBelowClearance { min_gap, airtime } => write!(
                f,
                "minimum obstacle gap of {} ticks is shorter than a jump ({} ticks)",
                min_gap, airtime
            ),
            TuningError::JumpTooLow {
                apex,
                obstacle_height,
            } => write!(
                f,
                "jump apex {:.1} does not clear ground obstacle height {}",
                apex, obstacle_height
            ),
            TuningError::FlyingBandOverlapsDuck {
                flying_min_offset,
                duck_height,
            } => write!(
                f,
                "flying band starts at {} which is inside the duck hitbox ({})",
                flying_min_offset, duck_height
            ),
            TuningError::FlyingBandHarmless {
                flying_max_offset,
                reach,
            } => write!(
                f,
                "flying band reaches {} but a standing player is only hit below {}",
                flying_max_offset, reach
            ),
            TuningError::FlyingBandInverted { min, max } => {
                write!(f, "flying band is inverted: {} > {}", min, max)
            }
            TuningError::DuckHitboxShape => {
                write!(f, "duck hitbox must be shorter and wider than the standing hitbox")
            }
            TuningError::CoinBandInverted { min, max } => {
                write!(f, "coin band is inverted: {} > {}", min, max)
            }
        }
    }
}

impl std::error::Error for TuningError {}

impl Tuning {
    /// Parse a JSON override. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| TuningError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Serialize to pretty JSON (for dumping the active balance)
    pub fn to_json(&self) -> String {
        // Plain struct of numbers; serialization cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Ticks between takeoff and landing for a single grounded jump
    pub fn jump_airtime_ticks(&self) -> i32 {
        (2.0 * self.jump_impulse / self.gravity).ceil() as i32
    }

    /// Peak height of a single grounded jump
    pub fn jump_apex(&self) -> f64 {
        self.jump_impulse * self.jump_impulse / (2.0 * self.gravity)
    }

    /// Check every value and the fairness relations between them.
    pub fn validate(&self) -> Result<(), TuningError> {
        let values = [
            ("player_x", self.player_x),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("duck_width", self.duck_width),
            ("duck_height", self.duck_height),
            ("gravity", self.gravity),
            ("jump_impulse", self.jump_impulse),
            ("double_jump_impulse", self.double_jump_impulse),
            ("fast_fall_speed", self.fast_fall_speed),
            ("initial_speed", self.initial_speed),
            ("max_speed", self.max_speed),
            ("speed_increment", self.speed_increment),
            ("spawn_x", self.spawn_x),
            ("offscreen_margin", self.offscreen_margin),
            ("obstacle_gap_speed_factor", self.obstacle_gap_speed_factor),
            ("ground_obstacle_width", self.ground_obstacle_width),
            ("ground_obstacle_height", self.ground_obstacle_height),
            ("flying_obstacle_width", self.flying_obstacle_width),
            ("flying_obstacle_height", self.flying_obstacle_height),
            ("flying_min_offset", self.flying_min_offset),
            ("flying_max_offset", self.flying_max_offset),
            ("coin_size", self.coin_size),
            ("coin_min_height", self.coin_min_height),
            ("coin_max_height", self.coin_max_height),
            ("coin_pickup_radius", self.coin_pickup_radius),
            ("collision_inset", self.collision_inset),
            ("distance_score_factor", self.distance_score_factor),
            ("coin_bonus", self.coin_bonus),
        ];
        if let Some(&(name, value)) = values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(TuningError::NotFinite { name, value });
        }

        let positives = [
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("duck_width", self.duck_width),
            ("duck_height", self.duck_height),
            ("gravity", self.gravity),
            ("jump_impulse", self.jump_impulse),
            ("double_jump_impulse", self.double_jump_impulse),
            ("fast_fall_speed", self.fast_fall_speed),
            ("initial_speed", self.initial_speed),
            ("max_speed", self.max_speed),
            ("offscreen_margin", self.offscreen_margin),
            ("obstacle_min_gap", self.obstacle_min_gap as f64),
            ("coin_gap", self.coin_gap as f64),
            ("ground_obstacle_width", self.ground_obstacle_width),
            ("ground_obstacle_height", self.ground_obstacle_height),
            ("flying_obstacle_width", self.flying_obstacle_width),
            ("flying_obstacle_height", self.flying_obstacle_height),
            ("coin_size", self.coin_size),
            ("coin_pickup_radius", self.coin_pickup_radius),
            ("distance_score_factor", self.distance_score_factor),
        ];
        for (name, value) in positives {
            if !(value > 0.0) {
                return Err(TuningError::NotPositive { name, value });
            }
        }

        let non_negatives = [
            ("speed_increment", self.speed_increment),
            ("obstacle_jitter", self.obstacle_jitter as f64),
            ("coin_jitter", self.coin_jitter as f64),
            ("obstacle_gap_speed_factor", self.obstacle_gap_speed_factor),
            ("initial_obstacle_countdown", self.initial_obstacle_countdown as f64),
            ("initial_coin_countdown", self.initial_coin_countdown as f64),
            ("collision_inset", self.collision_inset),
            ("coin_bonus", self.coin_bonus),
        ];
        for (name, value) in non_negatives {
            if !(value >= 0.0) {
                return Err(TuningError::Negative { name, value });
            }
        }

        if self.initial_speed > self.max_speed {
            return Err(TuningError::SpeedRange {
                initial: self.initial_speed,
                max: self.max_speed,
            });
        }

        if self.double_jump_impulse >= self.jump_impulse {
            return Err(TuningError::DoubleJumpTooStrong {
                jump: self.jump_impulse,
                double_jump: self.double_jump_impulse,
            });
        }

        let airtime = self.jump_airtime_ticks();
        if self.obstacle_min_gap < airtime {
            return Err(TuningError::GapBelowClearance {
                min_gap: self.obstacle_min_gap,
                airtime,
            });
        }

        if self.jump_apex() <= self.ground_obstacle_height {
            return Err(TuningError::JumpTooLow {
                apex: self.jump_apex(),
                obstacle_height: self.ground_obstacle_height,
            });
        }

        if self.flying_min_offset > self.flying_max_offset {
            return Err(TuningError::FlyingBandInverted {
                min: self.flying_min_offset,
                max: self.flying_max_offset,
            });
        }

        if self.flying_min_offset <= self.duck_height {
            return Err(TuningError::FlyingBandOverlapsDuck {
                flying_min_offset: self.flying_min_offset,
                duck_height: self.duck_height,
            });
        }

        // Inset boxes: the obstacle's bottom must sit below the standing top
        let reach = self.player_height - 2.0 * self.collision_inset;
        if self.flying_max_offset >= reach {
            return Err(TuningError::FlyingBandHarmless {
                flying_max_offset: self.flying_max_offset,
                reach,
            });
        }

        if self.duck_height >= self.player_height || self.duck_width <= self.player_width {
            return Err(TuningError::DuckHitboxShape);
        }

        if self.coin_min_height > self.coin_max_height {
            return Err(TuningError::CoinBandInverted {
                min: self.coin_min_height,
                max: self.coin_max_height,
            });
        }

        Ok(())
    }
}
