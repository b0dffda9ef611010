//! Game modes and their tuning table
//!
//! Every mode-specific number and policy lives in one `ModeConfig` row, so
//! the rest of the engine asks `mode.config()` instead of matching on the
//! mode at each call site.

use serde::{Deserialize, Serialize};

use super::hit::HitZone;
use super::scoring::{flat_points, zoned_points};
use crate::consts::*;

/// Session game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Fixed-size targets, fixed lifetime range
    Normal,
    /// Lifetimes shrink as the session progresses, spawns accelerate faster
    #[default]
    Endless,
    /// Countdown time bank, shrinking targets, bonus seconds per hit
    TimeTrial,
    /// Targets carry a small head sphere worth bonus points
    Precision,
}

impl Mode {
    /// All modes in menu order
    pub const ALL: [Mode; 4] = [Mode::Normal, Mode::Endless, Mode::TimeTrial, Mode::Precision];

    /// Tuning row for this mode
    #[inline]
    pub fn config(self) -> &'static ModeConfig {
        &MODE_TABLE[self.index()]
    }

    /// Position in `Mode::ALL`
    pub fn index(self) -> usize {
        match self {
            Mode::Normal => 0,
            Mode::Endless => 1,
            Mode::TimeTrial => 2,
            Mode::Precision => 3,
        }
    }

    /// Mode at `index`, clamped into range
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    pub fn label(self) -> &'static str {
        self.config().label
    }

    pub fn description(self) -> &'static str {
        self.config().description
    }
}

/// How a mode picks a new target's lifetime
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TtlCurve {
    /// Uniform in `[min, max]` regardless of progress
    Uniform { min: f64, max: f64 },
    /// Uniform range interpolated from `start` to `end` by `progress^exponent`
    Ramp {
        start: (f64, f64),
        end: (f64, f64),
        exponent: f64,
    },
    /// Constant lifetime
    Fixed(f64),
}

/// Per-mode tuning
#[derive(Debug, Clone, Copy)]
pub struct ModeConfig {
    pub label: &'static str,
    pub description: &'static str,
    /// Target lifetime policy
    pub ttl: TtlCurve,
    /// Radius factor reached at full progress (1.0 = no shrink)
    pub shrink_floor: f32,
    /// Spawn interval reduction per second
    pub spawn_accel: f64,
    /// Session ends when the time bank empties instead of at the duration
    pub time_bank: bool,
    /// Seconds added to the bank per hit
    pub hit_bonus_seconds: f64,
    /// Targets carry a head sphere
    pub headshot_zone: bool,
    /// Points awarded for a hit in the given zone
    pub scoring: fn(HitZone) -> u32,
}

const NORMAL_TTL: TtlCurve = TtlCurve::Uniform { min: 2.8, max: 4.5 };

static MODE_TABLE: [ModeConfig; 4] = [
    ModeConfig {
        label: "Normal",
        description: "Standard targets, fixed target lifetime",
        ttl: NORMAL_TTL,
        shrink_floor: 1.0,
        spawn_accel: SPAWN_ACCEL,
        time_bank: false,
        hit_bonus_seconds: 0.0,
        headshot_zone: false,
        scoring: flat_points,
    },
    ModeConfig {
        label: "Endless",
        description: "Increasing difficulty, decreasing target lifetime",
        ttl: TtlCurve::Ramp {
            start: (2.0, 2.8),
            end: (0.6, 1.2),
            exponent: 1.5,
        },
        shrink_floor: 1.0,
        spawn_accel: SPAWN_ACCEL * 2.0,
        time_bank: false,
        hit_bonus_seconds: 0.0,
        headshot_zone: false,
        scoring: flat_points,
    },
    ModeConfig {
        label: "Time Trial",
        description: "Shrinking targets, +1s bonus per hit, play until the clock runs out",
        ttl: TtlCurve::Fixed(TIME_TRIAL_TTL),
        shrink_floor: TT_MIN_RADIUS_FACTOR,
        spawn_accel: 0.0,
        time_bank: true,
        hit_bonus_seconds: TIME_TRIAL_HIT_BONUS,
        headshot_zone: false,
        scoring: flat_points,
    },
    ModeConfig {
        label: "Precision",
        description: "Targets have a headshot zone, +5 points for headshots",
        ttl: NORMAL_TTL,
        shrink_floor: 1.0,
        spawn_accel: SPAWN_ACCEL,
        time_bank: false,
        hit_bonus_seconds: 0.0,
        headshot_zone: true,
        scoring: zoned_points,
    },
];
