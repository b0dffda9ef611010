//! Scoring policy and session statistics

use serde::{Deserialize, Serialize};

use super::hit::{Hit, HitZone};
use super::mode::Mode;
use crate::consts::{BODY_POINTS, HEADSHOT_POINTS};

/// Running counters for one session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub shots: u32,
    pub hits: u32,
    pub misses: u32,
    pub headshot_hits: u32,
    pub spawned_count: u32,
    pub score: u64,
}

impl SessionStats {
    /// Hit percentage, truncated; 0 before the first shot
    pub fn accuracy(&self) -> u32 {
        percent(self.hits, self.shots)
    }

    /// Headshot percentage of all shots, truncated
    pub fn headshot_accuracy(&self) -> u32 {
        percent(self.headshot_hits, self.shots)
    }
}

/// `trunc(100 * part / whole)`, 0 when `whole == 0`
pub fn percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    (100 * part as u64 / whole as u64) as u32
}

/// Every hit is worth the same
pub fn flat_points(_zone: HitZone) -> u32 {
    BODY_POINTS
}

/// Headshots pay a bonus
pub fn zoned_points(zone: HitZone) -> u32 {
    match zone {
        HitZone::Body => BODY_POINTS,
        HitZone::Headshot => HEADSHOT_POINTS,
    }
}

/// What a shot changed
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreDelta {
    pub points: u32,
    /// Seconds to add to the time bank
    pub bonus_seconds: f64,
}

/// Apply one shot to `stats`
///
/// The shot is always counted; a hit adds points per the mode's policy,
/// a miss only bumps `misses`.
pub fn score_shot(stats: &mut SessionStats, mode: Mode, hit: Option<&Hit>) -> ScoreDelta {
    stats.shots += 1;

    let Some(hit) = hit else {
        stats.misses += 1;
        return ScoreDelta::default();
    };

    let cfg = mode.config();
    let points = (cfg.scoring)(hit.zone);
    stats.hits += 1;
    stats.score += points as u64;
    if cfg.headshot_zone && hit.zone == HitZone::Headshot {
        stats.headshot_hits += 1;
    }

    ScoreDelta {
        points,
        bonus_seconds: cfg.hit_bonus_seconds,
    }
}
