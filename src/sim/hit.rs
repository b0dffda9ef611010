//! Shot resolution against the live targets
//!
//! In modes with a head zone, each target's head sphere is tested first; a
//! head hit fixes that target's candidate and its body is not tested. The
//! nearest candidate across all targets wins, with ties going to the older
//! target.

use serde::{Deserialize, Serialize};

use super::mode::Mode;
use super::ray::Ray;
use super::target::TargetPool;
use crate::consts::RAY_MAX_DIST;

/// Which part of a target was hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitZone {
    Body,
    Headshot,
}

/// A resolved hit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    /// Index into the pool at resolve time
    pub index: usize,
    pub target_id: u32,
    pub zone: HitZone,
    /// Distance along the ray
    pub distance: f32,
}

#[inline]
fn in_range(t: Option<f32>) -> Option<f32> {
    t.filter(|&d| d <= RAY_MAX_DIST)
}

/// Resolve `ray` against `pool`; `None` is a miss
///
/// A degenerate ray direction is a miss.
pub fn resolve(ray: &Ray, pool: &TargetPool, mode: Mode) -> Option<Hit> {
    let Some(ray) = ray.normalized() else {
        log::debug!("degenerate shot direction {:?}, counted as miss", ray.direction);
        return None;
    };
    let heads = mode.config().headshot_zone;

    let mut best: Option<Hit> = None;
    for (index, target) in pool.iter().enumerate() {
        let head = if heads {
            in_range(target.head().intersect(&ray)).map(|d| (d, HitZone::Headshot))
        } else {
            None
        };
        let candidate =
            head.or_else(|| in_range(target.body().intersect(&ray)).map(|d| (d, HitZone::Body)));

        if let Some((distance, zone)) = candidate {
            if best.is_none_or(|b| distance < b.distance) {
                best = Some(Hit {
                    index,
                    target_id: target.id,
                    zone,
                    distance,
                });
            }
        }
    }
    best
}
