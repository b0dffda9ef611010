//! Difficulty curves
//!
//! Pure functions from session progress to target size and lifetime.
//! Progress is recomputed from the frozen-while-paused elapsed time on every
//! call, never cached, so curves stay continuous across pause/resume.

use rand::Rng;

use super::mode::{Mode, TtlCurve};
use crate::consts::*;
use crate::{clamp01, lerp};

/// Session progress `d = clamp(elapsed / duration, 0, 1)`
pub fn progress(elapsed: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        return 1.0;
    }
    clamp01(elapsed / duration)
}

/// Radius multiplier at `progress`: `lerp(1, shrink_floor, d)`
pub fn shrink_factor(mode: Mode, progress: f64) -> f32 {
    let floor = mode.config().shrink_floor as f64;
    lerp(1.0, floor, clamp01(progress)) as f32
}

/// Base (unpulsed) target radius at `progress`
pub fn target_radius(mode: Mode, progress: f64) -> f32 {
    TARGET_RADIUS * shrink_factor(mode, progress)
}

impl TtlCurve {
    /// Lifetime range `(min, max)` at `progress`
    pub fn range(&self, progress: f64) -> (f64, f64) {
        let d = clamp01(progress);
        match *self {
            TtlCurve::Uniform { min, max } => (min, max),
            TtlCurve::Ramp {
                start,
                end,
                exponent,
            } => {
                let dp = clamp01(d.powf(exponent));
                (lerp(start.0, end.0, dp), lerp(start.1, end.1, dp))
            }
            TtlCurve::Fixed(ttl) => (ttl, ttl),
        }
    }

    /// Draw a lifetime for a target spawned at `progress`
    pub fn sample<R: Rng>(&self, progress: f64, rng: &mut R) -> f64 {
        let (min, max) = self.range(progress);
        if max > min {
            rng.random_range(min..=max)
        } else {
            min
        }
    }
}

/// Lifetime range for `mode` at `progress`
pub fn ttl_range(mode: Mode, progress: f64) -> (f64, f64) {
    mode.config().ttl.range(progress)
}

/// Size and lifetime for a newly spawned target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnParams {
    pub radius: f32,
    pub ttl: f64,
}

/// Spawn policy: radius and lifetime for `mode` at `progress`
pub fn spawn_params<R: Rng>(mode: Mode, progress: f64, rng: &mut R) -> SpawnParams {
    SpawnParams {
        radius: target_radius(mode, progress),
        ttl: mode.config().ttl.sample(progress, rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_progress_clamped() {
        assert_eq!(progress(-1.0, 30.0), 0.0);
        assert_eq!(progress(15.0, 30.0), 0.5);
        assert_eq!(progress(45.0, 30.0), 1.0);
        assert_eq!(progress(5.0, 0.0), 1.0);
    }

    #[test]
    fn test_time_trial_shrinks_linearly() {
        assert!((shrink_factor(Mode::TimeTrial, 0.0) - 1.0).abs() < 1e-6);
        assert!((shrink_factor(Mode::TimeTrial, 0.5) - 0.725).abs() < 1e-6);
        assert!((shrink_factor(Mode::TimeTrial, 1.0) - TT_MIN_RADIUS_FACTOR).abs() < 1e-6);
        // Progress beyond the session end holds the floor
        assert!((shrink_factor(Mode::TimeTrial, 3.0) - TT_MIN_RADIUS_FACTOR).abs() < 1e-6);
    }

    #[test]
    fn test_other_modes_keep_full_radius() {
        for mode in [Mode::Normal, Mode::Endless, Mode::Precision] {
            assert_eq!(target_radius(mode, 0.9), TARGET_RADIUS);
        }
    }

    #[test]
    fn test_endless_ttl_ramp() {
        let (min, max) = ttl_range(Mode::Endless, 0.0);
        assert!((min - 2.0).abs() < 1e-9 && (max - 2.8).abs() < 1e-9);

        let (min, max) = ttl_range(Mode::Endless, 1.0);
        assert!((min - 0.6).abs() < 1e-9 && (max - 1.2).abs() < 1e-9);

        // d = 0.25 -> dp = 0.125
        let (min, max) = ttl_range(Mode::Endless, 0.25);
        assert!((min - lerp(2.0, 0.6, 0.125)).abs() < 1e-9);
        assert!((max - lerp(2.8, 1.2, 0.125)).abs() < 1e-9);
    }

    #[test]
    fn test_time_trial_ttl_fixed() {
        let mut rng = Pcg32::seed_from_u64(7);
        for d in [0.0, 0.3, 1.0] {
            assert_eq!(spawn_params(Mode::TimeTrial, d, &mut rng).ttl, TIME_TRIAL_TTL);
        }
    }

    #[test]
    fn test_normal_ttl_in_range() {
        let mut rng = Pcg32::seed_from_u64(99);
        for _ in 0..200 {
            let ttl = spawn_params(Mode::Normal, 0.5, &mut rng).ttl;
            assert!((2.8..=4.5).contains(&ttl));
        }
    }

    proptest! {
        #[test]
        fn prop_spawn_params_positive(seed in any::<u64>(), d in -1.0f64..2.0, idx in 0usize..4) {
            let mode = Mode::from_index(idx);
            let mut rng = Pcg32::seed_from_u64(seed);
            let params = spawn_params(mode, d, &mut rng);
            prop_assert!(params.radius > 0.0);
            prop_assert!(params.ttl > 0.0);
            let (min, max) = ttl_range(mode, d);
            prop_assert!(params.ttl >= min && params.ttl <= max);
        }

        #[test]
        fn prop_endless_ttl_never_grows(a in 0.0f64..1.0, b in 0.0f64..1.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let early = ttl_range(Mode::Endless, lo);
            let late = ttl_range(Mode::Endless, hi);
            prop_assert!(late.0 <= early.0 + 1e-12);
            prop_assert!(late.1 <= early.1 + 1e-12);
        }
    }
}
