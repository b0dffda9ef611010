//! Spawn scheduling
//!
//! Decides when the pool gets a new target. The interval shrinks
//! monotonically toward `SPAWN_INTERVAL_MIN` at the mode's rate and only
//! resets when a new run starts.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::mode::Mode;
use super::target::TargetPool;
use crate::consts::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnScheduler {
    /// Current delay between spawns (seconds)
    interval: f64,
    /// Time since the last spawn (seconds)
    accumulator: f64,
}

impl Default for SpawnScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl SpawnScheduler {
    pub fn new() -> Self {
        Self::with_interval(SPAWN_INTERVAL_START)
    }

    /// Scheduler starting at `interval`, clamped into the legal range
    pub fn with_interval(interval: f64) -> Self {
        let interval = if interval.is_nan() {
            SPAWN_INTERVAL_START
        } else {
            interval.clamp(SPAWN_INTERVAL_MIN, SPAWN_INTERVAL_START)
        };
        Self {
            interval,
            accumulator: 0.0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Advance by `dt`; true when a spawn is due
    ///
    /// The interval shrinks by `accel * dt` first, then the accumulator
    /// grows. A due spawn resets the accumulator, but only if the pool can
    /// take it; otherwise the accumulator keeps counting.
    pub fn advance(&mut self, dt: f64, accel: f64, has_capacity: bool) -> bool {
        self.interval = (self.interval - accel * dt).max(SPAWN_INTERVAL_MIN);
        self.accumulator += dt;

        if has_capacity && self.accumulator >= self.interval {
            self.accumulator = 0.0;
            true
        } else {
            false
        }
    }

    /// Advance and spawn into `pool` when due
    pub fn tick<R: Rng>(
        &mut self,
        dt: f64,
        mode: Mode,
        progress: f64,
        now: f64,
        pool: &mut TargetPool,
        rng: &mut R,
    ) -> Option<u32> {
        if self.advance(dt, mode.config().spawn_accel, pool.has_capacity()) {
            pool.spawn(mode, progress, now, rng)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawns_once_interval_reached() {
        // Time Trial does not accelerate, so the interval stays at 1.2s
        let mut scheduler = SpawnScheduler::with_interval(1.2);
        let mut pool = TargetPool::new();
        let mut rng = Pcg32::seed_from_u64(3);

        let first = scheduler.tick(0.6, Mode::TimeTrial, 0.0, 0.6, &mut pool, &mut rng);
        assert!(first.is_none());
        assert!(pool.is_empty());

        let second = scheduler.tick(0.6, Mode::TimeTrial, 0.0, 1.2, &mut pool, &mut rng);
        assert!(second.is_some());
        assert_eq!(pool.len(), 1);
        assert_eq!(scheduler.accumulator(), 0.0);
    }

    #[test]
    fn test_interval_accelerates_to_floor() {
        let mut scheduler = SpawnScheduler::new();
        let mut last = scheduler.interval();
        for _ in 0..1000 {
            scheduler.advance(0.05, Mode::Normal.config().spawn_accel, false);
            assert!(scheduler.interval() <= last);
            assert!(scheduler.interval() >= SPAWN_INTERVAL_MIN);
            last = scheduler.interval();
        }
        assert_eq!(scheduler.interval(), SPAWN_INTERVAL_MIN);
    }

    #[test]
    fn test_endless_accelerates_faster() {
        let mut normal = SpawnScheduler::new();
        let mut endless = SpawnScheduler::new();
        for _ in 0..10 {
            normal.advance(0.1, Mode::Normal.config().spawn_accel, false);
            endless.advance(0.1, Mode::Endless.config().spawn_accel, false);
        }
        let normal_drop = SPAWN_INTERVAL_START - normal.interval();
        let endless_drop = SPAWN_INTERVAL_START - endless.interval();
        assert!((endless_drop - 2.0 * normal_drop).abs() < 1e-9);
    }

    #[test]
    fn test_full_pool_defers_spawn() {
        let mut scheduler = SpawnScheduler::with_interval(0.5);
        let mut pool = TargetPool::new();
        let mut rng = Pcg32::seed_from_u64(4);
        for _ in 0..MAX_TARGETS {
            pool.place(Vec3::ZERO, 10.0, 100.0, 0.0);
        }

        assert!(scheduler.tick(1.0, Mode::TimeTrial, 0.0, 1.0, &mut pool, &mut rng).is_none());
        assert_eq!(pool.len(), MAX_TARGETS);
        assert!(scheduler.accumulator() >= 0.5);

        // A freed slot is filled on the next tick
        pool.remove(0);
        assert!(scheduler.tick(0.01, Mode::TimeTrial, 0.0, 1.01, &mut pool, &mut rng).is_some());
        assert_eq!(pool.len(), MAX_TARGETS);
    }

    #[test]
    fn test_with_interval_clamps() {
        assert_eq!(SpawnScheduler::with_interval(10.0).interval(), SPAWN_INTERVAL_START);
        assert_eq!(SpawnScheduler::with_interval(0.0).interval(), SPAWN_INTERVAL_MIN);
        assert_eq!(SpawnScheduler::with_interval(f64::NAN).interval(), SPAWN_INTERVAL_START);
    }

    #[test]
    fn test_reset() {
        let mut scheduler = SpawnScheduler::new();
        scheduler.advance(3.0, 0.2, false);
        scheduler.reset();
        assert_eq!(scheduler.interval(), SPAWN_INTERVAL_START);
        assert_eq!(scheduler.accumulator(), 0.0);
    }
}
