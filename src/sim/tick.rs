//! Per-tick session advance and shot handling
//!
//! Driven by wall-clock `(now, dt)` pairs from the host loop. Within one
//! tick: clock, time bank, expiry, spawn, then the duration check, so a shot
//! handled right after a tick sees a settled target set.

use super::hit;
use super::ray::Ray;
use super::scoring::score_shot;
use super::state::{EndReason, Session, SessionEvent, SessionPhase, ShotOutcome};

impl Session {
    /// Advance the running session to `now`
    ///
    /// Ignored outside Running. Negative or non-finite `dt` counts as 0.
    pub fn tick(&mut self, now: f64, dt: f64) {
        if self.phase != SessionPhase::Running {
            return;
        }

        let mut dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        // The host's first dt after a resume may span the pause window
        if let Some(resumed_at) = self.clock.resumed_at.take() {
            dt = dt.min((now - resumed_at).max(0.0));
        }

        self.clock.elapsed = (now - self.clock.started_at).max(0.0);

        let mode = self.config.mode;
        let cfg = mode.config();
        if cfg.time_bank {
            self.clock.time_bank -= dt;
            if self.clock.time_bank <= 0.0 {
                self.clock.time_bank = 0.0;
                self.finish(EndReason::OutOfTime);
                return;
            }
        }

        let progress = self.progress();
        for id in self.pool.update(now, mode, progress, self.effects) {
            self.push_event(SessionEvent::TargetExpired { id });
        }

        if let Some(id) = self
            .scheduler
            .tick(dt, mode, progress, now, &mut self.pool, &mut self.rng)
        {
            self.stats.spawned_count += 1;
            self.push_event(SessionEvent::TargetSpawned { id });
        }

        if !cfg.time_bank && self.clock.elapsed >= self.config.duration_seconds {
            self.finish(EndReason::DurationReached);
        }
    }

    /// Fire `ray` into the arena
    ///
    /// Only counted while Running. A hit target is removed immediately.
    pub fn shoot(&mut self, ray: &Ray) -> ShotOutcome {
        if self.phase != SessionPhase::Running {
            log::debug!("shot ignored in {:?}", self.phase);
            return ShotOutcome::Ignored;
        }

        let mode = self.config.mode;
        let resolved = hit::resolve(ray, &self.pool, mode);
        let delta = score_shot(&mut self.stats, mode, resolved.as_ref());

        match resolved {
            Some(hit) => {
                self.pool.remove(hit.index);
                self.clock.time_bank += delta.bonus_seconds;
                self.push_event(SessionEvent::TargetHit {
                    id: hit.target_id,
                    zone: hit.zone,
                    points: delta.points,
                });
                ShotOutcome::Hit {
                    target_id: hit.target_id,
                    zone: hit.zone,
                    points: delta.points,
                }
            }
            None => {
                self.push_event(SessionEvent::Missed);
                ShotOutcome::Miss
            }
        }
    }
}
