//! Session state and lifecycle
//!
//! `Session` owns everything a run mutates: the clock, statistics, target
//! pool, spawn scheduler and RNG. Renderers only read snapshots from it.
//!
//! Phases: Menu -> Running <-> Paused, Running -> Summary, Summary -> Running
//! (play again) or Menu. Per-tick advance and shooting live in `tick.rs`.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::curve;
use super::hit::HitZone;
use super::mode::Mode;
use super::scoring::SessionStats;
use super::spawn::SpawnScheduler;
use super::target::{Effects, TargetPool, TargetView};
use crate::consts::*;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Waiting for mode/duration selection and start
    #[default]
    Menu,
    /// Clock running, targets spawning
    Running,
    /// Clock frozen, shots ignored
    Paused,
    /// Run ended, summary available
    Summary,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// Elapsed time reached the session duration
    DurationReached,
    /// Time Trial bank ran dry
    OutOfTime,
}

impl EndReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndReason::DurationReached => "duration_reached",
            EndReason::OutOfTime => "out_of_time",
        }
    }
}

/// Mode and length selected for a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub mode: Mode,
    pub duration_seconds: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            duration_seconds: DURATION_OPTIONS[1],
        }
    }
}

impl SessionConfig {
    pub fn new(mode: Mode, duration_seconds: f64) -> Self {
        Self {
            mode,
            duration_seconds: sanitize_duration(duration_seconds),
        }
    }
}

/// Clamp a requested session length to something playable
pub fn sanitize_duration(seconds: f64) -> f64 {
    if seconds.is_finite() && seconds >= MIN_DURATION_SECONDS {
        seconds
    } else {
        log::warn!(
            "invalid session duration {}, using {}s",
            seconds,
            MIN_DURATION_SECONDS
        );
        MIN_DURATION_SECONDS
    }
}

/// Run timing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionClock {
    /// Run start, shifted forward by every pause window
    pub started_at: f64,
    /// Seconds of unpaused play
    pub elapsed: f64,
    /// Set while paused
    pub paused_at: Option<f64>,
    /// Time Trial countdown (seconds)
    pub time_bank: f64,
    /// Resume timestamp; caps the first dt after a pause
    #[serde(skip)]
    pub(super) resumed_at: Option<f64>,
}

impl SessionClock {
    fn started(now: f64, time_bank: f64) -> Self {
        Self {
            started_at: now,
            elapsed: 0.0,
            paused_at: None,
            time_bank,
            resumed_at: None,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }
}

/// Things that happened during a tick or shot, for sound/FX layers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    TargetSpawned { id: u32 },
    TargetExpired { id: u32 },
    TargetHit { id: u32, zone: HitZone, points: u32 },
    Missed,
    Ended { reason: EndReason },
}

/// Result of a shoot event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ShotOutcome {
    Hit { target_id: u32, zone: HitZone, points: u32 },
    Miss,
    /// Not running (menu, paused or summary); nothing counted
    Ignored,
}

/// HUD readout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudStats {
    pub mode: Mode,
    pub score: u64,
    pub shots: u32,
    pub hits: u32,
    pub misses: u32,
    pub accuracy: u32,
    /// Time bank in Time Trial, otherwise time left in the session
    pub time_remaining: f64,
    pub live_targets: usize,
    pub max_targets: usize,
    /// Precision mode only
    pub headshot_hits: Option<u32>,
    pub headshot_accuracy: Option<u32>,
}

/// End-of-run report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub mode: Mode,
    pub score: u64,
    pub shots: u32,
    pub hits: u32,
    pub misses: u32,
    pub accuracy: u32,
    pub spawned_count: u32,
    /// Precision mode only
    pub headshot_hits: Option<u32>,
    pub headshot_accuracy: Option<u32>,
    /// Survival time in Time Trial, otherwise play time capped at the duration
    pub run_time_seconds: f64,
    pub reason: EndReason,
}

/// One player's training session
#[derive(Debug, Clone)]
pub struct Session {
    pub(super) config: SessionConfig,
    pub(super) effects: Effects,
    pub(super) phase: SessionPhase,
    pub(super) clock: SessionClock,
    pub(super) stats: SessionStats,
    pub(super) pool: TargetPool,
    pub(super) scheduler: SpawnScheduler,
    pub(super) rng: Pcg32,
    pub(super) events: VecDeque<SessionEvent>,
    summary: Option<SessionSummary>,
    seed: u64,
    run_index: u64,
}

impl Session {
    /// New session in Menu
    pub fn new(config: SessionConfig, seed: u64) -> Self {
        Self {
            config: SessionConfig::new(config.mode, config.duration_seconds),
            effects: Effects::default(),
            phase: SessionPhase::Menu,
            clock: SessionClock::default(),
            stats: SessionStats::default(),
            pool: TargetPool::new(),
            scheduler: SpawnScheduler::new(),
            rng: Pcg32::seed_from_u64(seed),
            events: VecDeque::new(),
            summary: None,
            seed,
            run_index: 0,
        }
    }

    // === Controls ===

    /// Select the mode (Menu only)
    pub fn set_mode(&mut self, mode: Mode) -> bool {
        if self.phase != SessionPhase::Menu {
            log::debug!("mode change ignored in {:?}", self.phase);
            return false;
        }
        self.config.mode = mode;
        true
    }

    /// Select the session length (Menu only)
    pub fn set_duration(&mut self, seconds: f64) -> bool {
        if self.phase != SessionPhase::Menu {
            log::debug!("duration change ignored in {:?}", self.phase);
            return false;
        }
        self.config.duration_seconds = sanitize_duration(seconds);
        true
    }

    /// Select one of `DURATION_OPTIONS`; the index is clamped into range
    pub fn set_duration_index(&mut self, index: usize) -> bool {
        let index = index.min(DURATION_OPTIONS.len() - 1);
        self.set_duration(DURATION_OPTIONS[index])
    }

    /// Toggle horizontal oscillation (any phase)
    pub fn set_animated(&mut self, animated: bool) {
        self.effects.animated = animated;
    }

    /// Toggle radius pulse (any phase)
    pub fn set_glowing(&mut self, glowing: bool) {
        self.effects.glowing = glowing;
    }

    /// Menu -> Running
    pub fn start(&mut self, now: f64) -> bool {
        if self.phase != SessionPhase::Menu {
            log::debug!("start ignored in {:?}", self.phase);
            return false;
        }
        self.begin_run(now);
        true
    }

    /// Running|Paused -> Running, discarding the current run
    pub fn restart(&mut self, now: f64) -> bool {
        if !matches!(self.phase, SessionPhase::Running | SessionPhase::Paused) {
            log::debug!("restart ignored in {:?}", self.phase);
            return false;
        }
        self.begin_run(now);
        true
    }

    /// Summary -> Running
    pub fn play_again(&mut self, now: f64) -> bool {
        if self.phase != SessionPhase::Summary {
            log::debug!("play again ignored in {:?}", self.phase);
            return false;
        }
        self.begin_run(now);
        true
    }

    /// Any phase -> Menu, discarding the current run
    pub fn to_menu(&mut self) {
        if self.phase != SessionPhase::Menu {
            log::info!("back to menu from {:?}", self.phase);
        }
        self.pool.clear();
        self.scheduler.reset();
        self.clock = SessionClock::default();
        self.stats = SessionStats::default();
        self.summary = None;
        self.events.clear();
        self.phase = SessionPhase::Menu;
    }

    /// Running -> Paused
    pub fn pause(&mut self, now: f64) -> bool {
        if self.phase != SessionPhase::Running {
            return false;
        }
        self.clock.paused_at = Some(now);
        self.phase = SessionPhase::Paused;
        log::info!("paused at {:.2}s", self.clock.elapsed);
        true
    }

    /// Paused -> Running; the pause window is excluded from elapsed time
    pub fn resume(&mut self, now: f64) -> bool {
        if self.phase != SessionPhase::Paused {
            return false;
        }
        if let Some(paused_at) = self.clock.paused_at.take() {
            self.clock.started_at += (now - paused_at).max(0.0);
        }
        self.clock.resumed_at = Some(now);
        self.phase = SessionPhase::Running;
        log::info!("resumed at {:.2}s", self.clock.elapsed);
        true
    }

    /// Pause key: pause when running, resume when paused
    pub fn toggle_pause(&mut self, now: f64) -> bool {
        match self.phase {
            SessionPhase::Running => self.pause(now),
            SessionPhase::Paused => self.resume(now),
            _ => false,
        }
    }

    fn begin_run(&mut self, now: f64) {
        self.run_index += 1;
        self.rng = Pcg32::seed_from_u64(self.seed.wrapping_add(self.run_index));

        let time_bank = if self.config.mode.config().time_bank {
            self.config.duration_seconds
        } else {
            0.0
        };
        self.clock = SessionClock::started(now, time_bank);
        self.stats = SessionStats::default();
        self.pool.clear();
        self.scheduler.reset();
        self.summary = None;
        self.events.clear();
        self.phase = SessionPhase::Running;

        log::info!(
            "{} run {} started ({}s)",
            self.config.mode.label(),
            self.run_index,
            self.config.duration_seconds
        );
    }

    /// Running -> Summary
    pub(super) fn finish(&mut self, reason: EndReason) {
        let mode = self.config.mode;
        let precision = mode.config().headshot_zone;
        let run_time_seconds = if mode.config().time_bank {
            self.clock.elapsed
        } else {
            self.clock.elapsed.min(self.config.duration_seconds)
        };

        let summary = SessionSummary {
            mode,
            score: self.stats.score,
            shots: self.stats.shots,
            hits: self.stats.hits,
            misses: self.stats.misses,
            accuracy: self.stats.accuracy(),
            spawned_count: self.stats.spawned_count,
            headshot_hits: precision.then_some(self.stats.headshot_hits),
            headshot_accuracy: precision.then(|| self.stats.headshot_accuracy()),
            run_time_seconds,
            reason,
        };
        log::info!(
            "{} run ended ({}): score {}, {}/{} hits, {}% accuracy",
            mode.label(),
            reason.as_str(),
            summary.score,
            summary.hits,
            summary.shots,
            summary.accuracy
        );

        self.summary = Some(summary);
        self.pool.clear();
        self.push_event(SessionEvent::Ended { reason });
        self.phase = SessionPhase::Summary;
    }

    // === Queries ===

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    pub fn effects(&self) -> Effects {
        self.effects
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    pub fn pool(&self) -> &TargetPool {
        &self.pool
    }

    pub fn scheduler(&self) -> &SpawnScheduler {
        &self.scheduler
    }

    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed
    }

    /// Session progress in [0, 1], frozen while paused
    pub fn progress(&self) -> f64 {
        curve::progress(self.clock.elapsed, self.config.duration_seconds)
    }

    /// Time bank in Time Trial, otherwise time left in the session
    pub fn time_remaining(&self) -> f64 {
        if self.config.mode.config().time_bank {
            self.clock.time_bank.max(0.0)
        } else {
            (self.config.duration_seconds - self.clock.elapsed).max(0.0)
        }
    }

    /// Live targets for drawing
    pub fn live_targets(&self) -> Vec<TargetView> {
        self.pool.views(self.config.mode)
    }

    pub fn hud_stats(&self) -> HudStats {
        let precision = self.config.mode.config().headshot_zone;
        HudStats {
            mode: self.config.mode,
            score: self.stats.score,
            shots: self.stats.shots,
            hits: self.stats.hits,
            misses: self.stats.misses,
            accuracy: self.stats.accuracy(),
            time_remaining: self.time_remaining(),
            live_targets: self.pool.len(),
            max_targets: MAX_TARGETS,
            headshot_hits: precision.then_some(self.stats.headshot_hits),
            headshot_accuracy: precision.then(|| self.stats.headshot_accuracy()),
        }
    }

    /// End-of-run report, present only in Summary
    pub fn summary(&self) -> Option<&SessionSummary> {
        self.summary.as_ref()
    }

    /// Take the events recorded since the last drain
    ///
    /// At most `MAX_PENDING_EVENTS` are kept; older ones are dropped first.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.events.drain(..).collect()
    }

    pub(super) fn push_event(&mut self, event: SessionEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(mode: Mode, duration: f64) -> Session {
        Session::new(SessionConfig::new(mode, duration), 42)
    }

    #[test]
    fn test_starts_in_menu() {
        let s = session(Mode::Normal, 30.0);
        assert_eq!(s.phase(), SessionPhase::Menu);
        assert!(s.summary().is_none());
        assert!(s.live_targets().is_empty());
    }

    #[test]
    fn test_start_resets_run_state() {
        let mut s = session(Mode::TimeTrial, 60.0);
        assert!(s.start(10.0));
        assert_eq!(s.phase(), SessionPhase::Running);
        assert_eq!(s.clock().started_at, 10.0);
        assert_eq!(s.elapsed(), 0.0);
        assert_eq!(s.clock().time_bank, 60.0);
        assert_eq!(s.scheduler().interval(), SPAWN_INTERVAL_START);
        assert_eq!(*s.stats(), SessionStats::default());

        // Start is a Menu-only transition
        assert!(!s.start(11.0));
    }

    #[test]
    fn test_mode_and_duration_locked_outside_menu() {
        let mut s = session(Mode::Normal, 30.0);
        assert!(s.set_mode(Mode::Precision));
        assert!(s.set_duration_index(0));
        s.start(0.0);
        assert!(!s.set_mode(Mode::Endless));
        assert!(!s.set_duration(120.0));
        assert_eq!(s.mode(), Mode::Precision);
        assert_eq!(s.config().duration_seconds, 15.0);
    }

    #[test]
    fn test_duration_sanitized() {
        let mut s = session(Mode::Normal, -5.0);
        assert_eq!(s.config().duration_seconds, MIN_DURATION_SECONDS);
        s.set_duration(f64::NAN);
        assert_eq!(s.config().duration_seconds, MIN_DURATION_SECONDS);
        s.set_duration(45.0);
        assert_eq!(s.config().duration_seconds, 45.0);
        s.set_duration_index(99);
        assert_eq!(s.config().duration_seconds, 120.0);
    }

    #[test]
    fn test_effects_toggle_in_any_phase() {
        let mut s = session(Mode::Normal, 30.0);
        s.set_animated(true);
        s.start(0.0);
        s.set_glowing(true);
        s.pause(1.0);
        s.set_animated(false);
        assert_eq!(
            s.effects(),
            Effects {
                animated: false,
                glowing: true
            }
        );
    }

    #[test]
    fn test_pause_resume_shifts_start() {
        let mut s = session(Mode::Normal, 30.0);
        s.start(100.0);
        assert!(s.pause(105.0));
        assert!(s.clock().is_paused());
        assert!(!s.pause(106.0));
        assert!(s.resume(125.0));
        assert_eq!(s.phase(), SessionPhase::Running);
        assert_eq!(s.clock().started_at, 120.0);
        assert!(!s.clock().is_paused());
    }

    #[test]
    fn test_toggle_pause() {
        let mut s = session(Mode::Normal, 30.0);
        assert!(!s.toggle_pause(0.0));
        s.start(0.0);
        assert!(s.toggle_pause(1.0));
        assert_eq!(s.phase(), SessionPhase::Paused);
        assert!(s.toggle_pause(2.0));
        assert_eq!(s.phase(), SessionPhase::Running);
    }

    #[test]
    fn test_restart_only_while_playing() {
        let mut s = session(Mode::Normal, 30.0);
        assert!(!s.restart(0.0));
        s.start(0.0);
        s.pause(1.0);
        assert!(s.restart(5.0));
        assert_eq!(s.phase(), SessionPhase::Running);
        assert_eq!(s.clock().started_at, 5.0);
        assert!(!s.clock().is_paused());
    }

    #[test]
    fn test_finish_and_navigation() {
        let mut s = session(Mode::Precision, 30.0);
        s.start(0.0);
        s.clock.elapsed = 31.0;
        s.finish(EndReason::DurationReached);

        assert_eq!(s.phase(), SessionPhase::Summary);
        let summary = s.summary().unwrap().clone();
        assert_eq!(summary.reason, EndReason::DurationReached);
        assert_eq!(summary.run_time_seconds, 30.0);
        assert_eq!(summary.headshot_hits, Some(0));
        assert_eq!(
            s.drain_events(),
            vec![SessionEvent::Ended { reason: EndReason::DurationReached }]
        );

        assert!(s.play_again(40.0));
        assert_eq!(s.phase(), SessionPhase::Running);
        assert!(s.summary().is_none());

        s.to_menu();
        assert_eq!(s.phase(), SessionPhase::Menu);
        assert!(!s.play_again(50.0));
    }

    #[test]
    fn test_hud_time_remaining() {
        let mut s = session(Mode::Normal, 30.0);
        s.start(0.0);
        s.clock.elapsed = 12.5;
        let hud = s.hud_stats();
        assert_eq!(hud.time_remaining, 17.5);
        assert_eq!(hud.max_targets, MAX_TARGETS);
        assert!(hud.headshot_hits.is_none());

        let mut tt = session(Mode::TimeTrial, 15.0);
        tt.start(0.0);
        assert_eq!(tt.hud_stats().time_remaining, 15.0);
    }

    #[test]
    fn test_summary_serializes_reason() {
        let mut s = session(Mode::TimeTrial, 15.0);
        s.start(0.0);
        s.finish(EndReason::OutOfTime);
        let json = serde_json::to_string(s.summary().unwrap()).unwrap();
        assert!(json.contains("\"reason\":\"out_of_time\""));
        assert!(json.contains("\"headshot_hits\":null"));
    }

    #[test]
    fn test_runs_are_reproducible() {
        let mut a = session(Mode::Endless, 30.0);
        let mut b = session(Mode::Endless, 30.0);
        a.start(0.0);
        b.start(0.0);
        for i in 1..=120 {
            let now = i as f64 * 0.05;
            a.tick(now, 0.05);
            b.tick(now, 0.05);
        }
        let pa: Vec<_> = a.live_targets().iter().map(|t| t.position).collect();
        let pb: Vec<_> = b.live_targets().iter().map(|t| t.position).collect();
        assert!(!pa.is_empty());
        assert_eq!(pa, pb);
    }
}
