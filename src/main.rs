//! Aim Range headless driver
//!
//! Runs one session at a fixed frame rate with a simple bot standing in for
//! the player, then prints the summary as JSON. Pass a settings file path as
//! the first argument to override the defaults.

use std::path::Path;

use glam::Vec3;

use aim_range::Settings;
use aim_range::sim::{Ray, Session, SessionEvent, SessionPhase, ShotOutcome};

/// Host frame time (60 Hz)
const FRAME_DT: f64 = 1.0 / 60.0;
/// Player eye position
const EYE: Vec3 = Vec3::new(0.0, -300.0, 140.0);
/// Frames between bot shots
const SHOT_EVERY: u64 = 24;
/// Every Nth bot shot is pulled off target
const MISS_EVERY: u64 = 5;
/// Stop after this many frames even if the run has not ended
const MAX_FRAMES: u64 = 60 * 60 * 10;

/// Host loop state
struct Driver {
    session: Session,
    frame: u64,
    shots_fired: u64,
}

impl Driver {
    fn new(settings: &Settings) -> Self {
        Self {
            session: settings.session(),
            frame: 0,
            shots_fired: 0,
        }
    }

    fn now(&self) -> f64 {
        self.frame as f64 * FRAME_DT
    }

    /// One host frame: tick, maybe shoot, then drain events
    fn step(&mut self) {
        self.frame += 1;
        let now = self.now();
        self.session.tick(now, FRAME_DT);

        if self.frame % SHOT_EVERY == 0 {
            self.fire();
        }

        for event in self.session.drain_events() {
            match event {
                SessionEvent::TargetSpawned { id } => log::trace!("spawn #{}", id),
                SessionEvent::TargetExpired { id } => log::debug!("target #{} expired", id),
                SessionEvent::TargetHit { id, zone, points } => {
                    log::debug!("hit #{} ({:?}) +{}", id, zone, points)
                }
                SessionEvent::Missed => log::debug!("miss"),
                SessionEvent::Ended { reason } => log::info!("run over: {}", reason.as_str()),
            }
        }
    }

    /// Aim at the oldest live target (its head when it has one)
    fn fire(&mut self) {
        let Some(target) = self.session.live_targets().first().copied() else {
            return;
        };
        let mut aim = target.head.map(|h| h.center).unwrap_or(target.position);

        self.shots_fired += 1;
        if self.shots_fired % MISS_EVERY == 0 {
            aim += Vec3::X * (target.radius * 3.0);
        }

        let Some(ray) = Ray::toward(EYE, aim) else {
            return;
        };
        if let ShotOutcome::Hit { points, .. } = self.session.shoot(&ray) {
            let hud = self.session.hud_stats();
            log::debug!(
                "+{} score={} accuracy={}% time={:.1}s",
                points,
                hud.score,
                hud.accuracy,
                hud.time_remaining
            );
        }
    }
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = std::env::args()
        .nth(1)
        .map(|path| Settings::load(Path::new(&path)))
        .unwrap_or_default();
    log::info!(
        "Aim Range starting: {} for {}s (seed {})",
        settings.mode.label(),
        settings.duration_seconds,
        settings.seed
    );

    let mut driver = Driver::new(&settings);
    driver.session.start(driver.now());
    while driver.session.phase() == SessionPhase::Running && driver.frame < MAX_FRAMES {
        driver.step();
    }

    match driver.session.summary() {
        Some(summary) => match serde_json::to_string_pretty(summary) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Could not encode summary: {}", e),
        },
        None => log::warn!("Stopped after {} frames without a summary", driver.frame),
    }
}
