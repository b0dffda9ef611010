//! Deterministic session simulation
//!
//! All gameplay logic lives here:
//! - Driven only by explicit `tick(now, dt)` calls and discrete events
//! - Seeded RNG only (one stream per run)
//! - Stable iteration order (targets by creation)
//! - No rendering, camera or windowing dependencies

pub mod curve;
pub mod hit;
pub mod mode;
pub mod ray;
pub mod scoring;
pub mod spawn;
pub mod state;
pub mod target;
pub mod tick;

pub use curve::{SpawnParams, progress, shrink_factor, spawn_params, target_radius, ttl_range};
pub use hit::{Hit, HitZone, resolve};
pub use mode::{Mode, ModeConfig, TtlCurve};
pub use ray::{Ray, Sphere, intersect};
pub use scoring::{ScoreDelta, SessionStats, score_shot};
pub use spawn::SpawnScheduler;
pub use state::{
    EndReason, HudStats, Session, SessionClock, SessionConfig, SessionEvent, SessionPhase,
    SessionSummary, ShotOutcome,
};
pub use target::{Effects, Target, TargetPool, TargetView};
