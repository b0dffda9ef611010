//! Aim Range - a target-shooting trainer engine
//!
//! Core modules:
//! - `sim`: Deterministic session simulation (spawning, expiry, hit resolution, scoring)
//! - `settings`: Session defaults and effect toggles
//!
//! Rendering, camera setup and window/input plumbing live outside this crate.
//! The engine is driven by `Session::tick` and receives already-projected
//! world-space rays through `Session::shoot`.

pub mod settings;
pub mod sim;

pub use settings::Settings;
pub use sim::{Mode, Ray, Session, SessionPhase};

/// Game configuration constants
///
/// World units; +Z is up, +Y points into the arena away from the player.
pub mod consts {
    /// Arena dimensions
    pub const ARENA_HALF: f32 = 900.0;
    pub const ARENA_DEPTH: f32 = ARENA_HALF * 0.9;

    /// Target placement band (height above the floor)
    pub const TARGET_MIN_Z: f32 = 80.0;
    pub const TARGET_MAX_Z: f32 = 220.0;
    /// Closest spawn distance along +Y
    pub const TARGET_MIN_Y: f32 = 50.0;

    /// Full-size target radius
    pub const TARGET_RADIUS: f32 = 24.0;
    /// Live target cap
    pub const MAX_TARGETS: usize = 5;
    /// Hits further than this along the ray are ignored
    pub const RAY_MAX_DIST: f32 = 3000.0;
    /// Undrained session events kept before the oldest are dropped
    pub const MAX_PENDING_EVENTS: usize = 256;

    /// Spawn interval (seconds) at session start
    pub const SPAWN_INTERVAL_START: f64 = 1.2;
    /// Fastest spawn interval (seconds)
    pub const SPAWN_INTERVAL_MIN: f64 = 0.20;
    /// Base interval reduction per second of play
    pub const SPAWN_ACCEL: f64 = 0.12;

    /// Horizontal oscillation for animated targets
    pub const SPHERE_MOVE_SPEED: f32 = 80.0;
    pub const SPHERE_MOVE_RANGE: f32 = 200.0;
    /// Animated targets stay within this fraction of ARENA_HALF
    pub const SPHERE_MOVE_LIMIT: f32 = 0.8;

    /// Glow pulse: phase advance per tick and radius amplitude
    pub const GLOW_STEP: f32 = 0.03;
    pub const GLOW_AMPLITUDE: f32 = 0.3;

    /// Seconds added to the time bank per Time Trial hit
    pub const TIME_TRIAL_HIT_BONUS: f64 = 1.0;
    /// Time Trial targets shrink to this fraction of TARGET_RADIUS
    pub const TT_MIN_RADIUS_FACTOR: f32 = 0.45;
    /// Time Trial target lifetime (seconds)
    pub const TIME_TRIAL_TTL: f64 = 4.0;

    /// Precision head sphere: radius ratio and vertical offset (in body radii)
    pub const PRECISION_INNER_RATIO: f32 = 0.5;
    pub const HEADSHOT_OFFSET_FACTOR: f32 = 1.5;

    /// Points per hit zone
    pub const BODY_POINTS: u32 = 1;
    pub const HEADSHOT_POINTS: u32 = 5;

    /// Selectable session lengths (seconds)
    pub const DURATION_OPTIONS: [f64; 4] = [15.0, 30.0, 60.0, 120.0];
    /// Shortest accepted session length (seconds)
    pub const MIN_DURATION_SECONDS: f64 = 1.0;
}

/// Clamp to [0, 1], mapping NaN to 0
#[inline]
pub fn clamp01(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Linear interpolation: `a*(1-t) + b*t`
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}
