//! Session settings and preferences
//!
//! Loaded from a JSON file by the host; missing fields fall back to
//! defaults, and a missing or malformed file yields `Settings::default()`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::DURATION_OPTIONS;
use crate::sim::{Mode, Session, SessionConfig};

/// Player-selected session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Game mode for the next run
    pub mode: Mode,
    /// Session length in seconds
    pub duration_seconds: f64,

    // === Visual Effects ===
    /// Horizontal target oscillation
    pub animated: bool,
    /// Pulsing target radius
    pub glowing: bool,

    /// RNG seed; each run within a session derives its own stream from it
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: Mode::Endless,
            duration_seconds: DURATION_OPTIONS[1],
            animated: false,
            glowing: false,
            seed: 0x5EED,
        }
    }
}

impl Settings {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Session config for the selected mode and length
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::new(self.mode, self.duration_seconds)
    }

    /// New session in Menu with these settings applied
    pub fn session(&self) -> Session {
        let mut session = Session::new(self.session_config(), self.seed);
        session.set_animated(self.animated);
        session.set_glowing(self.glowing);
        session
    }

    /// Push mode, duration and effects into `session`
    ///
    /// Mode and duration only take while the session is in Menu.
    pub fn apply_to(&self, session: &mut Session) {
        session.set_mode(self.mode);
        session.set_duration(self.duration_seconds);
        session.set_animated(self.animated);
        session.set_glowing(self.glowing);
    }
}
