//! Host settings
//!
//! Persisted as JSON next to the binary; everything has a sensible default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::TICK_INTERVAL_MS;
use crate::persistence::{self, StorageError};

/// Default settings file name
pub const DEFAULT_SETTINGS_PATH: &str = "lane-runner.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Tick period in milliseconds
    pub tick_interval_ms: u64,
    /// Let the game jump on its own
    pub auto_play: bool,
    /// Fixed RNG seed (random per process when absent)
    pub seed: Option<u64>,
    /// Where the best score is stored
    pub best_score_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_interval_ms: TICK_INTERVAL_MS,
            auto_play: false,
            seed: None,
            best_score_path: PathBuf::from("lane-runner-best.json"),
        }
    }
}

impl Settings {
    /// Load settings, falling back to defaults on a missing or unreadable file
    pub fn load(path: &Path) -> Self {
        match persistence::read_json::<Settings>(path) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings from {}", path.display());
                settings.sanitized()
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring settings at {}: {e}", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), StorageError> {
        persistence::write_json(path, self)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Clamp values a hand-edited file may get wrong
    fn sanitized(mut self) -> Self {
        if self.tick_interval_ms == 0 {
            self.tick_interval_ms = TICK_INTERVAL_MS;
        }
        self
    }
}
