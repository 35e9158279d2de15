//! Run settings for the frame driver
//!
//! Persisted as JSON next to the working directory. Every field has a
//! default so partial files are fine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_TICK_RATE;
use crate::persistence::{self, PersistenceError};

/// Environment variable that overrides the settings file location
pub const SETTINGS_ENV: &str = "INVADER_SIM_SETTINGS";
/// Default settings file name
pub const SETTINGS_FILE: &str = "invader-sim.json";

/// Frame driver settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Leaderboard text file
    pub leaderboard_path: PathBuf,
    /// Run seed (None = fresh entropy each run)
    pub seed: Option<u64>,
    /// Simulation ticks per second
    pub tick_rate: u32,
    /// Pace ticks against the wall clock instead of running flat out
    pub realtime: bool,
    /// Stop a run after this many ticks even if it has not ended
    pub max_ticks: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            leaderboard_path: PathBuf::from("highscores.txt"),
            seed: None,
            tick_rate: DEFAULT_TICK_RATE,
            realtime: false,
            // One hour of play at the default rate
            max_ticks: Some(60 * 60 * DEFAULT_TICK_RATE as u64),
        }
    }
}

impl Settings {
    /// Settings file location (`INVADER_SIM_SETTINGS` or `./invader-sim.json`)
    pub fn default_path() -> PathBuf {
        std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE))
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    fn try_load(path: &Path) -> Result<Option<Self>, PersistenceError> {
        let Some(json) = persistence::read_to_string_opt(path)? else {
            return Ok(None);
        };
        let settings = serde_json::from_str(&json).map_err(|e| PersistenceError::json(path, e))?;
        Ok(Some(settings))
    }

    /// Save settings to `path`
    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(self).map_err(|e| PersistenceError::json(path, e))?;
        persistence::write_atomic(path, &json)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Fixed timestep in seconds (a zero rate is treated as the default)
    pub fn tick_dt(&self) -> f32 {
        let rate = if self.tick_rate == 0 {
            DEFAULT_TICK_RATE
        } else {
            self.tick_rate
        };
        1.0 / rate as f32
    }
}
