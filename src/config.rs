//! Tuning values and driver configuration, loaded from TOML.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::error::ConfigError;

/// Default config location, relative to the working directory.
pub const CONFIG_FILE: &str = "config/bash_quest.toml";

/// Environment variable overriding [`CONFIG_FILE`].
pub const CONFIG_ENV: &str = "BASH_QUEST_CONFIG";

/// Gameplay timings.  Copied into every `GameState` so the pure update
/// functions read the same thresholds the driver schedules with.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub enemy_spawn_interval_ms: f32,
    pub boss_spawn_interval_ms: f32,
    /// Time spent in each tier before escalating to the next.
    pub tier_upgrade_ms: f32,
    pub turret_cooldown_ms: f32,
    /// Regular spawns are limited to `cd` and standalone commands until
    /// the game timer passes this mark.
    pub onboarding_ms: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            enemy_spawn_interval_ms: 3000.0,
            boss_spawn_interval_ms: 30000.0,
            tier_upgrade_ms: 60000.0,
            turret_cooldown_ms: 5000.0,
            onboarding_ms: 30000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub tuning: Tuning,
    /// Target frame period of the terminal driver.
    pub frame_ms: u64,
    /// Log destination; empty disables logging.
    pub log_file: String,
    /// High-score file; `None` means `$HOME/.bash_quest_score`.
    pub high_score_file: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tuning: Tuning::default(),
            frame_ms: 33,
            log_file: "bash_quest.log".to_string(),
            high_score_file: None,
        }
    }
}

impl GameConfig {
    /// Parse a config from TOML text.  `origin` only labels errors.
    pub fn from_toml(text: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            details: e.to_string(),
        })
    }

    /// Load from `path`, falling back to defaults when the file is absent.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let shown = path.display().to_string();

        if !path.exists() {
            warn!(path = %shown, "config file not found, using defaults");
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: shown.clone(),
            details: e.to_string(),
        })?;
        Self::from_toml(&text, &shown)
    }

    /// Resolve the config path from the environment and load it.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| CONFIG_FILE.to_string());
        Self::load(path)
    }
}
