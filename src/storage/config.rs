//! Per-install preferences for the challenge.
//!
//! Stored as TOML at `<workspace>/config/config.toml`. The workspace root is
//! `$PERIODIC_CHALLENGE_HOME` when set, otherwise the OS data directory.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::quiz::{Difficulty, ScoringMode};

/// Root configuration persisted per installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub quiz: QuizSettings,
    #[serde(default)]
    pub history: HistorySettings,
}

/// Quiz behaviour toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSettings {
    /// Difficulty used when the caller does not pick one.
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default = "default_hints_enabled")]
    pub hints_enabled: bool,
    /// Whether the UI should play answer cues through the observer.
    #[serde(default = "default_sound_enabled")]
    pub sound_enabled: bool,
    /// Score by difficulty-weighted points instead of a plain percentage.
    #[serde(default)]
    pub point_weighted: bool,
}

impl QuizSettings {
    pub fn scoring_mode(&self) -> ScoringMode {
        if self.point_weighted {
            ScoringMode::PointWeighted
        } else {
            ScoringMode::Percentage
        }
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            hints_enabled: default_hints_enabled(),
            sound_enabled: default_sound_enabled(),
            point_weighted: false,
        }
    }
}

const fn default_hints_enabled() -> bool {
    true
}

const fn default_sound_enabled() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySettings {
    /// Most recent quiz records kept on disk.
    #[serde(default = "default_max_records")]
    pub max_records: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            max_records: default_max_records(),
        }
    }
}

const fn default_max_records() -> usize {
    100
}

pub const CONFIG_FILE_NAME: &str = "config.toml";

impl AppConfig {
    /// Loads the configuration at `path`, or defaults when the file is absent.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let cfg: AppConfig = toml::from_str(&data)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(cfg)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let data = toml::to_string_pretty(self)?;
        fs::write(path, data).with_context(|| format!("Failed to write config file {:?}", path))?;
        Ok(())
    }
}
