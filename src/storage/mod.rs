//! On-disk state: configuration, quiz history, progress and snapshots.

pub mod config;
pub mod history;
pub mod progress_store;
pub mod snapshot;

pub use config::{AppConfig, HistorySettings, QuizSettings, CONFIG_FILE_NAME};
pub use history::{HistoryRecord, HistoryStore, MemoryHistory};
pub use progress_store::ProgressStore;
pub use snapshot::{export_snapshot, import_snapshot, Snapshot, SNAPSHOT_VERSION};

use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::quiz::{QuizMode, QuizResults};

pub const HOME_ENV_VAR: &str = "PERIODIC_CHALLENGE_HOME";

/// Where quiz results go once a session ends.
pub trait Persistence {
    fn save_quiz_result(&mut self, mode: QuizMode, results: &QuizResults) -> Result<HistoryRecord>;
    /// Stored records, oldest first.
    fn quiz_history(&self) -> Result<Vec<HistoryRecord>>;
}

/// Root directory where the challenge stores data.
///
/// Order of precedence:
/// 1. `PERIODIC_CHALLENGE_HOME` environment variable.
/// 2. OS-specific data directory via `directories::BaseDirs`.
pub fn workspace_root() -> Result<PathBuf> {
    if let Ok(path) = env::var(HOME_ENV_VAR) {
        return Ok(PathBuf::from(path));
    }
    let base_dirs = BaseDirs::new().context("Unable to determine OS data directory")?;
    Ok(base_dirs.data_dir().join("PeriodicChallenge"))
}

/// Paths of every file the challenge keeps under one root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    pub root: PathBuf,
}

impl Workspace {
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn discover() -> Result<Self> {
        Ok(Self::at(workspace_root()?))
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join("config").join(CONFIG_FILE_NAME)
    }

    pub fn progress_path(&self) -> PathBuf {
        self.root.join("progress.json")
    }

    pub fn history_path(&self) -> PathBuf {
        self.root.join("history.jsonl")
    }

    pub fn load_config(&self) -> Result<AppConfig> {
        AppConfig::load_or_default(&self.config_path())
    }

    pub fn history_store(&self, config: &AppConfig) -> HistoryStore {
        HistoryStore::new(self.history_path(), config.history.max_records)
    }

    pub fn progress_store(&self) -> ProgressStore {
        ProgressStore::new(self.progress_path())
    }
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    let value =
        serde_json::from_str(&data).with_context(|| format!("Failed to parse {:?}", path))?;
    Ok(value)
}

pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_string_pretty(value)?;
    fs::write(path, data).with_context(|| format!("Failed to write {:?}", path))?;
    Ok(())
}
