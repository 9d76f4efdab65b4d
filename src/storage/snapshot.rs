//! Export and import of everything the challenge stores, as one JSON document.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AppConfig, HistoryRecord, HistoryStore, ProgressStore, Workspace};
use crate::progress::UserProgress;

pub const SNAPSHOT_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Absent in documents that were not produced by an export.
    #[serde(default)]
    pub version: Option<String>,
    pub exported_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub progress: UserProgress,
    #[serde(default)]
    pub settings: AppConfig,
    #[serde(default)]
    pub quiz_history: Vec<HistoryRecord>,
}

impl Snapshot {
    pub fn new(progress: UserProgress, settings: AppConfig, quiz_history: Vec<HistoryRecord>) -> Self {
        Self {
            version: Some(SNAPSHOT_VERSION.to_string()),
            exported_at: Some(Utc::now()),
            progress,
            settings,
            quiz_history,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses an exported document; one without a version tag is rejected.
    pub fn from_json(data: &str) -> Result<Self> {
        let snapshot: Snapshot =
            serde_json::from_str(data).context("Failed to parse snapshot")?;
        if snapshot.version.is_none() {
            bail!("Invalid snapshot: missing version");
        }
        Ok(snapshot)
    }
}

/// Collects the workspace contents into a snapshot.
pub fn export_snapshot(workspace: &Workspace) -> Result<Snapshot> {
    let settings = workspace.load_config()?;
    let progress = workspace.progress_store().load()?;
    let history = workspace.history_store(&settings).read_all()?;
    Ok(Snapshot::new(progress, settings, history))
}

/// Replaces the workspace contents with `snapshot`.
pub fn import_snapshot(workspace: &Workspace, snapshot: &Snapshot) -> Result<()> {
    let Some(version) = snapshot.version.as_deref() else {
        bail!("Invalid snapshot: missing version");
    };
    if version != SNAPSHOT_VERSION {
        log::warn!("importing snapshot version {version}, expected {SNAPSHOT_VERSION}");
    }
    snapshot.settings.save(&workspace.config_path())?;
    ProgressStore::new(workspace.progress_path()).save(&snapshot.progress)?;
    let history = HistoryStore::new(
        workspace.history_path(),
        snapshot.settings.history.max_records,
    );
    let skip = snapshot
        .quiz_history
        .len()
        .saturating_sub(snapshot.settings.history.max_records);
    history.replace_all(&snapshot.quiz_history[skip..])?;
    log::info!(
        "imported snapshot with {} history records into {:?}",
        snapshot.quiz_history.len() - skip,
        workspace.root
    );
    Ok(())
}
