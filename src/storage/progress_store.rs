use anyhow::Result;
use std::path::{Path, PathBuf};

use super::{read_json, write_json};
use crate::progress::UserProgress;

/// JSON file holding the learner's [`UserProgress`].
#[derive(Debug, Clone)]
pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saved progress, or a fresh default when nothing was saved yet.
    pub fn load(&self) -> Result<UserProgress> {
        if !self.path.exists() {
            return Ok(UserProgress::default());
        }
        read_json(&self.path)
    }

    pub fn save(&self, progress: &UserProgress) -> Result<()> {
        write_json(&self.path, progress)
    }

    /// Removes saved progress so the next load starts over.
    pub fn reset(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
