use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::Persistence;
use crate::quiz::{QuizMode, QuizResults};

/// A finished quiz as kept in history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub mode: QuizMode,
    #[serde(flatten)]
    pub results: QuizResults,
}

impl HistoryRecord {
    pub fn new(mode: QuizMode, results: QuizResults) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            mode,
            results,
        }
    }
}

/// JSONL history file keeping the most recent `max_records` entries.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
    max_records: usize,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>, max_records: usize) -> Self {
        Self {
            path: path.into(),
            max_records,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: &HistoryRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open history {:?}", self.path))?;
        file.write_all(serde_json::to_string(record)?.as_bytes())?;
        file.write_all(b"\n")?;
        Ok(())
    }

    pub fn read_all(&self) -> Result<Vec<HistoryRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut records = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record: HistoryRecord = serde_json::from_str(&line).with_context(|| {
                format!("Failed parsing history line {} of {:?}", idx + 1, self.path)
            })?;
            records.push(record);
        }
        Ok(records)
    }

    /// Rewrites the file with exactly `records`.
    pub fn replace_all(&self, records: &[HistoryRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = File::create(&self.path)?;
        for record in records {
            file.write_all(serde_json::to_string(record)?.as_bytes())?;
            file.write_all(b"\n")?;
        }
        Ok(())
    }

    fn trim_to_cap(&self) -> Result<()> {
        let records = self.read_all()?;
        if records.len() <= self.max_records {
            return Ok(());
        }
        let keep = &records[records.len() - self.max_records..];
        log::debug!(
            "trimming history {:?} from {} to {} records",
            self.path,
            records.len(),
            keep.len()
        );
        self.replace_all(keep)
    }
}

impl Persistence for HistoryStore {
    fn save_quiz_result(&mut self, mode: QuizMode, results: &QuizResults) -> Result<HistoryRecord> {
        let record = HistoryRecord::new(mode, *results);
        self.append(&record)?;
        self.trim_to_cap()?;
        Ok(record)
    }

    fn quiz_history(&self) -> Result<Vec<HistoryRecord>> {
        self.read_all()
    }
}

/// History kept in memory only, for when no workspace is writable.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    records: Vec<HistoryRecord>,
    max_records: usize,
}

impl MemoryHistory {
    pub fn new(max_records: usize) -> Self {
        Self {
            records: Vec::new(),
            max_records,
        }
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new(super::HistorySettings::default().max_records)
    }
}

impl Persistence for MemoryHistory {
    fn save_quiz_result(&mut self, mode: QuizMode, results: &QuizResults) -> Result<HistoryRecord> {
        let record = HistoryRecord::new(mode, *results);
        self.records.push(record.clone());
        if self.records.len() > self.max_records {
            let excess = self.records.len() - self.max_records;
            self.records.drain(..excess);
        }
        Ok(record)
    }

    fn quiz_history(&self) -> Result<Vec<HistoryRecord>> {
        Ok(self.records.clone())
    }
}
