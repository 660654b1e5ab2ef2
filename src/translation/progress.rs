//! Resumable progress checkpoints for translation runs.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Checkpoint file name inside a locale directory.
pub const PROGRESS_FILE: &str = ".translate-progress.json";

/// Path of a locale's checkpoint file.
pub fn progress_path(dir: &Path, code: &str) -> PathBuf {
    dir.join(code).join(PROGRESS_FILE)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationProgress {
    /// Index of the last entry known to be saved; `None` before the first
    pub last_index: Option<usize>,

    /// Entries translated so far across runs
    pub completed_count: usize,

    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl TranslationProgress {
    pub fn new(last_index: Option<usize>, completed_count: usize) -> Self {
        Self {
            last_index,
            completed_count,
            updated_at: Utc::now(),
        }
    }

    /// Index a resumed run starts from.
    pub fn next_index(&self) -> usize {
        self.last_index.map_or(0, |index| index + 1)
    }

    /// Load a checkpoint, or `None` if there is none.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read progress file {}", path.display()))?;
        let progress = serde_json::from_str(&content)
            .with_context(|| format!("Invalid progress file {}", path.display()))?;
        Ok(Some(progress))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write progress file {}", path.display()))
    }

    /// Delete a checkpoint once a run has finished.
    pub fn clear(path: &Path) -> Result<()> {
        if path.exists() {
            fs::remove_file(path)
                .with_context(|| format!("Failed to remove progress file {}", path.display()))?;
        }
        Ok(())
    }
}

impl Default for TranslationProgress {
    fn default() -> Self {
        Self::new(None, 0)
    }
}
