//! Save/load of the high score table
//!
//! The table is stored as a plain JSON array of integers. A missing or
//! corrupt store is never fatal: [`HighScoreStore::load`] falls back to the
//! default table and logs why.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::highscores::HighScores;

/// Errors raised while reading or writing stored data
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// File-backed storage for the high score table
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
    slots: usize,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>, slots: usize) -> Self {
        Self {
            path: path.into(),
            slots,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored table, failing on I/O or parse errors
    pub fn try_load(&self) -> Result<HighScores, StoreError> {
        let json = std::fs::read_to_string(&self.path)?;
        let scores: Vec<i64> = serde_json::from_str(&json)?;
        Ok(HighScores::from_scores(scores, self.slots))
    }

    /// Read the stored table, falling back to the default table
    pub fn load(&self) -> HighScores {
        match self.try_load() {
            Ok(table) => {
                log::info!("Loaded {} high scores", table.len());
                table
            }
            Err(e) => {
                log::warn!(
                    "No usable high scores at {} ({}), using defaults",
                    self.path.display(),
                    e
                );
                HighScores::with_defaults(self.slots)
            }
        }
    }

    /// Write the table as a JSON array
    pub fn save(&self, table: &HighScores) -> Result<(), StoreError> {
        let json = serde_json::to_string(table.scores())?;
        std::fs::write(&self.path, json)?;
        log::info!("High scores saved ({} entries)", table.len());
        Ok(())
    }
}
