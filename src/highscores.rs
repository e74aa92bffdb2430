//! High score table
//!
//! A fixed number of slots, always sorted descending. A finished game's
//! score enters the table only if it beats the lowest retained entry, which
//! is then dropped.

use serde::{Deserialize, Serialize};

/// Fixed-size high score table (descending)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScores {
    scores: Vec<i64>,
}

impl HighScores {
    /// The table shipped with the game, used when nothing is stored
    pub fn with_defaults(slots: usize) -> Self {
        let scores = (0..slots).map(|i| (slots - i) as i64 * 1000).collect();
        Self { scores }
    }

    /// Build a table from stored scores, sorting and padding/trimming to `slots`
    pub fn from_scores(mut scores: Vec<i64>, slots: usize) -> Self {
        scores.sort_unstable_by(|a, b| b.cmp(a));
        scores.resize(slots, 0);
        Self { scores }
    }

    pub fn scores(&self) -> &[i64] {
        &self.scores
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn top_score(&self) -> Option<i64> {
        self.scores.first().copied()
    }

    pub fn lowest(&self) -> Option<i64> {
        self.scores.last().copied()
    }

    /// Check if a score beats the lowest entry
    pub fn qualifies(&self, score: i64) -> bool {
        self.lowest().is_some_and(|low| score > low)
    }

    /// Insert a qualifying score, dropping the previous lowest.
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify.
    pub fn submit(&mut self, score: i64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let pos = self
            .scores
            .iter()
            .position(|&s| score > s)
            .unwrap_or(self.scores.len());
        self.scores.insert(pos, score);
        self.scores.pop();

        log::info!("New high score {} at rank {}", score, pos + 1);
        Some(pos + 1)
    }

    /// Index of the first entry equal to `score`, for highlighting
    pub fn highlight_index(&self, score: i64) -> Option<usize> {
        self.scores.iter().position(|&s| s == score)
    }
}
