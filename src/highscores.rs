//! High score leaderboard system
//!
//! Exactly ten slots, sorted descending by score, zero-padded. Persisted as
//! plain text: one `score wave` pair per line, empty slots omitted.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::persistence::{self, PersistenceError};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player's score
    pub score: u64,
    /// Wave reached
    pub wave: u32,
}

impl HighScoreEntry {
    pub fn is_empty(&self) -> bool {
        self.score == 0
    }
}

/// High score leaderboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScores {
    entries: [HighScoreEntry; MAX_HIGH_SCORES],
    /// Backing file; `None` keeps the board in memory only
    path: Option<PathBuf>,
}

impl Default for HighScores {
    fn default() -> Self {
        Self::new()
    }
}

impl HighScores {
    /// Create an all-zero, in-memory leaderboard
    pub fn new() -> Self {
        Self {
            entries: [HighScoreEntry::default(); MAX_HIGH_SCORES],
            path: None,
        }
    }

    /// Load the leaderboard at `path`. A missing or unreadable file yields
    /// an all-zero board that will still be saved back to `path`.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let mut scores = Self::new();
        scores.path = Some(path.to_path_buf());

        match persistence::read_to_string_opt(path) {
            Ok(Some(text)) => {
                scores.entries = Self::parse(&text);
                log::info!(
                    "Loaded {} high scores from {}",
                    scores.len(),
                    path.display()
                );
            }
            Ok(None) => log::info!("No high scores at {}, starting fresh", path.display()),
            Err(e) => log::warn!("Could not read high scores: {e}; starting fresh"),
        }

        scores
    }

    /// Parse the text format. Reads `score wave` lines in order and stops at
    /// the first line without two integers; missing slots stay zero.
    pub fn parse(text: &str) -> [HighScoreEntry; MAX_HIGH_SCORES] {
        let mut entries = [HighScoreEntry::default(); MAX_HIGH_SCORES];
        let mut lines = text.lines().filter(|l| !l.trim().is_empty());

        for slot in entries.iter_mut() {
            let Some(line) = lines.next() else {
                break;
            };
            let mut fields = line.split_whitespace();
            let score = fields.next().and_then(|t| t.parse::<u64>().ok());
            let wave = fields.next().and_then(|t| t.parse::<u32>().ok());
            match (score, wave) {
                (Some(score), Some(wave)) => *slot = HighScoreEntry { score, wave },
                _ => {
                    log::warn!("Malformed high score line {line:?}, ignoring the rest");
                    break;
                }
            }
        }

        // Hand-edited files may be out of order; keep the board sorted
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries
    }

    /// Render the text format (zero-score slots omitted)
    pub fn serialize(&self) -> String {
        self.entries
            .iter()
            .filter(|e| !e.is_empty())
            .map(|e| format!("{} {}\n", e.score, e.wave))
            .collect()
    }

    /// All ten slots, highest first
    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    /// Number of non-empty slots
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_empty()).count()
    }

    /// Check if the leaderboard has no recorded scores
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the top score (0 if empty)
    pub fn top_score(&self) -> u64 {
        self.entries[0].score
    }

    /// Check if a score beats at least one slot (empty slots count as 0)
    pub fn is_high_score(&self, score: u64) -> bool {
        self.entries.iter().any(|e| score > e.score)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        self.entries.iter().position(|e| score > e.score).map(|i| i + 1)
    }

    /// Insert a result ahead of the first strictly lower slot, dropping the
    /// last slot. Persists when the board has a backing file.
    /// Returns the slot index, or None if the score did not qualify.
    pub fn insert(&mut self, score: u64, wave: u32) -> Option<usize> {
        let pos = self.entries.iter().position(|e| score > e.score)?;

        self.entries[pos..].rotate_right(1);
        self.entries[pos] = HighScoreEntry { score, wave };

        if self.path.is_some() {
            if let Err(e) = self.save() {
                log::warn!("High score not persisted: {e}");
            }
        }

        Some(pos)
    }

    /// Write the board to its backing file (no-op when in memory)
    pub fn save(&self) -> Result<(), PersistenceError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        persistence::write_atomic(path, &self.serialize())?;
        log::info!("High scores saved ({} entries)", self.len());
        Ok(())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
