//! High score history
//!
//! Persisted as plain text, one decimal integer per line, oldest first.
//! The current high score is the best entry; a new line is appended only
//! when a game beats it.

use std::fs;
use std::io;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Maximum number of entries kept in the file
pub const MAX_HISTORY: usize = 10;

/// Errors from reading or writing the score file
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid score on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: ParseIntError,
    },
}

/// Past high scores, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreHistory {
    entries: Vec<u32>,
}

impl ScoreHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse file contents. Blank lines are skipped; any other line that is
    /// not a non-negative integer rejects the whole file.
    pub fn parse(text: &str) -> Result<Self, ScoreError> {
        let mut entries = Vec::new();
        for (index, line) in text.lines().enumerate() {
            let line_text = line.trim();
            if line_text.is_empty() {
                continue;
            }
            let score = line_text.parse::<u32>().map_err(|source| ScoreError::Parse {
                line: index + 1,
                source,
            })?;
            entries.push(score);
        }
        Ok(Self { entries })
    }

    /// File contents for this history, newline terminated
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for score in &self.entries {
            text.push_str(&score.to_string());
            text.push('\n');
        }
        text
    }

    /// Best recorded score, 0 when empty
    pub fn best(&self) -> u32 {
        self.entries.iter().copied().max().unwrap_or(0)
    }

    /// Entries in file order (oldest first)
    pub fn entries(&self) -> &[u32] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries best-first with their 1-indexed rank
    pub fn ranked(&self) -> Vec<(usize, u32)> {
        let mut sorted = self.entries.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted
            .into_iter()
            .enumerate()
            .map(|(i, score)| (i + 1, score))
            .collect()
    }

    /// Append `high_score` if it beats the best entry (or the history is
    /// empty). Returns true when the history changed.
    pub fn record(&mut self, high_score: u32) -> bool {
        if !self.entries.is_empty() && high_score <= self.best() {
            return false;
        }
        self.entries.push(high_score);
        if self.entries.len() > MAX_HISTORY {
            let excess = self.entries.len() - MAX_HISTORY;
            self.entries.drain(..excess);
        }
        true
    }
}

/// The score file on disk
#[derive(Debug, Clone)]
pub struct ScoreFile {
    path: PathBuf,
}

impl ScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the history. A missing file is an empty history.
    pub fn load(&self) -> Result<ScoreHistory, ScoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => ScoreHistory::parse(&text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No score file at {}, starting fresh", self.path.display());
                Ok(ScoreHistory::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Overwrite the file with `history`
    pub fn save(&self, history: &ScoreHistory) -> Result<(), ScoreError> {
        fs::write(&self.path, history.to_text())?;
        log::info!(
            "High scores saved to {} ({} entries)",
            self.path.display(),
            history.entries().len()
        );
        Ok(())
    }

    /// Like [`ScoreFile::load`], but failures are logged and give an empty history
    pub fn load_or_default(&self) -> ScoreHistory {
        self.load().unwrap_or_else(|e| {
            log::warn!("Error loading scores from {}: {}", self.path.display(), e);
            ScoreHistory::new()
        })
    }
}
