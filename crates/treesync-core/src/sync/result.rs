//! Outcome types for a replication run

use std::fmt;

use serde::{Deserialize, Serialize};
use treesync_fs::NormalizedPath;

use crate::observer::SummaryEvent;

/// What happened to a single source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Destination was missing or differed and now matches the source
    Copied,
    /// Destination already had identical content
    Skipped,
    /// An I/O error stopped this file; the run continued
    Failed,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Copied => "copied",
            Self::Skipped => "skipped",
            Self::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Outcome record for one relative path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOutcome {
    pub relative_path: NormalizedPath,
    pub outcome: Outcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileOutcome {
    pub fn copied(relative_path: NormalizedPath) -> Self {
        Self {
            relative_path,
            outcome: Outcome::Copied,
            error: None,
        }
    }

    pub fn skipped(relative_path: NormalizedPath) -> Self {
        Self {
            relative_path,
            outcome: Outcome::Skipped,
            error: None,
        }
    }

    pub fn failed(relative_path: NormalizedPath, error: impl fmt::Display) -> Self {
        Self {
            relative_path,
            outcome: Outcome::Failed,
            error: Some(error.to_string()),
        }
    }
}

/// Accumulated result of one replication run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncResult {
    pub copied: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Nothing was written; `copied` counts files that would have been
    pub dry_run: bool,
    /// The run stopped early and `outcomes` covers only the files it reached
    pub cancelled: bool,
    /// One record per file, sorted by relative path
    pub outcomes: Vec<FileOutcome>,
}

impl SyncResult {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Add one file's outcome and bump the matching counter.
    pub fn record(&mut self, outcome: FileOutcome) {
        match outcome.outcome {
            Outcome::Copied => self.copied += 1,
            Outcome::Skipped => self.skipped += 1,
            Outcome::Failed => self.failed += 1,
        }
        self.outcomes.push(outcome);
    }

    /// Sort the outcome log so it reads the same regardless of processing order.
    pub fn finalize(mut self) -> Self {
        self.outcomes
            .sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        self
    }

    /// Number of files with an outcome.
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Look up the record for a relative path.
    pub fn outcome_for(&self, relative_path: &str) -> Option<&FileOutcome> {
        self.outcomes
            .iter()
            .find(|o| o.relative_path.as_str() == relative_path)
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes
            .iter()
            .filter(|o| o.outcome == Outcome::Failed)
    }

    pub fn summary(&self) -> SummaryEvent {
        SummaryEvent {
            copied: self.copied,
            skipped: self.skipped,
            failed: self.failed,
        }
    }
}
