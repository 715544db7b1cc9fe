//! Observer interface for per-file and end-of-run events
//!
//! The replicator never prints anything itself. Front ends plug in an
//! observer to render progress however they like.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use treesync_fs::NormalizedPath;

use crate::sync::{FileOutcome, Outcome};

/// Emitted once for every processed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEvent {
    pub relative_path: NormalizedPath,
    pub outcome: Outcome,
    pub timestamp: DateTime<Utc>,
    /// Error detail for failed files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileEvent {
    /// Stamp an outcome with the current time.
    pub fn now(outcome: &FileOutcome) -> Self {
        Self {
            relative_path: outcome.relative_path.clone(),
            outcome: outcome.outcome,
            timestamp: Utc::now(),
            error: outcome.error.clone(),
        }
    }
}

/// Emitted once when a run finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SummaryEvent {
    pub copied: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Receives replication events.
///
/// All methods have default no-op implementations. With more than one worker,
/// `on_file` is called from worker threads in completion order.
pub trait SyncObserver: Send + Sync {
    fn on_file(&self, _event: &FileEvent) {}
    fn on_complete(&self, _summary: &SummaryEvent) {}
}

/// No-op observer for silent operation.
pub struct SilentObserver;

impl SyncObserver for SilentObserver {}

impl<T: SyncObserver + ?Sized> SyncObserver for Arc<T> {
    fn on_file(&self, event: &FileEvent) {
        (**self).on_file(event)
    }

    fn on_complete(&self, summary: &SummaryEvent) {
        (**self).on_complete(summary)
    }
}
