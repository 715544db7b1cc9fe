//! Tree replication
//!
//! This module provides:
//! - **walk**: Lazy enumeration of regular files under a source root
//! - **result**: Per-file outcomes and the run accumulator
//! - **replicator**: The decision rule and copy loop tying them together

mod replicator;
mod result;
mod walk;

pub use replicator::{TreeReplicator, replicate};
pub use result::{FileOutcome, Outcome, SyncResult};
pub use walk::{SourceEntry, SourceWalker, WalkItem};
