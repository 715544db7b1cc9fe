//! Tree replication engine for treesync
//!
//! This crate implements one-directional, additive replication of a
//! directory tree:
//!
//! - **Walk**: Lazily enumerate regular files under the source root
//! - **Decide**: Copy when the destination is missing or its SHA-256 differs,
//!   skip when it matches
//! - **Copy**: All-or-nothing via temp file and rename
//! - **Report**: One outcome per file, delivered to a pluggable observer and
//!   collected into a [`SyncResult`]
//!
//! # Architecture
//!
//! ```text
//!     treesync-cli
//!          |
//!     treesync-core
//!          |
//!     treesync-fs
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! fn example() -> treesync_core::Result<()> {
//!     let result = treesync_core::replicate(Path::new("src"), Path::new("dst"))?;
//!     assert_eq!(result.total(), result.copied + result.skipped + result.failed);
//!     Ok(())
//! }
//! ```

pub mod cancel;
pub mod error;
pub mod observer;
pub mod options;
pub mod sync;

pub use cancel::CancellationToken;
pub use error::{Error, Result};
pub use observer::{FileEvent, SilentObserver, SummaryEvent, SyncObserver};
pub use options::ReplicateOptions;
pub use sync::{
    FileOutcome, Outcome, SourceEntry, SourceWalker, SyncResult, TreeReplicator, WalkItem,
    replicate,
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn error_source_not_found_displays_path() {
        let path = PathBuf::from("/path/to/source");
        let error = Error::SourceNotFound { path };

        let display = format!("{}", error);
        assert!(
            display.contains("/path/to/source"),
            "Error display should contain the path, got: {}",
            display
        );
        assert!(
            display.to_lowercase().contains("not found"),
            "Error display should mention not found, got: {}",
            display
        );
    }
}
