//! Error types for treesync-core

use std::path::PathBuf;

/// Result type for treesync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Run-level errors.
///
/// Anything that goes wrong with a single file is not an error at this level;
/// it is recorded as a failed outcome and the run carries on.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Source root missing or not a directory
    #[error("Source directory not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// Destination root could not be created or is not a directory
    #[error("Destination {path} is not writable: {source}")]
    DestinationUnwritable {
        path: PathBuf,
        #[source]
        source: treesync_fs::Error,
    },

    /// Rejected replication options
    #[error("Invalid options: {message}")]
    InvalidOptions { message: String },

    /// Worker pool could not be started
    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Filesystem error from treesync-fs
    #[error(transparent)]
    Fs(#[from] treesync_fs::Error),
}
