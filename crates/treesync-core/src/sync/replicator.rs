//! TreeReplicator implementation
//!
//! Walks a source tree and brings a destination tree up to date, one file at
//! a time: missing files are copied, files whose SHA-256 differs are copied,
//! identical files are skipped. Nothing under the destination is ever deleted.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;
use treesync_fs::io::{self, PathState};
use treesync_fs::path::canonical;
use treesync_fs::compute_file_checksum;

use super::result::{FileOutcome, SyncResult};
use super::walk::{SourceEntry, SourceWalker, WalkItem};
use crate::cancel::CancellationToken;
use crate::observer::{FileEvent, SilentObserver, SyncObserver};
use crate::options::ReplicateOptions;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decision {
    Copy,
    Skip,
}

/// One-directional, additive tree replicator.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use treesync_core::TreeReplicator;
///
/// let result = TreeReplicator::new()
///     .replicate(Path::new("./source"), Path::new("./backup"))
///     .unwrap();
/// println!("{} copied, {} skipped", result.copied, result.skipped);
/// ```
pub struct TreeReplicator {
    options: ReplicateOptions,
    observer: Box<dyn SyncObserver>,
    cancel: CancellationToken,
}

impl Default for TreeReplicator {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeReplicator {
    /// Create a replicator with default options and no observer.
    pub fn new() -> Self {
        Self::with_options(ReplicateOptions::default())
    }

    pub fn with_options(options: ReplicateOptions) -> Self {
        Self {
            options,
            observer: Box::new(SilentObserver),
            cancel: CancellationToken::new(),
        }
    }

    /// Report every outcome to `observer`.
    pub fn observer(mut self, observer: impl SyncObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Stop starting new files once `token` is cancelled.
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn options(&self) -> &ReplicateOptions {
        &self.options
    }

    /// Replicate `source_root` into `destination_root`.
    ///
    /// # Errors
    ///
    /// - [`Error::SourceNotFound`] if `source_root` is not an existing
    ///   directory. Nothing is created in that case.
    /// - [`Error::DestinationUnwritable`] if `destination_root` cannot be
    ///   created or is not a directory.
    /// - [`Error::InvalidOptions`] / [`Error::ThreadPool`] if the run cannot
    ///   start.
    ///
    /// Failures on individual files are not errors; they show up as
    /// failed outcomes in the returned [`SyncResult`].
    pub fn replicate(&self, source_root: &Path, destination_root: &Path) -> Result<SyncResult> {
        self.options.validate()?;

        if !source_root.is_dir() {
            return Err(Error::SourceNotFound {
                path: source_root.to_path_buf(),
            });
        }
        let source = canonical(source_root).map_err(|_| Error::SourceNotFound {
            path: source_root.to_path_buf(),
        })?;

        self.prepare_destination(destination_root)?;

        let mut walker = SourceWalker::new(&source);
        if let Ok(destination) = canonical(destination_root)
            && destination != source
            && destination.starts_with(&source)
        {
            tracing::debug!(
                "Destination {} is inside the source tree; excluding it from the walk",
                destination.display()
            );
            walker = walker.excluding(destination);
        }

        tracing::debug!(
            "Replicating {} -> {} (workers: {}, dry run: {})",
            source.display(),
            destination_root.display(),
            self.options.workers,
            self.options.dry_run
        );

        let mut result = SyncResult::new(self.options.dry_run);
        if self.options.workers > 1 {
            self.run_parallel(walker, destination_root, &mut result)?;
        } else {
            self.run_sequential(walker, destination_root, &mut result);
        }

        let result = result.finalize();
        self.observer.on_complete(&result.summary());
        tracing::debug!(
            "Replication finished: {} copied, {} skipped, {} failed",
            result.copied,
            result.skipped,
            result.failed
        );

        Ok(result)
    }

    fn prepare_destination(&self, destination_root: &Path) -> Result<()> {
        let unwritable = |source: treesync_fs::Error| Error::DestinationUnwritable {
            path: destination_root.to_path_buf(),
            source,
        };

        if self.options.dry_run {
            // Nothing gets created, but a non-directory in the way still fails
            return match io::probe(destination_root).map_err(unwritable)? {
                PathState::File => Err(unwritable(treesync_fs::Error::io(
                    destination_root,
                    std::io::Error::new(std::io::ErrorKind::AlreadyExists, "not a directory"),
                ))),
                PathState::Missing | PathState::Other => Ok(()),
            };
        }

        io::ensure_dir(destination_root).map_err(unwritable)
    }

    fn run_sequential(
        &self,
        walker: SourceWalker,
        destination_root: &Path,
        result: &mut SyncResult,
    ) {
        for item in walker {
            if self.cancel.is_cancelled() {
                tracing::info!("Cancelled; no further files will be processed");
                result.cancelled = true;
                break;
            }
            result.record(self.handle(item, destination_root));
        }
    }

    fn run_parallel(
        &self,
        walker: SourceWalker,
        destination_root: &Path,
        result: &mut SyncResult,
    ) -> Result<()> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.options.workers)
            .thread_name(|i| format!("treesync-worker-{}", i))
            .build()?;

        let stopped = AtomicBool::new(false);
        let outcomes: Vec<FileOutcome> = pool.install(|| {
            walker
                .take_while(|_| {
                    let cancelled = self.cancel.is_cancelled();
                    if cancelled {
                        stopped.store(true, Ordering::Relaxed);
                    }
                    !cancelled
                })
                .par_bridge()
                .map(|item| self.handle(item, destination_root))
                .collect()
        });

        for outcome in outcomes {
            result.record(outcome);
        }
        if stopped.load(Ordering::Relaxed) {
            tracing::info!("Cancelled; no further files will be processed");
            result.cancelled = true;
        }

        Ok(())
    }

    /// Produce the outcome for one walk item and tell the observer about it.
    fn handle(&self, item: WalkItem, destination_root: &Path) -> FileOutcome {
        let outcome = match item {
            WalkItem::File(entry) => self.process(&entry, destination_root),
            WalkItem::Error {
                relative_path,
                error,
            } => FileOutcome::failed(relative_path, error),
        };
        self.observer.on_file(&FileEvent::now(&outcome));
        outcome
    }

    fn process(&self, entry: &SourceEntry, destination_root: &Path) -> FileOutcome {
        let relative_path = entry.relative_path.clone();
        let dest = entry.destination_path(destination_root);

        let decision = match decide(entry, &dest) {
            Ok(decision) => decision,
            Err(e) => {
                tracing::warn!("Failed to compare {}: {}", relative_path, e);
                return FileOutcome::failed(relative_path, e);
            }
        };

        match decision {
            Decision::Skip => {
                tracing::trace!("Unchanged: {}", relative_path);
                FileOutcome::skipped(relative_path)
            }
            Decision::Copy if self.options.dry_run => FileOutcome::copied(relative_path),
            Decision::Copy => {
                match io::copy_atomic(&entry.absolute_path, &dest, self.options.copy_options()) {
                    Ok(bytes) => {
                        tracing::trace!("Wrote {} ({} bytes)", relative_path, bytes);
                        FileOutcome::copied(relative_path)
                    }
                    Err(e) => {
                        tracing::warn!("Failed to copy {}: {}", relative_path, e);
                        FileOutcome::failed(relative_path, e)
                    }
                }
            }
        }
    }
}

/// Content-addressed change detection.
///
/// Hashes are only computed when the destination already holds a file.
fn decide(entry: &SourceEntry, dest: &Path) -> treesync_fs::Result<Decision> {
    match io::probe(dest)? {
        PathState::Missing => Ok(Decision::Copy),
        PathState::Other => Err(treesync_fs::Error::NotAFile {
            path: dest.to_path_buf(),
        }),
        PathState::File => {
            let source_hash = compute_file_checksum(&entry.absolute_path)?;
            let dest_hash = compute_file_checksum(dest)?;
            if source_hash == dest_hash {
                Ok(Decision::Skip)
            } else {
                Ok(Decision::Copy)
            }
        }
    }
}

/// Replicate with default options and no observer.
pub fn replicate(source_root: &Path, destination_root: &Path) -> Result<SyncResult> {
    TreeReplicator::new().replicate(source_root, destination_root)
}
