//! Lazy source tree enumeration

use std::path::{Path, PathBuf};

use treesync_fs::NormalizedPath;
use walkdir::WalkDir;

/// A regular file discovered under the source root.
#[derive(Debug, Clone)]
pub struct SourceEntry {
    /// Identity key shared with the destination counterpart
    pub relative_path: NormalizedPath,
    pub absolute_path: PathBuf,
    pub size: u64,
    native_relative: PathBuf,
}

impl SourceEntry {
    /// Where this file lives under `destination_root`.
    ///
    /// Built from the native relative path, so names that are not valid
    /// UTF-8 still map to the right destination.
    pub fn destination_path(&self, destination_root: &Path) -> PathBuf {
        destination_root.join(&self.native_relative)
    }
}

/// One item yielded by [`SourceWalker`].
#[derive(Debug, Clone)]
pub enum WalkItem {
    File(SourceEntry),
    /// An entry that could not be read during the walk
    Error {
        relative_path: NormalizedPath,
        error: String,
    },
}

/// Streams regular files under a root, one directory at a time.
///
/// Entries are visited in file-name order within each directory. Symlinks
/// are not followed, and they are skipped along with sockets, FIFOs and
/// devices. Directories are descended into but never yielded.
pub struct SourceWalker {
    root: PathBuf,
    inner: walkdir::IntoIter,
    prune: Option<PathBuf>,
}

impl SourceWalker {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let inner = WalkDir::new(&root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();
        Self {
            root,
            inner,
            prune: None,
        }
    }

    /// Do not descend into `subtree`.
    ///
    /// `subtree` must be spelled with the same prefix as the walker's root.
    pub fn excluding(mut self, subtree: impl Into<PathBuf>) -> Self {
        self.prune = Some(subtree.into());
        self
    }

    fn relative(&self, path: &Path) -> NormalizedPath {
        NormalizedPath::relative(&self.root, path).unwrap_or_else(|| NormalizedPath::new("."))
    }
}

impl Iterator for SourceWalker {
    type Item = WalkItem;

    fn next(&mut self) -> Option<WalkItem> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    let relative_path = err
                        .path()
                        .map(|p| self.relative(p))
                        .unwrap_or_else(|| NormalizedPath::new("."));
                    tracing::warn!("Cannot read {}: {}", relative_path, err);
                    return Some(WalkItem::Error {
                        relative_path,
                        error: err.to_string(),
                    });
                }
            };

            if entry.depth() == 0 {
                continue;
            }

            let file_type = entry.file_type();
            if file_type.is_dir() {
                if self.prune.as_deref() == Some(entry.path()) {
                    tracing::debug!("Not descending into {}", entry.path().display());
                    self.inner.skip_current_dir();
                }
                continue;
            }
            if !file_type.is_file() {
                tracing::trace!("Skipping non-regular entry {}", entry.path().display());
                continue;
            }

            let Ok(native_relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            let native_relative = native_relative.to_path_buf();
            let relative_path = self.relative(entry.path());

            let size = match entry.metadata() {
                Ok(meta) => meta.len(),
                Err(err) => {
                    return Some(WalkItem::Error {
                        relative_path,
                        error: err.to_string(),
                    });
                }
            };

            return Some(WalkItem::File(SourceEntry {
                relative_path,
                absolute_path: entry.path().to_path_buf(),
                size,
                native_relative,
            }));
        }
    }
}
