//! Atomic copy and directory operations

use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::Path;

use crate::checksum::CHUNK_SIZE;
use crate::{Error, Result};

/// Knobs for [`copy_atomic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyOptions {
    /// Carry the source modification time over to the copy.
    pub preserve_mtime: bool,
    /// Carry the source permission bits over to the copy.
    pub preserve_permissions: bool,
    /// Flush the temp file to disk before it is renamed into place.
    pub fsync: bool,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            preserve_mtime: true,
            preserve_permissions: true,
            fsync: false,
        }
    }
}

/// What currently sits at a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathState {
    Missing,
    File,
    /// A directory or other non-regular entry.
    Other,
}

/// Inspect `path`, following symlinks.
pub fn probe(path: &Path) -> Result<PathState> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(PathState::File),
        Ok(_) => Ok(PathState::Other),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(PathState::Missing),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Create `dir` and all missing parents.
///
/// A directory that already exists, including one created concurrently by
/// another worker, counts as success. An existing non-directory does not.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    match fs::create_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::AlreadyExists && dir.is_dir() => Ok(()),
        Err(e) => Err(Error::io(dir, e)),
    }
}

/// Prefix of in-flight copies in a destination directory.
pub const TEMP_PREFIX: &str = ".treesync.";

/// Copy `source` to `dest` with all-or-nothing semantics.
///
/// Contents are streamed into a temp file in the destination directory (same
/// filesystem), which is then renamed over `dest`. If anything fails the temp
/// file is removed and an existing `dest` is left as it was. Timestamp and
/// permission preservation are best effort and never fail the copy.
///
/// Returns the number of bytes copied.
pub fn copy_atomic(source: &Path, dest: &Path, options: CopyOptions) -> Result<u64> {
    let mut src_file = File::open(source).map_err(|e| Error::io(source, e))?;
    let metadata = src_file.metadata().map_err(|e| Error::io(source, e))?;
    if !metadata.is_file() {
        return Err(Error::NotAFile {
            path: source.to_path_buf(),
        });
    }

    let parent = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    ensure_dir(parent)?;

    // Fixed short name: the destination name may already be at NAME_MAX
    let mut temp = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(".tmp")
        .tempfile_in(parent)
        .map_err(|e| Error::io(parent, e))?;

    let mut copied: u64 = 0;
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let n = match src_file.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::io(source, e)),
        };
        temp.write_all(&buf[..n])
            .map_err(|e| Error::io(temp.path(), e))?;
        copied += n as u64;
    }

    if options.preserve_mtime {
        let applied = metadata
            .modified()
            .and_then(|mtime| temp.as_file().set_modified(mtime));
        if let Err(e) = applied {
            tracing::debug!("Could not preserve mtime for {}: {}", dest.display(), e);
        }
    }

    if options.fsync {
        temp.as_file()
            .sync_all()
            .map_err(|e| Error::io(temp.path(), e))?;
    }

    if options.preserve_permissions
        && let Err(e) = temp.as_file().set_permissions(metadata.permissions())
    {
        tracing::debug!(
            "Could not preserve permissions for {}: {}",
            dest.display(),
            e
        );
    }

    temp.persist(dest).map_err(|e| Error::io(dest, e.error))?;

    Ok(copied)
}

/// Read text content from a file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}
