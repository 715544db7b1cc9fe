//! [`SyncFixture`] builder for replication test scenarios.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

/// A temporary workspace holding a `src/` tree and a `dst/` path.
///
/// `src/` is created up front; `dst/` is not, so tests can check that the
/// replicator creates it.
///
/// # Example
///
/// ```rust,no_run
/// use treesync_test_utils::tree::SyncFixture;
///
/// let fixture = SyncFixture::new()
///     .with_source_file("a.txt", "hello")
///     .with_source_file("sub/b.txt", "world");
/// fixture.assert_destination_missing("a.txt");
/// ```
pub struct SyncFixture {
    temp_dir: TempDir,
}

impl Default for SyncFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncFixture {
    /// Create an empty source tree and an absent destination.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("src")).unwrap();
        Self { temp_dir }
    }

    /// Root of the temporary workspace.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn source(&self) -> PathBuf {
        self.root().join("src")
    }

    pub fn destination(&self) -> PathBuf {
        self.root().join("dst")
    }

    /// Builder form of [`SyncFixture::write_source`].
    pub fn with_source_file(self, path: &str, content: impl AsRef<[u8]>) -> Self {
        self.write_source(path, content);
        self
    }

    /// Builder form of [`SyncFixture::write_destination`].
    pub fn with_destination_file(self, path: &str, content: impl AsRef<[u8]>) -> Self {
        self.write_destination(path, content);
        self
    }

    /// Write `content` to `path` (relative, `/`-separated) under `src/`.
    pub fn write_source(&self, path: &str, content: impl AsRef<[u8]>) {
        write_file(&self.source(), path, content.as_ref());
    }

    /// Write `content` to `path` (relative, `/`-separated) under `dst/`.
    pub fn write_destination(&self, path: &str, content: impl AsRef<[u8]>) {
        write_file(&self.destination(), path, content.as_ref());
    }

    /// Read a destination file.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read_destination(&self, path: &str) -> Vec<u8> {
        let full_path = resolve(&self.destination(), path);
        fs::read(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()))
    }

    /// All regular files under `src/`, keyed by relative path.
    pub fn source_snapshot(&self) -> BTreeMap<String, Vec<u8>> {
        snapshot(&self.source())
    }

    /// All regular files under `dst/`, keyed by relative path.
    pub fn destination_snapshot(&self) -> BTreeMap<String, Vec<u8>> {
        snapshot(&self.destination())
    }

    /// Assert that the destination file at `path` holds exactly `content`.
    ///
    /// # Panics
    /// Panics with a descriptive message on mismatch.
    pub fn assert_destination_eq(&self, path: &str, content: impl AsRef<[u8]>) {
        let actual = self.read_destination(path);
        assert!(
            actual == content.as_ref(),
            "Destination file {} has unexpected content.\nExpected: {:?}\nActual: {:?}",
            path,
            String::from_utf8_lossy(content.as_ref()),
            String::from_utf8_lossy(&actual)
        );
    }

    /// Assert that `path` does **not** exist under `dst/`.
    ///
    /// # Panics
    /// Panics if the path exists.
    pub fn assert_destination_missing(&self, path: &str) {
        let full_path = resolve(&self.destination(), path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }
}

/// Map every regular file under `root` to its content, keyed by
/// `/`-separated relative path. A missing root yields an empty map.
pub fn snapshot(root: &Path) -> BTreeMap<String, Vec<u8>> {
    if !root.exists() {
        return BTreeMap::new();
    }
    WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e
                .path()
                .strip_prefix(root)
                .unwrap()
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            (rel, fs::read(e.path()).unwrap())
        })
        .collect()
}

fn resolve(root: &Path, path: &str) -> PathBuf {
    path.split('/').fold(root.to_path_buf(), |acc, part| acc.join(part))
}

fn write_file(root: &Path, path: &str, content: &[u8]) {
    let full_path = resolve(root, path);
    if let Some(parent) = full_path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&full_path, content).unwrap();
}
