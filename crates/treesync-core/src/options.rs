//! Replication options and their config-file form

use serde::{Deserialize, Serialize};
use treesync_fs::{ConfigStore, CopyOptions, NormalizedPath};

use crate::{Error, Result};

/// Options controlling a replication run.
///
/// Every field has a default, so a config file only needs to name the
/// settings it changes:
///
/// ```toml
/// workers = 4
/// preserve_permissions = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReplicateOptions {
    /// Number of files processed at once; 1 runs sequentially.
    pub workers: usize,
    /// Carry source modification times over to copies.
    pub preserve_mtime: bool,
    /// Carry source permission bits over to copies.
    pub preserve_permissions: bool,
    /// Flush each copy to disk before renaming it into place.
    pub fsync: bool,
    /// Decide what would happen without writing anything.
    pub dry_run: bool,
}

impl Default for ReplicateOptions {
    fn default() -> Self {
        Self {
            workers: 1,
            preserve_mtime: true,
            preserve_permissions: true,
            fsync: false,
            dry_run: false,
        }
    }
}

impl ReplicateOptions {
    /// Load options from a `.toml`, `.json` or `.yaml` file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// options it holds are invalid.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let options: Self = ConfigStore::new().load(path)?;
        options.validate()?;
        Ok(options)
    }

    /// Reject option combinations that cannot run.
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(Error::InvalidOptions {
                message: "workers must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// The per-file copy settings implied by these options.
    pub fn copy_options(&self) -> CopyOptions {
        CopyOptions {
            preserve_mtime: self.preserve_mtime,
            preserve_permissions: self.preserve_permissions,
            fsync: self.fsync,
        }
    }
}
