//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;
use treesync_core::ReplicateOptions;
use treesync_fs::NormalizedPath;

use crate::error::Result;

/// treesync - Replicate a directory tree, copying only what changed
///
/// Files missing from the destination or whose SHA-256 differs are copied.
/// Identical files are skipped. Nothing in the destination is deleted.
#[derive(Parser, Debug)]
#[command(name = "treesync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Source directory to replicate from
    #[arg(long, value_name = "PATH")]
    pub src: PathBuf,

    /// Destination directory to replicate into (created if missing)
    #[arg(long, value_name = "PATH")]
    pub dst: PathBuf,

    /// Options file (.toml, .json, .yaml or .yml)
    #[arg(long, value_name = "FILE", env = "TREESYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Number of files processed at once
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Report what would be copied without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Do not carry modification times over to copies
    #[arg(long)]
    pub no_preserve_mtime: bool,

    /// Do not carry permission bits over to copies
    #[arg(long)]
    pub no_preserve_permissions: bool,

    /// Flush every copy to disk before renaming it into place
    #[arg(long)]
    pub fsync: bool,

    /// Print the full result as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Options file values, if any, with flags applied on top.
    pub fn replicate_options(&self) -> Result<ReplicateOptions> {
        let mut options = match &self.config {
            Some(path) => ReplicateOptions::load(&NormalizedPath::new(path))?,
            None => ReplicateOptions::default(),
        };

        if let Some(workers) = self.workers {
            options.workers = workers;
        }
        if self.dry_run {
            options.dry_run = true;
        }
        if self.no_preserve_mtime {
            options.preserve_mtime = false;
        }
        if self.no_preserve_permissions {
            options.preserve_permissions = false;
        }
        if self.fsync {
            options.fsync = true;
        }

        Ok(options)
    }
}
