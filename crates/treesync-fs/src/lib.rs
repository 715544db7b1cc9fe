//! Filesystem layer for treesync
//!
//! Provides slash-normalized relative paths, streamed SHA-256 checksums,
//! all-or-nothing file copies, and format-agnostic config loading.

pub mod checksum;
pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use checksum::{CHUNK_SIZE, compute_file_checksum, compute_reader_checksum};
pub use config::ConfigStore;
pub use error::{Error, Result};
pub use io::CopyOptions;
pub use path::NormalizedPath;
