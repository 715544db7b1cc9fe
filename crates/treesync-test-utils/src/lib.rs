//! Shared test utilities for the treesync workspace.
//!
//! This crate provides standardised source/destination fixtures so each
//! crate's tests build trees the same way. It is a dev-dependency only and
//! is never published.
//!
//! # Modules
//!
//! - [`tree`]: [`tree::SyncFixture`] with a source tree and a not-yet-created
//!   destination, plus helpers to write, read and snapshot files

pub mod tree;
