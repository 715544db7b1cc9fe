//! End-to-end scenarios across treesync-fs and treesync-core
//!
//! These drive the library the way the CLI does: options loaded from a
//! config file, a replicator built from them, and the result inspected.

use pretty_assertions::assert_eq;
use std::fs;
use treesync_core::{Error, Outcome, ReplicateOptions, TreeReplicator, replicate};
use treesync_fs::{NormalizedPath, compute_file_checksum};
use treesync_test_utils::tree::SyncFixture;

#[test]
fn test_initial_sync_then_edit_then_resync() {
    let fixture = SyncFixture::new()
        .with_source_file("a.txt", "hello")
        .with_source_file("sub/b.txt", "world");

    // Empty destination: both files are copied
    let first = replicate(&fixture.source(), &fixture.destination()).unwrap();
    assert_eq!((first.copied, first.skipped), (2, 0));
    fixture.assert_destination_eq("a.txt", "hello");
    fixture.assert_destination_eq("sub/b.txt", "world");

    // Unchanged: both skipped
    let second = replicate(&fixture.source(), &fixture.destination()).unwrap();
    assert_eq!((second.copied, second.skipped), (0, 2));

    // One file edited: only it is copied
    fixture.write_source("a.txt", "HELLO");
    let third = replicate(&fixture.source(), &fixture.destination()).unwrap();
    assert_eq!((third.copied, third.skipped), (1, 1));
    assert_eq!(third.outcome_for("a.txt").unwrap().outcome, Outcome::Copied);
    assert_eq!(third.outcome_for("sub/b.txt").unwrap().outcome, Outcome::Skipped);
    fixture.assert_destination_eq("a.txt", "HELLO");
}

#[test]
fn test_checksums_agree_after_sync() {
    let fixture = SyncFixture::new()
        .with_source_file("data/blob.bin", vec![7u8; 100_000])
        .with_source_file("readme.md", "# readme");

    replicate(&fixture.source(), &fixture.destination()).unwrap();

    for path in ["data/blob.bin", "readme.md"] {
        let relative = NormalizedPath::new(path);
        assert_eq!(
            compute_file_checksum(&relative.under(&fixture.source())).unwrap(),
            compute_file_checksum(&relative.under(&fixture.destination())).unwrap()
        );
    }
}

#[test]
fn test_options_from_config_file_drive_the_run() {
    let fixture = SyncFixture::new()
        .with_source_file("a.txt", "a")
        .with_source_file("b.txt", "b");
    let config = fixture.root().join("treesync.json");
    fs::write(&config, r#"{ "workers": 2, "dry_run": true }"#).unwrap();

    let options = ReplicateOptions::load(&NormalizedPath::new(&config)).unwrap();
    let result = TreeReplicator::with_options(options)
        .replicate(&fixture.source(), &fixture.destination())
        .unwrap();

    assert!(result.dry_run);
    assert_eq!(result.copied, 2);
    assert!(!fixture.destination().exists());
}

#[test]
fn test_invalid_config_file_is_rejected_before_running() {
    let fixture = SyncFixture::new();
    let config = fixture.root().join("treesync.yaml");
    fs::write(&config, "workers: 0\n").unwrap();

    let err = ReplicateOptions::load(&NormalizedPath::new(&config)).unwrap_err();

    assert!(matches!(err, Error::InvalidOptions { .. }));
}

#[test]
fn test_missing_source_leaves_no_trace() {
    let fixture = SyncFixture::new();

    let err = replicate(&fixture.root().join("nope"), &fixture.destination()).unwrap_err();

    assert!(matches!(err, Error::SourceNotFound { .. }));
    assert!(!fixture.destination().exists());
}

#[test]
fn test_result_serializes_for_reporting() {
    let fixture = SyncFixture::new()
        .with_source_file("a.txt", "a")
        .with_destination_file("a.txt", "a")
        .with_source_file("b.txt", "b");

    let result = replicate(&fixture.source(), &fixture.destination()).unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "copied": 1,
            "skipped": 1,
            "failed": 0,
            "dry_run": false,
            "cancelled": false,
            "outcomes": [
                { "relative_path": "a.txt", "outcome": "skipped" },
                { "relative_path": "b.txt", "outcome": "copied" }
            ]
        })
    );
}
