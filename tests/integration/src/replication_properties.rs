//! Property tests for replication over randomly generated trees

use proptest::prelude::*;
use std::collections::BTreeMap;
use treesync_core::{Outcome, ReplicateOptions, TreeReplicator, replicate};
use treesync_test_utils::tree::SyncFixture;

/// Relative paths with contents, free of file/directory clashes.
fn tree() -> impl Strategy<Value = BTreeMap<String, Vec<u8>>> {
    proptest::collection::btree_map(
        proptest::collection::vec("[a-z]{1,6}", 1..4).prop_map(|segments| segments.join("/")),
        proptest::collection::vec(any::<u8>(), 0..256),
        1..16,
    )
    .prop_map(drop_clashes)
}

/// Remove files whose path is also used as a directory by another file.
fn drop_clashes(mut files: BTreeMap<String, Vec<u8>>) -> BTreeMap<String, Vec<u8>> {
    let clashing: Vec<String> = files
        .keys()
        .filter(|path| {
            let prefix = format!("{}/", path);
            files.keys().any(|other| other.starts_with(&prefix))
        })
        .cloned()
        .collect();
    for path in clashing {
        files.remove(&path);
    }
    files
}

fn populate(fixture: &SyncFixture, files: &BTreeMap<String, Vec<u8>>) {
    for (path, content) in files {
        fixture.write_source(path, content);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn first_run_copies_every_file(files in tree()) {
        let fixture = SyncFixture::new();
        populate(&fixture, &files);

        let result = replicate(&fixture.source(), &fixture.destination()).unwrap();

        prop_assert_eq!(result.copied, files.len());
        prop_assert_eq!(result.total(), files.len());
        prop_assert_eq!(fixture.destination_snapshot(), files);
    }

    #[test]
    fn second_run_copies_nothing(files in tree()) {
        let fixture = SyncFixture::new();
        populate(&fixture, &files);

        replicate(&fixture.source(), &fixture.destination()).unwrap();
        let second = replicate(&fixture.source(), &fixture.destination()).unwrap();

        prop_assert_eq!(second.copied, 0);
        prop_assert_eq!(second.skipped, files.len());
        prop_assert_eq!(second.failed, 0);
    }

    #[test]
    fn destination_only_files_survive(files in tree(), extra in tree()) {
        let fixture = SyncFixture::new();
        populate(&fixture, &files);
        for (path, content) in &extra {
            fixture.write_destination(&format!("only-in-destination/{}", path), content);
        }

        replicate(&fixture.source(), &fixture.destination()).unwrap();

        for (path, content) in &extra {
            let kept = fixture.read_destination(&format!("only-in-destination/{}", path));
            prop_assert_eq!(&kept, content);
        }
    }

    #[test]
    fn only_changed_files_are_recopied(
        files in tree(),
        change_mask in proptest::collection::vec(any::<bool>(), 16),
    ) {
        let fixture = SyncFixture::new();
        populate(&fixture, &files);
        replicate(&fixture.source(), &fixture.destination()).unwrap();

        let mut changed = Vec::new();
        for ((path, content), change) in files.iter().zip(&change_mask) {
            if *change {
                let mut updated = content.clone();
                updated.push(0xAA);
                fixture.write_source(path, &updated);
                changed.push(path.clone());
            }
        }

        let result = replicate(&fixture.source(), &fixture.destination()).unwrap();

        prop_assert_eq!(result.copied, changed.len());
        prop_assert_eq!(result.skipped, files.len() - changed.len());
        for path in &changed {
            prop_assert_eq!(
                result.outcome_for(path).map(|o| o.outcome),
                Some(Outcome::Copied)
            );
        }
        prop_assert_eq!(fixture.destination_snapshot(), fixture.source_snapshot());
    }

    #[test]
    fn parallel_matches_sequential(files in tree(), workers in 2usize..8) {
        let sequential_fixture = SyncFixture::new();
        let parallel_fixture = SyncFixture::new();
        populate(&sequential_fixture, &files);
        populate(&parallel_fixture, &files);

        let sequential = replicate(
            &sequential_fixture.source(),
            &sequential_fixture.destination(),
        )
        .unwrap();
        let parallel = TreeReplicator::with_options(ReplicateOptions {
            workers,
            ..Default::default()
        })
        .replicate(&parallel_fixture.source(), &parallel_fixture.destination())
        .unwrap();

        prop_assert_eq!(parallel, sequential);
        prop_assert_eq!(
            parallel_fixture.destination_snapshot(),
            sequential_fixture.destination_snapshot()
        );
    }
}
