use std::path::Path;
use treesync_fs::NormalizedPath;

#[test]
fn test_normalize_forward_slashes() {
    let path = NormalizedPath::new("foo/bar/baz");
    assert_eq!(path.as_str(), "foo/bar/baz");
}

#[test]
fn test_normalize_backslashes_to_forward() {
    let path = NormalizedPath::new("foo\\bar\\baz");
    assert_eq!(path.as_str(), "foo/bar/baz");
}

#[test]
fn test_file_name_and_extension() {
    let path = NormalizedPath::new("foo/bar/baz.txt");
    assert_eq!(path.file_name(), Some("baz.txt"));
    assert_eq!(path.extension(), Some("txt"));
}

#[test]
fn test_dotfile_has_no_extension() {
    let path = NormalizedPath::new("dir/.hidden");
    assert_eq!(path.extension(), None);
}

#[test]
fn test_relative_strips_root() {
    let root = Path::new("/data/src");
    let file = root.join("sub").join("b.txt");
    let rel = NormalizedPath::relative(root, &file).unwrap();
    assert_eq!(rel.as_str(), "sub/b.txt");
}

#[test]
fn test_relative_of_root_itself_is_none() {
    let root = Path::new("/data/src");
    assert!(NormalizedPath::relative(root, root).is_none());
}

#[test]
fn test_relative_outside_root_is_none() {
    let root = Path::new("/data/src");
    assert!(NormalizedPath::relative(root, Path::new("/data/other/a.txt")).is_none());
}

#[test]
fn test_under_resolves_against_native_root() {
    let rel = NormalizedPath::new("sub/deeper/c.txt");
    let resolved = rel.under(Path::new("/backup"));
    assert_eq!(
        resolved,
        Path::new("/backup").join("sub").join("deeper").join("c.txt")
    );
}

#[test]
fn test_ordering_is_lexicographic() {
    let mut paths = vec![
        NormalizedPath::new("sub/b.txt"),
        NormalizedPath::new("a.txt"),
        NormalizedPath::new("sub/a.txt"),
    ];
    paths.sort();
    let strs: Vec<_> = paths.iter().map(|p| p.as_str()).collect();
    assert_eq!(strs, vec!["a.txt", "sub/a.txt", "sub/b.txt"]);
}

#[test]
fn test_serializes_as_plain_string() {
    let path = NormalizedPath::new("sub\\b.txt");
    let json = serde_json::to_string(&path).unwrap();
    assert_eq!(json, "\"sub/b.txt\"");
}

#[cfg(target_os = "linux")]
#[test]
fn test_relative_keeps_non_utf8_names_distinct() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let root = Path::new("/data/src");
    let first = root.join(OsStr::from_bytes(b"bad\xff.txt"));
    let second = root.join(OsStr::from_bytes(b"bad\xfe.txt"));

    let first = NormalizedPath::relative(root, &first).unwrap();
    let second = NormalizedPath::relative(root, &second).unwrap();

    assert_eq!(first.as_str(), "bad\\xff.txt");
    assert_eq!(second.as_str(), "bad\\xfe.txt");
    assert_ne!(first, second);
}
