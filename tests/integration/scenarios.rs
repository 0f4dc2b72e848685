//! End-to-end replacement scenarios against real files.

use fastreplace::{replace_in_file, ReplaceError, ReplaceOutcome, Replacement};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixture(content: &[u8]) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("artifact.bin");
    fs::write(&file, content).unwrap();
    (dir, file)
}

#[test]
fn test_same_length_replacement() {
    let (_dir, file) = fixture(b"foo/bar/foo/bar");

    let outcome = replace_in_file(&file, b"foo", b"qux").unwrap();

    assert_eq!(outcome.matches(), 2);
    assert_eq!(fs::read(&file).unwrap(), b"qux/bar/qux/bar");
}

#[test]
fn test_shrinking_replacement() {
    let (_dir, file) = fixture(b"aaaa");

    let outcome = replace_in_file(&file, b"aa", b"b").unwrap();

    assert_eq!(outcome.matches(), 2);
    assert_eq!(fs::read(&file).unwrap(), b"bb");
}

#[test]
fn test_growing_replacement_length() {
    let content = b"prefix=/esy/3/i/pkg-1.0\0rpath=/esy/3/i/pkg-1.0/lib\0";
    let (_dir, file) = fixture(content);
    let search = b"/esy/3/i";
    let replace = b"/home/user/.esy/3_______________/i";

    let outcome = replace_in_file(&file, search, replace).unwrap();

    let expected_len = content.len() + 2 * (replace.len() - search.len());
    match outcome {
        ReplaceOutcome::Applied {
            matches,
            original_len,
            new_len,
            ..
        } => {
            assert_eq!(matches, 2);
            assert_eq!(original_len, content.len());
            assert_eq!(new_len, expected_len);
        }
        other => panic!("expected Applied, got {:?}", other),
    }
    assert_eq!(fs::read(&file).unwrap().len(), expected_len);
}

#[test]
fn test_pattern_longer_than_file() {
    let (_dir, file) = fixture(b"ab");

    let outcome = replace_in_file(&file, b"abc", b"x").unwrap();

    assert!(matches!(outcome, ReplaceOutcome::NoMatch { .. }));
    assert_eq!(fs::read(&file).unwrap(), b"ab");
}

#[test]
fn test_no_match_is_idempotent() {
    let (_dir, file) = fixture(b"nothing to relocate here");
    let before = fs::metadata(&file).unwrap().modified().unwrap();

    for _ in 0..3 {
        let outcome = replace_in_file(&file, b"/old/prefix", b"/new/prefix").unwrap();
        assert_eq!(outcome.matches(), 0);
    }

    assert_eq!(fs::read(&file).unwrap(), b"nothing to relocate here");
    assert_eq!(fs::metadata(&file).unwrap().modified().unwrap(), before);
}

#[test]
fn test_empty_file() {
    let (_dir, file) = fixture(b"");

    let outcome = replace_in_file(&file, b"x", b"y").unwrap();

    assert_eq!(outcome.matches(), 0);
    assert!(fs::read(&file).unwrap().is_empty());
}

#[test]
fn test_binary_content_with_nul_and_high_bytes() {
    let content = [0x7f, b'E', b'L', b'F', 0x00, 0xff, b'/', b'a', 0x00, b'/', b'a', 0xfe];
    let (_dir, file) = fixture(&content);

    replace_in_file(&file, b"/a", b"/bb").unwrap();

    assert_eq!(
        fs::read(&file).unwrap(),
        vec![0x7f, b'E', b'L', b'F', 0x00, 0xff, b'/', b'b', b'b', 0x00, b'/', b'b', b'b', 0xfe]
    );
}

#[test]
fn test_replacement_with_empty_bytes_deletes() {
    let (_dir, file) = fixture(b"a-b-c-d");

    let outcome = replace_in_file(&file, b"-", b"").unwrap();

    assert_eq!(outcome.matches(), 3);
    assert_eq!(fs::read(&file).unwrap(), b"abcd");
}

#[test]
fn test_rewrite_result_not_rescanned() {
    // Replacement contains the pattern; a single pass must not recurse.
    let (_dir, file) = fixture(b"x.x");

    let outcome = replace_in_file(&file, b"x", b"xx").unwrap();

    assert_eq!(outcome.matches(), 2);
    assert_eq!(fs::read(&file).unwrap(), b"xx.xx");
}

#[test]
fn test_empty_pattern_is_invalid_argument() {
    let (_dir, file) = fixture(b"unchanged");

    let result = replace_in_file(&file, b"", b"x");

    assert!(matches!(result, Err(ReplaceError::InvalidArgument(_))));
    assert_eq!(fs::read(&file).unwrap(), b"unchanged");
}

#[test]
fn test_missing_file_is_not_found() {
    let dir = TempDir::new().unwrap();

    let result = replace_in_file(dir.path().join("nope"), b"a", b"b");

    assert!(matches!(result, Err(ReplaceError::NotFound { .. })));
    assert!(!dir.path().join("nope").exists());
}

#[test]
fn test_replacement_struct_reusable() {
    let (_dir, file) = fixture(b"v1 v1 v1");
    let job = Replacement::new(&file, b"v1".to_vec(), b"v2".to_vec()).unwrap();

    assert_eq!(job.apply().unwrap().matches(), 3);
    // Second run finds nothing left to replace.
    assert_eq!(job.apply().unwrap().matches(), 0);
    assert_eq!(fs::read(&file).unwrap(), b"v2 v2 v2");
}

#[test]
#[cfg(unix)]
fn test_symlink_target_is_rewritten() {
    use std::os::unix::fs::symlink;

    let (dir, real) = fixture(b"path=/old");
    let link = dir.path().join("link.bin");
    symlink(&real, &link).unwrap();

    replace_in_file(&link, b"/old", b"/new").unwrap();

    assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    assert_eq!(fs::read(&real).unwrap(), b"path=/new");
}
