//! Scratch File Fixture Tests
//!
//! End-to-end behavior of the ephemeral file provider as a consuming test
//! would see it: an empty file on entry, unconditional cleanup on exit.

use autoload::testkit::ScratchFile;
use std::fs;

#[test]
fn test_consumer_receives_empty_file_then_cleanup_runs() {
    let scratch = ScratchFile::acquire().unwrap();
    let dir = scratch.dir().to_path_buf();

    // Empty on entry
    assert_eq!(fs::read_to_string(scratch.path()).unwrap(), "");

    // The consumer is free to write; teardown is unconditional
    fs::write(scratch.path(), b"ten bytes.").unwrap();
    assert_eq!(fs::metadata(scratch.path()).unwrap().len(), 10);

    drop(scratch);
    assert!(!dir.exists());
}

#[test]
fn test_concurrent_acquisitions_never_share_a_directory() {
    let guards: Vec<ScratchFile> = (0..4)
        .map(|_| ScratchFile::acquire().unwrap())
        .collect();

    for (i, a) in guards.iter().enumerate() {
        assert!(a.path().exists());
        for b in guards.iter().skip(i + 1) {
            assert_ne!(a.dir(), b.dir());
        }
    }
}

#[test]
fn test_cleanup_runs_when_consumer_panics() {
    let scratch = ScratchFile::acquire().unwrap();
    let dir = scratch.dir().to_path_buf();

    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
        let _guard = scratch;
        assert_eq!(1 + 1, 3, "forced assertion failure");
    }));

    assert!(outcome.is_err());
    assert!(!dir.exists());
}

#[test]
fn test_explicit_close_surfaces_teardown_result() {
    let scratch = ScratchFile::acquire().unwrap();
    let dir = scratch.dir().to_path_buf();

    scratch.close().expect("teardown should report success");
    assert!(!dir.exists());
}
