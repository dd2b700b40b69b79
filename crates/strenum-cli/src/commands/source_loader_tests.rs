use std::path::PathBuf;

use strenum_lib::SourceKind;

use super::source_loader::{load_sources, load_stdin};

#[test]
fn stdin_source() {
    let map = load_stdin("package main\n".as_bytes()).unwrap();

    assert_eq!(map.len(), 1);
    let source = map.iter().next().unwrap();
    assert_eq!(source.kind, &SourceKind::Stdin);
    assert_eq!(source.content, "package main\n");
}

#[test]
fn directory_source() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.go"), "package a\n").unwrap();
    std::fs::write(dir.path().join("a_test.go"), "package a\n").unwrap();

    let map = load_sources(&[dir.path().to_path_buf()]).unwrap();

    assert_eq!(map.len(), 1);
}

#[test]
fn missing_file_reports_path() {
    let err = load_sources(&[PathBuf::from("/nonexistent/enum.go")]).unwrap_err();

    assert!(err.contains("/nonexistent/enum.go"), "{err}");
}
