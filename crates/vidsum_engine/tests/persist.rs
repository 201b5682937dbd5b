use std::fs;

use vidsum_engine::{ensure_output_dir, AtomicFileWriter, PersistError};
use tempfile::TempDir;

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("thumbnails");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn atomic_write_replaces_existing_image() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().join("thumbnails"));

    let first = writer
        .write("youtube-thumbnail-abc123.jpg", &[1, 2, 3])
        .unwrap();
    assert_eq!(first.file_name().unwrap(), "youtube-thumbnail-abc123.jpg");
    assert_eq!(fs::read(&first).unwrap(), vec![1, 2, 3]);

    let second = writer
        .write("youtube-thumbnail-abc123.jpg", &[4, 5])
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read(&second).unwrap(), vec![4, 5]);
}

#[test]
fn no_partial_file_on_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    let result = writer.write("thumb.jpg", b"data");
    assert!(result.is_err());
    assert!(!file_path.with_file_name("thumb.jpg").exists());
}

#[test]
fn rejects_names_that_escape_the_directory() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    for name in ["", "..", "../evil.jpg", "sub/dir.jpg", "a\\b.jpg"] {
        match writer.write(name, b"x") {
            Err(PersistError::InvalidFileName(rejected)) => assert_eq!(rejected, name),
            other => panic!("expected rejection for {name:?}, got {other:?}"),
        }
    }
}
