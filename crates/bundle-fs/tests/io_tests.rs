use bundle_fs::{Error, NormalizedPath, io};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_write_atomic_creates_file() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("bundle.yaml"));

    io::write_atomic(&path, b"kind: Bundle\n").unwrap();

    let content = fs::read_to_string(path.to_native()).unwrap();
    assert_eq!(content, "kind: Bundle\n");
}

#[test]
fn test_write_atomic_overwrites_existing() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("bundle.yaml");
    fs::write(&file_path, "original").unwrap();

    let path = NormalizedPath::new(&file_path);
    io::write_atomic(&path, b"updated").unwrap();

    assert_eq!(fs::read_to_string(&file_path).unwrap(), "updated");
}

#[test]
fn test_write_atomic_creates_parent_directories() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("out").join("nested").join("bundle.yaml"));

    io::write_atomic(&path, b"deep content").unwrap();

    assert_eq!(io::read_bytes(&path).unwrap(), b"deep content".to_vec());
}

#[test]
fn test_write_atomic_leaves_no_temp_files() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("target.yaml"));

    io::write_atomic(&path, b"content").unwrap();

    let leftovers: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "temp files remain: {leftovers:?}");
}

#[test]
fn test_read_bytes_existing_file() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("raw.bin");
    fs::write(&file_path, [0u8, 159, 146, 150]).unwrap();

    let bytes = io::read_bytes(&NormalizedPath::new(&file_path)).unwrap();
    assert_eq!(bytes, vec![0u8, 159, 146, 150]);
}

#[test]
fn test_read_bytes_missing_file_is_not_found() {
    let temp = TempDir::new().unwrap();
    let err = io::read_bytes(&NormalizedPath::new(temp.path().join("absent.yaml"))).unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }), "got {err:?}");
}
