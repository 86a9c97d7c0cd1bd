//! [`TestBundle`] builder for bundle test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::manifests;

/// A temporary directory holding bundle files, with helpers for setup and
/// assertion.
///
/// # Example
///
/// ```rust
/// use bundle_test_utils::bundle::TestBundle;
///
/// let bundle = TestBundle::standard();
/// bundle.assert_file_exists("kube-proxy/component.yaml");
/// assert!(bundle.entry().ends_with("bundle.yaml"));
/// ```
pub struct TestBundle {
    temp_dir: TempDir,
}

impl Default for TestBundle {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBundle {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Create a directory holding every file of the standard scenario.
    pub fn standard() -> Self {
        let bundle = Self::new();
        for (path, content) in manifests::BUNDLE_FILES {
            bundle.write(path, content);
        }
        bundle
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `path` (relative to the root).
    pub fn path(&self, path: &str) -> PathBuf {
        self.root().join(path)
    }

    /// Root path as a forward-slash string, as file references spell it.
    pub fn root_str(&self) -> String {
        self.root().to_string_lossy().replace('\\', "/")
    }

    /// Path of the standard scenario's bundle file.
    pub fn entry(&self) -> PathBuf {
        self.path("bundle.yaml")
    }

    /// Write `content` to `path` (relative to the root), creating parent
    /// directories.
    pub fn write(&self, path: &str, content: impl AsRef<[u8]>) -> &Self {
        let full_path = self.path(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
        self
    }

    /// Read the file at `path` (relative to the root).
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read(&self, path: &str) -> String {
        let full_path = self.path(path);
        fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()))
    }

    /// Assert that `path` (relative to the root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.path(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `path` (relative to root) contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, path: &str, content: &str) {
        let file_content = self.read(path);
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            path,
            content,
            file_content
        );
    }
}
