//! File reference fetching
//!
//! A [`FileReader`] turns the URL carried by a file reference into bytes.
//! Only local files are supported: `file://` URLs and bare paths. Remote
//! schemes are rejected deterministically with [`Error::UnsupportedScheme`]
//! so a bundle never silently depends on the network.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::{Error, NormalizedPath, Result, io};

/// URL prefix for explicit local files.
pub const FILE_SCHEME: &str = "file://";

/// Remote schemes that are recognised but never fetched.
const REMOTE_SCHEMES: &[&str] = &["gs://", "http://", "https://"];

/// Capability for reading the content behind a file reference URL.
pub trait FileReader: Send + Sync {
    /// Read all bytes behind `url`.
    fn read(&self, url: &str) -> Result<Vec<u8>>;
}

impl<T: FileReader + ?Sized> FileReader for &T {
    fn read(&self, url: &str) -> Result<Vec<u8>> {
        (**self).read(url)
    }
}

impl<T: FileReader + ?Sized> FileReader for Box<T> {
    fn read(&self, url: &str) -> Result<Vec<u8>> {
        (**self).read(url)
    }
}

/// Return the scheme of `url` if it has one (`gs` for `gs://bucket/x`).
pub fn url_scheme(url: &str) -> Option<&str> {
    let idx = url.find("://")?;
    let scheme = &url[..idx];
    let valid = !scheme.is_empty()
        && scheme.starts_with(|c: char| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then_some(scheme)
}

/// Strip a `file://` prefix and return the local path a URL names.
///
/// Fails with [`Error::UnsupportedScheme`] for any other scheme.
pub fn local_path(url: &str) -> Result<&str> {
    if let Some(path) = url.strip_prefix(FILE_SCHEME) {
        return Ok(path);
    }
    if let Some(remote) = REMOTE_SCHEMES.iter().find(|scheme| url.starts_with(**scheme)) {
        return Err(Error::UnsupportedScheme {
            url: url.to_string(),
            scheme: remote.trim_end_matches("://").to_string(),
        });
    }
    match url_scheme(url) {
        Some(scheme) => Err(Error::UnsupportedScheme {
            url: url.to_string(),
            scheme: scheme.to_string(),
        }),
        None => Ok(url),
    }
}

/// Reads file references from the local filesystem.
///
/// Relative paths are resolved against `root` when one is set, and against
/// the process working directory otherwise.
#[derive(Debug, Clone, Default)]
pub struct LocalFileReader {
    root: Option<NormalizedPath>,
}

impl LocalFileReader {
    /// Create a reader resolving relative paths against the working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reader resolving relative paths against `root`.
    pub fn with_root(root: impl Into<NormalizedPath>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    /// Map a URL to the path that would be read.
    pub fn resolve(&self, url: &str) -> Result<NormalizedPath> {
        let path = NormalizedPath::new(local_path(url)?);
        Ok(match &self.root {
            Some(root) if !path.is_absolute() => root.join(path.as_str()),
            _ => path,
        })
    }
}

impl FileReader for LocalFileReader {
    fn read(&self, url: &str) -> Result<Vec<u8>> {
        let path = self.resolve(url)?;
        tracing::debug!(%url, path = %path, "reading local file");
        io::read_bytes(&path)
    }
}

/// In-memory file store keyed by normalized path.
///
/// Useful for embedding bundles in a binary and for tests. URL handling
/// matches [`LocalFileReader`], so scheme errors are identical.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileReader {
    files: HashMap<NormalizedPath, Vec<u8>>,
}

impl MemoryFileReader {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file.
    pub fn insert(&mut self, path: &str, content: impl Into<Vec<u8>>) {
        self.files.insert(NormalizedPath::new(path), content.into());
    }

    /// Builder-style [`MemoryFileReader::insert`].
    pub fn with_file(mut self, path: &str, content: impl Into<Vec<u8>>) -> Self {
        self.insert(path, content);
        self
    }

    /// Number of stored files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FileReader for MemoryFileReader {
    fn read(&self, url: &str) -> Result<Vec<u8>> {
        let path = NormalizedPath::new(local_path(url)?);
        self.files
            .get(&path)
            .cloned()
            .ok_or_else(|| Error::NotFound {
                path: PathBuf::from(path.as_str()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_scheme() {
        assert_eq!(url_scheme("gs://bucket/file.yaml"), Some("gs"));
        assert_eq!(url_scheme("file:///tmp/x"), Some("file"));
        assert_eq!(url_scheme("relative/path.yaml"), None);
        assert_eq!(url_scheme("://nothing"), None);
    }

    #[test]
    fn test_local_path_strips_file_scheme() {
        assert_eq!(local_path("file:///etc/hosts").unwrap(), "/etc/hosts");
        assert_eq!(local_path("file://pods/pod.yaml").unwrap(), "pods/pod.yaml");
        assert_eq!(local_path("pods/pod.yaml").unwrap(), "pods/pod.yaml");
    }

    #[test]
    fn test_local_path_rejects_remote_prefix_only() {
        // A path that merely contains a scheme name is still local.
        assert_eq!(local_path("docs/http/page.txt").unwrap(), "docs/http/page.txt");
        assert!(matches!(
            local_path("https://example.com/a.yaml"),
            Err(Error::UnsupportedScheme { scheme, .. }) if scheme == "https"
        ));
    }

    #[test]
    fn test_memory_reader_normalizes_keys() {
        let reader = MemoryFileReader::new().with_file("a/./b.yaml", "x: 1");
        assert_eq!(reader.read("file://a/b.yaml").unwrap(), b"x: 1");
        assert_eq!(reader.len(), 1);
    }
}
