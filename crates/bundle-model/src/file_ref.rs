//! References to externally stored content

use std::fmt;

use bundle_fs::{FILE_SCHEME, NormalizedPath, local_path};
use serde::{Deserialize, Serialize};

/// A reference to a file whose content is inlined during resolution.
///
/// `url` is a bare path or a `file://` URL. Relative paths are relative to
/// the file that declared the reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FileRef {
    pub url: String,

    /// Optional `sha256:<hex>` checksum of the referenced content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

impl FileRef {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            hash: None,
        }
    }

    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = Some(hash.into());
        self
    }

    /// The local path this reference names, or `None` for remote URLs.
    pub fn path(&self) -> Option<NormalizedPath> {
        local_path(&self.url).ok().map(NormalizedPath::new)
    }

    /// Base name of the referenced file (`foo.txt` for `dir/foo.txt`).
    ///
    /// Falls back to the last URL segment for remote URLs.
    pub fn base_name(&self) -> &str {
        let trimmed = self.url.trim_end_matches('/');
        trimmed.rsplit('/').next().unwrap_or(trimmed)
    }

    /// Whether the reference is a local path relative to its declaring file.
    pub fn is_relative(&self) -> bool {
        self.path().is_some_and(|path| !path.is_absolute())
    }

    /// Directory containing the referenced file, if it has one.
    pub fn dir(&self) -> Option<NormalizedPath> {
        self.path()?.parent()
    }

    /// Re-express a relative reference as relative to `dir`.
    ///
    /// Absolute paths and non-file URLs are returned unchanged. A `file://`
    /// prefix is preserved.
    pub fn relative_to(&self, dir: &NormalizedPath) -> Self {
        if !self.is_relative() {
            return self.clone();
        }
        let (prefix, path) = match self.url.strip_prefix(FILE_SCHEME) {
            Some(rest) => (FILE_SCHEME, rest),
            None => ("", self.url.as_str()),
        };
        Self {
            url: format!("{prefix}{}", dir.join(path)),
            hash: self.hash.clone(),
        }
    }
}

impl fmt::Display for FileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl From<&str> for FileRef {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("pod.yaml", "comps/etcd", "comps/etcd/pod.yaml")]
    #[case("../shared/pod.yaml", "comps/etcd", "comps/shared/pod.yaml")]
    #[case("file://pod.yaml", "comps/etcd", "file://comps/etcd/pod.yaml")]
    #[case("/abs/pod.yaml", "comps/etcd", "/abs/pod.yaml")]
    #[case("file:///abs/pod.yaml", "comps/etcd", "file:///abs/pod.yaml")]
    #[case("gs://bucket/pod.yaml", "comps/etcd", "gs://bucket/pod.yaml")]
    fn test_relative_to(#[case] url: &str, #[case] dir: &str, #[case] expected: &str) {
        let rebased = FileRef::new(url).relative_to(&NormalizedPath::new(dir));
        assert_eq!(rebased.url, expected);
    }

    #[test]
    fn test_relative_to_keeps_hash() {
        let file = FileRef::new("a.yaml").with_hash("sha256:00");
        let rebased = file.relative_to(&NormalizedPath::new("dir"));
        assert_eq!(rebased.hash.as_deref(), Some("sha256:00"));
    }

    #[test]
    fn test_base_name() {
        assert_eq!(FileRef::new("file://dir/foo.txt").base_name(), "foo.txt");
        assert_eq!(FileRef::new("foo.txt").base_name(), "foo.txt");
    }

    #[test]
    fn test_dir() {
        assert_eq!(FileRef::new("a/b/c.yaml").dir().unwrap().as_str(), "a/b");
        assert!(FileRef::new("c.yaml").dir().is_none());
        assert!(FileRef::new("https://x/c.yaml").dir().is_none());
    }
}
