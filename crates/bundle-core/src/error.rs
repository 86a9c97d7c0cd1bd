//! Error types for bundle-core

/// Result type for bundle-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving or querying bundles
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Fetched content could not be decoded
    #[error("Failed to decode {url} in {component:?}: {source}")]
    Decode {
        component: String,
        url: String,
        #[source]
        source: bundle_tree::Error,
    },

    /// A file reference could not be fetched
    #[error("Cannot resolve {url} in {component:?}: {source}")]
    UnresolvedReference {
        component: String,
        url: String,
        #[source]
        source: bundle_fs::Error,
    },

    /// Fetched content does not match the pinned checksum
    #[error("Checksum mismatch for {url} in {component:?}: expected {expected}, got {actual}")]
    HashMismatch {
        component: String,
        url: String,
        expected: String,
        actual: String,
    },

    /// A lookup matched more than one candidate
    #[error("Ambiguous match for {what}: {count} candidates")]
    AmbiguousMatch { what: String, count: usize },

    /// A lookup matched nothing
    #[error("Not found: {what}")]
    NotFound { what: String },

    /// Resolution was cancelled before fetching `url`
    #[error("Resolution cancelled before fetching {url}")]
    Cancelled { url: String },

    /// The resolution deadline passed before fetching `url`
    #[error("Resolution deadline exceeded before fetching {url}")]
    DeadlineExceeded { url: String },

    /// Structural error from bundle-model
    #[error(transparent)]
    Model(#[from] bundle_model::Error),

    /// Filesystem error from bundle-fs
    #[error(transparent)]
    Fs(#[from] bundle_fs::Error),

    /// Codec error from bundle-tree
    #[error(transparent)]
    Tree(#[from] bundle_tree::Error),
}

impl Error {
    /// Whether the error is a failed fetch of a file reference.
    pub fn is_unresolved_reference(&self) -> bool {
        matches!(self, Self::UnresolvedReference { .. })
    }

    /// Whether resolution stopped because of cancellation or a deadline.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. } | Self::DeadlineExceeded { .. })
    }
}
