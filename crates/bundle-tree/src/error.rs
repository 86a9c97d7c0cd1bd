//! Error types for bundle-tree

/// Result type for bundle-tree operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in bundle-tree operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to decode {format} content: {message}")]
    Decode { format: String, message: String },

    #[error("Failed to encode {format} content: {message}")]
    Encode { format: String, message: String },

    #[error("Unsupported format: {0:?}")]
    UnsupportedFormat(String),
}

impl Error {
    pub fn decode(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            format: format.into(),
            message: message.into(),
        }
    }

    pub fn encode(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Encode {
            format: format.into(),
            message: message.into(),
        }
    }
}
