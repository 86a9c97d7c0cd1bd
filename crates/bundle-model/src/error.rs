//! Error types for bundle-model

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required field is missing or empty.
    #[error("Structural error: {message}")]
    Structural { message: String },

    #[error("Invalid requirements object in component {component:?}: {message}")]
    InvalidRequirements { component: String, message: String },
}

impl Error {
    pub fn structural(message: impl Into<String>) -> Self {
        Self::Structural {
            message: message.into(),
        }
    }
}
