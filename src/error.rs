//! Unified error types for the gallery application.

use thiserror::Error;

/// Input rejected before any state is touched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a description")]
    EmptyPrompt,
    #[error("Collection name must not be empty")]
    EmptyCollectionName,
}

/// Failures of the remote generation call.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Another generation request is still outstanding.
    #[error("A generation is already in progress")]
    InFlight,
    /// The agent answered but produced no artifact.
    #[error("No image was generated")]
    NoImageProduced,
    /// The agent reported a failure of its own.
    #[error("Agent error: {0}")]
    Agent(String),
    #[error("Failed to reach the generation agent: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Malformed agent response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

/// Failures of the durable key-value store.
///
/// Never reaches the user: the store is optional and its failures are logged.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures while fetching and saving an image to disk.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Failed to fetch image: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to fetch image: HTTP {0}")]
    Status(u16),
    #[error("Failed to write image: {0}")]
    Io(#[from] std::io::Error),
}

/// Application-specific errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Download(#[from] DownloadError),
    #[error("No {kind} with id {id}")]
    NotFound { kind: &'static str, id: String },
}

impl AppError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        AppError::NotFound {
            kind,
            id: id.into(),
        }
    }
}

/// Type alias for Results in this application.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_user_readable() {
        let err: AppError = ValidationError::EmptyPrompt.into();
        assert_eq!(err.to_string(), "Please enter a description");

        let err: AppError = GenerationError::NoImageProduced.into();
        assert_eq!(err.to_string(), "No image was generated");

        let err = AppError::not_found("collection", "c-1");
        assert_eq!(err.to_string(), "No collection with id c-1");
    }
}
