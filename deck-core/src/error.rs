//! Error types for slide composition operations.

use thiserror::Error;

/// Result type for slide composition operations.
pub type DeckResult<T> = Result<T, DeckError>;

/// Errors that can occur in slide composition operations.
#[derive(Debug, Error)]
pub enum DeckError {
    /// Element not found in slide.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Slide not found in store.
    #[error("Slide not found: {0}")]
    SlideNotFound(String),

    /// Malformed element or slide payload, rejected before mutation.
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// Slide serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
