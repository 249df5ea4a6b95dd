//! Error types for rendering operations.

use thiserror::Error;

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// An export was requested with no pages.
    #[error("Export requires at least one slide")]
    EmptyExport,

    /// Serialization of render output failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
