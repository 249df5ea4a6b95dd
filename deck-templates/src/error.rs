//! Error types for template operations.

use thiserror::Error;

use crate::content::GenerationError;
use crate::template::AccessTier;

/// Result type for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Errors that can occur when loading or applying templates.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Unknown template id.
    #[error("Template not found: {0}")]
    NotFound(String),

    /// The caller's subscription tier does not cover this template.
    /// Surfaced distinctly so the UI can prompt an upgrade instead of
    /// showing a generic failure.
    #[error("Template requires the {required:?} tier")]
    UpgradeRequired {
        /// The tier the template demands.
        required: AccessTier,
    },

    /// Content generation failed and no fallback was possible. The engine
    /// recovers from generation failures internally, so this surfaces only
    /// from direct generator use.
    #[error("Content generation failed: {0}")]
    Generation(#[from] GenerationError),

    /// Malformed template payload, rejected before any slide is built.
    #[error("Invalid template: {0}")]
    Validation(String),
}
