//! The AI content-generation collaborator.
//!
//! Generation is an external service: the engine calls it through the
//! [`ContentGenerator`] trait under a bounded timeout and treats every
//! failure as recoverable. A slide is never lost to a generation outage.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Content generation failure.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct GenerationError(pub String);

/// Request shape for the content-generation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Template category, e.g. `"traction"`.
    pub template_category: String,
    /// Template display name.
    pub template_name: String,
    /// The project's business profile context.
    pub business_profile: serde_json::Value,
    /// Content already present, for the service to extend rather than
    /// overwrite.
    pub existing_content: serde_json::Value,
    /// Media asset URLs available for image slots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_media: Option<Vec<String>>,
    /// How many image slots the template carries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_image_count: Option<u32>,
}

/// External collaborator that synthesizes slide content from business data.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Generate a content object shaped to the template's config fields.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] when the service is unavailable or
    /// returns an unusable payload. Callers recover via placeholder
    /// fallback; this error never aborts slide creation.
    async fn generate(&self, request: &GenerationRequest)
        -> Result<serde_json::Value, GenerationError>;
}

/// A generator that is never available. Used when no content service is
/// configured; the engine's fallback path supplies the content.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableGenerator;

#[async_trait]
impl ContentGenerator for UnavailableGenerator {
    async fn generate(
        &self,
        _request: &GenerationRequest,
    ) -> Result<serde_json::Value, GenerationError> {
        Err(GenerationError("no content service configured".to_string()))
    }
}

/// Whether caller-supplied content is meaningful: an object with at least
/// one value that is a non-empty string (after trimming) or a non-empty
/// array. Distinguishes "user supplied real content" from an empty
/// placeholder object.
#[must_use]
pub fn meaningful(content: &serde_json::Value) -> bool {
    let serde_json::Value::Object(map) = content else {
        return false;
    };
    map.values().any(|value| match value {
        serde_json::Value::String(s) => !s.trim().is_empty(),
        serde_json::Value::Array(items) => !items.is_empty(),
        _ => false,
    })
}
