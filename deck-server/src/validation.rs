//! Input validation for untrusted data.
//!
//! All user-supplied slide payloads MUST be validated before they mutate
//! the store. A payload that fails here is rejected with 422 and the stored
//! document is untouched.

use thiserror::Error;

use deck_core::element::Dimension;
use deck_core::schema::SlideDocument;

/// Maximum elements per slide.
pub const MAX_ELEMENTS_PER_SLIDE: usize = 500;
/// Maximum text content length in elements.
pub const MAX_TEXT_CONTENT_LEN: usize = 10_000;
/// Maximum length for id strings (UUIDs are 36 chars).
pub const MAX_ID_LEN: usize = 64;
/// Maximum slides per export request.
pub const MAX_SLIDES_PER_EXPORT: usize = 100;

/// Validation error types.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Too many elements in one slide.
    #[error("too many elements (max {MAX_ELEMENTS_PER_SLIDE})")]
    TooManyElements,
    /// Text content exceeds maximum length.
    #[error("text content too long (max {MAX_TEXT_CONTENT_LEN} bytes)")]
    TextContentTooLong,
    /// Id exceeds maximum length or contains invalid characters.
    #[error("invalid id: {0}")]
    InvalidId(String),
    /// Position or size is not a finite number.
    #[error("non-finite coordinate on element {0}")]
    NonFiniteCoordinate(String),
    /// `auto` sizing on a variant that does not support it.
    #[error("auto size is not valid for {0} elements")]
    AutoSizeUnsupported(&'static str),
    /// Too many slides in one export request.
    #[error("too many slides in export (max {MAX_SLIDES_PER_EXPORT})")]
    TooManyExportSlides,
}

/// Check that an id string is a sane identifier (length and charset); UUID
/// shape is enforced later at conversion.
fn check_id(id: &str) -> Result<(), ValidationError> {
    let valid = !id.is_empty()
        && id.len() <= MAX_ID_LEN
        && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidId(id.to_string()))
    }
}

fn check_dimension(dim: Dimension, id: &str) -> Result<(), ValidationError> {
    if let Dimension::Px(v) = dim {
        if !v.is_finite() || v <= 0.0 {
            return Err(ValidationError::NonFiniteCoordinate(id.to_string()));
        }
    }
    Ok(())
}

/// Validate a slide document before it reaches the store.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found; the document must be
/// rejected without mutating anything.
pub fn validate_slide_document(doc: &SlideDocument) -> Result<(), ValidationError> {
    check_id(&doc.id)?;

    if doc.elements.len() > MAX_ELEMENTS_PER_SLIDE {
        return Err(ValidationError::TooManyElements);
    }

    for element in &doc.elements {
        check_id(&element.id)?;

        if !element.position.x.is_finite() || !element.position.y.is_finite() {
            return Err(ValidationError::NonFiniteCoordinate(element.id.clone()));
        }
        check_dimension(element.size.width, &element.id)?;
        check_dimension(element.size.height, &element.id)?;

        if element.size.has_auto() && !element.kind.supports_auto_size() {
            return Err(ValidationError::AutoSizeUnsupported(
                element.kind.variant_name(),
            ));
        }

        if let Some(text) = element_text(&element.kind) {
            if text.len() > MAX_TEXT_CONTENT_LEN {
                return Err(ValidationError::TextContentTooLong);
            }
        }
    }

    Ok(())
}

fn element_text(kind: &deck_core::element::ElementKind) -> Option<&str> {
    match kind {
        deck_core::element::ElementKind::Text { config, .. } => config.default_value.as_deref(),
        _ => None,
    }
}
