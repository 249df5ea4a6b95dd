//! The template application engine.
//!
//! Merges a read-only template with caller-supplied content, AI-generated
//! fallback content, and per-slot overrides into a concrete slide. Brand
//! recoloring stays a resolve-time concern: the engine's job is to stamp
//! stored element values, and the one place it reaches into brand semantics
//! is clearing a field's brand binding when an explicit override must keep
//! beating the brand kit.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use deck_core::element::{Element, ElementKind, Position, Size, TextConfig, TextStyle};
use deck_core::resolve::SlotStyling;
use deck_core::slide::Slide;

use crate::content::{meaningful, ContentGenerator, GenerationRequest};
use crate::error::{TemplateError, TemplateResult};
use crate::registry::TemplateRegistry;
use crate::template::{AccessTier, ContentField, FieldKind, Template, TemplateId, TemplateLayout};

/// Default bound on a generation call before falling back to placeholders.
pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(20);

/// Per-slot values that win over every other source, including the brand
/// kit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotOverride {
    /// Style values to force for this slot.
    pub style: SlotStyling,
    /// Content value to force for this slot.
    pub content: Option<String>,
}

/// One template application.
#[derive(Debug, Clone)]
pub struct ApplyRequest<'a> {
    /// Template to apply.
    pub template_id: TemplateId,
    /// Caller-supplied content object, possibly empty.
    pub content: serde_json::Value,
    /// Business profile context forwarded to content generation.
    pub business_profile: serde_json::Value,
    /// Explicit per-slot overrides, folded in last.
    pub overrides: HashMap<String, SlotOverride>,
    /// The caller's subscription tier.
    pub tier: AccessTier,
    /// When re-templating, the slide whose identity must be preserved.
    pub existing: Option<&'a Slide>,
}

/// The applied result: a concrete slide plus the slot styling the resolver
/// consumes when rendering it.
#[derive(Debug, Clone)]
pub struct AppliedTemplate {
    /// The resulting slide.
    pub slide: Slide,
    /// Per-slot styling from the template, for the resolve context.
    pub styling: HashMap<String, SlotStyling>,
}

/// Applies templates against a registry and a content-generation
/// collaborator.
pub struct TemplateEngine {
    registry: Arc<TemplateRegistry>,
    generator: Arc<dyn ContentGenerator>,
    generation_timeout: Duration,
}

impl TemplateEngine {
    /// Create an engine over a registry and generator.
    #[must_use]
    pub fn new(registry: Arc<TemplateRegistry>, generator: Arc<dyn ContentGenerator>) -> Self {
        Self {
            registry,
            generator,
            generation_timeout: DEFAULT_GENERATION_TIMEOUT,
        }
    }

    /// Override the generation timeout.
    #[must_use]
    pub fn with_generation_timeout(mut self, timeout: Duration) -> Self {
        self.generation_timeout = timeout;
        self
    }

    /// The registry this engine serves.
    #[must_use]
    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Apply a template, producing a concrete slide.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::NotFound`] for an unknown template id and
    /// [`TemplateError::UpgradeRequired`] when the caller's tier does not
    /// cover the template. Generation failures are recovered internally and
    /// never surface from here.
    pub async fn apply(&self, request: ApplyRequest<'_>) -> TemplateResult<AppliedTemplate> {
        let template = self
            .registry
            .get(request.template_id)
            .ok_or_else(|| TemplateError::NotFound(request.template_id.to_string()))?;

        // Tier gate before any work; the caller's document is untouched.
        if template.access_tier > request.tier {
            return Err(TemplateError::UpgradeRequired {
                required: template.access_tier,
            });
        }

        let content = self
            .effective_content(template, request.content, request.business_profile)
            .await;

        let mut slide = match &template.layout {
            TemplateLayout::Visual { seeds } => {
                let mut slide = Slide::new();
                for seed in seeds {
                    let mut element = Element::new(seed.kind.clone())
                        .with_position(seed.position)
                        .with_size(seed.size)
                        .with_z_index(seed.z_index);
                    fold_content(&mut element, &content);
                    slide.insert(element);
                }
                slide
            }
            TemplateLayout::Legacy { schema } => synthesize_layout(schema, &content),
        };

        apply_overrides(&mut slide, &request.overrides);

        // Re-templating changes appearance and content, never a slide's
        // place among its siblings.
        if let Some(existing) = request.existing {
            slide.id = existing.id;
            slide.order = existing.order;
        }

        tracing::debug!(
            template = %template.id,
            category = %template.category,
            elements = slide.element_count(),
            "template applied"
        );

        Ok(AppliedTemplate {
            slide,
            styling: template.default_styling.clone(),
        })
    }

    /// Decide what content the slide is built from. Meaningful caller
    /// content is used as-is; visual templates fall back to their own
    /// placeholder content; legacy templates ask the generation service,
    /// and any failure degrades to the template's display name.
    async fn effective_content(
        &self,
        template: &Template,
        content: serde_json::Value,
        business_profile: serde_json::Value,
    ) -> serde_json::Value {
        if meaningful(&content) {
            return content;
        }
        if template.is_visual() {
            // Seeds carry placeholder content by construction.
            return serde_json::Value::Object(serde_json::Map::new());
        }

        let generation_request = GenerationRequest {
            template_category: template.category.clone(),
            template_name: template.name.clone(),
            business_profile,
            existing_content: content,
            available_media: None,
            required_image_count: None,
        };

        match tokio::time::timeout(
            self.generation_timeout,
            self.generator.generate(&generation_request),
        )
        .await
        {
            Ok(Ok(generated)) => generated,
            Ok(Err(e)) => {
                tracing::warn!(template = %template.id, error = %e, "content generation failed, using template name");
                serde_json::json!({ "title": template.name })
            }
            Err(_) => {
                tracing::warn!(template = %template.id, "content generation timed out, using template name");
                serde_json::json!({ "title": template.name })
            }
        }
    }
}

/// Copy a content value into the element's binding config. Only string
/// values land; data elements bind to the business record at resolve time
/// and take no template content.
fn fold_content(element: &mut Element, content: &serde_json::Value) {
    let Some(field_id) = element.kind.field_id().map(str::to_string) else {
        return;
    };
    let Some(value) = content.get(&field_id).and_then(|v| v.as_str()) else {
        return;
    };
    if value.trim().is_empty() {
        return;
    }
    match &mut element.kind {
        ElementKind::Text { config, .. } => config.default_value = Some(value.to_string()),
        ElementKind::Image { config, .. } => config.url = Some(value.to_string()),
        ElementKind::Shape { .. } | ElementKind::Data { .. } => {}
    }
}

/// Deterministic layout for legacy templates: a title band followed by the
/// remaining schema fields stacked below it.
fn synthesize_layout(schema: &[ContentField], content: &serde_json::Value) -> Slide {
    let mut slide = Slide::new();

    let mut body_y = 300.0;
    for field in schema {
        let value = content
            .get(&field.field_id)
            .and_then(|v| v.as_str())
            .map(str::to_string);
        let is_title = field.field_id == "title";

        let style = if is_title {
            TextStyle {
                font_size: Some("56px".to_string()),
                font_weight: Some("bold".to_string()),
                ..TextStyle::default()
            }
        } else {
            TextStyle {
                font_size: Some("24px".to_string()),
                ..TextStyle::default()
            }
        };
        let kind = ElementKind::Text {
            style,
            config: TextConfig {
                field_id: field.field_id.clone(),
                label: Some(field.label.clone()),
                placeholder: Some(field.label.clone()),
                default_value: value,
                required: field.required,
                multiline: matches!(field.kind, FieldKind::Multiline),
                ..TextConfig::default()
            },
        };

        if is_title {
            slide.create_element(kind, Position::new(120.0, 100.0), Size::fixed(1680.0, 90.0));
        } else {
            slide.create_element(kind, Position::new(120.0, body_y), Size::auto_height(1680.0));
            body_y += 180.0;
        }
    }

    // A schema with no title still needs a headline slot for the fallback
    // content path.
    if !schema.iter().any(|f| f.field_id == "title") {
        if let Some(title) = content.get("title").and_then(|v| v.as_str()) {
            let kind = ElementKind::Text {
                style: TextStyle {
                    font_size: Some("56px".to_string()),
                    font_weight: Some("bold".to_string()),
                    ..TextStyle::default()
                },
                config: TextConfig {
                    field_id: "title".to_string(),
                    default_value: Some(title.to_string()),
                    ..TextConfig::default()
                },
            };
            slide.create_element(kind, Position::new(120.0, 100.0), Size::fixed(1680.0, 90.0));
        }
    }

    slide
}

/// Fold explicit overrides in last. Overridden style fields are written
/// into stored style and their brand binding is cleared, so a later resolve
/// cannot recolor them: explicit overrides beat every source, including the
/// brand kit.
fn apply_overrides(slide: &mut Slide, overrides: &HashMap<String, SlotOverride>) {
    if overrides.is_empty() {
        return;
    }
    let ids: Vec<_> = slide.elements().map(|e| e.id).collect();
    for id in ids {
        let Some(element) = slide.get_mut(id) else {
            continue;
        };
        let Some(field_id) = element.kind.field_id().map(str::to_string) else {
            continue;
        };
        let Some(slot_override) = overrides.get(&field_id) else {
            continue;
        };

        match &mut element.kind {
            ElementKind::Text { style, config } => {
                override_text_style(style, &slot_override.style);
                if let Some(content) = &slot_override.content {
                    config.default_value = Some(content.clone());
                }
            }
            ElementKind::Data { style, .. } => {
                override_text_style(style, &slot_override.style);
            }
            ElementKind::Image { style, config } => {
                if let Some(radius) = &slot_override.style.border_radius {
                    style.border_radius = Some(radius.clone());
                }
                if let Some(opacity) = slot_override.style.opacity {
                    style.opacity = Some(opacity);
                }
                if let Some(content) = &slot_override.content {
                    config.url = Some(content.clone());
                }
            }
            ElementKind::Shape { style, .. } => {
                if let Some(fill) = &slot_override.style.fill {
                    style.fill = Some(fill.clone());
                    style.brand.color = None;
                }
                if let Some(stroke) = &slot_override.style.stroke {
                    style.stroke = Some(stroke.clone());
                }
                if let Some(width) = slot_override.style.stroke_width {
                    style.stroke_width = Some(width);
                }
            }
        }
    }
}

fn override_text_style(style: &mut TextStyle, value: &SlotStyling) {
    if let Some(size) = &value.font_size {
        style.font_size = Some(size.clone());
    }
    if let Some(weight) = &value.font_weight {
        style.font_weight = Some(weight.clone());
    }
    if let Some(color) = &value.color {
        style.color = Some(color.clone());
        style.brand.color = None;
    }
    if let Some(align) = value.text_align {
        style.text_align = Some(align);
    }
    if let Some(family) = &value.font_family {
        style.font_family = Some(family.clone());
        style.brand.font = false;
    }
}
