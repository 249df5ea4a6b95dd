//! The style and content resolver.
//!
//! Given one element plus the ambient brand kit, template slot styling, and
//! the project's business-data record, produce the final visual+content
//! values a renderer needs. Both the interactive renderer and the static
//! renderer call exactly this module; neither computes a style or content
//! value on its own. That single call path is what keeps live editing and
//! document export pixel-identical.
//!
//! Resolution order, later wins:
//!
//! 1. Variant hard defaults.
//! 2. Template slot styling, when the element originated from a template.
//! 3. Stored per-element style/config (explicit user edits).
//! 4. Brand kit values, over brand-bindable fields only.
//!
//! Stored values beat template defaults so a manual edit survives template
//! refresh, while a freshly applied brand kit still recolors bound fields.
//! Resolution never fails: every output field has a value via the fallback
//! chain, so renderers can never fail on missing style or content.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::brand::BrandKit;
use crate::element::{
    BrandBindings, DataFormat, Dimension, Element, ElementId, ElementKind, MediaType, ObjectFit,
    Position, ShapeKind, TextAlign, TextStyle,
};
use crate::slide::Slide;

/// Default font size when none is stored and the stored string is unusable.
pub const DEFAULT_FONT_SIZE: &str = "16px";
/// Default font weight.
pub const DEFAULT_FONT_WEIGHT: &str = "normal";
/// Default text color.
pub const DEFAULT_TEXT_COLOR: &str = "#000000";
/// Default font family.
pub const DEFAULT_FONT_FAMILY: &str = "Inter, sans-serif";
/// Default shape fill.
pub const DEFAULT_SHAPE_FILL: &str = "#E5E7EB";
/// Default shape stroke.
pub const DEFAULT_SHAPE_STROKE: &str = "#9CA3AF";
/// Default shape stroke width.
pub const DEFAULT_STROKE_WIDTH: f32 = 2.0;
/// Default image corner radius.
pub const DEFAULT_BORDER_RADIUS: &str = "0px";
/// Default image opacity.
pub const DEFAULT_OPACITY: f32 = 1.0;
/// Placeholder emitted when a data binding has no value. Never the empty
/// string, so layout spacing stays stable.
pub const MISSING_VALUE_PLACEHOLDER: &str = "--";

/// Fallback box for elements whose `auto` sizing cannot be honored.
const FALLBACK_SIZE: ResolvedSize = ResolvedSize {
    width: 200.0,
    height: 100.0,
};

/// Template default styling for one content slot.
///
/// Covers the union of variant style fields; the resolver reads only the
/// fields relevant to the element's variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlotStyling {
    /// Font size with unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    /// Font weight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    /// Text color / principal color as hex.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Horizontal alignment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    /// Font family.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Shape fill color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    /// Shape stroke color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    /// Shape stroke width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f32>,
    /// Image corner radius.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
    /// Image opacity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
    /// Brand-bindable markers the template declares for this slot.
    #[serde(default)]
    pub brand: BrandBindings,
}

/// Ambient inputs to resolution. All optional; resolution always succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveContext<'a> {
    /// Template slot styling keyed by content field id.
    pub styling: Option<&'a HashMap<String, SlotStyling>>,
    /// The project's brand kit.
    pub brand: Option<&'a BrandKit>,
    /// The business-data record data elements bind into.
    pub data: Option<&'a serde_json::Value>,
}

impl<'a> ResolveContext<'a> {
    /// Slot styling for a content field, if the template declares any.
    #[must_use]
    pub fn slot_for(&self, field_id: &str) -> Option<&'a SlotStyling> {
        self.styling.and_then(|map| map.get(field_id))
    }
}

/// Effective element size with `auto` resolved to measured content size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedSize {
    /// Effective width in logical units.
    pub width: f32,
    /// Effective height in logical units.
    pub height: f32,
}

/// Fully resolved visual values for a text or data element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedText {
    /// Content string to render.
    pub content: String,
    /// Font size as the original unit string.
    pub font_size: String,
    /// Normalized integer pixel count, for measurement only. The persisted
    /// style keeps the unit string above.
    pub font_size_px: u32,
    /// Font weight.
    pub font_weight: String,
    /// Text color as hex.
    pub color: String,
    /// Horizontal alignment.
    pub text_align: TextAlign,
    /// Font family.
    pub font_family: String,
    /// Whether line breaks are honored.
    pub multiline: bool,
}

/// Fully resolved visual values for an image element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedImage {
    /// Image URL; `None` renders as an empty placeholder box.
    pub url: Option<String>,
    /// Fit mode.
    pub object_fit: ObjectFit,
    /// Corner radius.
    pub border_radius: String,
    /// Opacity clamped to 0..=1.
    pub opacity: f32,
}

/// Fully resolved visual values for a shape element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedShape {
    /// Shape kind.
    pub kind: ShapeKind,
    /// Fill color.
    pub fill: String,
    /// Stroke color.
    pub stroke: String,
    /// Stroke width in logical units.
    pub stroke_width: f32,
}

/// Per-variant resolved values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "variant", rename_all = "lowercase")]
pub enum ResolvedVisual {
    /// Text element values.
    Text(ResolvedText),
    /// Image element values.
    Image(ResolvedImage),
    /// Shape element values.
    Shape(ResolvedShape),
    /// Data element values, already composed to display text.
    Data(ResolvedText),
}

/// Everything a renderer needs for one element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedElement {
    /// Element identity.
    pub id: ElementId,
    /// Top-left position in logical units.
    pub position: Position,
    /// Effective size with `auto` resolved.
    pub size: ResolvedSize,
    /// Layer.
    pub z_index: i32,
    /// Resolved per-variant values.
    pub visual: ResolvedVisual,
}

/// Normalize a font-size unit string to an integer pixel count for
/// measurement. Parses the leading number, rounds half up, and falls back
/// to 16 when unparseable. The stored style value is never rewritten.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn font_size_px(value: &str) -> u32 {
    let numeric: String = value
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    match numeric.parse::<f32>() {
        Ok(v) if v > 0.0 && v.is_finite() => (v + 0.5).floor() as u32,
        _ => 16,
    }
}

/// Resolve one element against the ambient context.
#[must_use]
pub fn resolve_element(element: &Element, ctx: &ResolveContext<'_>) -> ResolvedElement {
    let slot = element.kind.field_id().and_then(|f| ctx.slot_for(f));

    let visual = match &element.kind {
        ElementKind::Text { style, config } => {
            let content = config
                .default_value
                .clone()
                .or_else(|| config.placeholder.clone())
                .or_else(|| config.label.clone())
                .unwrap_or_default();
            ResolvedVisual::Text(resolve_text(style, slot, ctx.brand, content, config.multiline))
        }
        ElementKind::Data { style, config } => {
            let bound = ctx
                .data
                .and_then(|record| lookup_path(record, &config.data_path));
            let formatted = bound.map_or_else(
                || MISSING_VALUE_PLACEHOLDER.to_string(),
                |value| format_value(&value, config.format),
            );
            let content = format!(
                "{}{}{}",
                config.prefix.as_deref().unwrap_or(""),
                formatted,
                config.suffix.as_deref().unwrap_or("")
            );
            ResolvedVisual::Data(resolve_text(style, slot, ctx.brand, content, false))
        }
        ElementKind::Image { style, config } => {
            let url = config
                .url
                .clone()
                .or_else(|| config.fallback_url.clone())
                .or_else(|| {
                    // A logo slot with no bound asset falls back to the
                    // project's uploaded logo.
                    if config.media_type == MediaType::Logo {
                        ctx.brand.and_then(|b| b.logo_url.clone())
                    } else {
                        None
                    }
                });
            ResolvedVisual::Image(ResolvedImage {
                url,
                object_fit: config.object_fit,
                border_radius: style
                    .border_radius
                    .clone()
                    .or_else(|| slot.and_then(|s| s.border_radius.clone()))
                    .unwrap_or_else(|| DEFAULT_BORDER_RADIUS.to_string()),
                opacity: style
                    .opacity
                    .or_else(|| slot.and_then(|s| s.opacity))
                    .unwrap_or(DEFAULT_OPACITY)
                    .clamp(0.0, 1.0),
            })
        }
        ElementKind::Shape { style, config } => {
            let bindings = effective_bindings(style.brand, slot);
            let mut fill = style
                .fill
                .clone()
                .or_else(|| slot.and_then(|s| s.fill.clone()))
                .unwrap_or_else(|| DEFAULT_SHAPE_FILL.to_string());
            if let (Some(role), Some(brand)) = (bindings.color, ctx.brand) {
                fill = brand.color(role).to_string();
            }
            ResolvedVisual::Shape(ResolvedShape {
                kind: config.kind,
                fill,
                stroke: style
                    .stroke
                    .clone()
                    .or_else(|| slot.and_then(|s| s.stroke.clone()))
                    .unwrap_or_else(|| DEFAULT_SHAPE_STROKE.to_string()),
                stroke_width: style
                    .stroke_width
                    .or_else(|| slot.and_then(|s| s.stroke_width))
                    .unwrap_or(DEFAULT_STROKE_WIDTH),
            })
        }
    };

    ResolvedElement {
        id: element.id,
        position: element.position,
        size: measure(element, &visual),
        z_index: element.z_index,
        visual,
    }
}

/// Resolve a whole slide in render order.
#[must_use]
pub fn resolve_slide(slide: &Slide, ctx: &ResolveContext<'_>) -> Vec<ResolvedElement> {
    slide
        .render_order()
        .into_iter()
        .map(|element| resolve_element(element, ctx))
        .collect()
}

fn resolve_text(
    style: &TextStyle,
    slot: Option<&SlotStyling>,
    brand: Option<&BrandKit>,
    content: String,
    multiline: bool,
) -> ResolvedText {
    let bindings = effective_bindings(style.brand, slot);

    let font_size = style
        .font_size
        .clone()
        .or_else(|| slot.and_then(|s| s.font_size.clone()))
        .unwrap_or_else(|| DEFAULT_FONT_SIZE.to_string());

    let mut color = style
        .color
        .clone()
        .or_else(|| slot.and_then(|s| s.color.clone()))
        .unwrap_or_else(|| DEFAULT_TEXT_COLOR.to_string());
    let mut font_family = style
        .font_family
        .clone()
        .or_else(|| slot.and_then(|s| s.font_family.clone()))
        .unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_string());

    // Brand overwrite is last and touches only the bound fields.
    if let Some(brand) = brand {
        if let Some(role) = bindings.color {
            color = brand.color(role).to_string();
        }
        if bindings.font {
            font_family.clone_from(&brand.font_family);
        }
    }

    let px = font_size_px(&font_size);
    ResolvedText {
        content,
        font_size,
        font_size_px: px,
        font_weight: style
            .font_weight
            .clone()
            .or_else(|| slot.and_then(|s| s.font_weight.clone()))
            .unwrap_or_else(|| DEFAULT_FONT_WEIGHT.to_string()),
        color,
        text_align: style
            .text_align
            .or_else(|| slot.and_then(|s| s.text_align))
            .unwrap_or_default(),
        font_family,
        multiline,
    }
}

/// Element bindings win; a template slot's bindings apply only when the
/// element itself declares none.
fn effective_bindings(element: BrandBindings, slot: Option<&SlotStyling>) -> BrandBindings {
    if element.color.is_some() || element.font {
        element
    } else {
        slot.map(|s| s.brand).unwrap_or_default()
    }
}

/// Walk a dot-path into a JSON record. Array segments may be indexed
/// numerically, e.g. `"traction.milestones.0"`.
fn lookup_path(record: &serde_json::Value, path: &str) -> Option<serde_json::Value> {
    let mut current = record;
    for segment in path.split('.') {
        current = match current {
            serde_json::Value::Object(map) => map.get(segment)?,
            serde_json::Value::Array(items) => {
                let index: usize = segment.parse().ok()?;
                items.get(index)?
            }
            _ => return None,
        };
    }
    if current.is_null() {
        None
    } else {
        Some(current.clone())
    }
}

/// Format a bound JSON value per the data element's display format.
fn format_value(value: &serde_json::Value, format: DataFormat) -> String {
    let text = match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    };

    match format {
        DataFormat::Text => text,
        DataFormat::Number => parse_number(&text).map_or(text, |n| group_thousands(n, 0)),
        DataFormat::Currency => {
            parse_number(&text).map_or(text, |n| format!("${}", group_thousands(n, 2)))
        }
        DataFormat::Percentage => {
            parse_number(&text).map_or(text, |n| format!("{}%", group_thousands(n, 0)))
        }
    }
}

fn parse_number(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse().ok().filter(|n: &f64| n.is_finite())
}

/// Thousands-separate the integer part; `decimals` fixes the fraction width
/// (0 drops a whole-number fraction, keeps a real one to two places).
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn group_thousands(value: f64, decimals: usize) -> String {
    let negative = value < 0.0;
    // Round to cents first so a .999 fraction carries into the integer part.
    let magnitude = (value.abs() * 100.0).round() / 100.0;
    let int_part = magnitude.trunc() as u64;
    let fraction = magnitude.fract();

    let digits = int_part.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);

    if decimals > 0 {
        out.push_str(&format!("{fraction:.decimals$}")[1..]);
    } else if fraction > f64::EPSILON {
        out.push_str(&format!("{fraction:.2}")[1..]);
    }
    out
}

/// Compute the effective size, resolving `auto` axes from content.
///
/// The measurement is a deterministic character-count heuristic for the
/// boxed layout: average glyph width 0.6em, line height 1.4em, rounded to
/// whole logical units. Both renderers consume this value, so effective
/// geometry cannot diverge between them.
fn measure(element: &Element, visual: &ResolvedVisual) -> ResolvedSize {
    match (element.size.width, element.size.height) {
        (Dimension::Px(w), Dimension::Px(h)) => ResolvedSize {
            width: w,
            height: h,
        },
        _ => match visual {
            ResolvedVisual::Text(text) | ResolvedVisual::Data(text) => {
                measure_text(element.size.width, element.size.height, text)
            }
            // Auto is invalid for image/shape; validation rejects it on the
            // way in, but resolution must still produce a value.
            ResolvedVisual::Image(_) | ResolvedVisual::Shape(_) => {
                tracing::warn!(element = %element.id, "auto size on non-text element, using fallback box");
                ResolvedSize {
                    width: element.size.width.px().unwrap_or(FALLBACK_SIZE.width),
                    height: element.size.height.px().unwrap_or(FALLBACK_SIZE.height),
                }
            }
        },
    }
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn measure_text(width: Dimension, height: Dimension, text: &ResolvedText) -> ResolvedSize {
    let em = text.font_size_px as f32;
    let char_width = (em * 0.6).max(1.0);
    let line_height = (em * 1.4).round();

    let lines: Vec<&str> = if text.multiline {
        text.content.split('\n').collect()
    } else {
        vec![text.content.as_str()]
    };
    let longest = lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);

    let measured_width = match width {
        Dimension::Px(w) => w,
        Dimension::Auto => ((longest.max(1) as f32) * char_width).ceil().max(40.0),
    };

    let line_count = match width {
        // Fixed width wraps each logical line to fit.
        Dimension::Px(w) => lines
            .iter()
            .map(|line| {
                let line_width = (line.chars().count() as f32) * char_width;
                (line_width / w.max(char_width)).ceil().max(1.0) as usize
            })
            .sum::<usize>(),
        Dimension::Auto => lines.len(),
    };

    let measured_height = match height {
        Dimension::Px(h) => h,
        Dimension::Auto => ((line_count.max(1) as f32) * line_height).ceil(),
    };

    ResolvedSize {
        width: measured_width,
        height: measured_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{DataConfig, Size, TextConfig};

    fn text_element(style: TextStyle, value: &str) -> Element {
        Element::new(ElementKind::Text {
            style,
            config: TextConfig {
                field_id: "headline".to_string(),
                default_value: Some(value.to_string()),
                ..TextConfig::default()
            },
        })
        .with_size(Size::fixed(300.0, 60.0))
    }

    fn brand() -> BrandKit {
        BrandKit {
            primary_color: "#111111".to_string(),
            secondary_color: "#222222".to_string(),
            accent_color: "#333333".to_string(),
            font_family: "Space Grotesk, sans-serif".to_string(),
            logo_url: Some("https://cdn.example.com/logo.png".to_string()),
        }
    }

    #[test]
    fn test_font_size_px_normalization() {
        assert_eq!(font_size_px("16px"), 16);
        assert_eq!(font_size_px("17.5px"), 18);
        assert_eq!(font_size_px("2rem"), 2);
        assert_eq!(font_size_px("huge"), 16);
        assert_eq!(font_size_px(""), 16);
    }

    #[test]
    fn test_defaults_fill_unset_fields() {
        let element = text_element(TextStyle::default(), "Hello");
        let resolved = resolve_element(&element, &ResolveContext::default());

        match resolved.visual {
            ResolvedVisual::Text(text) => {
                assert_eq!(text.font_size, DEFAULT_FONT_SIZE);
                assert_eq!(text.color, DEFAULT_TEXT_COLOR);
                assert_eq!(text.text_align, TextAlign::Left);
                assert_eq!(text.content, "Hello");
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn test_stored_style_beats_slot_styling() {
        let mut styling = HashMap::new();
        styling.insert(
            "headline".to_string(),
            SlotStyling {
                font_size: Some("48px".to_string()),
                color: Some("#ABCDEF".to_string()),
                ..SlotStyling::default()
            },
        );

        let element = text_element(
            TextStyle {
                color: Some("#FF0000".to_string()),
                ..TextStyle::default()
            },
            "Hi",
        );
        let ctx = ResolveContext {
            styling: Some(&styling),
            ..ResolveContext::default()
        };

        match resolve_element(&element, &ctx).visual {
            ResolvedVisual::Text(text) => {
                // Manual edit survives; unset field takes the slot value.
                assert_eq!(text.color, "#FF0000");
                assert_eq!(text.font_size, "48px");
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn test_brand_touches_only_bound_fields() {
        use crate::brand::BrandColorRole;

        let element = text_element(
            TextStyle {
                font_size: Some("16px".to_string()),
                brand: BrandBindings::color(BrandColorRole::Primary),
                ..TextStyle::default()
            },
            "Branded",
        );
        let kit = brand();
        let ctx = ResolveContext {
            brand: Some(&kit),
            ..ResolveContext::default()
        };

        match resolve_element(&element, &ctx).visual {
            ResolvedVisual::Text(text) => {
                assert_eq!(text.color, "#111111");
                // Font size is not brand-bindable.
                assert_eq!(text.font_size, "16px");
                // Font not bound, so the family stays default.
                assert_eq!(text.font_family, DEFAULT_FONT_FAMILY);
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn test_brand_application_is_idempotent_overwrite() {
        use crate::brand::BrandColorRole;

        let element = text_element(
            TextStyle {
                brand: BrandBindings::color(BrandColorRole::Accent),
                ..TextStyle::default()
            },
            "x",
        );

        let kit_a = brand();
        let mut kit_b = brand();
        kit_b.accent_color = "#00FF00".to_string();

        // Resolving under B directly equals resolving under A then B: the
        // stored element is never mutated, so the second kit fully replaces
        // the first.
        let under_a = resolve_element(
            &element,
            &ResolveContext {
                brand: Some(&kit_a),
                ..ResolveContext::default()
            },
        );
        let under_b = resolve_element(
            &element,
            &ResolveContext {
                brand: Some(&kit_b),
                ..ResolveContext::default()
            },
        );

        match (under_a.visual, under_b.visual) {
            (ResolvedVisual::Text(a), ResolvedVisual::Text(b)) => {
                assert_eq!(a.color, "#333333");
                assert_eq!(b.color, "#00FF00");
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn test_data_composition_and_missing_placeholder() {
        let record = serde_json::json!({
            "financials": { "arr": 1250000.5, "growth": 42 }
        });

        let element = Element::new(ElementKind::Data {
            style: TextStyle::default(),
            config: DataConfig {
                field_id: "arr".to_string(),
                data_path: "financials.arr".to_string(),
                format: DataFormat::Currency,
                prefix: None,
                suffix: Some(" ARR".to_string()),
            },
        })
        .with_size(Size::fixed(200.0, 40.0));

        let ctx = ResolveContext {
            data: Some(&record),
            ..ResolveContext::default()
        };
        match resolve_element(&element, &ctx).visual {
            ResolvedVisual::Data(text) => assert_eq!(text.content, "$1,250,000.50 ARR"),
            _ => panic!("wrong variant"),
        }

        // Missing path falls back to the literal placeholder, prefix and
        // suffix still applied.
        let missing = Element::new(ElementKind::Data {
            style: TextStyle::default(),
            config: DataConfig {
                field_id: "mrr".to_string(),
                data_path: "financials.mrr".to_string(),
                format: DataFormat::Currency,
                prefix: Some("~".to_string()),
                suffix: None,
            },
        })
        .with_size(Size::fixed(200.0, 40.0));
        match resolve_element(&missing, &ctx).visual {
            ResolvedVisual::Data(text) => assert_eq!(text.content, "~--"),
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn test_percentage_and_number_formats() {
        let record = serde_json::json!({ "growth": 1234, "share": 17 });

        let make = |path: &str, format: DataFormat| {
            Element::new(ElementKind::Data {
                style: TextStyle::default(),
                config: DataConfig {
                    field_id: path.to_string(),
                    data_path: path.to_string(),
                    format,
                    prefix: None,
                    suffix: None,
                },
            })
            .with_size(Size::fixed(120.0, 40.0))
        };
        let ctx = ResolveContext {
            data: Some(&record),
            ..ResolveContext::default()
        };

        match resolve_element(&make("growth", DataFormat::Number), &ctx).visual {
            ResolvedVisual::Data(text) => assert_eq!(text.content, "1,234"),
            _ => panic!("wrong variant"),
        }
        match resolve_element(&make("share", DataFormat::Percentage), &ctx).visual {
            ResolvedVisual::Data(text) => assert_eq!(text.content, "17%"),
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn test_logo_slot_falls_back_to_brand_logo() {
        use crate::element::{ImageConfig, ImageStyle};

        let element = Element::new(ElementKind::Image {
            style: ImageStyle::default(),
            config: ImageConfig {
                field_id: "logo".to_string(),
                media_type: MediaType::Logo,
                tags: std::collections::BTreeSet::new(),
                object_fit: ObjectFit::Contain,
                url: None,
                fallback_url: None,
            },
        })
        .with_size(Size::fixed(120.0, 60.0));

        let kit = brand();
        let ctx = ResolveContext {
            brand: Some(&kit),
            ..ResolveContext::default()
        };
        match resolve_element(&element, &ctx).visual {
            ResolvedVisual::Image(image) => {
                assert_eq!(image.url.as_deref(), Some("https://cdn.example.com/logo.png"));
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn test_auto_height_measures_from_content() {
        let mut element = text_element(
            TextStyle {
                font_size: Some("20px".to_string()),
                ..TextStyle::default()
            },
            "one line",
        );
        element.size = Size::auto_height(300.0);

        let resolved = resolve_element(&element, &ResolveContext::default());
        assert_eq!(resolved.size.width, 300.0);
        // 20px * 1.4 = 28 per line, one line fits in 300 units.
        assert_eq!(resolved.size.height, 28.0);
    }
}
