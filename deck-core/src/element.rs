//! Slide elements - the building blocks of slides.
//!
//! An element is one positioned, styled, content-bearing unit. The variant
//! set is closed: text, image, shape, data. Each variant carries its own
//! `style` (visual-only) and `config` (content/binding-only) shapes. Style
//! must never carry binding semantics and config must never carry visual
//! semantics; that separation is what lets brand overrides touch appearance
//! without touching content, and content generation touch content without
//! touching appearance.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::brand::BrandColorRole;

/// Unique identifier for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Create a new unique element ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse from a string representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid UUID.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s).map(Self)
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position in logical canvas units, top-left origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Logical units from the left edge.
    pub x: f32,
    /// Logical units from the top edge.
    pub y: f32,
}

impl Position {
    /// Create a position.
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One axis of an element's size: a positive logical-unit length, or
/// content-driven sizing.
///
/// Serializes as a JSON number, or the literal string `"auto"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dimension {
    /// Fixed length in logical canvas units.
    Px(f32),
    /// Content-driven sizing. Valid for text/data variants only.
    Auto,
}

impl Dimension {
    /// The fixed length, if this dimension is not `auto`.
    #[must_use]
    pub fn px(self) -> Option<f32> {
        match self {
            Self::Px(v) => Some(v),
            Self::Auto => None,
        }
    }

    /// Whether this dimension is content-driven.
    #[must_use]
    pub fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }
}

impl Serialize for Dimension {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Px(v) => serializer.serialize_f32(*v),
            Self::Auto => serializer.serialize_str("auto"),
        }
    }
}

impl<'de> Deserialize<'de> for Dimension {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            #[allow(clippy::cast_possible_truncation)]
            Raw::Number(n) if n > 0.0 && n.is_finite() => Ok(Self::Px(n as f32)),
            Raw::Number(n) => Err(D::Error::custom(format!(
                "dimension must be a positive finite number, got {n}"
            ))),
            Raw::Text(s) if s == "auto" => Ok(Self::Auto),
            Raw::Text(s) => Err(D::Error::custom(format!(
                "dimension must be a number or \"auto\", got {s:?}"
            ))),
        }
    }
}

/// Element size: width and height, each fixed or `auto`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Width dimension.
    pub width: Dimension,
    /// Height dimension.
    pub height: Dimension,
}

impl Size {
    /// Create a fixed-size value.
    #[must_use]
    pub fn fixed(width: f32, height: f32) -> Self {
        Self {
            width: Dimension::Px(width),
            height: Dimension::Px(height),
        }
    }

    /// Fixed width with content-driven height.
    #[must_use]
    pub fn auto_height(width: f32) -> Self {
        Self {
            width: Dimension::Px(width),
            height: Dimension::Auto,
        }
    }

    /// Whether either axis is content-driven.
    #[must_use]
    pub fn has_auto(self) -> bool {
        self.width.is_auto() || self.height.is_auto()
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::fixed(200.0, 100.0)
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Left-aligned text.
    #[default]
    Left,
    /// Centered text.
    Center,
    /// Right-aligned text.
    Right,
}

/// Marks which style fields the brand kit may overwrite at resolution time.
///
/// Brand application touches exactly the marked fields; structural fields
/// (position, size, z-index) and content are never brand-bindable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandBindings {
    /// The brand color this element's principal color field draws from
    /// (text color, shape fill), if bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<BrandColorRole>,
    /// Whether the font family follows the brand kit.
    #[serde(default)]
    pub font: bool,
}

impl BrandBindings {
    /// Bindings with nothing bound.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Bind the principal color to a brand role.
    #[must_use]
    pub fn color(role: BrandColorRole) -> Self {
        Self {
            color: Some(role),
            font: false,
        }
    }
}

/// Visual-only properties of a text element. Unset fields fall back to hard
/// defaults at resolution time; stored elements are never back-filled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size with unit, e.g. `"16px"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    /// Font weight, e.g. `"normal"`, `"bold"`, `"600"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    /// Text color as hex.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Horizontal alignment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    /// Font family (CSS font stack).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Brand-bindable field markers.
    #[serde(default)]
    pub brand: BrandBindings,
}

impl TextStyle {
    /// Merge `patch` into this style; `Some` fields in the patch win.
    pub fn merge(&mut self, patch: &TextStyle) {
        if let Some(v) = &patch.font_size {
            self.font_size = Some(v.clone());
        }
        if let Some(v) = &patch.font_weight {
            self.font_weight = Some(v.clone());
        }
        if let Some(v) = &patch.color {
            self.color = Some(v.clone());
        }
        if let Some(v) = patch.text_align {
            self.text_align = Some(v);
        }
        if let Some(v) = &patch.font_family {
            self.font_family = Some(v.clone());
        }
    }
}

/// Visual-only properties of an image element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageStyle {
    /// Corner radius with unit, e.g. `"8px"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
    /// Opacity from 0.0 to 1.0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
    /// Brand-bindable field markers.
    #[serde(default)]
    pub brand: BrandBindings,
}

impl ImageStyle {
    /// Merge `patch` into this style; `Some` fields in the patch win.
    pub fn merge(&mut self, patch: &ImageStyle) {
        if let Some(v) = &patch.border_radius {
            self.border_radius = Some(v.clone());
        }
        if let Some(v) = patch.opacity {
            self.opacity = Some(v);
        }
    }
}

/// Visual-only properties of a shape element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Fill color as hex.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    /// Stroke color as hex.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    /// Stroke width in logical units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f32>,
    /// Brand-bindable field markers (the color binding targets the fill).
    #[serde(default)]
    pub brand: BrandBindings,
}

impl ShapeStyle {
    /// Merge `patch` into this style; `Some` fields in the patch win.
    pub fn merge(&mut self, patch: &ShapeStyle) {
        if let Some(v) = &patch.fill {
            self.fill = Some(v.clone());
        }
        if let Some(v) = &patch.stroke {
            self.stroke = Some(v.clone());
        }
        if let Some(v) = patch.stroke_width {
            self.stroke_width = Some(v);
        }
    }
}

/// Content/binding properties of a text element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextConfig {
    /// Content field this element binds to.
    pub field_id: String,
    /// Human-readable label for the properties surface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Placeholder shown when no value is present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// The bound content value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Maximum content length, if constrained.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    /// Whether the field must carry content.
    #[serde(default)]
    pub required: bool,
    /// Whether the field accepts line breaks.
    #[serde(default)]
    pub multiline: bool,
}

/// The closed set of image roles used for media matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// Company logo.
    Logo,
    /// Product shot.
    Product,
    /// Team photo.
    Team,
    /// Office/location photo.
    Office,
    /// Hero/banner image.
    Hero,
    /// Small iconography.
    Icon,
    /// Product screenshot.
    Screenshot,
    /// Illustration or other graphic.
    Graphic,
}

/// How an image fills its box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectFit {
    /// Scale to fit inside the box, preserving aspect ratio.
    #[default]
    Contain,
    /// Scale to cover the box, preserving aspect ratio.
    Cover,
    /// Stretch to the box, ignoring aspect ratio.
    Fill,
}

/// Content/binding properties of an image element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Content field this element binds to.
    pub field_id: String,
    /// Role of the image for media matching.
    pub media_type: MediaType,
    /// Free-form matching tags.
    #[serde(default, skip_serializing_if = "std::collections::BTreeSet::is_empty")]
    pub tags: std::collections::BTreeSet<String>,
    /// How the image fills its box.
    #[serde(default)]
    pub object_fit: ObjectFit,
    /// The bound media asset URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// URL used when no asset is bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_url: Option<String>,
}

/// The closed set of shape kinds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Axis-aligned rectangle.
    #[default]
    Rectangle,
    /// Circle/ellipse inscribed in the element box.
    Circle,
    /// Horizontal line across the element box.
    Line,
}

/// Content/binding properties of a shape element.
///
/// Shapes carry no content binding; the kind is the only configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeConfig {
    /// Which shape to draw.
    pub kind: ShapeKind,
}

/// Display format for a data-bound value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    /// Verbatim text.
    #[default]
    Text,
    /// Thousands-separated number.
    Number,
    /// Currency with symbol and two decimals.
    Currency,
    /// Percentage with trailing `%`.
    Percentage,
}

/// Content/binding properties of a data element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Content field this element binds to.
    pub field_id: String,
    /// Dot-path into the business-data record, e.g. `"financials.arr"`.
    pub data_path: String,
    /// Display format for the bound value.
    #[serde(default)]
    pub format: DataFormat,
    /// Literal prepended to the formatted value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Literal appended to the formatted value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

/// The closed, non-extensible variant set of a slide element.
///
/// Resolvers and renderers switch exhaustively over this tag; adding a
/// variant is a compile-time event at every switch site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "lowercase")]
pub enum ElementKind {
    /// Editable text bound to a content field.
    Text {
        /// Visual properties.
        #[serde(default)]
        style: TextStyle,
        /// Content/binding properties.
        config: TextConfig,
    },

    /// An image bound to a media asset.
    Image {
        /// Visual properties.
        #[serde(default)]
        style: ImageStyle,
        /// Content/binding properties.
        config: ImageConfig,
    },

    /// A decorative shape.
    Shape {
        /// Visual properties.
        #[serde(default)]
        style: ShapeStyle,
        /// Content/binding properties.
        #[serde(default)]
        config: ShapeConfig,
    },

    /// Text rendered from a business-data record.
    Data {
        /// Visual properties (text-like).
        #[serde(default)]
        style: TextStyle,
        /// Content/binding properties.
        config: DataConfig,
    },
}

impl ElementKind {
    /// Short variant name for logging.
    #[must_use]
    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Image { .. } => "image",
            Self::Shape { .. } => "shape",
            Self::Data { .. } => "data",
        }
    }

    /// The content field this element binds to, if any.
    #[must_use]
    pub fn field_id(&self) -> Option<&str> {
        match self {
            Self::Text { config, .. } => Some(&config.field_id),
            Self::Image { config, .. } => Some(&config.field_id),
            Self::Data { config, .. } => Some(&config.field_id),
            Self::Shape { .. } => None,
        }
    }

    /// Whether this variant supports content-driven (`auto`) sizing.
    #[must_use]
    pub fn supports_auto_size(&self) -> bool {
        matches!(self, Self::Text { .. } | Self::Data { .. })
    }
}

/// Partial style update, tagged by variant.
///
/// Style structs are all-`Option`, so the patch payload is the style struct
/// itself: `Some` fields win, `None` fields leave the stored value alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "lowercase")]
pub enum StylePatch {
    /// Patch for a text element.
    Text(TextStyle),
    /// Patch for an image element.
    Image(ImageStyle),
    /// Patch for a shape element.
    Shape(ShapeStyle),
    /// Patch for a data element.
    Data(TextStyle),
}

/// Partial config update for a text element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextConfigPatch {
    /// New content value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// New placeholder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// New label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// New length constraint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    /// New required flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// New multiline flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiline: Option<bool>,
}

/// Partial config update for an image element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageConfigPatch {
    /// New bound asset URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// New fallback URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_url: Option<String>,
    /// New fit mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_fit: Option<ObjectFit>,
    /// Replacement tag set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<std::collections::BTreeSet<String>>,
}

/// Partial config update for a shape element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapeConfigPatch {
    /// New shape kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ShapeKind>,
}

/// Partial config update for a data element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataConfigPatch {
    /// New data path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_path: Option<String>,
    /// New display format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<DataFormat>,
    /// New prefix literal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// New suffix literal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

/// Partial config update, tagged by variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "lowercase")]
pub enum ConfigPatch {
    /// Patch for a text element.
    Text(TextConfigPatch),
    /// Patch for an image element.
    Image(ImageConfigPatch),
    /// Patch for a shape element.
    Shape(ShapeConfigPatch),
    /// Patch for a data element.
    Data(DataConfigPatch),
}

/// Partial position update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionPatch {
    /// New x coordinate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    /// New y coordinate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
}

/// Partial size update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SizePatch {
    /// New width dimension.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Dimension>,
    /// New height dimension.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Dimension>,
}

/// A partial update to one element. Absent parts are untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementPatch {
    /// Position change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<PositionPatch>,
    /// Size change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<SizePatch>,
    /// Style change (ignored on variant mismatch).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StylePatch>,
    /// Config change (ignored on variant mismatch).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ConfigPatch>,
}

/// A slide element with content, position, size, and layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Unique identifier.
    pub id: ElementId,
    /// Variant with its style and config.
    #[serde(flatten)]
    pub kind: ElementKind,
    /// Top-left position in logical canvas units.
    pub position: Position,
    /// Size in logical canvas units, per-axis fixed or `auto`.
    pub size: Size,
    /// Layer for render ordering; ascending, ties broken by insertion order.
    pub z_index: i32,
}

impl Element {
    /// Create a new element with the given kind at the origin.
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        Self {
            id: ElementId::new(),
            kind,
            position: Position::default(),
            size: Size::default(),
            z_index: 0,
        }
    }

    /// Set the position.
    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Set the size.
    #[must_use]
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Set the z-index.
    #[must_use]
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Apply a partial update in place.
    ///
    /// Style/config patches whose variant does not match this element are
    /// ignored; a patch can never change an element's variant.
    pub fn apply_patch(&mut self, patch: &ElementPatch) {
        if let Some(pos) = &patch.position {
            if let Some(x) = pos.x {
                self.position.x = x;
            }
            if let Some(y) = pos.y {
                self.position.y = y;
            }
        }
        if let Some(size) = &patch.size {
            if let Some(width) = size.width {
                self.size.width = width;
            }
            if let Some(height) = size.height {
                self.size.height = height;
            }
        }
        if let Some(style) = &patch.style {
            self.apply_style_patch(style);
        }
        if let Some(config) = &patch.config {
            self.apply_config_patch(config);
        }
    }

    fn apply_style_patch(&mut self, patch: &StylePatch) {
        match (&mut self.kind, patch) {
            (ElementKind::Text { style, .. }, StylePatch::Text(p))
            | (ElementKind::Data { style, .. }, StylePatch::Data(p)) => style.merge(p),
            (ElementKind::Image { style, .. }, StylePatch::Image(p)) => style.merge(p),
            (ElementKind::Shape { style, .. }, StylePatch::Shape(p)) => style.merge(p),
            _ => {
                tracing::trace!(
                    element = %self.id,
                    variant = self.kind.variant_name(),
                    "style patch variant mismatch, ignored"
                );
            }
        }
    }

    fn apply_config_patch(&mut self, patch: &ConfigPatch) {
        match (&mut self.kind, patch) {
            (ElementKind::Text { config, .. }, ConfigPatch::Text(p)) => {
                if let Some(v) = &p.default_value {
                    config.default_value = Some(v.clone());
                }
                if let Some(v) = &p.placeholder {
                    config.placeholder = Some(v.clone());
                }
                if let Some(v) = &p.label {
                    config.label = Some(v.clone());
                }
                if let Some(v) = p.max_length {
                    config.max_length = Some(v);
                }
                if let Some(v) = p.required {
                    config.required = v;
                }
                if let Some(v) = p.multiline {
                    config.multiline = v;
                }
            }
            (ElementKind::Image { config, .. }, ConfigPatch::Image(p)) => {
                if let Some(v) = &p.url {
                    config.url = Some(v.clone());
                }
                if let Some(v) = &p.fallback_url {
                    config.fallback_url = Some(v.clone());
                }
                if let Some(v) = p.object_fit {
                    config.object_fit = v;
                }
                if let Some(v) = &p.tags {
                    config.tags = v.clone();
                }
            }
            (ElementKind::Shape { config, .. }, ConfigPatch::Shape(p)) => {
                if let Some(v) = p.kind {
                    config.kind = v;
                }
            }
            (ElementKind::Data { config, .. }, ConfigPatch::Data(p)) => {
                if let Some(v) = &p.data_path {
                    config.data_path = v.clone();
                }
                if let Some(v) = p.format {
                    config.format = v;
                }
                if let Some(v) = &p.prefix {
                    config.prefix = Some(v.clone());
                }
                if let Some(v) = &p.suffix {
                    config.suffix = Some(v.clone());
                }
            }
            _ => {
                tracing::trace!(
                    element = %self.id,
                    variant = self.kind.variant_name(),
                    "config patch variant mismatch, ignored"
                );
            }
        }
    }
}
