//! Template model - reusable slide layouts with default styling and a
//! content schema.
//!
//! Templates are read-only at application time: applying one to a slide
//! never mutates the template. A template is either *visual* (it carries an
//! explicit list of element seeds with positions) or *legacy* (a content
//! schema only; the engine synthesizes a layout).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use deck_core::element::{ElementKind, Position, Size};
use deck_core::resolve::SlotStyling;

/// Unique identifier for a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemplateId(Uuid);

impl TemplateId {
    /// Create a new unique template ID.
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

impl Default for TemplateId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Subscription tier required to apply a template. Ordered: every tier
/// covers the tiers below it.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AccessTier {
    /// Available to everyone.
    #[default]
    Free,
    /// Paid tier.
    Pro,
    /// Top tier.
    Premium,
}

/// The kind of content a schema field expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Single-line text.
    Text,
    /// Multi-line text.
    Multiline,
    /// A media asset URL.
    Image,
}

/// One field of a template's content schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentField {
    /// Content field id, matching element `config.field_id`.
    pub field_id: String,
    /// Human-readable label.
    pub label: String,
    /// Expected content kind.
    pub kind: FieldKind,
    /// Whether the field must carry content.
    #[serde(default)]
    pub required: bool,
}

/// A positioned element prototype inside a visual template.
///
/// Seeds carry their own placeholder content by construction, which is why
/// applying a visual template never needs generated content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementSeed {
    /// Prototype kind, cloned into the new element with a fresh id.
    #[serde(flatten)]
    pub kind: ElementKind,
    /// Top-left position in logical units.
    pub position: Position,
    /// Element size.
    pub size: Size,
    /// Layer.
    #[serde(default)]
    pub z_index: i32,
}

/// Template layout: explicit seeds, or a schema the engine lays out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TemplateLayout {
    /// Visual template with explicit element seeds.
    Visual {
        /// Seeds in insertion order.
        seeds: Vec<ElementSeed>,
    },
    /// Legacy free-form template carrying a content schema only.
    Legacy {
        /// Content fields the synthesized layout presents.
        schema: Vec<ContentField>,
    },
}

/// A reusable slide template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Unique identifier.
    pub id: TemplateId,
    /// Display name, also the generation fallback content.
    pub name: String,
    /// Category used to key AI content generation, e.g. `"problem"`.
    pub category: String,
    /// Subscription tier required to apply this template.
    #[serde(default)]
    pub access_tier: AccessTier,
    /// Layout definition.
    pub layout: TemplateLayout,
    /// Default styling per content slot, consumed by the resolver.
    #[serde(default)]
    pub default_styling: HashMap<String, SlotStyling>,
}

impl Template {
    /// Create a template with the given name, category, and layout.
    #[must_use]
    pub fn new(name: impl Into<String>, category: impl Into<String>, layout: TemplateLayout) -> Self {
        Self {
            id: TemplateId::new(),
            name: name.into(),
            category: category.into(),
            access_tier: AccessTier::Free,
            layout,
            default_styling: HashMap::new(),
        }
    }

    /// Set the access tier.
    #[must_use]
    pub fn with_access_tier(mut self, tier: AccessTier) -> Self {
        self.access_tier = tier;
        self
    }

    /// Set the per-slot default styling.
    #[must_use]
    pub fn with_styling(mut self, styling: HashMap<String, SlotStyling>) -> Self {
        self.default_styling = styling;
        self
    }

    /// Whether this template carries explicit element seeds.
    #[must_use]
    pub fn is_visual(&self) -> bool {
        matches!(self.layout, TemplateLayout::Visual { .. })
    }
}
