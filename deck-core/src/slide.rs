//! The slide document - an ordered collection of elements on a fixed
//! logical canvas.
//!
//! All mutation goes through explicit operations. Operations referencing a
//! missing element id return unchanged documents, never errors: UI race
//! conditions (delete-then-drag) must not crash an editing session.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::element::{Element, ElementId, ElementKind, ElementPatch, Position, Size};

/// Logical canvas width in design units.
pub const CANVAS_WIDTH: f32 = 1920.0;

/// Logical canvas height in design units.
pub const CANVAS_HEIGHT: f32 = 1080.0;

/// Offset applied to a duplicated element's position.
pub const DUPLICATE_OFFSET: f32 = 16.0;

/// Unique identifier for a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlideId(Uuid);

impl SlideId {
    /// Create a new unique slide ID.
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

impl Default for SlideId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SlideId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fixed logical canvas size. Zoom is purely a view transform and never
/// changes these values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    /// Width in logical design units.
    pub width: f32,
    /// Height in logical design units.
    pub height: f32,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
        }
    }
}

/// Slide background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Background {
    /// Solid background color as hex.
    Color {
        /// Hex color value.
        value: String,
    },
    /// Full-bleed background image.
    Image {
        /// Image URL.
        url: String,
    },
}

impl Default for Background {
    fn default() -> Self {
        Self::Color {
            value: "#FFFFFF".to_string(),
        }
    }
}

/// A slide: elements on a fixed logical canvas, rendered ascending by
/// z-index with insertion order breaking ties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    /// Unique identifier.
    pub id: SlideId,
    /// Position among sibling slides in the deck.
    pub order: u32,
    /// Logical canvas size.
    #[serde(default)]
    pub canvas: CanvasSize,
    /// Background fill.
    #[serde(default)]
    pub background: Background,
    /// Elements in insertion order.
    elements: Vec<Element>,
}

impl Slide {
    /// Create an empty slide.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: SlideId::new(),
            order: 0,
            canvas: CanvasSize::default(),
            background: Background::default(),
            elements: Vec::new(),
        }
    }

    /// Set the deck order.
    #[must_use]
    pub fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    /// Set the background.
    #[must_use]
    pub fn with_background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }

    /// Add an existing element, returning its id.
    pub fn insert(&mut self, element: Element) -> ElementId {
        let id = element.id;
        self.elements.push(element);
        id
    }

    /// Create a new element of the given kind, placed on top of everything
    /// already present.
    pub fn create_element(&mut self, kind: ElementKind, position: Position, size: Size) -> ElementId {
        let element = Element::new(kind)
            .with_position(position)
            .with_size(size)
            .with_z_index(self.next_z_index());
        self.insert(element)
    }

    /// Apply a partial update to an element. No-op if the id is missing.
    pub fn update(&mut self, id: ElementId, patch: &ElementPatch) {
        if let Some(element) = self.elements.iter_mut().find(|e| e.id == id) {
            element.apply_patch(patch);
        } else {
            tracing::trace!(element = %id, "update on missing element ignored");
        }
    }

    /// Remove an element. No-op if the id is missing.
    pub fn delete(&mut self, id: ElementId) {
        let before = self.elements.len();
        self.elements.retain(|e| e.id != id);
        if self.elements.len() == before {
            tracing::trace!(element = %id, "delete on missing element ignored");
        }
    }

    /// Clone an element with a new id, a slight position offset, and a
    /// z-index above every existing element, so the copy always renders on
    /// top. Returns `None` (and leaves the document unchanged) if the id is
    /// missing.
    pub fn duplicate(&mut self, id: ElementId) -> Option<ElementId> {
        let source = self.elements.iter().find(|e| e.id == id)?.clone();
        let z_index = self.next_z_index();

        let mut copy = source;
        copy.id = ElementId::new();
        copy.z_index = z_index;
        copy.position = Position {
            x: (copy.position.x + DUPLICATE_OFFSET).min(self.canvas.width - 1.0),
            y: (copy.position.y + DUPLICATE_OFFSET).min(self.canvas.height - 1.0),
        };

        Some(self.insert(copy))
    }

    /// One above the highest existing z-index (0 for an empty slide).
    #[must_use]
    pub fn next_z_index(&self) -> i32 {
        self.elements
            .iter()
            .map(|e| e.z_index)
            .max()
            .map_or(0, |max| max + 1)
    }

    /// Get an element by id.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Get a mutable reference to an element by id.
    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    /// All elements in insertion order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    /// Elements in render order: ascending z-index, ties broken by
    /// insertion order. Recomputed on every call, never cached, so it can
    /// never go stale across mutations.
    #[must_use]
    pub fn render_order(&self) -> Vec<&Element> {
        let mut ordered: Vec<&Element> = self.elements.iter().collect();
        // Vec order is insertion order and the sort is stable.
        ordered.sort_by_key(|e| e.z_index);
        ordered
    }

    /// Number of elements on the slide.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Whether the slide has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl Default for Slide {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{TextConfig, TextStyle};

    fn text_kind(field_id: &str) -> ElementKind {
        ElementKind::Text {
            style: TextStyle::default(),
            config: TextConfig {
                field_id: field_id.to_string(),
                ..TextConfig::default()
            },
        }
    }

    #[test]
    fn test_create_assigns_ascending_z() {
        let mut slide = Slide::new();
        let a = slide.create_element(text_kind("a"), Position::new(0.0, 0.0), Size::default());
        let b = slide.create_element(text_kind("b"), Position::new(0.0, 0.0), Size::default());

        assert_eq!(slide.get(a).expect("a").z_index, 0);
        assert_eq!(slide.get(b).expect("b").z_index, 1);
    }

    #[test]
    fn test_render_order_is_stable_for_equal_z() {
        let mut slide = Slide::new();
        let first = slide.insert(Element::new(text_kind("first")).with_z_index(5));
        let second = slide.insert(Element::new(text_kind("second")).with_z_index(5));
        let below = slide.insert(Element::new(text_kind("below")).with_z_index(1));

        let order: Vec<ElementId> = slide.render_order().iter().map(|e| e.id).collect();
        assert_eq!(order, vec![below, first, second]);
    }

    #[test]
    fn test_duplicate_lands_on_top() {
        let mut slide = Slide::new();
        let low = slide.insert(
            Element::new(text_kind("low"))
                .with_position(Position::new(100.0, 100.0))
                .with_z_index(2),
        );
        slide.insert(Element::new(text_kind("high")).with_z_index(9));

        let copy = slide.duplicate(low).expect("duplicate");
        let copied = slide.get(copy).expect("copied element");

        assert_eq!(copied.z_index, 10);
        assert_eq!(copied.position, Position::new(116.0, 116.0));
        // Source untouched.
        assert_eq!(slide.get(low).expect("source").z_index, 2);
    }

    #[test]
    fn test_missing_id_operations_are_noops() {
        let mut slide = Slide::new();
        slide.create_element(text_kind("a"), Position::new(0.0, 0.0), Size::default());
        let before = slide.clone();

        let ghost = ElementId::new();
        slide.delete(ghost);
        slide.update(ghost, &ElementPatch::default());
        assert_eq!(slide.duplicate(ghost), None);
        assert_eq!(slide, before);
    }
}
