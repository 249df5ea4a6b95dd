//! Canonical serialized representation for slides shared across the HTTP
//! surface, persistence, and export requests.

use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementId, ElementKind, Position, Size};
use crate::slide::{Background, CanvasSize, Slide, SlideId};

/// Wire-friendly element description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementDocument {
    /// Element identifier.
    pub id: String,
    /// Variant with style and config.
    #[serde(flatten)]
    pub kind: ElementKind,
    /// Top-left position in logical units.
    #[serde(default)]
    pub position: Position,
    /// Size, per-axis fixed or `"auto"`.
    #[serde(default)]
    pub size: Size,
    /// Layer.
    #[serde(default)]
    pub z_index: i32,
}

impl From<&Element> for ElementDocument {
    fn from(element: &Element) -> Self {
        Self {
            id: element.id.to_string(),
            kind: element.kind.clone(),
            position: element.position,
            size: element.size,
            z_index: element.z_index,
        }
    }
}

impl ElementDocument {
    /// Convert document to runtime element.
    ///
    /// # Errors
    ///
    /// Returns an error string if the element id is not a valid UUID.
    pub fn into_element(self) -> Result<Element, String> {
        let id = ElementId::parse(&self.id).map_err(|e| e.to_string())?;
        let mut element = Element::new(self.kind)
            .with_position(self.position)
            .with_size(self.size)
            .with_z_index(self.z_index);
        element.id = id;
        Ok(element)
    }
}

/// Canonical slide document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideDocument {
    /// Slide identifier.
    pub id: String,
    /// Position among sibling slides.
    #[serde(default)]
    pub order: u32,
    /// Logical canvas size.
    #[serde(default)]
    pub canvas: CanvasSize,
    /// Background fill.
    #[serde(default)]
    pub background: Background,
    /// Elements in insertion order.
    pub elements: Vec<ElementDocument>,
}

impl From<&Slide> for SlideDocument {
    fn from(slide: &Slide) -> Self {
        Self {
            id: slide.id.to_string(),
            order: slide.order,
            canvas: slide.canvas,
            background: slide.background.clone(),
            elements: slide.elements().map(ElementDocument::from).collect(),
        }
    }
}

impl SlideDocument {
    /// Convert document to a runtime slide.
    ///
    /// # Errors
    ///
    /// Returns an error string if the slide id or any element id is not a
    /// valid UUID.
    pub fn into_slide(self) -> Result<Slide, String> {
        let id = SlideId::parse(&self.id).map_err(|e| e.to_string())?;
        let mut slide = Slide::new()
            .with_order(self.order)
            .with_background(self.background);
        slide.id = id;
        slide.canvas = self.canvas;
        for element in self.elements {
            slide.insert(element.into_element()?);
        }
        Ok(slide)
    }
}
