//! Canvas interaction state and the editing session controller.
//!
//! Interaction state is ephemeral: created fresh per editing session,
//! discarded on navigation, never written to storage (it deliberately does
//! not implement `Serialize`). Every command is a total function over the
//! current state; a command referencing a missing element id is a silent
//! no-op, because UI races like delete-then-drag must not crash a session.
//!
//! All coordinates handled here are logical canvas units unless a method
//! name says `screen`. Zoom is purely a view transform: it converts screen
//! deltas to logical deltas (`screen / zoom`) and never touches stored
//! element coordinates.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::brand::BrandKit;
use crate::element::{Dimension, Element, ElementId, ElementKind, Position, Size};
use crate::resolve::{resolve_element, ResolveContext, ResolvedSize, SlotStyling};
use crate::slide::Slide;

/// The discrete, ordered set of permitted zoom levels.
pub const ZOOM_LEVELS: [f32; 7] = [0.25, 0.5, 0.75, 1.0, 1.5, 2.0, 3.0];

/// Default grid cell size in logical units.
pub const DEFAULT_GRID_SIZE: f32 = 20.0;

/// Minimum element dimension an interactive resize may produce.
pub const MIN_RESIZE: f32 = 8.0;

/// Grid display and snapping settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSettings {
    /// Whether grid lines are drawn.
    pub visible: bool,
    /// Whether drops snap to the grid.
    pub snap: bool,
    /// Grid cell size in logical units.
    pub size: f32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            visible: false,
            snap: false,
            size: DEFAULT_GRID_SIZE,
        }
    }
}

/// Alignment guide settings.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GuideSettings {
    /// Whether alignment guides are drawn.
    pub visible: bool,
}

/// An in-flight drag.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DragState {
    element: ElementId,
    element_start: Position,
    pointer_start: Position,
}

/// Ephemeral per-session editing state.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionState {
    /// Selected element ids, in selection order.
    pub selected: Vec<ElementId>,
    /// The element under the pointer, if any. Independent of selection.
    pub hovered: Option<ElementId>,
    /// Current zoom level. A view transform only.
    pub zoom: f32,
    /// Grid settings.
    pub grid: GridSettings,
    /// Guide settings.
    pub guides: GuideSettings,
    drag: Option<DragState>,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            selected: Vec::new(),
            hovered: None,
            zoom: 1.0,
            grid: GridSettings::default(),
            guides: GuideSettings::default(),
            drag: None,
        }
    }
}

/// A palette definition dropped onto the canvas to create an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteItem {
    /// Prototype kind cloned into the new element.
    pub kind: ElementKind,
    /// Default size of the spawned element.
    pub default_size: Size,
}

/// Which resize handle is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    /// Top edge.
    North,
    /// Bottom edge.
    South,
    /// Right edge.
    East,
    /// Left edge.
    West,
    /// Top-right corner.
    NorthEast,
    /// Top-left corner.
    NorthWest,
    /// Bottom-right corner.
    SouthEast,
    /// Bottom-left corner.
    SouthWest,
}

impl ResizeHandle {
    fn moves_left_edge(self) -> bool {
        matches!(self, Self::West | Self::NorthWest | Self::SouthWest)
    }

    fn moves_top_edge(self) -> bool {
        matches!(self, Self::North | Self::NorthEast | Self::NorthWest)
    }

    fn affects_width(self) -> bool {
        !matches!(self, Self::North | Self::South)
    }

    fn affects_height(self) -> bool {
        !matches!(self, Self::East | Self::West)
    }
}

/// An editing session: one slide plus its ephemeral interaction state and
/// the ambient context needed to hit-test rendered bounds.
#[derive(Debug, Clone)]
pub struct EditorSession {
    slide: Slide,
    /// Interaction state, discarded when the session ends.
    pub state: InteractionState,
    brand: Option<BrandKit>,
    data: Option<serde_json::Value>,
    styling: Option<HashMap<String, SlotStyling>>,
}

impl EditorSession {
    /// Start a session over a slide.
    #[must_use]
    pub fn new(slide: Slide) -> Self {
        Self {
            slide,
            state: InteractionState::default(),
            brand: None,
            data: None,
            styling: None,
        }
    }

    /// Attach the project's brand kit.
    #[must_use]
    pub fn with_brand(mut self, brand: BrandKit) -> Self {
        self.brand = Some(brand);
        self
    }

    /// Attach the business-data record for data elements.
    #[must_use]
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Attach template slot styling for elements that came from a template.
    #[must_use]
    pub fn with_styling(mut self, styling: HashMap<String, SlotStyling>) -> Self {
        self.styling = Some(styling);
        self
    }

    /// The slide under edit.
    #[must_use]
    pub fn slide(&self) -> &Slide {
        &self.slide
    }

    /// Mutable access to the slide for model-level commands.
    pub fn slide_mut(&mut self) -> &mut Slide {
        &mut self.slide
    }

    /// Consume the session, yielding a complete document snapshot for
    /// persistence. Interaction state never travels with it.
    #[must_use]
    pub fn into_slide(self) -> Slide {
        self.slide
    }

    /// The resolve context for this session's ambient inputs.
    #[must_use]
    pub fn resolve_ctx(&self) -> ResolveContext<'_> {
        ResolveContext {
            styling: self.styling.as_ref(),
            brand: self.brand.as_ref(),
            data: self.data.as_ref(),
        }
    }

    /// Topmost element whose rendered bounds contain the logical point.
    /// Highest z wins; equal z goes to the later-inserted element.
    #[must_use]
    pub fn hit_test(&self, x: f32, y: f32) -> Option<ElementId> {
        let ctx = self.resolve_ctx();
        self.slide
            .render_order()
            .into_iter()
            .rev()
            .find(|element| {
                let size = resolve_element(element, &ctx).size;
                contains(element.position, size, x, y)
            })
            .map(|element| element.id)
    }

    /// Pointer moved to a logical point: update hover. Hover never changes
    /// selection.
    pub fn hover_at(&mut self, x: f32, y: f32) {
        self.state.hovered = self.hit_test(x, y);
    }

    /// Pointer left the canvas.
    pub fn clear_hover(&mut self) {
        self.state.hovered = None;
    }

    /// Click at a logical point: select the hit element, or clear the
    /// selection on empty canvas.
    pub fn select_at(&mut self, x: f32, y: f32) {
        match self.hit_test(x, y) {
            Some(id) => self.select(id),
            None => self.deselect_all(),
        }
    }

    /// Select exactly one element. No-op if the id is missing.
    pub fn select(&mut self, id: ElementId) {
        if self.slide.get(id).is_some() {
            self.state.selected = vec![id];
        }
    }

    /// Add an element to the selection for bulk operations. No-op if the id
    /// is missing or already selected.
    pub fn extend_selection(&mut self, id: ElementId) {
        if self.slide.get(id).is_some() && !self.state.selected.contains(&id) {
            self.state.selected.push(id);
        }
    }

    /// Clear the selection.
    pub fn deselect_all(&mut self) {
        self.state.selected.clear();
    }

    /// The single element the properties surface may edit. `None` unless
    /// exactly one element is selected.
    #[must_use]
    pub fn property_target(&self) -> Option<ElementId> {
        match self.state.selected.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// Delete every selected element.
    pub fn delete_selected(&mut self) {
        for id in std::mem::take(&mut self.state.selected) {
            self.slide.delete(id);
            if self.state.hovered == Some(id) {
                self.state.hovered = None;
            }
        }
    }

    /// Duplicate every selected element; the copies become the selection.
    pub fn duplicate_selected(&mut self) {
        let sources = std::mem::take(&mut self.state.selected);
        let copies: Vec<ElementId> = sources
            .into_iter()
            .filter_map(|id| self.slide.duplicate(id))
            .collect();
        self.state.selected = copies;
    }

    /// Begin dragging a selected element from a logical pointer position.
    /// No-op when the element is missing or not selected.
    pub fn begin_drag(&mut self, id: ElementId, pointer: Position) {
        if !self.state.selected.contains(&id) {
            return;
        }
        let Some(element) = self.slide.get(id) else {
            tracing::trace!(element = %id, "drag begin on missing element ignored");
            return;
        };
        self.state.drag = Some(DragState {
            element: id,
            element_start: element.position,
            pointer_start: pointer,
        });
    }

    /// Continue an in-flight drag. The position updates continuously and is
    /// clamped inside the canvas; snapping waits for the drop.
    pub fn drag_to(&mut self, pointer: Position) {
        let Some(drag) = self.state.drag else {
            return;
        };
        let canvas = self.slide.canvas;
        let ctx_size = {
            let ctx = self.resolve_ctx();
            self.slide
                .get(drag.element)
                .map(|element| resolve_element(element, &ctx).size)
        };
        let Some(size) = ctx_size else {
            // Deleted mid-drag; drop the gesture.
            self.state.drag = None;
            return;
        };

        let proposed = Position {
            x: drag.element_start.x + (pointer.x - drag.pointer_start.x),
            y: drag.element_start.y + (pointer.y - drag.pointer_start.y),
        };
        let clamped = clamp_to_canvas(proposed, size, canvas.width, canvas.height);

        if let Some(element) = self.slide.get_mut(drag.element) {
            element.position = clamped;
        }
    }

    /// Finish a drag. Grid snapping is a commit-time adjustment: the drag
    /// itself stays free-form for responsiveness.
    pub fn end_drag(&mut self) {
        let Some(drag) = self.state.drag.take() else {
            return;
        };
        if !self.state.grid.snap {
            return;
        }
        let canvas = self.slide.canvas;
        let grid = self.state.grid.size.max(1.0);
        let size = {
            let ctx = self.resolve_ctx();
            self.slide
                .get(drag.element)
                .map(|element| resolve_element(element, &ctx).size)
        };
        let (Some(size), Some(element)) = (size, self.slide.get_mut(drag.element)) else {
            return;
        };
        let snapped = Position {
            x: (element.position.x / grid).round() * grid,
            y: (element.position.y / grid).round() * grid,
        };
        element.position = clamp_to_canvas(snapped, size, canvas.width, canvas.height);
    }

    /// Resize the currently selected element by a logical delta from the
    /// given handle. Width and height are written back as plain numbers
    /// rounded to whole logical units; `auto` is never produced here.
    pub fn resize(&mut self, id: ElementId, handle: ResizeHandle, dx: f32, dy: f32) {
        if self.property_target() != Some(id) {
            return;
        }
        let effective = {
            let ctx = self.resolve_ctx();
            self.slide
                .get(id)
                .map(|element| resolve_element(element, &ctx).size)
        };
        let canvas = self.slide.canvas;
        let (Some(effective), Some(element)) = (effective, self.slide.get_mut(id)) else {
            return;
        };

        let mut width = effective.width;
        let mut height = effective.height;
        let mut position = element.position;

        if handle.affects_width() {
            if handle.moves_left_edge() {
                width -= dx;
                position.x += dx;
            } else {
                width += dx;
            }
        }
        if handle.affects_height() {
            if handle.moves_top_edge() {
                height -= dy;
                position.y += dy;
            } else {
                height += dy;
            }
        }

        // Fractional zoom produces fractional logical deltas; commit whole
        // logical units.
        width = width.round().max(MIN_RESIZE);
        height = height.round().max(MIN_RESIZE);
        position = Position {
            x: position.x.round(),
            y: position.y.round(),
        };

        element.size = Size {
            width: Dimension::Px(width),
            height: Dimension::Px(height),
        };
        element.position = clamp_to_canvas(
            position,
            ResolvedSize { width, height },
            canvas.width,
            canvas.height,
        );
    }

    /// Drop a palette definition at a screen-space point, converting through
    /// the current zoom (`logical = screen / zoom`), centering the default
    /// size on the drop point, and clamping to non-negative coordinates.
    /// The new element spawns above everything else.
    pub fn drop_create(&mut self, item: &PaletteItem, screen_x: f32, screen_y: f32) -> ElementId {
        let zoom = self.state.zoom.max(f32::EPSILON);
        let default_width = item.default_size.width.px().unwrap_or(200.0);
        let default_height = item.default_size.height.px().unwrap_or(100.0);

        let position = Position {
            x: (screen_x / zoom - default_width / 2.0).max(0.0),
            y: (screen_y / zoom - default_height / 2.0).max(0.0),
        };

        let id = self
            .slide
            .create_element(item.kind.clone(), position, item.default_size);
        tracing::debug!(element = %id, variant = item.kind.variant_name(), "element dropped onto canvas");
        self.select(id);
        id
    }

    /// Step one level up the zoom ladder.
    pub fn zoom_in(&mut self) {
        self.state.zoom = step_zoom(self.state.zoom, 1);
    }

    /// Step one level down the zoom ladder.
    pub fn zoom_out(&mut self) {
        self.state.zoom = step_zoom(self.state.zoom, -1);
    }

    /// Reset to the 1.0 level.
    pub fn zoom_fit(&mut self) {
        self.state.zoom = 1.0;
    }
}

fn contains(position: Position, size: ResolvedSize, x: f32, y: f32) -> bool {
    x >= position.x
        && x <= position.x + size.width
        && y >= position.y
        && y <= position.y + size.height
}

/// Clamp a position so the element stays fully inside the logical canvas.
fn clamp_to_canvas(
    position: Position,
    size: ResolvedSize,
    canvas_width: f32,
    canvas_height: f32,
) -> Position {
    Position {
        x: position.x.clamp(0.0, (canvas_width - size.width).max(0.0)),
        y: position.y.clamp(0.0, (canvas_height - size.height).max(0.0)),
    }
}

/// Find the nearest ladder entry and move `direction` steps, saturating at
/// the ends.
fn step_zoom(current: f32, direction: i32) -> f32 {
    let nearest = ZOOM_LEVELS
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            (**a - current)
                .abs()
                .partial_cmp(&(**b - current).abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map_or(3, |(i, _)| i);

    let next = nearest.saturating_add_signed(direction as isize);
    ZOOM_LEVELS[next.min(ZOOM_LEVELS.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ShapeConfig, ShapeStyle, TextConfig, TextStyle};

    fn shape_kind() -> ElementKind {
        ElementKind::Shape {
            style: ShapeStyle::default(),
            config: ShapeConfig::default(),
        }
    }

    fn session_with_shape(x: f32, y: f32, w: f32, h: f32) -> (EditorSession, ElementId) {
        let mut slide = Slide::new();
        let id = slide.create_element(shape_kind(), Position::new(x, y), Size::fixed(w, h));
        (EditorSession::new(slide), id)
    }

    #[test]
    fn test_hover_is_independent_of_selection() {
        let (mut session, id) = session_with_shape(100.0, 100.0, 50.0, 50.0);

        session.hover_at(120.0, 120.0);
        assert_eq!(session.state.hovered, Some(id));
        assert!(session.state.selected.is_empty());

        session.hover_at(500.0, 500.0);
        assert_eq!(session.state.hovered, None);
    }

    #[test]
    fn test_hit_test_prefers_topmost() {
        let mut slide = Slide::new();
        let below = slide.insert(
            Element::new(shape_kind())
                .with_position(Position::new(0.0, 0.0))
                .with_size(Size::fixed(100.0, 100.0))
                .with_z_index(1),
        );
        let above = slide.insert(
            Element::new(shape_kind())
                .with_position(Position::new(50.0, 50.0))
                .with_size(Size::fixed(100.0, 100.0))
                .with_z_index(5),
        );
        let session = EditorSession::new(slide);

        assert_eq!(session.hit_test(75.0, 75.0), Some(above));
        assert_eq!(session.hit_test(10.0, 10.0), Some(below));
    }

    #[test]
    fn test_click_empty_canvas_clears_selection() {
        let (mut session, id) = session_with_shape(100.0, 100.0, 50.0, 50.0);
        session.select_at(120.0, 120.0);
        assert_eq!(session.state.selected, vec![id]);

        session.select_at(1500.0, 900.0);
        assert!(session.state.selected.is_empty());
    }

    #[test]
    fn test_drag_clamps_to_canvas() {
        let (mut session, id) = session_with_shape(100.0, 100.0, 50.0, 50.0);
        session.select(id);
        session.begin_drag(id, Position::new(110.0, 110.0));

        // Huge negative delta: never goes below the origin.
        session.drag_to(Position::new(-10_000.0, -10_000.0));
        let pos = session.slide().get(id).expect("element").position;
        assert_eq!((pos.x, pos.y), (0.0, 0.0));

        // Huge positive delta: never overflows the canvas.
        session.drag_to(Position::new(50_000.0, 50_000.0));
        let pos = session.slide().get(id).expect("element").position;
        assert_eq!((pos.x, pos.y), (1870.0, 1030.0));
    }

    #[test]
    fn test_snap_applies_on_drop_not_during_drag() {
        let (mut session, id) = session_with_shape(100.0, 100.0, 50.0, 50.0);
        session.state.grid.snap = true;
        session.select(id);
        session.begin_drag(id, Position::new(0.0, 0.0));

        session.drag_to(Position::new(7.0, 7.0));
        let mid = session.slide().get(id).expect("element").position;
        assert_eq!((mid.x, mid.y), (107.0, 107.0));

        session.end_drag();
        let dropped = session.slide().get(id).expect("element").position;
        assert_eq!((dropped.x, dropped.y), (100.0, 100.0));
    }

    #[test]
    fn test_drag_missing_element_is_silent() {
        let (mut session, id) = session_with_shape(100.0, 100.0, 50.0, 50.0);
        session.select(id);
        session.begin_drag(id, Position::new(0.0, 0.0));
        session.slide_mut().delete(id);

        // Delete-then-drag: must not panic, gesture just dies.
        session.drag_to(Position::new(10.0, 10.0));
        session.end_drag();
    }

    #[test]
    fn test_resize_rounds_to_whole_units_and_moves_origin() {
        let (mut session, id) = session_with_shape(100.0, 100.0, 50.0, 50.0);
        session.select(id);

        // North-west handle: fractional deltas from a 0.75 zoom.
        session.resize(id, ResizeHandle::NorthWest, -10.4, -10.4);
        let element = session.slide().get(id).expect("element");
        assert_eq!(element.size, Size::fixed(60.0, 60.0));
        assert_eq!(element.position, Position::new(90.0, 90.0));
    }

    #[test]
    fn test_resize_requires_single_selection() {
        let (mut session, id) = session_with_shape(100.0, 100.0, 50.0, 50.0);
        let other = session.slide_mut().create_element(
            shape_kind(),
            Position::new(300.0, 300.0),
            Size::fixed(40.0, 40.0),
        );
        session.select(id);
        session.extend_selection(other);

        session.resize(id, ResizeHandle::SouthEast, 10.0, 10.0);
        assert_eq!(
            session.slide().get(id).expect("element").size,
            Size::fixed(50.0, 50.0)
        );
    }

    #[test]
    fn test_drop_create_spawn_math_under_zoom() {
        let mut session = EditorSession::new(Slide::new());
        session.state.zoom = 2.0;

        let item = PaletteItem {
            kind: ElementKind::Text {
                style: TextStyle::default(),
                config: TextConfig {
                    field_id: "headline".to_string(),
                    ..TextConfig::default()
                },
            },
            default_size: Size::fixed(200.0, 80.0),
        };
        let id = session.drop_create(&item, 400.0, 200.0);
        let element = session.slide().get(id).expect("element");

        // logical = screen / zoom, centered: 400/2 - 100 = 100, 200/2 - 40 = 60.
        assert_eq!(element.position, Position::new(100.0, 60.0));
        assert_eq!(element.z_index, 0);
        assert_eq!(session.state.selected, vec![id]);
    }

    #[test]
    fn test_drop_create_clamps_to_origin() {
        let mut session = EditorSession::new(Slide::new());
        let item = PaletteItem {
            kind: shape_kind(),
            default_size: Size::fixed(200.0, 80.0),
        };
        let id = session.drop_create(&item, 10.0, 10.0);
        let element = session.slide().get(id).expect("element");
        assert_eq!(element.position, Position::new(0.0, 0.0));
    }

    #[test]
    fn test_zoom_ladder_steps_and_saturates() {
        let mut session = EditorSession::new(Slide::new());
        assert_eq!(session.state.zoom, 1.0);

        session.zoom_in();
        assert_eq!(session.state.zoom, 1.5);
        session.zoom_in();
        session.zoom_in();
        session.zoom_in();
        assert_eq!(session.state.zoom, 3.0);

        session.zoom_fit();
        assert_eq!(session.state.zoom, 1.0);
        session.zoom_out();
        assert_eq!(session.state.zoom, 0.75);
    }

    #[test]
    fn test_property_target_requires_exactly_one() {
        let (mut session, id) = session_with_shape(0.0, 0.0, 10.0, 10.0);
        assert_eq!(session.property_target(), None);

        session.select(id);
        assert_eq!(session.property_target(), Some(id));

        let other = session.slide_mut().create_element(
            shape_kind(),
            Position::new(50.0, 50.0),
            Size::fixed(10.0, 10.0),
        );
        session.extend_selection(other);
        assert_eq!(session.property_target(), None);
    }

    #[test]
    fn test_duplicate_selected_moves_selection_to_copies() {
        let (mut session, id) = session_with_shape(10.0, 10.0, 20.0, 20.0);
        session.select(id);
        session.duplicate_selected();

        assert_eq!(session.state.selected.len(), 1);
        let copy = session.state.selected[0];
        assert_ne!(copy, id);
        assert_eq!(session.slide().element_count(), 2);
    }
}
