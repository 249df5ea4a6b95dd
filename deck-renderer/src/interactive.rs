//! The interactive renderer: draws the current slide inside a pannable,
//! zoomable viewport for live editing.
//!
//! Content geometry comes exclusively from the shared resolver; the
//! decoration layer (grid, hover outline, selection rings, resize handles)
//! is computed strictly from already-resolved geometry and is layered after
//! content. Decorations never feed back into layout, which is what keeps
//! the editor and the static export pixel-identical.

use serde::Serialize;

use deck_core::interaction::{EditorSession, ResizeHandle};
use deck_core::resolve::{resolve_slide, ResolvedElement};
use deck_core::slide::Background;

/// Screen-space size of a resize handle square.
pub const HANDLE_SIZE: f32 = 8.0;

/// The zoom/pan view transform. Logical coordinates map to screen as
/// `screen = logical * zoom + pan`; stored element coordinates are never
/// touched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewTransform {
    /// Zoom factor.
    pub zoom: f32,
    /// Horizontal pan offset in screen units.
    pub pan_x: f32,
    /// Vertical pan offset in screen units.
    pub pan_y: f32,
}

impl ViewTransform {
    /// Map a logical rectangle to screen space.
    #[must_use]
    pub fn to_screen(&self, x: f32, y: f32, width: f32, height: f32) -> ScreenRect {
        ScreenRect {
            x: x * self.zoom + self.pan_x,
            y: y * self.zoom + self.pan_y,
            width: width * self.zoom,
            height: height * self.zoom,
        }
    }
}

/// An axis-aligned rectangle in screen units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScreenRect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

/// One rendered element: resolved values plus its screen rectangle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewNode {
    /// Resolved values from the shared resolver.
    pub resolved: ResolvedElement,
    /// Screen-space bounds under the current view transform.
    pub screen: ScreenRect,
}

/// Editing decorations drawn over the content layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Decoration {
    /// A vertical grid line at a screen x offset.
    GridLineVertical {
        /// Screen x offset.
        x: f32,
    },
    /// A horizontal grid line at a screen y offset.
    GridLineHorizontal {
        /// Screen y offset.
        y: f32,
    },
    /// Outline around the hovered element.
    HoverOutline {
        /// Outlined bounds.
        rect: ScreenRect,
    },
    /// Ring around a selected element.
    SelectionRing {
        /// Ringed bounds.
        rect: ScreenRect,
    },
    /// A resize handle on the single selected element.
    Handle {
        /// Handle square bounds.
        rect: ScreenRect,
        /// Which edge/corner this handle drives.
        handle: ResizeHandle,
    },
}

/// A complete frame for the editing viewport.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewFrame {
    /// The view transform the frame was computed under.
    pub transform: ViewTransform,
    /// Screen bounds of the slide canvas itself.
    pub canvas: ScreenRect,
    /// Slide background.
    pub background: Background,
    /// Content nodes in render order (ascending z, stable).
    pub nodes: Vec<ViewNode>,
    /// Decorations, layered strictly after content.
    pub decorations: Vec<Decoration>,
}

/// Renders editing frames from an [`EditorSession`].
#[derive(Debug, Clone, Copy, Default)]
pub struct InteractiveRenderer;

impl InteractiveRenderer {
    /// Create a renderer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Render the session's slide under its current interaction state.
    #[must_use]
    pub fn render(&self, session: &EditorSession) -> ViewFrame {
        let slide = session.slide();
        let state = &session.state;
        let transform = ViewTransform {
            zoom: state.zoom,
            pan_x: 0.0,
            pan_y: 0.0,
        };

        let resolved = resolve_slide(slide, &session.resolve_ctx());
        let nodes: Vec<ViewNode> = resolved
            .into_iter()
            .map(|resolved| {
                let screen = transform.to_screen(
                    resolved.position.x,
                    resolved.position.y,
                    resolved.size.width,
                    resolved.size.height,
                );
                ViewNode { resolved, screen }
            })
            .collect();

        let mut decorations = Vec::new();

        if state.grid.visible {
            push_grid_lines(
                &mut decorations,
                &transform,
                slide.canvas.width,
                slide.canvas.height,
                state.grid.size,
            );
        }

        let rect_of = |id| {
            nodes
                .iter()
                .find(|node| node.resolved.id == id)
                .map(|node| node.screen)
        };

        if let Some(rect) = state.hovered.and_then(|id| rect_of(id)) {
            decorations.push(Decoration::HoverOutline { rect });
        }
        for rect in state.selected.iter().copied().filter_map(|id| rect_of(id)) {
            decorations.push(Decoration::SelectionRing { rect });
        }
        // Resize handles appear only when the properties surface has a
        // target, i.e. exactly one element is selected.
        if let Some(rect) = session.property_target().and_then(|id| rect_of(id)) {
            push_handles(&mut decorations, rect);
        }

        tracing::trace!(
            nodes = nodes.len(),
            decorations = decorations.len(),
            zoom = state.zoom,
            "interactive frame rendered"
        );

        ViewFrame {
            transform,
            canvas: transform.to_screen(0.0, 0.0, slide.canvas.width, slide.canvas.height),
            background: slide.background.clone(),
            nodes,
            decorations,
        }
    }
}

fn push_grid_lines(
    decorations: &mut Vec<Decoration>,
    transform: &ViewTransform,
    canvas_width: f32,
    canvas_height: f32,
    grid_size: f32,
) {
    let step = grid_size.max(1.0);
    let mut x = step;
    while x < canvas_width {
        decorations.push(Decoration::GridLineVertical {
            x: x * transform.zoom + transform.pan_x,
        });
        x += step;
    }
    let mut y = step;
    while y < canvas_height {
        decorations.push(Decoration::GridLineHorizontal {
            y: y * transform.zoom + transform.pan_y,
        });
        y += step;
    }
}

fn push_handles(decorations: &mut Vec<Decoration>, rect: ScreenRect) {
    let half = HANDLE_SIZE / 2.0;
    let centers = [
        (rect.x, rect.y, ResizeHandle::NorthWest),
        (rect.x + rect.width / 2.0, rect.y, ResizeHandle::North),
        (rect.x + rect.width, rect.y, ResizeHandle::NorthEast),
        (rect.x, rect.y + rect.height / 2.0, ResizeHandle::West),
        (
            rect.x + rect.width,
            rect.y + rect.height / 2.0,
            ResizeHandle::East,
        ),
        (rect.x, rect.y + rect.height, ResizeHandle::SouthWest),
        (
            rect.x + rect.width / 2.0,
            rect.y + rect.height,
            ResizeHandle::South,
        ),
        (
            rect.x + rect.width,
            rect.y + rect.height,
            ResizeHandle::SouthEast,
        ),
    ];
    for (cx, cy, handle) in centers {
        decorations.push(Decoration::Handle {
            rect: ScreenRect {
                x: cx - half,
                y: cy - half,
                width: HANDLE_SIZE,
                height: HANDLE_SIZE,
            },
            handle,
        });
    }
}
