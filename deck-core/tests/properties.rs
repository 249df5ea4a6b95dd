//! Property tests for the model laws: render order stability, duplicate
//! layering, and drag clamping.

use deck_core::element::{
    Element, ElementKind, Position, ShapeConfig, ShapeStyle, Size, TextConfig, TextStyle,
};
use deck_core::interaction::EditorSession;
use deck_core::slide::Slide;
use proptest::prelude::*;

fn shape_kind() -> ElementKind {
    ElementKind::Shape {
        style: ShapeStyle::default(),
        config: ShapeConfig::default(),
    }
}

fn text_kind(field_id: &str) -> ElementKind {
    ElementKind::Text {
        style: TextStyle::default(),
        config: TextConfig {
            field_id: field_id.to_string(),
            ..TextConfig::default()
        },
    }
}

proptest! {
    /// Render order equals a stable sort by z-index regardless of the
    /// insertion order the elements arrived in.
    #[test]
    fn render_order_is_stable_sort_by_z(z_indices in prop::collection::vec(-50i32..50, 1..40)) {
        let mut slide = Slide::new();
        let ids: Vec<_> = z_indices
            .iter()
            .map(|&z| slide.insert(Element::new(shape_kind()).with_z_index(z)))
            .collect();

        let rendered: Vec<_> = slide.render_order().iter().map(|e| (e.z_index, e.id)).collect();

        // Expected: pair each id with its z, stable-sorted by z alone.
        let mut expected: Vec<_> = z_indices.iter().copied().zip(ids).collect();
        expected.sort_by_key(|(z, _)| *z);

        prop_assert_eq!(rendered, expected);
    }

    /// Duplicating any element lands the copy above every existing element
    /// and offsets its position.
    #[test]
    fn duplicate_always_renders_on_top(
        z_indices in prop::collection::vec(-20i32..20, 1..20),
        pick in 0usize..20,
    ) {
        let mut slide = Slide::new();
        let ids: Vec<_> = z_indices
            .iter()
            .map(|&z| {
                slide.insert(
                    Element::new(text_kind("field"))
                        .with_z_index(z)
                        .with_position(Position::new(100.0, 100.0))
                        .with_size(Size::fixed(50.0, 50.0)),
                )
            })
            .collect();
        let source = ids[pick % ids.len()];
        let max_z = z_indices.iter().copied().max().unwrap_or(0);

        let copy = slide.duplicate(source).expect("duplicate existing element");
        let copied = slide.get(copy).expect("copy present");

        prop_assert_eq!(copied.z_index, max_z + 1);
        let original = slide.get(source).expect("source present");
        prop_assert_ne!(copied.position, original.position);
    }

    /// Dragging by any delta keeps the element inside the logical canvas.
    #[test]
    fn drag_never_escapes_canvas(dx in -1e6f32..1e6, dy in -1e6f32..1e6) {
        let mut slide = Slide::new();
        let id = slide.create_element(
            shape_kind(),
            Position::new(500.0, 400.0),
            Size::fixed(120.0, 80.0),
        );
        let canvas = slide.canvas;

        let mut session = EditorSession::new(slide);
        session.select(id);
        session.begin_drag(id, Position::new(500.0, 400.0));
        session.drag_to(Position::new(500.0 + dx, 400.0 + dy));
        session.end_drag();

        let position = session.slide().get(id).expect("element").position;
        prop_assert!(position.x >= 0.0);
        prop_assert!(position.y >= 0.0);
        prop_assert!(position.x + 120.0 <= canvas.width);
        prop_assert!(position.y + 80.0 <= canvas.height);
    }
}
