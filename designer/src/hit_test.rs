#![allow(clippy::float_cmp)]

use super::*;
use crate::element::ElementInstance;
use crate::field::{Attributes, FieldType};

fn store_of(ids: &[&str]) -> ElementStore {
    ElementStore::from_elements(
        ids.iter()
            .map(|id| ElementInstance::new((*id).into(), Attributes::default_for(FieldType::TextField)))
            .collect(),
    )
    .unwrap()
}

/// Elements stacked 100px tall starting at y=0, full canvas behind them.
fn layout(ids: &[&str]) -> ZoneLayout {
    ZoneLayout {
        canvas: Rect::new(0.0, 0.0, 400.0, 1000.0),
        elements: ids
            .iter()
            .zip(0_i32..)
            .map(|(id, i)| (ElementId::from(*id), Rect::new(0.0, f64::from(i) * 100.0, 400.0, 100.0)))
            .collect(),
    }
}

fn on(id: &str, half: Half) -> Option<DropTarget> {
    Some(DropTarget::Element { id: ElementId::from(id), half })
}

// =============================================================
// Geometry
// =============================================================

#[test]
fn rect_contains_edges() {
    let r = Rect::new(10.0, 10.0, 20.0, 20.0);
    assert!(r.contains(Point::new(10.0, 10.0)));
    assert!(r.contains(Point::new(30.0, 30.0)));
    assert!(!r.contains(Point::new(30.1, 20.0)));
}

#[test]
fn point_distance() {
    assert_eq!(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0);
}

// =============================================================
// hit_test
// =============================================================

#[test]
fn top_and_bottom_halves() {
    let store = store_of(&["a", "b"]);
    let layout = layout(&["a", "b"]);
    assert_eq!(hit_test(Point::new(5.0, 110.0), &layout, &store, None), on("b", Half::Top));
    assert_eq!(hit_test(Point::new(5.0, 190.0), &layout, &store, None), on("b", Half::Bottom));
    assert_eq!(hit_test(Point::new(5.0, 40.0), &layout, &store, None), on("a", Half::Top));
}

#[test]
fn midline_belongs_to_bottom() {
    let store = store_of(&["a"]);
    assert_eq!(hit_test(Point::new(5.0, 50.0), &layout(&["a"]), &store, None), on("a", Half::Bottom));
}

#[test]
fn canvas_zone_only_when_empty() {
    let empty = ElementStore::new();
    assert_eq!(hit_test(Point::new(5.0, 500.0), &layout(&[]), &empty, None), Some(DropTarget::Canvas));

    let store = store_of(&["a"]);
    assert_eq!(hit_test(Point::new(5.0, 500.0), &layout(&["a"]), &store, None), None);
}

#[test]
fn outside_canvas_is_nothing() {
    assert_eq!(hit_test(Point::new(-5.0, 5.0), &layout(&[]), &ElementStore::new(), None), None);
}

#[test]
fn dragged_element_has_no_zones() {
    let store = store_of(&["a", "b"]);
    let dragged = ElementId::from("a");
    assert_eq!(hit_test(Point::new(5.0, 10.0), &layout(&["a", "b"]), &store, Some(&dragged)), None);
    assert_eq!(hit_test(Point::new(5.0, 110.0), &layout(&["a", "b"]), &store, Some(&dragged)), on("b", Half::Top));
}

#[test]
fn stale_layout_entries_ignored() {
    let store = store_of(&["b"]);
    assert_eq!(hit_test(Point::new(5.0, 10.0), &layout(&["gone", "b"]), &store, None), None);
}

#[test]
fn drop_target_wire_shape() {
    let json = serde_json::to_value(DropTarget::Element { id: "a".into(), half: Half::Top }).unwrap();
    assert_eq!(json, serde_json::json!({ "zone": "element", "id": "a", "half": "top" }));
    let canvas = serde_json::to_value(DropTarget::Canvas).unwrap();
    assert_eq!(canvas, serde_json::json!({ "zone": "canvas" }));
}
