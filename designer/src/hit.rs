//! Drop-zone geometry and hit-testing.
//!
//! The host measures where each element (and the empty canvas) is painted and
//! hands that layout in as a [`ZoneLayout`]. Every element is split into a top
//! half ("insert before") and a bottom half ("insert after"). The whole-canvas
//! zone only exists while the store is empty.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use serde::{Deserialize, Serialize};

use crate::element::ElementId;
use crate::store::ElementStore;

/// A point in host layout coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Axis-aligned rectangle, origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Whether `p` lies inside, edges inclusive.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    #[must_use]
    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }
}

/// Which half of an element's zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Half {
    /// Insert before the element.
    Top,
    /// Insert after the element.
    Bottom,
}

/// Where a dragged item would land if released now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "zone", rename_all = "lowercase")]
pub enum DropTarget {
    Element { id: ElementId, half: Half },
    /// The empty-canvas zone.
    Canvas,
}

/// Painted position of the canvas and of each element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneLayout {
    pub canvas: Rect,
    pub elements: Vec<(ElementId, Rect)>,
}

/// Resolve the drop target under `point`.
///
/// Elements are checked in layout order; the first whose rectangle contains
/// the point wins. The dragged element (if any) and ids no longer in `store`
/// contribute no zones. `None` means the pointer is over nothing droppable.
#[must_use]
pub fn hit_test(point: Point, layout: &ZoneLayout, store: &ElementStore, dragging: Option<&ElementId>) -> Option<DropTarget> {
    if store.is_empty() {
        return layout.canvas.contains(point).then_some(DropTarget::Canvas);
    }
    layout
        .elements
        .iter()
        .filter(|(id, _)| Some(id) != dragging && store.contains(id))
        .find(|(_, rect)| rect.contains(point))
        .map(|(id, rect)| DropTarget::Element {
            id: id.clone(),
            half: if point.y < rect.mid_y() { Half::Top } else { Half::Bottom },
        })
}
