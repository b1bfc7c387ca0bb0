//! Semantic selections produced by drag renderers.
//!
//! Every renderer turns a raw press/drag/release into one of these variants,
//! and every module receives them through a single callback that switches on
//! the variant.

use crate::axis::Orientation;
use crate::gesture::DragGesture;
use crate::geometry::ScreenPoint;

/// What a drag selected, in screen coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DragSelection {
    /// A single location (crosshair, click).
    Point(ScreenPoint),
    /// An interval along one axis, `min <= max` in pixels.
    Range {
        orientation: Orientation,
        min: i32,
        max: i32,
    },
    /// A rectangle, each pair ordered `min <= max`.
    Box { x: (i32, i32), y: (i32, i32) },
    /// A recognised navigation gesture.
    Gesture(DragGesture),
    /// A digitised path with its corridor width.
    Path { points: Vec<ScreenPoint>, width: i32 },
}

impl DragSelection {
    /// A range selection with ordered endpoints.
    pub fn range(orientation: Orientation, a: i32, b: i32) -> Self {
        DragSelection::Range {
            orientation,
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// A box selection spanning two corners.
    pub fn boxed(p1: ScreenPoint, p2: ScreenPoint) -> Self {
        DragSelection::Box {
            x: (p1.x.min(p2.x), p1.x.max(p2.x)),
            y: (p1.y.min(p2.y), p1.y.max(p2.y)),
        }
    }
}

/// A selection plus the "modified" flag (shift held) that changes how
/// handlers interpret it.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSelectionEvent {
    pub selection: DragSelection,
    pub modified: bool,
}

impl DragSelectionEvent {
    pub fn new(selection: DragSelection, modified: bool) -> Self {
        Self { selection, modified }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_order_endpoints() {
        assert_eq!(
            DragSelection::range(Orientation::Horizontal, 80, 20),
            DragSelection::Range {
                orientation: Orientation::Horizontal,
                min: 20,
                max: 80
            }
        );
        assert_eq!(
            DragSelection::boxed(ScreenPoint::new(9, 1), ScreenPoint::new(3, 7)),
            DragSelection::Box { x: (3, 9), y: (1, 7) }
        );
    }
}
