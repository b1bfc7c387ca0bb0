//! Drag renderers: transient visual feedback for a drag in progress, and the
//! conversion of the finished drag into a [`DragSelection`].
//!
//! This module contains:
//! - The [`DragRenderer`] contract shared by every renderer
//! - Empty, box and crosshair renderers
//! - Single-axis range renderers, optionally recognising gestures
//! - The length/slope renderer and its pure slope measurement
//! - Gesture glyph and box-zoom renderers
//! - The waypoint pathway renderer
//!
//! Renderers only ever touch the [`DragCanvas`] handed to them and return
//! the rectangles that need repainting, so the viewer can repaint
//! incrementally.
//!
//! [`DragSelection`]: crate::selection::DragSelection

mod empty;
mod box_renderer;
mod crosshair;
mod range;
mod length;
mod gestures;
mod box_zoom_gestures;
mod waypoints;

pub use empty::EmptyDragRenderer;
pub use box_renderer::BoxRenderer;
pub use crosshair::CrosshairRenderer;
pub use range::RangeRenderer;
pub use length::{measure_slope, LengthRenderer, SlopeMeasurement, SlopeModel};
pub use gestures::{draw_gesture, GesturesRenderer};
pub use box_zoom_gestures::BoxZoomGesturesRenderer;
pub use waypoints::{pathway_quads, WaypointsRenderer};

use crate::geometry::{ScreenPoint, ScreenRect};
use crate::overlay::DragCanvas;
use crate::selection::DragSelectionEvent;

/// Visual feedback and selection promotion for one kind of drag.
pub trait DragRenderer {
    /// Draws feedback for a drag from `p1` to `p2`, replacing whatever this
    /// renderer drew before. Returns the regions needing repaint.
    fn render_drag(&mut self, canvas: &mut DragCanvas, p1: ScreenPoint, p2: ScreenPoint) -> Vec<ScreenRect>;

    /// Interprets a drag as a selection. `None` means the drag selects nothing.
    fn selection_event(
        &self,
        canvas: &DragCanvas,
        p1: ScreenPoint,
        p2: ScreenPoint,
        modified: bool,
    ) -> Option<DragSelectionEvent>;

    /// True when every intermediate pointer position should be delivered as a
    /// point selection.
    fn is_point_selection(&self) -> bool {
        false
    }

    /// True when selections should be delivered continuously while dragging.
    fn is_updating_drag_selection(&self) -> bool {
        false
    }

    /// Removes this renderer's feedback. Returns the regions needing repaint.
    fn clear(&mut self, canvas: &mut DragCanvas) -> Vec<ScreenRect> {
        non_empty(canvas.clear())
    }
}

/// Wraps a rectangle in a dirty list, dropping it when empty.
pub(crate) fn non_empty(rect: ScreenRect) -> Vec<ScreenRect> {
    if rect.is_empty() {
        Vec::new()
    } else {
        vec![rect]
    }
}

/// Replaces the canvas content with freshly drawn shapes; the dirty list holds
/// the old and the new areas.
pub(crate) fn redraw(
    canvas: &mut DragCanvas,
    shapes: impl IntoIterator<Item = crate::overlay::OverlayShape>,
) -> Vec<ScreenRect> {
    let mut dirty = non_empty(canvas.clear());
    let mut drawn = ScreenRect::default();
    for shape in shapes {
        drawn = drawn.union(&canvas.draw(shape));
    }
    dirty.extend(non_empty(drawn));
    dirty
}
