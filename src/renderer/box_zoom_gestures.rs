//! Box zoom feedback that degrades to single-axis bands for thin boxes and
//! to gesture glyphs for short flicks.

use crate::axis::Orientation;
use crate::gesture::{classify, classify_box, BoxZoomKind, DragGesture};
use crate::geometry::{ScreenPoint, ScreenRect};
use crate::overlay::{DragCanvas, OverlayRole, OverlayShape};
use crate::selection::{DragSelection, DragSelectionEvent};

use super::gestures::draw_gesture;
use super::{redraw, DragRenderer};

/// What a box-zoom drag currently means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reading {
    Gesture(DragGesture),
    Zoom(BoxZoomKind),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BoxZoomGesturesRenderer;

impl BoxZoomGesturesRenderer {
    fn read(canvas: &DragCanvas, p1: ScreenPoint, p2: ScreenPoint) -> Reading {
        let b = canvas.bounds();
        match classify(p1, p2, b.width, b.x) {
            Some(gesture) => Reading::Gesture(gesture),
            None => Reading::Zoom(classify_box(p1, p2, b)),
        }
    }

    /// The pixel area a zoom of `kind` would cover: thin boxes are extended to
    /// the full height or width of the plot.
    fn band(kind: BoxZoomKind, p1: ScreenPoint, p2: ScreenPoint, plot: ScreenRect) -> ScreenRect {
        let rect = ScreenRect::from_corners(p1, p2);
        match kind {
            BoxZoomKind::XOnly => ScreenRect::new(rect.x, plot.y, rect.width, plot.height),
            BoxZoomKind::YOnly => ScreenRect::new(plot.x, rect.y, plot.width, rect.height),
            BoxZoomKind::Box => rect,
        }
    }
}

impl DragRenderer for BoxZoomGesturesRenderer {
    fn render_drag(&mut self, canvas: &mut DragCanvas, p1: ScreenPoint, p2: ScreenPoint) -> Vec<ScreenRect> {
        let plot = canvas.bounds();
        let shapes = match Self::read(canvas, p1, p2) {
            Reading::Gesture(g) => draw_gesture(g, p1, plot),
            Reading::Zoom(kind) => {
                let rect = Self::band(kind, p1, p2, plot);
                vec![
                    OverlayShape::Rect {
                        rect,
                        filled: true,
                        role: OverlayRole::Fill,
                    },
                    OverlayShape::Rect {
                        rect,
                        filled: false,
                        role: OverlayRole::Foreground,
                    },
                ]
            }
        };
        redraw(canvas, shapes)
    }

    fn selection_event(
        &self,
        canvas: &DragCanvas,
        p1: ScreenPoint,
        p2: ScreenPoint,
        modified: bool,
    ) -> Option<DragSelectionEvent> {
        let selection = match Self::read(canvas, p1, p2) {
            Reading::Gesture(g) => DragSelection::Gesture(g),
            Reading::Zoom(BoxZoomKind::XOnly) => DragSelection::range(Orientation::Horizontal, p1.x, p2.x),
            Reading::Zoom(BoxZoomKind::YOnly) => DragSelection::range(Orientation::Vertical, p1.y, p2.y),
            Reading::Zoom(BoxZoomKind::Box) => DragSelection::boxed(p1, p2),
        };
        Some(DragSelectionEvent::new(selection, modified))
    }
}
