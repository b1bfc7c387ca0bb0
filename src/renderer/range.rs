//! Single-axis range feedback: a bar with end ticks along the drag direction.

use crate::axis::Orientation;
use crate::gesture::{classify, DragGesture};
use crate::geometry::{ScreenPoint, ScreenRect};
use crate::overlay::{DragCanvas, OverlayRole, OverlayShape};
use crate::selection::{DragSelection, DragSelectionEvent};

use super::gestures::draw_gesture;
use super::{redraw, DragRenderer};

/// Half length of the end ticks.
const TICK_PX: i32 = 5;

/// Horizontal or vertical range renderer.
///
/// With gestures enabled, short flicks are drawn and reported as navigation
/// gestures instead of ranges.
#[derive(Debug, Clone)]
pub struct RangeRenderer {
    orientation: Orientation,
    gestures: bool,
}

impl RangeRenderer {
    pub fn horizontal() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            gestures: false,
        }
    }

    pub fn vertical() -> Self {
        Self {
            orientation: Orientation::Vertical,
            gestures: false,
        }
    }

    pub fn with_gestures(mut self, gestures: bool) -> Self {
        self.gestures = gestures;
        self
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    fn gesture(&self, canvas: &DragCanvas, p1: ScreenPoint, p2: ScreenPoint) -> Option<DragGesture> {
        if !self.gestures {
            return None;
        }
        let b = canvas.bounds();
        classify(p1, p2, b.width, b.x)
    }

    fn range_shapes(&self, p1: ScreenPoint, p2: ScreenPoint) -> Vec<OverlayShape> {
        let role = OverlayRole::Foreground;
        match self.orientation {
            Orientation::Horizontal => {
                let y = p1.y;
                vec![
                    OverlayShape::Line {
                        from: ScreenPoint::new(p1.x, y),
                        to: ScreenPoint::new(p2.x, y),
                        role,
                    },
                    OverlayShape::Line {
                        from: ScreenPoint::new(p1.x, y - TICK_PX),
                        to: ScreenPoint::new(p1.x, y + TICK_PX),
                        role,
                    },
                    OverlayShape::Line {
                        from: ScreenPoint::new(p2.x, y - TICK_PX),
                        to: ScreenPoint::new(p2.x, y + TICK_PX),
                        role,
                    },
                ]
            }
            Orientation::Vertical => {
                let x = p1.x;
                vec![
                    OverlayShape::Line {
                        from: ScreenPoint::new(x, p1.y),
                        to: ScreenPoint::new(x, p2.y),
                        role,
                    },
                    OverlayShape::Line {
                        from: ScreenPoint::new(x - TICK_PX, p1.y),
                        to: ScreenPoint::new(x + TICK_PX, p1.y),
                        role,
                    },
                    OverlayShape::Line {
                        from: ScreenPoint::new(x - TICK_PX, p2.y),
                        to: ScreenPoint::new(x + TICK_PX, p2.y),
                        role,
                    },
                ]
            }
        }
    }
}

impl DragRenderer for RangeRenderer {
    fn render_drag(&mut self, canvas: &mut DragCanvas, p1: ScreenPoint, p2: ScreenPoint) -> Vec<ScreenRect> {
        let shapes = match self.gesture(canvas, p1, p2) {
            Some(gesture) => draw_gesture(gesture, p1, canvas.bounds()),
            None => self.range_shapes(p1, p2),
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
        let selection = match self.gesture(canvas, p1, p2) {
            Some(gesture) => DragSelection::Gesture(gesture),
            None => match self.orientation {
                Orientation::Horizontal => DragSelection::range(self.orientation, p1.x, p2.x),
                Orientation::Vertical => DragSelection::range(self.orientation, p1.y, p2.y),
            },
        };
        Some(DragSelectionEvent::new(selection, modified))
    }
}
