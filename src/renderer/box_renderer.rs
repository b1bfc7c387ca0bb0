//! Rectangle feedback for box selections.

use crate::geometry::{ScreenPoint, ScreenRect};
use crate::overlay::{DragCanvas, OverlayRole, OverlayShape};
use crate::selection::{DragSelection, DragSelectionEvent};

use super::{redraw, DragRenderer};

/// Draws the box spanned by the drag with a translucent interior.
#[derive(Debug, Clone, Default)]
pub struct BoxRenderer {
    updating: bool,
}

impl BoxRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver box selections on every drag step instead of only at release.
    pub fn with_updating(mut self, updating: bool) -> Self {
        self.updating = updating;
        self
    }
}

impl DragRenderer for BoxRenderer {
    fn render_drag(&mut self, canvas: &mut DragCanvas, p1: ScreenPoint, p2: ScreenPoint) -> Vec<ScreenRect> {
        let rect = ScreenRect::from_corners(p1, p2);
        redraw(
            canvas,
            [
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
            ],
        )
    }

    fn selection_event(
        &self,
        _canvas: &DragCanvas,
        p1: ScreenPoint,
        p2: ScreenPoint,
        modified: bool,
    ) -> Option<DragSelectionEvent> {
        Some(DragSelectionEvent::new(DragSelection::boxed(p1, p2), modified))
    }

    fn is_updating_drag_selection(&self) -> bool {
        self.updating
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redraw_reports_previous_area() {
        let mut canvas = DragCanvas::new(ScreenRect::new(0, 0, 400, 400));
        let mut renderer = BoxRenderer::new();
        let first = renderer.render_drag(&mut canvas, ScreenPoint::new(10, 10), ScreenPoint::new(50, 50));
        assert_eq!(first.len(), 1);
        let second = renderer.render_drag(&mut canvas, ScreenPoint::new(10, 10), ScreenPoint::new(200, 200));
        assert_eq!(second.len(), 2);
        assert!(second[0].contains(ScreenPoint::new(50, 50)));
        assert_eq!(canvas.shapes().len(), 2);
        assert!(!renderer.clear(&mut canvas).is_empty());
        assert!(canvas.is_empty());
    }

    #[test]
    fn test_selection_is_ordered_box() {
        let canvas = DragCanvas::new(ScreenRect::new(0, 0, 400, 400));
        let event = BoxRenderer::new()
            .selection_event(&canvas, ScreenPoint::new(90, 5), ScreenPoint::new(10, 40), true)
            .unwrap();
        assert_eq!(event.selection, DragSelection::Box { x: (10, 90), y: (5, 40) });
        assert!(event.modified);
    }
}
