//! Directional glyphs for navigation gestures.

use crate::gesture::{classify, DragGesture};
use crate::geometry::{ScreenPoint, ScreenRect};
use crate::overlay::{DragCanvas, OverlayRole, OverlayShape};
use crate::selection::{DragSelection, DragSelectionEvent};

use super::{redraw, DragRenderer};

/// Length of a gesture arrow.
const GLYPH_PX: i32 = 20;

fn arrow(from: ScreenPoint, to: ScreenPoint) -> OverlayShape {
    OverlayShape::Arrow {
        from,
        to,
        role: OverlayRole::Accent,
    }
}

/// Shapes illustrating `gesture` for a press at `p1` inside `bounds`.
pub fn draw_gesture(gesture: DragGesture, p1: ScreenPoint, bounds: ScreenRect) -> Vec<OverlayShape> {
    let ScreenPoint { x, y } = p1;
    match gesture {
        DragGesture::None | DragGesture::Undefined => Vec::new(),
        DragGesture::Back => vec![arrow(p1, ScreenPoint::new(x - GLYPH_PX, y))],
        DragGesture::Forward => vec![arrow(p1, ScreenPoint::new(x + GLYPH_PX, y))],
        DragGesture::ZoomOut => vec![
            arrow(p1, ScreenPoint::new(x - GLYPH_PX, y)),
            arrow(p1, ScreenPoint::new(x + GLYPH_PX, y)),
        ],
        DragGesture::ScanPrev => {
            let edge = bounds.left();
            vec![
                arrow(ScreenPoint::new(edge + GLYPH_PX, y), ScreenPoint::new(edge + 2, y)),
                OverlayShape::Line {
                    from: ScreenPoint::new(edge, y - GLYPH_PX / 2),
                    to: ScreenPoint::new(edge, y + GLYPH_PX / 2),
                    role: OverlayRole::Accent,
                },
            ]
        }
        DragGesture::ScanNext => {
            let edge = bounds.right() - 1;
            vec![
                arrow(ScreenPoint::new(edge - GLYPH_PX, y), ScreenPoint::new(edge - 2, y)),
                OverlayShape::Line {
                    from: ScreenPoint::new(edge, y - GLYPH_PX / 2),
                    to: ScreenPoint::new(edge, y + GLYPH_PX / 2),
                    role: OverlayRole::Accent,
                },
            ]
        }
    }
}

/// Recognises gestures only; long drags select nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct GesturesRenderer;

impl DragRenderer for GesturesRenderer {
    fn render_drag(&mut self, canvas: &mut DragCanvas, p1: ScreenPoint, p2: ScreenPoint) -> Vec<ScreenRect> {
        let b = canvas.bounds();
        let shapes = classify(p1, p2, b.width, b.x)
            .map(|g| draw_gesture(g, p1, b))
            .unwrap_or_default();
        redraw(canvas, shapes)
    }

    fn selection_event(
        &self,
        canvas: &DragCanvas,
        p1: ScreenPoint,
        p2: ScreenPoint,
        modified: bool,
    ) -> Option<DragSelectionEvent> {
        let b = canvas.bounds();
        let gesture = classify(p1, p2, b.width, b.x)?;
        Some(DragSelectionEvent::new(DragSelection::Gesture(gesture), modified))
    }
}
