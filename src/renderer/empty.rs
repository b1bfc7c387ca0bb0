use crate::geometry::{ScreenPoint, ScreenRect};
use crate::overlay::DragCanvas;
use crate::selection::DragSelectionEvent;

use super::DragRenderer;

/// Draws nothing and selects nothing. Used by modules that only care about
/// raw pointer events, such as drag-to-pan.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyDragRenderer;

impl DragRenderer for EmptyDragRenderer {
    fn render_drag(&mut self, _canvas: &mut DragCanvas, _p1: ScreenPoint, _p2: ScreenPoint) -> Vec<ScreenRect> {
        Vec::new()
    }

    fn selection_event(
        &self,
        _canvas: &DragCanvas,
        _p1: ScreenPoint,
        _p2: ScreenPoint,
        _modified: bool,
    ) -> Option<DragSelectionEvent> {
        None
    }
}
