use anyhow::Result;

use crate::axis::AxisHandle;
use crate::renderer::{DragRenderer, LengthRenderer, SlopeMeasurement};
use crate::selection::{DragSelection, DragSelectionEvent};

use super::{MouseModule, SelectionTrigger};

/// Measures Δx, Δy and the slope of a dragged segment.
pub struct LengthMouseModule {
    renderer: LengthRenderer,
    last: Option<SlopeMeasurement>,
    feedback: Option<String>,
}

impl LengthMouseModule {
    pub fn new(x_axis: AxisHandle, y_axis: AxisHandle) -> Self {
        Self {
            renderer: LengthRenderer::new(x_axis, y_axis),
            last: None,
            feedback: None,
        }
    }

    /// The most recent measurement.
    pub fn last_measurement(&self) -> Option<SlopeMeasurement> {
        self.last
    }
}

impl MouseModule for LengthMouseModule {
    fn label(&self) -> &str {
        "Length"
    }

    fn renderer(&self) -> &dyn DragRenderer {
        &self.renderer
    }

    fn renderer_mut(&mut self) -> &mut dyn DragRenderer {
        &mut self.renderer
    }

    fn trigger(&self) -> SelectionTrigger {
        SelectionTrigger {
            on_drag: true,
            on_key: false,
            on_release: true,
        }
    }

    fn on_selection(&mut self, event: &DragSelectionEvent) -> Result<()> {
        if let DragSelection::Path { points, .. } = &event.selection {
            if let [p1, p2] = points.as_slice() {
                self.last = self.renderer.measure(*p1, *p2);
                self.feedback = self.renderer.describe(*p1, *p2).map(|t| t.replace('\n', "  "));
            }
        }
        Ok(())
    }

    fn feedback(&self) -> Option<String> {
        self.feedback.clone()
    }

    fn clear_feedback(&mut self) {
        self.feedback = None;
    }
}
