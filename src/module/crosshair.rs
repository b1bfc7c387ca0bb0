//! Live data readout under the pointer.

use std::rc::Rc;

use anyhow::Result;

use crate::axis::AxisHandle;
use crate::dataset::SeriesReadout;
use crate::renderer::{CrosshairRenderer, DragRenderer};
use crate::selection::{DragSelection, DragSelectionEvent};

use super::{MouseModule, SelectionTrigger};

pub struct CrosshairMouseModule {
    renderer: CrosshairRenderer,
    feedback: Option<String>,
}

impl CrosshairMouseModule {
    pub fn new(x_axis: AxisHandle, y_axis: AxisHandle) -> Self {
        Self {
            renderer: CrosshairRenderer::new(Some(x_axis), Some(y_axis)),
            feedback: None,
        }
    }

    pub fn with_readout(mut self, readout: Rc<dyn SeriesReadout>) -> Self {
        self.renderer.set_readout(Some(readout));
        self
    }
}

impl MouseModule for CrosshairMouseModule {
    fn label(&self) -> &str {
        "Crosshair Digitizer"
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
        if let DragSelection::Point(p) = event.selection {
            self.feedback = Some(self.renderer.label(p).replace('\n', "  "));
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
