//! Range zoom along a single axis.

use anyhow::Result;

use crate::axis::{AxisHandle, AxisView, DasAxis, Orientation};
use crate::error::ConfigError;
use crate::gesture::DragGesture;
use crate::renderer::{DragRenderer, RangeRenderer};
use crate::selection::{DragSelection, DragSelectionEvent};

use super::MouseModule;

/// Applies a navigation gesture to an axis. Returns whether the range changed.
pub fn apply_gesture(axis: &mut DasAxis, gesture: DragGesture) -> bool {
    match gesture {
        DragGesture::Back => axis.set_data_range_prev(),
        DragGesture::Forward => axis.set_data_range_forward(),
        DragGesture::ZoomOut => axis.set_data_range_zoom_out(),
        DragGesture::ScanPrev => axis.scan_previous(),
        DragGesture::ScanNext => axis.scan_next(),
        DragGesture::None | DragGesture::Undefined => false,
    }
}

/// Zooms out so that the current range ends up spanning pixels `pmin..pmax`.
pub(crate) fn zoom_out_into(axis: &mut DasAxis, pmin: i32, pmax: i32) -> bool {
    let span = f64::from(pmax - pmin);
    if span < 1.0 {
        return false;
    }
    let (dmin, dmax) = axis.pixel_bounds();
    let offset = match axis.orientation() {
        Orientation::Horizontal => f64::from(pmin) - dmin,
        Orientation::Vertical => dmax - f64::from(pmax),
    };
    let lo = -offset / span;
    let hi = lo + (dmax - dmin) / span;
    let log = axis.is_log();
    match axis.datum_range().rescale_for(log, lo, hi) {
        Some(range) => {
            let rounded = axis.round(&range);
            axis.set_datum_range(rounded)
        }
        None => false,
    }
}

/// Drag along one axis to zoom to the selected range. Shift-drag zooms out
/// so the current range fits the selection; short flicks are gestures.
pub struct AxisRangeMouseModule {
    label: String,
    axis: AxisHandle,
    renderer: RangeRenderer,
    feedback: Option<String>,
}

impl AxisRangeMouseModule {
    /// Creates the module, rejecting an axis whose orientation differs from
    /// `orientation`.
    pub fn new(axis: AxisHandle, orientation: Orientation) -> Result<Self, ConfigError> {
        let actual = axis.borrow().orientation();
        if actual != orientation {
            return Err(ConfigError::wrong_orientation("AxisRangeMouseModule", orientation, actual));
        }
        let (label, renderer) = match orientation {
            Orientation::Horizontal => ("X Zoom", RangeRenderer::horizontal()),
            Orientation::Vertical => ("Y Zoom", RangeRenderer::vertical()),
        };
        Ok(Self {
            label: label.to_string(),
            axis,
            renderer: renderer.with_gestures(true),
            feedback: None,
        })
    }

    pub fn horizontal(axis: AxisHandle) -> Result<Self, ConfigError> {
        Self::new(axis, Orientation::Horizontal)
    }

    pub fn vertical(axis: AxisHandle) -> Result<Self, ConfigError> {
        Self::new(axis, Orientation::Vertical)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

impl MouseModule for AxisRangeMouseModule {
    fn label(&self) -> &str {
        &self.label
    }

    fn renderer(&self) -> &dyn DragRenderer {
        &self.renderer
    }

    fn renderer_mut(&mut self) -> &mut dyn DragRenderer {
        &mut self.renderer
    }

    fn on_selection(&mut self, event: &DragSelectionEvent) -> Result<()> {
        let mut axis = self.axis.borrow_mut();
        let changed = match &event.selection {
            DragSelection::Range { orientation, min, max } if *orientation == axis.orientation() => {
                if event.modified {
                    zoom_out_into(&mut axis, *min, *max)
                } else {
                    axis.zoom_to_pixels(f64::from(*min), f64::from(*max))
                }
            }
            DragSelection::Gesture(gesture) => apply_gesture(&mut axis, *gesture),
            _ => false,
        };
        if changed {
            self.feedback = Some(axis.datum_range().describe());
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datum_range::DatumRange;

    fn axis(orientation: Orientation) -> AxisHandle {
        DasAxis::new(DatumRange::numeric(0.0, 100.0).unwrap(), orientation, 0.0, 200.0).into_handle()
    }

    #[test]
    fn test_orientation_mismatch_is_config_error() {
        let err = AxisRangeMouseModule::horizontal(axis(Orientation::Vertical)).err();
        assert_eq!(
            err,
            Some(ConfigError::wrong_orientation(
                "AxisRangeMouseModule",
                Orientation::Horizontal,
                Orientation::Vertical
            ))
        );
        assert!(AxisRangeMouseModule::vertical(axis(Orientation::Vertical)).is_ok());
    }

    #[test]
    fn test_range_selection_zooms() {
        let a = axis(Orientation::Horizontal);
        let mut m = AxisRangeMouseModule::horizontal(a.clone()).unwrap();
        let sel = DragSelection::range(Orientation::Horizontal, 20, 80);
        m.on_selection(&DragSelectionEvent::new(sel, false)).unwrap();
        let r = a.borrow().datum_range();
        assert!(r.min() >= 0.0 && r.max() <= 100.0 && r.width() < 100.0);
        assert!(m.feedback().is_some());
    }

    #[test]
    fn test_modified_selection_zooms_out() {
        let a = axis(Orientation::Horizontal);
        let mut m = AxisRangeMouseModule::horizontal(a.clone()).unwrap();
        let sel = DragSelection::range(Orientation::Horizontal, 50, 150);
        m.on_selection(&DragSelectionEvent::new(sel, true)).unwrap();
        let r = a.borrow().datum_range();
        assert!((r.min() + 50.0).abs() < 1e-6 && (r.max() - 150.0).abs() < 1e-6);
    }

    #[test]
    fn test_gestures_navigate() {
        let a = axis(Orientation::Horizontal);
        let mut m = AxisRangeMouseModule::horizontal(a.clone()).unwrap();
        m.on_selection(&DragSelectionEvent::new(DragSelection::Gesture(DragGesture::ScanNext), false))
            .unwrap();
        assert_eq!(a.borrow().datum_range(), DatumRange::numeric(100.0, 200.0).unwrap());
        m.on_selection(&DragSelectionEvent::new(DragSelection::Gesture(DragGesture::Back), false))
            .unwrap();
        assert_eq!(a.borrow().datum_range(), DatumRange::numeric(0.0, 100.0).unwrap());
        m.on_selection(&DragSelectionEvent::new(DragSelection::Gesture(DragGesture::Undefined), false))
            .unwrap();
        assert_eq!(a.borrow().datum_range(), DatumRange::numeric(0.0, 100.0).unwrap());
    }
}
