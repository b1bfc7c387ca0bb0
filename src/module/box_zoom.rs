//! Box zoom on a plot: full boxes zoom both axes, thin boxes one axis, and
//! short flicks navigate.

use anyhow::Result;

use crate::axis::{AxisHandle, AxisView, Orientation};
use crate::error::ConfigError;
use crate::gesture::DragGesture;
use crate::renderer::{BoxZoomGesturesRenderer, DragRenderer};
use crate::selection::{DragSelection, DragSelectionEvent};

use super::axis_range::{apply_gesture, zoom_out_into};
use super::MouseModule;

pub struct BoxZoomMouseModule {
    label: String,
    x_axis: AxisHandle,
    y_axis: AxisHandle,
    renderer: BoxZoomGesturesRenderer,
    feedback: Option<String>,
}

impl BoxZoomMouseModule {
    /// Creates the module. The axes must be horizontal and vertical respectively.
    pub fn new(x_axis: AxisHandle, y_axis: AxisHandle) -> Result<Self, ConfigError> {
        let x = x_axis.borrow().orientation();
        if x != Orientation::Horizontal {
            return Err(ConfigError::wrong_orientation("BoxZoomMouseModule", Orientation::Horizontal, x));
        }
        let y = y_axis.borrow().orientation();
        if y != Orientation::Vertical {
            return Err(ConfigError::wrong_orientation("BoxZoomMouseModule", Orientation::Vertical, y));
        }
        Ok(Self {
            label: "Box Zoom".to_string(),
            x_axis,
            y_axis,
            renderer: BoxZoomGesturesRenderer,
            feedback: None,
        })
    }

    fn zoom(axis: &AxisHandle, min: i32, max: i32, modified: bool) -> bool {
        let mut axis = axis.borrow_mut();
        if modified {
            zoom_out_into(&mut axis, min, max)
        } else {
            axis.zoom_to_pixels(f64::from(min), f64::from(max))
        }
    }

    fn gesture(&self, gesture: DragGesture) -> bool {
        match gesture {
            DragGesture::ScanPrev | DragGesture::ScanNext => apply_gesture(&mut self.x_axis.borrow_mut(), gesture),
            _ => {
                let x = apply_gesture(&mut self.x_axis.borrow_mut(), gesture);
                let y = apply_gesture(&mut self.y_axis.borrow_mut(), gesture);
                x || y
            }
        }
    }
}

impl MouseModule for BoxZoomMouseModule {
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
        let modified = event.modified;
        let changed = match &event.selection {
            DragSelection::Range {
                orientation: Orientation::Horizontal,
                min,
                max,
            } => Self::zoom(&self.x_axis, *min, *max, modified),
            DragSelection::Range {
                orientation: Orientation::Vertical,
                min,
                max,
            } => Self::zoom(&self.y_axis, *min, *max, modified),
            DragSelection::Box { x, y } => {
                let zx = Self::zoom(&self.x_axis, x.0, x.1, modified);
                let zy = Self::zoom(&self.y_axis, y.0, y.1, modified);
                zx || zy
            }
            DragSelection::Gesture(gesture) => self.gesture(*gesture),
            DragSelection::Point(_) | DragSelection::Path { .. } => false,
        };
        if changed {
            self.feedback = Some(format!(
                "x: {}  y: {}",
                self.x_axis.borrow().datum_range(),
                self.y_axis.borrow().datum_range()
            ));
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
    use crate::axis::DasAxis;
    use crate::datum_range::DatumRange;

    fn module() -> (BoxZoomMouseModule, AxisHandle, AxisHandle) {
        let x = DasAxis::new(DatumRange::numeric(0.0, 100.0).unwrap(), Orientation::Horizontal, 0.0, 200.0).into_handle();
        let y = DasAxis::new(DatumRange::numeric(0.0, 10.0).unwrap(), Orientation::Vertical, 0.0, 100.0).into_handle();
        (BoxZoomMouseModule::new(x.clone(), y.clone()).unwrap(), x, y)
    }

    #[test]
    fn test_axes_must_match_orientation() {
        let (_, x, y) = module();
        assert!(matches!(
            BoxZoomMouseModule::new(y, x),
            Err(ConfigError::WrongOrientation { .. })
        ));
    }

    #[test]
    fn test_box_zooms_both_axes() {
        let (mut m, x, y) = module();
        let sel = DragSelection::Box { x: (20, 80), y: (20, 60) };
        m.on_selection(&DragSelectionEvent::new(sel, false)).unwrap();
        assert!(x.borrow().datum_range().width() < 100.0);
        assert!(y.borrow().datum_range().width() < 10.0);
    }

    #[test]
    fn test_x_only_leaves_y() {
        let (mut m, x, y) = module();
        let sel = DragSelection::range(Orientation::Horizontal, 20, 80);
        m.on_selection(&DragSelectionEvent::new(sel, false)).unwrap();
        assert!(x.borrow().datum_range().width() < 100.0);
        assert_eq!(y.borrow().datum_range(), DatumRange::numeric(0.0, 10.0).unwrap());
    }

    #[test]
    fn test_zoom_out_gesture_widens_both() {
        let (mut m, x, y) = module();
        m.on_selection(&DragSelectionEvent::new(DragSelection::Gesture(DragGesture::ZoomOut), false))
            .unwrap();
        assert_eq!(x.borrow().datum_range(), DatumRange::numeric(-25.0, 125.0).unwrap());
        assert_eq!(y.borrow().datum_range(), DatumRange::numeric(-2.5, 12.5).unwrap());
    }
}
