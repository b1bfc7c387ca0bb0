//! Box selection reported in data coordinates.
//!
//! When tweakable, a press near a corner of the last committed box restarts
//! the drag from the opposite corner, so one edge can be adjusted without
//! redrawing the whole box.

use anyhow::Result;

use crate::axis::AxisHandle;
use crate::datum_range::DatumRange;
use crate::geometry::{ScreenPoint, ScreenRect};
use crate::renderer::{BoxRenderer, DragRenderer};
use crate::selection::{DragSelection, DragSelectionEvent};

use super::MouseModule;

/// Normalised distance from a box edge that counts as "near a corner".
const CORNER_FRACTION: f64 = 0.1;

/// A committed box selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSelection {
    pub x_range: DatumRange,
    pub y_range: DatumRange,
    pub pixels: ScreenRect,
    pub modified: bool,
}

type BoxListener = Box<dyn FnMut(&BoxSelection)>;

pub struct BoxSelectorMouseModule {
    label: String,
    x_axis: AxisHandle,
    y_axis: AxisHandle,
    renderer: BoxRenderer,
    tweakable: bool,
    last_box: Option<ScreenRect>,
    listeners: Vec<BoxListener>,
    feedback: Option<String>,
}

impl BoxSelectorMouseModule {
    pub fn new(x_axis: AxisHandle, y_axis: AxisHandle) -> Self {
        Self {
            label: "Box Selection".to_string(),
            x_axis,
            y_axis,
            renderer: BoxRenderer::new(),
            tweakable: false,
            last_box: None,
            listeners: Vec::new(),
            feedback: None,
        }
    }

    pub fn set_tweakable(&mut self, tweakable: bool) {
        self.tweakable = tweakable;
    }

    pub fn is_tweakable(&self) -> bool {
        self.tweakable
    }

    /// Deliver selections on every drag step as well as at release.
    pub fn set_drag_events(&mut self, enabled: bool) {
        self.renderer = BoxRenderer::new().with_updating(enabled);
    }

    pub fn add_box_listener(&mut self, listener: impl FnMut(&BoxSelection) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn last_box(&self) -> Option<ScreenRect> {
        self.last_box
    }

    /// Opposite corner of the last box when `press` lies near one of its corners.
    fn tweak_anchor(&self, press: ScreenPoint) -> Option<ScreenPoint> {
        let rect = self.last_box.filter(|r| self.tweakable && r.contains(press))?;
        let nx = f64::from(press.x - rect.left()) / f64::from((rect.width - 1).max(1));
        let ny = f64::from(press.y - rect.top()) / f64::from((rect.height - 1).max(1));
        let near_x = nx < CORNER_FRACTION || nx > 1.0 - CORNER_FRACTION;
        let near_y = ny < CORNER_FRACTION || ny > 1.0 - CORNER_FRACTION;
        if !(near_x && near_y) {
            return None;
        }
        let x = if nx < 0.5 { rect.right() - 1 } else { rect.left() };
        let y = if ny < 0.5 { rect.bottom() - 1 } else { rect.top() };
        Some(ScreenPoint::new(x, y))
    }
}

impl MouseModule for BoxSelectorMouseModule {
    fn label(&self) -> &str {
        &self.label
    }

    fn renderer(&self) -> &dyn DragRenderer {
        &self.renderer
    }

    fn renderer_mut(&mut self) -> &mut dyn DragRenderer {
        &mut self.renderer
    }

    fn anchor(&mut self, press: ScreenPoint) -> ScreenPoint {
        self.tweak_anchor(press).unwrap_or(press)
    }

    fn on_selection(&mut self, event: &DragSelectionEvent) -> Result<()> {
        let DragSelection::Box { x, y } = event.selection else {
            return Ok(());
        };
        let x_range = self.x_axis.borrow().range_for_pixels(f64::from(x.0), f64::from(x.1));
        let y_range = self.y_axis.borrow().range_for_pixels(f64::from(y.0), f64::from(y.1));
        let (Some(x_range), Some(y_range)) = (x_range, y_range) else {
            return Ok(());
        };
        let pixels = ScreenRect::from_corners(ScreenPoint::new(x.0, y.0), ScreenPoint::new(x.1, y.1));
        self.last_box = Some(pixels);
        let selection = BoxSelection {
            x_range,
            y_range,
            pixels,
            modified: event.modified,
        };
        for listener in self.listeners.iter_mut() {
            listener(&selection);
        }
        self.feedback = Some(format!("x: {}  y: {}", x_range, y_range));
        Ok(())
    }

    fn cancel(&mut self) {
        self.last_box = None;
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
    use std::cell::RefCell;
    use std::rc::Rc;
    use crate::axis::{DasAxis, Orientation};

    fn module() -> BoxSelectorMouseModule {
        let x = DasAxis::new(DatumRange::numeric(0.0, 100.0).unwrap(), Orientation::Horizontal, 0.0, 200.0);
        let y = DasAxis::new(DatumRange::numeric(0.0, 10.0).unwrap(), Orientation::Vertical, 0.0, 100.0);
        BoxSelectorMouseModule::new(x.into_handle(), y.into_handle())
    }

    fn commit(m: &mut BoxSelectorMouseModule, p1: (i32, i32), p2: (i32, i32)) {
        let sel = DragSelection::boxed(ScreenPoint::new(p1.0, p1.1), ScreenPoint::new(p2.0, p2.1));
        m.on_selection(&DragSelectionEvent::new(sel, false)).unwrap();
    }

    #[test]
    fn test_listeners_receive_data_ranges() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut m = module();
        m.add_box_listener(move |b| sink.borrow_mut().push(*b));
        commit(&mut m, (20, 0), (60, 50));
        let got = seen.borrow();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].x_range, DatumRange::numeric(10.0, 30.0).unwrap());
        assert_eq!(got[0].y_range, DatumRange::numeric(5.0, 10.0).unwrap());
    }

    #[test]
    fn test_corner_press_reanchors_when_tweakable() {
        let mut m = module();
        commit(&mut m, (10, 10), (110, 60));
        assert_eq!(m.anchor(ScreenPoint::new(108, 58)), ScreenPoint::new(108, 58));
        m.set_tweakable(true);
        assert_eq!(m.anchor(ScreenPoint::new(108, 58)), ScreenPoint::new(10, 10));
        assert_eq!(m.anchor(ScreenPoint::new(12, 11)), ScreenPoint::new(110, 60));
        // interior and outside presses start a fresh box
        assert_eq!(m.anchor(ScreenPoint::new(60, 35)), ScreenPoint::new(60, 35));
        assert_eq!(m.anchor(ScreenPoint::new(150, 90)), ScreenPoint::new(150, 90));
    }
}
