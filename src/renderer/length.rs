//! Point-to-point length and slope annotation.
//!
//! The slope reported depends on which axes are logarithmic:
//! - linear/linear: `dy/dx`
//! - log Y, linear X: exponential rate `ln(y2/y1)/dx`
//! - linear Y, log X: change per decade `dy/log10(x2/x1)`
//! - log/log: power-law exponent `log(y2/y1)/log(x2/x1)`

use crate::axis::{AxisHandle, AxisView};
use crate::geometry::{ScreenPoint, ScreenRect};
use crate::overlay::{DragCanvas, OverlayRole, OverlayShape};
use crate::selection::{DragSelection, DragSelectionEvent};
use crate::units::{format_number, Units};

use super::{redraw, DragRenderer};

/// Which functional form the slope describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlopeModel {
    Linear,
    Exponential,
    Logarithmic,
    PowerLaw,
}

impl SlopeModel {
    fn label(&self) -> &'static str {
        match self {
            SlopeModel::Linear => "slope",
            SlopeModel::Exponential => "rate",
            SlopeModel::Logarithmic => "per decade",
            SlopeModel::PowerLaw => "exponent",
        }
    }
}

/// Result of [`measure_slope`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlopeMeasurement {
    pub dx: f64,
    pub dy: f64,
    pub slope: f64,
    pub model: SlopeModel,
}

impl SlopeMeasurement {
    /// Multi-line description; `x_units` decides how `dx` is printed.
    pub fn describe(&self, x_units: Units) -> String {
        let dx = if x_units.is_time() {
            format!("{} s", format_number(self.dx))
        } else {
            format_number(self.dx)
        };
        format!(
            "Δx: {}\nΔy: {}\n{}: {}",
            dx,
            format_number(self.dy),
            self.model.label(),
            format_number(self.slope)
        )
    }
}

/// Slope between two data points for the given axis scales.
///
/// Returns `None` when the slope is undefined: zero horizontal extent, or
/// non-positive values on a log axis.
pub fn measure_slope(p1: (f64, f64), p2: (f64, f64), x_log: bool, y_log: bool) -> Option<SlopeMeasurement> {
    let (x1, y1) = p1;
    let (x2, y2) = p2;
    let dx = x2 - x1;
    let dy = y2 - y1;
    if (x_log && (x1 <= 0.0 || x2 <= 0.0)) || (y_log && (y1 <= 0.0 || y2 <= 0.0)) {
        return None;
    }
    let (slope, model) = match (x_log, y_log) {
        (false, false) => (dy / dx, SlopeModel::Linear),
        (false, true) => ((y2 / y1).ln() / dx, SlopeModel::Exponential),
        (true, false) => (dy / (x2 / x1).log10(), SlopeModel::Logarithmic),
        (true, true) => ((y2 / y1).ln() / (x2 / x1).ln(), SlopeModel::PowerLaw),
    };
    if !slope.is_finite() {
        return None;
    }
    Some(SlopeMeasurement { dx, dy, slope, model })
}

/// Draws the measured segment with its legs and a slope label.
pub struct LengthRenderer {
    x_axis: AxisHandle,
    y_axis: AxisHandle,
}

impl LengthRenderer {
    pub fn new(x_axis: AxisHandle, y_axis: AxisHandle) -> Self {
        Self { x_axis, y_axis }
    }

    /// Measures the segment between two screen points.
    pub fn measure(&self, p1: ScreenPoint, p2: ScreenPoint) -> Option<SlopeMeasurement> {
        let x = self.x_axis.borrow();
        let y = self.y_axis.borrow();
        let a = (x.inv_transform(f64::from(p1.x)), y.inv_transform(f64::from(p1.y)));
        let b = (x.inv_transform(f64::from(p2.x)), y.inv_transform(f64::from(p2.y)));
        measure_slope(a, b, x.is_log(), y.is_log())
    }

    /// Label text for the segment, or `None` when the slope is undefined.
    pub fn describe(&self, p1: ScreenPoint, p2: ScreenPoint) -> Option<String> {
        let units = self.x_axis.borrow().datum_range().units();
        self.measure(p1, p2).map(|m| m.describe(units))
    }
}

impl DragRenderer for LengthRenderer {
    fn render_drag(&mut self, canvas: &mut DragCanvas, p1: ScreenPoint, p2: ScreenPoint) -> Vec<ScreenRect> {
        let corner = ScreenPoint::new(p2.x, p1.y);
        let mut shapes = vec![
            OverlayShape::Line {
                from: p1,
                to: p2,
                role: OverlayRole::Foreground,
            },
            OverlayShape::Line {
                from: p1,
                to: corner,
                role: OverlayRole::Fill,
            },
            OverlayShape::Line {
                from: corner,
                to: p2,
                role: OverlayRole::Fill,
            },
        ];
        if let Some(text) = self.describe(p1, p2) {
            shapes.push(OverlayShape::Text {
                at: ScreenPoint::new(p2.x + 6, p2.y + 6),
                text,
                role: OverlayRole::Foreground,
            });
        }
        redraw(canvas, shapes)
    }

    fn selection_event(
        &self,
        _canvas: &DragCanvas,
        p1: ScreenPoint,
        p2: ScreenPoint,
        modified: bool,
    ) -> Option<DragSelectionEvent> {
        Some(DragSelectionEvent::new(
            DragSelection::Path {
                points: vec![p1, p2],
                width: 0,
            },
            modified,
        ))
    }
}
