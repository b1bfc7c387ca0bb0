//! Full-width/height crosshair with a data readout label.

use std::rc::Rc;

use crate::axis::{AxisHandle, AxisView};
use crate::dataset::SeriesReadout;
use crate::geometry::{ScreenPoint, ScreenRect};
use crate::overlay::{DragCanvas, OverlayRole, OverlayShape};
use crate::selection::{DragSelection, DragSelectionEvent};

use super::{redraw, DragRenderer};

/// Crosshair feedback. Every pointer position is a point selection.
pub struct CrosshairRenderer {
    x_axis: Option<AxisHandle>,
    y_axis: Option<AxisHandle>,
    readout: Option<Rc<dyn SeriesReadout>>,
}

impl CrosshairRenderer {
    pub fn new(x_axis: Option<AxisHandle>, y_axis: Option<AxisHandle>) -> Self {
        Self {
            x_axis,
            y_axis,
            readout: None,
        }
    }

    /// Adds a nearest-sample readout to the label.
    pub fn with_readout(mut self, readout: Rc<dyn SeriesReadout>) -> Self {
        self.readout = Some(readout);
        self
    }

    pub fn set_readout(&mut self, readout: Option<Rc<dyn SeriesReadout>>) {
        self.readout = readout;
    }

    /// Label text for the pointer at `p`, one line per axis plus the nearest
    /// sample when a readout is attached.
    pub fn label(&self, p: ScreenPoint) -> String {
        let mut lines = Vec::new();
        let mut x_value = None;
        if let Some(axis) = &self.x_axis {
            let axis = axis.borrow();
            let x = axis.inv_transform(f64::from(p.x));
            x_value = Some(x);
            lines.push(format!("x: {}", axis.datum_range().units().format(x)));
        }
        if let Some(axis) = &self.y_axis {
            let axis = axis.borrow();
            let y = axis.inv_transform(f64::from(p.y));
            lines.push(format!("y: {}", axis.datum_range().units().format(y)));
        }
        if let (Some(readout), Some(x)) = (&self.readout, x_value) {
            if let Some((sx, sy)) = readout.nearest(x) {
                let units = self
                    .x_axis
                    .as_ref()
                    .map(|a| a.borrow().datum_range().units())
                    .unwrap_or_default();
                lines.push(format!("data: {} → {}", units.format(sx), crate::units::format_number(sy)));
            }
        }
        lines.join("\n")
    }
}

impl DragRenderer for CrosshairRenderer {
    fn render_drag(&mut self, canvas: &mut DragCanvas, _p1: ScreenPoint, p2: ScreenPoint) -> Vec<ScreenRect> {
        let b = canvas.bounds();
        let label = self.label(p2);
        let mut shapes = vec![
            OverlayShape::Line {
                from: ScreenPoint::new(b.left(), p2.y),
                to: ScreenPoint::new(b.right() - 1, p2.y),
                role: OverlayRole::Foreground,
            },
            OverlayShape::Line {
                from: ScreenPoint::new(p2.x, b.top()),
                to: ScreenPoint::new(p2.x, b.bottom() - 1),
                role: OverlayRole::Foreground,
            },
        ];
        if !label.is_empty() {
            shapes.push(OverlayShape::Text {
                at: ScreenPoint::new(p2.x + 6, p2.y + 6),
                text: label,
                role: OverlayRole::Foreground,
            });
        }
        redraw(canvas, shapes)
    }

    fn selection_event(
        &self,
        _canvas: &DragCanvas,
        _p1: ScreenPoint,
        p2: ScreenPoint,
        modified: bool,
    ) -> Option<DragSelectionEvent> {
        Some(DragSelectionEvent::new(DragSelection::Point(p2), modified))
    }

    fn is_point_selection(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::{DasAxis, Orientation};
    use crate::datum_range::DatumRange;
    use crate::dataset::SampledSeries;

    fn axes() -> (AxisHandle, AxisHandle) {
        let x = DasAxis::new(DatumRange::numeric(0.0, 100.0).unwrap(), Orientation::Horizontal, 0.0, 200.0);
        let y = DasAxis::new(DatumRange::numeric(0.0, 10.0).unwrap(), Orientation::Vertical, 0.0, 100.0);
        (x.into_handle(), y.into_handle())
    }

    #[test]
    fn test_lines_span_component() {
        let (x, y) = axes();
        let mut canvas = DragCanvas::new(ScreenRect::new(0, 0, 200, 100));
        let mut renderer = CrosshairRenderer::new(Some(x), Some(y));
        renderer.render_drag(&mut canvas, ScreenPoint::new(0, 0), ScreenPoint::new(50, 40));
        assert_eq!(
            canvas.shapes()[0],
            OverlayShape::Line {
                from: ScreenPoint::new(0, 40),
                to: ScreenPoint::new(199, 40),
                role: OverlayRole::Foreground
            }
        );
        assert!(renderer.is_point_selection());
    }

    #[test]
    fn test_label_reads_axes_and_series() {
        let (x, y) = axes();
        let series = SampledSeries::new([(20.0, 1.5), (30.0, 2.5)]);
        let renderer = CrosshairRenderer::new(Some(x), Some(y)).with_readout(Rc::new(series));
        let label = renderer.label(ScreenPoint::new(50, 40));
        assert_eq!(label, "x: 25\ny: 6\ndata: 20 → 1.5");
    }
}
