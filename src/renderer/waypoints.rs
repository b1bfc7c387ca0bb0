//! Multi-segment path with a corridor ("pathway") of configurable width,
//! used for digitising along a feature.

use crate::geometry::{ScreenPoint, ScreenRect};
use crate::overlay::{DragCanvas, OverlayRole, OverlayShape};
use crate::selection::{DragSelection, DragSelectionEvent};

use super::{non_empty, redraw, DragRenderer};

/// Corner points of the corridor around each segment of `points`.
///
/// Each quad is `[a + n, b + n, b - n, a - n]` where `n` is the segment normal
/// scaled to half of `width`. Zero-length segments produce no quad.
pub fn pathway_quads(points: &[ScreenPoint], width: i32) -> Vec<[ScreenPoint; 4]> {
    let half = f64::from(width) / 2.0;
    points
        .windows(2)
        .filter_map(|pair| {
            let (a, b) = (pair[0], pair[1]);
            let dx = f64::from(b.x - a.x);
            let dy = f64::from(b.y - a.y);
            let len = dx.hypot(dy);
            if len == 0.0 {
                return None;
            }
            let nx = (-dy / len * half).round() as i32;
            let ny = (dx / len * half).round() as i32;
            Some([
                ScreenPoint::new(a.x + nx, a.y + ny),
                ScreenPoint::new(b.x + nx, b.y + ny),
                ScreenPoint::new(b.x - nx, b.y - ny),
                ScreenPoint::new(a.x - nx, a.y - ny),
            ])
        })
        .collect()
}

/// Draws the committed waypoints, their pathway and the pending segment.
#[derive(Debug, Clone)]
pub struct WaypointsRenderer {
    waypoints: Vec<ScreenPoint>,
    width: i32,
}

impl WaypointsRenderer {
    pub fn new(width: i32) -> Self {
        Self {
            waypoints: Vec::new(),
            width: width.max(0),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn set_waypoints(&mut self, waypoints: &[ScreenPoint]) {
        self.waypoints = waypoints.to_vec();
    }

    fn path_shapes(&self, points: &[ScreenPoint]) -> Vec<OverlayShape> {
        let mut shapes: Vec<OverlayShape> = pathway_quads(points, self.width)
            .into_iter()
            .map(|quad| OverlayShape::Polyline {
                points: quad.to_vec(),
                closed: true,
                role: OverlayRole::Fill,
            })
            .collect();
        if points.len() > 1 {
            shapes.push(OverlayShape::Polyline {
                points: points.to_vec(),
                closed: false,
                role: OverlayRole::Foreground,
            });
        }
        if let Some(last) = points.last() {
            shapes.push(OverlayShape::Rect {
                rect: ScreenRect::new(last.x - 2, last.y - 2, 5, 5),
                filled: true,
                role: OverlayRole::Accent,
            });
        }
        shapes
    }
}

impl DragRenderer for WaypointsRenderer {
    fn render_drag(&mut self, canvas: &mut DragCanvas, _p1: ScreenPoint, p2: ScreenPoint) -> Vec<ScreenRect> {
        let mut points = self.waypoints.clone();
        points.push(p2);
        redraw(canvas, self.path_shapes(&points))
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

    /// Drops the pending segment but keeps the committed waypoints visible.
    fn clear(&mut self, canvas: &mut DragCanvas) -> Vec<ScreenRect> {
        if self.waypoints.is_empty() {
            return non_empty(canvas.clear());
        }
        let shapes = self.path_shapes(&self.waypoints);
        redraw(canvas, shapes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quads_offset_by_half_width() {
        let quads = pathway_quads(&[ScreenPoint::new(0, 0), ScreenPoint::new(10, 0)], 4);
        assert_eq!(
            quads,
            vec![[
                ScreenPoint::new(0, 2),
                ScreenPoint::new(10, 2),
                ScreenPoint::new(10, -2),
                ScreenPoint::new(0, -2)
            ]]
        );
    }

    #[test]
    fn test_degenerate_segments_are_skipped() {
        let pts = [ScreenPoint::new(5, 5), ScreenPoint::new(5, 5), ScreenPoint::new(5, 15)];
        assert_eq!(pathway_quads(&pts, 6).len(), 1);
        assert!(pathway_quads(&pts[..1], 6).is_empty());
    }

    #[test]
    fn test_clear_keeps_committed_path() {
        let mut canvas = DragCanvas::new(ScreenRect::new(0, 0, 300, 300));
        let mut r = WaypointsRenderer::new(8);
        r.set_waypoints(&[ScreenPoint::new(10, 10), ScreenPoint::new(50, 10)]);
        r.render_drag(&mut canvas, ScreenPoint::new(50, 10), ScreenPoint::new(90, 40));
        let during = canvas.shapes().len();
        r.clear(&mut canvas);
        assert!(canvas.shapes().len() < during);
        assert!(!canvas.is_empty());
        r.set_waypoints(&[]);
        r.clear(&mut canvas);
        assert!(canvas.is_empty());
    }
}
