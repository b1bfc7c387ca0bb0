//! Paints the drag overlay held by the input adapter's canvas.
//!
//! Strokes are drawn twice: a wide translucent contrast stroke, then the
//! foreground stroke on top.

use eframe::egui;
use rdas::overlay::{StrokeStyle, ARROW_HEAD_PX};
use rdas::{with_alpha, DragCanvas, OverlayShape, ScreenPoint, ThemeColors};

use crate::rendering::PanelFrame;

/// Head legs of an arrow ending at `to`, in panel-local pixels.
pub fn arrow_head(from: ScreenPoint, to: ScreenPoint) -> Option<[(f64, f64); 2]> {
    let dx = f64::from(to.x - from.x);
    let dy = f64::from(to.y - from.y);
    let len = dx.hypot(dy);
    if len == 0.0 {
        return None;
    }
    let (ux, uy) = (dx / len, dy / len);
    let head = f64::from(ARROW_HEAD_PX);
    let (tx, ty) = (f64::from(to.x), f64::from(to.y));
    // legs at +-30 degrees from the shaft, pointing back
    let (c, s) = (30f64.to_radians().cos(), 30f64.to_radians().sin());
    let left = (tx - head * (ux * c - uy * s), ty - head * (uy * c + ux * s));
    let right = (tx - head * (ux * c + uy * s), ty - head * (uy * c - ux * s));
    Some([left, right])
}

struct Pens {
    contrast: egui::Stroke,
    foreground: egui::Stroke,
}

impl Pens {
    fn new(style: &StrokeStyle, colors: &ThemeColors, color: egui::Color32) -> Self {
        Self {
            contrast: egui::Stroke::new(
                style.contrast_width,
                with_alpha(colors.overlay_contrast, style.contrast_alpha),
            ),
            foreground: egui::Stroke::new(style.width, color),
        }
    }
}

fn stroke_path(painter: &egui::Painter, points: Vec<egui::Pos2>, closed: bool, pens: &Pens) {
    for stroke in [pens.contrast, pens.foreground] {
        let shape = if closed {
            egui::Shape::closed_line(points.clone(), stroke)
        } else {
            egui::Shape::line(points.clone(), stroke)
        };
        painter.add(shape);
    }
}

/// Paints every shape on `canvas`.
pub fn paint_overlay(
    painter: &egui::Painter,
    frame: PanelFrame,
    canvas: &DragCanvas,
    colors: &ThemeColors,
) {
    let style = canvas.style();
    for shape in canvas.shapes() {
        match shape {
            OverlayShape::Line { from, to, role } => {
                let pens = Pens::new(style, colors, colors.overlay(*role));
                stroke_path(painter, vec![frame.to_screen(*from), frame.to_screen(*to)], false, &pens);
            }
            OverlayShape::Rect { rect, filled, role } => {
                let screen = frame.to_screen_rect(*rect);
                if *filled {
                    painter.rect_filled(screen, 0.0, colors.overlay(*role));
                } else {
                    let pens = Pens::new(style, colors, colors.overlay(*role));
                    let corners = vec![
                        screen.left_top(),
                        screen.right_top(),
                        screen.right_bottom(),
                        screen.left_bottom(),
                    ];
                    stroke_path(painter, corners, true, &pens);
                }
            }
            OverlayShape::Polyline { points, closed, role } => {
                let pens = Pens::new(style, colors, colors.overlay(*role));
                let points = points.iter().map(|p| frame.to_screen(*p)).collect();
                stroke_path(painter, points, *closed, &pens);
            }
            OverlayShape::Arrow { from, to, role } => {
                let pens = Pens::new(style, colors, colors.overlay(*role));
                stroke_path(painter, vec![frame.to_screen(*from), frame.to_screen(*to)], false, &pens);
                if let Some([left, right]) = arrow_head(*from, *to) {
                    let tip = frame.to_screen(*to);
                    let legs = vec![frame.at(left.0, left.1), tip, frame.at(right.0, right.1)];
                    stroke_path(painter, legs, false, &pens);
                }
            }
            OverlayShape::Text { at, text, role } => {
                let galley = painter.layout_no_wrap(
                    text.clone(),
                    egui::FontId::monospace(11.0),
                    colors.overlay(*role),
                );
                let pos = frame.to_screen(*at);
                let backdrop = egui::Rect::from_min_size(pos, galley.size()).expand(2.0);
                painter.rect_filled(
                    backdrop,
                    2.0,
                    with_alpha(colors.overlay_contrast, style.contrast_alpha),
                );
                painter.galley(pos, galley, colors.overlay(*role));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_head_points_back() {
        let [left, right] = arrow_head(ScreenPoint::new(0, 0), ScreenPoint::new(20, 0)).unwrap();
        assert!(left.0 < 20.0 && right.0 < 20.0);
        assert!((left.1 + right.1).abs() < 1e-9);
        assert!(arrow_head(ScreenPoint::new(3, 3), ScreenPoint::new(3, 3)).is_none());
    }
}
