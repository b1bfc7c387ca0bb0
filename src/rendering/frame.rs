//! Conversion between panel-local integer pixels and egui screen points.

use eframe::egui;
use rdas::{ScreenPoint, ScreenRect};

/// Origin of the plot panel on screen. Everything the core library sees is
/// relative to this point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelFrame {
    origin: egui::Pos2,
}

impl PanelFrame {
    pub fn new(origin: egui::Pos2) -> Self {
        Self { origin }
    }

    pub fn to_screen(&self, p: ScreenPoint) -> egui::Pos2 {
        self.origin + egui::vec2(p.x as f32, p.y as f32)
    }

    /// Screen position of a fractional panel-local pixel.
    pub fn at(&self, x: f64, y: f64) -> egui::Pos2 {
        self.origin + egui::vec2(x as f32, y as f32)
    }

    pub fn to_screen_rect(&self, r: ScreenRect) -> egui::Rect {
        egui::Rect::from_min_size(
            self.to_screen(ScreenPoint::new(r.x, r.y)),
            egui::vec2(r.width as f32, r.height as f32),
        )
    }

    /// Nearest panel-local pixel of a screen position.
    pub fn to_local(&self, pos: egui::Pos2) -> ScreenPoint {
        let d = pos - self.origin;
        ScreenPoint::new(d.x.round() as i32, d.y.round() as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_origin() {
        let frame = PanelFrame::new(egui::pos2(100.0, 40.0));
        let p = ScreenPoint::new(12, 7);
        assert_eq!(frame.to_screen(p), egui::pos2(112.0, 47.0));
        assert_eq!(frame.to_local(egui::pos2(112.4, 46.6)), p);
        let r = frame.to_screen_rect(ScreenRect::new(0, 0, 10, 5));
        assert_eq!(r.min, egui::pos2(100.0, 40.0));
        assert_eq!(r.size(), egui::vec2(10.0, 5.0));
    }
}
