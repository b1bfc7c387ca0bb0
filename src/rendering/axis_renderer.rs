//! Axis rendering: tick marks, labels and grid lines.
//!
//! Tick positions come from the same dividers the axes use to round
//! interactive ranges, so a box zoom lands on values that carry labels.

use eframe::egui;
use rdas::{tick_values, AxisView, DasAxis, ScreenRect, ThemeColors, Units};

use crate::rendering::PanelFrame;

/// Horizontal spacing wanted between X labels.
const X_LABEL_SPACING_PX: i32 = 120;
/// Vertical spacing wanted between Y labels.
const Y_LABEL_SPACING_PX: i32 = 40;
const TICK_LENGTH: f32 = 5.0;

/// Label for a tick. Times break between date and time of day.
pub fn tick_label(units: Units, value: f64) -> String {
    let text = units.format(value);
    if units.is_time() {
        text.replacen(' ', "\n", 1)
    } else {
        text
    }
}

/// Draws the X axis below `bounds`, with optional vertical grid lines.
pub fn render_x_axis(
    painter: &egui::Painter,
    frame: PanelFrame,
    axis: &DasAxis,
    bounds: ScreenRect,
    colors: &ThemeColors,
    show_grid: bool,
) {
    let range = axis.datum_range();
    let max_ticks = (bounds.width / X_LABEL_SPACING_PX).max(2) as usize;
    let baseline = f64::from(bounds.bottom());
    let stroke = egui::Stroke::new(1.0, colors.axis);

    painter.line_segment(
        [
            frame.at(f64::from(bounds.left()), baseline),
            frame.at(f64::from(bounds.right()), baseline),
        ],
        stroke,
    );

    for value in tick_values(&range, axis.is_log(), max_ticks) {
        let x = axis.transform(value);
        let foot = frame.at(x, baseline);
        if show_grid {
            painter.line_segment(
                [frame.at(x, f64::from(bounds.top())), foot],
                egui::Stroke::new(1.0, colors.grid),
            );
        }
        painter.line_segment([foot, foot + egui::vec2(0.0, TICK_LENGTH)], stroke);
        painter.text(
            foot + egui::vec2(0.0, TICK_LENGTH + 2.0),
            egui::Align2::CENTER_TOP,
            tick_label(range.units(), value),
            egui::FontId::proportional(11.0),
            colors.text,
        );
    }
}

/// Draws the Y axis left of `bounds`, with optional horizontal grid lines.
pub fn render_y_axis(
    painter: &egui::Painter,
    frame: PanelFrame,
    axis: &DasAxis,
    bounds: ScreenRect,
    colors: &ThemeColors,
    show_grid: bool,
) {
    let range = axis.datum_range();
    let max_ticks = (bounds.height / Y_LABEL_SPACING_PX).max(2) as usize;
    let left = f64::from(bounds.left());
    let stroke = egui::Stroke::new(1.0, colors.axis);

    painter.line_segment(
        [frame.at(left, f64::from(bounds.top())), frame.at(left, f64::from(bounds.bottom()))],
        stroke,
    );

    for value in tick_values(&range, axis.is_log(), max_ticks) {
        let y = axis.transform(value);
        let foot = frame.at(left, y);
        if show_grid {
            painter.line_segment(
                [foot, frame.at(f64::from(bounds.right()), y)],
                egui::Stroke::new(1.0, colors.grid),
            );
        }
        painter.line_segment([foot - egui::vec2(TICK_LENGTH, 0.0), foot], stroke);
        painter.text(
            foot - egui::vec2(TICK_LENGTH + 3.0, 0.0),
            egui::Align2::RIGHT_CENTER,
            tick_label(range.units(), value),
            egui::FontId::proportional(11.0),
            colors.text,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_label_splits_time() {
        assert_eq!(tick_label(Units::Seconds, 0.0), "1970-01-01\n00:00:00");
        assert_eq!(tick_label(Units::Dimensionless, 2.5), "2.5");
    }
}
