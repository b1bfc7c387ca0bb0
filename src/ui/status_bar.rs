//! Status bar UI rendering
//!
//! Memory usage, the current axis ranges, and the active module's feedback
//! or the latest notice.

use eframe::egui;
use egui::RichText;
use rdas::AxisView;

use crate::app::AppState;
use crate::utils::{format_axis_range, format_memory_mb, get_current_memory_mb, single_line};

pub fn render_status_bar(ui: &mut egui::Ui, state: &AppState) {
    let colors = state.theme.colors();
    ui.horizontal(|ui| {
        // Always show memory usage first
        let memory_text = format_memory_mb(get_current_memory_mb());
        ui.label(RichText::new(&memory_text).strong());

        for axis in [state.plot.x_axis(), state.plot.y_axis()] {
            let axis = axis.borrow();
            ui.label(RichText::new("|").strong());
            ui.label(format_axis_range(axis.orientation(), &axis.datum_range(), axis.is_log()));
        }

        ui.label(RichText::new("|").strong());
        match state.plot.adapter().feedback() {
            Some(feedback) => {
                ui.label(RichText::new(single_line(&feedback)).color(colors.warning));
            }
            None => {
                if let Some(notice) = state.plot.latest_notice() {
                    ui.label(RichText::new(notice).color(colors.text_dim));
                }
            }
        }
    });
}
