//! Panel orchestration and layout management.

use crate::app::{AppState, ViewerCommand};
use crate::ui::{header, plot_panel, status_bar};

pub struct PanelManager;

impl PanelManager {
    /// Renders all panels in the application window.
    ///
    /// Called from `eframe::App::update`; returns the command a panel raised.
    pub fn render_all_panels(ctx: &egui::Context, state: &mut AppState) -> Option<ViewerCommand> {
        let mut command: Option<ViewerCommand> = None;

        // Header panel at the top
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            if let Some(c) = header::render_header(ui, state) {
                command = Some(c);
            }
        });

        // Status panel at the very bottom
        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            status_bar::render_status_bar(ui, state);
        });

        let plot_frame = egui::Frame::default()
            .inner_margin(egui::Margin::same(4))
            .fill(ctx.style().visuals.panel_fill);

        egui::CentralPanel::default().frame(plot_frame).show(ctx, |ui| {
            if let Some(c) = plot_panel::render_plot_panel(ui, state) {
                command = Some(c);
            }
        });

        command
    }
}
