//! Plot panel UI rendering
//!
//! Lays out the data area, routes input to the adapter, then paints axes,
//! the series, the drag overlay and the module popup.

use eframe::egui;

use crate::app::{AppState, ViewerCommand};
use crate::rendering::axis_renderer::{render_x_axis, render_y_axis};
use crate::rendering::overlay_painter::paint_overlay;
use crate::rendering::series_renderer::render_series;
use crate::rendering::PanelFrame;
use crate::ui::input::plot_input_handler::{handle_plot_input, PlotInputResult};

pub fn render_plot_panel(ui: &mut egui::Ui, state: &mut AppState) -> Option<ViewerCommand> {
    let ctx = ui.ctx().clone();
    let size = ui.available_size();
    let (rect, _response) = ui.allocate_exact_size(size, egui::Sense::click_and_drag());
    let frame = PanelFrame::new(rect.min);

    let area = state.layout.plot_area(rect.width(), rect.height());
    state.plot.layout(area);

    if handle_plot_input(&ctx, frame, rect, &mut state.plot, &mut state.interaction)
        == PlotInputResult::Handled
    {
        ctx.request_repaint();
    }

    let colors = state.theme.colors();
    let painter = ui.painter_at(rect);
    let bounds = state.plot.bounds();
    painter.rect_filled(frame.to_screen_rect(bounds), 0.0, colors.plot_background);
    {
        let x_axis = state.plot.x_axis().borrow();
        let y_axis = state.plot.y_axis().borrow();
        let grid = state.layout.show_grid();
        render_x_axis(&painter, frame, &x_axis, bounds, &colors, grid);
        render_y_axis(&painter, frame, &y_axis, bounds, &colors, grid);
        render_series(&painter, frame, state.plot.series(), &x_axis, &y_axis, bounds, colors.trace);
    }
    paint_overlay(&painter, frame, state.plot.adapter().canvas(), &colors);

    render_module_popup(&ctx, frame, state)
}

/// Module chooser shown after a right click. Picking a module binds it to the
/// left button.
fn render_module_popup(ctx: &egui::Context, frame: PanelFrame, state: &AppState) -> Option<ViewerCommand> {
    let popup = state.plot.popup()?;
    let current = state.plot.adapter().primary_label().unwrap_or_default();
    let mut command = None;

    let area = egui::Area::new(egui::Id::new("module_popup"))
        .order(egui::Order::Foreground)
        .fixed_pos(frame.to_screen(popup.at))
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.label(egui::RichText::new("Left button").strong());
                ui.separator();
                for label in &popup.labels {
                    if ui.selectable_label(label == current, label.as_str()).clicked() {
                        command = Some(ViewerCommand::SetPrimary(label.clone()));
                    }
                }
            });
        });

    if command.is_none() {
        let dismissed = ctx.input(|i| {
            let outside = i
                .pointer
                .interact_pos()
                .is_some_and(|p| !area.response.rect.contains(p));
            (i.pointer.primary_clicked() && outside) || i.key_pressed(egui::Key::Escape)
        });
        if dismissed {
            command = Some(ViewerCommand::ClosePopup);
        }
    }
    command
}
