//! Header panel UI rendering
//!
//! Module bindings, history and scan buttons, the Y log toggle, batch
//! stepping and the theme selector.

use eframe::egui;
use crate::app::{AppState, ApplicationCoordinator, ViewerCommand};

/// Combo box choosing a module label. Returns the new label when changed.
fn module_combo(ui: &mut egui::Ui, id: &str, current: &str, labels: &[String]) -> Option<String> {
    let mut selected = current.to_string();
    egui::ComboBox::from_id_salt(id)
        .selected_text(&selected)
        .show_ui(ui, |ui| {
            for label in labels {
                ui.selectable_value(&mut selected, label.clone(), label.as_str());
            }
        });
    (selected != current).then_some(selected)
}

/// Renders the application header.
///
/// # Returns
/// The command requested by the user, if any
pub fn render_header(ui: &mut egui::Ui, state: &mut AppState) -> Option<ViewerCommand> {
    let mut command = None;

    ui.horizontal(|ui| {
        let labels = state.plot.adapter().labels();
        let primary = state.plot.adapter().primary_label().unwrap_or_default().to_string();
        let secondary = state.plot.adapter().secondary_label().unwrap_or_default().to_string();

        ui.label("Left:");
        if let Some(label) = module_combo(ui, "primary_module", &primary, &labels) {
            command = Some(ViewerCommand::SetPrimary(label));
        }
        ui.label("Middle:");
        if let Some(label) = module_combo(ui, "secondary_module", &secondary, &labels) {
            command = Some(ViewerCommand::SetSecondary(label));
        }

        ui.separator();

        let (back, forward) = {
            let x = state.plot.x_axis().borrow();
            let y = state.plot.y_axis().borrow();
            (
                x.history().back_len() + y.history().back_len() > 0,
                x.history().forward_len() + y.history().forward_len() > 0,
            )
        };
        if ui.add_enabled(back, egui::Button::new("◀ Back")).clicked() {
            command = Some(ViewerCommand::Back);
        }
        if ui.add_enabled(forward, egui::Button::new("Forward ▶")).clicked() {
            command = Some(ViewerCommand::Forward);
        }
        if ui.button("🔍- Zoom Out").clicked() {
            command = Some(ViewerCommand::ZoomOut);
        }
        if ui.button("⏪").on_hover_text("Scan to the previous interval").clicked() {
            command = Some(ViewerCommand::ScanPrevious);
        }
        if ui.button("⏩").on_hover_text("Scan to the next interval").clicked() {
            command = Some(ViewerCommand::ScanNext);
        }
        if ui.button("⛶ Reset").clicked() {
            command = Some(ViewerCommand::Reset);
        }

        ui.separator();

        let mut y_log = ApplicationCoordinator::y_is_log(state);
        if ui.checkbox(&mut y_log, "Y log").changed() {
            command = Some(ViewerCommand::ToggleYLog);
        }
        ui.checkbox(state.layout.show_grid_mut(), "Grid");

        ui.separator();

        match &state.batch {
            Some(batch) => {
                let (done, total) = batch.progress();
                ui.add(egui::Spinner::new());
                ui.label(format!("Page {done} / {total}"));
                if ui.button("Cancel").clicked() {
                    command = Some(ViewerCommand::CancelBatch);
                }
            }
            None => {
                let response = ui.button("▶ Step through");
                if response.clicked() {
                    command = Some(ViewerCommand::StepThrough);
                }
                response.on_hover_text("Page through the following intervals one frame at a time");
            }
        }

        // Push theme selector to the right
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let old_theme = state.theme.current_theme_name().to_string();
            let mut current_theme = old_theme.clone();
            egui::ComboBox::from_id_salt("theme_selector")
                .selected_text(&current_theme)
                .show_ui(ui, |ui| {
                    for theme_name in state.theme.theme_manager().list_themes() {
                        ui.selectable_value(&mut current_theme, theme_name.to_string(), theme_name);
                    }
                });

            if old_theme != current_theme {
                state.theme.set_theme(current_theme);
                ui.ctx().request_repaint();
            }

            ui.label("Theme:");
        });
    });

    if let Some(err) = &state.error_message {
        ui.colored_label(state.theme.colors().error, err);
    }

    command
}
