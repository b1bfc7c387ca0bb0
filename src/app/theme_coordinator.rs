//! Theme persistence and application.

use crate::app::AppState;

const THEME_KEY: &str = "theme_preference";

pub struct ThemeCoordinator;

impl ThemeCoordinator {
    /// Theme name from storage, "Dark" when none was saved.
    pub fn load_theme_from_storage(storage: Option<&dyn eframe::Storage>) -> String {
        storage
            .and_then(|s| s.get_string(THEME_KEY))
            .unwrap_or_else(|| "Dark".to_string())
    }

    pub fn save_theme_to_storage(storage: &mut dyn eframe::Storage, theme_name: &str) {
        storage.set_string(THEME_KEY, theme_name.to_string());
    }

    /// Applies the current theme to the egui context. Called every frame.
    pub fn apply_current_theme(ctx: &egui::Context, state: &AppState) {
        let manager = state.theme.theme_manager();
        if let Some(theme) = manager.get_theme(state.theme.current_theme_name()) {
            let mut visuals = if theme.name == "Light" {
                egui::Visuals::light()
            } else {
                egui::Visuals::dark()
            };
            manager.apply_theme(theme, &mut visuals);
            ctx.set_visuals(visuals);
        }
    }
}
