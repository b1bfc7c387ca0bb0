//! Interactive plot viewer built on the rdas gesture core.
//!
//! One plot of a synthetic time series. Mouse modules are bound to the left
//! and middle buttons from the header or from the right-click popup; the
//! wheel zooms (or pans with ctrl/shift); shift-drag near the plot's edges
//! resizes it and near its center moves it.
//!
//! The application is built with a modular architecture:
//! - `app/` - Application state and coordinators
//! - `state/` - Plot, batch, interaction, theme and layout state
//! - `ui/` - Panel rendering and input handling
//! - `rendering/` - Axis, series and overlay painting
//! - `io/` - Synthetic data generation
//! - `utils/` - Formatting helpers
//!
//! Logging goes through `tracing`; set `RUST_LOG` (default `info`).

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;
use tracing_subscriber::EnvFilter;

mod utils;
mod io;
mod app;
mod rendering;
mod ui;
mod state;

use app::{AppState, ApplicationCoordinator, SettingsCoordinator, ThemeCoordinator};
use ui::panel_manager::PanelManager;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> eframe::Result {
    init_logging();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("DAS Plot Viewer"),
        ..Default::default()
    };

    eframe::run_native(
        "DAS Plot Viewer",
        options,
        Box::new(|cc| Ok(Box::new(DasViewerApp::new(cc)?))),
    )
}

/// The viewer application; coordinators do the work.
struct DasViewerApp {
    state: AppState,
}

impl DasViewerApp {
    /// Creates the viewer with settings restored from persistent storage.
    fn new(cc: &eframe::CreationContext) -> anyhow::Result<Self> {
        let settings = SettingsCoordinator::load_viewer_settings(cc.storage);
        tracing::info!(
            theme = %settings.theme_name,
            primary = %settings.primary,
            secondary = %settings.secondary,
            "starting viewer"
        );
        Ok(Self {
            state: AppState::with_settings(settings)?,
        })
    }
}

impl eframe::App for DasViewerApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        SettingsCoordinator::save_viewer_settings(storage, &self.state.settings());
    }

    /// 1. Advance a running batch
    /// 2. Apply theme
    /// 3. Render all panels
    /// 4. Execute the command a panel raised
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ApplicationCoordinator::pump_batch(&mut self.state) {
            ctx.request_repaint();
        }

        ThemeCoordinator::apply_current_theme(ctx, &self.state);

        if let Some(command) = PanelManager::render_all_panels(ctx, &mut self.state) {
            ApplicationCoordinator::execute(&mut self.state, command, ctx);
            ctx.request_repaint();
        }
    }
}
