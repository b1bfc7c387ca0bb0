//! Centralized application state for the plot viewer.
//!
//! Composed of focused state components so panels can borrow the parts they
//! need independently.

use anyhow::Result;
use rdas::GestureConfig;

use crate::state::{BatchState, InteractionState, LayoutState, PlotState, ThemeState};

/// Everything restored from storage at startup.
#[derive(Debug, Clone)]
pub struct ViewerSettings {
    pub theme_name: String,
    pub config: GestureConfig,
    pub primary: String,
    pub secondary: String,
    pub layout: LayoutState,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            theme_name: "Dark".to_string(),
            config: GestureConfig::default(),
            primary: crate::state::DEFAULT_PRIMARY.to_string(),
            secondary: crate::state::DEFAULT_SECONDARY.to_string(),
            layout: LayoutState::new(),
        }
    }
}

pub struct AppState {
    /// Axes, series and the mouse input adapter
    pub plot: PlotState,

    /// Step-through run in progress, if any
    pub batch: Option<BatchState>,

    /// Pointer bookkeeping between frames
    pub interaction: InteractionState,

    /// Theme and styling state
    pub theme: ThemeState,

    /// UI layout state
    pub layout: LayoutState,

    /// Gesture thresholds in effect
    pub config: GestureConfig,

    /// Current error message to display (if any)
    pub error_message: Option<String>,
}

impl AppState {
    /// Creates the state from settings loaded from storage.
    pub fn with_settings(settings: ViewerSettings) -> Result<Self> {
        let plot = PlotState::new(&settings.config, &settings.primary, &settings.secondary)?;
        Ok(Self {
            plot,
            batch: None,
            interaction: InteractionState::new(),
            theme: ThemeState::with_theme(settings.theme_name),
            layout: settings.layout,
            config: settings.config,
            error_message: None,
        })
    }

    /// Settings worth persisting, in their current state.
    pub fn settings(&self) -> ViewerSettings {
        let adapter = self.plot.adapter();
        ViewerSettings {
            theme_name: self.theme.current_theme_name().to_string(),
            config: self.config.clone(),
            primary: adapter.primary_label().unwrap_or_default().to_string(),
            secondary: adapter.secondary_label().unwrap_or_default().to_string(),
            layout: self.layout.clone(),
        }
    }
}
