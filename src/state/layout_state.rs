//! UI layout state management.
//!
//! Margins reserved around the plot for axis labels, and a couple of view
//! toggles. Persisted between sessions.

use rdas::ScreenRect;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutState {
    /// Width reserved left of the plot for Y tick labels.
    y_axis_width: f32,
    /// Height reserved below the plot for X tick labels.
    x_axis_height: f32,
    /// Gap kept free above and right of the plot.
    outer_margin: f32,
    show_grid: bool,
}

impl Default for LayoutState {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutState {
    pub fn new() -> Self {
        Self {
            y_axis_width: 72.0,
            x_axis_height: 44.0,
            outer_margin: 12.0,
            show_grid: true,
        }
    }

    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    pub(crate) fn show_grid_mut(&mut self) -> &mut bool {
        &mut self.show_grid
    }

    /// Default data area for a panel of the given size, in panel-local pixels.
    pub fn plot_area(&self, panel_width: f32, panel_height: f32) -> ScreenRect {
        let left = self.y_axis_width.round() as i32;
        let top = self.outer_margin.round() as i32;
        let width = (panel_width - self.y_axis_width - self.outer_margin).max(0.0) as i32;
        let height = (panel_height - self.x_axis_height - self.outer_margin).max(0.0) as i32;
        ScreenRect::new(left, top, width, height)
    }
}
