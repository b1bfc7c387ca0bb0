//! State management modules for the plot viewer.
//!
//! This module contains state-only logic (no UI concerns):
//! - Plot state (axes, series, input adapter, popup and notices)
//! - Batch state (step-through progress)
//! - Interaction state (pressed button, partial wheel clicks)
//! - Theme state (theme manager, current theme)
//! - Layout state (axis margins, view toggles)

mod plot_state;
mod batch_state;
mod interaction_state;
mod theme_state;
mod layout_state;

pub use plot_state::{PlotState, DEFAULT_PRIMARY, DEFAULT_SECONDARY};
pub use batch_state::{current_x_range, BatchState};
pub use interaction_state::{InteractionState, POINTS_PER_CLICK};
pub use theme_state::ThemeState;
pub use layout_state::LayoutState;
