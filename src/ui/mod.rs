//! UI panel rendering subsystem
//!
//! - Header panel (module bindings, navigation, batch, theme selector)
//! - Plot panel (axes, series, drag overlay, module popup)
//! - Status bar (memory, axis ranges, module feedback)
//! - Panel manager (panel orchestration and layout)
//! - Input handling (pointer, wheel and key routing to the input adapter)

pub mod header;
pub mod plot_panel;
pub mod status_bar;
pub mod panel_manager;
pub mod input;
