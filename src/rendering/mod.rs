//! Rendering subsystem for the plot viewer
//!
//! - Panel frame (panel-local pixels to screen points)
//! - Axis rendering (ticks, labels, grid)
//! - Series rendering (decimated polyline)
//! - Overlay painting (drag feedback from the input adapter)

pub mod frame;
pub mod axis_renderer;
pub mod series_renderer;
pub mod overlay_painter;

pub use frame::PanelFrame;
