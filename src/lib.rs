//! rdas: interactive axis gestures, drag feedback and zoom/pan state for
//! scientific plots.
//!
//! Pointer events flow through a [`MouseInputAdapter`] to the active
//! [`MouseModule`], whose [`DragRenderer`] draws feedback on a [`DragCanvas`]
//! and turns the drag into a [`DragSelection`]. Modules apply selections to
//! [`DasAxis`] instances, which guard every range change.

pub mod geometry;
pub mod units;
pub mod datum_range;
pub mod divider;
pub mod error;
pub mod config;
pub mod axis;
pub mod gesture;
pub mod selection;
pub mod overlay;
pub mod renderer;
pub mod module;
pub mod input_adapter;
pub mod batch;
pub mod dataset;
pub mod theme;

// Core types
pub use geometry::{ScreenPoint, ScreenRect};
pub use units::Units;
pub use datum_range::DatumRange;
pub use divider::{maybe_round, tick_values, Divider};
pub use error::ConfigError;
pub use config::GestureConfig;
pub use axis::{AxisHandle, AxisView, ChangeSource, DasAxis, Orientation, RangeChange};
pub use gesture::{classify, classify_box, BoxZoomKind, DragGesture};
pub use selection::{DragSelection, DragSelectionEvent};

// Interaction
pub use overlay::{DragCanvas, OverlayRole, OverlayShape};
pub use renderer::DragRenderer;
pub use module::{Key, Modifiers, MouseButton, MouseModule, PointerEvent, WheelEvent};
pub use input_adapter::{AdapterEvent, DragState, ErrorHandler, MouseInputAdapter};
pub use batch::{BatchRunner, BatchTask};
pub use dataset::{SampledSeries, SeriesReadout};

// Theme support
pub use theme::{hex_to_color32, with_alpha, Theme, ThemeColors, ThemeManager};
