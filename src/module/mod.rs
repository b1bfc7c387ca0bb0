//! Mouse modules: the interactive behaviours an input adapter dispatches to.
//!
//! A module owns one drag renderer and reacts to the selections it produces
//! through a single [`MouseModule::on_selection`] callback. Raw pointer, key
//! and wheel hooks are available for behaviours that need them (pan, wheel
//! zoom, waypoint editing).
//!
//! Modules provided here:
//! - [`ZoomPanMouseModule`]: drag to pan, wheel to zoom or pan
//! - [`BoxZoomMouseModule`]: box, X-only and Y-only zoom plus gestures
//! - [`AxisRangeMouseModule`]: range zoom along one axis
//! - [`CrosshairMouseModule`]: live data readout
//! - [`BoxSelectorMouseModule`]: box selection with corner tweaking
//! - [`LengthMouseModule`]: distance and slope measurement
//! - [`WaypointsMouseModule`]: path digitising

mod wheel;
mod zoom_pan;
mod box_zoom;
mod axis_range;
mod crosshair;
mod box_selector;
mod length;
mod waypoints;

pub use wheel::{WheelBurst, WheelCoalescer};
pub use zoom_pan::{anchored_zoom, ZoomPanMouseModule, PAN_FRACTION, ZOOM_STEP};
pub use box_zoom::BoxZoomMouseModule;
pub use axis_range::{apply_gesture, AxisRangeMouseModule};
pub use crosshair::CrosshairMouseModule;
pub use box_selector::{BoxSelection, BoxSelectorMouseModule};
pub use length::LengthMouseModule;
pub use waypoints::WaypointsMouseModule;

use std::time::Instant;

use anyhow::Result;

use crate::geometry::ScreenPoint;
use crate::renderer::DragRenderer;
use crate::selection::DragSelectionEvent;

// ===== Input Events =====

/// Physical pointer button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Usually the left button.
    Primary,
    /// Usually the right button.
    Secondary,
    Middle,
}

/// Keyboard modifiers held during an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
    };

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::NONE
        }
    }
}

/// A press, drag or release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub pos: ScreenPoint,
    pub button: MouseButton,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn new(pos: ScreenPoint, button: MouseButton, modifiers: Modifiers) -> Self {
        Self { pos, button, modifiers }
    }

    /// Primary button, no modifiers.
    pub fn primary(x: i32, y: i32) -> Self {
        Self::new(ScreenPoint::new(x, y), MouseButton::Primary, Modifiers::NONE)
    }
}

/// One or more wheel ticks. Positive `clicks` means wheel down (toward the user).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    pub pos: ScreenPoint,
    pub clicks: i32,
    pub modifiers: Modifiers,
    pub at: Instant,
}

/// Keys the interactive layer cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Escape,
    Enter,
    Backspace,
}

/// When a module wants selection events delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionTrigger {
    /// On every drag step.
    pub on_drag: bool,
    /// When a key is pressed during a drag.
    pub on_key: bool,
    /// Once, at release.
    pub on_release: bool,
}

impl Default for SelectionTrigger {
    fn default() -> Self {
        Self {
            on_drag: false,
            on_key: false,
            on_release: true,
        }
    }
}

// ===== Module Contract =====

/// An interactive behaviour bound to a plot component.
pub trait MouseModule {
    /// Unique label, shown in the module popup.
    fn label(&self) -> &str;

    fn renderer(&self) -> &dyn DragRenderer;

    fn renderer_mut(&mut self) -> &mut dyn DragRenderer;

    fn trigger(&self) -> SelectionTrigger {
        SelectionTrigger::default()
    }

    /// Receives every selection, switched on its variant.
    fn on_selection(&mut self, event: &DragSelectionEvent) -> Result<()>;

    /// Chooses the drag origin for a press. Modules that edit an existing
    /// selection may move it.
    fn anchor(&mut self, press: ScreenPoint) -> ScreenPoint {
        press
    }

    fn mouse_pressed(&mut self, _event: &PointerEvent) -> Result<()> {
        Ok(())
    }

    fn mouse_dragged(&mut self, _event: &PointerEvent) -> Result<()> {
        Ok(())
    }

    fn mouse_released(&mut self, _event: &PointerEvent) -> Result<()> {
        Ok(())
    }

    fn key_pressed(&mut self, _key: Key) -> Result<()> {
        Ok(())
    }

    /// True when the module consumes wheel events.
    fn handles_wheel(&self) -> bool {
        false
    }

    fn wheel(&mut self, _event: &WheelEvent) -> Result<()> {
        Ok(())
    }

    /// Periodic tick used to flush deferred work such as coalesced wheel input.
    fn poll(&mut self, _now: Instant) -> Result<()> {
        Ok(())
    }

    /// Abandons any in-progress interaction.
    fn cancel(&mut self) {}

    /// Status text describing the last interaction.
    fn feedback(&self) -> Option<String> {
        None
    }

    fn clear_feedback(&mut self) {}
}
