//! Drag-to-pan and wheel zoom.
//!
//! Dragging holds the mutator lock of every attached axis so that no
//! programmatic change can interleave with the pan; releasing records the
//! pre-pan range in history once. Wheel ticks are coalesced, then applied as
//! a single zoom (or pan, with ctrl/shift) anchored at an axis end when the
//! pointer is close to it.

use std::time::Instant;

use anyhow::Result;
use tracing::debug;

use crate::axis::{AxisHandle, AxisView, DasAxis, Orientation};
use crate::config::GestureConfig;
use crate::datum_range::DatumRange;
use crate::geometry::ScreenPoint;
use crate::renderer::{DragRenderer, EmptyDragRenderer};
use crate::selection::DragSelectionEvent;

use super::{MouseModule, PointerEvent, WheelBurst, WheelCoalescer, WheelEvent};

/// Width factor of one zoom-out click; zoom-in uses the reciprocal so one
/// click out followed by one click in restores the range.
pub const ZOOM_STEP: f64 = 1.5;

/// Fraction of the width panned per wheel click with ctrl/shift held.
pub const PAN_FRACTION: f64 = 0.2;

/// Normalised endpoints of a zoom to `factor` times the current width that
/// keeps normalised position `anchor` fixed.
///
/// # Examples
/// ```
/// use rdas::module::anchored_zoom;
/// assert_eq!(anchored_zoom(0.5, 1.5), (-0.25, 1.25));
/// assert_eq!(anchored_zoom(0.0, 0.5), (0.0, 0.5));
/// ```
pub fn anchored_zoom(anchor: f64, factor: f64) -> (f64, f64) {
    let lo = anchor - anchor * factor;
    (lo, lo + factor)
}

#[derive(Debug, Clone)]
struct PanState {
    press: ScreenPoint,
    bases: Vec<Option<DatumRange>>,
}

pub struct ZoomPanMouseModule {
    label: String,
    axes: Vec<AxisHandle>,
    renderer: EmptyDragRenderer,
    coalescer: WheelCoalescer,
    edge_zone_px: i32,
    pan: Option<PanState>,
    feedback: Option<String>,
}

impl ZoomPanMouseModule {
    /// Creates the module for any combination of axes.
    ///
    /// # Arguments
    /// * `x_axis` - Horizontal axis panned by horizontal motion
    /// * `y_axis` - Vertical axis panned by vertical motion
    /// * `config` - Supplies the wheel coalescing window and edge zone
    pub fn new(x_axis: Option<AxisHandle>, y_axis: Option<AxisHandle>, config: &GestureConfig) -> Self {
        Self {
            label: "Zoom Pan".to_string(),
            axes: x_axis.into_iter().chain(y_axis).collect(),
            renderer: EmptyDragRenderer,
            coalescer: WheelCoalescer::new(config.wheel_coalesce_window()),
            edge_zone_px: config.wheel_edge_zone_px,
            pan: None,
            feedback: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Normalised zoom anchor for a pointer at `pos`: 0 or 1 near an axis
    /// end, 0.5 elsewhere.
    fn zoom_anchor(&self, axis: &DasAxis, pos: ScreenPoint) -> f64 {
        let pixel = f64::from(match axis.orientation() {
            Orientation::Horizontal => pos.x,
            Orientation::Vertical => pos.y,
        });
        let (a, b) = axis.pixel_bounds();
        let (lo, hi) = (a.min(b), a.max(b));
        let zone = f64::from(self.edge_zone_px).min((hi - lo) / 3.0);
        let near_low = pixel >= lo && pixel < lo + zone;
        let near_high = pixel <= hi && pixel > hi - zone;
        match (axis.orientation(), near_low, near_high) {
            (Orientation::Horizontal, true, _) => 0.0,
            (Orientation::Horizontal, _, true) => 1.0,
            // screen top is the data maximum
            (Orientation::Vertical, true, _) => 1.0,
            (Orientation::Vertical, _, true) => 0.0,
            _ => 0.5,
        }
    }

    fn apply_burst(&mut self, burst: WheelBurst) {
        if burst.clicks == 0 {
            return;
        }
        if burst.pan {
            self.apply_pan(burst.clicks);
        } else {
            self.apply_zoom(burst);
        }
    }

    fn apply_pan(&mut self, clicks: i32) {
        let target = self
            .axes
            .iter()
            .find(|a| a.borrow().is_horizontal())
            .or_else(|| self.axes.first());
        let Some(axis) = target else {
            return;
        };
        let shift = PAN_FRACTION * f64::from(clicks);
        let mut axis = axis.borrow_mut();
        let log = axis.is_log();
        if let Some(range) = axis.datum_range().rescale_for(log, shift, 1.0 + shift) {
            if axis.set_datum_range(range) {
                self.feedback = Some(format!("pan {}", range));
            }
        }
    }

    fn apply_zoom(&mut self, burst: WheelBurst) {
        let factor = ZOOM_STEP.powi(-burst.clicks);
        for handle in &self.axes {
            let anchor = self.zoom_anchor(&handle.borrow(), burst.pos);
            let (lo, hi) = anchored_zoom(anchor, factor);
            let mut axis = handle.borrow_mut();
            let log = axis.is_log();
            let Some(range) = axis.datum_range().rescale_for(log, lo, hi) else {
                continue;
            };
            let rounded = axis.round(&range);
            if axis.set_datum_range(rounded) {
                debug!(clicks = burst.clicks, anchor, %rounded, "wheel zoom applied");
                self.feedback = Some(format!("zoom {}", rounded));
            }
        }
    }
}

impl MouseModule for ZoomPanMouseModule {
    fn label(&self) -> &str {
        &self.label
    }

    fn renderer(&self) -> &dyn DragRenderer {
        &self.renderer
    }

    fn renderer_mut(&mut self) -> &mut dyn DragRenderer {
        &mut self.renderer
    }

    fn on_selection(&mut self, _event: &DragSelectionEvent) -> Result<()> {
        Ok(())
    }

    fn mouse_pressed(&mut self, event: &PointerEvent) -> Result<()> {
        let mut bases = Vec::with_capacity(self.axes.len());
        for handle in &self.axes {
            let mut axis = handle.borrow_mut();
            axis.mutator_lock();
            bases.push(Some(axis.datum_range()));
        }
        self.pan = Some(PanState {
            press: event.pos,
            bases,
        });
        Ok(())
    }

    fn mouse_dragged(&mut self, event: &PointerEvent) -> Result<()> {
        let Some(pan) = &self.pan else {
            return Ok(());
        };
        for (handle, base) in self.axes.iter().zip(&pan.bases) {
            let Some(base) = base else { continue };
            let mut axis = handle.borrow_mut();
            let dpx = match axis.orientation() {
                Orientation::Horizontal => event.pos.x - pan.press.x,
                Orientation::Vertical => event.pos.y - pan.press.y,
            };
            if let Some(range) = axis.range_panned_by(base, f64::from(dpx)) {
                axis.pan_to(range);
            }
        }
        Ok(())
    }

    fn mouse_released(&mut self, _event: &PointerEvent) -> Result<()> {
        if self.pan.take().is_some() {
            for handle in &self.axes {
                handle.borrow_mut().unlock();
            }
            if let Some(axis) = self.axes.first() {
                self.feedback = Some(format!("pan {}", axis.borrow().datum_range()));
            }
        }
        Ok(())
    }

    fn handles_wheel(&self) -> bool {
        true
    }

    fn wheel(&mut self, event: &WheelEvent) -> Result<()> {
        if let Some(burst) = self.coalescer.push(event) {
            self.apply_burst(burst);
        }
        Ok(())
    }

    fn poll(&mut self, now: Instant) -> Result<()> {
        if let Some(burst) = self.coalescer.poll(now) {
            self.apply_burst(burst);
        }
        Ok(())
    }

    /// Restores the pre-pan ranges and releases the locks.
    fn cancel(&mut self) {
        if let Some(pan) = self.pan.take() {
            for (handle, base) in self.axes.iter().zip(pan.bases) {
                let mut axis = handle.borrow_mut();
                if let Some(base) = base {
                    axis.pan_to(base);
                }
                axis.unlock();
            }
        }
    }

    fn feedback(&self) -> Option<String> {
        self.feedback.clone()
    }

    fn clear_feedback(&mut self) {
        self.feedback = None;
    }
}
