//! Plot state: the two axes, the demo series and the input adapter that
//! dispatches pointer input to mouse modules.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use anyhow::{Context, Result};
use rdas::module::{
    AxisRangeMouseModule, BoxSelectorMouseModule, BoxZoomMouseModule, CrosshairMouseModule,
    LengthMouseModule, WaypointsMouseModule, ZoomPanMouseModule,
};
use rdas::{
    AdapterEvent, AxisHandle, AxisView, DasAxis, DatumRange, ErrorHandler, GestureConfig,
    MouseInputAdapter, Orientation, SampledSeries, ScreenPoint, ScreenRect, SeriesReadout, Units,
};
use tracing::{debug, warn};

use crate::io::SampleGenerator;

pub const DEFAULT_PRIMARY: &str = "Box Zoom";
pub const DEFAULT_SECONDARY: &str = "Zoom Pan";

/// How many notices the status bar history keeps.
const MAX_NOTICES: usize = 8;

type Notices = Rc<RefCell<VecDeque<String>>>;

fn push_notice(notices: &Notices, text: String) {
    let mut notices = notices.borrow_mut();
    if notices.len() == MAX_NOTICES {
        notices.pop_front();
    }
    notices.push_back(text);
}

/// Routes module errors to the status bar as well as the log.
struct NoticeErrorHandler {
    notices: Notices,
}

impl ErrorHandler for NoticeErrorHandler {
    fn handle(&mut self, module: &str, error: &anyhow::Error) {
        warn!(module, error = %format!("{error:#}"), "mouse module callback failed");
        push_notice(&self.notices, format!("{module}: {error:#}"));
    }
}

/// Module chooser requested by a right click.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupRequest {
    pub at: ScreenPoint,
    pub labels: Vec<String>,
}

pub struct PlotState {
    x_axis: AxisHandle,
    y_axis: AxisHandle,
    series: Rc<SampledSeries>,
    adapter: MouseInputAdapter,
    initial_x: DatumRange,
    initial_y: DatumRange,
    /// Data area in panel-local pixels.
    bounds: ScreenRect,
    /// Set once the user moves or resizes the plot with shift-drag.
    bounds_override: Option<ScreenRect>,
    popup: Option<PopupRequest>,
    notices: Notices,
}

impl std::fmt::Debug for PlotState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlotState")
            .field("bounds", &self.bounds)
            .field("primary", &self.adapter.primary_label())
            .field("secondary", &self.adapter.secondary_label())
            .finish_non_exhaustive()
    }
}

impl PlotState {
    /// Builds the plot around a freshly generated series and registers every
    /// mouse module. Unknown module labels fall back to the defaults.
    pub fn new(config: &GestureConfig, primary: &str, secondary: &str) -> Result<Self> {
        let series = Rc::new(SampleGenerator::new().generate());
        let initial_x = x_extent(&series)?;
        let initial_y = y_extent(&series)?;

        let x_axis = DasAxis::new(initial_x, Orientation::Horizontal, 0.0, 1.0)
            .with_history_depth(config.history_depth)
            .into_handle();
        let y_axis = DasAxis::new(initial_y, Orientation::Vertical, 0.0, 1.0)
            .with_history_depth(config.history_depth)
            .into_handle();

        for axis in [&x_axis, &y_axis] {
            axis.borrow_mut().add_range_listener(move |change| {
                debug!(old = %change.old, new = %change.new, source = ?change.source, "axis range changed");
            });
        }

        let notices: Notices = Rc::new(RefCell::new(VecDeque::new()));
        let adapter = build_adapter(&x_axis, &y_axis, &series, config, &notices)?;

        let mut state = Self {
            x_axis,
            y_axis,
            series,
            adapter,
            initial_x,
            initial_y,
            bounds: ScreenRect::default(),
            bounds_override: None,
            popup: None,
            notices,
        };
        state.bind_modules(primary, secondary);
        Ok(state)
    }

    fn bind_modules(&mut self, primary: &str, secondary: &str) {
        if let Err(e) = self.adapter.set_primary(primary) {
            warn!(%e, "falling back to default primary module");
            let _ = self.adapter.set_primary(DEFAULT_PRIMARY);
        }
        if let Err(e) = self.adapter.set_secondary(secondary) {
            warn!(%e, "falling back to default secondary module");
            let _ = self.adapter.set_secondary(DEFAULT_SECONDARY);
        }
    }

    // ===== Queries =====

    pub fn x_axis(&self) -> &AxisHandle {
        &self.x_axis
    }

    pub fn y_axis(&self) -> &AxisHandle {
        &self.y_axis
    }

    pub fn series(&self) -> &SampledSeries {
        &self.series
    }

    pub fn adapter(&self) -> &MouseInputAdapter {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut MouseInputAdapter {
        &mut self.adapter
    }

    pub fn bounds(&self) -> ScreenRect {
        self.bounds
    }

    pub fn popup(&self) -> Option<&PopupRequest> {
        self.popup.as_ref()
    }

    pub fn latest_notice(&self) -> Option<String> {
        self.notices.borrow().back().cloned()
    }

    pub fn is_y_log(&self) -> bool {
        self.y_axis.borrow().is_log()
    }

    // ===== Mutations =====

    /// Lays the plot out inside `available` (panel-local pixels). A bounds
    /// override from a shift-drag wins over the automatic layout.
    pub fn layout(&mut self, available: ScreenRect) {
        let bounds = self.bounds_override.unwrap_or(available);
        if bounds == self.bounds {
            return;
        }
        self.bounds = bounds;
        self.x_axis
            .borrow_mut()
            .set_pixel_bounds(f64::from(bounds.left()), f64::from(bounds.right()));
        self.y_axis
            .borrow_mut()
            .set_pixel_bounds(f64::from(bounds.top()), f64::from(bounds.bottom()));
        self.adapter.set_bounds(bounds);
    }

    /// Drops a shift-drag override so the plot fills its panel again.
    pub fn reset_layout(&mut self) {
        self.bounds_override = None;
    }

    /// Consumes adapter requests. Returns true when something needs a repaint.
    pub fn process_adapter_output(&mut self) -> bool {
        let mut changed = !self.adapter.take_dirty().is_empty();
        for event in self.adapter.take_events() {
            changed = true;
            match event {
                AdapterEvent::ShowPopup { at, labels } => {
                    self.popup = Some(PopupRequest { at, labels });
                }
                AdapterEvent::BoundsChanged { old, new } => {
                    debug!(?old, ?new, "plot bounds changed");
                    self.bounds_override = Some(new);
                    self.layout(new);
                }
            }
        }
        changed
    }

    pub fn close_popup(&mut self) {
        self.popup = None;
    }

    pub fn set_primary(&mut self, label: &str) -> Result<()> {
        self.adapter
            .set_primary(label)
            .with_context(|| format!("cannot bind primary button to {label:?}"))
    }

    pub fn set_secondary(&mut self, label: &str) -> Result<()> {
        self.adapter
            .set_secondary(label)
            .with_context(|| format!("cannot bind secondary button to {label:?}"))
    }

    /// Returns both axes to the full extent of the series.
    pub fn reset_ranges(&mut self) {
        let (x, y) = (self.initial_x, self.initial_y);
        self.x_axis.borrow_mut().set_datum_range(x);
        self.y_axis.borrow_mut().set_datum_range(y);
    }

    pub fn notice(&self, text: impl Into<String>) {
        push_notice(&self.notices, text.into());
    }
}

fn x_extent(series: &SampledSeries) -> Result<DatumRange> {
    let (first, last) = match (series.xs().first(), series.xs().last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => anyhow::bail!("sample series is empty"),
    };
    DatumRange::try_new(first, last, Units::Seconds).context("sample series spans no time")
}

/// Y extent padded by a third of a decade on each side, so it stays positive.
fn y_extent(series: &SampledSeries) -> Result<DatumRange> {
    let lo = series.ys().iter().copied().fold(f64::INFINITY, f64::min);
    let hi = series.ys().iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let pad = 10f64.powf(1.0 / 3.0);
    DatumRange::numeric(lo / pad, hi * pad).context("sample series has no usable Y values")
}

fn build_adapter(
    x_axis: &AxisHandle,
    y_axis: &AxisHandle,
    series: &Rc<SampledSeries>,
    config: &GestureConfig,
    notices: &Notices,
) -> Result<MouseInputAdapter> {
    let handler = NoticeErrorHandler {
        notices: Rc::clone(notices),
    };
    let mut adapter = MouseInputAdapter::new(ScreenRect::default(), config.clone())
        .with_error_handler(Box::new(handler));

    adapter.add_module(Box::new(BoxZoomMouseModule::new(x_axis.clone(), y_axis.clone())?));
    adapter.add_module(Box::new(ZoomPanMouseModule::new(
        Some(x_axis.clone()),
        Some(y_axis.clone()),
        config,
    )));
    adapter.add_module(Box::new(AxisRangeMouseModule::horizontal(x_axis.clone())?));
    adapter.add_module(Box::new(AxisRangeMouseModule::vertical(y_axis.clone())?));

    let readout: Rc<dyn SeriesReadout> = series.clone();
    adapter.add_module(Box::new(
        CrosshairMouseModule::new(x_axis.clone(), y_axis.clone()).with_readout(readout),
    ));

    let mut selector = BoxSelectorMouseModule::new(x_axis.clone(), y_axis.clone());
    selector.set_tweakable(true);
    let sink = Rc::clone(notices);
    selector.add_box_listener(move |selection| {
        push_notice(
            &sink,
            format!("Selected X {} | Y {}", selection.x_range, selection.y_range),
        );
    });
    adapter.add_module(Box::new(selector));

    adapter.add_module(Box::new(LengthMouseModule::new(x_axis.clone(), y_axis.clone())));

    let mut waypoints =
        WaypointsMouseModule::new(x_axis.clone(), y_axis.clone(), config.pathway_width_px);
    let sink = Rc::clone(notices);
    waypoints.add_path_listener(move |_, points| {
        push_notice(&sink, format!("Path committed with {} waypoints", points.len()));
    });
    adapter.add_module(Box::new(waypoints));

    Ok(adapter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdas::{DragState, PointerEvent};

    fn plot() -> PlotState {
        let mut state = PlotState::new(&GestureConfig::default(), DEFAULT_PRIMARY, DEFAULT_SECONDARY)
            .expect("plot state");
        state.layout(ScreenRect::new(0, 0, 400, 300));
        state
    }

    #[test]
    fn test_modules_registered_and_bound() {
        let state = plot();
        let labels = state.adapter().labels();
        assert_eq!(labels.len(), 8);
        assert!(labels.iter().any(|l| l == "Waypoints"));
        assert_eq!(state.adapter().primary_label(), Some(DEFAULT_PRIMARY));
        assert_eq!(state.adapter().secondary_label(), Some(DEFAULT_SECONDARY));
    }

    #[test]
    fn test_unknown_labels_fall_back() {
        let state = PlotState::new(&GestureConfig::default(), "Nope", "Also Nope").unwrap();
        assert_eq!(state.adapter().primary_label(), Some(DEFAULT_PRIMARY));
        assert_eq!(state.adapter().secondary_label(), Some(DEFAULT_SECONDARY));
    }

    #[test]
    fn test_layout_sets_axis_pixels() {
        let state = plot();
        assert_eq!(state.x_axis().borrow().pixel_bounds(), (0.0, 400.0));
        assert_eq!(state.y_axis().borrow().pixel_bounds(), (0.0, 300.0));
    }

    #[test]
    fn test_box_zoom_then_reset() {
        let mut state = plot();
        let before = state.x_axis().borrow().datum_range();
        let adapter = state.adapter_mut();
        adapter.mouse_pressed(PointerEvent::primary(100, 50));
        adapter.mouse_dragged(PointerEvent::primary(200, 200));
        adapter.mouse_released(PointerEvent::primary(200, 200));
        assert_eq!(adapter.state(), DragState::Idle);
        assert!(state.process_adapter_output());
        let zoomed = state.x_axis().borrow().datum_range();
        assert!(zoomed.width() < before.width());
        assert_eq!(state.x_axis().borrow().history().back_len(), 1);

        state.reset_ranges();
        assert_eq!(state.x_axis().borrow().datum_range(), before);
    }

    #[test]
    fn test_right_click_requests_popup() {
        let mut state = plot();
        let press = PointerEvent::new(
            ScreenPoint::new(50, 60),
            rdas::MouseButton::Secondary,
            rdas::Modifiers::NONE,
        );
        state.adapter_mut().mouse_pressed(press);
        state.adapter_mut().mouse_released(press);
        state.process_adapter_output();
        let popup = state.popup().expect("popup");
        assert_eq!(popup.at, ScreenPoint::new(50, 60));
        assert_eq!(popup.labels.len(), 8);
        state.close_popup();
        assert!(state.popup().is_none());
    }
}
