//! Per-component mouse input adapter.
//!
//! The adapter owns the registered mouse modules and promotes raw pointer
//! events into drag lifecycles:
//!
//! - Press arms the module bound to the button (primary for left/right,
//!   secondary for middle); right button or ctrl-left asks for the module
//!   popup instead.
//! - Motion past the drag threshold starts the module drag; point-selecting
//!   renderers start immediately.
//! - Release delivers the final selection once, then returns to idle unless
//!   the drag was pinned with `p`.
//! - Escape cancels from any state and clears the overlay.
//! - Shift-press on a corner or edge midpoint resizes the component, on its
//!   center moves it; the change is only previewed until release.
//!
//! Errors returned by module callbacks are routed to an [`ErrorHandler`] and
//! never interrupt dispatch.

use std::time::Instant;

use anyhow::Result;
use tracing::{debug, warn};

use crate::config::GestureConfig;
use crate::error::ConfigError;
use crate::geometry::{ScreenPoint, ScreenRect};
use crate::module::{Key, MouseButton, MouseModule, PointerEvent, WheelEvent};
use crate::overlay::{DragCanvas, OverlayRole, OverlayShape};
use crate::selection::DragSelectionEvent;

/// Smallest width or height a resize may produce.
const MIN_COMPONENT_PX: i32 = 8;

/// Drag lifecycle of the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    /// Button down, module chosen, threshold not yet exceeded.
    Armed,
    /// The active module receives drag updates.
    ModuleDrag,
    /// The module stays active past release until Escape or the next press.
    Pinned,
    Resize,
    Move,
}

/// Component edge or corner grabbed by a shift-resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeHandle {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl ResizeHandle {
    fn moves_left(&self) -> bool {
        matches!(self, ResizeHandle::West | ResizeHandle::NorthWest | ResizeHandle::SouthWest)
    }

    fn moves_right(&self) -> bool {
        matches!(self, ResizeHandle::East | ResizeHandle::NorthEast | ResizeHandle::SouthEast)
    }

    fn moves_top(&self) -> bool {
        matches!(self, ResizeHandle::North | ResizeHandle::NorthEast | ResizeHandle::NorthWest)
    }

    fn moves_bottom(&self) -> bool {
        matches!(self, ResizeHandle::South | ResizeHandle::SouthEast | ResizeHandle::SouthWest)
    }
}

/// Requests the adapter makes of its host.
#[derive(Debug, Clone, PartialEq)]
pub enum AdapterEvent {
    /// Show the module chooser at `at`.
    ShowPopup { at: ScreenPoint, labels: Vec<String> },
    /// The component was moved or resized.
    BoundsChanged { old: ScreenRect, new: ScreenRect },
}

/// Receives errors returned by module callbacks.
pub trait ErrorHandler {
    fn handle(&mut self, module: &str, error: &anyhow::Error);
}

/// Default handler: logs and carries on.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogErrorHandler;

impl ErrorHandler for LogErrorHandler {
    fn handle(&mut self, module: &str, error: &anyhow::Error) {
        warn!(module, error = %format!("{error:#}"), "mouse module callback failed");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GeometryMode {
    Resize(ResizeHandle),
    Move,
}

#[derive(Debug, Clone, Copy)]
struct GeometryDrag {
    mode: GeometryMode,
    start: ScreenPoint,
    original: ScreenRect,
    preview: ScreenRect,
}

/// Mouse input adapter for one plot component.
pub struct MouseInputAdapter {
    config: GestureConfig,
    canvas: DragCanvas,
    modules: Vec<Box<dyn MouseModule>>,
    primary: Option<usize>,
    secondary: Option<usize>,
    active: Option<usize>,
    state: DragState,
    pin_requested: bool,
    popup_enabled: bool,
    press: ScreenPoint,
    origin: ScreenPoint,
    current: ScreenPoint,
    modified: bool,
    geometry: Option<GeometryDrag>,
    dirty: Vec<ScreenRect>,
    events: Vec<AdapterEvent>,
    error_handler: Box<dyn ErrorHandler>,
}

impl MouseInputAdapter {
    pub fn new(bounds: ScreenRect, config: GestureConfig) -> Self {
        Self {
            config,
            canvas: DragCanvas::new(bounds),
            modules: Vec::new(),
            primary: None,
            secondary: None,
            active: None,
            state: DragState::Idle,
            pin_requested: false,
            popup_enabled: true,
            press: ScreenPoint::default(),
            origin: ScreenPoint::default(),
            current: ScreenPoint::default(),
            modified: false,
            geometry: None,
            dirty: Vec::new(),
            events: Vec::new(),
            error_handler: Box::new(LogErrorHandler),
        }
    }

    pub fn with_error_handler(mut self, handler: Box<dyn ErrorHandler>) -> Self {
        self.error_handler = handler;
        self
    }

    /// When disabled, the right button drives the primary module instead of
    /// requesting the popup.
    pub fn set_popup_enabled(&mut self, enabled: bool) {
        self.popup_enabled = enabled;
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }

    // ===== Registry =====

    /// Registers a module. A module with the same label is replaced in place,
    /// keeping its primary/secondary binding. The first module becomes primary.
    pub fn add_module(&mut self, module: Box<dyn MouseModule>) {
        let label = module.label().to_string();
        match self.index_of(&label) {
            Some(idx) => {
                if self.active == Some(idx) {
                    self.abandon();
                }
                self.modules[idx] = module;
                debug!(label, "mouse module replaced");
            }
            None => {
                self.modules.push(module);
                if self.primary.is_none() {
                    self.primary = Some(self.modules.len() - 1);
                }
                debug!(label, "mouse module added");
            }
        }
    }

    fn index_of(&self, label: &str) -> Option<usize> {
        self.modules.iter().position(|m| m.label() == label)
    }

    pub fn set_primary(&mut self, label: &str) -> Result<(), ConfigError> {
        let idx = self
            .index_of(label)
            .ok_or_else(|| ConfigError::UnknownModule(label.to_string()))?;
        self.primary = Some(idx);
        Ok(())
    }

    pub fn set_secondary(&mut self, label: &str) -> Result<(), ConfigError> {
        let idx = self
            .index_of(label)
            .ok_or_else(|| ConfigError::UnknownModule(label.to_string()))?;
        self.secondary = Some(idx);
        Ok(())
    }

    pub fn primary_label(&self) -> Option<&str> {
        self.primary.map(|i| self.modules[i].label())
    }

    pub fn secondary_label(&self) -> Option<&str> {
        self.secondary.map(|i| self.modules[i].label())
    }

    pub fn labels(&self) -> Vec<String> {
        self.modules.iter().map(|m| m.label().to_string()).collect()
    }

    pub fn module_mut(&mut self, label: &str) -> Option<&mut (dyn MouseModule + 'static)> {
        let idx = self.index_of(label)?;
        Some(self.modules[idx].as_mut())
    }

    // ===== Queries =====

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn active_label(&self) -> Option<&str> {
        self.active.map(|i| self.modules[i].label())
    }

    pub fn canvas(&self) -> &DragCanvas {
        &self.canvas
    }

    /// Updates the component bounds after a layout change.
    pub fn set_bounds(&mut self, bounds: ScreenRect) {
        self.canvas.set_bounds(bounds);
    }

    /// Feedback text of the active module, or of the primary one when idle.
    pub fn feedback(&self) -> Option<String> {
        self.active
            .or(self.primary)
            .and_then(|i| self.modules[i].feedback())
    }

    /// Regions repainted since the last call.
    pub fn take_dirty(&mut self) -> Vec<ScreenRect> {
        std::mem::take(&mut self.dirty)
    }

    /// Host requests raised since the last call.
    pub fn take_events(&mut self) -> Vec<AdapterEvent> {
        std::mem::take(&mut self.events)
    }

    // ===== Dispatch Helpers =====

    fn dispatch(&mut self, idx: usize, call: impl FnOnce(&mut dyn MouseModule) -> Result<()>) {
        let module = &mut self.modules[idx];
        if let Err(error) = call(module.as_mut()) {
            module.clear_feedback();
            self.error_handler.handle(module.label(), &error);
        }
    }

    fn deliver(&mut self, idx: usize, event: DragSelectionEvent) {
        self.dispatch(idx, |m| m.on_selection(&event));
    }

    fn current_selection(&self, idx: usize) -> Option<DragSelectionEvent> {
        self.modules[idx]
            .renderer()
            .selection_event(&self.canvas, self.origin, self.current, self.modified)
    }

    fn mark_dirty(&mut self, rects: Vec<ScreenRect>) {
        self.dirty.extend(rects.into_iter().filter(|r| !r.is_empty()));
    }

    fn render(&mut self, idx: usize) {
        let rects = self.modules[idx]
            .renderer_mut()
            .render_drag(&mut self.canvas, self.origin, self.current);
        self.mark_dirty(rects);
    }

    fn clear_overlay(&mut self, idx: usize) {
        let rects = self.modules[idx].renderer_mut().clear(&mut self.canvas);
        self.mark_dirty(rects);
    }

    /// Cancels the active module, if any, before returning to idle so that
    /// locks taken at press are released.
    fn abandon(&mut self) {
        if let Some(idx) = self.active {
            self.modules[idx].cancel();
            self.clear_overlay(idx);
        }
        self.reset();
    }

    fn reset(&mut self) {
        self.state = DragState::Idle;
        self.active = None;
        self.pin_requested = false;
        self.geometry = None;
    }

    // ===== Pointer Events =====

    pub fn mouse_pressed(&mut self, event: PointerEvent) {
        self.modified = event.modifiers.shift;
        if self.state == DragState::Pinned {
            if let Some(idx) = self.active {
                self.pin_requested = false;
                self.begin_module_drag(idx, event);
                return;
            }
        }
        if self.state != DragState::Idle {
            self.abandon();
        }

        if event.modifiers.shift {
            if let Some(mode) = self.geometry_mode(event.pos) {
                let bounds = self.canvas.bounds();
                self.geometry = Some(GeometryDrag {
                    mode,
                    start: event.pos,
                    original: bounds,
                    preview: bounds,
                });
                self.state = match mode {
                    GeometryMode::Resize(_) => DragState::Resize,
                    GeometryMode::Move => DragState::Move,
                };
                debug!(?mode, "component geometry drag started");
                return;
            }
        }

        let wants_popup = (event.button == MouseButton::Secondary && self.popup_enabled)
            || (event.button == MouseButton::Primary && event.modifiers.ctrl);
        if wants_popup {
            self.events.push(AdapterEvent::ShowPopup {
                at: event.pos,
                labels: self.labels(),
            });
            return;
        }

        let slot = match event.button {
            MouseButton::Primary | MouseButton::Secondary => self.primary,
            MouseButton::Middle => self.secondary,
        };
        if let Some(idx) = slot {
            self.begin_module_drag(idx, event);
        }
    }

    fn begin_module_drag(&mut self, idx: usize, event: PointerEvent) {
        self.active = Some(idx);
        self.press = event.pos;
        self.current = event.pos;
        self.origin = self.modules[idx].anchor(event.pos);
        self.dispatch(idx, |m| m.mouse_pressed(&event));

        let point_selection = self.modules[idx].renderer().is_point_selection();
        if point_selection || self.origin != event.pos {
            self.state = DragState::ModuleDrag;
            self.render(idx);
            if point_selection {
                if let Some(selection) = self.current_selection(idx) {
                    self.deliver(idx, selection);
                }
            }
        } else {
            self.state = DragState::Armed;
        }
    }

    pub fn mouse_dragged(&mut self, event: PointerEvent) {
        match self.state {
            DragState::Resize | DragState::Move => self.preview_geometry(event.pos),
            DragState::Armed => {
                if event.pos.distance(self.press) >= f64::from(self.config.drag_threshold_px) {
                    self.state = DragState::ModuleDrag;
                    self.module_drag(event);
                }
            }
            DragState::ModuleDrag => self.module_drag(event),
            DragState::Idle | DragState::Pinned => {}
        }
    }

    fn module_drag(&mut self, event: PointerEvent) {
        let Some(idx) = self.active else {
            return;
        };
        self.current = event.pos;
        self.render(idx);
        self.dispatch(idx, |m| m.mouse_dragged(&event));

        let module = &self.modules[idx];
        let renderer = module.renderer();
        let wants = renderer.is_point_selection() || renderer.is_updating_drag_selection() || module.trigger().on_drag;
        if wants {
            if let Some(selection) = self.current_selection(idx) {
                self.deliver(idx, selection);
            }
        }
    }

    pub fn mouse_released(&mut self, event: PointerEvent) {
        match self.state {
            DragState::Resize | DragState::Move => self.commit_geometry(event.pos),
            DragState::Armed | DragState::ModuleDrag => {
                let Some(idx) = self.active else {
                    self.reset();
                    return;
                };
                self.current = event.pos;
                self.dispatch(idx, |m| m.mouse_released(&event));
                if self.modules[idx].trigger().on_release {
                    if let Some(selection) = self.current_selection(idx) {
                        self.deliver(idx, selection);
                    }
                }
                if self.pin_requested {
                    self.pin_requested = false;
                    self.state = DragState::Pinned;
                    debug!(module = self.modules[idx].label(), "module pinned");
                } else {
                    self.clear_overlay(idx);
                    self.reset();
                }
            }
            DragState::Idle | DragState::Pinned => {}
        }
    }

    // ===== Keys, Wheel, Timers =====

    pub fn key_pressed(&mut self, key: Key) {
        match key {
            Key::Escape => self.cancel(),
            Key::Char('p') | Key::Char('P')
                if matches!(self.state, DragState::Armed | DragState::ModuleDrag) =>
            {
                self.pin_requested = true;
            }
            _ => {
                let dragging = matches!(
                    self.state,
                    DragState::Armed | DragState::ModuleDrag | DragState::Pinned
                );
                let target = if dragging { self.active } else { self.primary };
                let Some(idx) = target else {
                    return;
                };
                if dragging && self.modules[idx].trigger().on_key {
                    if let Some(selection) = self.current_selection(idx) {
                        self.deliver(idx, selection);
                    }
                }
                self.dispatch(idx, |m| m.key_pressed(key));
                if self.state == DragState::Idle {
                    self.clear_overlay(idx);
                }
            }
        }
    }

    /// Abandons whatever is in progress and clears the overlay.
    pub fn cancel(&mut self) {
        if let Some(idx) = self.active.or(self.primary) {
            self.modules[idx].cancel();
            self.clear_overlay(idx);
        }
        let rest = self.canvas.clear();
        self.mark_dirty(vec![rest]);
        if self.state != DragState::Idle {
            debug!(from = ?self.state, "drag cancelled");
        }
        self.reset();
    }

    /// Routes wheel input to the primary module if it handles the wheel, else
    /// the secondary, else the first module that does.
    pub fn wheel(&mut self, event: WheelEvent) {
        let handles = |i: &Option<usize>| i.filter(|&i| self.modules[i].handles_wheel());
        let target = handles(&self.primary)
            .or_else(|| handles(&self.secondary))
            .or_else(|| self.modules.iter().position(|m| m.handles_wheel()));
        if let Some(idx) = target {
            self.dispatch(idx, |m| m.wheel(&event));
        }
    }

    /// Gives every module a chance to flush deferred work.
    pub fn poll(&mut self, now: Instant) {
        for idx in 0..self.modules.len() {
            self.dispatch(idx, |m| m.poll(now));
        }
    }

    // ===== Component Geometry =====

    fn geometry_mode(&self, p: ScreenPoint) -> Option<GeometryMode> {
        let b = self.canvas.bounds();
        if !b.contains(p) {
            return None;
        }
        let size = b.width.min(b.height);
        let scaled = |threshold: i32| {
            if size < 3 * threshold {
                (size / 3).max(1)
            } else {
                threshold
            }
        };
        let edge = scaled(self.config.edge_threshold_px);
        let mid = scaled(self.config.midpoint_threshold_px);

        let left = p.x - b.left() < edge;
        let right = b.right() - 1 - p.x < edge;
        let top = p.y - b.top() < edge;
        let bottom = b.bottom() - 1 - p.y < edge;
        let c = b.center();
        let mid_x = (p.x - c.x).abs() <= mid;
        let mid_y = (p.y - c.y).abs() <= mid;

        let handle = match (top, bottom, left, right) {
            (true, _, true, _) => Some(ResizeHandle::NorthWest),
            (true, _, _, true) => Some(ResizeHandle::NorthEast),
            (_, true, true, _) => Some(ResizeHandle::SouthWest),
            (_, true, _, true) => Some(ResizeHandle::SouthEast),
            (true, _, _, _) if mid_x => Some(ResizeHandle::North),
            (_, true, _, _) if mid_x => Some(ResizeHandle::South),
            (_, _, true, _) if mid_y => Some(ResizeHandle::West),
            (_, _, _, true) if mid_y => Some(ResizeHandle::East),
            _ => None,
        };
        match handle {
            Some(h) => Some(GeometryMode::Resize(h)),
            None if mid_x && mid_y => Some(GeometryMode::Move),
            None => None,
        }
    }

    fn geometry_target(drag: &GeometryDrag, pos: ScreenPoint) -> ScreenRect {
        let dx = pos.x - drag.start.x;
        let dy = pos.y - drag.start.y;
        let r = drag.original;
        match drag.mode {
            GeometryMode::Move => ScreenRect::new(r.x + dx, r.y + dy, r.width, r.height),
            GeometryMode::Resize(h) => {
                let mut left = r.left();
                let mut right = r.right();
                let mut top = r.top();
                let mut bottom = r.bottom();
                if h.moves_left() {
                    left = (left + dx).min(right - MIN_COMPONENT_PX);
                }
                if h.moves_right() {
                    right = (right + dx).max(left + MIN_COMPONENT_PX);
                }
                if h.moves_top() {
                    top = (top + dy).min(bottom - MIN_COMPONENT_PX);
                }
                if h.moves_bottom() {
                    bottom = (bottom + dy).max(top + MIN_COMPONENT_PX);
                }
                ScreenRect::new(left, top, right - left, bottom - top)
            }
        }
    }

    fn preview_geometry(&mut self, pos: ScreenPoint) {
        let Some(drag) = self.geometry.as_mut() else {
            return;
        };
        drag.preview = Self::geometry_target(drag, pos);
        let preview = drag.preview;
        let mut rects = vec![self.canvas.clear()];
        rects.push(self.canvas.draw(OverlayShape::Rect {
            rect: preview,
            filled: false,
            role: OverlayRole::Accent,
        }));
        self.mark_dirty(rects);
    }

    fn commit_geometry(&mut self, pos: ScreenPoint) {
        let Some(drag) = self.geometry.take() else {
            self.reset();
            return;
        };
        let new = Self::geometry_target(&drag, pos);
        let cleared = self.canvas.clear();
        self.mark_dirty(vec![cleared, drag.original, new]);
        if new != drag.original {
            self.canvas.set_bounds(new);
            self.events.push(AdapterEvent::BoundsChanged {
                old: drag.original,
                new,
            });
        }
        self.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use anyhow::bail;

    use crate::axis::Orientation;
    use crate::module::Modifiers;
    use crate::renderer::{BoxRenderer, CrosshairRenderer, DragRenderer, RangeRenderer};
    use crate::selection::DragSelection;

    type Log = Rc<RefCell<Vec<DragSelectionEvent>>>;

    struct Recorder {
        label: &'static str,
        renderer: Box<dyn DragRenderer>,
        log: Log,
        fail: bool,
        wheel: bool,
        wheel_count: Rc<RefCell<u32>>,
        feedback: Option<String>,
    }

    impl Recorder {
        fn new(label: &'static str, renderer: Box<dyn DragRenderer>) -> (Self, Log) {
            let log: Log = Rc::default();
            let m = Self {
                label,
                renderer,
                log: Rc::clone(&log),
                fail: false,
                wheel: false,
                wheel_count: Rc::default(),
                feedback: Some("ready".into()),
            };
            (m, log)
        }
    }

    impl MouseModule for Recorder {
        fn label(&self) -> &str {
            self.label
        }
        fn renderer(&self) -> &dyn DragRenderer {
            self.renderer.as_ref()
        }
        fn renderer_mut(&mut self) -> &mut dyn DragRenderer {
            self.renderer.as_mut()
        }
        fn on_selection(&mut self, event: &DragSelectionEvent) -> Result<()> {
            self.log.borrow_mut().push(event.clone());
            if self.fail {
                bail!("boom");
            }
            Ok(())
        }
        fn handles_wheel(&self) -> bool {
            self.wheel
        }
        fn wheel(&mut self, _event: &WheelEvent) -> Result<()> {
            *self.wheel_count.borrow_mut() += 1;
            Ok(())
        }
        fn feedback(&self) -> Option<String> {
            self.feedback.clone()
        }
        fn clear_feedback(&mut self) {
            self.feedback = None;
        }
    }

    fn adapter() -> MouseInputAdapter {
        MouseInputAdapter::new(ScreenRect::new(0, 0, 400, 300), GestureConfig::default())
    }

    fn press(x: i32, y: i32, button: MouseButton, modifiers: Modifiers) -> PointerEvent {
        PointerEvent::new(ScreenPoint::new(x, y), button, modifiers)
    }

    #[test]
    fn test_drag_delivers_one_selection_at_release() {
        let mut a = adapter();
        let (m, log) = Recorder::new("range", Box::new(RangeRenderer::horizontal()));
        a.add_module(Box::new(m));
        a.mouse_pressed(PointerEvent::primary(20, 100));
        assert_eq!(a.state(), DragState::Armed);
        a.mouse_dragged(PointerEvent::primary(50, 100));
        assert_eq!(a.state(), DragState::ModuleDrag);
        a.mouse_dragged(PointerEvent::primary(80, 100));
        assert!(log.borrow().is_empty());
        a.mouse_released(PointerEvent::primary(80, 100));
        assert_eq!(a.state(), DragState::Idle);
        assert_eq!(
            *log.borrow(),
            vec![DragSelectionEvent::new(DragSelection::range(Orientation::Horizontal, 20, 80), false)]
        );
        assert!(a.canvas().is_empty());
        assert!(!a.take_dirty().is_empty());
        assert!(a.take_dirty().is_empty());
    }

    #[test]
    fn test_click_is_delivered() {
        let mut a = adapter();
        let (m, log) = Recorder::new("box", Box::new(BoxRenderer::new()));
        a.add_module(Box::new(m));
        a.mouse_pressed(PointerEvent::primary(30, 30));
        a.mouse_released(PointerEvent::primary(31, 30));
        assert_eq!(log.borrow().len(), 1);
        assert_eq!(a.state(), DragState::Idle);
    }

    #[test]
    fn test_point_renderer_gets_immediate_selection() {
        let mut a = adapter();
        let (m, log) = Recorder::new("cross", Box::new(CrosshairRenderer::new(None, None)));
        a.add_module(Box::new(m));
        a.mouse_pressed(PointerEvent::primary(30, 40));
        assert_eq!(a.state(), DragState::ModuleDrag);
        assert_eq!(log.borrow()[0].selection, DragSelection::Point(ScreenPoint::new(30, 40)));
        a.mouse_dragged(PointerEvent::primary(31, 40));
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn test_popup_requests() {
        let mut a = adapter();
        let (m, log) = Recorder::new("box", Box::new(BoxRenderer::new()));
        a.add_module(Box::new(m));
        a.mouse_pressed(press(10, 10, MouseButton::Secondary, Modifiers::NONE));
        a.mouse_pressed(press(10, 10, MouseButton::Primary, Modifiers::ctrl()));
        let events = a.take_events();
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], AdapterEvent::ShowPopup { labels, .. } if labels == &vec!["box".to_string()]));
        assert_eq!(a.state(), DragState::Idle);

        a.set_popup_enabled(false);
        a.mouse_pressed(press(10, 10, MouseButton::Secondary, Modifiers::NONE));
        assert_eq!(a.state(), DragState::Armed);
        a.mouse_released(press(10, 10, MouseButton::Secondary, Modifiers::NONE));
        assert_eq!(log.borrow().len(), 1);
        assert!(a.take_events().is_empty());
    }

    #[test]
    fn test_pin_keeps_module_until_escape() {
        let mut a = adapter();
        let (m, log) = Recorder::new("box", Box::new(BoxRenderer::new()));
        a.add_module(Box::new(m));
        a.mouse_pressed(PointerEvent::primary(10, 10));
        a.mouse_dragged(PointerEvent::primary(60, 60));
        a.key_pressed(Key::Char('p'));
        a.mouse_released(PointerEvent::primary(60, 60));
        assert_eq!(a.state(), DragState::Pinned);
        assert_eq!(a.active_label(), Some("box"));
        assert!(!a.canvas().is_empty());

        // a right press reuses the pinned module rather than asking for the popup
        a.mouse_pressed(press(20, 20, MouseButton::Secondary, Modifiers::NONE));
        assert!(a.take_events().is_empty());
        assert_eq!(a.state(), DragState::Armed);
        a.key_pressed(Key::Char('p'));
        a.mouse_released(press(20, 20, MouseButton::Secondary, Modifiers::NONE));
        assert_eq!(a.state(), DragState::Pinned);
        assert_eq!(log.borrow().len(), 2);

        a.key_pressed(Key::Escape);
        assert_eq!(a.state(), DragState::Idle);
        assert!(a.canvas().is_empty());
    }

    #[test]
    fn test_escape_mid_drag_delivers_nothing() {
        let mut a = adapter();
        let (m, log) = Recorder::new("box", Box::new(BoxRenderer::new()));
        a.add_module(Box::new(m));
        a.mouse_pressed(PointerEvent::primary(10, 10));
        a.mouse_dragged(PointerEvent::primary(60, 60));
        a.key_pressed(Key::Escape);
        a.mouse_released(PointerEvent::primary(60, 60));
        assert!(log.borrow().is_empty());
        assert!(a.canvas().is_empty());
        assert_eq!(a.state(), DragState::Idle);
    }

    #[test]
    fn test_duplicate_label_replaces_in_place() {
        let mut a = adapter();
        let (first, first_log) = Recorder::new("a", Box::new(BoxRenderer::new()));
        let (second, _) = Recorder::new("b", Box::new(BoxRenderer::new()));
        let (replacement, new_log) = Recorder::new("b", Box::new(BoxRenderer::new()));
        a.add_module(Box::new(first));
        a.add_module(Box::new(second));
        a.set_secondary("b").unwrap();
        a.add_module(Box::new(replacement));
        assert_eq!(a.labels(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(a.primary_label(), Some("a"));
        assert_eq!(a.secondary_label(), Some("b"));
        a.mouse_pressed(press(10, 10, MouseButton::Middle, Modifiers::NONE));
        a.mouse_released(press(10, 10, MouseButton::Middle, Modifiers::NONE));
        assert_eq!(new_log.borrow().len(), 1);
        assert!(first_log.borrow().is_empty());
        assert_eq!(a.set_primary("zzz"), Err(ConfigError::UnknownModule("zzz".into())));
    }

    struct Collect(Rc<RefCell<Vec<String>>>);

    impl ErrorHandler for Collect {
        fn handle(&mut self, module: &str, error: &anyhow::Error) {
            self.0.borrow_mut().push(format!("{module}: {error}"));
        }
    }

    #[test]
    fn test_module_errors_are_routed_and_clear_feedback() {
        let errors = Rc::new(RefCell::new(Vec::new()));
        let mut a = adapter().with_error_handler(Box::new(Collect(Rc::clone(&errors))));
        let (mut m, log) = Recorder::new("bad", Box::new(BoxRenderer::new()));
        m.fail = true;
        a.add_module(Box::new(m));
        assert_eq!(a.feedback().as_deref(), Some("ready"));
        for _ in 0..2 {
            a.mouse_pressed(PointerEvent::primary(10, 10));
            a.mouse_released(PointerEvent::primary(10, 10));
        }
        assert_eq!(log.borrow().len(), 2);
        assert_eq!(*errors.borrow(), vec!["bad: boom".to_string(), "bad: boom".to_string()]);
        assert_eq!(a.feedback(), None);
        assert_eq!(a.state(), DragState::Idle);
    }

    #[test]
    fn test_shift_corner_resizes_component() {
        let mut a = adapter();
        let (m, log) = Recorder::new("box", Box::new(BoxRenderer::new()));
        a.add_module(Box::new(m));
        a.mouse_pressed(press(398, 298, MouseButton::Primary, Modifiers::shift()));
        assert_eq!(a.state(), DragState::Resize);
        a.mouse_dragged(press(350, 250, MouseButton::Primary, Modifiers::shift()));
        assert_eq!(a.canvas().bounds(), ScreenRect::new(0, 0, 400, 300));
        a.mouse_released(press(350, 250, MouseButton::Primary, Modifiers::shift()));
        assert_eq!(
            a.take_events(),
            vec![AdapterEvent::BoundsChanged {
                old: ScreenRect::new(0, 0, 400, 300),
                new: ScreenRect::new(0, 0, 352, 252)
            }]
        );
        assert_eq!(a.canvas().bounds(), ScreenRect::new(0, 0, 352, 252));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_shift_center_moves_and_shift_elsewhere_is_modified_drag() {
        let mut a = adapter();
        let (m, log) = Recorder::new("box", Box::new(BoxRenderer::new()));
        a.add_module(Box::new(m));
        a.mouse_pressed(press(200, 150, MouseButton::Primary, Modifiers::shift()));
        assert_eq!(a.state(), DragState::Move);
        a.mouse_released(press(210, 160, MouseButton::Primary, Modifiers::shift()));
        assert_eq!(a.canvas().bounds(), ScreenRect::new(10, 10, 400, 300));

        a.mouse_pressed(press(100, 100, MouseButton::Primary, Modifiers::shift()));
        a.mouse_dragged(press(150, 150, MouseButton::Primary, Modifiers::shift()));
        a.mouse_released(press(150, 150, MouseButton::Primary, Modifiers::shift()));
        assert!(log.borrow()[0].modified);
    }

    #[test]
    fn test_wheel_goes_to_wheel_handler() {
        let mut a = adapter();
        let (plain, _) = Recorder::new("plain", Box::new(BoxRenderer::new()));
        let (mut wheel, _) = Recorder::new("wheel", Box::new(BoxRenderer::new()));
        wheel.wheel = true;
        let count = Rc::clone(&wheel.wheel_count);
        a.add_module(Box::new(plain));
        a.add_module(Box::new(wheel));
        a.wheel(WheelEvent {
            pos: ScreenPoint::new(5, 5),
            clicks: 1,
            modifiers: Modifiers::NONE,
            at: Instant::now(),
        });
        assert_eq!(*count.borrow(), 1);
    }

    fn panned_axis() -> (MouseInputAdapter, crate::axis::AxisHandle) {
        use crate::axis::DasAxis;
        use crate::datum_range::DatumRange;
        use crate::module::ZoomPanMouseModule;

        let axis = DasAxis::new(DatumRange::numeric(0.0, 100.0).unwrap(), Orientation::Horizontal, 0.0, 400.0)
            .into_handle();
        let mut a = adapter();
        a.add_module(Box::new(ZoomPanMouseModule::new(Some(axis.clone()), None, &GestureConfig::default())));
        a.mouse_pressed(PointerEvent::primary(50, 50));
        a.mouse_dragged(PointerEvent::primary(80, 50));
        assert_eq!(a.state(), DragState::ModuleDrag);
        assert!(axis.borrow().is_locked());
        (a, axis)
    }

    #[test]
    fn test_press_during_pan_releases_axis_lock() {
        use crate::axis::AxisView;
        use crate::datum_range::DatumRange;

        let (mut a, axis) = panned_axis();
        a.mouse_pressed(PointerEvent::primary(60, 50));
        a.mouse_released(PointerEvent::primary(60, 50));
        assert_eq!(a.state(), DragState::Idle);
        assert!(!axis.borrow().is_locked());
        // the interrupted pan was rolled back
        assert_eq!(axis.borrow().datum_range(), DatumRange::numeric(0.0, 100.0).unwrap());
        assert!(axis.borrow_mut().set_datum_range(DatumRange::numeric(10.0, 20.0).unwrap()));
    }

    #[test]
    fn test_replacing_active_module_releases_axis_lock() {
        use crate::module::ZoomPanMouseModule;

        let (mut a, axis) = panned_axis();
        a.add_module(Box::new(ZoomPanMouseModule::new(None, None, &GestureConfig::default())));
        assert_eq!(a.state(), DragState::Idle);
        assert!(!axis.borrow().is_locked());
    }
}
