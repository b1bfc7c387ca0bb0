//! Plot input handling: translates egui pointer, wheel and key events into
//! input adapter calls.
//!
//! Raw events are used rather than widget responses so that every button,
//! including middle, reaches the adapter with its own press and release.

use std::time::Instant;

use eframe::egui;
use rdas::{DragState, Key, Modifiers, MouseButton, PointerEvent, WheelEvent};

use crate::rendering::PanelFrame;
use crate::state::{InteractionState, PlotState, POINTS_PER_CLICK};

/// Wheel clicks per page of scrolling.
const CLICKS_PER_PAGE: f32 = 3.0;

/// Result of plot input handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotInputResult {
    /// Nothing reached the adapter
    None,
    /// The adapter consumed input; the overlay or axes may have changed
    Handled,
}

pub fn map_button(button: egui::PointerButton) -> Option<MouseButton> {
    match button {
        egui::PointerButton::Primary => Some(MouseButton::Primary),
        egui::PointerButton::Secondary => Some(MouseButton::Secondary),
        egui::PointerButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

pub fn map_modifiers(modifiers: egui::Modifiers) -> Modifiers {
    Modifiers {
        shift: modifiers.shift,
        ctrl: modifiers.ctrl || modifiers.mac_cmd,
        alt: modifiers.alt,
    }
}

pub fn map_key(key: egui::Key) -> Option<Key> {
    match key {
        egui::Key::Escape => Some(Key::Escape),
        egui::Key::Enter => Some(Key::Enter),
        egui::Key::Backspace => Some(Key::Backspace),
        egui::Key::P => Some(Key::Char('p')),
        _ => None,
    }
}

/// Converts a wheel delta to clicks, positive meaning wheel down.
pub fn wheel_clicks(unit: egui::MouseWheelUnit, delta: egui::Vec2) -> f32 {
    // some platforms turn shift+wheel into horizontal scrolling
    let amount = if delta.y != 0.0 { delta.y } else { delta.x };
    let clicks = match unit {
        egui::MouseWheelUnit::Point => amount / POINTS_PER_CLICK,
        egui::MouseWheelUnit::Line => amount,
        egui::MouseWheelUnit::Page => amount * CLICKS_PER_PAGE,
    };
    -clicks
}

/// Whether a press at `local` belongs to the plot.
fn accepts_press(plot: &PlotState, local: rdas::ScreenPoint) -> bool {
    let adapter = plot.adapter();
    adapter.state() == DragState::Pinned
        || plot
            .bounds()
            .inflate(adapter.config().edge_threshold_px)
            .contains(local)
}

/// Feeds this frame's input to the plot's adapter.
pub fn handle_plot_input(
    ctx: &egui::Context,
    frame: PanelFrame,
    panel_rect: egui::Rect,
    plot: &mut PlotState,
    interaction: &mut InteractionState,
) -> PlotInputResult {
    let (events, hover, held) = ctx.input(|i| (i.events.clone(), i.pointer.hover_pos(), i.modifiers));
    let keyboard_free = !ctx.wants_keyboard_input();
    let hovering = hover.is_some_and(|p| panel_rect.contains(p));
    let mut handled = false;
    let mut wheeled = false;

    for event in events {
        match event {
            egui::Event::PointerButton {
                pos,
                button,
                pressed,
                modifiers,
                ..
            } => {
                let Some(button) = map_button(button) else {
                    continue;
                };
                let local = frame.to_local(pos);
                let pointer = PointerEvent::new(local, button, map_modifiers(modifiers));
                if pressed {
                    if interaction.pressed().is_none()
                        && panel_rect.contains(pos)
                        && accepts_press(plot, local)
                    {
                        interaction.press(button);
                        plot.adapter_mut().mouse_pressed(pointer);
                        handled = true;
                    }
                } else if interaction.release(button) {
                    plot.adapter_mut().mouse_released(pointer);
                    handled = true;
                }
            }
            egui::Event::PointerMoved(pos) => {
                if let Some(button) = interaction.pressed() {
                    let pointer = PointerEvent::new(frame.to_local(pos), button, map_modifiers(held));
                    plot.adapter_mut().mouse_dragged(pointer);
                    handled = true;
                }
            }
            egui::Event::MouseWheel {
                unit,
                delta,
                modifiers,
                ..
            } => {
                let Some(pos) = hover.filter(|p| panel_rect.contains(*p)) else {
                    continue;
                };
                let clicks = interaction.accumulate_wheel(wheel_clicks(unit, delta));
                if clicks != 0 {
                    plot.adapter_mut().wheel(WheelEvent {
                        pos: frame.to_local(pos),
                        clicks,
                        modifiers: map_modifiers(modifiers),
                        at: Instant::now(),
                    });
                    handled = true;
                    wheeled = true;
                }
            }
            egui::Event::Key {
                key,
                pressed: true,
                repeat: false,
                ..
            } => {
                let engaged = hovering || interaction.pressed().is_some();
                if keyboard_free && engaged {
                    if let Some(key) = map_key(key) {
                        plot.adapter_mut().key_pressed(key);
                        handled = true;
                    }
                }
            }
            _ => {}
        }
    }

    // flush wheel bursts whose window has passed
    plot.adapter_mut().poll(Instant::now());
    if wheeled {
        ctx.request_repaint_after(plot.adapter().config().wheel_coalesce_window());
    }
    if plot.process_adapter_output() {
        handled = true;
    }

    if handled {
        PlotInputResult::Handled
    } else {
        PlotInputResult::None
    }
}
