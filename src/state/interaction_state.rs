//! Pointer bookkeeping between frames.
//!
//! egui reports raw button and move events; the adapter wants press, drag
//! and release. This state remembers which button is down and the part of a
//! smooth wheel delta that has not yet added up to a whole click.

use rdas::MouseButton;

/// Screen points of smooth scrolling that count as one wheel click.
pub const POINTS_PER_CLICK: f32 = 50.0;

#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    pressed: Option<MouseButton>,
    wheel_remainder: f32,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pressed(&self) -> Option<MouseButton> {
        self.pressed
    }

    pub fn press(&mut self, button: MouseButton) {
        self.pressed = Some(button);
    }

    /// Returns true when `button` was the tracked button.
    pub fn release(&mut self, button: MouseButton) -> bool {
        if self.pressed == Some(button) {
            self.pressed = None;
            true
        } else {
            false
        }
    }

    /// Adds a wheel delta in clicks (positive means wheel down) and returns
    /// the whole clicks now available.
    pub fn accumulate_wheel(&mut self, clicks: f32) -> i32 {
        self.wheel_remainder += clicks;
        let whole = self.wheel_remainder.trunc();
        self.wheel_remainder -= whole;
        whole as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_accumulates_fractions() {
        let mut state = InteractionState::new();
        assert_eq!(state.accumulate_wheel(0.4), 0);
        assert_eq!(state.accumulate_wheel(0.4), 0);
        assert_eq!(state.accumulate_wheel(0.4), 1);
        assert_eq!(state.accumulate_wheel(-2.0), -1);
    }

    #[test]
    fn test_release_only_tracked_button() {
        let mut state = InteractionState::new();
        state.press(MouseButton::Middle);
        assert!(!state.release(MouseButton::Primary));
        assert!(state.release(MouseButton::Middle));
        assert_eq!(state.pressed(), None);
    }
}
