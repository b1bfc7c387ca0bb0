//! Coalescing of rapid wheel ticks.
//!
//! Trackpads deliver bursts of tiny wheel events. Ticks arriving within the
//! coalescing window of the first tick of a burst are merged into one step of
//! larger magnitude; the step is released by the next tick outside the window
//! or by [`WheelCoalescer::poll`] once the window has elapsed.

use std::time::{Duration, Instant};

use crate::geometry::ScreenPoint;

use super::WheelEvent;

/// Merged wheel input, ready to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelBurst {
    /// Pointer position of the first tick.
    pub pos: ScreenPoint,
    pub clicks: i32,
    /// Ctrl or shift held: pan instead of zoom.
    pub pan: bool,
}

#[derive(Debug, Clone)]
struct Pending {
    burst: WheelBurst,
    started: Instant,
}

#[derive(Debug, Clone)]
pub struct WheelCoalescer {
    window: Duration,
    pending: Option<Pending>,
}

impl WheelCoalescer {
    pub fn new(window: Duration) -> Self {
        Self { window, pending: None }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Adds a tick. Returns the previous burst when this tick starts a new one.
    pub fn push(&mut self, event: &WheelEvent) -> Option<WheelBurst> {
        let pan = event.modifiers.ctrl || event.modifiers.shift;
        if let Some(pending) = &mut self.pending {
            let same_burst = pending.burst.pan == pan
                && event.at.saturating_duration_since(pending.started) < self.window;
            if same_burst {
                pending.burst.clicks += event.clicks;
                return None;
            }
        }
        let flushed = self.pending.take().map(|p| p.burst);
        self.pending = Some(Pending {
            burst: WheelBurst {
                pos: event.pos,
                clicks: event.clicks,
                pan,
            },
            started: event.at,
        });
        flushed
    }

    /// Releases the pending burst once its window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<WheelBurst> {
        let ready = self
            .pending
            .as_ref()
            .is_some_and(|p| now.saturating_duration_since(p.started) >= self.window);
        if ready {
            self.flush()
        } else {
            None
        }
    }

    /// Releases the pending burst unconditionally.
    pub fn flush(&mut self) -> Option<WheelBurst> {
        self.pending.take().map(|p| p.burst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::Modifiers;

    fn tick(at: Instant, clicks: i32, modifiers: Modifiers) -> WheelEvent {
        WheelEvent {
            pos: ScreenPoint::new(100, 50),
            clicks,
            modifiers,
            at,
        }
    }

    #[test]
    fn test_close_ticks_merge() {
        let t0 = Instant::now();
        let mut c = WheelCoalescer::new(Duration::from_millis(40));
        assert!(c.push(&tick(t0, 1, Modifiers::NONE)).is_none());
        assert!(c.push(&tick(t0 + Duration::from_millis(5), 1, Modifiers::NONE)).is_none());
        assert!(c.poll(t0 + Duration::from_millis(20)).is_none());
        let burst = c.poll(t0 + Duration::from_millis(45)).unwrap();
        assert_eq!(burst.clicks, 2);
        assert!(!c.has_pending());
    }

    #[test]
    fn test_distant_ticks_stay_separate() {
        let t0 = Instant::now();
        let mut c = WheelCoalescer::new(Duration::from_millis(40));
        c.push(&tick(t0, 1, Modifiers::NONE));
        let first = c.push(&tick(t0 + Duration::from_millis(100), 1, Modifiers::NONE)).unwrap();
        assert_eq!(first.clicks, 1);
        assert_eq!(c.flush().unwrap().clicks, 1);
    }

    #[test]
    fn test_modifier_change_splits_burst() {
        let t0 = Instant::now();
        let mut c = WheelCoalescer::new(Duration::from_millis(40));
        c.push(&tick(t0, -1, Modifiers::NONE));
        let zoom = c.push(&tick(t0 + Duration::from_millis(1), 1, Modifiers::ctrl())).unwrap();
        assert!(!zoom.pan);
        assert!(c.flush().unwrap().pan);
    }
}
