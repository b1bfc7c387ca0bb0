//! Progress of a "step through" batch run.
//!
//! Each frame the GUI first acknowledges the task it painted last frame, then
//! applies the next waiting range to the X axis. The worker only moves on
//! after the acknowledgement, so every range gets at least one painted frame.

use rdas::{AxisHandle, AxisView, BatchRunner, BatchTask, DatumRange};
use tracing::info;

/// Number of pages a batch run steps through.
const BATCH_PAGES: usize = 8;

pub struct BatchState {
    runner: BatchRunner,
    painted: Option<BatchTask>,
    applied: usize,
}

impl BatchState {
    /// Starts a run over `BATCH_PAGES` consecutive pages beginning at `start`.
    pub fn start(start: DatumRange, wake: impl Fn() + Send + 'static) -> Self {
        let ranges = std::iter::successors(Some(start), |r| Some(r.next()))
            .take(BATCH_PAGES)
            .collect();
        Self {
            runner: BatchRunner::start(ranges, wake),
            painted: None,
            applied: 0,
        }
    }

    /// Advances the run by at most one task. Returns true when a new range
    /// was applied.
    pub fn pump(&mut self, x_axis: &AxisHandle) -> bool {
        if self.painted.take().is_some() {
            self.runner.notify_idle();
        }
        match self.runner.poll() {
            Some(task) => {
                if !x_axis.borrow_mut().set_datum_range(task.range) {
                    info!(index = task.index, "batch range refused by axis");
                }
                self.applied += 1;
                self.painted = Some(task);
                true
            }
            None => false,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.runner.is_finished() && self.painted.is_none()
    }

    /// `(applied, total)`.
    pub fn progress(&self) -> (usize, usize) {
        (self.applied, self.runner.total())
    }

    pub fn cancel(&self) {
        self.runner.cancel();
    }
}

impl std::fmt::Debug for BatchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchState")
            .field("applied", &self.applied)
            .field("total", &self.runner.total())
            .finish_non_exhaustive()
    }
}

/// Range the X axis shows, used as the first batch page.
pub fn current_x_range(x_axis: &AxisHandle) -> DatumRange {
    x_axis.borrow().datum_range()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdas::{DasAxis, Orientation};
    use std::time::{Duration, Instant};

    #[test]
    fn test_steps_through_every_page() {
        let start = DatumRange::numeric(0.0, 10.0).unwrap();
        let axis = DasAxis::new(start, Orientation::Horizontal, 0.0, 100.0).into_handle();
        let mut batch = BatchState::start(start, || {});

        let deadline = Instant::now() + Duration::from_secs(5);
        while !batch.is_finished() && Instant::now() < deadline {
            batch.pump(&axis);
            std::thread::sleep(Duration::from_millis(1));
        }
        assert!(batch.is_finished());
        assert_eq!(batch.progress(), (BATCH_PAGES, BATCH_PAGES));
        let last = axis.borrow().datum_range();
        assert_eq!((last.min(), last.max()), (70.0, 80.0));
    }
}
