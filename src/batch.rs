//! Background runner stepping a plot through a list of ranges.
//!
//! The worker thread hands one range at a time to the GUI thread and blocks
//! until the GUI reports that it has applied the range and finished painting,
//! then moves on. The GUI side never blocks: it polls for the next task once
//! per frame.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, info};

use crate::datum_range::DatumRange;

/// One range to apply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchTask {
    pub index: usize,
    pub range: DatumRange,
}

pub struct BatchRunner {
    tasks: Receiver<BatchTask>,
    idle: Sender<()>,
    cancelled: Arc<AtomicBool>,
    finished: Arc<AtomicBool>,
    total: usize,
    worker: Option<JoinHandle<()>>,
}

impl BatchRunner {
    /// Starts stepping through `ranges`.
    ///
    /// # Arguments
    /// * `ranges` - Ranges submitted in order
    /// * `wake` - Called after each submission so the GUI can schedule a frame
    pub fn start(ranges: Vec<DatumRange>, wake: impl Fn() + Send + 'static) -> Self {
        let (task_tx, task_rx) = channel();
        let (idle_tx, idle_rx) = channel::<()>();
        let cancelled = Arc::new(AtomicBool::new(false));
        let finished = Arc::new(AtomicBool::new(false));
        let total = ranges.len();

        let worker_cancelled = Arc::clone(&cancelled);
        let worker_finished = Arc::clone(&finished);
        let worker = thread::spawn(move || {
            for (index, range) in ranges.into_iter().enumerate() {
                if worker_cancelled.load(Ordering::SeqCst) {
                    break;
                }
                if task_tx.send(BatchTask { index, range }).is_err() {
                    break;
                }
                wake();
                // wait until the GUI has applied and painted the range
                if idle_rx.recv().is_err() || worker_cancelled.load(Ordering::SeqCst) {
                    break;
                }
                debug!(index, "batch task completed");
            }
            worker_finished.store(true, Ordering::SeqCst);
            wake();
        });
        info!(total, "batch runner started");

        Self {
            tasks: task_rx,
            idle: idle_tx,
            cancelled,
            finished,
            total,
            worker: Some(worker),
        }
    }

    /// The next task to apply, if one is waiting.
    pub fn poll(&self) -> Option<BatchTask> {
        self.tasks.try_recv().ok()
    }

    /// Tells the worker the last task has been applied and painted.
    pub fn notify_idle(&self) {
        let _ = self.idle.send(());
    }

    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Stops after the task in progress.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        let _ = self.idle.send(());
    }
}

impl Drop for BatchRunner {
    fn drop(&mut self) {
        self.cancel();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn ranges(n: usize) -> Vec<DatumRange> {
        (0..n)
            .map(|i| DatumRange::numeric(i as f64, i as f64 + 1.0).unwrap())
            .collect()
    }

    fn wait_task(runner: &BatchRunner) -> Option<BatchTask> {
        for _ in 0..2000 {
            if let Some(task) = runner.poll() {
                return Some(task);
            }
            thread::sleep(Duration::from_millis(1));
        }
        None
    }

    fn wait_finished(runner: &BatchRunner) -> bool {
        for _ in 0..2000 {
            if runner.is_finished() {
                return true;
            }
            thread::sleep(Duration::from_millis(1));
        }
        false
    }

    #[test]
    fn test_tasks_wait_for_idle() {
        let runner = BatchRunner::start(ranges(3), || {});
        let first = wait_task(&runner).unwrap();
        assert_eq!(first.index, 0);
        thread::sleep(Duration::from_millis(20));
        assert!(runner.poll().is_none());
        runner.notify_idle();
        assert_eq!(wait_task(&runner).unwrap().index, 1);
        runner.notify_idle();
        assert_eq!(wait_task(&runner).unwrap().range, DatumRange::numeric(2.0, 3.0).unwrap());
        runner.notify_idle();
        assert!(wait_finished(&runner));
        assert_eq!(runner.total(), 3);
    }

    #[test]
    fn test_cancel_stops_submissions() {
        let runner = BatchRunner::start(ranges(5), || {});
        assert!(wait_task(&runner).is_some());
        runner.cancel();
        assert!(wait_finished(&runner));
        assert!(runner.poll().is_none());
    }
}
