//! Application-level coordination.
//!
//! Translates panel interactions into axis and adapter operations, and
//! drives the batch runner once per frame.

use anyhow::Result;
use rdas::{AxisView, DasAxis};
use tracing::{debug, info};

use crate::app::AppState;
use crate::state::{current_x_range, BatchState};

/// Toolbar and popup requests.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerCommand {
    Back,
    Forward,
    ZoomOut,
    ScanPrevious,
    ScanNext,
    ToggleYLog,
    Reset,
    StepThrough,
    CancelBatch,
    SetPrimary(String),
    SetSecondary(String),
    ClosePopup,
}

pub struct ApplicationCoordinator;

impl ApplicationCoordinator {
    /// Applies a command. Failures land in `state.error_message`.
    pub fn execute(state: &mut AppState, command: ViewerCommand, ctx: &egui::Context) {
        debug!(?command, "viewer command");
        let result = match command {
            ViewerCommand::StepThrough => {
                Self::start_batch(state, ctx);
                Ok(())
            }
            other => Self::apply(state, other),
        };
        state.error_message = result.err().map(|e| format!("{e:#}"));
    }

    /// Everything except starting a batch, which needs a repaint handle.
    pub fn apply(state: &mut AppState, command: ViewerCommand) -> Result<()> {
        let plot = &mut state.plot;
        match command {
            ViewerCommand::Back => {
                Self::on_both(plot.x_axis(), plot.y_axis(), DasAxis::set_data_range_prev);
            }
            ViewerCommand::Forward => {
                Self::on_both(plot.x_axis(), plot.y_axis(), DasAxis::set_data_range_forward);
            }
            ViewerCommand::ZoomOut => {
                plot.x_axis().borrow_mut().set_data_range_zoom_out();
            }
            ViewerCommand::ScanPrevious => {
                plot.x_axis().borrow_mut().scan_previous();
            }
            ViewerCommand::ScanNext => {
                plot.x_axis().borrow_mut().scan_next();
            }
            ViewerCommand::ToggleYLog => {
                let log = plot.is_y_log();
                if !plot.y_axis().borrow_mut().set_log(!log) {
                    anyhow::bail!("Y range must be positive for a log axis");
                }
            }
            ViewerCommand::Reset => {
                plot.reset_layout();
                plot.reset_ranges();
            }
            ViewerCommand::SetPrimary(label) => {
                plot.set_primary(&label)?;
                plot.close_popup();
            }
            ViewerCommand::SetSecondary(label) => plot.set_secondary(&label)?,
            ViewerCommand::ClosePopup => plot.close_popup(),
            ViewerCommand::CancelBatch => {
                if let Some(batch) = &state.batch {
                    batch.cancel();
                }
            }
            ViewerCommand::StepThrough => anyhow::bail!("step through needs a running viewer"),
        }
        Ok(())
    }

    fn on_both(x: &rdas::AxisHandle, y: &rdas::AxisHandle, op: fn(&mut DasAxis) -> bool) {
        op(&mut x.borrow_mut());
        op(&mut y.borrow_mut());
    }

    fn start_batch(state: &mut AppState, ctx: &egui::Context) {
        if state.batch.is_some() {
            return;
        }
        let start = current_x_range(state.plot.x_axis());
        let repaint = ctx.clone();
        state.batch = Some(BatchState::start(start, move || repaint.request_repaint()));
        info!(start = %start, "step through started");
    }

    /// Advances the batch run. Called once per frame before painting.
    pub fn pump_batch(state: &mut AppState) -> bool {
        let Some(batch) = state.batch.as_mut() else {
            return false;
        };
        let applied = batch.pump(state.plot.x_axis());
        if batch.is_finished() {
            let (done, total) = batch.progress();
            state.plot.notice(format!("Stepped through {done} of {total} pages"));
            state.batch = None;
        }
        applied
    }

    /// Keeps the Y log flag reported by the axis in sync with the header toggle.
    pub fn y_is_log(state: &AppState) -> bool {
        state.plot.y_axis().borrow().is_log()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdas::ScreenRect;

    use crate::app::ViewerSettings;

    fn state() -> AppState {
        let mut state = AppState::with_settings(ViewerSettings::default()).expect("app state");
        state.plot.layout(ScreenRect::new(0, 0, 400, 300));
        state
    }

    #[test]
    fn test_scan_and_back() {
        let mut state = state();
        let start = state.plot.x_axis().borrow().datum_range();
        ApplicationCoordinator::apply(&mut state, ViewerCommand::ScanNext).unwrap();
        assert_eq!(state.plot.x_axis().borrow().datum_range(), start.next());
        ApplicationCoordinator::apply(&mut state, ViewerCommand::Back).unwrap();
        assert_eq!(state.plot.x_axis().borrow().datum_range(), start);
        ApplicationCoordinator::apply(&mut state, ViewerCommand::Forward).unwrap();
        assert_eq!(state.plot.x_axis().borrow().datum_range(), start.next());
    }

    #[test]
    fn test_toggle_log() {
        let mut state = state();
        ApplicationCoordinator::apply(&mut state, ViewerCommand::ToggleYLog).unwrap();
        assert!(ApplicationCoordinator::y_is_log(&state));
        ApplicationCoordinator::apply(&mut state, ViewerCommand::ToggleYLog).unwrap();
        assert!(!ApplicationCoordinator::y_is_log(&state));
    }

    #[test]
    fn test_unknown_module_is_an_error() {
        let mut state = state();
        let result = ApplicationCoordinator::apply(&mut state, ViewerCommand::SetPrimary("Nope".into()));
        assert!(result.is_err());
        assert_eq!(state.plot.adapter().primary_label(), Some("Box Zoom"));
        ApplicationCoordinator::apply(&mut state, ViewerCommand::SetPrimary("Length".into())).unwrap();
        assert_eq!(state.plot.adapter().primary_label(), Some("Length"));
    }

    #[test]
    fn test_zoom_out_and_reset() {
        let mut state = state();
        let start = state.plot.x_axis().borrow().datum_range();
        ApplicationCoordinator::apply(&mut state, ViewerCommand::ZoomOut).unwrap();
        assert!(state.plot.x_axis().borrow().datum_range().width() > start.width());
        ApplicationCoordinator::apply(&mut state, ViewerCommand::Reset).unwrap();
        assert_eq!(state.plot.x_axis().borrow().datum_range(), start);
    }
}
