//! Text formatting helpers for the status bar and header.

use rdas::{DatumRange, Orientation};
use sysinfo::{Pid, ProcessRefreshKind, RefreshKind, System};

/// Formats an axis range for the status bar, e.g. `X: 0 to 100`.
pub fn format_axis_range(orientation: Orientation, range: &DatumRange, log: bool) -> String {
    let name = match orientation {
        Orientation::Horizontal => "X",
        Orientation::Vertical => "Y",
    };
    if log {
        format!("{name} (log): {range}")
    } else {
        format!("{name}: {range}")
    }
}

/// Collapses multi-line module feedback onto one status line.
pub fn single_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("  |  ")
}

/// Gets the current process memory usage in megabytes.
///
/// Returns 0.0 if the process information cannot be retrieved.
pub fn get_current_memory_mb() -> f64 {
    let mut sys = System::new_with_specifics(
        RefreshKind::new().with_processes(ProcessRefreshKind::new().with_memory()),
    );
    sys.refresh_processes_specifics(ProcessRefreshKind::new().with_memory());

    if let Some(process) = sys.process(Pid::from_u32(std::process::id())) {
        process.memory() as f64 / (1024.0 * 1024.0)
    } else {
        0.0
    }
}

/// Formats memory usage in MB as a human-readable string.
pub fn format_memory_mb(memory_mb: f64) -> String {
    if memory_mb > 1024.0 {
        format!("Memory: {:.2} GB", memory_mb / 1024.0)
    } else {
        format!("Memory: {:.1} MB", memory_mb)
    }
}
