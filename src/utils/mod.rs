//! Utility modules for the plot viewer.

pub mod formatting;

// Re-export commonly used functions
pub use formatting::{format_axis_range, format_memory_mb, get_current_memory_mb, single_line};
