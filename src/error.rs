//! Configuration errors raised when the core is wired together incorrectly.
//!
//! These indicate programmer misuse (an axis of the wrong orientation handed
//! to a single-axis module, a module label that was never registered) rather
//! than anything a user can cause with the mouse. Runtime gesture problems
//! never surface as errors: invalid ranges are dropped silently.

use thiserror::Error;

use crate::axis::Orientation;

/// Errors returned when constructing or wiring modules.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{module} requires a {expected:?} axis, got {actual:?}")]
    WrongOrientation {
        module: &'static str,
        expected: Orientation,
        actual: Orientation,
    },

    #[error("no mouse module labelled '{0}' is registered")]
    UnknownModule(String),

    #[error("axis range must satisfy min < max with finite bounds (got {min} .. {max})")]
    EmptyRange { min: f64, max: f64 },

    #[error("log axis requires a positive range (got {min} .. {max})")]
    NonPositiveLogRange { min: f64, max: f64 },
}

impl ConfigError {
    /// Create a wrong-orientation error.
    pub fn wrong_orientation(module: &'static str, expected: Orientation, actual: Orientation) -> Self {
        Self::WrongOrientation {
            module,
            expected,
            actual,
        }
    }
}
