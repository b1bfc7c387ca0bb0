//! Input handling subsystem for UI interactions.
//!
//! - Plot input handling (pointer, wheel and keys routed to the input adapter)

pub mod plot_input_handler;
