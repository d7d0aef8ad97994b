//! The `plateshot` binary's host layer: command line, configuration,
//! logging and the loop that feeds engine events back into the core.
pub mod platform;
