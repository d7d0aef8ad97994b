#![deny(missing_docs)]
//! Shared logging utilities for the plateshot workspace.
//!
//! This crate provides the `shot_*` logging macros used across the codebase,
//! the level policy shared by the binary and the tests, and a minimal test
//! initializer for the global logger.

use log::LevelFilter;

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! shot_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! shot_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! shot_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! shot_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! shot_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Level used when the user asked for nothing special.
///
/// `verbose` raises it to debug. Debug builds always log at debug.
pub fn default_level(verbose: bool) -> LevelFilter {
    if verbose || cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        default_level(false),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
