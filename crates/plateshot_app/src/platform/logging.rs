//! Logger setup for the `plateshot` binary.
//!
//! The terminal logger writes to stderr so tables printed on stdout stay
//! clean. File output goes to `./plateshot.log` in the working directory.

use std::fs::File;
use std::path::PathBuf;

use clap::ValueEnum;
use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

pub const LOG_FILENAME: &str = "plateshot.log";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogDestination {
    #[default]
    Terminal,
    File,
    Both,
}

impl LogDestination {
    fn wants_terminal(self) -> bool {
        matches!(self, LogDestination::Terminal | LogDestination::Both)
    }

    fn wants_file(self) -> bool {
        matches!(self, LogDestination::File | LogDestination::Both)
    }
}

pub fn initialize(destination: LogDestination, verbose: bool) {
    let level = plateshot_logging::default_level(verbose);
    let config = build_config();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if destination.wants_terminal() {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }
    if destination.wants_file() {
        if let Some(file_logger) = create_file_logger(level, config) {
            loggers.push(file_logger);
        }
    }
    if loggers.is_empty() {
        return;
    }

    let _ = CombinedLogger::init(loggers);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .add_filter_allow_str("plateshot")
        .build()
}

fn create_file_logger(level: LevelFilter, config: Config) -> Option<Box<WriteLogger<File>>> {
    let log_path = PathBuf::from(".").join(LOG_FILENAME);
    match File::create(&log_path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: could not create log file at {log_path:?}: {err}");
            None
        }
    }
}
