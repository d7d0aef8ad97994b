//! Command-line definitions. No behavior.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use plateshot_core::{ImageResolution, PhotoStyle};

use super::logging::LogDestination;

/// Plateshot - professional food photos for every dish on a menu
#[derive(Debug, Parser)]
#[command(name = "plateshot", version)]
#[command(about = "Generate food photography for a restaurant menu")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to ./plateshot.ron when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log output
    #[arg(long, value_enum, default_value_t = LogDestination::Terminal, global = true)]
    pub log: LogDestination,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate photos for every dish in a menu file, then export them
    Run {
        /// Menu file, one "Name: description" per line; "-" reads stdin
        #[arg(long)]
        menu: PathBuf,
        /// Photo style (rustic, modern, social)
        #[arg(long)]
        style: Option<PhotoStyle>,
        /// Image resolution (1K, 2K, 4K)
        #[arg(long)]
        resolution: Option<ImageResolution>,
        /// Output directory for exported images
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Interactive session: add dishes, generate, retry, edit and save
    Studio {
        /// Output directory used by `save`
        #[arg(long)]
        out: Option<PathBuf>,
    },
}
