pub mod app;
pub mod batch;
pub mod cli;
pub mod config;
pub mod credentials;
pub mod effects;
pub mod logging;
pub mod render;
pub mod studio;

use std::io::{self, IsTerminal};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use plateshot_engine::{EngineHandle, GeminiClient};
use plateshot_logging::shot_info;

use self::app::App;
use self::cli::{Cli, Commands};
use self::config::{load_config, AppConfig};
use self::credentials::PromptCredentials;

pub fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    logging::initialize(cli.log, cli.verbose);
    let mut config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Run {
            menu,
            style,
            resolution,
            out,
        } => {
            if let Some(style) = style {
                config.style = style;
            }
            if let Some(resolution) = resolution {
                config.resolution = resolution;
            }
            if let Some(out) = out {
                config.output_dir = out;
            }
            let text = batch::read_menu(&menu)?;
            // Stdin may carry the menu, so only prompt on a real terminal.
            let interactive = menu.as_os_str() != "-" && io::stdin().is_terminal();
            let mut app = start_app(&config, interactive)?;
            let outcome = batch::run_batch(&mut app, text, &config.output_dir, &mut io::stdout())?;
            shot_info!(
                "Batch finished: {} completed, {} failed",
                outcome.completed,
                outcome.failed
            );
            Ok(if outcome.all_succeeded() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Studio { out } => {
            if let Some(out) = out {
                config.output_dir = out;
            }
            let mut app = start_app(&config, io::stdin().is_terminal())?;
            studio::run_studio(
                &mut app,
                config.output_dir.clone(),
                // Not locked: the key prompt may need the terminal mid-session.
                &mut io::BufReader::new(io::stdin()),
                &mut io::stdout(),
            )?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn start_app(config: &AppConfig, interactive: bool) -> anyhow::Result<App> {
    let credentials = Arc::new(PromptCredentials::from_env(interactive));
    let client = GeminiClient::new(config.client_settings(), credentials.clone());
    let engine =
        EngineHandle::new(Arc::new(client), credentials).context("failed to start engine")?;
    shot_info!(
        "Engine started: model={} style={} resolution={}",
        config.generate_model,
        config.style.keyword(),
        config.resolution
    );
    Ok(App::new(engine, config.generation_config()))
}
