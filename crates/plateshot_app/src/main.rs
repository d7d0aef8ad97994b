use std::process::ExitCode;

use clap::Parser;
use plateshot_app::platform::{self, cli::Cli};
use plateshot_logging::shot_error;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match platform::run(cli) {
        Ok(code) => code,
        Err(err) => {
            shot_error!("{:#}", err);
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
