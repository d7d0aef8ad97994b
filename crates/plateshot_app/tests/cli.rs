use std::path::PathBuf;

use clap::Parser;
use plateshot_app::platform::cli::{Cli, Commands};
use plateshot_app::platform::logging::LogDestination;
use plateshot_core::{ImageResolution, PhotoStyle};

#[test]
fn run_command_with_overrides() {
    let cli = Cli::try_parse_from([
        "plateshot",
        "run",
        "--menu",
        "menu.txt",
        "--style",
        "rustic",
        "--resolution",
        "2K",
        "--log",
        "both",
        "--verbose",
    ])
    .unwrap();

    assert_eq!(cli.log, LogDestination::Both);
    assert!(cli.verbose);
    match cli.command {
        Commands::Run {
            menu,
            style,
            resolution,
            out,
        } => {
            assert_eq!(menu, PathBuf::from("menu.txt"));
            assert_eq!(style, Some(PhotoStyle::Rustic));
            assert_eq!(resolution, Some(ImageResolution::Res2K));
            assert_eq!(out, None);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn studio_defaults() {
    let cli = Cli::try_parse_from(["plateshot", "studio"]).unwrap();
    assert_eq!(cli.log, LogDestination::Terminal);
    assert!(cli.config.is_none());
    assert!(matches!(cli.command, Commands::Studio { out: None }));
}

#[test]
fn rejects_unknown_style() {
    assert!(Cli::try_parse_from(["plateshot", "run", "--menu", "-", "--style", "neon"]).is_err());
}
