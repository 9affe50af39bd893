//! termreel - replay recorded terminal sessions

mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use termreel::cli::{Cli, Commands, ConfigCommand};
use termreel::Settings;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Settings pick the default log level, so load them before logging is up
    // and report a broken file afterwards.
    let loaded = Settings::load();
    let default_level = loaded
        .as_ref()
        .map(|s| s.log.level.clone())
        .unwrap_or_else(|_| "warn".to_string());
    init_logging(cli.verbose, &default_level);

    let settings = match loaded {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("ignoring settings file: {e:#}");
            Settings::default()
        }
    };

    match run(cli, &settings) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, settings: &Settings) -> Result<ExitCode> {
    match cli.command {
        Commands::Play(args) => commands::play::handle(&args, settings),
        Commands::Info { file } => commands::info::handle(&file).map(|_| ExitCode::SUCCESS),
        Commands::Timeline(args) => {
            commands::timeline::handle(&args, settings).map(|_| ExitCode::SUCCESS)
        }
        Commands::Config(cmd) => {
            match cmd {
                ConfigCommand::Show => commands::config::handle_show(settings)?,
                ConfigCommand::Edit => commands::config::handle_edit()?,
                ConfigCommand::Path => commands::config::handle_path()?,
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Completions { shell } => {
            commands::completions::handle(shell);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Log to stderr. `-v` flags win over `RUST_LOG`, which wins over settings.
fn init_logging(verbose: u8, default_level: &str) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
