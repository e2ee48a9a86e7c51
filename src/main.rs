//! Lodging Admin - Main Entry Point
//!
//! Employee accommodation and maintenance administration client

use std::io::Write;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use lodging_admin::app::application::Application;
use lodging_admin::app::cli::Cli;
use lodging_admin::constants::APP_NAME;
use lodging_admin::domain::config::AppConfig;
use lodging_admin::error::Error;
use lodging_admin::helpers::get_or_create_log_dir;
use lodging_admin::logging;

fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let path = match &cli.config {
        Some(path) => path.clone(),
        None => AppConfig::default_path()?,
    };
    if !path.exists() && cli.config.is_none() {
        // First run: write the defaults so the account table can be edited
        let config = AppConfig::default();
        config
            .save_to(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!(path = ?path, "Default configuration written");
        return Ok(config);
    }
    AppConfig::load_from(&path).with_context(|| format!("Failed to load {}", path.display()))
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = load_config(&cli)?;
    let mut app = Application::new(config, cli.data_dir.as_deref(), cli.locale.as_deref())
        .context("Failed to open the data directory")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match app.run(cli.command, &mut out) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        // Already reported through the notification stream
        Err(Error::Store { .. }) => Ok(ExitCode::FAILURE),
        Err(Error::Auth { source }) => {
            writeln!(out, "{source}")?;
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _guard = match get_or_create_log_dir().and_then(|dir| logging::init(&dir, cli.verbose)) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("{APP_NAME}: logging disabled: {e}");
            None
        }
    };

    tracing::debug!("Starting {APP_NAME}");

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("{APP_NAME}: {e:#}");
            ExitCode::FAILURE
        }
    }
}
