//! Health Calculator CLI
//!
//! Runs one computation per invocation, or an interactive tabbed session
//! when no subcommand is given.

use anyhow::Result;
use clap::Parser;
use health_calculator_cli::cli::{Cli, Command};
use health_calculator_cli::commands::{self, Output};
use health_calculator_cli::config::{AppConfig, LogFormat, LoggingConfig};
use health_calculator_cli::controller::Controller;
use health_calculator_cli::session::Session;
use std::io;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<ExitCode> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Load configuration, then let flags override it
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(locale) = cli.locale {
        config.display.locale = locale;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    init_tracing(&config.logging);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        locale = %config.display.locale,
        "Starting health calculator"
    );

    let output = Output {
        locale: config.display.locale,
        json: cli.json,
        gauge_width: config.display.gauge_width,
    };
    let mut controller = Controller::new(config.defaults.sex, config.defaults.activity_level);

    let outcome = match cli.command {
        None | Some(Command::Interactive) => {
            let stdin = io::stdin();
            Session::new(&mut controller, output, io::stdout(), io::stderr())
                .run(stdin.lock())
                .map(|()| ExitCode::SUCCESS)
        }
        Some(command) => commands::execute(
            command,
            &mut controller,
            &output,
            &mut io::stdout().lock(),
            &mut io::stderr().lock(),
        ),
    };

    match outcome {
        Ok(code) => Ok(code),
        Err(e) => {
            error!(error = %e, "Command failed");
            commands::print_failure(
                &e,
                &output,
                &mut io::stdout().lock(),
                &mut io::stderr().lock(),
            )?;
            Ok(e.exit_code())
        }
    }
}

/// Logs go to stderr; RUST_LOG wins over the configured level
fn init_tracing(logging: &LoggingConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| "warn".into());

    let subscriber = tracing_subscriber::registry().with(env_filter);

    match logging.format {
        LogFormat::Json => subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init(),
        LogFormat::Pretty => subscriber
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(io::stderr))
            .init(),
    }
}
