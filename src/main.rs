use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use retail_forecast::cli::{handle_config_command, handle_run_command, ConfigArgs, RunArgs};

#[derive(Parser)]
#[command(
    name = "retail-forecast",
    author = "Kaylee Beyene",
    version,
    about = "Monthly retail revenue forecasting with a seasonal ARIMA model",
    long_about = "retail-forecast aggregates a retail transaction export into monthly \
                  revenue, fits a seasonal ARIMA model on the leading months and \
                  compares its forecast with the held-out months, writing plots and \
                  a forecast table to the output directory."
)]
struct Cli {
    /// JSON settings file (flags take precedence over its values)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the forecasting pipeline
    Run(RunArgs),

    /// Show the resolved configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    let settings_file = cli.config.as_deref();
    match cli.command {
        Commands::Run(args) => {
            handle_run_command(&args, settings_file).context("Forecast run failed")?
        }
        Commands::Config(args) => {
            handle_config_command(&args, settings_file).context("Could not resolve configuration")?
        }
    }

    Ok(())
}
