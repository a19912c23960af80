//! Volcal CLI - Command Line Operations for Volatility Calibration
//!
//! # Commands
//!
//! - `volcal inspect --prices <file>` - Evaluate the model against observed prices
//! - `volcal simulate --steps <n> --output <file>` - Write a synthetic price path
//! - `volcal check` - Validate and print the resolved configuration

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use service_cli::commands::{self, simulate::SimulateOptions};
use service_cli::config::{build_settings, CliArgs};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Stochastic-volatility state-space calibration CLI
#[derive(Parser, Debug)]
#[command(name = "volcal")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Model (heston, cir)
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Sampling frequency (1min, 5min, 15min, 30min, 1hour, 4hour, 1day, 1week)
    #[arg(short, long, global = true)]
    frequency: Option<String>,

    /// Initial volatility guess (annualised)
    #[arg(long, global = true)]
    initial_volatility: Option<f64>,

    /// Instrument symbol
    #[arg(short, long, global = true)]
    symbol: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate the configured model against a price series
    Inspect {
        /// Path to price CSV (timestamp,close)
        #[arg(short, long)]
        prices: PathBuf,

        /// Output format (table, json)
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Simulate a synthetic price path from the configured parameters
    Simulate {
        /// Number of steps
        #[arg(short = 'n', long, default_value = "1000")]
        steps: usize,

        /// RNG seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Starting price
        #[arg(long, default_value = "100.0")]
        spot: f64,

        /// Timestamp of the first price (RFC 3339)
        #[arg(long)]
        start: Option<String>,

        /// Output CSV path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Check configuration and model construction
    Check,
}

impl From<&Cli> for CliArgs {
    fn from(cli: &Cli) -> Self {
        CliArgs {
            config_file: cli.config.clone(),
            log_level: cli.log_level.clone(),
            verbose: cli.verbose,
            model: cli.model.clone(),
            frequency: cli.frequency.clone(),
            initial_volatility: cli.initial_volatility,
            symbol: cli.symbol.clone(),
        }
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = build_settings(&CliArgs::from(&cli)).context("failed to resolve settings")?;

    init_tracing(settings.log_level.as_filter_str());

    info!("volcal v{}", service_cli::VERSION);
    debug!(
        model = %settings.model,
        frequency = %settings.frequency,
        initial_volatility = settings.initial_volatility,
        kappa = settings.kappa,
        symbol = %settings.symbol,
        "Settings resolved"
    );

    match cli.command {
        Commands::Inspect { prices, format } => {
            commands::inspect::run(&settings, &prices, &format)
                .await
                .with_context(|| format!("inspect failed for {}", prices.display()))?;
        }
        Commands::Simulate {
            steps,
            seed,
            spot,
            start,
            output,
        } => {
            let options = SimulateOptions {
                steps,
                seed,
                spot,
                start,
            };
            commands::simulate::run(&settings, &options, &output)
                .await
                .context("simulate failed")?;
        }
        Commands::Check => commands::check::run(&settings).context("check failed")?,
    }

    Ok(())
}
