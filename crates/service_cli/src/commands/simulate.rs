//! Simulate command implementation
//!
//! Generates a synthetic Heston price path from the configured parameters and
//! writes it in the CSV layout the `inspect` command reads.

use std::path::Path;

use chrono::{DateTime, Duration, TimeZone, Utc};
use tracing::info;
use volcal_core::market_data::PriceSeries;
use volcal_models::simulation::{simulate_path, SimulationDraws};

use crate::config::CalibrationSettings;
use crate::market_data::write_csv;
use crate::{CliError, Result};

/// Options for a simulation run
#[derive(Debug, Clone, PartialEq)]
pub struct SimulateOptions {
    /// Number of steps (the path has `steps + 1` prices)
    pub steps: usize,
    /// RNG seed
    pub seed: u64,
    /// Starting price
    pub spot: f64,
    /// Timestamp of the first price (RFC 3339)
    pub start: Option<String>,
}

impl Default for SimulateOptions {
    fn default() -> Self {
        Self {
            steps: 1000,
            seed: 42,
            spot: 100.0,
            start: None,
        }
    }
}

/// Run the simulate command
pub async fn run(settings: &CalibrationSettings, options: &SimulateOptions, output: &Path) -> Result<()> {
    info!(
        steps = options.steps,
        seed = options.seed,
        spot = options.spot,
        output = %output.display(),
        "Simulating price path"
    );

    let series = simulate_series(settings, options)?;
    write_csv(output, &series).await?;

    info!(prices = series.len(), "Simulation written");
    Ok(())
}

/// Simulate a timestamped series spaced at the configured frequency.
///
/// The variance starts at `initial_volatility²`.
pub fn simulate_series(settings: &CalibrationSettings, options: &SimulateOptions) -> Result<PriceSeries> {
    if options.steps == 0 {
        return Err(CliError::InvalidArgument("steps must be positive".to_string()));
    }

    let start = parse_start(options.start.as_deref())?;
    let params = settings.parameters()?;
    let v0 = settings.initial_volatility * settings.initial_volatility;
    let draws = SimulationDraws::seeded(options.seed, options.steps);
    let path = simulate_path(&params, settings.time_step(), v0, options.spot, &draws)?;

    let minutes = i64::from(settings.frequency.minutes());
    let timestamps = (0..path.prices.len())
        .map(|i| start + Duration::minutes(minutes * i as i64))
        .collect();

    Ok(PriceSeries::from_closes(timestamps, path.prices)?)
}

fn parse_start(start: Option<&str>) -> Result<DateTime<Utc>> {
    match start {
        Some(text) => DateTime::parse_from_rfc3339(text)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| CliError::InvalidArgument(format!("Invalid start time {}: {}", text, e))),
        None => Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .ok_or_else(|| CliError::InvalidArgument("Invalid default start".to_string())),
    }
}
