//! Inspect command implementation
//!
//! Loads a price series, builds the configured calibrator and reports the
//! one-step model evaluations at the initial state alongside simple
//! diagnostics of the observed log-returns.

use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};
use volcal_core::market_data::PriceSeries;
use volcal_core::types::SamplingFrequency;
use volcal_models::models::StateSpaceModel;

use super::OutputFormat;
use crate::config::CalibrationSettings;
use crate::market_data::{CsvPriceSource, PriceSource};
use crate::{CliError, Result};

/// Snapshot of the calibrator at `x0` against an observed series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectReport {
    /// Instrument symbol
    pub symbol: String,
    /// Model name
    pub model: &'static str,
    /// Sampling frequency
    pub frequency: SamplingFrequency,
    /// Annualised time step
    pub dt: f64,
    /// Initial state `(variance, auxiliary)`
    pub initial_state: [f64; 2],
    /// `predict(x0)`
    pub predicted_state: [f64; 2],
    /// `jacobian(x0)`, row-major
    pub jacobian: [[f64; 2]; 2],
    /// `process_noise(x0)`, row-major
    pub process_noise: [[f64; 2]; 2],
    /// `2 kappa theta / sigma²`
    pub feller_ratio: f64,
    /// Whether the Feller condition holds
    pub feller_satisfied: bool,
    /// Number of log-returns
    pub observations: usize,
    /// Variance of the initial state
    pub initial_variance: f64,
    /// Annualised realised variance of the log-returns
    pub realized_variance: f64,
    /// Mean of `z_t - predict(x0).auxiliary`
    pub mean_residual: f64,
}

/// Run the inspect command against a CSV file
pub async fn run(settings: &CalibrationSettings, prices: &Path, format: &str) -> Result<()> {
    let source = CsvPriceSource::new(prices);
    run_with_source(&source, settings, format).await
}

/// Run the inspect command against any price source
pub async fn run_with_source<S: PriceSource>(
    source: &S,
    settings: &CalibrationSettings,
    format: &str,
) -> Result<()> {
    let format: OutputFormat = format.parse()?;

    info!(symbol = %settings.symbol, frequency = %settings.frequency, "Fetching prices");
    let series = source.fetch(&settings.symbol, settings.frequency).await?;

    let report = build_report(settings, &series)?;
    let ratio = report.realized_variance / report.initial_variance;
    if !(0.25..=4.0).contains(&ratio) {
        warn!(
            realized = report.realized_variance,
            initial = report.initial_variance,
            "Initial volatility guess is far from realised volatility"
        );
    }

    let output = match format {
        OutputFormat::Table => render_table(&report),
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
    };
    println!("{}", output);
    Ok(())
}

/// Evaluate the configured calibrator against `series`.
pub fn build_report(settings: &CalibrationSettings, series: &PriceSeries) -> Result<InspectReport> {
    if series.len() < 2 {
        return Err(CliError::InsufficientData {
            required: 2,
            found: series.len(),
        });
    }

    let calibrator = settings.build_calibrator()?;
    let params = calibrator.model().params();
    let dt = calibrator.time_step().value();
    let x0 = calibrator.initial_state();

    let returns = series.log_returns();
    let mean_residual = returns
        .iter()
        .map(|z| calibrator.observation_residual(&x0, *z))
        .sum::<f64>()
        / returns.len() as f64;
    let realized_variance = series
        .realized_variance(dt)
        .ok_or(CliError::InsufficientData {
            required: 2,
            found: series.len(),
        })?;

    Ok(InspectReport {
        symbol: settings.symbol.clone(),
        model: calibrator.model().model_name(),
        frequency: settings.frequency,
        dt,
        initial_state: x0.to_array(),
        predicted_state: calibrator.predict(&x0).to_array(),
        jacobian: *calibrator.jacobian(&x0).rows(),
        process_noise: *calibrator.process_noise(&x0).rows(),
        feller_ratio: params.feller_ratio(),
        feller_satisfied: params.satisfies_feller(),
        observations: returns.len(),
        initial_variance: x0.variance,
        realized_variance,
        mean_residual,
    })
}

/// Key/value text rendering of a report.
pub fn render_table(report: &InspectReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<20} {}", "symbol", report.symbol);
    let _ = writeln!(out, "{:<20} {}", "model", report.model);
    let _ = writeln!(out, "{:<20} {}", "frequency", report.frequency);
    let _ = writeln!(out, "{:<20} {:.6e}", "dt", report.dt);
    let _ = writeln!(out, "{:<20} {}", "x0", pair(&report.initial_state));
    let _ = writeln!(out, "{:<20} {}", "predict(x0)", pair(&report.predicted_state));
    let _ = writeln!(out, "{:<20} {}", "jacobian", pair(&report.jacobian[0]));
    let _ = writeln!(out, "{:<20} {}", "", pair(&report.jacobian[1]));
    let _ = writeln!(out, "{:<20} {}", "process_noise", pair(&report.process_noise[0]));
    let _ = writeln!(out, "{:<20} {}", "", pair(&report.process_noise[1]));
    let _ = writeln!(
        out,
        "{:<20} {:.4} ({})",
        "feller_ratio",
        report.feller_ratio,
        if report.feller_satisfied { "satisfied" } else { "violated" }
    );
    let _ = writeln!(out, "{:<20} {}", "observations", report.observations);
    let _ = writeln!(out, "{:<20} {:.6}", "initial_variance", report.initial_variance);
    let _ = writeln!(out, "{:<20} {:.6}", "realized_variance", report.realized_variance);
    let _ = write!(out, "{:<20} {:.6e}", "mean_residual", report.mean_residual);
    out
}

fn pair(values: &[f64; 2]) -> String {
    format!("[{:>14.6e}, {:>14.6e}]", values[0], values[1])
}
