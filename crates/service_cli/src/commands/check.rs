//! Check command implementation
//!
//! Resolves settings, builds the configured model and prints the result.

use tracing::{info, warn};
use volcal_models::models::StateSpaceModel;

use crate::config::{CalibrationSettings, ENV_KEYS};
use crate::Result;

/// Run the check command
pub fn run(settings: &CalibrationSettings) -> Result<()> {
    let overrides: Vec<&str> = ENV_KEYS
        .iter()
        .copied()
        .filter(|key| std::env::var_os(key).is_some())
        .collect();
    if !overrides.is_empty() {
        info!(?overrides, "Environment overrides active");
    }

    let summary = summarise(settings)?;
    print!("{}", summary);
    Ok(())
}

/// Resolved settings as TOML followed by model diagnostics.
pub fn summarise(settings: &CalibrationSettings) -> Result<String> {
    let calibrator = settings.build_calibrator()?;
    let params = calibrator.model().params();

    info!(
        model = calibrator.model().model_name(),
        dt = calibrator.time_step().value(),
        "Model construction succeeded"
    );
    if !params.satisfies_feller() {
        warn!(
            feller_ratio = params.feller_ratio(),
            "Feller condition violated; variance can reach zero"
        );
    }

    let resolved = toml::to_string(settings)
        .map_err(|e| crate::CliError::InvalidArgument(e.to_string()))?;

    Ok(format!(
        "{}\n# model: {}\n# dt: {:.6e}\n# theta: {}\n# feller_ratio: {:.4}\n",
        resolved,
        calibrator.model().model_name(),
        calibrator.time_step().value(),
        params.theta(),
        params.feller_ratio()
    ))
}
