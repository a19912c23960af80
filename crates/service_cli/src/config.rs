//! Calibration settings management
//!
//! Handles loading settings from TOML files, `VOLCAL_*` environment variables
//! and CLI arguments.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use volcal_core::types::{ModelError, SamplingFrequency, TimeStep};
use volcal_models::calibration::StateSpaceCalibrator;
use volcal_models::models::{ModelKind, ModelParameters, VolatilityModelEnum};

/// Environment variables read by [`CalibrationSettings::apply_env`].
pub const ENV_KEYS: [&str; 8] = [
    "VOLCAL_MODEL",
    "VOLCAL_FREQUENCY",
    "VOLCAL_INITIAL_VOLATILITY",
    "VOLCAL_KAPPA",
    "VOLCAL_SIGMA",
    "VOLCAL_RHO",
    "VOLCAL_LOG_LEVEL",
    "VOLCAL_SYMBOL",
];

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Invalid model configuration: {0}")]
    Model(#[from] ModelError),
}

/// Log levels accepted by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Settings for building a calibrator.
///
/// `theta` is not configurable: it is seeded as `initial_volatility²`, and
/// the initial state sits at that level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationSettings {
    /// Model family
    #[serde(deserialize_with = "deserialize_from_str")]
    pub model: ModelKind,
    /// Sampling frequency of the observed prices
    #[serde(deserialize_with = "deserialize_from_str")]
    pub frequency: SamplingFrequency,
    /// Guessed annualised volatility
    pub initial_volatility: f64,
    /// Mean reversion speed
    pub kappa: f64,
    /// Volatility of variance (defaults to `initial_volatility`)
    pub sigma: Option<f64>,
    /// Leverage correlation (Heston only)
    pub rho: Option<f64>,
    /// Log level
    #[serde(deserialize_with = "deserialize_from_str")]
    pub log_level: LogLevel,
    /// Instrument symbol, used for labelling and source lookup
    pub symbol: String,
}

fn deserialize_from_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let s = String::deserialize(deserializer)?;
    T::from_str(&s).map_err(serde::de::Error::custom)
}

fn parse_value<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

impl Default for CalibrationSettings {
    fn default() -> Self {
        Self {
            model: ModelKind::Heston,
            frequency: SamplingFrequency::OneHour,
            initial_volatility: 0.5,
            kappa: 1.0,
            sigma: None,
            rho: None,
            log_level: LogLevel::Info,
            symbol: "BTCUSD".to_string(),
        }
    }
}

impl CalibrationSettings {
    /// Load settings from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Override fields from `VOLCAL_*` variables supplied by `lookup`.
    ///
    /// `lookup` is `std::env::var(..).ok()` in production; tests pass a map.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("VOLCAL_MODEL") {
            self.model = v.parse()?;
        }
        if let Some(v) = lookup("VOLCAL_FREQUENCY") {
            self.frequency = v.parse()?;
        }
        if let Some(v) = lookup("VOLCAL_INITIAL_VOLATILITY") {
            self.initial_volatility = parse_value("VOLCAL_INITIAL_VOLATILITY", &v)?;
        }
        if let Some(v) = lookup("VOLCAL_KAPPA") {
            self.kappa = parse_value("VOLCAL_KAPPA", &v)?;
        }
        if let Some(v) = lookup("VOLCAL_SIGMA") {
            self.sigma = Some(parse_value("VOLCAL_SIGMA", &v)?);
        }
        if let Some(v) = lookup("VOLCAL_RHO") {
            self.rho = Some(parse_value("VOLCAL_RHO", &v)?);
        }
        if let Some(v) = lookup("VOLCAL_LOG_LEVEL") {
            self.log_level = v.parse()?;
        }
        if let Some(v) = lookup("VOLCAL_SYMBOL") {
            self.symbol = v;
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(model) = &cli.model {
            self.model = model.parse()?;
        }
        if let Some(frequency) = &cli.frequency {
            self.frequency = frequency.parse()?;
        }
        if let Some(iv) = cli.initial_volatility {
            self.initial_volatility = iv;
        }
        if let Some(symbol) = &cli.symbol {
            self.symbol = symbol.clone();
        }
        if let Some(log_level) = &cli.log_level {
            self.log_level = log_level.parse()?;
        } else if cli.verbose {
            self.log_level = LogLevel::Debug;
        }
        Ok(())
    }

    /// Validate the settings by constructing the model they describe.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.initial_volatility.is_finite() || self.initial_volatility <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "initial_volatility",
                value: self.initial_volatility.to_string(),
            });
        }
        if self.symbol.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "symbol",
                value: self.symbol.clone(),
            });
        }
        self.build_model()?;
        Ok(())
    }

    /// Annualised time step of the configured frequency.
    pub fn time_step(&self) -> TimeStep<f64> {
        TimeStep::from_frequency(self.frequency)
    }

    /// Model parameters: `theta = initial_volatility²`, `sigma` defaulting to
    /// `initial_volatility`.
    pub fn parameters(&self) -> Result<ModelParameters<f64>, ModelError> {
        let iv = self.initial_volatility;
        let params = ModelParameters::new(self.kappa, iv * iv, self.sigma.unwrap_or(iv))?;
        match self.rho {
            Some(rho) => params.with_rho(rho),
            None => Ok(params),
        }
    }

    /// Build the configured model.
    pub fn build_model(&self) -> Result<VolatilityModelEnum<f64>, ModelError> {
        VolatilityModelEnum::build(self.model, self.parameters()?, self.time_step())
    }

    /// Build a calibrator seeded at `initial_volatility`.
    pub fn build_calibrator(
        &self,
    ) -> Result<StateSpaceCalibrator<f64, VolatilityModelEnum<f64>>, ModelError> {
        Ok(StateSpaceCalibrator::new(
            self.build_model()?,
            self.initial_volatility,
        ))
    }
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<String>,
    /// Raise the default log level to debug
    pub verbose: bool,
    /// Model override
    pub model: Option<String>,
    /// Frequency override
    pub frequency: Option<String>,
    /// Initial volatility override
    pub initial_volatility: Option<f64>,
    /// Symbol override
    pub symbol: Option<String>,
}

/// Build settings from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_settings(cli: &CliArgs) -> Result<CalibrationSettings, ConfigError> {
    build_settings_with_env(cli, |key| std::env::var(key).ok())
}

/// [`build_settings`] with an explicit environment lookup.
pub fn build_settings_with_env<F>(cli: &CliArgs, lookup: F) -> Result<CalibrationSettings, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = match &cli.config_file {
        Some(path) => CalibrationSettings::from_file(path)?,
        None => CalibrationSettings::default(),
    };

    settings.apply_env(lookup)?;
    settings.merge_with_cli(cli)?;
    settings.validate()?;

    Ok(settings)
}
