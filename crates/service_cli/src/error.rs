//! Error types for CLI operations.

use thiserror::Error;
use volcal_core::market_data::MarketDataError;
use volcal_core::types::ModelError;

use crate::config::ConfigError;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Not enough observations for the requested operation
    #[error("Insufficient data: need at least {required} prices, found {found}")]
    InsufficientData {
        /// Minimum number of prices
        required: usize,
        /// Prices available
        found: usize,
    },

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Model construction error
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Price series validation error
    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),

    /// CSV read/write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialisation error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CliError::FileNotFound("prices.csv".to_string());
        assert_eq!(err.to_string(), "File not found: prices.csv");

        let err = CliError::InsufficientData {
            required: 2,
            found: 1,
        };
        assert!(err.to_string().contains("at least 2"));
    }

    #[test]
    fn test_model_error_conversion() {
        let err: CliError = ModelError::InvalidTimeStep(0.0).into();
        assert!(matches!(err, CliError::Model(ModelError::InvalidTimeStep(_))));
        assert!(err.to_string().starts_with("Model error"));
    }

    #[test]
    fn test_market_data_error_conversion() {
        let err: CliError = MarketDataError::UnorderedTimestamps { index: 3 }.into();
        assert!(matches!(err, CliError::MarketData(_)));
    }
}
