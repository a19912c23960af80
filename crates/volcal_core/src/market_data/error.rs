//! Market data error types.

use thiserror::Error;

/// Errors raised while validating an observed price series.
///
/// # Examples
/// ```
/// use volcal_core::market_data::MarketDataError;
///
/// let err = MarketDataError::InvalidPrice { index: 3, value: -1.0 };
/// assert!(format!("{}", err).contains("index 3"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// A close is zero, negative or not finite.
    #[error("Invalid price at index {index}: {value} (must be positive and finite)")]
    InvalidPrice {
        /// Position in the series
        index: usize,
        /// Offending close
        value: f64,
    },

    /// A timestamp is not strictly after its predecessor.
    #[error("Timestamps must be strictly increasing (violated at index {index})")]
    UnorderedTimestamps {
        /// Position of the first out-of-order observation
        index: usize,
    },

    /// Timestamp and close vectors differ in length.
    #[error("Length mismatch: {timestamps} timestamps, {closes} closes")]
    LengthMismatch {
        /// Number of timestamps
        timestamps: usize,
        /// Number of closes
        closes: usize,
    },
}
