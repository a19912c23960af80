//! Error types for model construction.
//!
//! All failures in the model layer happen at construction time: once a model
//! and its time step exist, prediction and linearisation are total functions.

use thiserror::Error;

/// Model construction errors.
///
/// # Variants
/// - `InvalidParameter`: a rate is negative, a correlation lies outside
///   `[-1, 1]`, or a value is not finite
/// - `InvalidTimeStep`: the discretisation interval is not strictly positive
/// - `UnknownFrequency`: a sampling-frequency label could not be parsed
/// - `UnknownModel`: a model name could not be resolved
///
/// # Examples
/// ```
/// use volcal_core::types::ModelError;
///
/// let err = ModelError::invalid_parameter("kappa", -1.0);
/// assert_eq!(format!("{}", err), "Invalid parameter: kappa = -1");
///
/// let err = ModelError::InvalidTimeStep(0.0);
/// assert!(format!("{}", err).contains("dt = 0"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A model parameter violated its domain.
    #[error("Invalid parameter: {name} = {value}")]
    InvalidParameter {
        /// Parameter name (`kappa`, `theta`, `sigma`, `rho`, ...)
        name: &'static str,
        /// Offending value
        value: f64,
    },

    /// The time step is zero, negative or not finite.
    #[error("Invalid time step: dt = {0} (must be positive and finite)")]
    InvalidTimeStep(f64),

    /// Unrecognised sampling-frequency label.
    #[error("Unknown sampling frequency: {0}")]
    UnknownFrequency(String),

    /// Unrecognised model name.
    #[error("Unknown model: {0}")]
    UnknownModel(String),
}

impl ModelError {
    /// Create an `InvalidParameter` error.
    pub fn invalid_parameter(name: &'static str, value: f64) -> Self {
        ModelError::InvalidParameter { name, value }
    }

    /// Whether this error came from a parameter domain check.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, ModelError::InvalidParameter { .. })
    }

    /// Whether this error came from the time-step check.
    pub fn is_invalid_time_step(&self) -> bool {
        matches!(self, ModelError::InvalidTimeStep(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_display() {
        let err = ModelError::invalid_parameter("rho", 1.5);
        assert_eq!(format!("{}", err), "Invalid parameter: rho = 1.5");
        assert!(err.is_invalid_parameter());
        assert!(!err.is_invalid_time_step());
    }

    #[test]
    fn test_invalid_time_step_display() {
        let err = ModelError::InvalidTimeStep(-0.01);
        assert_eq!(
            format!("{}", err),
            "Invalid time step: dt = -0.01 (must be positive and finite)"
        );
        assert!(err.is_invalid_time_step());
    }

    #[test]
    fn test_unknown_labels_display() {
        assert_eq!(
            format!("{}", ModelError::UnknownFrequency("2hour".to_string())),
            "Unknown sampling frequency: 2hour"
        );
        assert_eq!(
            format!("{}", ModelError::UnknownModel("bates".to_string())),
            "Unknown model: bates"
        );
    }

    #[test]
    fn test_error_is_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>(_: &E) {}
        assert_error(&ModelError::InvalidTimeStep(0.0));
    }
}
