//! Stochastic-volatility model parameters.
//!
//! Variance follows a mean-reverting square-root diffusion correlated with
//! the log-price:
//! ```text
//! dv = kappa * (theta - v) * dt + sigma * sqrt(v) * dW_v
//! dx = -0.5 * v * dt + sqrt(v) * dW_x
//! E[dW_v * dW_x] = rho * dt
//! ```
//! All rates are expressed per unit of the same time base as `dt`
//! (per year for the annualised steps of `SamplingFrequency`).
//!
//! ## Feller Condition
//!
//! The continuous-time variance stays strictly positive when
//! ```text
//! 2 * kappa * theta >= sigma^2
//! ```
//! This is reported for diagnostics only; the discrete model is defined
//! regardless.

use volcal_core::traits::{constant, to_f64, Float};
use volcal_core::types::ModelError;

/// Immutable parameter set `(kappa, theta, sigma, rho)`.
///
/// # Fields
///
/// * `kappa` - Mean reversion speed (`>= 0`)
/// * `theta` - Long-run variance level (`>= 0`)
/// * `sigma` - Volatility of variance (`>= 0`)
/// * `rho` - Optional leverage correlation (`-1 <= rho <= 1`)
///
/// # Examples
///
/// ```
/// use volcal_models::models::ModelParameters;
///
/// let params = ModelParameters::new(1.5_f64, 0.04, 0.3)
///     .unwrap()
///     .with_rho(-0.7)
///     .unwrap();
/// assert_eq!(params.rho(), Some(-0.7));
///
/// assert!(ModelParameters::new(-1.0_f64, 0.04, 0.3).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ModelParameters<T: Float> {
    kappa: T,
    theta: T,
    sigma: T,
    rho: Option<T>,
}

impl<T: Float> ModelParameters<T> {
    /// Create parameters without leverage correlation.
    ///
    /// # Errors
    ///
    /// `ModelError::InvalidParameter` if `kappa`, `theta` or `sigma` is
    /// negative or not finite.
    pub fn new(kappa: T, theta: T, sigma: T) -> Result<Self, ModelError> {
        let params = Self {
            kappa,
            theta,
            sigma,
            rho: None,
        };
        params.validate()?;
        Ok(params)
    }

    /// Default parameters seeded from a guessed volatility.
    ///
    /// `kappa = 1`, `theta = initial_volatility²`, `sigma = initial_volatility`,
    /// no correlation.
    ///
    /// ```
    /// use volcal_models::models::ModelParameters;
    ///
    /// let params = ModelParameters::from_initial_volatility(0.5_f64).unwrap();
    /// assert_eq!(params.kappa(), 1.0);
    /// assert_eq!(params.theta(), 0.25);
    /// assert_eq!(params.sigma(), 0.5);
    /// ```
    pub fn from_initial_volatility(initial_volatility: T) -> Result<Self, ModelError> {
        if !initial_volatility.is_finite() || initial_volatility < T::zero() {
            return Err(ModelError::invalid_parameter(
                "initial_volatility",
                to_f64(initial_volatility),
            ));
        }
        Self::new(
            T::one(),
            initial_volatility * initial_volatility,
            initial_volatility,
        )
    }

    /// Return a copy with leverage correlation `rho`.
    ///
    /// # Errors
    ///
    /// `ModelError::InvalidParameter` if `rho` lies outside `[-1, 1]` or is NaN.
    pub fn with_rho(self, rho: T) -> Result<Self, ModelError> {
        let params = Self {
            rho: Some(rho),
            ..self
        };
        params.validate()?;
        Ok(params)
    }

    /// Return a copy with a different volatility of variance.
    pub fn with_sigma(self, sigma: T) -> Result<Self, ModelError> {
        let params = Self { sigma, ..self };
        params.validate()?;
        Ok(params)
    }

    /// Check every parameter against its domain.
    pub fn validate(&self) -> Result<(), ModelError> {
        check_non_negative("kappa", self.kappa)?;
        check_non_negative("theta", self.theta)?;
        check_non_negative("sigma", self.sigma)?;

        if let Some(rho) = self.rho {
            let one = T::one();
            // NaN is outside every range
            if !(-one..=one).contains(&rho) {
                return Err(ModelError::invalid_parameter("rho", to_f64(rho)));
            }
        }

        Ok(())
    }

    /// Mean reversion speed.
    #[inline]
    pub fn kappa(&self) -> T {
        self.kappa
    }

    /// Long-run variance.
    #[inline]
    pub fn theta(&self) -> T {
        self.theta
    }

    /// Volatility of variance.
    #[inline]
    pub fn sigma(&self) -> T {
        self.sigma
    }

    /// Leverage correlation, if set.
    #[inline]
    pub fn rho(&self) -> Option<T> {
        self.rho
    }

    /// Leverage correlation, zero when unset.
    #[inline]
    pub fn rho_or_zero(&self) -> T {
        self.rho.unwrap_or_else(T::zero)
    }

    /// Check the Feller condition `2 * kappa * theta >= sigma^2`.
    ///
    /// ```
    /// use volcal_models::models::ModelParameters;
    ///
    /// // 2 * 1.5 * 0.04 = 0.12 >= 0.3^2 = 0.09
    /// assert!(ModelParameters::new(1.5_f64, 0.04, 0.3).unwrap().satisfies_feller());
    ///
    /// // 2 * 0.5 * 0.04 = 0.04 < 0.5^2 = 0.25
    /// assert!(!ModelParameters::new(0.5_f64, 0.04, 0.5).unwrap().satisfies_feller());
    /// ```
    pub fn satisfies_feller(&self) -> bool {
        let two: T = constant(2.0);
        two * self.kappa * self.theta >= self.sigma * self.sigma
    }

    /// Feller ratio `2 * kappa * theta / sigma^2` (infinite when `sigma = 0`).
    pub fn feller_ratio(&self) -> T {
        let two: T = constant(2.0);
        let numerator = two * self.kappa * self.theta;
        let denominator = self.sigma * self.sigma;
        if denominator > T::zero() {
            numerator / denominator
        } else {
            T::infinity()
        }
    }
}

impl<T: Float> Default for ModelParameters<T> {
    /// `kappa = 1`, `theta = 0.25`, `sigma = 0.5`, no correlation
    /// (the parameters seeded by a 50% initial volatility).
    fn default() -> Self {
        Self {
            kappa: T::one(),
            theta: constant(0.25),
            sigma: constant(0.5),
            rho: None,
        }
    }
}

fn check_non_negative<T: Float>(name: &'static str, value: T) -> Result<(), ModelError> {
    if !value.is_finite() || value < T::zero() {
        return Err(ModelError::invalid_parameter(name, to_f64(value)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_valid() {
        let p = ModelParameters::new(2.0_f64, 0.09, 0.4).unwrap();
        assert_eq!(p.kappa(), 2.0);
        assert_eq!(p.theta(), 0.09);
        assert_eq!(p.sigma(), 0.4);
        assert_eq!(p.rho(), None);
        assert_eq!(p.rho_or_zero(), 0.0);
    }

    #[test]
    fn test_zero_values_accepted() {
        // kappa = 0 switches off mean reversion, still a valid model
        assert!(ModelParameters::new(0.0_f64, 0.0, 0.0).is_ok());
    }

    #[test]
    fn test_negative_kappa_rejected() {
        assert_eq!(
            ModelParameters::new(-1.0_f64, 0.25, 0.5),
            Err(ModelError::invalid_parameter("kappa", -1.0))
        );
    }

    #[test]
    fn test_negative_theta_rejected() {
        assert_eq!(
            ModelParameters::new(1.0_f64, -0.01, 0.5),
            Err(ModelError::invalid_parameter("theta", -0.01))
        );
    }

    #[test]
    fn test_negative_sigma_rejected() {
        assert_eq!(
            ModelParameters::new(1.0_f64, 0.25, -0.2),
            Err(ModelError::invalid_parameter("sigma", -0.2))
        );
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(ModelParameters::new(f64::NAN, 0.25, 0.5)
            .unwrap_err()
            .is_invalid_parameter());
        assert!(ModelParameters::new(1.0, f64::INFINITY, 0.5)
            .unwrap_err()
            .is_invalid_parameter());
    }

    #[test]
    fn test_rho_bounds() {
        let base = ModelParameters::<f64>::default();
        assert!(base.with_rho(-1.0).is_ok());
        assert!(base.with_rho(1.0).is_ok());
        assert!(base.with_rho(0.0).is_ok());
        assert_eq!(
            base.with_rho(1.5),
            Err(ModelError::invalid_parameter("rho", 1.5))
        );
        assert!(base.with_rho(-1.01).is_err());
        assert!(base.with_rho(f64::NAN).is_err());
    }

    #[test]
    fn test_with_rho_does_not_mutate_original() {
        let base = ModelParameters::<f64>::default();
        let correlated = base.with_rho(-0.5).unwrap();
        assert_eq!(base.rho(), None);
        assert_eq!(correlated.rho(), Some(-0.5));
        assert_eq!(correlated.rho_or_zero(), -0.5);
    }

    #[test]
    fn test_with_sigma() {
        let p = ModelParameters::<f64>::default().with_sigma(0.8).unwrap();
        assert_eq!(p.sigma(), 0.8);
        assert!(ModelParameters::<f64>::default().with_sigma(-0.1).is_err());
    }

    #[test]
    fn test_from_initial_volatility() {
        let p = ModelParameters::from_initial_volatility(0.5_f64).unwrap();
        assert_eq!(p, ModelParameters::default());

        let p = ModelParameters::from_initial_volatility(0.2_f64).unwrap();
        assert_relative_eq!(p.theta(), 0.04, epsilon = 1e-15);

        assert_eq!(
            ModelParameters::from_initial_volatility(-0.1_f64),
            Err(ModelError::invalid_parameter("initial_volatility", -0.1))
        );
    }

    #[test]
    fn test_feller_ratio() {
        let p = ModelParameters::new(1.5_f64, 0.04, 0.3).unwrap();
        assert_relative_eq!(p.feller_ratio(), 0.12 / 0.09, epsilon = 1e-12);
        assert!(p.satisfies_feller());

        let no_vol = ModelParameters::new(1.5_f64, 0.04, 0.0).unwrap();
        assert!(no_vol.feller_ratio().is_infinite());
        assert!(no_vol.satisfies_feller());
    }
}
