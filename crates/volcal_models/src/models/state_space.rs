//! Capability interface consumed by Kalman-family filters.
//!
//! A filter holding a state estimate `x` and covariance `P` needs, per step:
//! - the predicted mean `f(x)` ([`StateSpaceModel::predict`])
//! - the Jacobian `F = ∂f/∂x` ([`StateSpaceModel::jacobian`])
//! - the process-noise covariance `Q` ([`StateSpaceModel::process_noise`])
//!
//! and forms `P⁻ = F P Fᵀ + Q`. The model never drives the loop; it is a
//! passive, stateless evaluation service.
//!
//! ## Static dispatch
//!
//! Alternative variance models are selected through
//! [`VolatilityModelEnum`](super::VolatilityModelEnum), not `Box<dyn ...>`.

use volcal_core::math::Matrix2;
use volcal_core::traits::Float;
use volcal_core::types::TimeStep;

use super::params::ModelParameters;
use super::state::VarianceState;

/// Discrete-time transition model over `(variance, auxiliary)` states.
///
/// # Contract
///
/// - All methods are pure: no interior mutability, identical inputs give
///   bit-identical outputs, so a model over `f64` can be shared across
///   threads without synchronisation.
/// - `predict`, `jacobian` and `process_noise` are total over real inputs,
///   including negative variance. They never clamp.
/// - `jacobian(x)` is the exact derivative of `predict` at `x`.
pub trait StateSpaceModel<T: Float> {
    /// One-step-ahead mean of the state.
    fn predict(&self, state: &VarianceState<T>) -> VarianceState<T>;

    /// Partial derivatives of [`predict`](Self::predict) with respect to
    /// `(variance, auxiliary)`.
    fn jacobian(&self, state: &VarianceState<T>) -> Matrix2<T>;

    /// Covariance of the one-step increment, evaluated at `max(variance, 0)`.
    fn process_noise(&self, state: &VarianceState<T>) -> Matrix2<T>;

    /// Model parameters.
    fn params(&self) -> &ModelParameters<T>;

    /// Discretisation step.
    fn time_step(&self) -> TimeStep<T>;

    /// Model name for logging and reports.
    fn model_name(&self) -> &'static str;

    /// Initial state seeded from a guessed volatility: `(guess², 0)`.
    fn initial_state(&self, initial_volatility: T) -> VarianceState<T> {
        VarianceState::new(initial_volatility * initial_volatility, T::zero())
    }

    /// Predicted mean of the observed log-return, `h(x) = predict(x).auxiliary`.
    fn predicted_observation(&self, state: &VarianceState<T>) -> T {
        self.predict(state).auxiliary
    }
}
