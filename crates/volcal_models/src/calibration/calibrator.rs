//! State-space calibrator: a model plus its initial state guess.
//!
//! The calibrator is what a recursive filter or a likelihood optimiser holds
//! on to. It answers `predict`, `jacobian` and `process_noise` for whatever
//! state the caller passes in and never advances anything itself.

use volcal_core::math::Matrix2;
use volcal_core::traits::Float;
use volcal_core::types::{ModelError, TimeStep};

use crate::models::{HestonModel, ModelParameters, StateSpaceModel, VarianceState};

/// Passive model-evaluation service for a filter loop.
///
/// # Type Parameters
///
/// * `T` - Float type
/// * `M` - Model implementing [`StateSpaceModel`]
///
/// # Examples
///
/// ```
/// use volcal_models::calibration::StateSpaceCalibrator;
/// use volcal_models::models::VarianceState;
///
/// let calibrator = StateSpaceCalibrator::heston(1.0_f64 / 8760.0, 0.5).unwrap();
/// assert_eq!(calibrator.initial_state(), VarianceState::new(0.25, 0.0));
///
/// let x1 = calibrator.predict(&calibrator.initial_state());
/// assert_eq!(x1.variance, 0.25);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StateSpaceCalibrator<T: Float, M: StateSpaceModel<T>> {
    model: M,
    x0: VarianceState<T>,
}

impl<T: Float, M: StateSpaceModel<T>> StateSpaceCalibrator<T, M> {
    /// Wrap a model, seeding the initial state from a guessed volatility.
    pub fn new(model: M, initial_volatility: T) -> Self {
        let x0 = model.initial_state(initial_volatility);
        Self { model, x0 }
    }

    /// Wrap a model with an explicit initial state.
    pub fn with_initial_state(model: M, x0: VarianceState<T>) -> Self {
        Self { model, x0 }
    }

    /// The initial state `x0`.
    #[inline]
    pub fn initial_state(&self) -> VarianceState<T> {
        self.x0
    }

    /// One-step-ahead mean of `state`.
    #[inline]
    pub fn predict(&self, state: &VarianceState<T>) -> VarianceState<T> {
        self.model.predict(state)
    }

    /// Jacobian of [`predict`](Self::predict) at `state`.
    #[inline]
    pub fn jacobian(&self, state: &VarianceState<T>) -> Matrix2<T> {
        self.model.jacobian(state)
    }

    /// Process-noise covariance at `state`.
    #[inline]
    pub fn process_noise(&self, state: &VarianceState<T>) -> Matrix2<T> {
        self.model.process_noise(state)
    }

    /// Predicted mean of the next log-return observation.
    #[inline]
    pub fn predicted_observation(&self, state: &VarianceState<T>) -> T {
        self.model.predicted_observation(state)
    }

    /// Observed minus predicted log-return.
    #[inline]
    pub fn observation_residual(&self, state: &VarianceState<T>, observed: T) -> T {
        observed - self.predicted_observation(state)
    }

    /// Discretisation step.
    #[inline]
    pub fn time_step(&self) -> TimeStep<T> {
        self.model.time_step()
    }

    /// Borrow the wrapped model.
    #[inline]
    pub fn model(&self) -> &M {
        &self.model
    }
}

impl<T: Float> StateSpaceCalibrator<T, HestonModel<T>> {
    /// Heston calibrator with parameters seeded from a guessed volatility.
    ///
    /// `kappa = 1`, `theta = initial_volatility²`, `sigma = initial_volatility`
    /// and `x0 = (theta, 0)`.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if `initial_volatility` is negative or not finite
    /// - `InvalidTimeStep` if `dt <= 0`
    pub fn heston(dt: T, initial_volatility: T) -> Result<Self, ModelError> {
        let params = ModelParameters::from_initial_volatility(initial_volatility)?;
        let dt = TimeStep::new(dt)?;
        Ok(Self::new(HestonModel::new(params, dt), initial_volatility))
    }
}
