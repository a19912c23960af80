//! Heston stochastic-volatility model in discrete state-space form.
//!
//! The continuous dynamics
//! ```text
//! dv = kappa * (theta - v) * dt + sigma * sqrt(v) * dW_v
//! dx = -0.5 * v * dt + sqrt(v) * dW_x,     E[dW_v dW_x] = rho * dt
//! ```
//! are discretised with one Euler step. The drift gives the predicted mean
//! ```text
//! predict(v, a) = ( v + kappa * (theta - v) * dt,  -0.5 * v * dt )
//! ```
//! whose Jacobian with respect to `(v, a)` is constant:
//! ```text
//! [[ 1 - kappa * dt, 0 ],
//!  [ -0.5 * dt,      0 ]]
//! ```
//! The diffusion terms do not enter the mean. They become the process-noise
//! covariance, evaluated at `v⁺ = max(v, 0)`:
//! ```text
//! Q = [[ sigma² v⁺ dt,       rho sigma v⁺ dt ],
//!      [ rho sigma v⁺ dt,    v⁺ dt           ]]
//! ```
//! so `sigma` and `rho` reach the filter only through `Q`. Adding higher-order
//! terms to `predict` requires re-deriving the Jacobian.
//!
//! ## Example
//!
//! ```
//! use volcal_models::models::{HestonModel, ModelParameters, StateSpaceModel};
//! use volcal_core::types::TimeStep;
//!
//! let params = ModelParameters::from_initial_volatility(0.5_f64).unwrap();
//! let dt = TimeStep::new(1.0 / 8760.0).unwrap();
//! let model = HestonModel::new(params, dt);
//!
//! let x0 = model.initial_state(0.5);
//! let x1 = model.predict(&x0);
//! assert_eq!(x1.variance, 0.25);
//! assert_eq!(x1.auxiliary, -0.5 * 0.25 * (1.0 / 8760.0));
//! ```

use volcal_core::math::Matrix2;
use volcal_core::traits::{constant, Float};
use volcal_core::types::{ModelError, TimeStep};

use super::params::ModelParameters;
use super::state::VarianceState;
use super::state_space::StateSpaceModel;

/// Heston model bound to a fixed time step.
///
/// Immutable after construction. The Jacobian depends only on `kappa` and
/// `dt`, so it is computed once here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HestonModel<T: Float> {
    params: ModelParameters<T>,
    dt: TimeStep<T>,
    jacobian: Matrix2<T>,
}

impl<T: Float> HestonModel<T> {
    /// Create a model from validated parameters and time step.
    pub fn new(params: ModelParameters<T>, dt: TimeStep<T>) -> Self {
        Self {
            params,
            dt,
            jacobian: drift_jacobian(params.kappa(), dt.value()),
        }
    }

    /// Create a model from raw values.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` for a negative rate or `rho` outside `[-1, 1]`
    /// - `InvalidTimeStep` for `dt <= 0`
    ///
    /// ```
    /// use volcal_models::models::HestonModel;
    ///
    /// assert!(HestonModel::try_new(1.0_f64, 0.25, 0.5, Some(-0.3), 1.0 / 8760.0).is_ok());
    /// assert!(HestonModel::try_new(1.0_f64, 0.25, 0.5, Some(1.5), 1.0 / 8760.0).is_err());
    /// assert!(HestonModel::try_new(1.0_f64, 0.25, 0.5, None, 0.0).is_err());
    /// ```
    pub fn try_new(
        kappa: T,
        theta: T,
        sigma: T,
        rho: Option<T>,
        dt: T,
    ) -> Result<Self, ModelError> {
        let mut params = ModelParameters::new(kappa, theta, sigma)?;
        if let Some(rho) = rho {
            params = params.with_rho(rho)?;
        }
        let dt = TimeStep::new(dt)?;
        Ok(Self::new(params, dt))
    }
}

impl<T: Float> StateSpaceModel<T> for HestonModel<T> {
    fn predict(&self, state: &VarianceState<T>) -> VarianceState<T> {
        let dt = self.dt.value();
        let kappa = self.params.kappa();
        let theta = self.params.theta();
        let v = state.variance;

        let neg_half: T = constant(-0.5);
        VarianceState::new(v + kappa * (theta - v) * dt, neg_half * v * dt)
    }

    /// Constant: `state` is ignored.
    fn jacobian(&self, _state: &VarianceState<T>) -> Matrix2<T> {
        self.jacobian
    }

    fn process_noise(&self, state: &VarianceState<T>) -> Matrix2<T> {
        let sigma = self.params.sigma();
        let rho = self.params.rho_or_zero();
        let scale = state.variance.max(T::zero()) * self.dt.value();

        let cross = rho * sigma * scale;
        Matrix2::new([[sigma * sigma * scale, cross], [cross, scale]])
    }

    fn params(&self) -> &ModelParameters<T> {
        &self.params
    }

    fn time_step(&self) -> TimeStep<T> {
        self.dt
    }

    fn model_name(&self) -> &'static str {
        "Heston"
    }
}

fn drift_jacobian<T: Float>(kappa: T, dt: T) -> Matrix2<T> {
    let neg_half: T = constant(-0.5);
    Matrix2::new([
        [T::one() - kappa * dt, T::zero()],
        [neg_half * dt, T::zero()],
    ])
}
