//! Cox-Ingersoll-Ross variance model without leverage.
//!
//! Variance follows the same square-root diffusion as Heston,
//! ```text
//! dv = kappa * (theta - v) * dt + sigma * sqrt(v) * dW
//! ```
//! but the observable carries no convexity drift and no correlation, which
//! suits de-meaned return series. In state-space form:
//! ```text
//! predict(v, a) = ( v + kappa * (theta - v) * dt, 0 )
//! jacobian      = [[ 1 - kappa * dt, 0 ], [ 0, 0 ]]
//! Q             = [[ sigma² v⁺ dt, 0 ], [ 0, 0 ]]
//! ```

use volcal_core::math::Matrix2;
use volcal_core::traits::{to_f64, Float};
use volcal_core::types::{ModelError, TimeStep};

use super::params::ModelParameters;
use super::state::VarianceState;
use super::state_space::StateSpaceModel;

/// CIR variance model bound to a fixed time step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CirModel<T: Float> {
    params: ModelParameters<T>,
    dt: TimeStep<T>,
    jacobian: Matrix2<T>,
}

impl<T: Float> CirModel<T> {
    /// Create a model from validated parameters and time step.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `params` carries a leverage correlation, which
    /// this model has no term for.
    ///
    /// ```
    /// use volcal_core::types::TimeStep;
    /// use volcal_models::models::{CirModel, ModelParameters};
    ///
    /// let dt = TimeStep::new(1.0_f64 / 365.0).unwrap();
    /// let params = ModelParameters::new(2.0, 0.04, 0.3).unwrap();
    /// assert!(CirModel::new(params, dt).is_ok());
    /// assert!(CirModel::new(params.with_rho(-0.5).unwrap(), dt).is_err());
    /// ```
    pub fn new(params: ModelParameters<T>, dt: TimeStep<T>) -> Result<Self, ModelError> {
        if let Some(rho) = params.rho() {
            return Err(ModelError::invalid_parameter("rho", to_f64(rho)));
        }
        Ok(Self {
            params,
            dt,
            jacobian: Matrix2::new([
                [T::one() - params.kappa() * dt.value(), T::zero()],
                [T::zero(), T::zero()],
            ]),
        })
    }
}

impl<T: Float> StateSpaceModel<T> for CirModel<T> {
    fn predict(&self, state: &VarianceState<T>) -> VarianceState<T> {
        let v = state.variance;
        let next = v + self.params.kappa() * (self.params.theta() - v) * self.dt.value();
        VarianceState::new(next, T::zero())
    }

    fn jacobian(&self, _state: &VarianceState<T>) -> Matrix2<T> {
        self.jacobian
    }

    fn process_noise(&self, state: &VarianceState<T>) -> Matrix2<T> {
        let sigma = self.params.sigma();
        let scale = state.variance.max(T::zero()) * self.dt.value();
        Matrix2::new([[sigma * sigma * scale, T::zero()], [T::zero(), T::zero()]])
    }

    fn params(&self) -> &ModelParameters<T> {
        &self.params
    }

    fn time_step(&self) -> TimeStep<T> {
        self.dt
    }

    fn model_name(&self) -> &'static str {
        "CIR"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAILY: f64 = 1.0 / 365.0;

    fn daily_model() -> CirModel<f64> {
        let params = ModelParameters::new(2.0, 0.04, 0.3).unwrap();
        CirModel::new(params, TimeStep::new(DAILY).unwrap()).unwrap()
    }

    #[test]
    fn test_predict() {
        let model = daily_model();
        let next = model.predict(&VarianceState::new(0.09, 0.5));
        assert_eq!(next.variance, 0.09 + 2.0 * (0.04 - 0.09) * DAILY);
        assert_eq!(next.auxiliary, 0.0);
    }

    #[test]
    fn test_jacobian() {
        let model = daily_model();
        let j = model.jacobian(&VarianceState::new(0.09, 0.0));
        assert_eq!(j.rows(), &[[1.0 - 2.0 * DAILY, 0.0], [0.0, 0.0]]);
        assert_eq!(j, model.jacobian(&VarianceState::new(-5.0, 3.0)));
    }

    #[test]
    fn test_process_noise() {
        let model = daily_model();
        let q = model.process_noise(&VarianceState::new(0.04, 0.0));
        assert_eq!(q[(0, 0)], 0.3 * 0.3 * (0.04 * DAILY));
        assert_eq!(q[(1, 1)], 0.0);
        assert_eq!(q[(0, 1)], 0.0);
    }

    #[test]
    fn test_rejects_rho() {
        let params = ModelParameters::new(2.0, 0.04, 0.3)
            .unwrap()
            .with_rho(0.2)
            .unwrap();
        let err = CirModel::new(params, TimeStep::new(DAILY).unwrap()).unwrap_err();
        assert_eq!(err, ModelError::invalid_parameter("rho", 0.2));
    }

    #[test]
    fn test_model_name() {
        assert_eq!(daily_model().model_name(), "CIR");
    }
}
