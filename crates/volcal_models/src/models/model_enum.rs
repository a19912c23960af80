//! Static dispatch enum for state-space volatility models.
//!
//! `VolatilityModelEnum` lets a filter loop swap Heston for CIR (or future
//! variants) without trait objects.
//!
//! ## Design Philosophy
//!
//! - **Static dispatch**: All model dispatch via `match` expressions
//! - **Zero-cost abstraction**: No vtable overhead
//! - **Closed set**: Adding a model means adding a variant and its match arms
//!
//! ## Example
//!
//! ```
//! use volcal_core::types::TimeStep;
//! use volcal_models::models::{ModelKind, ModelParameters, StateSpaceModel, VolatilityModelEnum};
//!
//! let kind: ModelKind = "cir".parse().unwrap();
//! let params = ModelParameters::new(2.0_f64, 0.04, 0.3).unwrap();
//! let dt = TimeStep::new(1.0 / 365.0).unwrap();
//!
//! let model = VolatilityModelEnum::build(kind, params, dt).unwrap();
//! assert_eq!(model.model_name(), "CIR");
//! ```

use std::fmt;
use std::str::FromStr;

use volcal_core::math::Matrix2;
use volcal_core::traits::Float;
use volcal_core::types::{ModelError, TimeStep};

use super::cir::CirModel;
use super::heston::HestonModel;
use super::params::ModelParameters;
use super::state::VarianceState;
use super::state_space::StateSpaceModel;

/// Model family selector, parsed from configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ModelKind {
    /// Heston with optional leverage correlation
    #[default]
    Heston,
    /// CIR variance without leverage
    Cir,
}

impl ModelKind {
    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            ModelKind::Heston => "heston",
            ModelKind::Cir => "cir",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ModelKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "heston" => Ok(ModelKind::Heston),
            "cir" | "cox-ingersoll-ross" => Ok(ModelKind::Cir),
            _ => Err(ModelError::UnknownModel(s.to_string())),
        }
    }
}

/// Enum-dispatched state-space model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VolatilityModelEnum<T: Float> {
    /// Heston model
    Heston(HestonModel<T>),
    /// CIR model
    Cir(CirModel<T>),
}

impl<T: Float> VolatilityModelEnum<T> {
    /// Build the model selected by `kind`.
    ///
    /// # Errors
    ///
    /// Propagates the variant's construction error (CIR rejects `rho`).
    pub fn build(
        kind: ModelKind,
        params: ModelParameters<T>,
        dt: TimeStep<T>,
    ) -> Result<Self, ModelError> {
        match kind {
            ModelKind::Heston => Ok(VolatilityModelEnum::Heston(HestonModel::new(params, dt))),
            ModelKind::Cir => CirModel::new(params, dt).map(VolatilityModelEnum::Cir),
        }
    }

    /// Which family this model belongs to.
    pub fn kind(&self) -> ModelKind {
        match self {
            VolatilityModelEnum::Heston(_) => ModelKind::Heston,
            VolatilityModelEnum::Cir(_) => ModelKind::Cir,
        }
    }
}

impl<T: Float> From<HestonModel<T>> for VolatilityModelEnum<T> {
    fn from(model: HestonModel<T>) -> Self {
        VolatilityModelEnum::Heston(model)
    }
}

impl<T: Float> From<CirModel<T>> for VolatilityModelEnum<T> {
    fn from(model: CirModel<T>) -> Self {
        VolatilityModelEnum::Cir(model)
    }
}

impl<T: Float> StateSpaceModel<T> for VolatilityModelEnum<T> {
    fn predict(&self, state: &VarianceState<T>) -> VarianceState<T> {
        match self {
            VolatilityModelEnum::Heston(m) => m.predict(state),
            VolatilityModelEnum::Cir(m) => m.predict(state),
        }
    }

    fn jacobian(&self, state: &VarianceState<T>) -> Matrix2<T> {
        match self {
            VolatilityModelEnum::Heston(m) => m.jacobian(state),
            VolatilityModelEnum::Cir(m) => m.jacobian(state),
        }
    }

    fn process_noise(&self, state: &VarianceState<T>) -> Matrix2<T> {
        match self {
            VolatilityModelEnum::Heston(m) => m.process_noise(state),
            VolatilityModelEnum::Cir(m) => m.process_noise(state),
        }
    }

    fn params(&self) -> &ModelParameters<T> {
        match self {
            VolatilityModelEnum::Heston(m) => m.params(),
            VolatilityModelEnum::Cir(m) => m.params(),
        }
    }

    fn time_step(&self) -> TimeStep<T> {
        match self {
            VolatilityModelEnum::Heston(m) => m.time_step(),
            VolatilityModelEnum::Cir(m) => m.time_step(),
        }
    }

    fn model_name(&self) -> &'static str {
        match self {
            VolatilityModelEnum::Heston(m) => m.model_name(),
            VolatilityModelEnum::Cir(m) => m.model_name(),
        }
    }
}
