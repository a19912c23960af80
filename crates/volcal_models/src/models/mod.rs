//! Stochastic-volatility models in discrete state-space form.
//!
//! - `StateSpaceModel` trait: `predict`, `jacobian`, `process_noise`,
//!   `initial_state`
//! - `HestonModel`: mean-reverting variance with leverage correlation
//! - `CirModel`: mean-reverting variance without leverage
//! - `VolatilityModelEnum`: static dispatch over the above
//!
//! ## Example
//!
//! ```
//! use volcal_core::types::{SamplingFrequency, TimeStep};
//! use volcal_models::models::{HestonModel, ModelParameters, StateSpaceModel, VarianceState};
//!
//! let dt = TimeStep::from_frequency(SamplingFrequency::OneHour);
//! let model = HestonModel::new(ModelParameters::<f64>::default(), dt);
//!
//! let x = VarianceState::new(0.3, 0.0);
//! let j = model.jacobian(&x);
//! assert_eq!(j[(0, 0)], 1.0 - 1.0 / 8760.0);
//! ```

pub mod cir;
pub mod heston;
pub mod model_enum;
pub mod params;
pub mod state;
pub mod state_space;

pub use cir::CirModel;
pub use heston::HestonModel;
pub use model_enum::{ModelKind, VolatilityModelEnum};
pub use params::ModelParameters;
pub use state::{VarianceGuard, VarianceState};
pub use state_space::StateSpaceModel;
