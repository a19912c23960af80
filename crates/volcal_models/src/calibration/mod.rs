//! Calibration-facing wrappers.
//!
//! - [`StateSpaceCalibrator`]: a model with a fixed time step and initial state,
//!   exposing the per-step evaluations a Kalman-family filter or likelihood
//!   optimiser calls repeatedly

pub mod calibrator;

pub use calibrator::StateSpaceCalibrator;
