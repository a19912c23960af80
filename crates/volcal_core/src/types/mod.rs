//! Core time and error types.
//!
//! This module provides:
//! - `time`: Sampling frequencies and the annualised `TimeStep`
//! - `error`: `ModelError`, the construction-time error taxonomy
//!
//! # Re-exports
//!
//! - [`SamplingFrequency`], [`TimeStep`] from `time`
//! - [`ModelError`] from `error`

pub mod error;
pub mod time;

pub use error::ModelError;
pub use time::{SamplingFrequency, TimeStep, MINUTES_PER_YEAR};
