//! # volcal_core: Numeric Foundation for State-Space Volatility Calibration
//!
//! ## Layer 1 (Foundation) Role
//!
//! volcal_core is the bottom layer of the workspace, providing:
//! - Generic floating-point trait (`traits::Float`)
//! - Fixed-size linear algebra for two-dimensional state vectors (`math::Matrix2`)
//! - Time discretisation: `TimeStep`, `SamplingFrequency` (`types::time`)
//! - Error types: `ModelError` (`types::error`)
//! - Observed price series and log-return extraction (`market_data`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other volcal crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - chrono: Timestamps for price observations
//! - thiserror: Structured error types
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use volcal_core::types::{SamplingFrequency, TimeStep};
//!
//! let freq: SamplingFrequency = "1hour".parse().unwrap();
//! let dt = TimeStep::<f64>::from_frequency(freq);
//! assert!((dt.value() - 1.0 / 8760.0).abs() < 1e-15);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for `SamplingFrequency`, `Matrix2` and `PriceSeries`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod traits;
pub mod types;
