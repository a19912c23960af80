//! Mathematical utilities.
//!
//! - `matrix`: Fixed-size 2x2 matrices for Jacobians and covariances of
//!   two-dimensional state vectors

pub mod matrix;

pub use matrix::Matrix2;
