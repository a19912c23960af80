//! # Volcal Models (L2: Business Logic)
//!
//! Stochastic-volatility models expressed as discrete state-space systems.
//!
//! This crate provides:
//! - Model parameters with validation and Feller diagnostics
//! - Heston and CIR variance dynamics (`predict`, `jacobian`, `process_noise`)
//! - A calibrator wrapper holding the model and its initial state
//! - Seeded path simulation for synthetic observation series
//!
//! ## Design Principles
//!
//! - **Enum-based models** for static dispatch
//! - **Immutable after construction**: every evaluation is a pure function of
//!   its inputs, so one model can be shared across threads

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod calibration;
pub mod models;
pub mod simulation;
