//! # Volcal CLI (Service Layer)
//!
//! Operational surface for the volcal models: configuration loading,
//! tracing setup, the price-source boundary, and the `volcal` commands.
//!
//! The model crates never perform I/O. Everything that touches files,
//! environment variables or the terminal lives here.

pub mod commands;
pub mod config;
pub mod error;
pub mod market_data;

pub use error::{CliError, Result};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
