//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod check;
pub mod inspect;
pub mod simulate;

use std::str::FromStr;

use crate::CliError;

/// Report rendering for commands that print results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Aligned key/value text
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(CliError::InvalidArgument(format!(
                "Unknown output format: {}. Supported: table, json",
                other
            ))),
        }
    }
}
