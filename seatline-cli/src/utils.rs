//! Utility functions for CLI operations.
//!
//! This module provides the global options shared by every command and the
//! configuration loading they all go through.

use crate::error::CliError;
use clap::ValueEnum;
use seatline::{Config, ConfigBuilder};
use std::path::PathBuf;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
#[allow(dead_code)] // Fields used via pattern matching in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Explicit configuration file.
    pub config: Option<PathBuf>,
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Human,
    /// A single JSON document.
    Json,
    /// Comma-separated values with a header row.
    Csv,
}

/// Load the effective configuration.
///
/// Uses the `--config` file when given, otherwise the user file, then applies
/// environment overrides and `overrides` on top.
pub fn load_configuration(
    global: &GlobalOptions,
    overrides: Option<Config>,
) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new();

    if let Some(ref path) = global.config {
        if !path.exists() {
            return Err(CliError::InvalidArguments(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        builder = builder.with_path(path);
    }

    if let Some(config) = overrides {
        builder = builder.with_config(config);
    }

    builder.build().map_err(|e| CliError::Config(e.to_string()))
}

/// Convert csv::Error to CliError.
pub fn csv_error(e: csv::Error) -> CliError {
    CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
}

/// Convert serde_json::Error to CliError.
pub fn json_error(e: serde_json::Error) -> CliError {
    CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
}
