//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    BenchCommand, CompletionsCommand, ReplayCommand, ShowConfigCommand, ValidateCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line driver for the seatline seat inventory.
#[derive(Parser)]
#[command(name = "seatline")]
#[command(version, about = "Drive and benchmark a concurrent rail seat inventory", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Read configuration from this file instead of ~/.seatline/config.yaml
    #[arg(long, value_name = "PATH", global = true, env = "SEATLINE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Run the multi-threaded load generator
    Bench(BenchCommand),

    /// Execute a scripted sequence of operations
    Replay(ReplayCommand),

    /// Validate a configuration file
    Validate(ValidateCommand),

    /// Print the effective configuration
    ShowConfig(ShowConfigCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
