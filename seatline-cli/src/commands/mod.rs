//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `bench`: Run the load generator and report throughput
//! - `replay`: Execute a scripted list of operations
//! - `validate`: Validate a configuration file
//! - `show_config`: Print the effective configuration
//! - `completions`: Generate shell completion scripts

pub mod bench;
pub mod completions;
pub mod replay;
pub mod show_config;
pub mod validate;

pub use bench::BenchCommand;
pub use completions::CompletionsCommand;
pub use replay::ReplayCommand;
pub use show_config::ShowConfigCommand;
pub use validate::ValidateCommand;
