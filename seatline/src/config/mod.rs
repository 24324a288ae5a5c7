//! Configuration system for seatline.
//!
//! This module provides layered configuration with support for:
//! - A YAML configuration file (the user file, or an explicit path)
//! - Environment variable overrides
//! - Programmatic configuration via builder pattern
//! - Validation of every value before use
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (SEATLINE_*)
//! 3. Explicit file (`ConfigBuilder::with_path`), or else the user config
//!    (`~/.seatline/config.yaml`)
//! 4. Built-in defaults
//!
//! # Examples
//!
//! ```
//! use seatline::config::{BenchConfig, Config, ConfigBuilder, Engine};
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .with_config(Config {
//!         bench: Some(BenchConfig { engine: Some(Engine::Tree), ..Default::default() }),
//!         ..Default::default()
//!     })
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.bench_or_default().engine, Some(Engine::Tree));
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(test)]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{BenchConfig, Config, Engine, LayoutConfig, MixConfig};
pub use validator::ConfigValidator;
