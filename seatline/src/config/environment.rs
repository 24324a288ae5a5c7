//! Environment variable handling for configuration overrides.
//!
//! This module provides support for SEATLINE_* environment variables that
//! override configuration file values.

use crate::config::schema::{Config, Engine};
use crate::error::{Error, Result};
use std::env;
use std::str::FromStr;

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use seatline::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable value does not parse.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        Self::apply_layout_overrides(config)?;
        Self::apply_bench_overrides(config)
    }

    fn apply_layout_overrides(config: &mut Config) -> Result<()> {
        let routes = Self::parse_var::<u32>("SEATLINE_ROUTES")?;
        let coaches = Self::parse_var::<u32>("SEATLINE_COACHES")?;
        let seats = Self::parse_var::<u32>("SEATLINE_SEATS")?;
        let stations = Self::parse_var::<u32>("SEATLINE_STATIONS")?;

        if routes.is_none() && coaches.is_none() && seats.is_none() && stations.is_none() {
            return Ok(());
        }

        let layout = config.layout.get_or_insert_with(Default::default);
        if routes.is_some() {
            layout.routes = routes;
        }
        if coaches.is_some() {
            layout.coaches = coaches;
        }
        if seats.is_some() {
            layout.seats = seats;
        }
        if stations.is_some() {
            layout.stations = stations;
        }
        Ok(())
    }

    fn apply_bench_overrides(config: &mut Config) -> Result<()> {
        let threads = Self::parse_var::<usize>("SEATLINE_THREADS")?;
        let ops = Self::parse_var::<usize>("SEATLINE_OPS")?;
        let seed = Self::parse_var::<u64>("SEATLINE_SEED")?;
        let engine = match env::var("SEATLINE_ENGINE") {
            Ok(value) => Some(
                Engine::from_str(&value).map_err(|message| Error::config("SEATLINE_ENGINE", message))?,
            ),
            Err(_) => None,
        };

        if threads.is_none() && ops.is_none() && seed.is_none() && engine.is_none() {
            return Ok(());
        }

        let bench = config.bench.get_or_insert_with(Default::default);
        if threads.is_some() {
            bench.threads = threads;
        }
        if ops.is_some() {
            bench.ops_per_thread = ops;
        }
        if seed.is_some() {
            bench.seed = seed;
        }
        if engine.is_some() {
            bench.engine = engine;
        }
        Ok(())
    }

    /// Parse a numeric environment variable if it is set.
    fn parse_var<T: FromStr>(name: &str) -> Result<Option<T>> {
        match env::var(name) {
            Ok(value) => value
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| Error::config(name, format!("Must be a non-negative integer, got '{value}'"))),
            Err(_) => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const ALL_VARS: [&str; 8] = [
        "SEATLINE_ROUTES",
        "SEATLINE_COACHES",
        "SEATLINE_SEATS",
        "SEATLINE_STATIONS",
        "SEATLINE_THREADS",
        "SEATLINE_OPS",
        "SEATLINE_SEED",
        "SEATLINE_ENGINE",
    ];

    fn clear_env() {
        for var in ALL_VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_no_overrides_leaves_config_untouched() {
        clear_env();
        let mut config = Config::default();
        EnvironmentConfig::apply_overrides(&mut config).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    #[serial]
    fn test_layout_overrides() {
        clear_env();
        env::set_var("SEATLINE_ROUTES", "3");
        env::set_var("SEATLINE_STATIONS", "12");

        let mut config = Config::default();
        EnvironmentConfig::apply_overrides(&mut config).unwrap();
        let layout = config.layout_or_default();
        assert_eq!(layout.routes, Some(3));
        assert_eq!(layout.stations, Some(12));
        assert_eq!(layout.seats, None);
        assert!(config.bench.is_none());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_bench_overrides_keep_existing_fields() {
        clear_env();
        env::set_var("SEATLINE_THREADS", "4");
        env::set_var("SEATLINE_ENGINE", "tree");

        let mut config = Config::with_defaults();
        EnvironmentConfig::apply_overrides(&mut config).unwrap();
        let bench = config.bench_or_default();
        assert_eq!(bench.threads, Some(4));
        assert_eq!(bench.engine, Some(Engine::Tree));
        assert_eq!(bench.ops_per_thread, Some(10_000));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_number_rejected() {
        clear_env();
        env::set_var("SEATLINE_SEATS", "many");

        let mut config = Config::default();
        let err = EnvironmentConfig::apply_overrides(&mut config).unwrap_err();
        assert!(err.to_string().contains("SEATLINE_SEATS"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_engine_rejected() {
        clear_env();
        env::set_var("SEATLINE_ENGINE", "abacus");

        let mut config = Config::default();
        assert!(EnvironmentConfig::apply_overrides(&mut config).is_err());

        clear_env();
    }
}
