//! Configuration validation.
//!
//! This module checks every configured value before a system or a load run
//! is built from it.

use crate::config::schema::{BenchConfig, Config, LayoutConfig, MixConfig};
use crate::error::{Error, Result};
use crate::station::MAX_STATIONS;

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use seatline::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::with_defaults()).unwrap();
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// Absent values are not checked; they are filled from defaults later.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] naming the first invalid field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref layout) = config.layout {
            Self::validate_layout(layout)?;
        }

        if let Some(ref bench) = config.bench {
            Self::validate_bench(bench)?;
        }

        Ok(())
    }

    /// Validate the route layout.
    ///
    /// Dimensions must be positive, the station count must fit an occupancy
    /// word, and a route's seat total must fit in `u32`.
    fn validate_layout(layout: &LayoutConfig) -> Result<()> {
        Self::validate_positive("layout.routes", layout.routes)?;
        Self::validate_positive("layout.coaches", layout.coaches)?;
        Self::validate_positive("layout.seats", layout.seats)?;

        if let Some(stations) = layout.stations {
            if !(2..=MAX_STATIONS).contains(&stations) {
                return Err(Error::config(
                    "layout.stations",
                    format!("expected 2..={MAX_STATIONS} stations, got {stations}"),
                ));
            }
        }

        if let (Some(coaches), Some(seats)) = (layout.coaches, layout.seats) {
            if coaches.checked_mul(seats).is_none() {
                return Err(Error::config(
                    "layout",
                    format!("{coaches} coaches of {seats} seats overflow the seat index"),
                ));
            }
        }

        Ok(())
    }

    fn validate_bench(bench: &BenchConfig) -> Result<()> {
        if bench.threads == Some(0) {
            return Err(Error::config("bench.threads", "must be greater than 0"));
        }

        if let Some(ref mix) = bench.mix {
            Self::validate_mix(mix)?;
        }

        Ok(())
    }

    fn validate_mix(mix: &MixConfig) -> Result<()> {
        let total = u64::from(mix.refund) + u64::from(mix.buy) + u64::from(mix.inquiry);
        if total != 100 {
            return Err(Error::config(
                "bench.mix",
                format!("percentages must sum to 100, got {total}"),
            ));
        }
        Ok(())
    }

    fn validate_positive(field: &str, value: Option<u32>) -> Result<()> {
        if value == Some(0) {
            return Err(Error::config(field, "must be greater than 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_layout(layout: LayoutConfig) -> Config {
        Config {
            layout: Some(layout),
            ..Default::default()
        }
    }

    fn with_bench(bench: BenchConfig) -> Config {
        Config {
            bench: Some(bench),
            ..Default::default()
        }
    }

    fn field_of(err: Error) -> String {
        match err {
            Error::Configuration { field, .. } => field,
            other => panic!("expected a configuration error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_and_default_configs_are_valid() {
        ConfigValidator::validate(&Config::default()).unwrap();
        ConfigValidator::validate(&Config::with_defaults()).unwrap();
    }

    #[test]
    fn test_station_bounds() {
        let ok = with_layout(LayoutConfig {
            stations: Some(63),
            ..Default::default()
        });
        ConfigValidator::validate(&ok).unwrap();

        for stations in [0, 1, 64] {
            let bad = with_layout(LayoutConfig {
                stations: Some(stations),
                ..Default::default()
            });
            let err = ConfigValidator::validate(&bad).unwrap_err();
            assert_eq!(field_of(err), "layout.stations");
        }
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let bad = with_layout(LayoutConfig {
            coaches: Some(0),
            ..Default::default()
        });
        let err = ConfigValidator::validate(&bad).unwrap_err();
        assert_eq!(field_of(err), "layout.coaches");
    }

    #[test]
    fn test_seat_total_overflow_rejected() {
        let bad = with_layout(LayoutConfig {
            coaches: Some(u32::MAX),
            seats: Some(2),
            ..Default::default()
        });
        let err = ConfigValidator::validate(&bad).unwrap_err();
        assert_eq!(field_of(err), "layout");
    }

    #[test]
    fn test_zero_threads_rejected() {
        let bad = with_bench(BenchConfig {
            threads: Some(0),
            ..Default::default()
        });
        let err = ConfigValidator::validate(&bad).unwrap_err();
        assert_eq!(field_of(err), "bench.threads");
    }

    #[test]
    fn test_mix_must_sum_to_hundred() {
        let bad = with_bench(BenchConfig {
            mix: Some(MixConfig {
                refund: 10,
                buy: 30,
                inquiry: 50,
            }),
            ..Default::default()
        });
        let err = ConfigValidator::validate(&bad).unwrap_err();
        assert_eq!(field_of(err), "bench.mix");

        let ok = with_bench(BenchConfig {
            mix: Some(MixConfig {
                refund: 0,
                buy: 100,
                inquiry: 0,
            }),
            ..Default::default()
        });
        ConfigValidator::validate(&ok).unwrap();
    }
}
