//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::{BenchConfig, Config, LayoutConfig};

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use seatline::config::{Config, ConfigMerger, LayoutConfig};
///
/// let low = Config {
///     layout: Some(LayoutConfig { routes: Some(1), seats: Some(4), ..Default::default() }),
///     ..Default::default()
/// };
/// let high = Config {
///     layout: Some(LayoutConfig { routes: Some(9), ..Default::default() }),
///     ..Default::default()
/// };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.layout_or_default().routes, Some(9));
/// assert_eq!(result.layout_or_default().seats, Some(4));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple configuration sources into final config.
    ///
    /// Sources should be provided in order from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();

        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }

        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// # Merging Rules
    ///
    /// - Sections: field-by-field merge, source wins where it is `Some`
    /// - Mix: atomic replacement, since its three shares are validated together
    pub fn merge_into(target: &mut Config, source: &Config) {
        if let Some(ref source_layout) = source.layout {
            target.layout = Some(match &target.layout {
                Some(target_layout) => Self::merge_layout(target_layout, source_layout),
                None => source_layout.clone(),
            });
        }

        if let Some(ref source_bench) = source.bench {
            target.bench = Some(match &target.bench {
                Some(target_bench) => Self::merge_bench(target_bench, source_bench),
                None => source_bench.clone(),
            });
        }
    }

    fn merge_layout(target: &LayoutConfig, source: &LayoutConfig) -> LayoutConfig {
        LayoutConfig {
            routes: source.routes.or(target.routes),
            coaches: source.coaches.or(target.coaches),
            seats: source.seats.or(target.seats),
            stations: source.stations.or(target.stations),
        }
    }

    fn merge_bench(target: &BenchConfig, source: &BenchConfig) -> BenchConfig {
        BenchConfig {
            threads: source.threads.or(target.threads),
            ops_per_thread: source.ops_per_thread.or(target.ops_per_thread),
            seed: source.seed.or(target.seed),
            engine: source.engine.or(target.engine),
            mix: source.mix.or(target.mix),
        }
    }
}
