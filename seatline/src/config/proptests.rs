//! Property-based tests for configuration merging and validation.

use super::merger::ConfigMerger;
use super::schema::{BenchConfig, Config, Engine, LayoutConfig, MixConfig};
use super::validator::ConfigValidator;
use proptest::prelude::*;

// Strategy for generating layout sections
fn layout_strategy() -> impl Strategy<Value = LayoutConfig> {
    (
        prop::option::of(1u32..20),
        prop::option::of(1u32..20),
        prop::option::of(1u32..200),
        prop::option::of(2u32..=63),
    )
        .prop_map(|(routes, coaches, seats, stations)| LayoutConfig {
            routes,
            coaches,
            seats,
            stations,
        })
}

// Strategy for generating mixes that always sum to 100
fn mix_strategy() -> impl Strategy<Value = MixConfig> {
    (0u32..=100).prop_flat_map(|refund| {
        (0u32..=100 - refund).prop_map(move |buy| MixConfig {
            refund,
            buy,
            inquiry: 100 - refund - buy,
        })
    })
}

// Strategy for generating bench sections
fn bench_strategy() -> impl Strategy<Value = BenchConfig> {
    (
        prop::option::of(1usize..64),
        prop::option::of(0usize..100_000),
        prop::option::of(any::<u64>()),
        prop::option::of(prop_oneof![Just(Engine::Bitmap), Just(Engine::Tree)]),
        prop::option::of(mix_strategy()),
    )
        .prop_map(|(threads, ops_per_thread, seed, engine, mix)| BenchConfig {
            threads,
            ops_per_thread,
            seed,
            engine,
            mix,
        })
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(layout_strategy()),
        prop::option::of(bench_strategy()),
    )
        .prop_map(|(layout, bench)| Config { layout, bench })
}

proptest! {
    // Higher precedence wins field by field, lower values persist otherwise
    #[test]
    fn config_merge_higher_precedence_wins(
        low in config_strategy(),
        high in config_strategy(),
    ) {
        let mut result = low.clone();
        ConfigMerger::merge_into(&mut result, &high);

        let (low_layout, high_layout) = (low.layout_or_default(), high.layout_or_default());
        let layout = result.layout_or_default();
        prop_assert_eq!(layout.routes, high_layout.routes.or(low_layout.routes));
        prop_assert_eq!(layout.coaches, high_layout.coaches.or(low_layout.coaches));
        prop_assert_eq!(layout.seats, high_layout.seats.or(low_layout.seats));
        prop_assert_eq!(layout.stations, high_layout.stations.or(low_layout.stations));

        let (low_bench, high_bench) = (low.bench_or_default(), high.bench_or_default());
        let bench = result.bench_or_default();
        prop_assert_eq!(bench.threads, high_bench.threads.or(low_bench.threads));
        prop_assert_eq!(bench.seed, high_bench.seed.or(low_bench.seed));
        prop_assert_eq!(bench.engine, high_bench.engine.or(low_bench.engine));
        prop_assert_eq!(bench.mix, high_bench.mix.or(low_bench.mix));
    }

    // Empty config is identity element for merge
    #[test]
    fn config_merge_identity(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &Config::default());
        prop_assert_eq!(merged, config);
    }

    // Valid configs remain valid after merge
    #[test]
    fn valid_configs_stay_valid_after_merge(
        first in config_strategy(),
        second in config_strategy(),
    ) {
        prop_assert!(ConfigValidator::validate(&first).is_ok());
        prop_assert!(ConfigValidator::validate(&second).is_ok());

        let mut merged = Config::with_defaults();
        ConfigMerger::merge_into(&mut merged, &first);
        ConfigMerger::merge_into(&mut merged, &second);
        prop_assert!(ConfigValidator::validate(&merged).is_ok());
    }
}
