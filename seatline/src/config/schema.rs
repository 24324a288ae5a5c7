//! Configuration schema definitions.
//!
//! This module defines the configuration structure for seatline: the route
//! layout and the tuning of the load generator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default number of routes.
pub const DEFAULT_ROUTES: u32 = 5;
/// Default number of coaches per route.
pub const DEFAULT_COACHES: u32 = 8;
/// Default number of seats per coach.
pub const DEFAULT_SEATS: u32 = 100;
/// Default number of stations per route.
pub const DEFAULT_STATIONS: u32 = 10;
/// Default number of load-generator threads.
pub const DEFAULT_THREADS: usize = 16;
/// Default number of operations per load-generator thread.
pub const DEFAULT_OPS_PER_THREAD: usize = 10_000;
/// Default base seed for the load generator.
pub const DEFAULT_SEED: u64 = 42;

/// Complete configuration structure.
///
/// Every section is optional so that partial files and overrides can be
/// merged; missing values fall back to the defaults above.
///
/// # Examples
///
/// ```
/// use seatline::config::{Config, LayoutConfig};
///
/// let config = Config {
///     layout: Some(LayoutConfig {
///         routes: Some(2),
///         ..Default::default()
///     }),
///     ..Default::default()
/// };
/// assert_eq!(config.layout_or_default().routes, Some(2));
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Route layout.
    pub layout: Option<LayoutConfig>,

    /// Load generator settings.
    pub bench: Option<BenchConfig>,
}

impl Config {
    /// The layout section, or an empty one.
    #[must_use]
    pub fn layout_or_default(&self) -> LayoutConfig {
        self.layout.clone().unwrap_or_default()
    }

    /// The bench section, or an empty one.
    #[must_use]
    pub fn bench_or_default(&self) -> BenchConfig {
        self.bench.clone().unwrap_or_default()
    }

    /// Built-in defaults with every field filled in.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            layout: Some(LayoutConfig {
                routes: Some(DEFAULT_ROUTES),
                coaches: Some(DEFAULT_COACHES),
                seats: Some(DEFAULT_SEATS),
                stations: Some(DEFAULT_STATIONS),
            }),
            bench: Some(BenchConfig {
                threads: Some(DEFAULT_THREADS),
                ops_per_thread: Some(DEFAULT_OPS_PER_THREAD),
                seed: Some(DEFAULT_SEED),
                engine: Some(Engine::default()),
                mix: Some(MixConfig::default()),
            }),
        }
    }
}

/// Route layout: identical for every route of the system.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LayoutConfig {
    /// Number of routes.
    pub routes: Option<u32>,
    /// Coaches per route.
    pub coaches: Option<u32>,
    /// Seats per coach.
    pub seats: Option<u32>,
    /// Stations per route.
    pub stations: Option<u32>,
}

/// Load generator settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BenchConfig {
    /// Worker thread count.
    pub threads: Option<usize>,
    /// Operations performed by each worker.
    pub ops_per_thread: Option<usize>,
    /// Base RNG seed; worker `i` uses `seed + i`.
    pub seed: Option<u64>,
    /// Inventory engine to drive.
    pub engine: Option<Engine>,
    /// Operation mix.
    pub mix: Option<MixConfig>,
}

/// Operation mix in percent. The three values must sum to 100.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MixConfig {
    /// Share of refunds.
    pub refund: u32,
    /// Share of purchases.
    pub buy: u32,
    /// Share of inquiries.
    pub inquiry: u32,
}

impl Default for MixConfig {
    fn default() -> Self {
        Self {
            refund: 10,
            buy: 30,
            inquiry: 60,
        }
    }
}

/// Inventory engine selection.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// Lock-free per-seat occupancy words; assigns seats.
    #[default]
    Bitmap,
    /// Interval-min tree; counts capacity only.
    Tree,
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bitmap => write!(f, "bitmap"),
            Self::Tree => write!(f, "tree"),
        }
    }
}

impl FromStr for Engine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bitmap" => Ok(Self::Bitmap),
            "tree" => Ok(Self::Tree),
            other => Err(format!("unknown engine '{other}': expected bitmap or tree")),
        }
    }
}
