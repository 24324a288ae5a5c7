//! Seeded multi-threaded load generation.

use std::thread;
use std::time::Instant;

use chrono::Utc;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::bench::report::{BenchReport, OpStats};
use crate::config::schema::{
    Config, Engine, MixConfig, DEFAULT_OPS_PER_THREAD, DEFAULT_SEED, DEFAULT_THREADS,
};
use crate::config::validator::ConfigValidator;
use crate::segment::SegmentLedger;
use crate::station::StationRange;
use crate::system::{RouteLayout, TicketingSystem};
use crate::ticket::Ticket;
use crate::{Error, Result};

/// An inventory the load generator can drive.
pub trait LoadTarget: Sync {
    /// What a successful purchase hands back for a later refund.
    type Held: Send;

    /// Engine recorded in reports of runs against this target.
    const ENGINE: Engine;

    /// Layout of the routes being driven.
    fn layout(&self) -> RouteLayout;

    /// Attempts a purchase.
    ///
    /// # Errors
    ///
    /// Returns an error for out-of-bounds input.
    fn buy(&self, passenger: &str, route: u32, range: StationRange) -> Result<Option<Self::Held>>;

    /// Counts what is left for a trip.
    ///
    /// # Errors
    ///
    /// Returns an error for out-of-bounds input.
    fn inquiry(&self, route: u32, range: StationRange) -> Result<u32>;

    /// Gives a purchase back; `false` if it was not accepted.
    fn refund(&self, held: Self::Held) -> bool;
}

impl LoadTarget for TicketingSystem {
    type Held = Ticket;
    const ENGINE: Engine = Engine::Bitmap;

    fn layout(&self) -> RouteLayout {
        TicketingSystem::layout(self)
    }

    fn buy(&self, passenger: &str, route: u32, range: StationRange) -> Result<Option<Ticket>> {
        TicketingSystem::buy(self, passenger, route, range.departure(), range.arrival())
    }

    fn inquiry(&self, route: u32, range: StationRange) -> Result<u32> {
        TicketingSystem::inquiry(self, route, range.departure(), range.arrival())
    }

    fn refund(&self, held: Ticket) -> bool {
        TicketingSystem::refund(self, &held)
    }
}

/// One [`SegmentLedger`] per route, sized to the route's seat total.
#[derive(Debug)]
pub struct LedgerBoard {
    layout: RouteLayout,
    routes: Vec<SegmentLedger>,
}

impl LedgerBoard {
    /// Builds a board with every segment at full capacity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if `layout` is invalid.
    pub fn new(layout: RouteLayout) -> Result<Self> {
        layout.validate()?;
        let capacity = layout
            .coach_count
            .checked_mul(layout.seat_count)
            .ok_or_else(|| Error::config("seats", "seat total per route overflows u32"))?;
        let routes = (0..layout.route_count)
            .map(|_| SegmentLedger::new(layout.station_count, capacity))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { layout, routes })
    }

    fn route(&self, route: u32) -> Result<&SegmentLedger> {
        route
            .checked_sub(1)
            .and_then(|index| self.routes.get(index as usize))
            .ok_or(Error::InvalidRoute {
                route,
                route_count: self.layout.route_count,
            })
    }
}

impl LoadTarget for LedgerBoard {
    type Held = (u32, StationRange);
    const ENGINE: Engine = Engine::Tree;

    fn layout(&self) -> RouteLayout {
        self.layout
    }

    fn buy(&self, _passenger: &str, route: u32, range: StationRange) -> Result<Option<Self::Held>> {
        let granted = self.route(route)?.try_reserve(range)?;
        Ok(granted.then_some((route, range)))
    }

    fn inquiry(&self, route: u32, range: StationRange) -> Result<u32> {
        self.route(route)?.remaining(range)
    }

    fn refund(&self, (route, range): Self::Held) -> bool {
        match self.route(route).and_then(|ledger| ledger.release(range)) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("ledger refund on route {route} rejected: {e}");
                false
            }
        }
    }
}

/// Load run parameters.
///
/// # Examples
///
/// ```
/// use seatline::bench::LoadGenerator;
/// use seatline::{RouteLayout, TicketingSystem};
///
/// let system = TicketingSystem::new(RouteLayout::new(2, 2, 10, 6).unwrap()).unwrap();
/// let generator = LoadGenerator {
///     threads: 2,
///     ops_per_thread: 200,
///     ..LoadGenerator::default()
/// };
///
/// let report = generator.run(&system).unwrap();
/// assert_eq!(report.total_calls() + report.skipped, 400);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadGenerator {
    /// Worker threads.
    pub threads: usize,
    /// Operations drawn by each worker.
    pub ops_per_thread: usize,
    /// Base seed; worker `i` is seeded with `seed + i`.
    pub seed: u64,
    /// Engine built by [`run_engine`](Self::run_engine).
    pub engine: Engine,
    /// Operation mix in percent.
    pub mix: MixConfig,
}

impl Default for LoadGenerator {
    fn default() -> Self {
        Self {
            threads: DEFAULT_THREADS,
            ops_per_thread: DEFAULT_OPS_PER_THREAD,
            seed: DEFAULT_SEED,
            engine: Engine::default(),
            mix: MixConfig::default(),
        }
    }
}

#[derive(Debug, Default)]
struct WorkerStats {
    buy: OpStats,
    refund: OpStats,
    inquiry: OpStats,
    skipped: u64,
}

impl LoadGenerator {
    /// Parameters from the bench section of `config`, with defaults for
    /// missing values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the bench section is invalid.
    pub fn from_config(config: &Config) -> Result<Self> {
        ConfigValidator::validate(config)?;
        let bench = config.bench_or_default();
        Ok(Self {
            threads: bench.threads.unwrap_or(DEFAULT_THREADS),
            ops_per_thread: bench.ops_per_thread.unwrap_or(DEFAULT_OPS_PER_THREAD),
            seed: bench.seed.unwrap_or(DEFAULT_SEED),
            engine: bench.engine.unwrap_or_default(),
            mix: bench.mix.unwrap_or_default(),
        })
    }

    /// Builds the configured engine for `layout` and drives it.
    ///
    /// # Errors
    ///
    /// Returns an error if the layout is invalid or a worker fails.
    pub fn run_engine(&self, layout: RouteLayout) -> Result<BenchReport> {
        match self.engine {
            Engine::Bitmap => self.run(&TicketingSystem::new(layout)?),
            Engine::Tree => self.run(&LedgerBoard::new(layout)?),
        }
    }

    /// Drives `target` with `threads` workers and aggregates their stats.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for zero threads or a bad mix, or the
    /// first error a worker hit.
    pub fn run<T: LoadTarget>(&self, target: &T) -> Result<BenchReport> {
        if self.threads == 0 {
            return Err(Error::config("bench.threads", "must be greater than 0"));
        }
        let mix_total =
            u64::from(self.mix.refund) + u64::from(self.mix.buy) + u64::from(self.mix.inquiry);
        if mix_total != 100 {
            return Err(Error::config("bench.mix", "percentages must sum to 100"));
        }

        log::debug!(
            "starting {} worker(s) x {} ops on the {} engine",
            self.threads,
            self.ops_per_thread,
            T::ENGINE
        );
        let started_at = Utc::now();
        let clock = Instant::now();

        let results: Vec<Result<WorkerStats>> = thread::scope(|scope| {
            let handles: Vec<_> = (0..self.threads)
                .map(|worker| scope.spawn(move || self.work(target, worker)))
                .collect();
            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|_| Err(Error::config("bench", "worker thread panicked")))
                })
                .collect()
        });

        let elapsed = clock.elapsed();
        let mut total = WorkerStats::default();
        for result in results {
            let stats = result?;
            total.buy.absorb(&stats.buy);
            total.refund.absorb(&stats.refund);
            total.inquiry.absorb(&stats.inquiry);
            total.skipped += stats.skipped;
        }

        let calls = total.buy.calls + total.refund.calls + total.inquiry.calls;
        #[allow(clippy::cast_precision_loss)]
        let throughput = if elapsed.is_zero() {
            0.0
        } else {
            calls as f64 / elapsed.as_secs_f64()
        };

        Ok(BenchReport {
            engine: T::ENGINE,
            threads: self.threads,
            ops_per_thread: self.ops_per_thread,
            seed: self.seed,
            started_at,
            elapsed_ms: elapsed.as_secs_f64() * 1_000.0,
            buy: total.buy,
            refund: total.refund,
            inquiry: total.inquiry,
            skipped: total.skipped,
            throughput,
        })
    }

    fn work<T: LoadTarget>(&self, target: &T, worker: usize) -> Result<WorkerStats> {
        let layout = target.layout();
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed.wrapping_add(worker as u64));
        let mut held: Vec<T::Held> = Vec::new();
        let mut stats = WorkerStats::default();
        let buy_limit = self.mix.refund + self.mix.buy;

        for _ in 0..self.ops_per_thread {
            let roll = rng.gen_range(0..100);
            if roll < self.mix.refund {
                if held.is_empty() {
                    stats.skipped += 1;
                    continue;
                }
                let pick = rng.gen_range(0..held.len());
                let ticket = held.swap_remove(pick);
                let clock = Instant::now();
                let accepted = target.refund(ticket);
                stats.refund.record(accepted, clock.elapsed());
            } else if roll < buy_limit {
                let passenger = format!("passenger{}", rng.gen_range(0..self.ops_per_thread.max(1)));
                let (route, range) = draw_trip(&mut rng, layout)?;
                let clock = Instant::now();
                let bought = target.buy(&passenger, route, range)?;
                stats.buy.record(bought.is_some(), clock.elapsed());
                held.extend(bought);
            } else {
                let (route, range) = draw_trip(&mut rng, layout)?;
                let clock = Instant::now();
                target.inquiry(route, range)?;
                stats.inquiry.record(true, clock.elapsed());
            }
        }
        Ok(stats)
    }
}

/// Uniform route, then a uniform departure and an arrival after it.
fn draw_trip(rng: &mut ChaCha8Rng, layout: RouteLayout) -> Result<(u32, StationRange)> {
    let route = rng.gen_range(1..=layout.route_count);
    let departure = rng.gen_range(1..layout.station_count);
    let arrival = rng.gen_range(departure + 1..=layout.station_count);
    Ok((
        route,
        StationRange::new(departure, arrival, layout.station_count)?,
    ))
}
