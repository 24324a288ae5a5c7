//! Load run results.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::schema::Engine;

/// Call counts and accumulated latency for one operation kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpStats {
    /// Calls made.
    pub calls: u64,
    /// Calls that succeeded: a ticket sold, a refund accepted, or an
    /// inquiry answered.
    pub succeeded: u64,
    /// Sum of per-call latencies in nanoseconds.
    pub total_nanos: u64,
}

impl OpStats {
    /// Records one call.
    pub fn record(&mut self, succeeded: bool, elapsed: Duration) {
        self.calls += 1;
        if succeeded {
            self.succeeded += 1;
        }
        self.total_nanos = self
            .total_nanos
            .saturating_add(u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX));
    }

    /// Adds another worker's counts into these.
    pub fn absorb(&mut self, other: &Self) {
        self.calls += other.calls;
        self.succeeded += other.succeeded;
        self.total_nanos = self.total_nanos.saturating_add(other.total_nanos);
    }

    /// Mean latency per call in microseconds, 0 when nothing ran.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean_micros(&self) -> f64 {
        if self.calls == 0 {
            return 0.0;
        }
        self.total_nanos as f64 / self.calls as f64 / 1_000.0
    }
}

/// Outcome of one load run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchReport {
    /// Engine that was driven.
    pub engine: Engine,
    /// Worker threads.
    pub threads: usize,
    /// Operations attempted by each worker.
    pub ops_per_thread: usize,
    /// Base seed.
    pub seed: u64,
    /// Wall-clock start of the run.
    pub started_at: DateTime<Utc>,
    /// Wall-clock duration in milliseconds.
    pub elapsed_ms: f64,
    /// Purchases.
    pub buy: OpStats,
    /// Refunds.
    pub refund: OpStats,
    /// Inquiries.
    pub inquiry: OpStats,
    /// Refund draws skipped because the worker held no ticket.
    pub skipped: u64,
    /// Completed operations per second.
    pub throughput: f64,
}

impl BenchReport {
    /// Operations that ran, across all kinds.
    #[must_use]
    pub fn total_calls(&self) -> u64 {
        self.buy.calls + self.refund.calls + self.inquiry.calls
    }
}

impl fmt::Display for BenchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "engine {} | {} thread(s) x {} ops | seed {} | started {}",
            self.engine,
            self.threads,
            self.ops_per_thread,
            self.seed,
            self.started_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        for (name, stats) in [
            ("buy", &self.buy),
            ("refund", &self.refund),
            ("inquiry", &self.inquiry),
        ] {
            writeln!(
                f,
                "  {name:<8} {:>9} calls {:>9} ok {:>10.3} us/op",
                stats.calls,
                stats.succeeded,
                stats.mean_micros()
            )?;
        }
        write!(
            f,
            "  elapsed {:.1} ms, throughput {:.2} ops/s",
            self.elapsed_ms, self.throughput
        )
    }
}
