//! Load generator for comparing the inventory engines.
//!
//! Workers draw refunds, purchases and inquiries from a seeded
//! [`ChaCha8Rng`](rand_chacha::ChaCha8Rng), so a single-threaded run with a
//! fixed seed always performs the same operations.

pub mod report;
pub mod workload;

pub use report::{BenchReport, OpStats};
pub use workload::{LedgerBoard, LoadGenerator, LoadTarget};
