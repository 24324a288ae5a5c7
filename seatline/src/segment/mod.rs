//! Segment capacity tracking for the tree design.
//!
//! Instead of individual seats, this design keeps one remaining-capacity
//! counter per segment in an [`IntervalMinTree`]. A trip fits iff the minimum
//! over its segments is positive. [`SegmentLedger`] wraps the tree as a
//! count-only route inventory.

mod ledger;
pub mod tree;

#[cfg(test)]
mod proptests;

pub use ledger::SegmentLedger;
pub use tree::IntervalMinTree;
