//! Property-based tests for the interval-min tree and the segment ledger.

use crate::segment::{IntervalMinTree, SegmentLedger};
use crate::StationRange;
use proptest::prelude::*;

// ============================================================================
// STRATEGY DEFINITIONS
// ============================================================================

#[derive(Debug, Clone)]
enum TreeOp {
    Update { lo: usize, hi: usize, delta: i64 },
    Query { lo: usize, hi: usize },
}

/// Strategy for a slot span inside a tree of `len` slots.
fn span_strategy(len: usize) -> impl Strategy<Value = (usize, usize)> {
    (0..len).prop_flat_map(move |lo| (Just(lo), lo..len))
}

fn op_strategy(len: usize) -> impl Strategy<Value = TreeOp> {
    prop_oneof![
        (span_strategy(len), -5i64..=5)
            .prop_map(|((lo, hi), delta)| TreeOp::Update { lo, hi, delta }),
        span_strategy(len).prop_map(|(lo, hi)| TreeOp::Query { lo, hi }),
    ]
}

fn tree_case() -> impl Strategy<Value = (Vec<i64>, Vec<TreeOp>)> {
    (1usize..24).prop_flat_map(|len| {
        (
            prop::collection::vec(-50i64..50, len),
            prop::collection::vec(op_strategy(len), 0..60),
        )
    })
}

fn trip_strategy(stations: u32) -> impl Strategy<Value = StationRange> {
    (1..stations).prop_flat_map(move |departure| {
        (departure + 1..=stations)
            .prop_map(move |arrival| StationRange::new(departure, arrival, stations).unwrap())
    })
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    // Property: Tree agrees with a plain array
    //
    // Interleaved range adds and range minimums match a naive model at
    // every step.
    #[test]
    fn prop_tree_matches_model((values, ops) in tree_case()) {
        let tree = IntervalMinTree::new(&values).unwrap();
        let mut model = values.clone();

        for op in ops {
            match op {
                TreeOp::Update { lo, hi, delta } => {
                    tree.update(lo, hi, delta).unwrap();
                    for slot in &mut model[lo..=hi] {
                        *slot += delta;
                    }
                }
                TreeOp::Query { lo, hi } => {
                    let expected = model[lo..=hi].iter().copied().min().unwrap();
                    prop_assert_eq!(tree.query(lo, hi).unwrap(), expected);
                }
            }
        }

        let expected = model.iter().copied().min().unwrap();
        prop_assert_eq!(tree.query(0, model.len() - 1).unwrap(), expected);
    }

    // Property: Ledger never oversells
    //
    // For every segment, the trips the ledger accepted that cover it
    // never exceed the capacity, and `remaining` reports exactly what is
    // left on the tightest segment.
    #[test]
    fn prop_ledger_respects_capacity(
        capacity in 1u32..5,
        trips in prop::collection::vec(trip_strategy(8), 1..40),
        probe in trip_strategy(8),
    ) {
        let ledger = SegmentLedger::new(8, capacity).unwrap();
        let mut used = [0u32; 7];

        for trip in trips {
            let (lo, hi) = trip.segments();
            let fits = used[lo..=hi].iter().all(|&n| n < capacity);
            prop_assert_eq!(ledger.try_reserve(trip).unwrap(), fits);
            if fits {
                for n in &mut used[lo..=hi] {
                    *n += 1;
                }
            }
        }

        let (lo, hi) = probe.segments();
        let tightest = used[lo..=hi].iter().copied().max().unwrap();
        prop_assert_eq!(ledger.remaining(probe).unwrap(), capacity - tightest);
    }

    // Property: Reserve/release round-trip
    //
    // Releasing every accepted trip returns the ledger to full capacity.
    #[test]
    fn prop_ledger_release_restores(
        capacity in 1u32..4,
        trips in prop::collection::vec(trip_strategy(6), 1..30),
    ) {
        let ledger = SegmentLedger::new(6, capacity).unwrap();
        let accepted: Vec<_> = trips
            .into_iter()
            .filter(|trip| ledger.try_reserve(*trip).unwrap())
            .collect();

        for trip in accepted.iter().rev() {
            prop_assert!(ledger.release(*trip).is_ok());
        }

        let whole = StationRange::new(1, 6, 6).unwrap();
        prop_assert_eq!(ledger.remaining(whole).unwrap(), capacity);
    }

    // Property: Release never exceeds capacity
    //
    // Arbitrary releases, booked or not, succeed iff every covered segment
    // holds a booking, and no segment ever reports more than `capacity`.
    #[test]
    fn prop_ledger_release_needs_booking_on_every_segment(
        capacity in 1u32..4,
        ops in prop::collection::vec((any::<bool>(), trip_strategy(6)), 1..40),
    ) {
        let ledger = SegmentLedger::new(6, capacity).unwrap();
        let mut used = [0u32; 5];

        for (reserve, trip) in ops {
            let (lo, hi) = trip.segments();
            if reserve {
                let fits = used[lo..=hi].iter().all(|&n| n < capacity);
                prop_assert_eq!(ledger.try_reserve(trip).unwrap(), fits);
                if fits {
                    for n in &mut used[lo..=hi] {
                        *n += 1;
                    }
                }
            } else {
                let held = used[lo..=hi].iter().all(|&n| n > 0);
                prop_assert_eq!(ledger.release(trip).is_ok(), held);
                if held {
                    for n in &mut used[lo..=hi] {
                        *n -= 1;
                    }
                }
            }
        }

        for departure in 1..6 {
            let segment = StationRange::new(departure, departure + 1, 6).unwrap();
            let expected = capacity - used[(departure - 1) as usize];
            prop_assert_eq!(ledger.remaining(segment).unwrap(), expected);
        }
    }
}
