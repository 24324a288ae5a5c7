//! Property-based tests for the bitmap allocator.
//!
//! These tests drive the allocator with random operation sequences and check
//! the booking invariants against a simple model of held trips.

use crate::seat::BitmapAllocator;
use crate::StationRange;
use proptest::prelude::*;

const STATIONS: u32 = 12;

// ============================================================================
// STRATEGY DEFINITIONS
// ============================================================================

/// Strategy for generating valid trips on a `STATIONS`-station line.
fn range_strategy() -> impl Strategy<Value = StationRange> {
    (1..STATIONS).prop_flat_map(|departure| {
        (departure + 1..=STATIONS)
            .prop_map(move |arrival| StationRange::new(departure, arrival, STATIONS).unwrap())
    })
}

/// One step of a random workload: book a trip, or release the n-th held one.
#[derive(Debug, Clone)]
enum Step {
    Allocate(StationRange),
    Release(usize),
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => range_strategy().prop_map(Step::Allocate),
        1 => any::<usize>().prop_map(Step::Release),
    ]
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    // Property: No double booking
    //
    // After any sequence of allocations and releases, trips held on the
    // same seat never share a segment, and each seat's word is exactly
    // the union of its held detectors.
    #[test]
    fn prop_no_double_booking(
        seats in 1usize..6,
        steps in prop::collection::vec(step_strategy(), 1..80),
    ) {
        let allocator = BitmapAllocator::new(seats).unwrap();
        let mut held: Vec<(StationRange, usize)> = Vec::new();

        for step in steps {
            match step {
                Step::Allocate(range) => {
                    if let Some(seat) = allocator.allocate(range) {
                        prop_assert!(seat < seats);
                        held.push((range, seat));
                    }
                }
                Step::Release(pick) if !held.is_empty() => {
                    let (range, seat) = held.swap_remove(pick % held.len());
                    prop_assert!(allocator.release(range, seat).is_ok());
                }
                Step::Release(_) => {}
            }
        }

        for (i, (a, seat_a)) in held.iter().enumerate() {
            for (b, seat_b) in held.iter().skip(i + 1) {
                if seat_a == seat_b {
                    prop_assert!(!a.overlaps(*b), "{} and {} share seat {}", a, b, seat_a);
                }
            }
        }

        for seat in 0..seats {
            let expected = held
                .iter()
                .filter(|(_, s)| *s == seat)
                .fold(0u64, |mask, (range, _)| mask | range.detector());
            prop_assert_eq!(allocator.occupancy(seat), Some(expected));
        }
    }

    // Property: Allocate/release round-trip
    //
    // Releasing a freshly allocated seat restores its word bit-for-bit.
    #[test]
    fn prop_allocate_release_roundtrip(
        prefill in prop::collection::vec(range_strategy(), 0..20),
        range in range_strategy(),
    ) {
        let allocator = BitmapAllocator::new(4).unwrap();
        for trip in prefill {
            let _ = allocator.allocate(trip);
        }

        if let Some(seat) = allocator.allocate(range) {
            let during = allocator.occupancy(seat).unwrap();
            prop_assert_eq!(during & range.detector(), range.detector());
            allocator.release(range, seat).unwrap();
            prop_assert_eq!(allocator.occupancy(seat).unwrap(), during & !range.detector());
        }
    }

    // Property: Query bounds
    //
    // The hint-relative count never exceeds a full recount, which never
    // exceeds the number of seats.
    #[test]
    fn prop_query_bounds(
        seats in 1usize..8,
        trips in prop::collection::vec(range_strategy(), 0..40),
        probe in range_strategy(),
    ) {
        let allocator = BitmapAllocator::new(seats).unwrap();
        for trip in trips {
            let _ = allocator.allocate(trip);
        }
        let query = allocator.query(probe);
        let recount = allocator.recount(probe);
        prop_assert!(query <= recount);
        prop_assert!(recount <= seats);
    }

    // Property: Exhaustion is honest
    //
    // When an allocation for a range fails, a full recount for that same
    // range finds no free seat.
    #[test]
    fn prop_failed_allocation_means_no_free_seat(
        trips in prop::collection::vec(range_strategy(), 1..60),
    ) {
        let allocator = BitmapAllocator::new(3).unwrap();
        for trip in trips {
            if allocator.allocate(trip).is_none() {
                prop_assert_eq!(allocator.recount(trip), 0);
            }
        }
    }
}
