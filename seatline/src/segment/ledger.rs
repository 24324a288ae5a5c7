//! Count-only route inventory backed by an [`IntervalMinTree`].

use crate::segment::IntervalMinTree;
use crate::station::{StationRange, MAX_STATIONS};
use crate::{Error, Result};

/// Remaining capacity per segment of one route.
///
/// Unlike [`BitmapAllocator`](crate::seat::BitmapAllocator) this does not
/// assign seats: a reservation succeeds iff every segment of the trip has
/// capacity left. A second tree counts bookings per segment so a release can
/// be refused when any segment it covers holds nothing.
///
/// # Examples
///
/// ```
/// use seatline::segment::SegmentLedger;
/// use seatline::StationRange;
///
/// let ledger = SegmentLedger::new(5, 1).unwrap();
/// let trip = StationRange::new(1, 5, 5).unwrap();
///
/// assert!(ledger.try_reserve(trip).unwrap());
/// assert!(!ledger.try_reserve(trip).unwrap());
/// assert_eq!(ledger.remaining(trip).unwrap(), 0);
///
/// ledger.release(trip).unwrap();
/// assert_eq!(ledger.remaining(trip).unwrap(), 1);
/// ```
#[derive(Debug)]
pub struct SegmentLedger {
    remaining: IntervalMinTree,
    booked: IntervalMinTree,
    station_count: u32,
}

impl SegmentLedger {
    /// Creates a ledger for a line of `station_count` stations where every
    /// segment starts with `capacity` places.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for fewer than 2 or more than
    /// [`MAX_STATIONS`] stations, or a zero capacity.
    pub fn new(station_count: u32, capacity: u32) -> Result<Self> {
        if !(2..=MAX_STATIONS).contains(&station_count) {
            return Err(Error::config(
                "stations",
                format!("expected 2..={MAX_STATIONS} stations, got {station_count}"),
            ));
        }
        if capacity == 0 {
            return Err(Error::config("capacity", "must be greater than 0"));
        }
        let segments = (station_count - 1) as usize;
        Ok(Self {
            remaining: IntervalMinTree::new(&vec![i64::from(capacity); segments])?,
            booked: IntervalMinTree::new(&vec![0; segments])?,
            station_count,
        })
    }

    /// Number of stations on the line.
    #[must_use]
    pub fn station_count(&self) -> u32 {
        self.station_count
    }

    /// Takes one place on every segment of `range` if all of them have one.
    ///
    /// The places are taken first and given back if any segment went
    /// negative, so the ledger never oversells. Under contention a
    /// reservation may fail while another thread's give-back is in flight.
    ///
    /// # Errors
    ///
    /// Returns an error if `range` lies outside this line.
    pub fn try_reserve(&self, range: StationRange) -> Result<bool> {
        let (lo, hi) = range.segments();
        self.remaining.update(lo, hi, -1)?;
        if self.remaining.query(lo, hi)? < 0 {
            self.remaining.update(lo, hi, 1)?;
            return Ok(false);
        }
        self.booked.update(lo, hi, 1)?;
        Ok(true)
    }

    /// Gives back one place on every segment of `range`.
    ///
    /// The booking count is taken first and restored if any segment went
    /// negative, so no segment is ever pushed above capacity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NothingHeld`] if some segment of `range` has no
    /// booking left, or an error if `range` lies outside this line.
    pub fn release(&self, range: StationRange) -> Result<()> {
        let (lo, hi) = range.segments();
        self.booked.update(lo, hi, -1)?;
        if self.booked.query(lo, hi)? < 0 {
            self.booked.update(lo, hi, 1)?;
            return Err(Error::NothingHeld {
                detector: range.detector(),
            });
        }
        self.remaining.update(lo, hi, 1)
    }

    /// Places left for `range`: the minimum over its segments.
    ///
    /// # Errors
    ///
    /// Returns an error if `range` lies outside this line.
    pub fn remaining(&self, range: StationRange) -> Result<u32> {
        let (lo, hi) = range.segments();
        let min = self.remaining.query(lo, hi)?.max(0);
        Ok(u32::try_from(min).unwrap_or(u32::MAX))
    }
}
