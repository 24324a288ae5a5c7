//! Station ranges and their segment detectors.
//!
//! A line with `n` stations has `n - 1` segments; segment `i` joins station
//! `i + 1` to station `i + 2`. A trip from `departure` to `arrival` occupies
//! segments `departure - 1 ..= arrival - 2`, which this module encodes as a
//! bit-mask called a detector.

use std::fmt;

use serde::Serialize;

use crate::{Error, Result};

/// Largest supported station count.
///
/// Every segment needs one bit of a seat's `u64` occupancy word, with one bit
/// of margin.
pub const MAX_STATIONS: u32 = u64::BITS - 1;

/// Returns the detector for a trip from `departure` to `arrival`.
///
/// Bit `i` is set for each segment `i` in `departure - 1 ..= arrival - 2`.
/// The caller guarantees `1 <= departure < arrival <= MAX_STATIONS`; use
/// [`StationRange::new`] for checked construction.
///
/// # Examples
///
/// ```
/// use seatline::station::detector;
///
/// assert_eq!(detector(1, 2), 0b1);
/// assert_eq!(detector(2, 5), 0b1110);
/// ```
#[must_use]
pub const fn detector(departure: u32, arrival: u32) -> u64 {
    debug_assert!(departure >= 1 && departure < arrival && arrival <= MAX_STATIONS);
    let width = arrival - departure;
    ((1u64 << width) - 1) << (departure - 1)
}

/// A validated trip between two stations of a line (1-based, `departure <
/// arrival`).
///
/// # Examples
///
/// ```
/// use seatline::StationRange;
///
/// let range = StationRange::new(2, 5, 10).unwrap();
/// assert_eq!(range.segments(), (1, 3));
/// assert_eq!(range.segment_count(), 3);
/// assert_eq!(range.detector(), 0b1110);
///
/// assert!(StationRange::new(5, 5, 10).is_err());
/// assert!(StationRange::new(3, 11, 10).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct StationRange {
    departure: u32,
    arrival: u32,
}

impl StationRange {
    /// Creates a range on a line with `station_count` stations.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStationRange`] unless
    /// `1 <= departure < arrival <= station_count`, and
    /// [`Error::Configuration`] if `station_count` exceeds [`MAX_STATIONS`].
    pub fn new(departure: u32, arrival: u32, station_count: u32) -> Result<Self> {
        if station_count > MAX_STATIONS {
            return Err(Error::config(
                "stations",
                format!("at most {MAX_STATIONS} stations fit an occupancy word, got {station_count}"),
            ));
        }
        if departure == 0 || departure >= arrival || arrival > station_count {
            return Err(Error::InvalidStationRange {
                departure,
                arrival,
                station_count,
            });
        }
        Ok(Self { departure, arrival })
    }

    /// Departure station (1-based).
    #[must_use]
    pub const fn departure(self) -> u32 {
        self.departure
    }

    /// Arrival station (1-based).
    #[must_use]
    pub const fn arrival(self) -> u32 {
        self.arrival
    }

    /// Bit-mask of the segments this trip occupies.
    #[must_use]
    pub const fn detector(self) -> u64 {
        detector(self.departure, self.arrival)
    }

    /// Inclusive 0-based segment span `(first, last)`.
    #[must_use]
    pub const fn segments(self) -> (usize, usize) {
        ((self.departure - 1) as usize, (self.arrival - 2) as usize)
    }

    /// Number of segments travelled.
    #[must_use]
    pub const fn segment_count(self) -> u32 {
        self.arrival - self.departure
    }

    /// Returns `true` if the two trips share at least one segment.
    #[must_use]
    pub const fn overlaps(self, other: Self) -> bool {
        self.detector() & other.detector() != 0
    }
}

impl fmt::Display for StationRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.departure, self.arrival)
    }
}
