//! Lock-free seat allocation over per-seat occupancy words.
//!
//! Each seat owns an `AtomicU64`; bit `i` set means the seat is booked for
//! segment `i`. A seat can take a trip iff `word & detector == 0`, and every
//! state change is a single compare-and-swap on that seat's word, so two
//! overlapping trips can never hold the same seat.
//!
//! Scans start at a per-detector hint: the lowest seat index worth looking at
//! for that exact detector. Hints only ever skip work; correctness never
//! depends on them. Only the occupancy words are lock-free: the hint map is a
//! sharded, locking `DashMap`, and a release rewinds hints by walking every
//! shard under its read lock.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use dashmap::DashMap;

use crate::station::StationRange;
use crate::{Error, Result};

/// Lock-free seat allocator for one route.
///
/// # Examples
///
/// ```
/// use seatline::seat::BitmapAllocator;
/// use seatline::StationRange;
///
/// let allocator = BitmapAllocator::new(2).unwrap();
/// let trip = StationRange::new(1, 3, 5).unwrap();
///
/// assert_eq!(allocator.allocate(trip), Some(0));
/// assert_eq!(allocator.allocate(trip), Some(1));
/// assert_eq!(allocator.allocate(trip), None);
///
/// allocator.release(trip, 0).unwrap();
/// assert_eq!(allocator.query(trip), 1);
/// ```
#[derive(Debug)]
pub struct BitmapAllocator {
    words: Box<[AtomicU64]>,
    hints: DashMap<u64, Arc<AtomicUsize>>,
}

impl BitmapAllocator {
    /// Creates an allocator with `total_seats` empty seats.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `total_seats` is zero.
    pub fn new(total_seats: usize) -> Result<Self> {
        if total_seats == 0 {
            return Err(Error::config("seats", "a route needs at least one seat"));
        }
        Ok(Self {
            words: (0..total_seats).map(|_| AtomicU64::new(0)).collect(),
            hints: DashMap::new(),
        })
    }

    /// Number of seats managed by this allocator.
    #[must_use]
    pub fn total_seats(&self) -> usize {
        self.words.len()
    }

    /// Books the lowest free seat at or after the hint for `range`.
    ///
    /// Returns `None` when no seat is free for the whole range. Contention
    /// only causes retries on the contended seat, never a failure.
    ///
    /// Seats below the hint are scanned last, so a seat freed while the hint
    /// was being raised is still found.
    pub fn allocate(&self, range: StationRange) -> Option<usize> {
        let detector = range.detector();
        let hint = self.hint(detector);
        let start = hint.load(Ordering::Relaxed).min(self.words.len());

        if let Some(index) = self.claim_first(detector, start, self.words.len()) {
            // Losing this race only means a later scan starts lower.
            let _ = hint.compare_exchange(start, index + 1, Ordering::Relaxed, Ordering::Relaxed);
            return Some(index);
        }

        let index = self.claim_first(detector, 0, start)?;
        log::debug!("seat {index} found below hint {start} for {range}");
        hint.fetch_min(index + 1, Ordering::Relaxed);
        Some(index)
    }

    /// Books the first seat in `from..to` free for `detector`.
    fn claim_first(&self, detector: u64, from: usize, to: usize) -> Option<usize> {
        for (index, word) in self.words[from..to].iter().enumerate() {
            let mut current = word.load(Ordering::Acquire);
            while current & detector == 0 {
                match word.compare_exchange(
                    current,
                    current | detector,
                    Ordering::AcqRel,
                    Ordering::Acquire,
                ) {
                    Ok(_) => return Some(from + index),
                    Err(observed) => current = observed,
                }
            }
        }
        None
    }

    /// Frees `seat` for every segment of `range`.
    ///
    /// On success, every cached hint whose detector shares a segment with
    /// `range` is lowered to at most `seat`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SeatOutOfRange`] for an index past the end, and
    /// [`Error::Inconsistent`] if the seat is not currently booked for the
    /// whole range.
    pub fn release(&self, range: StationRange, seat: usize) -> Result<()> {
        let word = self.word(seat)?;
        let detector = range.detector();

        let mut current = word.load(Ordering::Acquire);
        loop {
            if current & detector != detector {
                return Err(Error::Inconsistent { seat, detector });
            }
            match word.compare_exchange(
                current,
                current & !detector,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => break,
                Err(observed) => current = observed,
            }
        }

        self.rewind_hints(detector, seat);
        Ok(())
    }

    /// Books a specific seat for `range`, as recorded on an earlier ticket.
    ///
    /// Returns `Ok(false)` if any segment of the range is already taken on
    /// that seat. Hints are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SeatOutOfRange`] for an index past the end.
    pub fn occupy(&self, range: StationRange, seat: usize) -> Result<bool> {
        let word = self.word(seat)?;
        let detector = range.detector();

        let mut current = word.load(Ordering::Acquire);
        while current & detector == 0 {
            match word.compare_exchange(
                current,
                current | detector,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return Ok(true),
                Err(observed) => current = observed,
            }
        }
        Ok(false)
    }

    /// Counts free seats for `range`, starting from its hint.
    ///
    /// Seats below the hint are not examined, so the result may be lower than
    /// a full [`recount`](Self::recount).
    #[must_use]
    pub fn query(&self, range: StationRange) -> usize {
        let detector = range.detector();
        let start = self
            .hints
            .get(&detector)
            .map_or(0, |hint| hint.load(Ordering::Relaxed));
        self.count_free(detector, start)
    }

    /// Counts free seats for `range` across the whole route.
    #[must_use]
    pub fn recount(&self, range: StationRange) -> usize {
        self.count_free(range.detector(), 0)
    }

    /// Current occupancy word of a seat.
    #[must_use]
    pub fn occupancy(&self, seat: usize) -> Option<u64> {
        self.words.get(seat).map(|word| word.load(Ordering::Acquire))
    }

    fn word(&self, seat: usize) -> Result<&AtomicU64> {
        self.words.get(seat).ok_or(Error::SeatOutOfRange {
            seat,
            total: self.words.len(),
        })
    }

    fn count_free(&self, detector: u64, start: usize) -> usize {
        self.words
            .iter()
            .skip(start)
            .filter(|word| word.load(Ordering::Acquire) & detector == 0)
            .count()
    }

    /// Returns the hint cell for `detector`, creating it at 0 on first use.
    ///
    /// The cell is cloned out so no map guard is held during a scan.
    fn hint(&self, detector: u64) -> Arc<AtomicUsize> {
        if let Some(hint) = self.hints.get(&detector) {
            return Arc::clone(&hint);
        }
        Arc::clone(&self.hints.entry(detector).or_default())
    }

    fn rewind_hints(&self, released: u64, seat: usize) {
        for entry in &self.hints {
            if entry.key() & released != 0 {
                entry.value().fetch_min(seat, Ordering::Relaxed);
            }
        }
    }
}
