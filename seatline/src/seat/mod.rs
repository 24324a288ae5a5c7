//! Seat inventory for the bitmap design.
//!
//! Seats of a route are numbered densely from 0, coach by coach. Each seat
//! owns one occupancy word; see [`BitmapAllocator`] for the allocation
//! protocol.

pub mod bitmap;

#[cfg(test)]
mod proptests;

pub use bitmap::BitmapAllocator;

/// Printed location of a seat: 1-based coach and 1-based seat within it.
///
/// # Examples
///
/// ```
/// use seatline::seat::SeatPosition;
///
/// let pos = SeatPosition::from_index(205, 100);
/// assert_eq!((pos.coach, pos.seat), (3, 6));
/// assert_eq!(pos.to_index(100), Some(205));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeatPosition {
    /// Coach number (1-based).
    pub coach: u32,
    /// Seat number within the coach (1-based).
    pub seat: u32,
}

impl SeatPosition {
    /// Converts a dense 0-based seat index into a coach/seat pair.
    ///
    /// `seats_per_coach` must be non-zero and `index` must come from a route
    /// whose total seat count fits in `u32`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_index(index: usize, seats_per_coach: u32) -> Self {
        let per_coach = seats_per_coach as usize;
        Self {
            coach: (index / per_coach) as u32 + 1,
            seat: (index % per_coach) as u32 + 1,
        }
    }

    /// Converts back to a dense index, or `None` for a zero coach/seat or a
    /// seat number past the end of the coach.
    #[must_use]
    pub fn to_index(self, seats_per_coach: u32) -> Option<usize> {
        if self.coach == 0 || self.seat == 0 || self.seat > seats_per_coach {
            return None;
        }
        let coach = (self.coach - 1) as usize;
        let seat = (self.seat - 1) as usize;
        coach
            .checked_mul(seats_per_coach as usize)
            .and_then(|base| base.checked_add(seat))
    }
}
