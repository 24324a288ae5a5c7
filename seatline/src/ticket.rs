//! Tickets and ticket id issuance.
//!
//! A [`Ticket`] is the caller-owned receipt of a successful purchase. It
//! carries everything needed to refund the seat later; the allocator keeps no
//! reference to it.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::station::StationRange;

/// Globally unique ticket identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(u64);

impl TicketId {
    /// Wraps a raw id.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying id.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic, thread-safe ticket id counter.
///
/// # Examples
///
/// ```
/// use seatline::ticket::TicketIdIssuer;
///
/// let issuer = TicketIdIssuer::new();
/// let first = issuer.issue();
/// let second = issuer.issue();
/// assert!(second > first);
/// ```
#[derive(Debug, Default)]
pub struct TicketIdIssuer {
    next: AtomicU64,
}

impl TicketIdIssuer {
    /// Creates an issuer whose first id is 0.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(0),
        }
    }

    /// Returns a fresh id. Never returns the same id twice.
    pub fn issue(&self) -> TicketId {
        TicketId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

static TICKET_IDS: TicketIdIssuer = TicketIdIssuer::new();

/// Issues an id from the process-wide counter shared by every
/// [`TicketingSystem`](crate::TicketingSystem).
pub fn next_ticket_id() -> TicketId {
    TICKET_IDS.issue()
}

/// An issued ticket.
///
/// `coach` and `seat` are 1-based, as printed on the ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Unique ticket id.
    pub id: TicketId,
    /// Passenger name.
    pub passenger: String,
    /// Route id (1-based).
    pub route: u32,
    /// Departure station (1-based).
    pub departure: u32,
    /// Arrival station (1-based).
    pub arrival: u32,
    /// Coach number (1-based).
    pub coach: u32,
    /// Seat number within the coach (1-based).
    pub seat: u32,
}

impl Ticket {
    /// The trip this ticket covers.
    ///
    /// The stored stations are re-validated against the line.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored stations are not a valid trip on a line
    /// of `station_count` stations.
    pub fn range(&self, station_count: u32) -> crate::Result<StationRange> {
        StationRange::new(self.departure, self.arrival, station_count)
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} route {} {}->{} coach {} seat {}",
            self.id,
            self.passenger,
            self.route,
            self.departure,
            self.arrival,
            self.coach,
            self.seat
        )
    }
}
