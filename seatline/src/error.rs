//! Error types for the seatline library.
//!
//! This module provides the error hierarchy for every fallible operation in
//! the library, using `thiserror` for ergonomic error handling. Seat
//! exhaustion is deliberately absent: running out of seats is an ordinary
//! outcome and is reported as `None`/`false` by the operations themselves.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a seatline error.
///
/// # Examples
///
/// ```
/// use seatline::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(8)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the seatline library.
#[derive(Debug, Error)]
pub enum Error {
    /// A layout or tuning value cannot be used to build the system.
    #[error("configuration error for '{field}': {message}")]
    Configuration {
        /// The offending field.
        field: String,
        /// A description of the problem.
        message: String,
    },

    /// A route id outside `1..=route_count` was supplied.
    #[error("invalid route {route}: expected 1..={route_count}")]
    InvalidRoute {
        /// The rejected route id.
        route: u32,
        /// Number of configured routes.
        route_count: u32,
    },

    /// A departure/arrival pair that does not describe a forward trip.
    #[error(
        "invalid station range {departure}->{arrival}: expected 1 <= departure < arrival <= {station_count}"
    )]
    InvalidStationRange {
        /// The requested departure station.
        departure: u32,
        /// The requested arrival station.
        arrival: u32,
        /// Number of stations on the line.
        station_count: u32,
    },

    /// A segment span outside the tree, or with `lo > hi`.
    #[error("invalid segment range [{lo}, {hi}] for {len} segment(s)")]
    InvalidSegmentRange {
        /// Lower segment index (inclusive).
        lo: usize,
        /// Upper segment index (inclusive).
        hi: usize,
        /// Number of segments covered by the tree.
        len: usize,
    },

    /// A seat index past the end of the route's seat array.
    #[error("seat index {seat} out of range for {total} seat(s)")]
    SeatOutOfRange {
        /// The rejected seat index (0-based).
        seat: usize,
        /// Total seats on the route.
        total: usize,
    },

    /// A release targeted a seat that is not held for the whole range.
    #[error("seat {seat} is not held for segments {detector:#b}")]
    Inconsistent {
        /// The seat index (0-based).
        seat: usize,
        /// Detector of the range being released.
        detector: u64,
    },

    /// A count-only release on segments that carry no booking.
    #[error("no booking held on segments {detector:#b}")]
    NothingHeld {
        /// Detector of the range being released.
        detector: u64,
    },

    /// A configuration file could not be read.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The path that failed.
        path: PathBuf,
        /// The reason the path could not be used.
        reason: String,
    },

    /// A YAML document failed to parse.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a [`Error::Configuration`] error.
    pub(crate) fn config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Configuration {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Check if the error is a caller precondition violation.
    ///
    /// # Examples
    ///
    /// ```
    /// use seatline::Error;
    ///
    /// let err = Error::InvalidRoute { route: 9, route_count: 5 };
    /// assert!(err.is_precondition());
    /// ```
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::InvalidRoute { .. }
                | Self::InvalidStationRange { .. }
                | Self::InvalidSegmentRange { .. }
                | Self::SeatOutOfRange { .. }
        )
    }

    /// Check if the error reports a release of a seat that was not held.
    #[must_use]
    pub fn is_inconsistent(&self) -> bool {
        matches!(self, Self::Inconsistent { .. } | Self::NothingHeld { .. })
    }
}
