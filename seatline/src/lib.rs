#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # seatline
//!
//! A concurrent seat reservation library for multi-route rail lines.
//!
//! Each route is a line of stations with a fixed pool of coaches and seats.
//! Passengers buy a trip between two stations; a seat can carry several
//! passengers whose trips do not share a segment.
//!
//! ## Core Types
//!
//! - [`TicketingSystem`] and [`RouteLayout`]: The multi-route ticket office
//! - [`BitmapAllocator`]: Lock-free per-seat occupancy words
//! - [`IntervalMinTree`] and [`SegmentLedger`]: Per-segment capacity counting
//! - [`StationRange`] and [`Ticket`]: Trips and issued tickets
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use seatline::{RouteLayout, TicketingSystem};
//!
//! let layout = RouteLayout::new(2, 1, 2, 4).unwrap();
//! let system = TicketingSystem::new(layout).unwrap();
//!
//! let ticket = system.buy("passenger1", 1, 1, 3).unwrap().unwrap();
//! assert_eq!(system.inquiry(1, 1, 3).unwrap(), 1);
//! assert_eq!(system.inquiry(1, 3, 4).unwrap(), 2);
//!
//! assert!(system.refund(&ticket));
//! ```

pub mod bench;
pub mod config;
pub mod error;
pub mod logging;
pub mod seat;
pub mod segment;
pub mod station;
pub mod system;
pub mod ticket;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use seat::BitmapAllocator;
pub use segment::{IntervalMinTree, SegmentLedger};
pub use station::StationRange;
pub use system::{RouteLayout, TicketingSystem};
pub use ticket::{Ticket, TicketId};
