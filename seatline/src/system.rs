//! Multi-route ticketing facade.
//!
//! A [`TicketingSystem`] owns one [`BitmapAllocator`] per route and turns
//! 1-based route, station, coach and seat numbers into allocator calls.
//! Routes share nothing, so operations on different routes never contend.

use serde::{Deserialize, Serialize};

use crate::config::schema::{
    Config, DEFAULT_COACHES, DEFAULT_ROUTES, DEFAULT_SEATS, DEFAULT_STATIONS,
};
use crate::seat::{BitmapAllocator, SeatPosition};
use crate::station::{StationRange, MAX_STATIONS};
use crate::ticket::{next_ticket_id, Ticket};
use crate::{Error, Result};

/// Shape shared by every route of a system.
///
/// # Examples
///
/// ```
/// use seatline::RouteLayout;
///
/// let layout = RouteLayout::new(5, 8, 100, 10).unwrap();
/// assert_eq!(layout.seats_per_route(), 800);
/// assert!(RouteLayout::new(5, 8, 100, 64).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteLayout {
    /// Number of routes.
    pub route_count: u32,
    /// Coaches per route.
    pub coach_count: u32,
    /// Seats per coach.
    pub seat_count: u32,
    /// Stations per route.
    pub station_count: u32,
}

impl RouteLayout {
    /// Creates a validated layout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for a zero dimension, a station count
    /// outside `2..=63`, or a seat total per route that overflows `u32`.
    pub fn new(
        route_count: u32,
        coach_count: u32,
        seat_count: u32,
        station_count: u32,
    ) -> Result<Self> {
        let layout = Self {
            route_count,
            coach_count,
            seat_count,
            station_count,
        };
        layout.validate()?;
        Ok(layout)
    }

    /// Checks every dimension.
    ///
    /// # Errors
    ///
    /// See [`RouteLayout::new`].
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("routes", self.route_count),
            ("coaches", self.coach_count),
            ("seats", self.seat_count),
        ] {
            if value == 0 {
                return Err(Error::config(field, "must be greater than 0"));
            }
        }
        if !(2..=MAX_STATIONS).contains(&self.station_count) {
            return Err(Error::config(
                "stations",
                format!(
                    "expected 2..={MAX_STATIONS} stations, got {}",
                    self.station_count
                ),
            ));
        }
        if self.coach_count.checked_mul(self.seat_count).is_none() {
            return Err(Error::config("seats", "seat total per route overflows u32"));
        }
        Ok(())
    }

    /// Total seats on one route.
    #[must_use]
    pub fn seats_per_route(&self) -> usize {
        self.coach_count as usize * self.seat_count as usize
    }

    /// Layout described by `config`, with defaults for missing values.
    ///
    /// # Errors
    ///
    /// See [`RouteLayout::new`].
    pub fn from_config(config: &Config) -> Result<Self> {
        let layout = config.layout_or_default();
        Self::new(
            layout.routes.unwrap_or(DEFAULT_ROUTES),
            layout.coaches.unwrap_or(DEFAULT_COACHES),
            layout.seats.unwrap_or(DEFAULT_SEATS),
            layout.stations.unwrap_or(DEFAULT_STATIONS),
        )
    }
}

/// Concurrent ticket office for a set of independent routes.
///
/// # Examples
///
/// ```
/// use seatline::{RouteLayout, TicketingSystem};
///
/// let system = TicketingSystem::new(RouteLayout::new(1, 1, 1, 5).unwrap()).unwrap();
/// assert_eq!(system.inquiry(1, 1, 5).unwrap(), 1);
///
/// let ticket = system.buy("passenger0", 1, 1, 5).unwrap().unwrap();
/// assert_eq!((ticket.coach, ticket.seat), (1, 1));
/// assert_eq!(system.inquiry(1, 1, 5).unwrap(), 0);
///
/// assert!(system.refund(&ticket));
/// assert_eq!(system.inquiry(1, 1, 5).unwrap(), 1);
/// ```
#[derive(Debug)]
pub struct TicketingSystem {
    layout: RouteLayout,
    routes: Vec<BitmapAllocator>,
}

impl TicketingSystem {
    /// Builds a system with every seat free.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if `layout` is invalid.
    pub fn new(layout: RouteLayout) -> Result<Self> {
        layout.validate()?;
        let routes = (0..layout.route_count)
            .map(|_| BitmapAllocator::new(layout.seats_per_route()))
            .collect::<Result<Vec<_>>>()?;
        log::debug!(
            "built {} route(s) of {} seat(s) over {} stations",
            layout.route_count,
            layout.seats_per_route(),
            layout.station_count
        );
        Ok(Self { layout, routes })
    }

    /// Builds a system from the layout section of `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the layout is invalid.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(RouteLayout::from_config(config)?)
    }

    /// The layout every route follows.
    #[must_use]
    pub fn layout(&self) -> RouteLayout {
        self.layout
    }

    /// Number of routes.
    #[must_use]
    pub fn route_count(&self) -> u32 {
        self.layout.route_count
    }

    /// Books the lowest free seat on `route` for the trip.
    ///
    /// Returns `Ok(None)` when the route has no seat free for the whole trip.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRoute`] or [`Error::InvalidStationRange`] for
    /// out-of-bounds input.
    pub fn buy(
        &self,
        passenger: &str,
        route: u32,
        departure: u32,
        arrival: u32,
    ) -> Result<Option<Ticket>> {
        let allocator = self.route(route)?;
        let range = StationRange::new(departure, arrival, self.layout.station_count)?;

        let Some(index) = allocator.allocate(range) else {
            log::debug!("route {route} sold out for {range}");
            return Ok(None);
        };

        let position = SeatPosition::from_index(index, self.layout.seat_count);
        let ticket = Ticket {
            id: next_ticket_id(),
            passenger: passenger.to_string(),
            route,
            departure,
            arrival,
            coach: position.coach,
            seat: position.seat,
        };
        log::debug!("issued {ticket}");
        Ok(Some(ticket))
    }

    /// Seats on `route` free for the whole trip.
    ///
    /// Counts from the trip's scan hint, so seats below it are not counted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRoute`] or [`Error::InvalidStationRange`] for
    /// out-of-bounds input.
    pub fn inquiry(&self, route: u32, departure: u32, arrival: u32) -> Result<u32> {
        let allocator = self.route(route)?;
        let range = StationRange::new(departure, arrival, self.layout.station_count)?;
        Ok(u32::try_from(allocator.query(range)).unwrap_or(u32::MAX))
    }

    /// Frees the seat held by `ticket`.
    ///
    /// Returns `false` if the ticket does not describe a held seat on this
    /// system; the reason is logged at warn level.
    pub fn refund(&self, ticket: &Ticket) -> bool {
        match self.release(ticket) {
            Ok(()) => {
                log::debug!("refunded {ticket}");
                true
            }
            Err(e) => {
                log::warn!("refund of ticket {} rejected: {e}", ticket.id);
                false
            }
        }
    }

    /// Re-books the exact seat recorded on `ticket`.
    ///
    /// Returns `false` if any segment of the trip is already taken on that
    /// seat, or if the ticket does not fit this system.
    pub fn buy_replay(&self, ticket: &Ticket) -> bool {
        let occupied = self
            .locate(ticket)
            .and_then(|(allocator, range, index)| allocator.occupy(range, index));
        match occupied {
            Ok(true) => true,
            Ok(false) => {
                log::warn!("replay of ticket {} conflicts with a booked seat", ticket.id);
                false
            }
            Err(e) => {
                log::warn!("replay of ticket {} rejected: {e}", ticket.id);
                false
            }
        }
    }

    /// Frees the seat recorded on a replayed ticket; same as [`refund`](Self::refund).
    pub fn refund_replay(&self, ticket: &Ticket) -> bool {
        self.refund(ticket)
    }

    fn release(&self, ticket: &Ticket) -> Result<()> {
        let (allocator, range, index) = self.locate(ticket)?;
        allocator.release(range, index)
    }

    /// Resolves a ticket to its route allocator, trip and dense seat index.
    fn locate(&self, ticket: &Ticket) -> Result<(&BitmapAllocator, StationRange, usize)> {
        let allocator = self.route(ticket.route)?;
        let range = ticket.range(self.layout.station_count)?;
        let position = SeatPosition {
            coach: ticket.coach,
            seat: ticket.seat,
        };
        // A coach past the end yields an index the allocator rejects.
        let index = position
            .to_index(self.layout.seat_count)
            .ok_or(Error::SeatOutOfRange {
                seat: ticket.seat as usize,
                total: self.layout.seat_count as usize,
            })?;
        Ok((allocator, range, index))
    }

    fn route(&self, route: u32) -> Result<&BitmapAllocator> {
        route
            .checked_sub(1)
            .and_then(|index| self.routes.get(index as usize))
            .ok_or(Error::InvalidRoute {
                route,
                route_count: self.layout.route_count,
            })
    }
}
