// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The booking service facade.
//!
//! [`BookingService`] combines the catalog, the screening registry and the
//! booking log behind one typed API. The write path validates a request,
//! routes it to the per-screening CAS primitive and records the result; read
//! paths never block a writer and never create state.
//!
//! A failed reservation has no side effect of any kind: no seat bit flips,
//! no booking id is allocated, nothing is appended to the log.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::catalog::{MetadataCatalog, Movie, PairCheck, Theater};
use crate::ledger::{Booking, BookingLog};
use crate::registry::ScreeningRegistry;
use crate::seat::{self, MAX_SEATS};
use crate::screening::ScreeningState;

/// Why a reservation did not produce a booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReserveError {
    /// The request carried no seats.
    EmptySeatList,
    /// A seat id fell outside the `a1`..`a20` grammar.
    InvalidSeatId(String),
    /// Movie id not in the catalog.
    UnknownMovie(u32),
    /// Theater id not in the catalog.
    UnknownTheater(u32),
    /// Both ids exist but the theater does not show the movie.
    NotLinked { movie_id: u32, theater_id: u32 },
    /// At least one requested seat is already occupied.
    SeatsUnavailable,
    /// The CAS retry cap was hit while the seats were observed free; the
    /// caller may simply retry.
    Contention,
}

impl std::fmt::Display for ReserveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReserveError::EmptySeatList => write!(f, "No seats requested"),
            ReserveError::InvalidSeatId(id) => write!(f, "Invalid seat id: {:?}", id),
            ReserveError::UnknownMovie(id) => write!(f, "Unknown movie: {}", id),
            ReserveError::UnknownTheater(id) => write!(f, "Unknown theater: {}", id),
            ReserveError::NotLinked {
                movie_id,
                theater_id,
            } => write!(
                f,
                "Theater {} does not show movie {}",
                theater_id, movie_id
            ),
            ReserveError::SeatsUnavailable => write!(f, "One or more seats already booked"),
            ReserveError::Contention => write!(f, "Reservation contention, retry"),
        }
    }
}

impl std::error::Error for ReserveError {}

/// Facade over catalog, registry and log.
///
/// All methods take `&self`; the service is shared across threads as-is (or
/// behind one `Arc`).
#[derive(Debug, Default)]
pub struct BookingService {
    catalog: MetadataCatalog,
    registry: ScreeningRegistry,
    log: BookingLog,
}

impl BookingService {
    /// Create an empty service.
    #[must_use]
    pub fn new() -> Self {
        Self {
            catalog: MetadataCatalog::new(),
            registry: ScreeningRegistry::new(),
            log: BookingLog::new(),
        }
    }

    // ========================================================================
    // Catalog operations
    // ========================================================================

    /// Add a movie; re-adding an id replaces its record.
    pub fn add_movie(&self, id: u32, title: impl Into<String>) {
        self.catalog.add_movie(Movie::new(id, title));
    }

    /// Add a theater; re-adding an id replaces its record.
    pub fn add_theater(&self, id: u32, name: impl Into<String>) {
        self.catalog.add_theater(Theater::new(id, name));
    }

    /// Record that a theater shows a movie. False when either id is unknown.
    pub fn link(&self, movie_id: u32, theater_id: u32) -> bool {
        self.catalog.link(movie_id, theater_id)
    }

    /// All movies, sorted by id.
    #[must_use]
    pub fn all_movies(&self) -> Vec<Arc<Movie>> {
        self.catalog.all_movies()
    }

    /// Get a movie by id.
    #[must_use]
    pub fn get_movie(&self, movie_id: u32) -> Option<Arc<Movie>> {
        self.catalog.get_movie(movie_id)
    }

    /// Get a theater by id.
    #[must_use]
    pub fn get_theater(&self, theater_id: u32) -> Option<Arc<Theater>> {
        self.catalog.get_theater(theater_id)
    }

    /// Theaters showing a movie, link insertion order.
    #[must_use]
    pub fn theaters_for(&self, movie_id: u32) -> Vec<Arc<Theater>> {
        self.catalog.theaters_for(movie_id)
    }

    /// Check whether a (movie, theater) pair is linked.
    #[must_use]
    pub fn is_linked(&self, movie_id: u32, theater_id: u32) -> bool {
        self.catalog.is_linked(movie_id, theater_id)
    }

    // ========================================================================
    // Seat reads (never create state, never block writers)
    // ========================================================================

    /// Free seats for a pair, ascending order. A pair with no screening
    /// state yet reports all twenty seats free.
    #[must_use]
    pub fn available_seats(&self, movie_id: u32, theater_id: u32) -> Vec<String> {
        match self.registry.lookup(movie_id, theater_id) {
            Some(state) => state.available_seats(),
            None => seat::mask_to_seats(seat::ALL_SEATS_MASK),
        }
    }

    /// Number of free seats for a pair (20 when no state exists).
    #[must_use]
    pub fn available_count(&self, movie_id: u32, theater_id: u32) -> u32 {
        self.registry
            .lookup(movie_id, theater_id)
            .map_or(MAX_SEATS, |state| state.available_count())
    }

    /// Occupied share of a screening in percent (0.0 when no state exists).
    #[must_use]
    pub fn occupancy_percent(&self, movie_id: u32, theater_id: u32) -> f64 {
        self.registry
            .lookup(movie_id, theater_id)
            .map_or(0.0, |state| state.occupancy_percent())
    }

    // ========================================================================
    // Reservation
    // ========================================================================

    /// Atomically reserve a set of seats, all-or-nothing.
    ///
    /// Validation order: empty list, seat grammar, catalog pair (one shared
    /// read), then the lock-free CAS on the screening state. The booking id
    /// is allocated and the record appended only after the CAS succeeded.
    ///
    /// # Errors
    ///
    /// Returns the specific [`ReserveError`]; in every error case the
    /// occupancy word, the id counter and the log are untouched.
    pub fn reserve<S: AsRef<str>>(
        &self,
        movie_id: u32,
        theater_id: u32,
        seats: &[S],
    ) -> Result<Arc<Booking>, ReserveError> {
        if seats.is_empty() {
            return Err(ReserveError::EmptySeatList);
        }
        for seat_id in seats {
            if !seat::is_valid(seat_id.as_ref()) {
                warn!(movie_id, theater_id, seat_id = seat_id.as_ref(), "invalid seat id");
                return Err(ReserveError::InvalidSeatId(seat_id.as_ref().to_string()));
            }
        }

        match self.catalog.check_pair(movie_id, theater_id) {
            PairCheck::Linked => {}
            PairCheck::UnknownMovie => return Err(ReserveError::UnknownMovie(movie_id)),
            PairCheck::UnknownTheater => return Err(ReserveError::UnknownTheater(theater_id)),
            PairCheck::NotLinked => {
                return Err(ReserveError::NotLinked {
                    movie_id,
                    theater_id,
                })
            }
        }

        let mask = seat::build_mask(seats);
        if mask == 0 {
            // Cannot happen after per-id validation; kept as a guard.
            return Err(ReserveError::EmptySeatList);
        }

        let state = self.registry.get_or_create(movie_id, theater_id);

        if !state.try_reserve(mask) {
            return Err(Self::classify_failure(&state, mask));
        }

        // Seats are ours; only now does the booking exist.
        let booking_id = self.log.allocate_id();
        let booking = Arc::new(Booking {
            id: booking_id,
            movie_id,
            theater_id,
            seats: seat::mask_to_seats(mask),
        });
        self.log.append(Arc::clone(&booking));

        info!(
            booking_id,
            movie_id,
            theater_id,
            seats = booking.seats.len(),
            "reservation confirmed"
        );
        Ok(booking)
    }

    /// Look up a booking by id.
    #[must_use]
    pub fn get_booking(&self, booking_id: u64) -> Option<Arc<Booking>> {
        self.log.lookup(booking_id)
    }

    /// Number of successful reservations so far.
    #[must_use]
    pub fn booking_count(&self) -> usize {
        self.log.len()
    }

    /// One post-failure check splits genuine overlap from retry-cap
    /// exhaustion: seats observed free after a false `try_reserve` mean the
    /// CAS lost every round to competing writers.
    fn classify_failure(state: &ScreeningState, mask: u32) -> ReserveError {
        if state.is_available(mask) {
            debug!("reserve failed under contention, seats still free");
            ReserveError::Contention
        } else {
            ReserveError::SeatsUnavailable
        }
    }
}
