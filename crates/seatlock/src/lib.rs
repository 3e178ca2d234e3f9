// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # seatlock - Lock-free seat reservation engine
//!
//! A concurrent reservation engine for fixed-capacity screenings: each
//! (movie, theater) pair owns twenty seats tracked in a single 32-bit atomic
//! word, and any number of threads can reserve seat sets atomically with no
//! mutual exclusion on the hot path.
//!
//! ## Quick Start
//!
//! ```rust
//! use seatlock::BookingService;
//!
//! let service = BookingService::new();
//! service.add_movie(1, "Dune: Part Two");
//! service.add_theater(1, "Grand Hall");
//! service.link(1, 1);
//!
//! let booking = service.reserve(1, 1, &["a1", "a2"])?;
//! assert_eq!(booking.seats, vec!["a1", "a2"]);
//! assert_eq!(service.available_count(1, 1), 18);
//! # Ok::<(), seatlock::ReserveError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +------------------------------------------------------------------+
//! |                        BookingService                            |
//! |   validate -> route -> reserve (CAS) -> allocate id -> append    |
//! +------------------------------------------------------------------+
//! |  MetadataCatalog   |  ScreeningRegistry    |  BookingLog         |
//! |  movies/theaters/  |  (movie, theater) ->  |  id allocator +     |
//! |  linkage, RwLock   |  ScreeningState, lazy |  append-only map    |
//! +------------------------------------------------------------------+
//! |                ScreeningState (per pair, lock-free)              |
//! |        AtomicU32 occupancy word, bits 0..19 = seats a1..a20      |
//! +------------------------------------------------------------------+
//! ```
//!
//! The only lock-free structure is the one that matters: the per-screening
//! occupancy word, mutated exclusively through compare-and-swap. The maps
//! around it (catalog, registry, log) are read-heavy and sit behind
//! reader-writer locks; readers on the availability path never serialize
//! behind other readers.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`BookingService`] | Facade: catalog + registry + log, the public API |
//! | [`ScreeningState`] | Per-pair atomic occupancy word and CAS reserve |
//! | [`ScreeningRegistry`] | Lazy (movie, theater) → state map |
//! | [`MetadataCatalog`] | Movies, theaters, movie→theater linkage |
//! | [`BookingLog`] | Monotonic id allocator + append-only record archive |
//! | [`Booking`] | Immutable result of a successful reservation |
//! | [`ReserveError`] | Why a reservation produced no booking |
//!
//! ## Guarantees
//!
//! - No overbooking: for any seat, at most one successful reservation ever
//!   contains it.
//! - All-or-nothing: a multi-seat request flips all of its bits in one
//!   linearization point (the successful CAS) or none of them.
//! - Dense booking ids: ids are allocated only after the CAS succeeded, so
//!   the log holds exactly {1..N} after N successes.
//! - Failed reservations have zero side effects.

/// Movie/theater catalog and linkage.
pub mod catalog;
/// Booking records and the append-only log.
pub mod ledger;
/// Registry of per-screening occupancy states.
pub mod registry;
/// Seat id grammar and mask conversions.
pub mod seat;
/// The lock-free per-screening occupancy primitive.
pub mod screening;
/// The service facade tying everything together.
pub mod service;

pub use catalog::{MetadataCatalog, Movie, Theater};
pub use ledger::{Booking, BookingLog};
pub use registry::{ScreeningKey, ScreeningRegistry};
pub use seat::{ALL_SEATS_MASK, MAX_SEATS};
pub use screening::ScreeningState;
pub use service::{BookingService, ReserveError};
