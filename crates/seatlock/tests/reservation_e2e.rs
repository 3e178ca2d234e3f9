// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! End-to-end reservation scenarios against the public service API.
//!
//! # Test Coverage
//!
//! - Duplicate single-seat reservation (first wins, second rejected)
//! - Overlapping batch reservation (all-or-nothing, no partial acquisition)
//! - Exhaustive fill of a screening and rejection once full
//! - Invalid seat ids and empty requests leaving state untouched
//! - Dense booking-id allocation and count/percent consistency

#![allow(clippy::uninlined_format_args)]

use seatlock::{BookingService, ReserveError};

fn seeded() -> BookingService {
    let service = BookingService::new();
    service.add_movie(1, "Test Movie");
    service.add_theater(1, "Test Theater");
    assert!(service.link(1, 1));
    service
}

#[test]
fn test_single_seat_duplicate() {
    let service = seeded();

    let first = service.reserve(1, 1, &["a1"]).expect("first should book");
    assert_eq!(first.id, 1);
    assert_eq!(first.seats, vec!["a1"]);

    let second = service.reserve(1, 1, &["a1"]);
    assert_eq!(second, Err(ReserveError::SeatsUnavailable));

    assert_eq!(service.available_count(1, 1), 19);
    assert_eq!(service.booking_count(), 1);
}

#[test]
fn test_overlap_batch() {
    let service = seeded();

    service
        .reserve(1, 1, &["a1", "a2", "a3"])
        .expect("batch should book");

    // a3 overlaps; the whole request fails and a4 stays free
    assert_eq!(
        service.reserve(1, 1, &["a3", "a4"]),
        Err(ReserveError::SeatsUnavailable)
    );
    assert_eq!(service.available_count(1, 1), 17);

    let followup = service.reserve(1, 1, &["a4"]).expect("a4 is still free");
    assert_eq!(followup.seats, vec!["a4"]);
    assert_eq!(service.available_count(1, 1), 16);
}

#[test]
fn test_exhaustive_fill() {
    let service = seeded();

    for n in 1..=20u32 {
        let seat = format!("a{}", n);
        let booking = service
            .reserve(1, 1, &[seat.as_str()])
            .unwrap_or_else(|e| panic!("seat {} should book: {}", seat, e));
        assert_eq!(booking.id, u64::from(n));
    }

    assert_eq!(service.available_count(1, 1), 0);
    assert!(service.available_seats(1, 1).is_empty());
    assert!((service.occupancy_percent(1, 1) - 100.0).abs() < f64::EPSILON);

    // The twenty-first reservation of any subset fails
    assert_eq!(
        service.reserve(1, 1, &["a1"]),
        Err(ReserveError::SeatsUnavailable)
    );
    assert_eq!(
        service.reserve(1, 1, &["a7", "a13"]),
        Err(ReserveError::SeatsUnavailable)
    );
}

#[test]
fn test_invalid_requests_touch_nothing() {
    let service = seeded();

    assert_eq!(
        service.reserve(1, 1, &["a21"]),
        Err(ReserveError::InvalidSeatId("a21".into()))
    );
    assert_eq!(
        service.reserve(1, 1, &["b1"]),
        Err(ReserveError::InvalidSeatId("b1".into()))
    );
    assert_eq!(
        service.reserve(1, 1, &["a01"]),
        Err(ReserveError::InvalidSeatId("a01".into()))
    );
    let empty: [&str; 0] = [];
    assert_eq!(service.reserve(1, 1, &empty), Err(ReserveError::EmptySeatList));

    // No state was created, no id was burned
    assert_eq!(service.available_count(1, 1), 20);
    assert_eq!(service.booking_count(), 0);

    let booking = service.reserve(1, 1, &["a1"]).expect("valid request books");
    assert_eq!(booking.id, 1);
}

#[test]
fn test_booking_ids_dense_and_increasing() {
    let service = seeded();
    service.add_theater(2, "Second Theater");
    assert!(service.link(1, 2));

    let mut ids = Vec::new();
    for (theater, seat) in [(1, "a1"), (2, "a1"), (1, "a2"), (2, "a2"), (1, "a3")] {
        ids.push(service.reserve(1, theater, &[seat]).unwrap().id);
    }

    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    for id in ids {
        let booking = service.get_booking(id).expect("logged booking");
        assert_eq!(booking.id, id);
    }
    assert!(service.get_booking(6).is_none());
}

#[test]
fn test_reserved_seats_stay_set() {
    let service = seeded();
    let booking = service.reserve(1, 1, &["a2", "a17"]).unwrap();

    // Every seat of the booking is reported occupied from now on
    for seat in &booking.seats {
        let available = service.available_seats(1, 1);
        assert!(!available.contains(seat));
    }
}

#[test]
fn test_counts_and_percent_stay_consistent() {
    let service = seeded();
    service.reserve(1, 1, &["a1", "a20"]).unwrap();

    assert_eq!(service.available_count(1, 1), 18);
    assert_eq!(service.available_seats(1, 1).len(), 18);
    assert!((service.occupancy_percent(1, 1) - 10.0).abs() < f64::EPSILON);
}

#[test]
fn test_unlinked_pair_reports_available_but_rejects() {
    let service = seeded();
    service.add_theater(3, "Unlinked Theater");

    // Reads synthesize the all-free answer without creating state
    assert_eq!(service.available_count(1, 3), 20);
    assert_eq!(service.available_seats(1, 3).len(), 20);

    assert_eq!(
        service.reserve(1, 3, &["a1"]),
        Err(ReserveError::NotLinked {
            movie_id: 1,
            theater_id: 3
        })
    );
}
