// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Booking records and the append-only booking log.
//!
//! Ids come from a relaxed `fetch_add` counter starting at 1. The service
//! allocates an id only after the seat CAS has already succeeded, so the log
//! is dense: ids observed across the log are exactly {1, 2, .., N} for N
//! successful reservations, with none wasted on failures. Relaxed ordering
//! is enough because cross-thread ordering of bookings is established by the
//! CAS that precedes allocation, never by comparing ids.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

/// Result of a successful reservation. Immutable.
///
/// `seats` holds canonical ids (lowercase, ascending bit order) derived from
/// the mask that was atomically acquired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: u64,
    pub movie_id: u32,
    pub theater_id: u32,
    pub seats: Vec<String>,
}

/// Append-only archive of bookings plus the process-wide id allocator.
#[derive(Debug)]
pub struct BookingLog {
    next_id: AtomicU64,
    bookings: RwLock<HashMap<u64, Arc<Booking>>>,
}

impl Default for BookingLog {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingLog {
    /// Create an empty log; the first allocated id is 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            bookings: RwLock::new(HashMap::new()),
        }
    }

    /// Allocate the next booking id.
    ///
    /// Callers must only allocate after the seat reservation has succeeded;
    /// that keeps the id space gap-free.
    pub fn allocate_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Append a booking record.
    pub fn append(&self, booking: Arc<Booking>) {
        self.bookings.write().insert(booking.id, booking);
    }

    /// Look up a booking by id.
    #[must_use]
    pub fn lookup(&self, booking_id: u64) -> Option<Arc<Booking>> {
        self.bookings.read().get(&booking_id).cloned()
    }

    /// Number of recorded bookings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bookings.read().len()
    }

    /// Check whether any booking has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bookings.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_booking(id: u64) -> Arc<Booking> {
        Arc::new(Booking {
            id,
            movie_id: 1,
            theater_id: 1,
            seats: vec!["a1".into()],
        })
    }

    #[test]
    fn test_ids_start_at_one_and_increment() {
        let log = BookingLog::new();
        assert_eq!(log.allocate_id(), 1);
        assert_eq!(log.allocate_id(), 2);
        assert_eq!(log.allocate_id(), 3);
    }

    #[test]
    fn test_append_and_lookup() {
        let log = BookingLog::new();
        let id = log.allocate_id();
        log.append(make_booking(id));

        let found = log.lookup(id).expect("booking should exist");
        assert_eq!(found.id, id);
        assert_eq!(found.seats, vec!["a1"]);
        assert!(log.lookup(id + 1).is_none());
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_empty_log() {
        let log = BookingLog::new();
        assert!(log.is_empty());
        assert!(log.lookup(1).is_none());
    }

    #[test]
    fn test_concurrent_allocation_is_dense() {
        let log = Arc::new(BookingLog::new());
        let mut ids: Vec<u64> = std::thread::scope(|s| {
            (0..64)
                .map(|_| {
                    let log = Arc::clone(&log);
                    s.spawn(move || log.allocate_id())
                })
                .collect::<Vec<_>>()
                .into_iter()
                .map(|h| h.join().unwrap())
                .collect()
        });

        ids.sort_unstable();
        let expected: Vec<u64> = (1..=64).collect();
        assert_eq!(ids, expected);
    }
}
