// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Registry of per-screening occupancy states.
//!
//! Maps a (movie id, theater id) pair to its [`ScreeningState`]. States are
//! created lazily on the first reservation attempt for a pair and live for
//! the process lifetime; callers get `Arc` handles that stay valid after the
//! registry lock is released.
//!
//! Lookups take the shared side of the lock, so concurrent availability
//! reads never serialize behind each other. Creation uses the classic
//! double-checked pattern: optimistic shared-lock probe, then re-check under
//! the exclusive lock before inserting.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::screening::ScreeningState;

/// Composite key: (movie id, theater id).
pub type ScreeningKey = (u32, u32);

/// Thread-safe map from screening key to occupancy state.
#[derive(Debug, Default)]
pub struct ScreeningRegistry {
    states: RwLock<HashMap<ScreeningKey, Arc<ScreeningState>>>,
}

impl ScreeningRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            states: RwLock::new(HashMap::new()),
        }
    }

    /// Look up the state for a pair, if one has been created.
    ///
    /// Shared-lock only; never blocks other lookups.
    #[must_use]
    pub fn lookup(&self, movie_id: u32, theater_id: u32) -> Option<Arc<ScreeningState>> {
        self.states.read().get(&(movie_id, theater_id)).cloned()
    }

    /// Get the state for a pair, creating it on first use.
    ///
    /// Safe to call concurrently for the same key; exactly one state is ever
    /// created per pair. A `lookup` that linearizes after this call observes
    /// the returned state.
    pub fn get_or_create(&self, movie_id: u32, theater_id: u32) -> Arc<ScreeningState> {
        let key = (movie_id, theater_id);

        // Fast path: the state usually exists already.
        if let Some(state) = self.states.read().get(&key) {
            return Arc::clone(state);
        }

        let mut states = self.states.write();
        // Re-check: another thread may have inserted between the locks.
        if let Some(state) = states.get(&key) {
            return Arc::clone(state);
        }

        debug!(movie_id, theater_id, "creating screening state");
        let state = Arc::new(ScreeningState::new());
        states.insert(key, Arc::clone(&state));
        state
    }

    /// Number of screening states created so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.read().len()
    }

    /// Check whether any state has been created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_starts_empty() {
        let registry = ScreeningRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.lookup(1, 1).is_none());
    }

    #[test]
    fn test_get_or_create_then_lookup() {
        let registry = ScreeningRegistry::new();
        let created = registry.get_or_create(1, 2);
        let found = registry.lookup(1, 2).expect("state should exist");
        assert!(Arc::ptr_eq(&created, &found));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_get_or_create_is_idempotent() {
        let registry = ScreeningRegistry::new();
        let first = registry.get_or_create(1, 1);
        let second = registry.get_or_create(1, 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_distinct_pairs_get_distinct_states() {
        let registry = ScreeningRegistry::new();
        let a = registry.get_or_create(1, 1);
        let b = registry.get_or_create(1, 2);
        let c = registry.get_or_create(2, 1);
        assert!(!Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_state_survives_past_lock_region() {
        let registry = ScreeningRegistry::new();
        let state = registry.get_or_create(3, 4);
        // Handle stays usable while other callers take the write lock
        let _ = registry.get_or_create(5, 6);
        assert!(state.try_reserve(1 << 0));
        assert_eq!(registry.lookup(3, 4).unwrap().available_count(), 19);
    }

    #[test]
    fn test_concurrent_get_or_create_single_state() {
        let registry = Arc::new(ScreeningRegistry::new());
        let states: Vec<Arc<ScreeningState>> = std::thread::scope(|s| {
            (0..16)
                .map(|_| {
                    let registry = Arc::clone(&registry);
                    s.spawn(move || registry.get_or_create(7, 7))
                })
                .collect::<Vec<_>>()
                .into_iter()
                .map(|h| h.join().unwrap())
                .collect()
        });

        assert_eq!(registry.len(), 1);
        for state in &states[1..] {
            assert!(Arc::ptr_eq(&states[0], state));
        }
    }
}
