// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Movie/theater catalog and the movie→theater linkage.
//!
//! The catalog is read-heavy: every reservation validates its pair under a
//! shared lock while writers (adds and links) are rare, so the three maps
//! live together behind a single `RwLock`. Records are immutable once added
//! and handed out as `Arc` clones; no accessor returns a reference tied to
//! the lock region.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

/// A movie known to the catalog. Immutable once added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    pub id: u32,
    pub title: String,
}

impl Movie {
    /// Create a movie record.
    pub fn new(id: u32, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

/// A theater known to the catalog. Immutable once added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theater {
    pub id: u32,
    pub name: String,
}

impl Theater {
    /// Create a theater record.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[derive(Debug, Default)]
struct CatalogInner {
    movies: HashMap<u32, Arc<Movie>>,
    theaters: HashMap<u32, Arc<Theater>>,
    /// Movie id → theater ids showing it, in link insertion order.
    /// Duplicates are never recorded (set semantics).
    movie_theaters: HashMap<u32, Vec<u32>>,
}

/// Thread-safe catalog of movies, theaters and their linkage.
#[derive(Debug, Default)]
pub struct MetadataCatalog {
    inner: RwLock<CatalogInner>,
}

impl MetadataCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(CatalogInner::default()),
        }
    }

    /// Add a movie. Re-adding an existing id replaces the record; links and
    /// screening states keyed by that id are unaffected.
    pub fn add_movie(&self, movie: Movie) {
        debug!(movie_id = movie.id, title = %movie.title, "adding movie");
        self.inner.write().movies.insert(movie.id, Arc::new(movie));
    }

    /// Add a theater. Re-adding an existing id replaces the record.
    pub fn add_theater(&self, theater: Theater) {
        debug!(theater_id = theater.id, name = %theater.name, "adding theater");
        self.inner
            .write()
            .theaters
            .insert(theater.id, Arc::new(theater));
    }

    /// Record that `theater_id` shows `movie_id`.
    ///
    /// Returns false when either id is unknown. Linking the same pair twice
    /// is accepted but recorded once.
    pub fn link(&self, movie_id: u32, theater_id: u32) -> bool {
        let mut inner = self.inner.write();

        if !inner.movies.contains_key(&movie_id) || !inner.theaters.contains_key(&theater_id) {
            warn!(movie_id, theater_id, "link rejected: unknown id");
            return false;
        }

        let theaters = inner.movie_theaters.entry(movie_id).or_default();
        if !theaters.contains(&theater_id) {
            theaters.push(theater_id);
        }
        true
    }

    /// Get a movie by id.
    #[must_use]
    pub fn get_movie(&self, movie_id: u32) -> Option<Arc<Movie>> {
        self.inner.read().movies.get(&movie_id).cloned()
    }

    /// Get a theater by id.
    #[must_use]
    pub fn get_theater(&self, theater_id: u32) -> Option<Arc<Theater>> {
        self.inner.read().theaters.get(&theater_id).cloned()
    }

    /// All movies, sorted by id.
    #[must_use]
    pub fn all_movies(&self) -> Vec<Arc<Movie>> {
        let inner = self.inner.read();
        let mut movies: Vec<Arc<Movie>> = inner.movies.values().cloned().collect();
        movies.sort_by_key(|m| m.id);
        movies
    }

    /// Theaters showing a movie, in link insertion order, filtered to
    /// currently-known theaters.
    #[must_use]
    pub fn theaters_for(&self, movie_id: u32) -> Vec<Arc<Theater>> {
        let inner = self.inner.read();
        inner
            .movie_theaters
            .get(&movie_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|tid| inner.theaters.get(tid).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Check whether a (movie, theater) pair is linked.
    #[must_use]
    pub fn is_linked(&self, movie_id: u32, theater_id: u32) -> bool {
        self.inner
            .read()
            .movie_theaters
            .get(&movie_id)
            .is_some_and(|ids| ids.contains(&theater_id))
    }

    /// Validate a reservation pair under one shared read: both ids known and
    /// linked. Returns the specific failure for the service to surface.
    pub(crate) fn check_pair(&self, movie_id: u32, theater_id: u32) -> PairCheck {
        let inner = self.inner.read();
        if !inner.movies.contains_key(&movie_id) {
            return PairCheck::UnknownMovie;
        }
        if !inner.theaters.contains_key(&theater_id) {
            return PairCheck::UnknownTheater;
        }
        let linked = inner
            .movie_theaters
            .get(&movie_id)
            .is_some_and(|ids| ids.contains(&theater_id));
        if linked {
            PairCheck::Linked
        } else {
            PairCheck::NotLinked
        }
    }
}

/// Outcome of a single-read pair validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PairCheck {
    Linked,
    NotLinked,
    UnknownMovie,
    UnknownTheater,
}
