// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Seed configuration for the interactive CLI.
//!
//! The engine keeps all state in-process, so the CLI seeds its catalog at
//! startup: either from a JSON file (`--seed booking.json`) or from the
//! built-in sample program below.

use std::path::Path;

use seatlock::BookingService;
use serde::{Deserialize, Serialize};

/// A movie entry in the seed file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedMovie {
    pub id: u32,
    pub title: String,
}

/// A theater entry in the seed file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedTheater {
    pub id: u32,
    pub name: String,
}

/// A movie→theater link in the seed file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SeedLink {
    pub movie_id: u32,
    pub theater_id: u32,
}

/// Catalog contents applied to a fresh service at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    #[serde(default)]
    pub movies: Vec<SeedMovie>,
    #[serde(default)]
    pub theaters: Vec<SeedTheater>,
    #[serde(default)]
    pub links: Vec<SeedLink>,
}

impl Default for SeedConfig {
    /// Built-in sample program: three theaters, four movies, nine links.
    fn default() -> Self {
        Self {
            theaters: vec![
                SeedTheater {
                    id: 1,
                    name: "VOX Cinemas - Mall of the Emirates (Dubai)".into(),
                },
                SeedTheater {
                    id: 2,
                    name: "Reel Cinemas - Dubai Mall".into(),
                },
                SeedTheater {
                    id: 3,
                    name: "Novo Cinemas - IMG Worlds of Adventure".into(),
                },
            ],
            movies: vec![
                SeedMovie {
                    id: 1,
                    title: "Mission: Impossible - Dead Reckoning".into(),
                },
                SeedMovie {
                    id: 2,
                    title: "Dune: Part Two".into(),
                },
                SeedMovie {
                    id: 3,
                    title: "Oppenheimer".into(),
                },
                SeedMovie {
                    id: 4,
                    title: "Avatar: The Way of Water".into(),
                },
            ],
            links: vec![
                SeedLink { movie_id: 1, theater_id: 1 },
                SeedLink { movie_id: 1, theater_id: 2 },
                SeedLink { movie_id: 2, theater_id: 1 },
                SeedLink { movie_id: 2, theater_id: 3 },
                SeedLink { movie_id: 3, theater_id: 2 },
                SeedLink { movie_id: 3, theater_id: 3 },
                SeedLink { movie_id: 4, theater_id: 1 },
                SeedLink { movie_id: 4, theater_id: 2 },
                SeedLink { movie_id: 4, theater_id: 3 },
            ],
        }
    }
}

impl SeedConfig {
    /// Load a seed file (JSON).
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        let config: Self =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check internal consistency: every link must reference a declared id.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for link in &self.links {
            if !self.movies.iter().any(|m| m.id == link.movie_id) {
                return Err(ConfigError::InvalidValue(format!(
                    "link references unknown movie {}",
                    link.movie_id
                )));
            }
            if !self.theaters.iter().any(|t| t.id == link.theater_id) {
                return Err(ConfigError::InvalidValue(format!(
                    "link references unknown theater {}",
                    link.theater_id
                )));
            }
        }
        Ok(())
    }

    /// Apply the seed to a service. Returns the number of links recorded.
    pub fn apply(&self, service: &BookingService) -> usize {
        for theater in &self.theaters {
            service.add_theater(theater.id, theater.name.clone());
        }
        for movie in &self.movies {
            service.add_movie(movie.id, movie.title.clone());
        }
        self.links
            .iter()
            .filter(|l| service.link(l.movie_id, l.theater_id))
            .count()
    }
}

/// Seed file error.
#[derive(Debug, Clone)]
pub enum ConfigError {
    Io(String),
    Parse(String),
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(s) => write!(f, "I/O error: {}", s),
            Self::Parse(s) => write!(f, "Parse error: {}", s),
            Self::InvalidValue(s) => write!(f, "Invalid value: {}", s),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_seed_is_consistent() {
        let config = SeedConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.movies.len(), 4);
        assert_eq!(config.theaters.len(), 3);
        assert_eq!(config.links.len(), 9);
    }

    #[test]
    fn test_default_seed_applies_fully() {
        let service = BookingService::new();
        let linked = SeedConfig::default().apply(&service);
        assert_eq!(linked, 9);
        assert_eq!(service.all_movies().len(), 4);
        assert_eq!(service.theaters_for(4).len(), 3);
    }

    #[test]
    fn test_seed_roundtrips_through_json() {
        let config = SeedConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: SeedConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.movies.len(), config.movies.len());
        assert_eq!(parsed.links.len(), config.links.len());
    }

    #[test]
    fn test_validate_rejects_dangling_link() {
        let mut config = SeedConfig::default();
        config.links.push(SeedLink {
            movie_id: 99,
            theater_id: 1,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_sections_default_empty() {
        let parsed: SeedConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.movies.is_empty());
        assert!(parsed.validate().is_ok());
    }
}
