//! City catalog.
//!
//! Owns every [`City`] and the raw (sparse) table of known road distances.
//! A catalog is loaded once and then only read, so one instance can be shared
//! by reference across all workers of a search.

mod loader;
mod types;

pub use loader::{Edge, CITIES_FILE, CONNECTIONS_FILE};
pub use types::{natural_distance, City, EARTH_RADIUS_METERS};

use crate::error::{TspError, TspResult};
use crate::matrix::DistanceMatrix;

/// The city catalog: cities indexed by id `1..=N` plus the raw weight table.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// `cities[id - 1]` is the city with that id.
    cities: Vec<City>,
    raw: DistanceMatrix,
}

impl Catalog {
    /// Builds a catalog from city records and known edges.
    ///
    /// Cities may arrive in any order but their ids must be exactly `1..=N`.
    /// Each edge is stored symmetrically. Edges must join two distinct
    /// in-range cities and carry a finite, non-negative weight; a weight of
    /// zero is kept as "unknown".
    pub fn new(mut cities: Vec<City>, edges: impl IntoIterator<Item = Edge>) -> TspResult<Self> {
        if cities.is_empty() {
            return Err(TspError::invalid_catalog("catalog has no cities"));
        }
        cities.sort_by_key(City::id);
        for (index, city) in cities.iter().enumerate() {
            if city.id() != index + 1 {
                return Err(TspError::invalid_catalog(format!(
                    "city ids must be 1..={} without gaps, found {} at position {}",
                    cities.len(),
                    city.id(),
                    index + 1
                )));
            }
        }

        let n = cities.len();
        let mut raw = DistanceMatrix::new(n);
        for edge in edges {
            if edge.a == 0 || edge.a > n || edge.b == 0 || edge.b > n {
                return Err(TspError::invalid_catalog(format!(
                    "connection ({}, {}) references a city outside 1..={n}",
                    edge.a, edge.b
                )));
            }
            if edge.a == edge.b {
                return Err(TspError::invalid_catalog(format!(
                    "connection ({}, {}) is a self-loop",
                    edge.a, edge.b
                )));
            }
            if !edge.distance.is_finite() || edge.distance < 0.0 {
                return Err(TspError::invalid_catalog(format!(
                    "connection ({}, {}) has invalid distance {}",
                    edge.a, edge.b, edge.distance
                )));
            }
            raw.set_symmetric(edge.a, edge.b, edge.distance);
        }

        Ok(Self { cities, raw })
    }

    /// Number of cities, which is also the largest valid id.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Looks up a city by id.
    pub fn city(&self, id: usize) -> Option<&City> {
        id.checked_sub(1).and_then(|index| self.cities.get(index))
    }

    /// All cities, ordered by id.
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// The raw weight table (`0.0` = unknown edge).
    pub fn raw_matrix(&self) -> &DistanceMatrix {
        &self.raw
    }

    /// The known road distance between two cities, if any.
    ///
    /// # Panics
    /// Panics if either id is out of range.
    pub fn known_weight(&self, a: usize, b: usize) -> Option<f64> {
        self.raw.known(a, b)
    }

    /// Great-circle distance between two catalog cities.
    ///
    /// # Panics
    /// Panics if either id is out of range.
    pub fn natural_distance(&self, a: usize, b: usize) -> f64 {
        natural_distance(&self.cities[a - 1], &self.cities[b - 1])
    }
}
