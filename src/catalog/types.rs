//! City records and great-circle distance.

use serde::Deserialize;

/// Mean Earth radius used by the haversine formula, in metres.
pub const EARTH_RADIUS_METERS: f64 = 6_373_000.0;

/// An immutable city record.
///
/// Deserializes from a row of the city table:
/// `id,name,country,population,latitude,longitude` (population optional).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct City {
    id: usize,
    name: String,
    country: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    population: Option<u64>,
    latitude: f64,
    longitude: f64,
}

impl City {
    /// Creates a city at the given coordinates (degrees).
    pub fn new(
        id: usize,
        name: impl Into<String>,
        country: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            country: country.into(),
            population: None,
            latitude,
            longitude,
        }
    }

    /// Sets the population.
    pub fn with_population(mut self, population: u64) -> Self {
        self.population = Some(population);
        self
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    /// Population, `0` when unknown.
    pub fn population(&self) -> u64 {
        self.population.unwrap_or(0)
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other`, in metres.
    pub fn distance_to(&self, other: &City) -> f64 {
        natural_distance(self, other)
    }
}

/// Great-circle (haversine) distance between two cities, in metres.
///
/// ```text
/// a = sin²(Δlat/2) + cos(lat1)·cos(lat2)·sin²(Δlon/2)
/// c = 2·atan2(√a, √(1−a))
/// d = R·c
/// ```
pub fn natural_distance(c1: &City, c2: &City) -> f64 {
    let lat1 = c1.latitude.to_radians();
    let lat2 = c2.latitude.to_radians();
    let d_lat = (c2.latitude - c1.latitude).to_radians();
    let d_lon = (c2.longitude - c1.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `a` past 1 for antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_METERS * c
}
