//! CSV loading for the city and connection tables.

use std::fs::File;
use std::path::Path;

use log::info;
use serde::Deserialize;

use super::types::City;
use super::Catalog;
use crate::error::{TspError, TspResult};

/// File name of the city table inside a catalog directory.
pub const CITIES_FILE: &str = "cities.csv";

/// File name of the connection table inside a catalog directory.
pub const CONNECTIONS_FILE: &str = "connections.csv";

/// A known edge between two cities.
///
/// Deserializes from a row of the connection table:
/// `id_city_1,id_city_2,distance`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Edge {
    #[serde(rename = "id_city_1")]
    pub a: usize,
    #[serde(rename = "id_city_2")]
    pub b: usize,
    pub distance: f64,
}

impl Edge {
    pub fn new(a: usize, b: usize, distance: f64) -> Self {
        Self { a, b, distance }
    }
}

fn reader(path: &Path) -> TspResult<csv::Reader<File>> {
    let file = File::open(path).map_err(|source| TspError::CatalogUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file))
}

impl Catalog {
    /// Loads a catalog from a city table and a connection table.
    pub fn from_csv(cities: impl AsRef<Path>, connections: impl AsRef<Path>) -> TspResult<Self> {
        let cities_path = cities.as_ref();
        let connections_path = connections.as_ref();

        let mut rows = Vec::new();
        for record in reader(cities_path)?.deserialize::<City>() {
            rows.push(record?);
        }

        let mut edges = Vec::new();
        for record in reader(connections_path)?.deserialize::<Edge>() {
            edges.push(record?);
        }

        info!(
            "loaded {} cities from {} and {} connections from {}",
            rows.len(),
            cities_path.display(),
            edges.len(),
            connections_path.display()
        );

        Catalog::new(rows, edges)
    }

    /// Loads `cities.csv` and `connections.csv` from `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> TspResult<Self> {
        let dir = dir.as_ref();
        Self::from_csv(dir.join(CITIES_FILE), dir.join(CONNECTIONS_FILE))
    }
}
