//! Problem instance: a city subset plus its filled weight table.
//!
//! Building an instance is the expensive step of a run. Every pair of the
//! *whole* catalog gets a weight: known road distances are copied and the
//! rest are synthesized as `natural_distance * penalty_scale`. The penalty
//! scale is the `max_distance` of the subset measured on the raw table, so
//! a scale derived from the chosen cities is applied catalog-wide. That
//! behavior is deliberate and covered by tests.

use std::collections::HashSet;

use log::debug;

use crate::catalog::Catalog;
use crate::error::{TspError, TspResult};
use crate::matrix::DistanceMatrix;
use crate::path::Path;

/// One TSP instance over a subset of a catalog.
#[derive(Debug, Clone)]
pub struct Tsp<'c> {
    catalog: &'c Catalog,
    filled: DistanceMatrix,
    ids: Vec<usize>,
    seed: u64,
    penalty_scale: f64,
}

impl<'c> Tsp<'c> {
    /// Validates `ids` and fills the weight table.
    ///
    /// # Errors
    /// - [`TspError::EmptyInstance`] if `ids` is empty
    /// - [`TspError::CityOutOfRange`] if an id is outside `1..=catalog.len()`
    /// - [`TspError::DuplicateCity`] if an id repeats
    pub fn new(catalog: &'c Catalog, ids: &[usize], seed: u64) -> TspResult<Self> {
        validate_ids(ids, catalog.len())?;

        let probe = Path::new(catalog, ids, seed, catalog.raw_matrix());
        let penalty_scale = probe.max_distance();
        let filled = fill_matrix(catalog, penalty_scale);

        debug!(
            "instance of {} cities (seed {seed}): penalty scale {penalty_scale}, normalizer {}",
            ids.len(),
            probe.normalizer()
        );

        Ok(Self {
            catalog,
            filled,
            ids: ids.to_vec(),
            seed,
            penalty_scale,
        })
    }

    /// A fresh tour over the instance's cities in their given order, weighted
    /// by the filled table and seeded with the instance seed.
    pub fn path(&self) -> Path<'_> {
        Path::new(self.catalog, &self.ids, self.seed, &self.filled)
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    pub fn filled_matrix(&self) -> &DistanceMatrix {
        &self.filled
    }

    /// City ids in their initial order.
    pub fn ids(&self) -> &[usize] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Factor applied to great-circle distances of unknown edges.
    pub fn penalty_scale(&self) -> f64 {
        self.penalty_scale
    }
}

/// Checks that `ids` is a non-empty set of ids in `1..=max`.
pub fn validate_ids(ids: &[usize], max: usize) -> TspResult<()> {
    if ids.is_empty() {
        return Err(TspError::EmptyInstance);
    }
    let mut seen = HashSet::with_capacity(ids.len());
    for &id in ids {
        if id == 0 || id > max {
            return Err(TspError::CityOutOfRange { id, max });
        }
        if !seen.insert(id) {
            return Err(TspError::DuplicateCity { id });
        }
    }
    Ok(())
}

/// Dense table over the full catalog: known weights where they exist,
/// `natural_distance * penalty_scale` elsewhere. O(N²).
pub fn fill_matrix(catalog: &Catalog, penalty_scale: f64) -> DistanceMatrix {
    let n = catalog.len();
    let raw = catalog.raw_matrix();
    let mut filled = DistanceMatrix::new(n);
    for a in 1..=n {
        for b in (a + 1)..=n {
            let weight = match raw.known(a, b) {
                Some(w) => w,
                None => catalog.natural_distance(a, b) * penalty_scale,
            };
            filled.set_symmetric(a, b, weight);
        }
    }
    filled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testing::synthetic;
    use crate::catalog::{City, Edge};

    #[test]
    fn test_rejects_bad_id_lists() {
        let catalog = synthetic(10, 0.5, 1);
        assert!(matches!(Tsp::new(&catalog, &[], 0), Err(TspError::EmptyInstance)));
        assert!(matches!(
            Tsp::new(&catalog, &[1, 11], 0),
            Err(TspError::CityOutOfRange { id: 11, max: 10 })
        ));
        assert!(matches!(
            Tsp::new(&catalog, &[0, 1], 0),
            Err(TspError::CityOutOfRange { id: 0, .. })
        ));
        assert!(matches!(
            Tsp::new(&catalog, &[3, 4, 3], 0),
            Err(TspError::DuplicateCity { id: 3 })
        ));
    }

    #[test]
    fn test_filled_matrix_keeps_known_weights() {
        let catalog = synthetic(12, 0.4, 2);
        let tsp = Tsp::new(&catalog, &[1, 2, 3, 4], 0).unwrap();
        let raw = catalog.raw_matrix();
        let filled = tsp.filled_matrix();
        for a in 1..=12 {
            for b in 1..=12 {
                if a == b {
                    assert_eq!(filled.get(a, b), 0.0);
                } else if let Some(w) = raw.known(a, b) {
                    assert_eq!(filled.get(a, b), w);
                } else {
                    let expected = catalog.natural_distance(a, b) * tsp.penalty_scale();
                    assert!((filled.get(a, b) - expected).abs() <= 1e-9 * expected.max(1.0));
                }
                assert_eq!(filled.get(a, b), filled.get(b, a));
            }
        }
    }

    #[test]
    fn test_penalty_scale_from_subset_applies_catalog_wide() {
        // The subset {1, 2} only knows a short edge; cities 3 and 4 are far
        // apart with no known edge. Their synthesized weight still uses the
        // subset's scale.
        let cities = vec![
            City::new(1, "a", "x", 0.0, 0.0),
            City::new(2, "b", "x", 0.0, 1.0),
            City::new(3, "c", "x", 10.0, 0.0),
            City::new(4, "d", "x", -10.0, 50.0),
        ];
        let edges = vec![Edge::new(1, 2, 5.0), Edge::new(1, 3, 900.0)];
        let catalog = Catalog::new(cities, edges).unwrap();

        let tsp = Tsp::new(&catalog, &[1, 2], 0).unwrap();
        assert_eq!(tsp.penalty_scale(), 5.0);
        let expected = catalog.natural_distance(3, 4) * 5.0;
        assert!((tsp.filled_matrix().get(3, 4) - expected).abs() < 1e-6);
        assert_eq!(tsp.filled_matrix().get(1, 3), 900.0);
    }

    #[test]
    fn test_path_over_filled_matrix() {
        let catalog = synthetic(15, 0.3, 3);
        let ids = [5, 1, 9, 12, 3, 7];
        let tsp = Tsp::new(&catalog, &ids, 42).unwrap();
        let path = tsp.path();
        assert_eq!(path.ids(), &ids);
        assert_eq!(path.seed(), 42);
        assert_eq!(tsp.len(), 6);
        assert!(!tsp.is_empty());

        // Every weight now comes straight from the filled table.
        let cities = path.cities();
        for w in cities.windows(2) {
            assert_eq!(
                path.weight(w[0], w[1]),
                tsp.filled_matrix().get(w[0].id(), w[1].id())
            );
        }
        // The normalizer only ever sees raw edges.
        let probe = Path::new(&catalog, &ids, 42, catalog.raw_matrix());
        assert_eq!(path.normalizer(), probe.normalizer());
    }

    #[test]
    fn test_paths_are_independent() {
        let catalog = synthetic(10, 0.5, 4);
        let tsp = Tsp::new(&catalog, &[1, 2, 3, 4, 5], 8).unwrap();
        let mut a = tsp.path();
        let b = tsp.path();
        a.randomize();
        assert_eq!(b.ids(), &[1, 2, 3, 4, 5]);
    }
}
