//! Fixed cost-scaling constant of a city subset.

use log::warn;

use crate::catalog::Catalog;

/// Outcome of normalizing a city subset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalization {
    /// The divisor applied to raw tour cost.
    pub value: f64,
    /// Known (non-synthesized) edges found among the subset's pairs.
    pub known_edges: usize,
    /// Whether the fallback value was used.
    pub degenerate: bool,
}

/// Divisor used when a subset has no usable known edge.
pub const DEGENERATE_NORMALIZER: f64 = 1.0;

/// Sums the `n - 1` heaviest known edges among all pairs of `ids`.
///
/// Only edges present in the catalog's raw table count; synthesized
/// penalty distances never enter the sum. When fewer than `n - 1` known
/// edges exist, all of them are summed. The result depends on the set of
/// ids only, not on their order.
///
/// If the sum is zero (no known edges, or fewer than two cities) the
/// normalizer falls back to [`DEGENERATE_NORMALIZER`], which makes the
/// normalized cost equal the raw cost.
pub fn normalize(catalog: &Catalog, ids: &[usize]) -> Normalization {
    let n = ids.len();
    let mut weights = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            if let Some(w) = catalog.known_weight(ids[i], ids[j]) {
                weights.push(w);
            }
        }
    }
    weights.sort_by(f64::total_cmp);

    let take = n.saturating_sub(1).min(weights.len());
    let sum: f64 = weights.iter().rev().take(take).sum();

    if sum > 0.0 && sum.is_finite() {
        Normalization {
            value: sum,
            known_edges: weights.len(),
            degenerate: false,
        }
    } else {
        warn!(
            "no usable known edges among {n} cities ({} found); normalizer falls back to {DEGENERATE_NORMALIZER}",
            weights.len()
        );
        Normalization {
            value: DEGENERATE_NORMALIZER,
            known_edges: weights.len(),
            degenerate: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{City, Edge};

    fn catalog(edges: Vec<Edge>) -> Catalog {
        let cities = (1..=5)
            .map(|id| City::new(id, format!("c{id}"), "X", id as f64, 0.0))
            .collect();
        Catalog::new(cities, edges).unwrap()
    }

    #[test]
    fn test_sums_largest_n_minus_one() {
        let c = catalog(vec![
            Edge::new(1, 2, 10.0),
            Edge::new(1, 3, 50.0),
            Edge::new(2, 3, 30.0),
            Edge::new(3, 4, 20.0),
            Edge::new(2, 4, 40.0),
        ]);
        // 4 cities -> the 3 largest of {10, 50, 30, 20, 40}.
        let norm = normalize(&c, &[1, 2, 3, 4]);
        assert_eq!(norm.value, 120.0);
        assert_eq!(norm.known_edges, 5);
        assert!(!norm.degenerate);
    }

    #[test]
    fn test_ignores_pairs_outside_subset() {
        let c = catalog(vec![Edge::new(1, 2, 10.0), Edge::new(4, 5, 999.0)]);
        let norm = normalize(&c, &[1, 2, 3]);
        assert_eq!(norm.value, 10.0);
        assert_eq!(norm.known_edges, 1);
    }

    #[test]
    fn test_fewer_known_edges_than_needed_sums_all() {
        let c = catalog(vec![Edge::new(1, 2, 7.0), Edge::new(3, 5, 5.0)]);
        // 5 cities want 4 edges, only 2 exist.
        let norm = normalize(&c, &[1, 2, 3, 4, 5]);
        assert_eq!(norm.value, 12.0);
        assert!(!norm.degenerate);
    }

    #[test]
    fn test_no_known_edges_falls_back() {
        let c = catalog(vec![]);
        let norm = normalize(&c, &[1, 2, 3]);
        assert_eq!(norm.value, DEGENERATE_NORMALIZER);
        assert_eq!(norm.known_edges, 0);
        assert!(norm.degenerate);
    }

    #[test]
    fn test_single_city_falls_back() {
        let c = catalog(vec![Edge::new(1, 2, 7.0)]);
        let norm = normalize(&c, &[1]);
        assert!(norm.degenerate);
        assert_eq!(norm.value, DEGENERATE_NORMALIZER);
    }

    #[test]
    fn test_order_independent() {
        let c = catalog(vec![
            Edge::new(1, 2, 3.0),
            Edge::new(2, 5, 8.0),
            Edge::new(1, 4, 6.0),
            Edge::new(3, 4, 1.0),
        ]);
        let a = normalize(&c, &[1, 2, 3, 4, 5]);
        let b = normalize(&c, &[5, 3, 1, 4, 2]);
        assert_eq!(a, b);
    }
}
