//! Tour representation with incrementally maintained cost.
//!
//! A [`Path`] is one permutation of a fixed city subset. Its raw cost (the
//! sum of consecutive edge weights) is kept up to date across swaps in O(1),
//! so the search loop never re-walks the tour. Two per-instance constants
//! are computed once at construction:
//!
//! - `max_distance`: the heaviest entry of the weight table among the
//!   subset's pairs. It scales synthesized weights for unknown edges.
//! - `normalizer`: see [`normalize`]. It divides the raw cost so that costs
//!   are comparable across instances.
//!
//! Both depend only on the *set* of ids, so reordering never invalidates
//! them.

mod normalizer;

pub use normalizer::{normalize, Normalization, DEGENERATE_NORMALIZER};

use std::fmt;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::catalog::{natural_distance, Catalog, City};
use crate::matrix::DistanceMatrix;
use crate::random::{create_rng, distinct_pair};

/// Absolute tolerance for comparing path scalars and temperatures.
pub const T_EPSILON: f64 = 0.00016;

/// A reversible transposition of two tour positions.
///
/// Returned by [`Path::swap`] and [`Path::swap_indexes`]; hand it back to
/// [`Path::de_swap`] to undo the move. Moves must be undone in reverse
/// order of application.
#[must_use = "a swap cannot be undone without its move token"]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwapMove {
    i: usize,
    j: usize,
    cost_sum_before: f64,
}

impl SwapMove {
    /// The two swapped positions, lower first.
    pub fn positions(&self) -> (usize, usize) {
        (self.i, self.j)
    }

    /// Whether the move left the tour unchanged (`i == j`).
    pub fn is_identity(&self) -> bool {
        self.i == self.j
    }
}

/// A tour over a city subset, borrowing the catalog and a weight table.
pub struct Path<'a> {
    catalog: &'a Catalog,
    matrix: &'a DistanceMatrix,
    ids: Vec<usize>,
    ordered: Vec<&'a City>,
    cost_sum: f64,
    max_distance: f64,
    normalizer: f64,
    seed: u64,
    rng: StdRng,
}

impl<'a> Path<'a> {
    /// Builds a tour visiting `ids` in the given order.
    ///
    /// `matrix` supplies edge weights; zero entries are synthesized from the
    /// great-circle distance scaled by `max_distance`. The normalizer always
    /// comes from the catalog's raw table.
    ///
    /// # Panics
    /// Panics if an id is not in the catalog or exceeds the matrix.
    pub fn new(catalog: &'a Catalog, ids: &[usize], seed: u64, matrix: &'a DistanceMatrix) -> Self {
        let ids = ids.to_vec();
        let ordered: Vec<&City> = ids
            .iter()
            .map(|&id| {
                catalog
                    .city(id)
                    .unwrap_or_else(|| panic!("city id {id} not in catalog of {}", catalog.len()))
            })
            .collect();

        let max_distance = max_distance(matrix, &ids);
        let normalizer = normalize(catalog, &ids).value;

        let mut path = Self {
            catalog,
            matrix,
            ids,
            ordered,
            cost_sum: 0.0,
            max_distance,
            normalizer,
            seed,
            rng: create_rng(seed),
        };
        path.cost_sum = path.recompute_cost_sum();
        path
    }

    /// Edge weight between two cities.
    ///
    /// The table value if the edge is known, otherwise the great-circle
    /// distance times `max_distance`.
    #[inline]
    pub fn weight(&self, a: &City, b: &City) -> f64 {
        let w = self.matrix.get(a.id(), b.id());
        if w != 0.0 {
            w
        } else {
            natural_distance(a, b) * self.max_distance
        }
    }

    /// Weight of the edge leaving position `k`.
    #[inline]
    fn edge(&self, k: usize) -> f64 {
        self.weight(self.ordered[k], self.ordered[k + 1])
    }

    /// Sum of the edges touching positions `i < j`, the shared edge of
    /// adjacent positions counted once.
    #[inline]
    fn touching_weight(&self, i: usize, j: usize) -> f64 {
        let mut sum = 0.0;
        if i > 0 {
            sum += self.edge(i - 1);
        }
        if j != i + 1 {
            sum += self.edge(i);
        }
        sum += self.edge(j - 1);
        if j + 1 < self.ids.len() {
            sum += self.edge(j);
        }
        sum
    }

    /// Raw cost recomputed by walking the whole tour. O(n).
    pub fn recompute_cost_sum(&self) -> f64 {
        (0..self.ids.len().saturating_sub(1))
            .map(|k| self.edge(k))
            .sum()
    }

    /// Normalized cost: `cost_sum / normalizer`.
    #[inline]
    pub fn cost(&self) -> f64 {
        self.cost_sum / self.normalizer
    }

    /// Raw cost, the sum of consecutive edge weights.
    pub fn cost_sum(&self) -> f64 {
        self.cost_sum
    }

    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    pub fn normalizer(&self) -> f64 {
        self.normalizer
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// City ids in tour order.
    pub fn ids(&self) -> &[usize] {
        &self.ids
    }

    /// Cities in tour order.
    pub fn cities(&self) -> &[&'a City] {
        &self.ordered
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Swaps two distinct random positions.
    ///
    /// Tours shorter than two cities have no neighbor; the identity move is
    /// returned.
    pub fn swap(&mut self) -> SwapMove {
        if self.ids.len() < 2 {
            return SwapMove {
                i: 0,
                j: 0,
                cost_sum_before: self.cost_sum,
            };
        }
        let (i, j) = distinct_pair(self.ids.len(), &mut self.rng);
        self.swap_indexes(i, j)
    }

    /// Swaps positions `i` and `j`, updating the cost in O(1).
    ///
    /// # Panics
    /// Panics if either position is out of range.
    pub fn swap_indexes(&mut self, i: usize, j: usize) -> SwapMove {
        let (i, j) = if i <= j { (i, j) } else { (j, i) };
        assert!(
            j < self.ids.len(),
            "swap position {j} out of range for a path of {}",
            self.ids.len()
        );
        let cost_sum_before = self.cost_sum;
        if i != j {
            self.transpose(i, j);
        }
        SwapMove {
            i,
            j,
            cost_sum_before,
        }
    }

    fn transpose(&mut self, i: usize, j: usize) {
        self.cost_sum -= self.touching_weight(i, j);
        self.ids.swap(i, j);
        self.ordered.swap(i, j);
        self.cost_sum += self.touching_weight(i, j);
    }

    /// Undoes `mv`, restoring the tour and its cost exactly.
    pub fn de_swap(&mut self, mv: SwapMove) {
        if !mv.is_identity() {
            self.ids.swap(mv.i, mv.j);
            self.ordered.swap(mv.i, mv.j);
        }
        self.cost_sum = mv.cost_sum_before;
    }

    /// Shuffles the tour with the path's own RNG stream and recomputes the
    /// cost from scratch.
    pub fn randomize(&mut self) {
        self.ids.shuffle(&mut self.rng);
        let catalog = self.catalog;
        self.ordered.clear();
        self.ordered.extend(self.ids.iter().filter_map(|&id| catalog.city(id)));
        self.cost_sum = self.recompute_cost_sum();
    }

    /// Approximate equality: same tour, scalars within [`T_EPSILON`].
    pub fn approx_eq(&self, other: &Path<'_>) -> bool {
        self.ids.len() == other.ids.len()
            && (self.cost_sum - other.cost_sum).abs() < T_EPSILON
            && (self.max_distance - other.max_distance).abs() < T_EPSILON
            && (self.normalizer - other.normalizer).abs() < T_EPSILON
            && self.ids == other.ids
            && self
                .ordered
                .iter()
                .zip(&other.ordered)
                .all(|(a, b)| a.id() == b.id())
    }
}

/// Heaviest table entry among all pairs of `ids`.
fn max_distance(matrix: &DistanceMatrix, ids: &[usize]) -> f64 {
    let mut max = 0.0_f64;
    for (i, &a) in ids.iter().enumerate() {
        for &b in &ids[i + 1..] {
            max = max.max(matrix.get(a, b));
        }
    }
    max
}

impl Clone for Path<'_> {
    fn clone(&self) -> Self {
        Self {
            catalog: self.catalog,
            matrix: self.matrix,
            ids: self.ids.clone(),
            ordered: self.ordered.clone(),
            cost_sum: self.cost_sum,
            max_distance: self.max_distance,
            normalizer: self.normalizer,
            seed: self.seed,
            rng: self.rng.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.catalog = source.catalog;
        self.matrix = source.matrix;
        self.ids.clone_from(&source.ids);
        self.ordered.clone_from(&source.ordered);
        self.cost_sum = source.cost_sum;
        self.max_distance = source.max_distance;
        self.normalizer = source.normalizer;
        self.seed = source.seed;
        self.rng.clone_from(&source.rng);
    }
}

impl PartialEq for Path<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other)
    }
}

impl fmt::Display for Path<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (k, city) in self.ordered.iter().enumerate() {
            if k > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", city.id())?;
        }
        f.write_str("]")
    }
}

impl fmt::Debug for Path<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Path")
            .field("ids", &self.ids)
            .field("cost_sum", &self.cost_sum)
            .field("max_distance", &self.max_distance)
            .field("normalizer", &self.normalizer)
            .field("seed", &self.seed)
            .finish()
    }
}
