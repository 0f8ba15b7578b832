//! Dense square distance table indexed by city id.

/// A dense, symmetric `(N+1)×(N+1)` weight table.
///
/// Ids are 1-based, so row and column 0 exist but are never used. A stored
/// value of `0.0` means "no known edge" in the raw catalog table; in a filled
/// table every off-diagonal entry is populated.
///
/// Storage is a single flat buffer with bounds-checked row-major indexing.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    size: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Creates an all-zero table for ids `1..=n`.
    pub fn new(n: usize) -> Self {
        let size = n + 1;
        Self {
            size,
            data: vec![0.0; size * size],
        }
    }

    /// Largest valid id.
    pub fn max_id(&self) -> usize {
        self.size - 1
    }

    #[inline]
    fn offset(&self, a: usize, b: usize) -> usize {
        assert!(
            a < self.size && b < self.size,
            "matrix index ({a}, {b}) out of bounds for ids 0..={}",
            self.size - 1
        );
        a * self.size + b
    }

    /// Weight stored for `(a, b)`.
    ///
    /// # Panics
    /// Panics if either id exceeds [`max_id`](Self::max_id).
    #[inline]
    pub fn get(&self, a: usize, b: usize) -> f64 {
        self.data[self.offset(a, b)]
    }

    /// Stores `weight` at both `(a, b)` and `(b, a)`.
    pub fn set_symmetric(&mut self, a: usize, b: usize, weight: f64) {
        let ab = self.offset(a, b);
        let ba = self.offset(b, a);
        self.data[ab] = weight;
        self.data[ba] = weight;
    }

    /// Returns the weight if the edge is known (non-zero).
    #[inline]
    pub fn known(&self, a: usize, b: usize) -> Option<f64> {
        let w = self.get(a, b);
        if w != 0.0 {
            Some(w)
        } else {
            None
        }
    }

    /// Number of distinct known edges `(a, b)` with `a < b`.
    pub fn known_edge_count(&self) -> usize {
        (1..self.size)
            .map(|a| ((a + 1)..self.size).filter(|&b| self.get(a, b) != 0.0).count())
            .sum()
    }
}
