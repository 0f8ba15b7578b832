//! Annealer state and per-step results.

use crate::path::Path;

/// Lifecycle of an [`Annealer`](super::Annealer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Constructed, nothing run yet.
    Initializing,
    /// Searching for an initial temperature.
    Calibrating,
    /// Threshold accepting with geometric cooling.
    Cooling,
    /// Pairwise-exchange refinement of the best tour.
    Sweeping,
    /// Finished.
    Done,
}

/// One burst of neighbor exploration at a fixed temperature.
#[derive(Debug, Clone)]
pub struct Batch<'a> {
    /// Mean cost over the accepted steps of this batch.
    ///
    /// Equals the working tour's cost when nothing was accepted.
    pub mean: f64,

    /// Lowest-cost tour seen during the batch.
    pub best: Path<'a>,

    /// Accepted swaps.
    pub accepted: usize,

    /// Swap attempts, accepted or not.
    pub attempts: usize,
}

/// Outcome of the initial-temperature search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    /// The temperature chosen.
    pub temperature: f64,

    /// The last acceptance fraction measured.
    pub acceptance: f64,

    /// Width of the bisection bracket when the search stopped.
    /// Zero if the starting temperature already met the target.
    pub bracket_width: f64,

    /// Number of acceptance measurements taken.
    pub measurements: usize,
}
