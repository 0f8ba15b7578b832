//! Threshold Accepting.
//!
//! A deterministic-acceptance variant of Simulated Annealing: a neighbor is
//! accepted whenever its cost exceeds the current cost by at most the
//! temperature `T`. Exploration happens in batches at a fixed `T`; the
//! temperature cools geometrically once batch means stop improving. The
//! best tour found is polished by an exhaustive pairwise-exchange sweep.
//!
//! # References
//!
//! - Dueck & Scheuer (1990), "Threshold Accepting: A General Purpose
//!   Optimization Algorithm Appearing Superior to Simulated Annealing"
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"

mod config;
mod runner;
mod types;

pub use config::{SaConfig, DEFAULT_TEMPERATURE};
pub use runner::{Annealer, SaResult};
pub use types::{Batch, Calibration, Phase};
