//! Threshold-accepting execution loop.

use super::config::SaConfig;
use super::types::{Batch, Calibration, Phase};
use crate::error::{TspError, TspResult};
use crate::path::{Path, T_EPSILON};
use crate::tsp::Tsp;
use log::{debug, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Upper bound on doublings or halvings while bracketing the target
/// acceptance during calibration.
const MAX_BRACKET_STEPS: usize = 64;

/// Result of an annealing run.
#[derive(Debug, Clone)]
pub struct SaResult<'a> {
    /// The best tour found, after the sweep.
    pub best: Path<'a>,

    /// Normalized cost of the best tour.
    pub best_cost: f64,

    /// Temperature the cooling phase started from.
    pub initial_temperature: f64,

    /// Temperature when the search stopped.
    pub final_temperature: f64,

    /// Calibration outcome, if the temperature was calibrated.
    pub calibration: Option<Calibration>,

    /// Batches computed during cooling.
    pub batches: usize,

    /// Swap attempts during cooling.
    pub iterations: usize,

    /// Accepted swaps during cooling.
    pub accepted_moves: usize,

    /// Full passes made by the sweep.
    pub sweep_passes: usize,

    /// Whether cancelled externally. A cancelled run skips the sweep.
    pub cancelled: bool,

    /// Best cost after every batch, then after the sweep.
    pub cost_history: Vec<f64>,
}

/// Owns the working tour of one run and drives it through calibration,
/// cooling and the final sweep.
#[derive(Debug)]
pub struct Annealer<'a> {
    config: SaConfig,
    t: f64,
    current: Path<'a>,
    best: Path<'a>,
    phase: Phase,
    batches: usize,
    iterations: usize,
    accepted_moves: usize,
    sweep_passes: usize,
    cost_history: Vec<f64>,
}

impl<'a> Annealer<'a> {
    /// Creates an annealer over a fresh tour of `tsp`.
    pub fn new(tsp: &'a Tsp<'_>, config: SaConfig) -> TspResult<Self> {
        Self::with_path(tsp.path(), config)
    }

    /// Creates an annealer that starts from `path`.
    pub fn with_path(path: Path<'a>, config: SaConfig) -> TspResult<Self> {
        config.validate().map_err(TspError::config)?;
        Ok(Self {
            t: config.starting_temperature(),
            best: path.clone(),
            current: path,
            config,
            phase: Phase::Initializing,
            batches: 0,
            iterations: 0,
            accepted_moves: 0,
            sweep_passes: 0,
            cost_history: Vec::new(),
        })
    }

    pub fn temperature(&self) -> f64 {
        self.t
    }

    pub fn set_temperature(&mut self, t: f64) {
        self.t = t;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &SaConfig {
        &self.config
    }

    /// The working tour.
    pub fn current(&self) -> &Path<'a> {
        &self.current
    }

    /// The best tour seen so far.
    pub fn best(&self) -> &Path<'a> {
        &self.best
    }

    /// Best cost after each batch so far.
    pub fn cost_history(&self) -> &[f64] {
        &self.cost_history
    }

    /// Runs calibration (if no initial temperature is configured), cooling
    /// and the sweep.
    pub fn run(self) -> SaResult<'a> {
        self.run_with_cancel(None)
    }

    /// Runs with an optional cancellation token, checked once per
    /// temperature step.
    pub fn run_with_cancel(mut self, cancel: Option<Arc<AtomicBool>>) -> SaResult<'a> {
        info!(
            "annealing {} cities (seed {})",
            self.current.len(),
            self.current.seed()
        );

        let calibration = match self.config.initial_temperature {
            Some(_) => None,
            None => Some(self.initial_temperature(self.config.acceptance)),
        };
        let initial_temperature = self.t;

        let cancelled = self.threshold_accepting(cancel.as_deref());
        if !cancelled {
            self.sweep();
            self.cost_history.push(self.best.cost());
        }
        self.phase = Phase::Done;

        info!(
            "seed {}: best cost {:.16} after {} batches",
            self.best.seed(),
            self.best.cost(),
            self.batches
        );

        SaResult {
            best_cost: self.best.cost(),
            best: self.best,
            initial_temperature,
            final_temperature: self.t,
            calibration,
            batches: self.batches,
            iterations: self.iterations,
            accepted_moves: self.accepted_moves,
            sweep_passes: self.sweep_passes,
            cancelled,
            cost_history: self.cost_history,
        }
    }

    /// Fraction of `calibration_samples` random swaps accepted at the
    /// current temperature. Accepted swaps stay applied.
    pub fn accepted_percentage(&mut self) -> f64 {
        let samples = self.config.calibration_samples;
        let mut accepted = 0usize;
        for _ in 0..samples {
            let cost = self.current.cost();
            let mv = self.current.swap();
            if self.current.cost() <= cost + self.t {
                accepted += 1;
            } else {
                self.current.de_swap(mv);
            }
        }
        accepted as f64 / samples as f64
    }

    /// Searches for a temperature at which a fraction `target` of random
    /// swaps is accepted.
    ///
    /// Doubles or halves the temperature until the target is bracketed,
    /// then bisects. Stops when the measured fraction is within
    /// [`T_EPSILON`] of the target or the bracket is narrower than
    /// [`T_EPSILON`]. Leaves the annealer at the chosen temperature.
    pub fn initial_temperature(&mut self, target: f64) -> Calibration {
        self.phase = Phase::Calibrating;

        let mut measurements = 1;
        let mut p = self.accepted_percentage();
        if (p - target).abs() <= T_EPSILON {
            return Calibration {
                temperature: self.t,
                acceptance: p,
                bracket_width: 0.0,
                measurements,
            };
        }

        let (mut t1, mut t2);
        let mut steps = 0;
        if p < target {
            while p < target && steps < MAX_BRACKET_STEPS {
                self.t *= 2.0;
                p = self.accepted_percentage();
                measurements += 1;
                steps += 1;
            }
            t1 = self.t / 2.0;
            t2 = self.t;
        } else {
            while p > target && steps < MAX_BRACKET_STEPS {
                self.t /= 2.0;
                p = self.accepted_percentage();
                measurements += 1;
                steps += 1;
            }
            t1 = self.t;
            t2 = self.t * 2.0;
        }
        debug!("calibration bracket [{t1}, {t2}] after {steps} steps");

        loop {
            let tm = (t1 + t2) / 2.0;
            self.t = tm;
            // A bracket with no representable midpoint cannot shrink further.
            if t2 - t1 < T_EPSILON || tm <= t1 || tm >= t2 {
                break;
            }
            p = self.accepted_percentage();
            measurements += 1;
            debug!("calibration T={tm:.16} accepted {p:.6}");
            if (target - p).abs() <= T_EPSILON {
                break;
            }
            if p > target {
                t2 = tm;
            } else {
                t1 = tm;
            }
        }

        info!("calibrated initial temperature {:.16} (acceptance {p:.6})", self.t);
        Calibration {
            temperature: self.t,
            acceptance: p,
            bracket_width: t2 - t1,
            measurements,
        }
    }

    /// Explores at the current temperature until `batch_size` swaps are
    /// accepted or `max_iterations` attempts are spent.
    ///
    /// A swap is accepted iff it raises the cost by at most `T`; rejected
    /// swaps are undone immediately.
    pub fn compute_batch(&mut self) -> Batch<'a> {
        let mut best = self.current.clone();
        let mut best_cost = best.cost();
        let mut accepted = 0usize;
        let mut attempts = 0usize;
        let mut sum = 0.0;

        while accepted < self.config.batch_size && attempts < self.config.max_iterations {
            attempts += 1;
            let cost = self.current.cost();
            let mv = self.current.swap();
            let new_cost = self.current.cost();
            if new_cost <= cost + self.t {
                accepted += 1;
                sum += new_cost;
                if new_cost < best_cost {
                    best.clone_from(&self.current);
                    best_cost = new_cost;
                }
            } else {
                self.current.de_swap(mv);
            }
        }

        self.iterations += attempts;
        self.accepted_moves += accepted;

        let mean = if accepted > 0 {
            sum / accepted as f64
        } else {
            self.current.cost()
        };
        Batch {
            mean,
            best,
            accepted,
            attempts,
        }
    }

    /// Cooling loop. Returns `true` if cancelled.
    ///
    /// Shuffles the working tour, then at each temperature computes batches
    /// while their mean keeps improving, and multiplies `T` by `phi`. Runs
    /// until `T <= epsilon`.
    pub fn threshold_accepting(&mut self, cancel: Option<&AtomicBool>) -> bool {
        self.phase = Phase::Cooling;
        self.current.randomize();
        if self.current.cost() < self.best.cost() {
            self.best.clone_from(&self.current);
        }

        while self.t > self.config.epsilon {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                info!("seed {}: cancelled at T={:.16}", self.current.seed(), self.t);
                return true;
            }

            let mut previous = f64::MAX;
            loop {
                let batch = self.compute_batch();
                self.batches += 1;
                debug!(
                    "T={:.16} batch mean {:.16} ({} / {} accepted)",
                    self.t, batch.mean, batch.accepted, batch.attempts
                );

                let mean = batch.mean;
                if batch.best.cost() < self.best.cost() {
                    self.best = batch.best;
                }
                self.cost_history.push(self.best.cost());

                // An equal mean ends the stage, so plateaus cannot loop.
                if mean < previous {
                    previous = mean;
                } else {
                    break;
                }
            }

            info!("T: {:.16} best {:.16}", self.t, self.best.cost());
            self.t *= self.config.phi;
        }
        false
    }

    /// Pairwise-exchange local search on the best tour.
    ///
    /// Tries every transposition `(i, j)`, keeps those that lower the cost
    /// and undoes the rest. Full passes repeat until a pass improves the
    /// cost by less than [`T_EPSILON`]. The result replaces the best tour
    /// and is never worse than it.
    pub fn sweep(&mut self) -> Path<'a> {
        self.phase = Phase::Sweeping;
        let mut path = self.best.clone();
        let n = path.len();
        let mut best_cost = path.cost();

        loop {
            let pass_start = best_cost;
            for i in 0..n {
                for j in (i + 1)..n {
                    let mv = path.swap_indexes(i, j);
                    let cost = path.cost();
                    if cost < best_cost {
                        best_cost = cost;
                    } else {
                        path.de_swap(mv);
                    }
                }
            }
            self.sweep_passes += 1;
            debug!("sweep pass {}: cost {best_cost:.16}", self.sweep_passes);
            if pass_start - best_cost < T_EPSILON {
                break;
            }
        }

        self.best.clone_from(&path);
        path
    }
}
