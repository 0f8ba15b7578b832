//! Search driver configuration.

use serde::Deserialize;

/// How many independent runs to launch and on how many threads.
///
/// Run `k` uses seed `seed + k`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DriverConfig {
    /// Seed of the first run.
    pub seed: u64,

    /// Number of runs. `None` runs one per worker.
    pub runs: Option<usize>,

    /// Worker threads. `None` uses the thread pool's default (one per core).
    pub workers: Option<usize>,
}

impl DriverConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_runs(mut self, runs: usize) -> Self {
        self.runs = Some(runs);
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Seeds of all runs, in order.
    pub fn seeds(&self, default_runs: usize) -> Vec<u64> {
        let runs = self.runs.or(self.workers).unwrap_or(default_runs);
        (0..runs as u64).map(|k| self.seed.wrapping_add(k)).collect()
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.runs == Some(0) {
            return Err("runs must be positive".into());
        }
        if self.workers == Some(0) {
            return Err("workers must be positive".into());
        }
        Ok(())
    }
}
