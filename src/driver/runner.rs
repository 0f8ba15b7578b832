//! Fan-out of independent annealing runs.
//!
//! Every run builds its own [`Tsp`] (and so its own filled weight table),
//! annealer and RNG stream. The catalog is the only shared data and is
//! read-only. Runs never communicate; the optional cancellation flag is
//! the single cross-run signal.

use super::config::DriverConfig;
use crate::catalog::Catalog;
use crate::error::{TspError, TspResult};
use crate::report::Report;
use crate::sa::{Annealer, SaConfig};
use crate::tsp::{validate_ids, Tsp};
use log::info;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Launches one annealing run per seed over a shared catalog.
#[derive(Debug, Clone)]
pub struct Driver<'c> {
    catalog: &'c Catalog,
    ids: Vec<usize>,
    annealer: SaConfig,
    config: DriverConfig,
}

impl<'c> Driver<'c> {
    /// Validates the city list and both configurations.
    pub fn new(
        catalog: &'c Catalog,
        ids: &[usize],
        annealer: SaConfig,
        config: DriverConfig,
    ) -> TspResult<Self> {
        validate_ids(ids, catalog.len())?;
        annealer.validate().map_err(TspError::config)?;
        config.validate().map_err(TspError::config)?;
        Ok(Self {
            catalog,
            ids: ids.to_vec(),
            annealer,
            config,
        })
    }

    /// Runs every seed to completion. Reports come back in seed order.
    pub fn run(&self) -> TspResult<Vec<Report>> {
        self.run_with_cancel(None)
    }

    /// Runs every seed, stopping each run early once `cancel` is set.
    pub fn run_with_cancel(&self, cancel: Option<Arc<AtomicBool>>) -> TspResult<Vec<Report>> {
        self.execute(cancel)
    }

    #[cfg(feature = "parallel")]
    fn execute(&self, cancel: Option<Arc<AtomicBool>>) -> TspResult<Vec<Report>> {
        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(workers) = self.config.workers {
            builder = builder.num_threads(workers);
        }
        let pool = builder
            .build()
            .map_err(|e| TspError::config(format!("cannot start worker pool: {e}")))?;

        let seeds = self.config.seeds(pool.current_num_threads());
        info!(
            "launching {} runs of {} cities on {} workers",
            seeds.len(),
            self.ids.len(),
            pool.current_num_threads()
        );

        pool.install(|| {
            seeds
                .par_iter()
                .map(|&seed| self.solve(seed, cancel.clone()))
                .collect()
        })
    }

    #[cfg(not(feature = "parallel"))]
    fn execute(&self, cancel: Option<Arc<AtomicBool>>) -> TspResult<Vec<Report>> {
        let seeds = self.config.seeds(1);
        info!("launching {} runs of {} cities", seeds.len(), self.ids.len());
        seeds
            .iter()
            .map(|&seed| self.solve(seed, cancel.clone()))
            .collect()
    }

    /// One complete run: instance, annealing, report.
    pub fn solve(&self, seed: u64, cancel: Option<Arc<AtomicBool>>) -> TspResult<Report> {
        let tsp = Tsp::new(self.catalog, &self.ids, seed)?;
        let result = Annealer::new(&tsp, self.annealer.clone())?.run_with_cancel(cancel);
        Ok(Report::from_result(seed, &result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testing::synthetic;

    fn quick_config() -> SaConfig {
        SaConfig::default()
            .with_initial_temperature(0.1)
            .with_max_iterations(200)
            .with_batch_size(50)
            .with_epsilon(0.005)
            .with_phi(0.85)
    }

    #[test]
    fn test_rejects_invalid_input_up_front() {
        let catalog = synthetic(10, 1.0, 1);
        assert!(matches!(
            Driver::new(&catalog, &[1, 20], quick_config(), DriverConfig::default()),
            Err(TspError::CityOutOfRange { id: 20, max: 10 })
        ));
        assert!(matches!(
            Driver::new(&catalog, &[1, 2], quick_config().with_phi(1.5), DriverConfig::default()),
            Err(TspError::Config { .. })
        ));
        assert!(matches!(
            Driver::new(&catalog, &[1, 2], quick_config(), DriverConfig::default().with_runs(0)),
            Err(TspError::Config { .. })
        ));
    }

    #[test]
    fn test_reports_in_seed_order() {
        let catalog = synthetic(12, 0.8, 2);
        let ids: Vec<usize> = (1..=12).collect();
        let config = DriverConfig::default().with_seed(5).with_runs(4).with_workers(2);
        let driver = Driver::new(&catalog, &ids, quick_config(), config).unwrap();

        let reports = driver.run().unwrap();

        let seeds: Vec<u64> = reports.iter().map(|r| r.seed).collect();
        assert_eq!(seeds, vec![5, 6, 7, 8]);
        for r in &reports {
            let mut tour = r.tour.clone();
            tour.sort_unstable();
            assert_eq!(tour, ids);
            assert!(!r.cancelled);
        }
    }

    #[test]
    fn test_runs_match_sequential_solve() {
        let catalog = synthetic(10, 0.7, 3);
        let ids: Vec<usize> = (1..=10).collect();
        let config = DriverConfig::default().with_seed(40).with_runs(3).with_workers(3);
        let driver = Driver::new(&catalog, &ids, quick_config(), config).unwrap();

        let parallel = driver.run().unwrap();
        for report in &parallel {
            let alone = driver.solve(report.seed, None).unwrap();
            assert_eq!(&alone, report);
        }
    }

    #[test]
    fn test_cancelled_runs_report_cancelled() {
        let catalog = synthetic(8, 1.0, 4);
        let ids: Vec<usize> = (1..=8).collect();
        let config = DriverConfig::default().with_runs(2).with_workers(1);
        let driver = Driver::new(&catalog, &ids, quick_config(), config).unwrap();

        let reports = driver
            .run_with_cancel(Some(Arc::new(AtomicBool::new(true))))
            .unwrap();

        assert_eq!(reports.len(), 2);
        assert!(reports.iter().all(|r| r.cancelled && r.batches == 0));
    }
}
