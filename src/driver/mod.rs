//! Parallel search driver.
//!
//! Runs several fully independent annealing runs, one per seed, on a
//! bounded worker pool and collects their [`Report`](crate::report::Report)s.

mod config;
mod runner;

pub use config::DriverConfig;
pub use runner::Driver;
