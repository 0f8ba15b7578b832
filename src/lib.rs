//! Traveling Salesman tours by Threshold Accepting.
//!
//! Solves tours over a subset of a fixed city catalog whose road distances
//! are only partially known. Missing edges are synthesized from great-circle
//! distances, scaled so they are comparable with the known ones.
//!
//! - **Catalog**: cities and the sparse table of known road distances,
//!   loaded once and shared read-only.
//! - **Path**: a tour with an incrementally maintained, normalized cost and
//!   reversible swaps.
//! - **Tsp**: one instance (city subset, seed, filled weight table).
//! - **Threshold Accepting (SA)**: temperature calibration, batched cooling
//!   and a final pairwise-exchange sweep.
//! - **Driver**: many independent seeded runs on a worker pool.
//!
//! # Example
//!
//! ```no_run
//! use tsp_sa::{Catalog, Driver, DriverConfig, SaConfig};
//!
//! let catalog = Catalog::from_dir("data")?;
//! let ids = tsp_sa::parse_ids("1,2,3,4,5,6,7,54,163,164")?;
//! let driver = Driver::new(&catalog, &ids, SaConfig::default(), DriverConfig::default())?;
//! for report in driver.run()? {
//!     println!("{report}");
//! }
//! # Ok::<(), tsp_sa::TspError>(())
//! ```

pub mod catalog;
pub mod driver;
pub mod error;
pub mod input;
pub mod matrix;
pub mod path;
pub mod random;
pub mod report;
pub mod sa;
pub mod tsp;

pub use catalog::{Catalog, City};
pub use driver::{Driver, DriverConfig};
pub use error::{TspError, TspResult};
pub use input::{parse_ids, read_ids_file};
pub use matrix::DistanceMatrix;
pub use path::{Path, SwapMove, T_EPSILON};
pub use report::Report;
pub use sa::{Annealer, SaConfig, SaResult};
pub use tsp::Tsp;
