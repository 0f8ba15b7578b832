//! # tsp-sa CLI
//!
//! Loads a city catalog, runs one threshold-accepting search per seed and
//! prints the best tour of each run.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use serde::Deserialize;
use tsp_sa::report::best_of;
use tsp_sa::{Catalog, Driver, DriverConfig, SaConfig, TspError};

/// Command-line interface for tsp-sa
#[derive(Parser)]
#[command(name = "tsp-sa")]
#[command(about = "Traveling Salesman tours by Threshold Accepting")]
#[command(long_about = "Searches a short tour over a subset of a city catalog:
  tsp-sa --cities 1,2,3,4,5,6,7,54        # one run per core
  tsp-sa --cities-file tsp40.txt -w 4 -s 100
  tsp-sa --cities-file tsp150.txt --params tuned.toml

Catalog directory must contain cities.csv and connections.csv.")]
#[command(version)]
struct Cli {
    /// Directory holding cities.csv and connections.csv
    #[arg(long, default_value = "data")]
    data: PathBuf,

    /// City ids, comma or whitespace separated
    #[arg(long, conflicts_with = "cities_file")]
    cities: Option<String>,

    /// File with city ids, one per line or comma separated
    #[arg(long)]
    cities_file: Option<PathBuf>,

    /// Initial temperature (calibrated when omitted)
    #[arg(short = 't', long)]
    temperature: Option<f64>,

    /// Maximum swap attempts per batch
    #[arg(short = 'm', long)]
    max_iterations: Option<usize>,

    /// Accepted swaps per batch
    #[arg(short = 'l', long)]
    batch_size: Option<usize>,

    /// Final temperature
    #[arg(short = 'e', long)]
    epsilon: Option<f64>,

    /// Cooling factor
    #[arg(long)]
    phi: Option<f64>,

    /// Target acceptance for calibration
    #[arg(short = 'p', long)]
    acceptance: Option<f64>,

    /// Trial swaps per calibration measurement
    #[arg(short = 'n', long)]
    samples: Option<usize>,

    /// Seed of the first run; run k uses seed + k
    #[arg(short = 's', long)]
    seed: Option<u64>,

    /// Worker threads (and runs, unless the params file sets runs)
    #[arg(short = 'w', long)]
    workers: Option<usize>,

    /// TOML file with [annealer] and [driver] sections
    #[arg(long)]
    params: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Layout of a `--params` file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ParamsFile {
    annealer: SaConfig,
    driver: DriverConfig,
}

impl Cli {
    /// Parameter file values with command-line flags applied on top.
    fn params(&self) -> Result<ParamsFile> {
        let mut params = match &self.params {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                toml::from_str::<ParamsFile>(&text)
                    .map_err(TspError::from)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            None => ParamsFile::default(),
        };

        let sa = &mut params.annealer;
        if let Some(t) = self.temperature {
            sa.initial_temperature = Some(t);
        }
        if let Some(m) = self.max_iterations {
            sa.max_iterations = m;
        }
        if let Some(l) = self.batch_size {
            sa.batch_size = l;
        }
        if let Some(e) = self.epsilon {
            sa.epsilon = e;
        }
        if let Some(phi) = self.phi {
            sa.phi = phi;
        }
        if let Some(p) = self.acceptance {
            sa.acceptance = p;
        }
        if let Some(n) = self.samples {
            sa.calibration_samples = n;
        }

        let driver = &mut params.driver;
        if let Some(seed) = self.seed {
            driver.seed = seed;
        }
        if let Some(w) = self.workers {
            driver.workers = Some(w);
        }
        Ok(params)
    }

    fn city_ids(&self) -> Result<Vec<usize>> {
        let ids = match (&self.cities, &self.cities_file) {
            (Some(text), _) => tsp_sa::parse_ids(text)?,
            (None, Some(path)) => tsp_sa::read_ids_file(path)
                .with_context(|| format!("reading city list {}", path.display()))?,
            (None, None) => return Err(TspError::MissingCityList.into()),
        };
        Ok(ids)
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    let ids = cli.city_ids()?;
    let params = cli.params()?;

    let catalog = Catalog::from_dir(&cli.data)
        .with_context(|| format!("loading catalog from {}", cli.data.display()))?;

    let driver = Driver::new(&catalog, &ids, params.annealer, params.driver)?;
    let reports = driver.run()?;

    for report in &reports {
        println!("{report}");
    }
    if let Some(best) = best_of(&reports) {
        info!("best of {} runs: seed {} cost {:.16}", reports.len(), best.seed, best.cost);
    }
    Ok(())
}
