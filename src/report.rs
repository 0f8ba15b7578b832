//! Human-readable result of one run.

use std::fmt;

use crate::sa::SaResult;

/// Summary of a finished (or cancelled) run, detached from the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Seed of the run.
    pub seed: u64,
    /// Normalized cost of the best tour.
    pub cost: f64,
    /// Raw cost (sum of edge weights) of the best tour.
    pub cost_sum: f64,
    /// Best tour as city ids.
    pub tour: Vec<usize>,
    /// Temperature the cooling started from.
    pub initial_temperature: f64,
    /// Batches computed.
    pub batches: usize,
    /// Whether the run was cancelled before finishing.
    pub cancelled: bool,
}

impl Report {
    pub fn from_result(seed: u64, result: &SaResult<'_>) -> Self {
        Self {
            seed,
            cost: result.best_cost,
            cost_sum: result.best.cost_sum(),
            tour: result.best.ids().to_vec(),
            initial_temperature: result.initial_temperature,
            batches: result.batches,
            cancelled: result.cancelled,
        }
    }

    /// The tour as `[id0,id1,...]`.
    pub fn tour_string(&self) -> String {
        let ids: Vec<String> = self.tour.iter().map(usize::to_string).collect();
        format!("[{}]", ids.join(","))
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Best[{}]: {:.16}", self.seed, self.cost)?;
        write!(f, "{}", self.tour_string())
    }
}

/// The report with the lowest cost, if any.
pub fn best_of(reports: &[Report]) -> Option<&Report> {
    reports.iter().min_by(|a, b| a.cost.total_cmp(&b.cost))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(seed: u64, cost: f64) -> Report {
        Report {
            seed,
            cost,
            cost_sum: cost * 10.0,
            tour: vec![3, 1, 2],
            initial_temperature: 1.0,
            batches: 4,
            cancelled: false,
        }
    }

    #[test]
    fn test_display_format() {
        let r = report(7, 0.40625);
        assert_eq!(r.to_string(), "Best[7]: 0.4062500000000000\n[3,1,2]");
    }

    #[test]
    fn test_tour_string_edge_cases() {
        let mut r = report(0, 1.0);
        r.tour = vec![];
        assert_eq!(r.tour_string(), "[]");
        r.tour = vec![42];
        assert_eq!(r.tour_string(), "[42]");
    }

    #[test]
    fn test_best_of() {
        let reports = vec![report(1, 0.5), report(2, 0.25), report(3, 0.75)];
        assert_eq!(best_of(&reports).unwrap().seed, 2);
        assert!(best_of(&[]).is_none());
    }
}
