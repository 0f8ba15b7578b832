//! Threshold-accepting configuration.

use serde::Deserialize;

/// Starting temperature for calibration when none is configured.
pub const DEFAULT_TEMPERATURE: f64 = 14.0;

/// Configuration for the threshold-accepting annealer.
///
/// # Examples
///
/// ```
/// use tsp_sa::sa::SaConfig;
///
/// let config = SaConfig::default()
///     .with_initial_temperature(8.0)
///     .with_batch_size(500)
///     .with_phi(0.9);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SaConfig {
    /// Initial temperature. `None` calibrates one from
    /// [`acceptance`](Self::acceptance), starting at [`DEFAULT_TEMPERATURE`].
    pub initial_temperature: Option<f64>,

    /// Maximum swap attempts in one batch, accepted or not.
    pub max_iterations: usize,

    /// Accepted swaps that complete a batch.
    pub batch_size: usize,

    /// The search stops once the temperature drops to this value.
    pub epsilon: f64,

    /// Geometric cooling factor in (0, 1): `T ← phi · T`.
    pub phi: f64,

    /// Target fraction of accepted swaps for calibration, in (0, 1].
    pub acceptance: f64,

    /// Trial swaps per acceptance measurement during calibration.
    pub calibration_samples: usize,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: None,
            max_iterations: 2000,
            batch_size: 1200,
            epsilon: 0.002,
            phi: 0.95,
            acceptance: 0.85,
            calibration_samples: 9000,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = Some(t);
        self
    }

    /// Clears the initial temperature so it is calibrated.
    pub fn with_calibration(mut self) -> Self {
        self.initial_temperature = None;
        self
    }

    pub fn with_max_iterations(mut self, m: usize) -> Self {
        self.max_iterations = m;
        self
    }

    pub fn with_batch_size(mut self, l: usize) -> Self {
        self.batch_size = l;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_phi(mut self, phi: f64) -> Self {
        self.phi = phi;
        self
    }

    pub fn with_acceptance(mut self, p: f64) -> Self {
        self.acceptance = p;
        self
    }

    pub fn with_calibration_samples(mut self, n: usize) -> Self {
        self.calibration_samples = n;
        self
    }

    /// The temperature the search starts from before any calibration.
    pub fn starting_temperature(&self) -> f64 {
        self.initial_temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(t) = self.initial_temperature {
            if !(t > 0.0 && t.is_finite()) {
                return Err(format!("initial_temperature must be positive, got {t}"));
            }
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be positive".into());
        }
        if self.batch_size == 0 {
            return Err("batch_size must be positive".into());
        }
        if !(self.epsilon > 0.0 && self.epsilon.is_finite()) {
            return Err(format!("epsilon must be positive, got {}", self.epsilon));
        }
        if self.phi <= 0.0 || self.phi >= 1.0 || self.phi.is_nan() {
            return Err(format!("phi must be in (0, 1), got {}", self.phi));
        }
        if self.acceptance <= 0.0 || self.acceptance > 1.0 || self.acceptance.is_nan() {
            return Err(format!("acceptance must be in (0, 1], got {}", self.acceptance));
        }
        if self.calibration_samples == 0 {
            return Err("calibration_samples must be positive".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SaConfig::default();
        assert_eq!(config.initial_temperature, None);
        assert_eq!(config.max_iterations, 2000);
        assert_eq!(config.batch_size, 1200);
        assert!((config.epsilon - 0.002).abs() < 1e-15);
        assert!((config.phi - 0.95).abs() < 1e-15);
        assert_eq!(config.calibration_samples, 9000);
        assert_eq!(config.starting_temperature(), DEFAULT_TEMPERATURE);
    }

    #[test]
    fn test_validate_ok() {
        assert!(SaConfig::default().validate().is_ok());
        assert!(SaConfig::default()
            .with_initial_temperature(3.0)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_bad_temperature() {
        let config = SaConfig::default().with_initial_temperature(-1.0);
        assert!(config.validate().is_err());
        let config = SaConfig::default().with_initial_temperature(f64::INFINITY);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_phi() {
        for phi in [0.0, 1.0, 1.5, f64::NAN] {
            assert!(SaConfig::default().with_phi(phi).validate().is_err(), "phi {phi}");
        }
    }

    #[test]
    fn test_validate_bad_acceptance() {
        assert!(SaConfig::default().with_acceptance(0.0).validate().is_err());
        assert!(SaConfig::default().with_acceptance(1.2).validate().is_err());
        assert!(SaConfig::default().with_acceptance(1.0).validate().is_ok());
    }

    #[test]
    fn test_validate_zero_counts() {
        assert!(SaConfig::default().with_batch_size(0).validate().is_err());
        assert!(SaConfig::default().with_max_iterations(0).validate().is_err());
        assert!(SaConfig::default()
            .with_calibration_samples(0)
            .validate()
            .is_err());
        assert!(SaConfig::default().with_epsilon(0.0).validate().is_err());
    }

    #[test]
    fn test_with_calibration_clears_temperature() {
        let config = SaConfig::default()
            .with_initial_temperature(5.0)
            .with_calibration();
        assert_eq!(config.initial_temperature, None);
    }

    #[test]
    fn test_deserialize_partial_toml() {
        let config: SaConfig = toml::from_str("phi = 0.9\nbatch_size = 300\n").unwrap();
        assert!((config.phi - 0.9).abs() < 1e-15);
        assert_eq!(config.batch_size, 300);
        assert_eq!(config.max_iterations, 2000);
    }

    #[test]
    fn test_deserialize_rejects_unknown_keys() {
        assert!(toml::from_str::<SaConfig>("temprature = 3.0\n").is_err());
    }
}
