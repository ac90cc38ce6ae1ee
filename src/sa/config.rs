//! SA configuration and neighborhood moves.

use crate::error::{Error, Result};

/// Neighborhood move used to perturb the current tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NeighborMethod {
    /// Exchange the contents of two distinct random positions.
    Swap,

    /// Relocate the element at one random position to a distinct other
    /// position.
    Insert,
}

impl Default for NeighborMethod {
    fn default() -> Self {
        NeighborMethod::Swap
    }
}

/// Configuration for the simulated annealing TSP solver.
///
/// # Examples
///
/// ```
/// use routeheur::sa::{NeighborMethod, SaConfig};
///
/// let config = SaConfig::default()
///     .with_initial_temperature(500.0)
///     .with_cooling_rate(0.999)
///     .with_max_iterations(50_000)
///     .with_neighbor_method(NeighborMethod::Insert)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Initial temperature. Higher values allow more uphill exploration.
    pub initial_temperature: f64,

    /// Geometric cooling factor in (0, 1), applied every iteration.
    pub cooling_rate: f64,

    /// Maximum number of iterations (neighbor evaluations).
    ///
    /// The run may stop earlier once the system freezes (temperature drops
    /// below 0.01).
    pub max_iterations: usize,

    /// Neighborhood move.
    pub neighbor_method: NeighborMethod,

    /// Random seed for reproducibility. `None` uses an OS seed.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 1000.0,
            cooling_rate: 0.9995,
            max_iterations: 100_000,
            neighbor_method: NeighborMethod::default(),
            seed: None,
        }
    }
}

impl SaConfig {
    /// Sets the initial temperature.
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    /// Sets the cooling rate.
    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    /// Sets the iteration budget.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the neighborhood move.
    pub fn with_neighbor_method(mut self, method: NeighborMethod) -> Self {
        self.neighbor_method = method;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration, naming the offending field on failure.
    pub fn validate(&self) -> Result<()> {
        if !self.initial_temperature.is_finite() || self.initial_temperature <= 0.0 {
            return Err(Error::config(
                "initial_temperature",
                format!("must be positive and finite, got {}", self.initial_temperature),
            ));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(Error::config(
                "cooling_rate",
                format!("must be in (0, 1), got {}", self.cooling_rate),
            ));
        }
        if self.max_iterations == 0 {
            return Err(Error::config("max_iterations", "must be at least 1"));
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
        assert!((config.initial_temperature - 1000.0).abs() < 1e-10);
        assert!((config.cooling_rate - 0.9995).abs() < 1e-10);
        assert_eq!(config.max_iterations, 100_000);
        assert_eq!(config.neighbor_method, NeighborMethod::Swap);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_validate_ok() {
        assert!(SaConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_bad_temperature() {
        assert!(SaConfig::default()
            .with_initial_temperature(0.0)
            .validate()
            .is_err());
        assert!(SaConfig::default()
            .with_initial_temperature(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_bad_cooling_rate() {
        assert!(SaConfig::default().with_cooling_rate(1.0).validate().is_err());
        assert!(SaConfig::default().with_cooling_rate(0.0).validate().is_err());
        assert!(SaConfig::default()
            .with_cooling_rate(-0.5)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_zero_iterations() {
        assert!(SaConfig::default()
            .with_max_iterations(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_names_field() {
        let err = SaConfig::default()
            .with_cooling_rate(2.0)
            .validate()
            .expect_err("invalid");
        assert!(err.to_string().contains("cooling_rate"));
    }
}
