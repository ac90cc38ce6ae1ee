//! ACO configuration.

use crate::error::{Error, Result};

/// Configuration shared by both ant colony solvers.
///
/// The TSP and VRP runners take the same parameter set; `num_vehicles` is
/// only read by the VRP runner.
///
/// # Examples
///
/// ```
/// use routeheur::aco::AcoConfig;
///
/// let config = AcoConfig::default()
///     .with_n_ants(20)
///     .with_n_iterations(100)
///     .with_beta(2.5)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoConfig {
    /// Number of ants constructing a solution each iteration.
    pub n_ants: usize,

    /// Number of colony iterations.
    pub n_iterations: usize,

    /// Pheromone retention factor in (0, 1); every entry is multiplied by
    /// this each iteration (evaporation).
    pub decay: f64,

    /// Pheromone influence exponent (≥ 0).
    pub alpha: f64,

    /// Inverse-distance influence exponent (≥ 0).
    pub beta: f64,

    /// Uniform pheromone level at colony start (> 0).
    pub initial_pheromone: f64,

    /// Number of vehicle routes each ant builds. VRP runner only.
    pub num_vehicles: usize,

    /// Whether ants construct their tours in parallel using rayon.
    ///
    /// Pheromone evaporation and reinforcement always run serially after
    /// all ants of an iteration have finished.
    pub parallel: bool,

    /// Random seed for reproducibility. `None` uses an OS seed.
    pub seed: Option<u64>,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            n_ants: 30,
            n_iterations: 200,
            decay: 0.9,
            alpha: 1.0,
            beta: 3.0,
            initial_pheromone: 0.1,
            num_vehicles: 5,
            parallel: false,
            seed: None,
        }
    }
}

impl AcoConfig {
    /// Sets the number of ants.
    pub fn with_n_ants(mut self, n: usize) -> Self {
        self.n_ants = n;
        self
    }

    /// Sets the number of iterations.
    pub fn with_n_iterations(mut self, n: usize) -> Self {
        self.n_iterations = n;
        self
    }

    /// Sets the pheromone retention factor.
    pub fn with_decay(mut self, decay: f64) -> Self {
        self.decay = decay;
        self
    }

    /// Sets the pheromone influence exponent.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the inverse-distance influence exponent.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Sets the initial pheromone level.
    pub fn with_initial_pheromone(mut self, pheromone: f64) -> Self {
        self.initial_pheromone = pheromone;
        self
    }

    /// Sets the number of vehicles (VRP runner only).
    pub fn with_num_vehicles(mut self, n: usize) -> Self {
        self.num_vehicles = n;
        self
    }

    /// Enables or disables parallel ant construction.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration, naming the offending field on failure.
    pub fn validate(&self) -> Result<()> {
        if self.n_ants == 0 {
            return Err(Error::config("n_ants", "must be at least 1"));
        }
        if self.n_iterations == 0 {
            return Err(Error::config("n_iterations", "must be at least 1"));
        }
        if !(self.decay > 0.0 && self.decay < 1.0) {
            return Err(Error::config(
                "decay",
                format!("must be in (0, 1), got {}", self.decay),
            ));
        }
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(Error::config(
                "alpha",
                format!("must be non-negative and finite, got {}", self.alpha),
            ));
        }
        if !self.beta.is_finite() || self.beta < 0.0 {
            return Err(Error::config(
                "beta",
                format!("must be non-negative and finite, got {}", self.beta),
            ));
        }
        if !self.initial_pheromone.is_finite() || self.initial_pheromone <= 0.0 {
            return Err(Error::config(
                "initial_pheromone",
                format!("must be positive and finite, got {}", self.initial_pheromone),
            ));
        }
        if self.num_vehicles == 0 {
            return Err(Error::config("num_vehicles", "must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AcoConfig::default();
        assert_eq!(config.n_ants, 30);
        assert_eq!(config.n_iterations, 200);
        assert!((config.decay - 0.9).abs() < 1e-10);
        assert!((config.alpha - 1.0).abs() < 1e-10);
        assert!((config.beta - 3.0).abs() < 1e-10);
        assert!((config.initial_pheromone - 0.1).abs() < 1e-10);
        assert_eq!(config.num_vehicles, 5);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = AcoConfig::default()
            .with_n_ants(10)
            .with_n_iterations(50)
            .with_decay(0.95)
            .with_alpha(2.0)
            .with_beta(1.0)
            .with_initial_pheromone(0.5)
            .with_num_vehicles(3)
            .with_parallel(true)
            .with_seed(42);

        assert_eq!(config.n_ants, 10);
        assert_eq!(config.n_iterations, 50);
        assert!((config.decay - 0.95).abs() < 1e-10);
        assert!((config.alpha - 2.0).abs() < 1e-10);
        assert!((config.beta - 1.0).abs() < 1e-10);
        assert!((config.initial_pheromone - 0.5).abs() < 1e-10);
        assert_eq!(config.num_vehicles, 3);
        assert!(config.parallel);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_validate_ok() {
        assert!(AcoConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_counts() {
        assert!(AcoConfig::default().with_n_ants(0).validate().is_err());
        assert!(AcoConfig::default().with_n_iterations(0).validate().is_err());
        assert!(AcoConfig::default().with_num_vehicles(0).validate().is_err());
    }

    #[test]
    fn test_validate_bad_decay() {
        assert!(AcoConfig::default().with_decay(0.0).validate().is_err());
        assert!(AcoConfig::default().with_decay(1.0).validate().is_err());
        assert!(AcoConfig::default().with_decay(-0.1).validate().is_err());
    }

    #[test]
    fn test_validate_negative_exponents() {
        assert!(AcoConfig::default().with_alpha(-1.0).validate().is_err());
        assert!(AcoConfig::default().with_beta(-0.5).validate().is_err());
    }

    #[test]
    fn test_validate_zero_alpha_beta_ok() {
        // Zero exponents flatten the weighting but are valid.
        assert!(AcoConfig::default()
            .with_alpha(0.0)
            .with_beta(0.0)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_bad_initial_pheromone() {
        assert!(AcoConfig::default()
            .with_initial_pheromone(0.0)
            .validate()
            .is_err());
        assert!(AcoConfig::default()
            .with_initial_pheromone(f64::INFINITY)
            .validate()
            .is_err());
    }
}
