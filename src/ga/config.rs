//! GA configuration.

use super::selection::Selection;
use crate::error::{Error, Result};

/// Configuration for the genetic algorithm VRP solver.
///
/// # Defaults
///
/// ```
/// use routeheur::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.generations, 300);
/// assert_eq!(config.num_vehicles, 5);
/// ```
///
/// # Builder pattern
///
/// ```
/// use routeheur::ga::{GaConfig, Selection};
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_selection(Selection::Roulette)
///     .with_num_vehicles(3)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of chromosomes in the population.
    pub population_size: usize,

    /// Number of generations to evolve.
    pub generations: usize,

    /// Probability of mutating each offspring (0.0–1.0).
    pub mutation_rate: f64,

    /// Probability of applying order crossover to a parent pair (0.0–1.0).
    ///
    /// When crossover is not applied, the children are copies of the parents.
    pub crossover_rate: f64,

    /// Number of vehicle routes the chromosome is partitioned into.
    pub num_vehicles: usize,

    /// Parent selection strategy.
    pub selection: Selection,

    /// Whether to evaluate chromosome fitness in parallel using rayon.
    pub parallel: bool,

    /// Random seed for reproducibility. `None` uses an OS seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 300,
            mutation_rate: 0.2,
            crossover_rate: 0.8,
            num_vehicles: 5,
            selection: Selection::default(),
            parallel: false,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the number of vehicles.
    pub fn with_num_vehicles(mut self, n: usize) -> Self {
        self.num_vehicles = n;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Enables or disables parallel fitness evaluation.
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
        if self.population_size == 0 {
            return Err(Error::config("population_size", "must be at least 1"));
        }
        if self.generations == 0 {
            return Err(Error::config("generations", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(Error::config(
                "mutation_rate",
                format!("must be in [0, 1], got {}", self.mutation_rate),
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(Error::config(
                "crossover_rate",
                format!("must be in [0, 1], got {}", self.crossover_rate),
            ));
        }
        if self.num_vehicles == 0 {
            return Err(Error::config("num_vehicles", "must be at least 1"));
        }
        if let Selection::Tournament(k) = self.selection {
            if k == 0 {
                return Err(Error::config("selection", "tournament size must be at least 1"));
            }
        }
        Ok(())
    }
}
