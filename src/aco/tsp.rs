//! Ant colony loop for the traveling salesman problem.

use super::choice::select_next;
use super::config::AcoConfig;
use super::pheromone::{PheromoneMatrix, TrailView};
use crate::error::Result;
use crate::evaluation::RouteEvaluator;
use crate::models::ProblemInstance;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Extra pheromone multiplier for the best-so-far tour (elitist strategy).
const ELITE_WEIGHT: f64 = 2.0;

/// Result of an ant colony TSP run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoTspResult {
    /// Best tour found, in open form (one entry per point; the return to
    /// the start city is implied, and included in `cost`).
    pub tour: Vec<usize>,

    /// Cost of the best tour, closing edge included.
    pub cost: f64,

    /// Number of colony iterations completed.
    pub iterations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best cost at the end of each iteration.
    pub cost_history: Vec<f64>,

    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

/// Executes the ant colony TSP solver.
///
/// # Usage
///
/// ```
/// use routeheur::aco::{AcoConfig, AcoTspRunner};
/// use routeheur::models::{Point, ProblemInstance};
///
/// let points = vec![
///     Point::new(0.0, 0.0),
///     Point::new(0.0, 1.0),
///     Point::new(1.0, 1.0),
///     Point::new(1.0, 0.0),
/// ];
/// let instance = ProblemInstance::tsp(points).unwrap();
/// let config = AcoConfig::default()
///     .with_n_ants(10)
///     .with_n_iterations(50)
///     .with_seed(42);
///
/// let result = AcoTspRunner::run(&instance, &config).unwrap();
/// assert_eq!(result.tour.len(), 4); // open form, return edge implied
/// ```
pub struct AcoTspRunner;

impl AcoTspRunner {
    /// Runs the colony to completion.
    pub fn run(instance: &ProblemInstance, config: &AcoConfig) -> Result<AcoTspResult> {
        Self::run_with_cancel(instance, config, None)
    }

    /// Runs the colony with an optional cancellation token, polled once per
    /// iteration.
    pub fn run_with_cancel(
        instance: &ProblemInstance,
        config: &AcoConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AcoTspResult> {
        config.validate()?;

        let started = Instant::now();
        let mut rng = crate::rng::seeded(config.seed);
        let evaluator = RouteEvaluator::new(instance.distances());
        let n = instance.num_points();

        let mut pheromone = PheromoneMatrix::new(n, config.initial_pheromone);
        let mut best: Option<Vec<usize>> = None;
        let mut best_cost = f64::INFINITY;
        let mut cost_history = Vec::with_capacity(config.n_iterations);
        let mut iterations = 0usize;
        let mut cancelled = false;

        for iteration in 0..config.n_iterations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            // Each ant gets its own seeded stream, so the construction phase
            // produces identical tours whether it runs serially or on the
            // rayon pool.
            let seeds: Vec<u64> = (0..config.n_ants).map(|_| rng.random()).collect();
            let trails = TrailView {
                pheromone: &pheromone,
                distances: instance.distances(),
            };
            let tours: Vec<(Vec<usize>, f64)> = if config.parallel {
                seeds
                    .par_iter()
                    .map(|&seed| construct_tour(n, trails, config, &evaluator, seed))
                    .collect()
            } else {
                seeds
                    .iter()
                    .map(|&seed| construct_tour(n, trails, config, &evaluator, seed))
                    .collect()
            };

            for (tour, cost) in &tours {
                if *cost < best_cost {
                    best_cost = *cost;
                    best = Some(tour.clone());
                }
            }

            // Trail update: evaporate, then every ant deposits proportional
            // to its tour quality, then the best tour gets an elitist bonus.
            pheromone.evaporate(config.decay);
            for (tour, cost) in &tours {
                pheromone.reinforce_path(tour, 1.0 / cost);
            }
            if let Some(ref tour) = best {
                pheromone.reinforce_path(tour, ELITE_WEIGHT / best_cost);
            }

            iterations = iteration + 1;
            cost_history.push(best_cost);
            if iteration % 10 == 0 {
                tracing::trace!(iteration, best_cost, "aco tsp progress");
            }
        }

        // A run cancelled before any iteration has no ant tours to report;
        // fall back to the identity tour.
        let mut tour = match best {
            Some(tour) => tour,
            None => {
                let mut tour: Vec<usize> = (0..n).collect();
                tour.push(0);
                best_cost = evaluator.cost(&tour);
                tour
            }
        };
        // Tours are closed internally (cost and reinforcement need the
        // return edge); the reported tour is open.
        tour.pop();

        tracing::debug!(
            iterations,
            cost = best_cost,
            cancelled,
            "aco tsp finished"
        );

        Ok(AcoTspResult {
            tour,
            cost: best_cost,
            iterations,
            cancelled,
            cost_history,
            elapsed: started.elapsed(),
        })
    }
}

/// Builds one ant's closed tour from a random start city.
fn construct_tour(
    n: usize,
    trails: TrailView<'_>,
    config: &AcoConfig,
    evaluator: &RouteEvaluator,
    seed: u64,
) -> (Vec<usize>, f64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let start = rng.random_range(0..n);

    let mut tour = Vec::with_capacity(n + 1);
    tour.push(start);
    let mut pool: Vec<usize> = (0..n).filter(|&c| c != start).collect();

    let mut current = start;
    while !pool.is_empty() {
        let idx = select_next(current, &pool, trails, config.alpha, config.beta, &mut rng);
        current = pool.swap_remove(idx);
        tour.push(current);
    }
    tour.push(start);

    let cost = evaluator.cost(&tour);
    (tour, cost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Point;
    use std::collections::HashSet;

    fn unit_square() -> ProblemInstance {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, 0.0),
        ];
        ProblemInstance::tsp(points).expect("valid instance")
    }

    fn assert_open_permutation(tour: &[usize], n: usize) {
        assert_eq!(tour.len(), n, "open tour has one entry per point");
        let unique: HashSet<usize> = tour.iter().copied().collect();
        assert_eq!(unique.len(), n, "tour is not a permutation: {tour:?}");
        assert!(tour.iter().all(|&i| i < n));
    }

    #[test]
    fn test_finds_unit_square_optimum() {
        let instance = unit_square();
        let config = AcoConfig::default()
            .with_n_ants(10)
            .with_n_iterations(50)
            .with_seed(42);

        let result = AcoTspRunner::run(&instance, &config).expect("run succeeds");
        assert_open_permutation(&result.tour, 4);
        assert!(
            (result.cost - 4.0).abs() < 1e-9,
            "expected optimal tour cost 4.0, got {}",
            result.cost
        );
    }

    #[test]
    fn test_tour_is_permutation_on_larger_instance() {
        let points: Vec<Point> = (0..15)
            .map(|i| Point::new(f64::from(i % 5), f64::from(i / 5)))
            .collect();
        let instance = ProblemInstance::tsp(points).expect("valid instance");
        let config = AcoConfig::default()
            .with_n_ants(10)
            .with_n_iterations(30)
            .with_seed(7);

        let result = AcoTspRunner::run(&instance, &config).expect("run succeeds");
        assert_open_permutation(&result.tour, 15);
    }

    #[test]
    fn test_cost_history_non_increasing() {
        let instance = unit_square();
        let config = AcoConfig::default()
            .with_n_ants(5)
            .with_n_iterations(40)
            .with_seed(42);

        let result = AcoTspRunner::run(&instance, &config).expect("run succeeds");
        assert_eq!(result.cost_history.len(), 40);
        for window in result.cost_history.windows(2) {
            assert!(
                window[1] <= window[0] + 1e-12,
                "best cost should be non-increasing: {} > {}",
                window[1],
                window[0]
            );
        }
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let instance = unit_square();
        let config = AcoConfig::default()
            .with_n_ants(8)
            .with_n_iterations(20)
            .with_seed(123);

        let a = AcoTspRunner::run(&instance, &config).expect("run succeeds");
        let b = AcoTspRunner::run(&instance, &config).expect("run succeeds");
        assert_eq!(a.tour, b.tour);
        assert_eq!(a.cost, b.cost);
    }

    #[test]
    fn test_parallel_construction_matches_serial() {
        // Ant streams are seeded per iteration, so the rayon pool and the
        // serial path build the same tours.
        let instance = unit_square();
        let base = AcoConfig::default()
            .with_n_ants(8)
            .with_n_iterations(20)
            .with_seed(5);

        let serial = AcoTspRunner::run(&instance, &base.clone().with_parallel(false))
            .expect("run succeeds");
        let parallel =
            AcoTspRunner::run(&instance, &base.with_parallel(true)).expect("run succeeds");
        assert_eq!(serial.tour, parallel.tour);
        assert_eq!(serial.cost, parallel.cost);
    }

    #[test]
    fn test_cancellation_before_start() {
        let instance = unit_square();
        let config = AcoConfig::default().with_seed(42);
        let cancel = Arc::new(AtomicBool::new(true));

        let result = AcoTspRunner::run_with_cancel(&instance, &config, Some(cancel))
            .expect("run succeeds");
        assert!(result.cancelled);
        assert_eq!(result.iterations, 0);
        // Even a cancelled run reports a valid tour.
        assert_open_permutation(&result.tour, 4);
        assert!(result.cost.is_finite());
    }

    #[test]
    fn test_rejects_invalid_config() {
        let instance = unit_square();
        let config = AcoConfig::default().with_decay(1.5);
        assert!(AcoTspRunner::run(&instance, &config).is_err());
    }

    #[test]
    fn test_coincident_points() {
        // Duplicate coordinates exercise the distance clamp in the
        // transition rule.
        let instance = ProblemInstance::tsp(vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
        ])
        .expect("valid instance");
        let config = AcoConfig::default()
            .with_n_ants(5)
            .with_n_iterations(10)
            .with_seed(42);

        let result = AcoTspRunner::run(&instance, &config).expect("run succeeds");
        assert_open_permutation(&result.tour, 3);
        assert!((result.cost - 2.0).abs() < 1e-9);
    }
}
