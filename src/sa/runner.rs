//! SA execution loop for the traveling salesman problem.

use super::config::{NeighborMethod, SaConfig};
use crate::error::Result;
use crate::evaluation::RouteEvaluator;
use crate::ga::operators::{insert_mutation, swap_mutation};
use crate::models::ProblemInstance;
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Below this temperature the system is considered frozen and the run stops.
const FROZEN_TEMPERATURE: f64 = 0.01;

/// Cancellation and history sampling cadence, in iterations.
const POLL_INTERVAL: usize = 1000;

/// Result of a simulated annealing run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaResult {
    /// Best tour found, in closed form (the first index is repeated at the
    /// end to represent the return to start).
    pub tour: Vec<usize>,

    /// Cost of the best tour.
    pub cost: f64,

    /// Total number of iterations (neighbor evaluations).
    pub iterations: usize,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of improving moves.
    pub improving_moves: usize,

    /// Temperature when the run stopped.
    pub final_temperature: f64,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best cost sampled at a fixed iteration cadence.
    pub cost_history: Vec<f64>,

    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

/// Executes the simulated annealing TSP solver.
///
/// # Usage
///
/// ```
/// use routeheur::models::{Point, ProblemInstance};
/// use routeheur::sa::{SaConfig, SaRunner};
///
/// let points = vec![
///     Point::new(0.0, 0.0),
///     Point::new(0.0, 1.0),
///     Point::new(1.0, 1.0),
///     Point::new(1.0, 0.0),
/// ];
/// let instance = ProblemInstance::tsp(points).unwrap();
/// let config = SaConfig::default().with_seed(42);
///
/// let result = SaRunner::run(&instance, &config).unwrap();
/// assert_eq!(result.tour.len(), 5); // 4 points, closed
/// ```
pub struct SaRunner;

impl SaRunner {
    /// Runs SA to completion.
    pub fn run(instance: &ProblemInstance, config: &SaConfig) -> Result<SaResult> {
        Self::run_with_cancel(instance, config, None)
    }

    /// Runs SA with an optional cancellation token, polled every 1000
    /// iterations.
    pub fn run_with_cancel(
        instance: &ProblemInstance,
        config: &SaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SaResult> {
        config.validate()?;

        let started = Instant::now();
        let mut rng = crate::rng::seeded(config.seed);
        let evaluator = RouteEvaluator::new(instance.distances());
        let n = instance.num_points();

        // Initial state: uniformly random permutation of all points.
        let mut current: Vec<usize> = (0..n).collect();
        current.shuffle(&mut rng);
        let mut current_cost = closed_tour_cost(&current, &evaluator);

        let mut best = current.clone();
        let mut best_cost = current_cost;

        let mut temperature = config.initial_temperature;
        let mut iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut cancelled = false;
        let mut cost_history = vec![best_cost];

        for iteration in 0..config.max_iterations {
            if temperature < FROZEN_TEMPERATURE {
                break;
            }
            if iteration % POLL_INTERVAL == 0 {
                if let Some(ref flag) = cancel {
                    if flag.load(Ordering::Relaxed) {
                        cancelled = true;
                        break;
                    }
                }
                if iteration > 0 {
                    cost_history.push(best_cost);
                    tracing::trace!(iteration, best_cost, temperature, "sa progress");
                }
            }

            // Perturb the current tour.
            let mut neighbor = current.clone();
            match config.neighbor_method {
                NeighborMethod::Swap => swap_mutation(&mut neighbor, &mut rng),
                NeighborMethod::Insert => insert_mutation(&mut neighbor, &mut rng),
            }
            let neighbor_cost = closed_tour_cost(&neighbor, &evaluator);
            let delta = neighbor_cost - current_cost;

            // Metropolis acceptance criterion.
            let accept = if delta < 0.0 {
                improving_moves += 1;
                true
            } else {
                rng.random_range(0.0..1.0) < (-delta / temperature).exp()
            };

            // Best-so-far tracking is decoupled from the Markov chain: every
            // evaluated neighbor can improve the best, accepted or not.
            if neighbor_cost < best_cost {
                best = neighbor.clone();
                best_cost = neighbor_cost;
            }

            if accept {
                current = neighbor;
                current_cost = neighbor_cost;
                accepted_moves += 1;
            }

            temperature *= config.cooling_rate;
            iterations += 1;
        }

        if cost_history
            .last()
            .is_none_or(|&last| (last - best_cost).abs() > 1e-15)
        {
            cost_history.push(best_cost);
        }

        // Close the best tour.
        if let Some(&first) = best.first() {
            if best.last() != Some(&first) {
                best.push(first);
            }
        }

        tracing::debug!(
            iterations,
            cost = best_cost,
            final_temperature = temperature,
            cancelled,
            "sa finished"
        );

        Ok(SaResult {
            tour: best,
            cost: best_cost,
            iterations,
            accepted_moves,
            improving_moves,
            final_temperature: temperature,
            cancelled,
            cost_history,
            elapsed: started.elapsed(),
        })
    }
}

/// Cost of the tour including the closing edge back to its first point.
fn closed_tour_cost(tour: &[usize], evaluator: &RouteEvaluator) -> f64 {
    let open = evaluator.cost(tour);
    match (tour.first(), tour.last()) {
        (Some(&first), Some(&last)) if first != last => {
            open + evaluator.cost(&[last, first])
        }
        _ => open,
    }
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

    fn assert_closed_permutation(tour: &[usize], n: usize) {
        assert_eq!(tour.len(), n + 1, "closed tour repeats the first index");
        assert_eq!(tour.first(), tour.last());
        let unique: HashSet<usize> = tour[..n].iter().copied().collect();
        assert_eq!(unique.len(), n, "tour is not a permutation: {tour:?}");
        assert!(tour[..n].iter().all(|&i| i < n));
    }

    #[test]
    fn test_finds_unit_square_optimum() {
        let instance = unit_square();
        let config = SaConfig::default()
            .with_initial_temperature(10.0)
            .with_cooling_rate(0.995)
            .with_max_iterations(20_000)
            .with_seed(42);

        let result = SaRunner::run(&instance, &config).expect("run succeeds");
        assert_closed_permutation(&result.tour, 4);
        assert!(
            (result.cost - 4.0).abs() < 1e-9,
            "expected optimal tour cost 4.0, got {}",
            result.cost
        );
    }

    #[test]
    fn test_insert_neighborhood() {
        let instance = unit_square();
        let config = SaConfig::default()
            .with_initial_temperature(10.0)
            .with_cooling_rate(0.995)
            .with_max_iterations(20_000)
            .with_neighbor_method(NeighborMethod::Insert)
            .with_seed(42);

        let result = SaRunner::run(&instance, &config).expect("run succeeds");
        assert_closed_permutation(&result.tour, 4);
        assert!((result.cost - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_tour_is_permutation_on_larger_instance() {
        let points: Vec<Point> = (0..12)
            .map(|i| Point::new(f64::from(i % 4), f64::from(i / 4)))
            .collect();
        let instance = ProblemInstance::tsp(points).expect("valid instance");
        let config = SaConfig::default()
            .with_max_iterations(5_000)
            .with_seed(7);

        let result = SaRunner::run(&instance, &config).expect("run succeeds");
        assert_closed_permutation(&result.tour, 12);
    }

    #[test]
    fn test_freezes_below_threshold() {
        let instance = unit_square();
        let config = SaConfig::default()
            .with_initial_temperature(1.0)
            .with_cooling_rate(0.5)
            .with_max_iterations(1_000_000)
            .with_seed(42);

        let result = SaRunner::run(&instance, &config).expect("run succeeds");
        // 1.0 * 0.5^k < 0.01 after 7 coolings.
        assert!(result.iterations < 100, "frozen system should stop early");
        assert!(result.final_temperature < FROZEN_TEMPERATURE);
    }

    #[test]
    fn test_respects_iteration_budget() {
        let instance = unit_square();
        let config = SaConfig::default()
            .with_initial_temperature(1e9)
            .with_cooling_rate(0.999999)
            .with_max_iterations(500)
            .with_seed(42);

        let result = SaRunner::run(&instance, &config).expect("run succeeds");
        assert_eq!(result.iterations, 500);
    }

    #[test]
    fn test_cost_history_non_increasing() {
        let instance = unit_square();
        let config = SaConfig::default()
            .with_max_iterations(10_000)
            .with_seed(42);

        let result = SaRunner::run(&instance, &config).expect("run succeeds");
        for window in result.cost_history.windows(2) {
            assert!(
                window[1] <= window[0] + 1e-12,
                "best cost history should be non-increasing: {} > {}",
                window[1],
                window[0]
            );
        }
    }

    #[test]
    fn test_high_temperature_accepts_uphill() {
        let points: Vec<Point> = (0..10)
            .map(|i| Point::new(f64::from(i), f64::from(i % 3)))
            .collect();
        let instance = ProblemInstance::tsp(points).expect("valid instance");
        let config = SaConfig::default()
            .with_initial_temperature(1e8)
            .with_cooling_rate(0.9999)
            .with_max_iterations(2_000)
            .with_seed(42);

        let result = SaRunner::run(&instance, &config).expect("run succeeds");
        // At extreme temperature nearly every move is accepted.
        assert!(result.accepted_moves > result.improving_moves);
        let ratio = result.accepted_moves as f64 / result.iterations as f64;
        assert!(ratio > 0.8, "expected high acceptance ratio, got {ratio}");
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let instance = unit_square();
        let config = SaConfig::default()
            .with_max_iterations(5_000)
            .with_seed(99);

        let a = SaRunner::run(&instance, &config).expect("run succeeds");
        let b = SaRunner::run(&instance, &config).expect("run succeeds");
        assert_eq!(a.tour, b.tour);
        assert_eq!(a.cost, b.cost);
        assert_eq!(a.iterations, b.iterations);
    }

    #[test]
    fn test_cancellation_before_start() {
        let instance = unit_square();
        let config = SaConfig::default().with_seed(42);
        let cancel = Arc::new(AtomicBool::new(true));

        let result =
            SaRunner::run_with_cancel(&instance, &config, Some(cancel)).expect("run succeeds");
        assert!(result.cancelled);
        assert_eq!(result.iterations, 0);
        // Even a cancelled run reports a valid closed tour.
        assert_closed_permutation(&result.tour, 4);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let instance = unit_square();
        let config = SaConfig::default().with_cooling_rate(1.5);
        assert!(SaRunner::run(&instance, &config).is_err());
    }

    #[test]
    fn test_two_point_instance() {
        let instance = ProblemInstance::tsp(vec![
            Point::new(0.0, 0.0),
            Point::new(3.0, 4.0),
        ])
        .expect("valid instance");
        let config = SaConfig::default()
            .with_max_iterations(100)
            .with_seed(42);

        let result = SaRunner::run(&instance, &config).expect("run succeeds");
        assert_closed_permutation(&result.tour, 2);
        assert!((result.cost - 10.0).abs() < 1e-9);
    }
}
