//! Ant colony loop for the capacity-free vehicle routing problem.
//!
//! Each ant builds `num_vehicles` routes in turn, all starting and ending at
//! the depot. A route grows by the same pheromone-weighted transition rule
//! the TSP ants use, up to a per-route length cap; customers left over after
//! every vehicle is capped are dealt out round-robin.

use super::choice::select_next;
use super::config::AcoConfig;
use super::pheromone::{PheromoneMatrix, TrailView};
use crate::error::Result;
use crate::evaluation::RouteEvaluator;
use crate::models::ProblemInstance;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand::Rng;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Extra pheromone multiplier for the best-so-far route set.
const ELITE_WEIGHT: f64 = 2.0;

/// Result of an ant colony VRP run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoVrpResult {
    /// Best route set found. Each route is `[depot, c1, .., ck, depot]`;
    /// vehicles with no customers are omitted.
    pub routes: Vec<Vec<usize>>,

    /// Total cost of the best route set.
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

/// Executes the ant colony VRP solver.
///
/// # Usage
///
/// ```
/// use routeheur::aco::{AcoConfig, AcoVrpRunner};
/// use routeheur::models::{Point, ProblemInstance};
///
/// let points = vec![
///     Point::new(0.0, 0.0),
///     Point::new(0.0, 1.0),
///     Point::new(1.0, 1.0),
///     Point::new(1.0, 0.0),
/// ];
/// let instance = ProblemInstance::vrp(points, 0).unwrap();
/// let config = AcoConfig::default()
///     .with_n_ants(10)
///     .with_n_iterations(30)
///     .with_num_vehicles(2)
///     .with_seed(42);
///
/// let result = AcoVrpRunner::run(&instance, &config).unwrap();
/// assert!(!result.routes.is_empty());
/// ```
pub struct AcoVrpRunner;

impl AcoVrpRunner {
    /// Runs the colony to completion.
    pub fn run(instance: &ProblemInstance, config: &AcoConfig) -> Result<AcoVrpResult> {
        Self::run_with_cancel(instance, config, None)
    }

    /// Runs the colony with an optional cancellation token, polled once per
    /// iteration.
    pub fn run_with_cancel(
        instance: &ProblemInstance,
        config: &AcoConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AcoVrpResult> {
        config.validate()?;
        let depot = instance.require_depot()?;

        let started = Instant::now();
        let mut rng = crate::rng::seeded(config.seed);
        let evaluator = RouteEvaluator::new(instance.distances());
        let customers = instance.customers();

        let mut pheromone = PheromoneMatrix::new(instance.num_points(), config.initial_pheromone);
        let mut best: Option<Vec<Vec<usize>>> = None;
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

            // Per-ant seeded streams keep serial and parallel construction
            // identical, as in the TSP colony.
            let seeds: Vec<u64> = (0..config.n_ants).map(|_| rng.random()).collect();
            let trails = TrailView {
                pheromone: &pheromone,
                distances: instance.distances(),
            };
            let solutions: Vec<(Vec<Vec<usize>>, f64)> = if config.parallel {
                seeds
                    .par_iter()
                    .map(|&seed| construct_routes(depot, &customers, trails, config, &evaluator, seed))
                    .collect()
            } else {
                seeds
                    .iter()
                    .map(|&seed| construct_routes(depot, &customers, trails, config, &evaluator, seed))
                    .collect()
            };

            for (routes, cost) in &solutions {
                if *cost < best_cost {
                    best_cost = *cost;
                    best = Some(routes.clone());
                }
            }

            // Trail update over every route's edges, depot legs included.
            pheromone.evaporate(config.decay);
            for (routes, cost) in &solutions {
                for route in routes {
                    pheromone.reinforce_path(route, 1.0 / cost);
                }
            }
            if let Some(ref routes) = best {
                for route in routes {
                    pheromone.reinforce_path(route, ELITE_WEIGHT / best_cost);
                }
            }

            iterations = iteration + 1;
            cost_history.push(best_cost);
            if iteration % 10 == 0 {
                tracing::trace!(iteration, best_cost, "aco vrp progress");
            }
        }

        // A run cancelled before any iteration has no ant solutions; deal
        // the customers out round-robin so the result is still a valid
        // route set.
        let routes = match best {
            Some(routes) => routes,
            None => {
                let routes = round_robin_routes(depot, &customers, config.num_vehicles);
                best_cost = evaluator.routes_cost(&routes);
                routes
            }
        };

        tracing::debug!(
            iterations,
            cost = best_cost,
            cancelled,
            "aco vrp finished"
        );

        Ok(AcoVrpResult {
            routes,
            cost: best_cost,
            iterations,
            cancelled,
            cost_history,
            elapsed: started.elapsed(),
        })
    }
}

/// Builds one ant's route set and its total cost.
fn construct_routes(
    depot: usize,
    customers: &[usize],
    trails: TrailView<'_>,
    config: &AcoConfig,
    evaluator: &RouteEvaluator,
    seed: u64,
) -> (Vec<Vec<usize>>, f64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let num_vehicles = config.num_vehicles;

    // Each route may hold at most floor(customers / vehicles) + 2 stops, so
    // total capacity always covers the customer set.
    let cap = customers.len() / num_vehicles + 2;

    let mut pool: Vec<usize> = customers.to_vec();
    let mut segments: Vec<Vec<usize>> = vec![Vec::new(); num_vehicles];

    for segment in &mut segments {
        if pool.is_empty() {
            break;
        }
        let mut current = depot;
        while !pool.is_empty() && segment.len() < cap {
            let idx = select_next(current, &pool, trails, config.alpha, config.beta, &mut rng);
            current = pool.remove(idx);
            segment.push(current);
        }
    }

    // Leftovers, if the caps ever underestimate: deal them out round-robin.
    let mut vehicle = 0usize;
    while !pool.is_empty() {
        segments[vehicle % num_vehicles].push(pool.remove(0));
        vehicle += 1;
    }

    let routes: Vec<Vec<usize>> = segments
        .into_iter()
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut route = Vec::with_capacity(segment.len() + 2);
            route.push(depot);
            route.extend(segment);
            route.push(depot);
            route
        })
        .collect();

    let cost = evaluator.routes_cost(&routes);
    (routes, cost)
}

/// Depot-wrapped routes from a plain round-robin customer assignment.
fn round_robin_routes(depot: usize, customers: &[usize], num_vehicles: usize) -> Vec<Vec<usize>> {
    let mut segments: Vec<Vec<usize>> = vec![Vec::new(); num_vehicles];
    for (i, &c) in customers.iter().enumerate() {
        segments[i % num_vehicles].push(c);
    }
    segments
        .into_iter()
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut route = Vec::with_capacity(segment.len() + 2);
            route.push(depot);
            route.extend(segment);
            route.push(depot);
            route
        })
        .collect()
}
