//! GA evolutionary loop for the vehicle routing problem.
//!
//! Chromosomes are permutations of the customer indices (depot excluded).
//! Fitness partitions a chromosome into `num_vehicles` contiguous,
//! near-equal-length segments, wraps each non-empty segment with the depot,
//! and sums route costs. The partition is a fixed-position split, not an
//! optimized cut.

use super::config::GaConfig;
use super::operators::{order_crossover, swap_mutation};
use crate::error::Result;
use crate::evaluation::RouteEvaluator;
use crate::models::ProblemInstance;
use rand::seq::SliceRandom;
use rand::Rng;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Result of a GA VRP run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaVrpResult {
    /// Best route set found. Each route is `[depot, c1, .., ck, depot]`;
    /// vehicles with no customers are omitted.
    pub routes: Vec<Vec<usize>>,

    /// Total cost of the best route set.
    pub cost: f64,

    /// Number of generations evaluated.
    pub generations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best cost at the end of each generation.
    pub cost_history: Vec<f64>,

    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

/// Executes the genetic algorithm VRP solver.
///
/// # Usage
///
/// ```
/// use routeheur::models::{Point, ProblemInstance};
/// use routeheur::ga::{GaConfig, GaVrpRunner};
///
/// let points = vec![
///     Point::new(0.0, 0.0),
///     Point::new(0.0, 1.0),
///     Point::new(1.0, 1.0),
///     Point::new(1.0, 0.0),
/// ];
/// let instance = ProblemInstance::vrp(points, 0).unwrap();
/// let config = GaConfig::default()
///     .with_num_vehicles(1)
///     .with_generations(50)
///     .with_seed(42);
///
/// let result = GaVrpRunner::run(&instance, &config).unwrap();
/// assert_eq!(result.routes.len(), 1);
/// ```
pub struct GaVrpRunner;

impl GaVrpRunner {
    /// Runs the GA to completion.
    pub fn run(instance: &ProblemInstance, config: &GaConfig) -> Result<GaVrpResult> {
        Self::run_with_cancel(instance, config, None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// The token is polled once per generation; a cancelled run returns the
    /// best route set found so far with `cancelled` set.
    pub fn run_with_cancel(
        instance: &ProblemInstance,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaVrpResult> {
        config.validate()?;
        let depot = instance.require_depot()?;

        let started = Instant::now();
        let mut rng = crate::rng::seeded(config.seed);
        let evaluator = RouteEvaluator::new(instance.distances());
        let customers = instance.customers();

        // Initial population: uniformly random customer permutations.
        let mut population: Vec<Vec<usize>> = (0..config.population_size)
            .map(|_| {
                let mut chromosome = customers.clone();
                chromosome.shuffle(&mut rng);
                chromosome
            })
            .collect();

        let mut best_chromosome = population[0].clone();
        let mut best_cost = f64::INFINITY;
        let mut cost_history = Vec::with_capacity(config.generations);
        let mut generations_run = 0usize;
        let mut cancelled = false;

        for gen in 0..config.generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            // 1. Evaluate fitness for the whole population.
            let fitness = evaluate_population(
                &population,
                depot,
                config.num_vehicles,
                &evaluator,
                config.parallel,
            );

            // 2. Track the best chromosome seen across all generations.
            let (elite_idx, &gen_best) = fitness
                .iter()
                .enumerate()
                .min_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
                .expect("population is non-empty");
            if gen_best < best_cost {
                best_cost = gen_best;
                best_chromosome = population[elite_idx].clone();
            }

            generations_run = gen + 1;
            cost_history.push(best_cost);
            if gen % 10 == 0 {
                tracing::trace!(generation = gen, best_cost, "ga progress");
            }

            // 3. Build the next population: elitism, then selected offspring.
            let mut next_gen: Vec<Vec<usize>> = Vec::with_capacity(config.population_size);
            next_gen.push(population[elite_idx].clone());

            while next_gen.len() < config.population_size {
                let p1 = config.selection.select(&fitness, &mut rng);
                let p2 = config.selection.select(&fitness, &mut rng);

                let (mut child1, mut child2) =
                    if rng.random_range(0.0..1.0) < config.crossover_rate {
                        order_crossover(&population[p1], &population[p2], &mut rng)
                    } else {
                        (population[p1].clone(), population[p2].clone())
                    };

                if rng.random_range(0.0..1.0) < config.mutation_rate {
                    swap_mutation(&mut child1, &mut rng);
                }
                if rng.random_range(0.0..1.0) < config.mutation_rate {
                    swap_mutation(&mut child2, &mut rng);
                }

                next_gen.push(child1);
                if next_gen.len() < config.population_size {
                    next_gen.push(child2);
                }
            }

            population = next_gen;
        }

        let routes = split_into_routes(&best_chromosome, depot, config.num_vehicles);
        // A run cancelled before the first evaluation never priced a
        // chromosome; cost the fallback route set directly.
        if !best_cost.is_finite() {
            best_cost = evaluator.routes_cost(&routes);
            cost_history.push(best_cost);
        }
        tracing::debug!(
            generations = generations_run,
            cost = best_cost,
            cancelled,
            "ga vrp finished"
        );

        Ok(GaVrpResult {
            routes,
            cost: best_cost,
            generations: generations_run,
            cancelled,
            cost_history,
            elapsed: started.elapsed(),
        })
    }
}

/// Fitness of every chromosome, optionally in parallel.
fn evaluate_population(
    population: &[Vec<usize>],
    depot: usize,
    num_vehicles: usize,
    evaluator: &RouteEvaluator,
    parallel: bool,
) -> Vec<f64> {
    if parallel {
        population
            .par_iter()
            .map(|c| chromosome_cost(c, depot, num_vehicles, evaluator))
            .collect()
    } else {
        population
            .iter()
            .map(|c| chromosome_cost(c, depot, num_vehicles, evaluator))
            .collect()
    }
}

/// Total route-set cost of one chromosome under the fixed-position split.
fn chromosome_cost(
    chromosome: &[usize],
    depot: usize,
    num_vehicles: usize,
    evaluator: &RouteEvaluator,
) -> f64 {
    evaluator.routes_cost(&split_into_routes(chromosome, depot, num_vehicles))
}

/// Partitions a chromosome into near-equal contiguous segments and wraps each
/// non-empty segment with the depot.
///
/// With `base = len / num_vehicles` and `extra = len % num_vehicles`, the
/// first `extra` segments take `base + 1` customers and the rest take `base`.
/// Empty segments produce no route.
fn split_into_routes(chromosome: &[usize], depot: usize, num_vehicles: usize) -> Vec<Vec<usize>> {
    let base = chromosome.len() / num_vehicles;
    let extra = chromosome.len() % num_vehicles;

    let mut routes = Vec::with_capacity(num_vehicles);
    let mut start = 0;
    for v in 0..num_vehicles {
        let len = base + usize::from(v < extra);
        let segment = &chromosome[start..start + len];
        start += len;
        if segment.is_empty() {
            continue;
        }
        let mut route = Vec::with_capacity(segment.len() + 2);
        route.push(depot);
        route.extend_from_slice(segment);
        route.push(depot);
        routes.push(route);
    }
    routes
}
