//! Metaheuristic solvers for the traveling salesman problem and the
//! capacity-free vehicle routing problem.
//!
//! Provides three solver families over a shared problem model:
//!
//! - **Simulated Annealing (SA)**: single-trajectory TSP search with
//!   Metropolis acceptance and geometric cooling.
//! - **Ant Colony Optimization (ACO)**: pheromone-guided construction with
//!   an elitist update, in TSP and VRP variants.
//! - **Genetic Algorithm (GA)**: population-based VRP search over customer
//!   permutations with order crossover and a fixed-position route split.
//!
//! # Architecture
//!
//! A [`models::ProblemInstance`] is an immutable snapshot of the problem
//! (points, distance matrix, optional depot). Solvers take `&ProblemInstance`
//! plus a per-algorithm config and keep all search state local to the
//! invocation, so one instance may back concurrent runs. Every runner offers
//! `run_with_cancel` for cooperative cancellation through an
//! `Arc<AtomicBool>`, and every config takes an optional seed for
//! reproducible runs.
//!
//! # Example
//!
//! ```
//! use routeheur::models::{Point, ProblemInstance};
//! use routeheur::sa::{SaConfig, SaRunner};
//!
//! let points = vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(0.0, 1.0),
//!     Point::new(1.0, 1.0),
//!     Point::new(1.0, 0.0),
//! ];
//! let instance = ProblemInstance::tsp(points)?;
//! let config = SaConfig::default().with_seed(42);
//! let result = SaRunner::run(&instance, &config)?;
//! assert!((result.cost - 4.0).abs() < 1e-9);
//! # Ok::<(), routeheur::Error>(())
//! ```

pub mod aco;
pub mod distance;
mod error;
pub mod evaluation;
pub mod ga;
pub mod models;
mod rng;
pub mod sa;

pub use error::{Error, Result};
