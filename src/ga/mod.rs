//! Genetic algorithm for the capacity-free vehicle routing problem.
//!
//! Evolves a population of customer permutations; each chromosome is
//! decoded into vehicle routes by a fixed-position split and evaluated
//! through the shared [`RouteEvaluator`](crate::evaluation::RouteEvaluator).
//!
//! # Key types
//!
//! - [`GaConfig`]: algorithm parameters (population, rates, vehicles, selection)
//! - [`Selection`]: tournament or roulette parent selection
//! - [`GaVrpRunner`]: executes the evolutionary loop
//! - [`GaVrpResult`]: best route set with run statistics
//!
//! # Submodules
//!
//! - [`operators`]: permutation crossover (OX) and mutation operators, also
//!   used by the simulated annealing neighborhood moves
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"

mod config;
pub mod operators;
mod runner;
mod selection;

pub use config::GaConfig;
pub use runner::{GaVrpResult, GaVrpRunner};
pub use selection::Selection;
