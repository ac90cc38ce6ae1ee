//! Ant colony optimization for TSP and VRP.
//!
//! A colony of ants constructs solutions each iteration, biased by pheromone
//! trails and inverse distance. Trails evaporate geometrically and are
//! reinforced by every ant in proportion to solution quality, with an extra
//! elitist deposit along the best solution found so far.
//!
//! # Key types
//!
//! - [`AcoConfig`]: shared colony parameters for both problem variants
//! - [`AcoTspRunner`] / [`AcoTspResult`]: single closed tour over all points
//! - [`AcoVrpRunner`] / [`AcoVrpResult`]: depot-wrapped routes, one per vehicle
//!
//! # References
//!
//! - Dorigo & Stutzle (2004), *Ant Colony Optimization*
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
//!   Colony of Cooperating Agents"

mod choice;
mod config;
mod pheromone;
mod tsp;
mod vrp;

pub use config::AcoConfig;
pub use tsp::{AcoTspResult, AcoTspRunner};
pub use vrp::{AcoVrpResult, AcoVrpRunner};
