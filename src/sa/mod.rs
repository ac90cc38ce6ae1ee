//! Simulated annealing for the traveling salesman problem.
//!
//! A single-trajectory local search over tour permutations. Worsening moves
//! are accepted with a probability that decreases as the temperature cools
//! geometrically, letting the search escape local optima early and settle
//! later. The run stops at the iteration budget or once the system freezes.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"

mod config;
mod runner;

pub use config::{NeighborMethod, SaConfig};
pub use runner::{SaResult, SaRunner};
