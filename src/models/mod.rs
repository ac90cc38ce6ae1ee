//! Domain model types shared by all solvers.
//!
//! Provides the core abstractions: planar points and the immutable problem
//! instance (coordinates, distance matrix, optional depot).
//!
//! Tours and routes are represented as plain `Vec<usize>` index sequences: a
//! TSP tour is a permutation of all point indices (closed form repeats the
//! first index at the end), and a VRP route starts and ends at the depot.

mod instance;
mod point;

pub use instance::ProblemInstance;
pub use point::Point;
