//! Distance matrices.
//!
//! Provides the dense pairwise distance matrix shared by all solvers.

mod matrix;

pub use matrix::DistanceMatrix;
