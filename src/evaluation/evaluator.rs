//! Route cost evaluation.

use crate::distance::DistanceMatrix;

/// Computes the total traversal cost of index sequences over a distance
/// matrix.
///
/// Pure and side-effect free; every solver evaluates candidate solutions
/// through this type. No permutation validation is performed — callers
/// guarantee that sequences index into the matrix.
///
/// # Examples
///
/// ```
/// use routeheur::distance::DistanceMatrix;
/// use routeheur::evaluation::RouteEvaluator;
///
/// let dm = DistanceMatrix::from_data(3, vec![
///     0.0, 1.0, 2.0,
///     1.0, 0.0, 4.0,
///     2.0, 4.0, 0.0,
/// ]).unwrap();
/// let eval = RouteEvaluator::new(&dm);
/// assert_eq!(eval.cost(&[0, 1, 2, 0]), 1.0 + 4.0 + 2.0);
/// ```
pub struct RouteEvaluator<'a> {
    distances: &'a DistanceMatrix,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates an evaluator over the given distance matrix.
    pub fn new(distances: &'a DistanceMatrix) -> Self {
        Self { distances }
    }

    /// Sum of distances over consecutive pairs of the sequence.
    ///
    /// A sequence of fewer than two indices costs 0. O(len).
    pub fn cost(&self, sequence: &[usize]) -> f64 {
        sequence
            .windows(2)
            .map(|pair| self.distances.get(pair[0], pair[1]))
            .sum()
    }

    /// Total cost across a set of routes.
    pub fn routes_cost(&self, routes: &[Vec<usize>]) -> f64 {
        routes.iter().map(|route| self.cost(route)).sum()
    }
}
