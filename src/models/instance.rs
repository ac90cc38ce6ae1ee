//! Problem instance snapshot.

use crate::distance::DistanceMatrix;
use crate::error::{Error, Result};

use super::Point;

/// An immutable snapshot of a routing problem: point coordinates, the
/// pairwise distance matrix, and (for VRP) a depot index.
///
/// Shared, read-only input to every solver. All solver entry points take
/// `&ProblemInstance`, so one instance may back concurrently running solver
/// invocations.
///
/// # Examples
///
/// ```
/// use routeheur::models::{Point, ProblemInstance};
///
/// let points = vec![
///     Point::new(0.0, 0.0),
///     Point::new(0.0, 1.0),
///     Point::new(1.0, 1.0),
///     Point::new(1.0, 0.0),
/// ];
/// let tsp = ProblemInstance::tsp(points.clone()).unwrap();
/// assert_eq!(tsp.num_points(), 4);
/// assert!(tsp.depot().is_none());
///
/// let vrp = ProblemInstance::vrp(points, 0).unwrap();
/// assert_eq!(vrp.depot(), Some(0));
/// assert_eq!(vrp.customers(), vec![1, 2, 3]);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProblemInstance {
    points: Vec<Point>,
    distances: DistanceMatrix,
    depot: Option<usize>,
}

impl ProblemInstance {
    /// Creates a TSP instance with a Euclidean distance matrix.
    pub fn tsp(points: Vec<Point>) -> Result<Self> {
        let distances = DistanceMatrix::from_points(&points);
        Self::with_matrix(points, distances, None)
    }

    /// Creates a VRP instance with a Euclidean distance matrix and the given
    /// depot index.
    pub fn vrp(points: Vec<Point>, depot: usize) -> Result<Self> {
        let distances = DistanceMatrix::from_points(&points);
        Self::with_matrix(points, distances, Some(depot))
    }

    /// Creates an instance from an explicit distance matrix.
    ///
    /// Rejects fewer than 2 points, a matrix whose size does not match the
    /// point count, and an out-of-range depot.
    pub fn with_matrix(
        points: Vec<Point>,
        distances: DistanceMatrix,
        depot: Option<usize>,
    ) -> Result<Self> {
        let n = points.len();
        if n < 2 {
            return Err(Error::InvalidInstance(format!(
                "need at least 2 points, got {n}"
            )));
        }
        if distances.size() != n {
            return Err(Error::InvalidInstance(format!(
                "distance matrix size {} does not match point count {n}",
                distances.size()
            )));
        }
        if let Some(depot) = depot {
            if depot >= n {
                return Err(Error::InvalidInstance(format!(
                    "depot index {depot} out of range for {n} points"
                )));
            }
        }
        Ok(Self {
            points,
            distances,
            depot,
        })
    }

    /// All point coordinates, indexed by point identity.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of points, including the depot if any.
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// The pairwise distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Depot index, if this is a VRP instance.
    pub fn depot(&self) -> Option<usize> {
        self.depot
    }

    /// The depot index, or an error for instances built without one.
    ///
    /// Used by the VRP runners, which cannot operate depot-free.
    pub(crate) fn require_depot(&self) -> Result<usize> {
        self.depot.ok_or_else(|| {
            Error::InvalidInstance("VRP solver requires an instance with a depot".into())
        })
    }

    /// Customer indices: every point index except the depot.
    ///
    /// For a TSP instance (no depot) this is all indices.
    pub fn customers(&self) -> Vec<usize> {
        (0..self.points.len())
            .filter(|&i| Some(i) != self.depot)
            .collect()
    }

    /// Number of customers (points excluding the depot).
    pub fn num_customers(&self) -> usize {
        self.points.len() - usize::from(self.depot.is_some())
    }
}
