//! Dense distance matrix.

use crate::error::{Error, Result};
use crate::models::Point;

/// A dense n×n distance matrix stored in row-major order.
///
/// Built once per problem instance and never mutated afterwards. Supports
/// both Euclidean construction from point coordinates and explicit distance
/// data; explicit data is validated finite and non-negative.
///
/// # Examples
///
/// ```
/// use routeheur::models::Point;
/// use routeheur::distance::DistanceMatrix;
///
/// let points = vec![
///     Point::new(0.0, 0.0),
///     Point::new(3.0, 4.0),
///     Point::new(0.0, 8.0),
/// ];
/// let dm = DistanceMatrix::from_points(&points);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes a Euclidean distance matrix from point coordinates.
    pub fn from_points(points: &[Point]) -> Self {
        let n = points.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = points[i].distance_to(&points[j]);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Creates a distance matrix from an explicit n×n grid.
    ///
    /// Rejects data whose length is not `size * size`, and any entry that is
    /// negative or non-finite.
    pub fn from_data(size: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != size * size {
            return Err(Error::InvalidInstance(format!(
                "distance matrix expects {} entries for size {size}, got {}",
                size * size,
                data.len()
            )));
        }
        for (idx, &d) in data.iter().enumerate() {
            if !d.is_finite() || d < 0.0 {
                return Err(Error::InvalidInstance(format!(
                    "distance entry ({}, {}) is {d}; distances must be finite and non-negative",
                    idx / size,
                    idx % size
                )));
            }
        }
        Ok(Self { data, size })
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }
}
