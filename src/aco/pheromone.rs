//! Pheromone trail matrix.

use crate::distance::DistanceMatrix;

/// Dense symmetric pheromone matrix over point pairs.
///
/// Fresh per solver invocation; trails never leak between runs. Deposits
/// are applied in both directions since the problems are symmetric.
#[derive(Debug, Clone)]
pub(crate) struct PheromoneMatrix {
    data: Vec<f64>,
    size: usize,
}

impl PheromoneMatrix {
    /// Creates a matrix with every trail set to `initial`.
    pub(crate) fn new(size: usize, initial: f64) -> Self {
        Self {
            data: vec![initial; size * size],
            size,
        }
    }

    /// Trail level on the edge `(i, j)`.
    #[inline]
    pub(crate) fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.size + j]
    }

    /// Multiplies every trail by `decay`.
    pub(crate) fn evaporate(&mut self, decay: f64) {
        for level in &mut self.data {
            *level *= decay;
        }
    }

    /// Adds `amount` to the edge `(i, j)` in both directions.
    #[inline]
    pub(crate) fn deposit(&mut self, i: usize, j: usize, amount: f64) {
        self.data[i * self.size + j] += amount;
        self.data[j * self.size + i] += amount;
    }

    /// Deposits `amount` on every consecutive edge of `path`.
    pub(crate) fn reinforce_path(&mut self, path: &[usize], amount: f64) {
        for pair in path.windows(2) {
            self.deposit(pair[0], pair[1], amount);
        }
    }
}

/// Evaluator-compatible view used by the transition rule.
///
/// The rule needs pheromone and distance for the same edge; bundling the
/// two references keeps the ant construction signatures short.
#[derive(Clone, Copy)]
pub(crate) struct TrailView<'a> {
    pub(crate) pheromone: &'a PheromoneMatrix,
    pub(crate) distances: &'a DistanceMatrix,
}
