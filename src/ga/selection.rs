//! Parent selection strategies.
//!
//! Selection operates on the fitness scores of the current population and
//! returns the index of the chosen chromosome. Both strategies assume
//! minimization (lower fitness = better).

use rand::Rng;

/// Selection strategy for choosing parents.
///
/// # Examples
///
/// ```
/// use routeheur::ga::Selection;
///
/// // Tournament of size 3 (moderate selection pressure)
/// let sel = Selection::Tournament(3);
///
/// // Fitness-proportionate roulette wheel
/// let sel = Selection::Roulette;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Tournament selection: sample `k` distinct chromosomes uniformly and
    /// keep the one with the lowest fitness.
    ///
    /// Higher `k` = stronger selection pressure. `k` is clamped to the
    /// population size.
    Tournament(usize),

    /// Roulette wheel selection with weights `1 / (fitness + 0.1)`.
    ///
    /// The 0.1 offset keeps weights finite when a route set has zero cost.
    Roulette,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    /// Selects a chromosome index from the population's fitness scores.
    ///
    /// # Panics
    ///
    /// Panics if `fitness` is empty.
    pub(crate) fn select<R: Rng>(&self, fitness: &[f64], rng: &mut R) -> usize {
        assert!(!fitness.is_empty(), "cannot select from empty population");

        match *self {
            Selection::Tournament(k) => tournament(fitness, k, rng),
            Selection::Roulette => roulette(fitness, rng),
        }
    }
}

/// Tournament: sample k distinct indices, return the lowest-fitness one.
fn tournament<R: Rng>(fitness: &[f64], k: usize, rng: &mut R) -> usize {
    let n = fitness.len();
    let k = k.clamp(1, n);

    rand::seq::index::sample(rng, n, k)
        .into_iter()
        .min_by(|&a, &b| {
            fitness[a]
                .partial_cmp(&fitness[b])
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .expect("tournament samples at least one index")
}

/// Roulette wheel over inverted fitness: weight_i = 1 / (fitness_i + 0.1).
fn roulette<R: Rng>(fitness: &[f64], rng: &mut R) -> usize {
    let n = fitness.len();
    if n == 1 {
        return 0;
    }

    let weights: Vec<f64> = fitness.iter().map(|&f| 1.0 / (f + 0.1)).collect();
    let total: f64 = weights.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return rng.random_range(0..n);
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }

    n - 1 // floating-point fallback
}
