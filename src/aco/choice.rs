//! Probabilistic transition rule for ant construction.

use super::pheromone::TrailView;
use rand::Rng;

/// Distances are clamped to this floor before entering the heuristic term,
/// so coincident points do not produce infinite attractiveness.
const MIN_DISTANCE: f64 = 0.1;

/// Picks the next point for an ant, returning a position into `candidates`.
///
/// Each candidate `c` is weighted by
/// `pheromone(current, c)^alpha * (1 / max(0.1, distance(current, c)))^beta`
/// and one is drawn proportionally. When the weights sum to zero or are not
/// finite the draw falls back to uniform, so construction always progresses.
///
/// `candidates` must be non-empty.
pub(crate) fn select_next<R: Rng>(
    current: usize,
    candidates: &[usize],
    trails: TrailView<'_>,
    alpha: f64,
    beta: f64,
    rng: &mut R,
) -> usize {
    debug_assert!(!candidates.is_empty());

    let weights: Vec<f64> = candidates
        .iter()
        .map(|&c| {
            let tau = trails.pheromone.get(current, c).powf(alpha);
            let eta = (1.0 / trails.distances.get(current, c).max(MIN_DISTANCE)).powf(beta);
            tau * eta
        })
        .collect();

    let total: f64 = weights.iter().sum();
    if !(total > 0.0) || !total.is_finite() {
        return rng.random_range(0..candidates.len());
    }

    // Strict comparison so a threshold of exactly 0.0 cannot land on a
    // zero-weight candidate.
    let threshold = rng.random_range(0.0..1.0) * total;
    let mut cumulative = 0.0;
    for (idx, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return idx;
        }
    }
    // Floating point shortfall; take the last candidate.
    candidates.len() - 1
}
