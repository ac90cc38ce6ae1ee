//! Permutation crossover and mutation operators.
//!
//! These operate on `&[usize]` index sequences whose elements are distinct
//! (customer indices with the depot excluded, or full TSP permutations) and
//! are shared between the genetic algorithm and the simulated annealing
//! neighborhood moves.
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains" (OX)

use rand::Rng;

/// Order Crossover (OX) for permutations.
///
/// Preserves the relative order of elements from both parents.
///
/// # Algorithm (Davis, 1985)
///
/// 1. Select a random segment `[start, end]`
/// 2. Copy the segment into each child from the corresponding parent
/// 3. Fill the remaining positions, starting just after the segment end and
///    wrapping around, with the other parent's elements in their original
///    order, skipping elements already present
///
/// Elements need not be `0..n`; any set of distinct indices works, so
/// depot-free customer permutations can be crossed directly.
///
/// # Panics
///
/// Panics if the parents have different lengths or are empty.
pub fn order_crossover<R: Rng>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> (Vec<usize>, Vec<usize>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(n > 0, "parents must not be empty");

    if n == 1 {
        return (parent1.to_vec(), parent2.to_vec());
    }

    let (start, end) = random_segment(n, rng);

    let child1 = ox_build_child(parent1, parent2, start, end);
    let child2 = ox_build_child(parent2, parent1, start, end);

    (child1, child2)
}

/// Build one OX child: copy the segment from `template`, fill from `donor`.
fn ox_build_child(template: &[usize], donor: &[usize], start: usize, end: usize) -> Vec<usize> {
    let n = template.len();
    // Membership is tracked by element value; values are arbitrary distinct
    // indices, so size the table to the largest one.
    let table_len = template.iter().copied().max().map_or(0, |m| m + 1);
    let mut child = vec![usize::MAX; n];
    let mut in_segment = vec![false; table_len];

    for i in start..=end {
        child[i] = template[i];
        in_segment[template[i]] = true;
    }

    // Fill from donor, starting after the segment end, wrapping around.
    let mut pos = (end + 1) % n;
    for offset in 0..n {
        let val = donor[(end + 1 + offset) % n];
        if !in_segment[val] {
            child[pos] = val;
            pos = (pos + 1) % n;
        }
    }

    child
}

/// Swap mutation: exchange two distinct random positions.
///
/// No-op on sequences shorter than 2.
pub fn swap_mutation<R: Rng>(perm: &mut [usize], rng: &mut R) {
    let n = perm.len();
    if n < 2 {
        return;
    }
    let i = rng.random_range(0..n);
    let mut j = rng.random_range(0..n - 1);
    if j >= i {
        j += 1;
    }
    perm.swap(i, j);
}

/// Insert mutation: remove the element at one position and reinsert it at a
/// distinct other position.
///
/// No-op on sequences shorter than 2.
pub fn insert_mutation<R: Rng>(perm: &mut Vec<usize>, rng: &mut R) {
    let n = perm.len();
    if n < 2 {
        return;
    }
    let from = rng.random_range(0..n);
    let mut to = rng.random_range(0..n - 1);
    if to >= from {
        to += 1;
    }
    let item = perm.remove(from);
    perm.insert(to, item);
}

/// Pick a random segment `[start, end]` within `0..n` where `start <= end`.
fn random_segment<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
