//! Permutation kernels used by the crossover and mutation strategies.
//!
//! These operate on plain `&[usize]` location sequences and know nothing
//! about costs or populations.
//!
//! # Cut-point convention
//!
//! Two-point crossovers use cut indices `1 <= c1 < c2 <= n - 1` and copy
//! the half-open middle segment `[c1, c2)`. Position 0 is never a cut and
//! the segment is never empty, so tours need at least 3 locations to
//! recombine.
//!
//! # Anchored mutations
//!
//! Mutations never touch position 0, keeping the tour's starting location
//! fixed.
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Goldberg & Lingle (1985), "Alleles, Loci, and the Traveling Salesman Problem"

use rand::Rng;

// ============================================================================
// Crossover operators
// ============================================================================

/// Picks two distinct cut indices `1 <= c1 < c2 <= n - 1` uniformly.
///
/// Returns `None` when `n < 3` (no non-empty segment avoids position 0).
pub fn random_cut_points<R: Rng>(n: usize, rng: &mut R) -> Option<(usize, usize)> {
    if n < 3 {
        return None;
    }
    let a = rng.random_range(1..n);
    let mut b = rng.random_range(1..n - 1);
    if b >= a {
        b += 1;
    }
    Some(if a < b { (a, b) } else { (b, a) })
}

/// Order-preserving two-point crossover with random cut points.
///
/// See [`order_crossover_at`]. Parents with fewer than 3 locations are
/// returned unchanged.
///
/// # Panics
/// Panics if parents have different lengths.
pub fn order_crossover<R: Rng>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> (Vec<usize>, Vec<usize>) {
    assert_eq!(parent1.len(), parent2.len(), "parents must have equal length");
    match random_cut_points(parent1.len(), rng) {
        Some((c1, c2)) => order_crossover_at(parent1, parent2, c1, c2),
        None => (parent1.to_vec(), parent2.to_vec()),
    }
}

/// Order-preserving two-point crossover at fixed cut points.
///
/// Child 1 keeps `parent1[c1..c2]` in place; positions `c2, …, n-1, 0, …,
/// c1-1` are filled with parent2's locations scanned from position `c2`
/// (wrapping), skipping any already in the segment. Child 2 is symmetric.
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if parents have different lengths or `c1 >= c2` or `c2 > n`.
pub fn order_crossover_at(
    parent1: &[usize],
    parent2: &[usize],
    c1: usize,
    c2: usize,
) -> (Vec<usize>, Vec<usize>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(c1 < c2 && c2 <= n, "invalid cut points ({c1}, {c2}) for length {n}");

    (
        ox_build_child(parent1, parent2, c1, c2),
        ox_build_child(parent2, parent1, c1, c2),
    )
}

/// Build one OX child: copy `[c1, c2)` from `template`, fill from `donor`.
fn ox_build_child(template: &[usize], donor: &[usize], c1: usize, c2: usize) -> Vec<usize> {
    let n = template.len();
    let mut child = vec![usize::MAX; n];
    let mut in_segment = vec![false; n];

    for i in c1..c2 {
        child[i] = template[i];
        in_segment[template[i]] = true;
    }

    // Fill from donor, starting at the segment end and wrapping around
    let mut pos = c2 % n;
    for offset in 0..n {
        let val = donor[(c2 + offset) % n];
        if !in_segment[val] {
            child[pos] = val;
            pos = (pos + 1) % n;
        }
    }

    child
}

/// Partially Mapped Crossover (PMX) with random cut points.
///
/// Parents with fewer than 3 locations are returned unchanged.
///
/// # Panics
/// Panics if parents have different lengths.
pub fn pmx_crossover<R: Rng>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> (Vec<usize>, Vec<usize>) {
    assert_eq!(parent1.len(), parent2.len(), "parents must have equal length");
    match random_cut_points(parent1.len(), rng) {
        Some((c1, c2)) => pmx_crossover_at(parent1, parent2, c1, c2),
        None => (parent1.to_vec(), parent2.to_vec()),
    }
}

/// Partially Mapped Crossover (PMX) at fixed cut points.
///
/// Preserves the absolute position of locations from both parents as much
/// as possible: the segment `[c1, c2)` comes from one parent, displaced
/// locations are placed through the segment's mapping chain, and the rest
/// is copied from the other parent.
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if parents have different lengths or `c1 >= c2` or `c2 > n`.
pub fn pmx_crossover_at(
    parent1: &[usize],
    parent2: &[usize],
    c1: usize,
    c2: usize,
) -> (Vec<usize>, Vec<usize>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(c1 < c2 && c2 <= n, "invalid cut points ({c1}, {c2}) for length {n}");

    (
        pmx_build_child(parent1, parent2, c1, c2),
        pmx_build_child(parent2, parent1, c1, c2),
    )
}

/// Build one PMX child: copy `[c1, c2)` from `template`, map from `donor`.
fn pmx_build_child(template: &[usize], donor: &[usize], c1: usize, c2: usize) -> Vec<usize> {
    let n = template.len();
    let sentinel = usize::MAX;
    let mut child = vec![sentinel; n];
    let mut placed = vec![false; n];

    let mut donor_pos = vec![0; n];
    for (i, &v) in donor.iter().enumerate() {
        donor_pos[v] = i;
    }

    for i in c1..c2 {
        child[i] = template[i];
        placed[template[i]] = true;
    }

    // Donor segment values not yet placed follow the mapping chain to a
    // position outside the segment.
    for i in c1..c2 {
        let donor_val = donor[i];
        if placed[donor_val] {
            continue;
        }
        let mut pos = i;
        loop {
            let target = donor_pos[template[pos]];
            if target < c1 || target >= c2 {
                child[target] = donor_val;
                placed[donor_val] = true;
                break;
            }
            pos = target;
        }
    }

    for i in 0..n {
        if child[i] == sentinel {
            child[i] = donor[i];
        }
    }

    child
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Picks two distinct positions `1 <= i < j <= n - 1` uniformly.
///
/// Returns `None` when `n < 3`.
pub fn anchored_pair<R: Rng>(n: usize, rng: &mut R) -> Option<(usize, usize)> {
    // Same distribution as a cut pair: two distinct values in 1..n
    random_cut_points(n, rng)
}

/// Swap mutation: exchange two random positions other than position 0.
///
/// Returns the swapped positions, or `None` if the sequence is too short.
///
/// # Complexity
/// O(1)
pub fn swap_mutation<R: Rng>(perm: &mut [usize], rng: &mut R) -> Option<(usize, usize)> {
    let (i, j) = anchored_pair(perm.len(), rng)?;
    perm.swap(i, j);
    Some((i, j))
}

/// Invert mutation: reverse a random segment `[i, j]` (a 2-opt move)
/// that excludes position 0.
///
/// Returns the segment bounds, or `None` if the sequence is too short.
///
/// # Complexity
/// O(n) worst case for segment reversal
pub fn invert_mutation<R: Rng>(perm: &mut [usize], rng: &mut R) -> Option<(usize, usize)> {
    let (i, j) = anchored_pair(perm.len(), rng)?;
    perm[i..=j].reverse();
    Some((i, j))
}

// ============================================================================
// Tests
// ============================================================================
