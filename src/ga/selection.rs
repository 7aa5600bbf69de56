//! Parent selection strategies.
//!
//! A strategy picks one tour from a pool and returns its index. Pools are
//! borrowed immutably; any shrinking happens on a private index list.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Baker (1985), "Adaptive Selection Methods for Genetic Algorithms"

use std::sync::Arc;

use rand::Rng;

use super::tour::Tour;

/// Selection strategy for choosing parents.
///
/// All strategies assume **minimization** (lower cost = better).
///
/// # Examples
///
/// ```
/// use u_tsp::ga::Selection;
///
/// // Tournament of 3 (the reference setting)
/// let sel = Selection::Tournament(3);
/// assert_eq!(sel, Selection::default());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Tournament of `k` entrants, returning the cheapest entrant.
    ///
    /// Entrants are drawn without replacement from a shrinking copy of
    /// the pool. Each draw picks a member with probability
    /// `cost / (|remaining| · mean_cost(remaining))`, so costly members
    /// enter (and so get knocked out of the remaining pool) first. If the
    /// pool has fewer than `k` members, all of them enter.
    ///
    /// # Complexity
    /// O(k · n) per selection
    Tournament(usize),

    /// Fitness-proportionate (roulette wheel) selection on inverted cost.
    ///
    /// # Complexity
    /// O(n) per selection
    Roulette,

    /// Linear rank selection: weight `n - rank`, best rank 0.
    ///
    /// # Complexity
    /// O(n log n) per selection
    Rank,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    /// Select a parent index from `pool`.
    ///
    /// # Panics
    /// Panics if `pool` is empty.
    pub fn select<R: Rng>(&self, pool: &[Arc<Tour>], rng: &mut R) -> usize {
        assert!(!pool.is_empty(), "cannot select from empty population");

        match self {
            Selection::Tournament(k) => tournament(pool, *k, rng),
            Selection::Roulette => roulette(pool, rng),
            Selection::Rank => rank(pool, rng),
        }
    }
}

/// Weighted draw of `k` entrants without replacement, return the cheapest.
fn tournament<R: Rng>(pool: &[Arc<Tour>], k: usize, rng: &mut R) -> usize {
    let k = k.max(1);
    let mut remaining: Vec<usize> = (0..pool.len()).collect();
    let mut entrants = Vec::with_capacity(k.min(pool.len()));

    while entrants.len() < k && !remaining.is_empty() {
        let pick = cost_weighted_draw(pool, &remaining, rng);
        entrants.push(remaining.remove(pick));
    }

    entrants
        .into_iter()
        .min_by(|&a, &b| pool[a].cmp_cost(&pool[b]))
        .expect("tournament has at least one entrant")
}

/// Returns a position in `remaining`, drawn with probability proportional
/// to cost. Uniform when every remaining cost is zero.
fn cost_weighted_draw<R: Rng>(pool: &[Arc<Tour>], remaining: &[usize], rng: &mut R) -> usize {
    let n = remaining.len();
    let mean = remaining.iter().map(|&i| pool[i].cost()).sum::<f64>() / n as f64;
    if mean <= 0.0 {
        return rng.random_range(0..n);
    }

    let threshold = rng.random_range(0.0..1.0);
    let mut cumulative = 0.0;
    for (pos, &i) in remaining.iter().enumerate() {
        cumulative += pool[i].cost() / (n as f64 * mean);
        if cumulative > threshold {
            return pos;
        }
    }

    n - 1 // floating-point fallback
}

/// Roulette wheel selection using inverse cost transformation.
///
/// weight_i = max_cost - cost_i + epsilon
fn roulette<R: Rng>(pool: &[Arc<Tour>], rng: &mut R) -> usize {
    let n = pool.len();
    if n == 1 {
        return 0;
    }

    let max_cost = pool.iter().map(|t| t.cost()).fold(f64::NEG_INFINITY, f64::max);
    let epsilon = 1e-10;

    let weights: Vec<f64> = pool
        .iter()
        .map(|t| (max_cost - t.cost() + epsilon).max(epsilon))
        .collect();

    let total: f64 = weights.iter().sum();
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

/// Rank-based selection using linear ranking.
fn rank<R: Rng>(pool: &[Arc<Tour>], rng: &mut R) -> usize {
    let n = pool.len();
    if n == 1 {
        return 0;
    }

    let mut indexed: Vec<usize> = (0..n).collect();
    indexed.sort_by(|&a, &b| pool[a].cmp_cost(&pool[b]));

    // rank 0 (best) gets weight n
    let total: f64 = (n * (n + 1)) as f64 / 2.0;
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;

    for (rank, &original_idx) in indexed.iter().enumerate() {
        cumulative += (n - rank) as f64;
        if cumulative > threshold {
            return original_idx;
        }
    }

    indexed[n - 1] // fallback
}
