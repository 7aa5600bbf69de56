//! One cycle of the evolutionary loop and everything it produced.

use std::cmp::Ordering;
use std::sync::Arc;

use rand::Rng;

use super::config::GaConfig;
use super::population::Population;
use super::records::{LineageRecord, MutationRecord};
use super::tour::Tour;
use crate::distance::DistanceTable;
use crate::error::Result;

/// Snapshot of one generation: the four populations of the cycle, the
/// side-channel records, and the incumbent after this generation.
///
/// Generations chain: the next generation starts from this one's
/// [`next`](Generation::next) population with index + 1
/// (see [`chain`](Generation::chain)).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Generation {
    index: usize,
    parents: Population,
    offspring: Population,
    mutated: Population,
    next: Population,
    lineage: Vec<LineageRecord>,
    mutations: Vec<MutationRecord>,
    mean_cost: f64,
    incumbent: Arc<Tour>,
    improved: bool,
}

impl Generation {
    /// Runs breed → mutate → replace on `parents` and compares the result
    /// against `incumbent`.
    pub(crate) fn evolve<R: Rng>(
        index: usize,
        parents: Population,
        incumbent: &Arc<Tour>,
        config: &GaConfig,
        table: &DistanceTable,
        rng: &mut R,
    ) -> Result<Self> {
        let (offspring, lineage) = config.crossover.breed(
            &parents,
            config.offspring_size,
            &config.selection,
            table,
            rng,
        )?;
        let (mutated, mutation) = config.mutation.mutate_population(&offspring, table, rng);
        let next = config.replacement.replace(&parents, &mutated);

        let best = next.best();
        let improved = best.cmp_cost(incumbent) == Ordering::Less;
        let incumbent = if improved { best } else { incumbent }.clone();

        Ok(Self {
            index,
            mean_cost: next.mean_cost(),
            parents,
            offspring,
            mutated,
            next,
            lineage,
            mutations: vec![mutation],
            incumbent,
            improved,
        })
    }

    /// Generation index, 0 for the first cycle.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Population this generation started from.
    pub fn parents(&self) -> &Population {
        &self.parents
    }

    /// Crossover output.
    pub fn offspring(&self) -> &Population {
        &self.offspring
    }

    /// Offspring after mutation.
    pub fn mutated(&self) -> &Population {
        &self.mutated
    }

    /// Replacement output; the next generation's parents.
    pub fn next(&self) -> &Population {
        &self.next
    }

    /// One record per crossover pairing.
    pub fn lineage(&self) -> &[LineageRecord] {
        &self.lineage
    }

    /// Mutation records (exactly one per generation).
    pub fn mutations(&self) -> &[MutationRecord] {
        &self.mutations
    }

    /// Cheapest tour of the [`next`](Generation::next) population.
    pub fn best(&self) -> &Arc<Tour> {
        self.next.best()
    }

    /// Mean cost of the [`next`](Generation::next) population.
    pub fn mean_cost(&self) -> f64 {
        self.mean_cost
    }

    /// Best tour found up to and including this generation.
    pub fn incumbent(&self) -> &Arc<Tour> {
        &self.incumbent
    }

    /// Whether this generation strictly improved on the previous incumbent.
    pub fn improved(&self) -> bool {
        self.improved
    }

    /// Index and parent population for the following generation.
    pub fn chain(&self) -> (usize, Population) {
        (self.index + 1, self.next.clone())
    }
}
