//! Replacement strategies: reconcile parents and offspring into the next
//! generation's population.

use super::population::Population;

/// Replacement strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Replacement {
    /// Keep the `|parents|` cheapest tours of `parents ∪ offspring`.
    ///
    /// The best tour considered always survives, so the next population's
    /// best cost never exceeds the parents' best cost. Ties keep parents
    /// ahead of offspring.
    #[default]
    Elitist,
}

impl Replacement {
    /// Builds the next population, sized like `parents`.
    pub fn replace(&self, parents: &Population, offspring: &Population) -> Population {
        match self {
            Replacement::Elitist => {
                let mut pool = Vec::with_capacity(parents.len() + offspring.len());
                pool.extend(parents.iter().cloned());
                pool.extend(offspring.iter().cloned());

                // stable: equal costs keep insertion order
                pool.sort_by(|a, b| a.cmp_cost(b));
                pool.truncate(parents.len());
                Population::from_vec(pool)
            }
        }
    }
}
