//! Mutation strategies.
//!
//! A mutation step copies the population, picks one member uniformly at
//! random, and replaces it with a perturbed copy. Position 0 of a tour is
//! never moved.

use std::sync::Arc;

use rand::Rng;
use tracing::trace;

use super::operators::{invert_mutation, swap_mutation};
use super::population::Population;
use super::records::MutationRecord;
use super::tour::Tour;
use crate::distance::DistanceTable;

/// Mutation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mutation {
    /// Exchange two distinct positions.
    #[default]
    Swap,

    /// Reverse the segment between two distinct positions (2-opt move).
    Invert,
}

impl Mutation {
    /// Returns a perturbed copy of `tour` with its cost recomputed.
    ///
    /// Tours with fewer than 3 locations come back as unchanged copies.
    pub fn mutate_tour<R: Rng>(&self, tour: &Tour, table: &DistanceTable, rng: &mut R) -> Tour {
        let mut cities = tour.cities().to_vec();
        let moved = match self {
            Mutation::Swap => swap_mutation(&mut cities, rng),
            Mutation::Invert => invert_mutation(&mut cities, rng),
        };
        if let Some((i, j)) = moved {
            trace!(mutation = ?self, i, j, "mutation applied");
        }
        Tour::from_valid(cities, table)
    }

    /// Mutates exactly one uniformly chosen member of `population`.
    ///
    /// Returns the new population (the input is left as is) and the
    /// record of the mutation.
    pub fn mutate_population<R: Rng>(
        &self,
        population: &Population,
        table: &DistanceTable,
        rng: &mut R,
    ) -> (Population, MutationRecord) {
        let mut tours = population.tours().to_vec();
        let idx = rng.random_range(0..tours.len());

        let original = tours[idx].clone();
        let mutated = Arc::new(self.mutate_tour(&original, table, rng));
        tours[idx] = mutated.clone();

        (
            Population::from_vec(tours),
            MutationRecord { original, mutated },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::tour::cycle_cost;
    use u_numflow::random::create_rng;

    fn table() -> DistanceTable {
        DistanceTable::from_points(&[
            (0.0, 0.0),
            (4.0, 0.0),
            (4.0, 3.0),
            (0.0, 3.0),
            (2.0, 5.0),
            (7.0, 1.0),
        ])
        .expect("valid")
    }

    #[test]
    fn test_swap_reference_example() {
        let dt = table();
        let tour = Tour::new(vec![0, 1, 2, 3, 4, 5], &dt).unwrap();
        let swapped = tour.swapped(1, 4, &dt);

        assert_eq!(swapped.cities(), &[0, 4, 2, 3, 1, 5]);
        assert_eq!(swapped.cost(), cycle_cost(&[0, 4, 2, 3, 1, 5], &dt));
        assert_ne!(swapped.cost(), tour.cost());
    }

    #[test]
    fn test_mutate_tour_keeps_anchor_and_validity() {
        let dt = table();
        let mut rng = create_rng(42);
        let tour = Tour::new(vec![3, 1, 5, 0, 2, 4], &dt).unwrap();

        for mutation in [Mutation::Swap, Mutation::Invert] {
            for _ in 0..100 {
                let m = mutation.mutate_tour(&tour, &dt, &mut rng);
                assert!(m.validate(6).is_ok());
                assert_eq!(m.cities()[0], 3);
                assert_ne!(m.cities(), tour.cities(), "{mutation:?} must move something");
                assert_eq!(m.cost(), cycle_cost(m.cities(), &dt));
            }
        }
    }

    #[test]
    fn test_mutate_population_replaces_one_member() {
        let dt = table();
        let mut rng = create_rng(5);
        let population = Population::random(&dt, 6, &mut rng).unwrap();

        for _ in 0..30 {
            let (mutated, record) = Mutation::Swap.mutate_population(&population, &dt, &mut rng);
            assert_eq!(mutated.len(), population.len());

            let changed: Vec<usize> = (0..population.len())
                .filter(|&i| !Arc::ptr_eq(&population.tours()[i], &mutated.tours()[i]))
                .collect();
            assert_eq!(changed.len(), 1);

            let i = changed[0];
            assert!(Arc::ptr_eq(&record.original, &population.tours()[i]));
            assert!(Arc::ptr_eq(&record.mutated, &mutated.tours()[i]));
            assert!(record.original_of(&mutated.tours()[i]).is_some());
        }
    }

    #[test]
    fn test_short_tour_unchanged() {
        let dt = DistanceTable::from_rows(vec![vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
        let mut rng = create_rng(42);
        let tour = Tour::new(vec![1, 0], &dt).unwrap();
        let m = Mutation::Swap.mutate_tour(&tour, &dt, &mut rng);
        assert_eq!(m, tour);
    }
}
