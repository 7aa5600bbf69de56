//! Crossover strategies and population breeding.
//!
//! [`Crossover::breed`] turns a parent population into an offspring
//! population, two children per pairing, recording a [`LineageRecord`]
//! for each pairing.
//!
//! # Parent pool policy
//!
//! Parents are drawn from a working copy of the parent population. Each
//! selected parent is removed from the working copy, so no tour is paired
//! with itself. When fewer than two members remain before a pairing, the
//! working copy is refilled from the full parent population and any
//! leftover member is discarded.

use std::sync::Arc;

use rand::Rng;
use tracing::trace;

use super::operators::{order_crossover_at, pmx_crossover_at, random_cut_points};
use super::population::Population;
use super::records::LineageRecord;
use super::selection::Selection;
use super::tour::Tour;
use crate::distance::DistanceTable;
use crate::error::{Result, TspError};

/// Crossover strategy. Every variant maps two valid permutations to two
/// valid permutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Crossover {
    /// Order-preserving two-point crossover (OX).
    ///
    /// See [`order_crossover_at`](super::operators::order_crossover_at).
    #[default]
    TwoPointOrder,

    /// Partially mapped crossover (PMX) on the same cut-point convention.
    PartiallyMapped,
}

impl Crossover {
    /// Recombines two location sequences at cut points `c1 < c2`.
    ///
    /// # Panics
    ///
    /// Panics if the parents differ in length, or unless `c1 < c2 <= len`.
    pub fn recombine_at(
        &self,
        parent1: &[usize],
        parent2: &[usize],
        c1: usize,
        c2: usize,
    ) -> (Vec<usize>, Vec<usize>) {
        match self {
            Crossover::TwoPointOrder => order_crossover_at(parent1, parent2, c1, c2),
            Crossover::PartiallyMapped => pmx_crossover_at(parent1, parent2, c1, c2),
        }
    }

    /// Breeds two tours into two new tours.
    ///
    /// Tours with fewer than 3 locations have no valid cut pair; the
    /// children are then copies of the parents.
    pub fn breed_pair<R: Rng>(
        &self,
        parent1: &Arc<Tour>,
        parent2: &Arc<Tour>,
        table: &DistanceTable,
        rng: &mut R,
    ) -> LineageRecord {
        let (child1, child2) = match random_cut_points(parent1.len(), rng) {
            Some((c1, c2)) => {
                trace!(c1, c2, "crossover cut points");
                let (a, b) = self.recombine_at(parent1.cities(), parent2.cities(), c1, c2);
                (Tour::from_valid(a, table), Tour::from_valid(b, table))
            }
            None => ((**parent1).clone(), (**parent2).clone()),
        };

        LineageRecord {
            parents: [parent1.clone(), parent2.clone()],
            offspring: [Arc::new(child1), Arc::new(child2)],
        }
    }

    /// Breeds `parents` until at least `offspring_size` children exist.
    ///
    /// Each pairing yields exactly two children, so an odd target is
    /// rounded up to the next pair.
    ///
    /// Fails with [`TspError::InsufficientParents`] if `parents` has fewer
    /// than two members, or [`TspError::InvalidConfig`] if
    /// `offspring_size` is zero.
    pub fn breed<R: Rng>(
        &self,
        parents: &Population,
        offspring_size: usize,
        selection: &Selection,
        table: &DistanceTable,
        rng: &mut R,
    ) -> Result<(Population, Vec<LineageRecord>)> {
        if parents.len() < 2 {
            return Err(TspError::InsufficientParents {
                available: parents.len(),
            });
        }
        if offspring_size == 0 {
            return Err(TspError::InvalidConfig(
                "offspring_size must be positive".into(),
            ));
        }

        let mut pool: Vec<Arc<Tour>> = Vec::new();
        let mut offspring = Vec::with_capacity(offspring_size + 1);
        let mut lineage = Vec::with_capacity(offspring_size.div_ceil(2));

        while offspring.len() < offspring_size {
            if pool.len() < 2 {
                pool = parents.tours().to_vec();
            }
            let (p1, p2) = select_pair(&mut pool, selection, rng)?;
            let record = self.breed_pair(&p1, &p2, table, rng);
            offspring.extend(record.offspring.iter().cloned());
            lineage.push(record);
        }

        Ok((Population::from_vec(offspring), lineage))
    }
}

/// Selects and removes two distinct parents from `pool`.
///
/// Fails with [`TspError::InsufficientParents`] if `pool` has fewer than
/// two members.
pub fn select_pair<R: Rng>(
    pool: &mut Vec<Arc<Tour>>,
    selection: &Selection,
    rng: &mut R,
) -> Result<(Arc<Tour>, Arc<Tour>)> {
    if pool.len() < 2 {
        return Err(TspError::InsufficientParents {
            available: pool.len(),
        });
    }
    let i = selection.select(pool, rng);
    let first = pool.remove(i);
    let j = selection.select(pool, rng);
    let second = pool.remove(j);
    Ok((first, second))
}

#[cfg(test)]
mod tests {
    use super::*;
    use u_numflow::random::create_rng;

    fn table() -> DistanceTable {
        DistanceTable::from_rows(vec![
            vec![0.0, 41.0, 26.0, 31.0, 27.0, 35.0],
            vec![41.0, 0.0, 29.0, 32.0, 40.0, 33.0],
            vec![26.0, 29.0, 0.0, 25.0, 34.0, 42.0],
            vec![31.0, 32.0, 25.0, 0.0, 28.0, 34.0],
            vec![27.0, 40.0, 34.0, 28.0, 0.0, 36.0],
            vec![35.0, 33.0, 42.0, 34.0, 36.0, 0.0],
        ])
        .expect("valid")
    }

    #[test]
    fn test_breed_pair_records_lineage() {
        let dt = table();
        let mut rng = create_rng(42);
        let p1 = Arc::new(Tour::new(vec![0, 1, 2, 3, 4, 5], &dt).unwrap());
        let p2 = Arc::new(Tour::new(vec![5, 4, 3, 2, 1, 0], &dt).unwrap());

        for crossover in [Crossover::TwoPointOrder, Crossover::PartiallyMapped] {
            for _ in 0..50 {
                let record = crossover.breed_pair(&p1, &p2, &dt, &mut rng);
                assert!(Arc::ptr_eq(&record.parents[0], &p1));
                assert!(Arc::ptr_eq(&record.parents[1], &p2));
                for child in &record.offspring {
                    assert!(child.validate(6).is_ok(), "{crossover:?} produced {child}");
                    assert_eq!(
                        child.cost(),
                        crate::ga::tour::cycle_cost(child.cities(), &dt)
                    );
                }
            }
        }
        // Parents untouched
        assert_eq!(p1.cities(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(p2.cities(), &[5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_recombine_reference_cut() {
        let (a, b) =
            Crossover::TwoPointOrder.recombine_at(&[0, 1, 2, 3, 4, 5], &[5, 4, 3, 2, 1, 0], 2, 4);
        assert_eq!(&a[2..4], &[2, 3]);
        assert_eq!(&b[2..4], &[3, 2]);
    }

    #[test]
    #[should_panic(expected = "invalid cut points")]
    fn test_recombine_rejects_reversed_cuts() {
        Crossover::PartiallyMapped.recombine_at(&[0, 1, 2, 3], &[3, 2, 1, 0], 3, 1);
    }

    #[test]
    #[should_panic(expected = "parents must have equal length")]
    fn test_recombine_rejects_unequal_parents() {
        Crossover::TwoPointOrder.recombine_at(&[0, 1, 2, 3], &[2, 1, 0], 1, 2);
    }

    #[test]
    fn test_breed_offspring_count() {
        let dt = table();
        let mut rng = create_rng(42);
        let parents = Population::random(&dt, 8, &mut rng).unwrap();

        let (offspring, lineage) = Crossover::TwoPointOrder
            .breed(&parents, 6, &Selection::Tournament(3), &dt, &mut rng)
            .unwrap();
        assert_eq!(offspring.len(), 6);
        assert_eq!(lineage.len(), 3);

        // Odd targets round up to whole pairs
        let (offspring, lineage) = Crossover::TwoPointOrder
            .breed(&parents, 5, &Selection::Tournament(3), &dt, &mut rng)
            .unwrap();
        assert_eq!(offspring.len(), 6);
        assert_eq!(lineage.len(), 3);
    }

    #[test]
    fn test_breed_never_pairs_tour_with_itself() {
        let dt = table();
        let mut rng = create_rng(9);
        let parents = Population::random(&dt, 3, &mut rng).unwrap();

        // 3 parents, 20 children: exercises the refill path repeatedly
        let (offspring, lineage) = Crossover::TwoPointOrder
            .breed(&parents, 20, &Selection::Tournament(2), &dt, &mut rng)
            .unwrap();
        assert_eq!(offspring.len(), 20);
        for record in &lineage {
            assert!(!Arc::ptr_eq(&record.parents[0], &record.parents[1]));
            for p in &record.parents {
                assert!(parents.iter().any(|q| Arc::ptr_eq(p, q)));
            }
        }
    }

    #[test]
    fn test_breed_leaves_parents_unchanged() {
        let dt = table();
        let mut rng = create_rng(1);
        let parents = Population::random(&dt, 6, &mut rng).unwrap();
        let before = parents.clone();

        Crossover::PartiallyMapped
            .breed(&parents, 6, &Selection::Rank, &dt, &mut rng)
            .unwrap();
        assert_eq!(parents, before);
    }

    #[test]
    fn test_breed_rejects_single_parent() {
        let dt = table();
        let mut rng = create_rng(42);
        let parents = Population::random(&dt, 1, &mut rng).unwrap();
        assert_eq!(
            Crossover::TwoPointOrder
                .breed(&parents, 2, &Selection::default(), &dt, &mut rng)
                .unwrap_err(),
            TspError::InsufficientParents { available: 1 }
        );
    }

    #[test]
    fn test_select_pair_distinct_and_removed() {
        let dt = table();
        let mut rng = create_rng(42);
        let parents = Population::random(&dt, 4, &mut rng).unwrap();
        let mut pool = parents.tours().to_vec();

        let (a, b) = select_pair(&mut pool, &Selection::Tournament(3), &mut rng).unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(pool.len(), 2);
        assert!(!pool.iter().any(|t| Arc::ptr_eq(t, &a) || Arc::ptr_eq(t, &b)));

        let mut single = vec![a];
        assert_eq!(
            select_pair(&mut single, &Selection::default(), &mut rng).unwrap_err(),
            TspError::InsufficientParents { available: 1 }
        );
    }

    #[test]
    fn test_short_tours_copied() {
        let dt = DistanceTable::from_rows(vec![vec![0.0, 2.0], vec![2.0, 0.0]]).unwrap();
        let mut rng = create_rng(42);
        let p1 = Arc::new(Tour::new(vec![0, 1], &dt).unwrap());
        let p2 = Arc::new(Tour::new(vec![1, 0], &dt).unwrap());
        let record = Crossover::TwoPointOrder.breed_pair(&p1, &p2, &dt, &mut rng);
        assert_eq!(record.offspring[0].cities(), &[0, 1]);
        assert_eq!(record.offspring[1].cities(), &[1, 0]);
        assert!(!Arc::ptr_eq(&record.offspring[0], &p1));
    }
}
