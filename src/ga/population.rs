//! A collection of tours for one stage of one generation.

use std::sync::Arc;

use rand::Rng;

use super::tour::Tour;
use crate::distance::DistanceTable;
use crate::error::{Result, TspError};

/// An ordered, non-empty collection of equal-length tours.
///
/// Tours are shared through `Arc`, so `clone()` is shallow: a new container
/// over the same immutable tours. Operators always clone before editing, so
/// a population handed to them is never modified.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawPopulation"))]
pub struct Population {
    tours: Vec<Arc<Tour>>,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawPopulation {
    tours: Vec<Arc<Tour>>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawPopulation> for Population {
    type Error = TspError;

    fn try_from(raw: RawPopulation) -> Result<Self> {
        Self::new(raw.tours)
    }
}

impl Population {
    /// Creates a population from shared tours.
    ///
    /// Fails with [`TspError::EmptyPopulation`] if `tours` is empty, or
    /// [`TspError::InvalidPermutation`] if the tours differ in length.
    pub fn new(tours: Vec<Arc<Tour>>) -> Result<Self> {
        let first = tours.first().ok_or(TspError::EmptyPopulation)?;
        let n = first.len();
        if let Some(t) = tours.iter().find(|t| t.len() != n) {
            return Err(TspError::InvalidPermutation {
                len: t.len(),
                detail: format!("population members must all visit {n} locations"),
            });
        }
        Ok(Self { tours })
    }

    /// Creates a population that takes ownership of `tours`.
    pub fn from_tours(tours: Vec<Tour>) -> Result<Self> {
        Self::new(tours.into_iter().map(Arc::new).collect())
    }

    /// Creates `size` uniformly random tours over `table`.
    pub fn random<R: Rng>(table: &DistanceTable, size: usize, rng: &mut R) -> Result<Self> {
        Self::new(
            (0..size)
                .map(|_| Arc::new(Tour::random(table, rng)))
                .collect(),
        )
    }

    /// Wraps operator output that is non-empty by construction.
    pub(crate) fn from_vec(tours: Vec<Arc<Tour>>) -> Self {
        debug_assert!(!tours.is_empty(), "population must not be empty");
        Self { tours }
    }

    /// Returns the minimum-cost tour (first one on ties).
    pub fn best(&self) -> &Arc<Tour> {
        self.tours
            .iter()
            .min_by(|a, b| a.cmp_cost(b))
            .expect("population must not be empty")
    }

    /// Arithmetic mean of member costs.
    pub fn mean_cost(&self) -> f64 {
        mean_cost(&self.tours)
    }

    /// Number of tours.
    pub fn len(&self) -> usize {
        self.tours.len()
    }

    /// Always `false`: populations are non-empty.
    pub fn is_empty(&self) -> bool {
        self.tours.is_empty()
    }

    /// Number of locations each member visits.
    pub fn tour_len(&self) -> usize {
        self.tours[0].len()
    }

    /// Members in order.
    pub fn tours(&self) -> &[Arc<Tour>] {
        &self.tours
    }

    /// Returns the `i`-th member.
    pub fn get(&self, i: usize) -> Option<&Arc<Tour>> {
        self.tours.get(i)
    }

    /// Iterates over members in order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Tour>> {
        self.tours.iter()
    }

    /// Consumes the population, returning its members.
    pub fn into_tours(self) -> Vec<Arc<Tour>> {
        self.tours
    }
}

/// Mean cost over a slice of tours; `0.0` for an empty slice.
pub(crate) fn mean_cost(tours: &[Arc<Tour>]) -> f64 {
    if tours.is_empty() {
        return 0.0;
    }
    tours.iter().map(|t| t.cost()).sum::<f64>() / tours.len() as f64
}
