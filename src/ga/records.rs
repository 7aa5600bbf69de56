//! Observational records of crossover and mutation.
//!
//! Records are written as a side effect of breeding and mutating and are
//! only read by reporting code. The generation loop never consults them.

use std::sync::Arc;

use super::tour::Tour;

/// One crossover pairing: two parents and the two children they produced.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineageRecord {
    pub parents: [Arc<Tour>; 2],
    pub offspring: [Arc<Tour>; 2],
}

impl LineageRecord {
    /// Returns the parents if `child` is one of this record's offspring.
    ///
    /// Matches by identity, not by equal sequence.
    pub fn parents_of(&self, child: &Arc<Tour>) -> Option<&[Arc<Tour>; 2]> {
        self.offspring
            .iter()
            .any(|c| Arc::ptr_eq(c, child))
            .then_some(&self.parents)
    }
}

/// One mutation: the tour before and after.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MutationRecord {
    pub original: Arc<Tour>,
    pub mutated: Arc<Tour>,
}

impl MutationRecord {
    /// Returns the unmutated tour if `tour` is this record's mutant.
    pub fn original_of(&self, tour: &Arc<Tour>) -> Option<&Arc<Tour>> {
        Arc::ptr_eq(&self.mutated, tour).then_some(&self.original)
    }
}
