//! Candidate solution: a closed tour over every location.
//!
//! A [`Tour`] is an immutable value object. Its cost is computed once at
//! construction; every transformation produces a new `Tour`.

use std::cmp::Ordering;
use std::fmt;

use rand::Rng;

use crate::distance::{DistanceTable, Location};
use crate::error::{Result, TspError};

/// A permutation of all locations plus its precomputed cycle cost.
///
/// Lower cost is better. Two tours compare by cost only
/// (see [`cmp_cost`](Tour::cmp_cost)).
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceTable;
/// use u_tsp::ga::Tour;
///
/// let dt = DistanceTable::from_rows(vec![
///     vec![0.0, 1.0, 2.0],
///     vec![1.0, 0.0, 4.0],
///     vec![2.0, 4.0, 0.0],
/// ])
/// .unwrap();
/// let tour = Tour::new(vec![0, 1, 2], &dt).unwrap();
/// assert_eq!(tour.cost(), 7.0);
/// assert_eq!(tour.to_string(), "[0-1-2]");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawTour"))]
pub struct Tour {
    cities: Vec<Location>,
    cost: f64,
}

// No table is at hand when deserializing, so only the permutation shape
// and the cost range can be checked.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawTour {
    cities: Vec<Location>,
    cost: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawTour> for Tour {
    type Error = TspError;

    fn try_from(raw: RawTour) -> Result<Self> {
        check_permutation(&raw.cities, raw.cities.len())?;
        if !raw.cost.is_finite() || raw.cost < 0.0 {
            return Err(TspError::InvalidPermutation {
                len: raw.cities.len(),
                detail: format!("cost must be finite and non-negative, got {}", raw.cost),
            });
        }
        Ok(Self {
            cities: raw.cities,
            cost: raw.cost,
        })
    }
}

impl Tour {
    /// Creates a tour, checking that `cities` is a permutation of every
    /// location in `table`.
    pub fn new(cities: Vec<Location>, table: &DistanceTable) -> Result<Self> {
        check_permutation(&cities, table.size())?;
        Ok(Self::from_valid(cities, table))
    }

    /// Creates a uniformly random tour over all locations of `table`.
    pub fn random<R: Rng>(table: &DistanceTable, rng: &mut R) -> Self {
        let mut perm: Vec<Location> = table.locations().collect();
        u_numflow::random::shuffle(&mut perm, rng);
        Self::from_valid(perm, table)
    }

    /// Builds a tour from a sequence the caller already knows is a valid
    /// permutation (operator output).
    pub(crate) fn from_valid(cities: Vec<Location>, table: &DistanceTable) -> Self {
        debug_assert!(
            check_permutation(&cities, table.size()).is_ok(),
            "operator produced an invalid permutation: {cities:?}"
        );
        let cost = cycle_cost(&cities, table);
        Self { cities, cost }
    }

    /// Returns the visiting order.
    pub fn cities(&self) -> &[Location] {
        &self.cities
    }

    /// Total cycle distance, including the edge back to the start.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of locations visited.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Returns true if the tour visits no locations.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Total order by cost.
    pub fn cmp_cost(&self, other: &Tour) -> Ordering {
        self.cost.total_cmp(&other.cost)
    }

    /// Returns a new tour with positions `i` and `j` exchanged.
    ///
    /// The cost of the result is recomputed over the whole cycle.
    ///
    /// # Panics
    ///
    /// Panics if either position is out of bounds.
    pub fn swapped(&self, i: usize, j: usize, table: &DistanceTable) -> Tour {
        let mut cities = self.cities.clone();
        cities.swap(i, j);
        Self::from_valid(cities, table)
    }

    /// Checks that this tour is a permutation of `0..n`.
    pub fn validate(&self, n: usize) -> Result<()> {
        check_permutation(&self.cities, n)
    }

    #[cfg(test)]
    pub(crate) fn with_cost(cities: Vec<Location>, cost: f64) -> Self {
        Self { cities, cost }
    }
}

impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, city) in self.cities.iter().enumerate() {
            if i > 0 {
                write!(f, "-")?;
            }
            write!(f, "{city}")?;
        }
        write!(f, "]")
    }
}

/// Sum of `distance(tour[i], tour[(i + 1) % n])` over the whole cycle.
///
/// # Complexity
/// O(n)
pub fn cycle_cost(cities: &[Location], table: &DistanceTable) -> f64 {
    let n = cities.len();
    (0..n)
        .map(|i| table.get(cities[i], cities[(i + 1) % n]))
        .sum()
}

/// Checks that `perm` contains every id in `0..n` exactly once.
pub fn check_permutation(perm: &[Location], n: usize) -> Result<()> {
    let invalid = |detail: String| TspError::InvalidPermutation {
        len: perm.len(),
        detail,
    };
    if perm.len() != n {
        return Err(invalid(format!("expected {n} locations")));
    }
    let mut seen = vec![false; n];
    for &city in perm {
        if city >= n {
            return Err(invalid(format!("location {city} out of range")));
        }
        if seen[city] {
            return Err(invalid(format!("location {city} appears twice")));
        }
        seen[city] = true;
    }
    Ok(())
}
