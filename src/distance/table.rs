//! Dense symmetric distance table.

use crate::error::{Result, TspError};

/// A location id in `0..N`.
pub type Location = usize;

/// Tolerance used when checking symmetry and the zero diagonal.
const SYMMETRY_TOL: f64 = 1e-9;

/// A dense N×N distance table stored in row-major order.
///
/// Every table handed out by the constructors is square, symmetric, has a
/// zero diagonal, and contains only finite non-negative values.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceTable;
///
/// let dt = DistanceTable::from_rows(vec![
///     vec![0.0, 3.0, 4.0],
///     vec![3.0, 0.0, 5.0],
///     vec![4.0, 5.0, 0.0],
/// ])
/// .expect("valid table");
/// assert_eq!(dt.size(), 3);
/// assert_eq!(dt.get(2, 1), 5.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawTable"))]
pub struct DistanceTable {
    data: Vec<f64>,
    size: usize,
}

/// Unchecked wire form; deserialization goes through [`DistanceTable::from_data`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawTable {
    data: Vec<f64>,
    size: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawTable> for DistanceTable {
    type Error = TspError;

    fn try_from(raw: RawTable) -> Result<Self> {
        Self::from_data(raw.size, raw.data)
    }
}

impl DistanceTable {
    /// Creates a table from an explicit row-major grid of `size * size` values.
    pub fn from_data(size: usize, data: Vec<f64>) -> Result<Self> {
        if size == 0 {
            return Err(TspError::InvalidDistanceTable(
                "table must contain at least one location".into(),
            ));
        }
        if data.len() != size * size {
            return Err(TspError::InvalidDistanceTable(format!(
                "expected {} entries for {size} locations, got {}",
                size * size,
                data.len()
            )));
        }
        let table = Self { data, size };
        table.check()?;
        Ok(table)
    }

    /// Creates a table from one row of distances per location.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let size = rows.len();
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != size) {
            return Err(TspError::InvalidDistanceTable(format!(
                "row {i} has {} entries, expected {size}",
                row.len()
            )));
        }
        Self::from_data(size, rows.into_iter().flatten().collect())
    }

    /// Computes a Euclidean table from planar coordinates.
    pub fn from_points(points: &[(f64, f64)]) -> Result<Self> {
        let n = points.len();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let (dx, dy) = (points[i].0 - points[j].0, points[i].1 - points[j].1);
                let d = (dx * dx + dy * dy).sqrt();
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        Self::from_data(n, data)
    }

    /// Returns the distance between locations `a` and `b`.
    ///
    /// # Panics
    ///
    /// Panics if either id is out of bounds.
    pub fn get(&self, a: Location, b: Location) -> f64 {
        self.data[a * self.size + b]
    }

    /// Number of locations in this table.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Iterates over all location ids.
    pub fn locations(&self) -> impl Iterator<Item = Location> {
        0..self.size
    }

    /// Returns `true` if the table is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    fn check(&self) -> Result<()> {
        if let Some(pos) = self.data.iter().position(|d| !d.is_finite() || *d < 0.0) {
            return Err(TspError::InvalidDistanceTable(format!(
                "distance ({}, {}) must be finite and non-negative, got {}",
                pos / self.size,
                pos % self.size,
                self.data[pos]
            )));
        }
        if let Some(i) = (0..self.size).find(|&i| self.get(i, i).abs() > SYMMETRY_TOL) {
            return Err(TspError::InvalidDistanceTable(format!(
                "diagonal entry ({i}, {i}) must be zero"
            )));
        }
        if !self.is_symmetric(SYMMETRY_TOL) {
            return Err(TspError::InvalidDistanceTable(
                "distance table must be symmetric".into(),
            ));
        }
        Ok(())
    }
}
