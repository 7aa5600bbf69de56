//! Locations and the pairwise distance table.
//!
//! Locations are plain ids in `0..N`. The [`DistanceTable`] is built once,
//! validated, and then shared read-only by every tour in a run.

mod table;

pub use table::{DistanceTable, Location};
