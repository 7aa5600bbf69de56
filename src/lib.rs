//! Evolutionary search for the Traveling Salesman Problem.
//!
//! Finds a low-cost closed tour over a fixed set of locations with a
//! single-threaded generational genetic algorithm:
//!
//! - **Distance**: validated symmetric [`DistanceTable`](distance::DistanceTable)
//!   over location ids `0..N`.
//! - **Genetic Algorithm**: permutation-encoded [`Tour`](ga::Tour)s,
//!   weighted tournament selection, order-preserving two-point crossover,
//!   anchored swap mutation, and elitist replacement, chained generation
//!   by generation until the incumbent stalls.
//!
//! Every crossover and mutation output is a valid permutation of all
//! locations; populations are copied before any edit and share their
//! immutable tours.
//!
//! # Example
//!
//! ```
//! use u_tsp::distance::DistanceTable;
//! use u_tsp::ga::{GaConfig, GaRunner};
//!
//! let table = DistanceTable::from_rows(vec![
//!     vec![0.0, 41.0, 26.0, 31.0, 27.0, 35.0],
//!     vec![41.0, 0.0, 29.0, 32.0, 40.0, 33.0],
//!     vec![26.0, 29.0, 0.0, 25.0, 34.0, 42.0],
//!     vec![31.0, 32.0, 25.0, 0.0, 28.0, 34.0],
//!     vec![27.0, 40.0, 34.0, 28.0, 0.0, 36.0],
//!     vec![35.0, 33.0, 42.0, 34.0, 36.0, 0.0],
//! ])
//! .unwrap();
//!
//! let result = GaRunner::run(&table, &GaConfig::default().with_seed(42)).unwrap();
//! assert!(result.best_cost <= result.initial_best.cost());
//! ```

pub mod distance;
pub mod error;
pub mod ga;

pub use error::{Result, TspError};
