//! Generational evolutionary search over permutation tours.
//!
//! Every candidate is a [`Tour`]: a permutation of all locations with its
//! cycle cost computed once. One generation runs
//! selection → crossover → mutation → replacement:
//!
//! ```text
//! parents ──breed──▶ offspring ──mutate──▶ mutated ──replace(parents, ·)──▶ next
//! ```
//!
//! and the next generation starts from `next`. Lineage and mutation
//! records flow alongside for reporting only.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Sizes, strategies, stall patience, seed
//! - [`GenerationLoop`]: Steppable `Initialized → Evolving → Converged` loop
//! - [`GaRunner`]: Runs a loop to convergence, returning [`GaResult`]
//! - [`Generation`]: Per-generation populations, records, best, mean, incumbent
//!
//! # Strategies
//!
//! - [`Selection`]: Weighted tournament, roulette, rank
//! - [`Crossover`]: Order-preserving two-point (OX), PMX
//! - [`Mutation`]: Anchored swap, anchored segment inversion
//! - [`Replacement`]: Elitist (μ + λ truncation)
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"

mod config;
mod crossover;
mod generation;
mod mutation;
pub mod operators;
mod population;
mod records;
mod replacement;
mod runner;
mod selection;
mod tour;

pub use config::GaConfig;
pub use crossover::{select_pair, Crossover};
pub use generation::Generation;
pub use mutation::Mutation;
pub use population::Population;
pub use records::{LineageRecord, MutationRecord};
pub use replacement::Replacement;
pub use runner::{GaResult, GaRunner, GenerationLoop, LoopState};
pub use selection::Selection;
pub use tour::{check_permutation, cycle_cost, Tour};
