//! Error taxonomy for the evolutionary TSP core.

/// Errors produced by the TSP core.
///
/// Degenerate configuration and malformed distance tables are rejected up
/// front. `InvalidPermutation` and `EmptyPopulation` indicate operator or
/// caller bugs; the engine itself never produces them.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TspError {
    #[error("InvalidPermutation: len={len}, {detail}")]
    InvalidPermutation { len: usize, detail: String },
    #[error("EmptyPopulation: operation requires at least one tour")]
    EmptyPopulation,
    #[error("InsufficientParents: need 2 distinct parents, {available} available")]
    InsufficientParents { available: usize },
    #[error("InvalidConfig: {0}")]
    InvalidConfig(String),
    #[error("InvalidDistanceTable: {0}")]
    InvalidDistanceTable(String),
}

/// Shorthand result type for this crate.
pub type Result<T> = std::result::Result<T, TspError>;
