//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the generation loop.

use super::crossover::Crossover;
use super::mutation::Mutation;
use super::replacement::Replacement;
use super::selection::Selection;
use crate::error::{Result, TspError};

/// Configuration for the evolutionary TSP search.
///
/// # Defaults
///
/// The defaults reproduce the reference run: 8 tours, 6 offspring per
/// generation, tournaments of 3, and a patience of 10 stalled generations.
///
/// ```
/// use u_tsp::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 8);
/// assert_eq!(config.offspring_size, 6);
/// assert_eq!(config.stall_patience, 10);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_tsp::ga::{GaConfig, Mutation};
///
/// let config = GaConfig::default()
///     .with_population_size(40)
///     .with_offspring_size(30)
///     .with_tournament_size(5)
///     .with_mutation(Mutation::Invert)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of tours in every parent population.
    pub population_size: usize,

    /// Number of children bred per generation. Must be positive and even.
    pub offspring_size: usize,

    /// Parent selection strategy.
    pub selection: Selection,

    /// Crossover strategy.
    pub crossover: Crossover,

    /// Mutation strategy.
    pub mutation: Mutation,

    /// Replacement strategy.
    pub replacement: Replacement,

    /// Consecutive non-improving generations tolerated.
    ///
    /// The loop runs while the stall counter is `<= stall_patience`, so it
    /// stops after `stall_patience + 1` generations without improvement.
    pub stall_patience: usize,

    /// Optional hard cap on the number of generations.
    ///
    /// `None` (the default) leaves termination to the stall counter.
    pub max_generations: Option<usize>,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 8,
            offspring_size: 6,
            selection: Selection::default(),
            crossover: Crossover::default(),
            mutation: Mutation::default(),
            replacement: Replacement::default(),
            stall_patience: 10,
            max_generations: None,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the offspring batch size.
    pub fn with_offspring_size(mut self, n: usize) -> Self {
        self.offspring_size = n;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Convenience builder for setting tournament size.
    ///
    /// Equivalent to `.with_selection(Selection::Tournament(k))`.
    pub fn with_tournament_size(self, k: usize) -> Self {
        self.with_selection(Selection::Tournament(k))
    }

    /// Sets the crossover strategy.
    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    /// Sets the mutation strategy.
    pub fn with_mutation(mut self, mutation: Mutation) -> Self {
        self.mutation = mutation;
        self
    }

    /// Sets the replacement strategy.
    pub fn with_replacement(mut self, replacement: Replacement) -> Self {
        self.replacement = replacement;
        self
    }

    /// Sets the stall patience.
    pub fn with_stall_patience(mut self, patience: usize) -> Self {
        self.stall_patience = patience;
        self
    }

    /// Sets a hard cap on the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = Some(n);
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Degenerate settings are refused before any generation runs.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(TspError::InvalidConfig(
                "population_size must be at least 2".into(),
            ));
        }
        if self.offspring_size == 0 || self.offspring_size % 2 != 0 {
            return Err(TspError::InvalidConfig(
                "offspring_size must be a positive even number".into(),
            ));
        }
        if self.selection == Selection::Tournament(0) {
            return Err(TspError::InvalidConfig(
                "tournament size must be at least 1".into(),
            ));
        }
        if self.max_generations == Some(0) {
            return Err(TspError::InvalidConfig(
                "max_generations must be positive or None".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 8);
        assert_eq!(config.offspring_size, 6);
        assert_eq!(config.selection, Selection::Tournament(3));
        assert_eq!(config.crossover, Crossover::TwoPointOrder);
        assert_eq!(config.mutation, Mutation::Swap);
        assert_eq!(config.replacement, Replacement::Elitist);
        assert_eq!(config.stall_patience, 10);
        assert!(config.max_generations.is_none());
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_population_size(50)
            .with_offspring_size(20)
            .with_selection(Selection::Rank)
            .with_crossover(Crossover::PartiallyMapped)
            .with_mutation(Mutation::Invert)
            .with_replacement(Replacement::Elitist)
            .with_stall_patience(25)
            .with_max_generations(500)
            .with_seed(42);

        assert_eq!(config.population_size, 50);
        assert_eq!(config.offspring_size, 20);
        assert_eq!(config.selection, Selection::Rank);
        assert_eq!(config.crossover, Crossover::PartiallyMapped);
        assert_eq!(config.mutation, Mutation::Invert);
        assert_eq!(config.stall_patience, 25);
        assert_eq!(config.max_generations, Some(500));
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_with_tournament_size() {
        let config = GaConfig::default().with_tournament_size(5);
        assert_eq!(config.selection, Selection::Tournament(5));
    }

    #[test]
    fn test_validate_ok() {
        assert!(GaConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_population_too_small() {
        for n in [0, 1] {
            let config = GaConfig::default().with_population_size(n);
            assert!(matches!(config.validate(), Err(TspError::InvalidConfig(_))));
        }
    }

    #[test]
    fn test_validate_offspring_size() {
        assert!(GaConfig::default().with_offspring_size(0).validate().is_err());
        assert!(GaConfig::default().with_offspring_size(7).validate().is_err());
        assert!(GaConfig::default().with_offspring_size(2).validate().is_ok());
    }

    #[test]
    fn test_validate_zero_tournament() {
        assert!(GaConfig::default().with_tournament_size(0).validate().is_err());
    }

    #[test]
    fn test_validate_zero_generations() {
        assert!(GaConfig::default().with_max_generations(0).validate().is_err());
    }

    #[test]
    fn test_zero_patience_is_valid() {
        assert!(GaConfig::default().with_stall_patience(0).validate().is_ok());
    }
}
