//! Generation loop execution.
//!
//! [`GenerationLoop`] is a small state machine:
//! `Initialized → Evolving → Converged`. Each [`step`](GenerationLoop::step)
//! runs breed → mutate → replace, updates the incumbent and the stall
//! counter, and chains the next generation. [`GaRunner`] drives a loop to
//! convergence from a [`GaConfig`].

use std::sync::Arc;

use rand::Rng;
use tracing::{debug, info};
use u_numflow::random::create_rng;

use super::config::GaConfig;
use super::generation::Generation;
use super::population::Population;
use super::tour::Tour;
use crate::distance::DistanceTable;
use crate::error::Result;

/// Lifecycle of a [`GenerationLoop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoopState {
    /// Initial population generated, no generation run yet.
    Initialized,
    /// At least one generation run; more to come.
    Evolving,
    /// Terminal: the stall counter exceeded the patience (or the
    /// generation cap was reached).
    Converged,
}

/// Result of a complete run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaResult {
    /// The final incumbent.
    pub best: Arc<Tour>,

    /// Cost of the final incumbent (same as `best.cost()`).
    pub best_cost: f64,

    /// Best tour of the initial random population.
    pub initial_best: Arc<Tour>,

    /// Number of generations executed.
    pub generations: usize,

    /// Whether the run ended through the stall criterion rather than the
    /// generation cap.
    pub stalled: bool,

    /// Incumbent cost before the first generation, then after each one.
    pub cost_history: Vec<f64>,

    /// Every generation in order.
    pub history: Vec<Generation>,
}

/// Steppable evolutionary loop over a fixed distance table.
///
/// # Usage
///
/// ```
/// use u_tsp::distance::DistanceTable;
/// use u_tsp::ga::{GaConfig, GenerationLoop, LoopState};
///
/// let dt = DistanceTable::from_points(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]).unwrap();
/// let rng = u_numflow::random::create_rng(42);
/// let mut ga = GenerationLoop::new(&dt, GaConfig::default(), rng).unwrap();
/// assert_eq!(ga.state(), LoopState::Initialized);
///
/// while let Some(generation) = ga.step().unwrap() {
///     assert!(generation.incumbent().cost() >= 4.0 - 1e-9);
/// }
/// assert_eq!(ga.state(), LoopState::Converged);
/// ```
#[derive(Debug)]
pub struct GenerationLoop<'a, R> {
    table: &'a DistanceTable,
    config: GaConfig,
    rng: R,
    state: LoopState,
    index: usize,
    parents: Population,
    incumbent: Arc<Tour>,
    stall: usize,
}

impl<'a, R: Rng> GenerationLoop<'a, R> {
    /// Validates `config` and generates the random initial population.
    pub fn new(table: &'a DistanceTable, config: GaConfig, mut rng: R) -> Result<Self> {
        config.validate()?;

        let parents = Population::random(table, config.population_size, &mut rng)?;
        let incumbent = parents.best().clone();
        info!(
            locations = table.size(),
            population = parents.len(),
            initial_best = incumbent.cost(),
            "initialized generation loop"
        );

        Ok(Self {
            table,
            config,
            rng,
            state: LoopState::Initialized,
            index: 0,
            parents,
            incumbent,
            stall: 0,
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Best tour found so far.
    pub fn incumbent(&self) -> &Arc<Tour> {
        &self.incumbent
    }

    /// Consecutive generations without improvement.
    pub fn stall_count(&self) -> usize {
        self.stall
    }

    /// Index of the next generation to run.
    pub fn generation_index(&self) -> usize {
        self.index
    }

    /// Parent population of the next generation.
    pub fn parents(&self) -> &Population {
        &self.parents
    }

    /// The loop's configuration.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Runs one generation and returns it, or `None` once converged.
    pub fn step(&mut self) -> Result<Option<Generation>> {
        if self.state == LoopState::Converged {
            return Ok(None);
        }
        self.state = LoopState::Evolving;

        let generation = Generation::evolve(
            self.index,
            self.parents.clone(),
            &self.incumbent,
            &self.config,
            self.table,
            &mut self.rng,
        )?;

        if generation.improved() {
            self.incumbent = generation.incumbent().clone();
            self.stall = 0;
        } else {
            self.stall += 1;
        }

        debug!(
            generation = generation.index(),
            best = generation.best().cost(),
            mean = generation.mean_cost(),
            incumbent = self.incumbent.cost(),
            stall = self.stall,
            "generation complete"
        );

        let (index, parents) = generation.chain();
        self.index = index;
        self.parents = parents;

        let stalled = self.stall > self.config.stall_patience;
        let capped = self.config.max_generations.is_some_and(|max| self.index >= max);
        if stalled || capped {
            self.state = LoopState::Converged;
            info!(
                generations = self.index,
                best = self.incumbent.cost(),
                stalled,
                "converged"
            );
        }

        Ok(Some(generation))
    }

    /// Steps until converged and collects the full history.
    pub fn run(mut self) -> Result<GaResult> {
        let initial_best = self.incumbent.clone();
        let mut cost_history = vec![initial_best.cost()];
        let mut history = Vec::new();

        while let Some(generation) = self.step()? {
            cost_history.push(generation.incumbent().cost());
            history.push(generation);
        }

        Ok(GaResult {
            best_cost: self.incumbent.cost(),
            best: self.incumbent,
            initial_best,
            generations: history.len(),
            stalled: self.stall > self.config.stall_patience,
            cost_history,
            history,
        })
    }
}

/// Runs the generation loop to convergence.
///
/// # Usage
///
/// ```ignore
/// let table = DistanceTable::from_rows(rows)?;
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&table, &config)?;
/// println!("Best tour: {} ({})", result.best, result.best_cost);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs a seeded (or randomly seeded) loop to convergence.
    ///
    /// Fails with [`TspError::InvalidConfig`](crate::error::TspError::InvalidConfig)
    /// before any generation runs if `config` is degenerate.
    pub fn run(table: &DistanceTable, config: &GaConfig) -> Result<GaResult> {
        let rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };
        GenerationLoop::new(table, config.clone(), rng)?.run()
    }
}

// ============================================================================
// Tests
// ============================================================================
