//! Configuration options for the search engine
//!
//! This module defines the budget and tuning parameters that control a search.
//! A configuration is validated when the engine is built.

use std::time::Duration;

use crate::{MCTSError, Result};

/// How long a search runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchBudget {
    /// Keep starting rounds while the elapsed wall-clock time is under the limit
    ///
    /// The deadline is only checked between rounds, so a search may overrun the
    /// limit by up to one round.
    Time(Duration),

    /// Run exactly this many rounds
    Iterations(usize),
}

/// Configuration for the search engine
///
/// Exactly one of a time limit or an iteration limit must be set.
///
/// # Example
///
/// ```
/// use mcts_engine::{MCTSConfig, SearchBudget};
///
/// let config = MCTSConfig::default()
///     .with_exploration_constant(1.5)
///     .with_iteration_limit(10_000)
///     .with_seed(7);
///
/// assert_eq!(config.budget().unwrap(), SearchBudget::Iterations(10_000));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MCTSConfig {
    /// Wall-clock budget per search
    pub time_limit: Option<Duration>,

    /// Number of rounds per search
    pub iteration_limit: Option<usize>,

    /// Exploration weight passed to the selection policy while descending
    ///
    /// The standard value is sqrt(2).
    pub exploration_constant: f64,

    /// Seed for the engine's random source; entropy is used when unset
    pub seed: Option<u64>,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        MCTSConfig {
            time_limit: None,
            iteration_limit: None,
            exploration_constant: std::f64::consts::SQRT_2,
            seed: None,
        }
    }
}

impl MCTSConfig {
    /// Sets the exploration constant
    pub fn with_exploration_constant(mut self, constant: f64) -> Self {
        self.exploration_constant = constant;
        self
    }

    /// Sets the number of rounds per search
    pub fn with_iteration_limit(mut self, iterations: usize) -> Self {
        self.iteration_limit = Some(iterations);
        self
    }

    /// Sets the wall-clock budget per search
    pub fn with_time_limit(mut self, duration: Duration) -> Self {
        self.time_limit = Some(duration);
        self
    }

    /// Sets the wall-clock budget per search in milliseconds
    pub fn with_time_limit_ms(self, millis: u64) -> Self {
        self.with_time_limit(Duration::from_millis(millis))
    }

    /// Seeds the random source used for tie-breaks and rollouts
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration and returns its budget
    pub fn budget(&self) -> Result<SearchBudget> {
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(MCTSError::InvalidConfiguration(format!(
                "exploration constant must be a finite, non-negative number, got {}",
                self.exploration_constant
            )));
        }

        match (self.time_limit, self.iteration_limit) {
            (Some(_), Some(_)) => Err(MCTSError::InvalidConfiguration(
                "cannot have both a time limit and an iteration limit".to_string(),
            )),
            (None, None) => Err(MCTSError::InvalidConfiguration(
                "must have either a time limit or an iteration limit".to_string(),
            )),
            (Some(limit), None) if limit.is_zero() => Err(MCTSError::InvalidConfiguration(
                "time limit must be positive".to_string(),
            )),
            (Some(limit), None) => Ok(SearchBudget::Time(limit)),
            (None, Some(0)) => Err(MCTSError::InvalidConfiguration(
                "iteration limit must be at least one".to_string(),
            )),
            (None, Some(iterations)) => Ok(SearchBudget::Iterations(iterations)),
        }
    }
}
