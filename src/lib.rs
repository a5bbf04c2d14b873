//! # mcts-engine
//!
//! A generic Monte Carlo Tree Search (MCTS) engine.
//!
//! Given any decision process implementing [`GameState`], the engine builds a
//! search tree under a fixed time or iteration budget and recommends the best
//! action from the starting state.
//!
//! ## Features
//!
//! - Generic over any state/action types through the [`GameState`] trait
//! - Arena-backed tree with parent links stored as handles
//! - Pluggable selection (UCB1 by default), simulation (uniform random
//!   rollouts by default) and expansion policies
//! - Seedable random source for reproducible searches
//!
//! ## Basic Usage
//!
//! ```
//! use mcts_engine::{GameState, MCTSConfig, MCTS};
//!
//! // Players alternate adding 1 or 2 to a running total; whoever reaches
//! // 10 exactly wins. Rewards are from the first player's point of view.
//! #[derive(Clone, Debug)]
//! struct RaceToTen {
//!     total: u8,
//!     to_move: i8,
//! }
//!
//! impl GameState for RaceToTen {
//!     type Action = u8;
//!     type Player = i8;
//!
//!     fn get_possible_actions(&self) -> Vec<u8> {
//!         (1..=2).filter(|step| self.total + step <= 10).collect()
//!     }
//!
//!     fn take_action(&self, step: &u8) -> Self {
//!         RaceToTen { total: self.total + step, to_move: -self.to_move }
//!     }
//!
//!     fn is_terminal(&self) -> bool {
//!         self.total == 10
//!     }
//!
//!     fn get_reward(&self) -> f64 {
//!         // The player who just moved reached ten
//!         -self.to_move as f64
//!     }
//!
//!     fn get_current_player(&self) -> i8 {
//!         self.to_move
//!     }
//! }
//!
//! fn main() -> Result<(), mcts_engine::MCTSError> {
//!     let config = MCTSConfig::default()
//!         .with_iteration_limit(500)
//!         .with_seed(1);
//!
//!     let mut mcts = MCTS::new(config)?;
//!     let (step, value) = mcts.search_with_details(RaceToTen { total: 8, to_move: 1 })?;
//!
//!     assert_eq!(step, 2);
//!     assert!(value > 0.0);
//!     println!("Search statistics: {}", mcts.get_statistics().summary());
//!     Ok(())
//! }
//! ```
//!
//! ## How It Works
//!
//! Every round performs:
//!
//! 1. **Selection**: starting at the root, descend through fully expanded
//!    nodes using the selection policy with the configured exploration weight.
//!
//! 2. **Expansion**: at the first node with a missing action, create exactly
//!    one child for it. Descending into a terminal node skips this step.
//!
//! 3. **Simulation**: play the new node's state out with the simulation
//!    policy to obtain a reward.
//!
//! 4. **Backpropagation**: add one visit and the reward to every node on the
//!    path back to the root.
//!
//! When the budget is spent the root child with the best pure exploitation
//! score is returned, ties broken at random.

pub mod config;
pub mod game_state;
pub mod mcts;
pub mod policy;
pub mod stats;
pub mod tree;

pub use config::{MCTSConfig, SearchBudget};
pub use game_state::{Action, GameState, NoPlayer, Player};
pub use mcts::MCTS;
pub use policy::{ExpansionPolicy, SelectionPolicy, SimulationPolicy};
pub use stats::SearchStatistics;
pub use tree::{MCTSNode, NodeId, SearchTree};

/// Error types for the MCTS algorithm
///
/// Every variant is a contract violation; none is retried internally.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MCTSError {
    /// Both or neither budgets set, or a budget that is not positive
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A child was registered twice under the same action
    #[error("Action {0} already has a child")]
    DuplicateAction(String),

    /// Expansion was attempted on a node with no missing actions
    #[error("Attempted to expand a fully expanded node")]
    AlreadyFullyExpanded,

    /// A non-terminal state reported no legal actions
    #[error("State is not terminal but has no possible actions: {0}")]
    NonTerminalDeadEnd(String),

    /// A selection policy produced a NaN score
    #[error("Selection policy produced an invalid score: {0}")]
    InvalidScore(String),

    /// No child to choose from, e.g. when searching from a terminal state
    #[error("No legal actions available from current state")]
    NoLegalActions,
}

/// Result type for MCTS operations
pub type Result<T> = std::result::Result<T, MCTSError>;
