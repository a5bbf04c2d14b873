//! Main implementation of the Monte Carlo Tree Search algorithm
//!
//! This module contains the search engine, orchestrating budgeted rounds of
//! selection, expansion, simulation and backpropagation over a fresh tree.

use std::time::Instant;

use log::{debug, trace, warn};
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    config::{MCTSConfig, SearchBudget},
    game_state::GameState,
    policy::{
        expansion::{ExpansionPolicy, FirstUnexpandedPolicy},
        selection::{best_child, SelectionPolicy, UCB1Policy},
        simulation::{RandomPolicy, SimulationPolicy},
    },
    stats::SearchStatistics,
    tree::{NodeId, SearchTree},
    MCTSError, Result,
};

/// The Monte Carlo Tree Search engine
///
/// Each call to [`search`](MCTS::search) builds a new tree from the given
/// state; nothing is reused between calls. The tree of the last successful
/// search stays available through [`tree`](MCTS::tree) until the next call.
///
/// The engine is single-threaded. Run independent searches concurrently by
/// giving each thread its own engine.
pub struct MCTS<S: GameState> {
    /// Tree built by the last successful search
    tree: Option<SearchTree<S>>,

    budget: SearchBudget,

    /// Exploration weight used while descending
    exploration_constant: f64,

    /// Statistics gathered during the last search
    statistics: SearchStatistics,

    /// Policy for scoring children during the selection phase
    selection_policy: Box<dyn SelectionPolicy<S>>,

    /// Policy for simulating games during the simulation phase
    simulation_policy: Box<dyn SimulationPolicy<S>>,

    /// Policy for picking the action a new node is created for
    expansion_policy: Box<dyn ExpansionPolicy<S>>,

    /// Source of tie-break, expansion and rollout randomness
    rng: StdRng,
}

impl<S: GameState + 'static> MCTS<S> {
    /// Creates a search engine from a validated configuration
    ///
    /// Fails with [`MCTSError::InvalidConfiguration`] unless exactly one budget
    /// is set and it is positive.
    pub fn new(config: MCTSConfig) -> Result<Self> {
        let budget = config.budget()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(MCTS {
            tree: None,
            budget,
            exploration_constant: config.exploration_constant,
            statistics: SearchStatistics::new(),
            selection_policy: Box::new(UCB1Policy::new()),
            simulation_policy: Box::new(RandomPolicy::new()),
            expansion_policy: Box::new(FirstUnexpandedPolicy::new()),
            rng,
        })
    }

    /// Sets the selection policy to use
    pub fn with_selection_policy<P: SelectionPolicy<S> + 'static>(mut self, policy: P) -> Self {
        self.selection_policy = Box::new(policy);
        self
    }

    /// Sets the simulation policy to use
    pub fn with_simulation_policy<P: SimulationPolicy<S> + 'static>(mut self, policy: P) -> Self {
        self.simulation_policy = Box::new(policy);
        self
    }

    /// Sets the expansion policy to use
    pub fn with_expansion_policy<P: ExpansionPolicy<S> + 'static>(mut self, policy: P) -> Self {
        self.expansion_policy = Box::new(policy);
        self
    }

    /// Reseeds the random source
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Replaces the random source
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// The validated search budget
    pub fn budget(&self) -> SearchBudget {
        self.budget
    }

    /// The exploration weight used while descending
    pub fn exploration_constant(&self) -> f64 {
        self.exploration_constant
    }

    /// Runs a search from `initial_state` and returns the best action
    pub fn search(&mut self, initial_state: S) -> Result<S::Action> {
        self.search_with_details(initial_state).map(|(action, _)| action)
    }

    /// Runs a search and returns the best action with its mean reward
    ///
    /// The value is `total_reward / num_visits` of the chosen child, as seen
    /// from the reward convention of the state (not oriented by player).
    ///
    /// Fails with [`MCTSError::NoLegalActions`] if `initial_state` is terminal.
    /// Any error raised by a round aborts the whole search and no tree is kept.
    pub fn search_with_details(&mut self, initial_state: S) -> Result<(S::Action, f64)> {
        self.tree = None;
        self.statistics = SearchStatistics::new();

        let mut tree = SearchTree::new(initial_state);
        if tree.get(tree.root()).is_terminal() {
            warn!("Refusing to search from a terminal state");
            return Err(MCTSError::NoLegalActions);
        }

        debug!("Starting search with budget {:?}", self.budget);

        let start_time = Instant::now();
        let mut iterations = 0;

        match self.budget {
            SearchBudget::Time(limit) => {
                // The deadline is only checked between rounds
                while start_time.elapsed() < limit {
                    self.execute_round(&mut tree)?;
                    iterations += 1;
                }
                self.statistics.overrun = Some(start_time.elapsed().saturating_sub(limit));
            }
            SearchBudget::Iterations(limit) => {
                for _ in 0..limit {
                    self.execute_round(&mut tree)?;
                    iterations += 1;
                }
            }
        }

        self.statistics.iterations = iterations;
        self.statistics.total_time = start_time.elapsed();
        self.statistics.tree_size = tree.len();
        self.statistics.max_depth = tree.max_depth();

        let best = best_child(
            &tree,
            tree.root(),
            self.selection_policy.as_ref(),
            0.0,
            &mut self.rng,
        )?;
        let node = tree.get(best);
        let action = node.action().cloned().ok_or(MCTSError::NoLegalActions)?;
        let value = node.value();

        debug!("{}", self.statistics.summary());
        debug!("Best action {:?} with value {:.3}", action, value);

        self.tree = Some(tree);
        Ok((action, value))
    }

    /// Execute a single select-simulate-backpropagate round
    fn execute_round(&mut self, tree: &mut SearchTree<S>) -> Result<()> {
        // 1. Selection, ending in exactly one expansion unless a terminal node is reached
        let node = self.select(tree)?;

        // 2. Simulation
        let reward = self
            .simulation_policy
            .simulate(tree.get(node).state(), &mut self.rng)?;

        // 3. Backpropagation
        Self::backpropagate(tree, node, reward);

        Ok(())
    }

    /// Descends from the root and returns the node to simulate from
    ///
    /// Returns the newly expanded node, or a terminal node if the descent
    /// reaches one through fully expanded ancestors.
    fn select(&mut self, tree: &mut SearchTree<S>) -> Result<NodeId> {
        let mut node = tree.root();

        while !tree.get(node).is_terminal() {
            if tree.get(node).is_fully_expanded() {
                node = best_child(
                    tree,
                    node,
                    self.selection_policy.as_ref(),
                    self.exploration_constant,
                    &mut self.rng,
                )?;
            } else {
                return self.expand(tree, node);
            }
        }

        Ok(node)
    }

    /// Creates one child of `node` for an action that has none yet
    ///
    /// A non-terminal node without any legal action is a malformed state rather
    /// than an expansion bug, so it fails with `NonTerminalDeadEnd` like a rollout.
    fn expand(&mut self, tree: &mut SearchTree<S>, node: NodeId) -> Result<NodeId> {
        let parent = tree.get(node);
        if parent.is_fully_expanded() {
            return Err(MCTSError::AlreadyFullyExpanded);
        }

        let actions = parent.state().get_possible_actions();
        if actions.is_empty() {
            return Err(MCTSError::NonTerminalDeadEnd(format!("{:?}", parent.state())));
        }

        let index = self
            .expansion_policy
            .select_action_to_expand(parent, &actions, &mut self.rng)
            .ok_or(MCTSError::AlreadyFullyExpanded)?;

        let action = actions[index].clone();
        let next_state = parent.state().take_action(&action);

        trace!("Expanding {} with {:?}", node, action);
        let child = tree.add_child(node, action, next_state)?;

        if tree.children(node).len() == actions.len() {
            tree.mark_fully_expanded(node);
        }

        Ok(child)
    }

    /// Adds `reward` to every node from `node` up to and including the root
    fn backpropagate(tree: &mut SearchTree<S>, node: NodeId, reward: f64) {
        let mut current = Some(node);
        while let Some(id) = current {
            tree.update(id, reward);
            current = tree.get(id).parent();
        }
    }

    /// Returns the tree built by the last successful search
    pub fn tree(&self) -> Option<&SearchTree<S>> {
        self.tree.as_ref()
    }

    /// Returns the search statistics
    pub fn get_statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Returns a visualization of the last search tree
    pub fn visualize_tree(&self) -> String {
        match &self.tree {
            Some(tree) => tree.visualize(),
            None => String::new(),
        }
    }
}
