//! Selection policies for the MCTS algorithm
//!
//! Selection policies score a child relative to its parent while descending
//! the tree, balancing exploration and exploitation.

use rand::{seq::SliceRandom, Rng};

use crate::{
    game_state::{GameState, Player},
    tree::{MCTSNode, NodeId, SearchTree},
    MCTSError, Result,
};

/// Trait for policies that score children during selection
///
/// Implementations must be pure: the score may only depend on the two nodes
/// and the exploration weight. The engine only scores children that have been
/// visited at least once.
pub trait SelectionPolicy<S: GameState>: Send + Sync {
    /// Scores `child` as a candidate move from `parent`
    fn score(&self, parent: &MCTSNode<S>, child: &MCTSNode<S>, exploration_weight: f64) -> f64;

    /// Create a boxed clone of this policy
    fn clone_box(&self) -> Box<dyn SelectionPolicy<S>>;
}

/// Upper Confidence Bound 1 (UCB1) selection policy
///
/// Scores a child with
///
/// ```text
/// UCB1 = sign(parent player) * total_reward / visits
///        + exploration_weight * sqrt(ln(parent_visits) / visits)
/// ```
///
/// The sign of the player to move at the parent orients the mean reward, so a
/// single tree serves both sides of a two-player zero-sum game.
#[derive(Debug, Clone, Copy, Default)]
pub struct UCB1Policy;

impl UCB1Policy {
    /// Creates a new UCB1 policy
    pub fn new() -> Self {
        UCB1Policy
    }
}

impl<S: GameState> SelectionPolicy<S> for UCB1Policy {
    fn score(&self, parent: &MCTSNode<S>, child: &MCTSNode<S>, exploration_weight: f64) -> f64 {
        debug_assert!(child.num_visits() > 0, "UCB1 is undefined for unvisited children");

        let sign = parent.state().get_current_player().sign();
        let visits = child.num_visits() as f64;

        let exploitation = sign * child.total_reward() / visits;
        let exploration =
            exploration_weight * ((parent.num_visits() as f64).ln() / visits).sqrt();

        exploitation + exploration
    }

    fn clone_box(&self) -> Box<dyn SelectionPolicy<S>> {
        Box::new(*self)
    }
}

/// Selection policy backed by a plain function or closure
///
/// ```
/// use mcts_engine::policy::selection::FnSelectionPolicy;
/// # use mcts_engine::{GameState, MCTSNode, NoPlayer};
/// # #[derive(Clone, Debug)]
/// # struct Coin;
/// # impl GameState for Coin {
/// # type Action = u8;
/// # type Player = NoPlayer;
/// # fn get_possible_actions(&self) -> Vec<u8> { vec![] }
/// # fn take_action(&self, _: &u8) -> Self { Coin }
/// # fn is_terminal(&self) -> bool { true }
/// # fn get_reward(&self) -> f64 { 0.0 }
/// # fn get_current_player(&self) -> NoPlayer { NoPlayer }
/// # }
///
/// // Prefer the most visited child, ignoring exploration entirely
/// let most_visited = FnSelectionPolicy::new(
///     |_parent: &MCTSNode<Coin>, child: &MCTSNode<Coin>, _weight: f64| child.num_visits() as f64,
/// );
/// ```
#[derive(Clone)]
pub struct FnSelectionPolicy<F> {
    score: F,
}

impl<F> FnSelectionPolicy<F> {
    /// Wraps `score` as a selection policy
    pub fn new(score: F) -> Self {
        FnSelectionPolicy { score }
    }
}

impl<F> std::fmt::Debug for FnSelectionPolicy<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnSelectionPolicy").finish_non_exhaustive()
    }
}

impl<S, F> SelectionPolicy<S> for FnSelectionPolicy<F>
where
    S: GameState,
    F: Fn(&MCTSNode<S>, &MCTSNode<S>, f64) -> f64 + Clone + Send + Sync + 'static,
{
    fn score(&self, parent: &MCTSNode<S>, child: &MCTSNode<S>, exploration_weight: f64) -> f64 {
        (self.score)(parent, child, exploration_weight)
    }

    fn clone_box(&self) -> Box<dyn SelectionPolicy<S>> {
        Box::new(self.clone())
    }
}

// Implement SelectionPolicy for Box<dyn SelectionPolicy>
impl<S: GameState> SelectionPolicy<S> for Box<dyn SelectionPolicy<S>> {
    fn score(&self, parent: &MCTSNode<S>, child: &MCTSNode<S>, exploration_weight: f64) -> f64 {
        (**self).score(parent, child, exploration_weight)
    }

    fn clone_box(&self) -> Box<dyn SelectionPolicy<S>> {
        (**self).clone_box()
    }
}

/// Returns the highest-scoring child of `node`
///
/// Children with equal scores are chosen between uniformly at random, never
/// by expansion order. Fails with [`MCTSError::NoLegalActions`] when `node`
/// has no children and with [`MCTSError::InvalidScore`] when the policy scores
/// any child as NaN.
pub fn best_child<S, P, R>(
    tree: &SearchTree<S>,
    node: NodeId,
    policy: &P,
    exploration_weight: f64,
    rng: &mut R,
) -> Result<NodeId>
where
    S: GameState,
    P: SelectionPolicy<S> + ?Sized,
    R: Rng + ?Sized,
{
    let parent = tree.get(node);
    let mut best_value = f64::NEG_INFINITY;
    let mut best_nodes = Vec::new();

    for &id in parent.children() {
        let value = policy.score(parent, tree.get(id), exploration_weight);
        if value.is_nan() {
            return Err(MCTSError::InvalidScore(format!(
                "child {} of {} scored NaN",
                id, node
            )));
        }
        if value > best_value {
            best_value = value;
            best_nodes.clear();
            best_nodes.push(id);
        } else if value == best_value {
            best_nodes.push(id);
        }
    }

    best_nodes
        .choose(rng)
        .copied()
        .ok_or(MCTSError::NoLegalActions)
}
