//! Expansion policies determine which missing action to materialize
//! when expanding a node.

use rand::{seq::IteratorRandom, RngCore};

use crate::{game_state::GameState, tree::MCTSNode};

/// Trait for policies that select which action to expand
pub trait ExpansionPolicy<S: GameState>: Send + Sync {
    /// Picks an action of `actions` that `node` has no child for yet.
    ///
    /// `actions` is the node's legal action list in enumeration order. Returns
    /// the index of the chosen action, or `None` if every action is expanded.
    fn select_action_to_expand(
        &self,
        node: &MCTSNode<S>,
        actions: &[S::Action],
        rng: &mut dyn RngCore,
    ) -> Option<usize>;

    /// Create a boxed clone of this policy
    fn clone_box(&self) -> Box<dyn ExpansionPolicy<S>>;
}

/// Expands the first action, in enumeration order, without a child
///
/// Deterministic, so the tree shape only depends on the random source used by
/// selection and simulation.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstUnexpandedPolicy;

impl FirstUnexpandedPolicy {
    /// Creates a new first-unexpanded policy
    pub fn new() -> Self {
        FirstUnexpandedPolicy
    }
}

impl<S: GameState> ExpansionPolicy<S> for FirstUnexpandedPolicy {
    fn select_action_to_expand(
        &self,
        node: &MCTSNode<S>,
        actions: &[S::Action],
        _rng: &mut dyn RngCore,
    ) -> Option<usize> {
        actions.iter().position(|action| !node.has_child(action))
    }

    fn clone_box(&self) -> Box<dyn ExpansionPolicy<S>> {
        Box::new(*self)
    }
}

/// Random expansion policy
///
/// Selects an unexpanded action uniformly at random.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomExpansionPolicy;

impl RandomExpansionPolicy {
    /// Creates a new random expansion policy
    pub fn new() -> Self {
        RandomExpansionPolicy
    }
}

impl<S: GameState> ExpansionPolicy<S> for RandomExpansionPolicy {
    fn select_action_to_expand(
        &self,
        node: &MCTSNode<S>,
        actions: &[S::Action],
        rng: &mut dyn RngCore,
    ) -> Option<usize> {
        actions
            .iter()
            .enumerate()
            .filter(|(_, action)| !node.has_child(action))
            .map(|(i, _)| i)
            .choose(rng)
    }

    fn clone_box(&self) -> Box<dyn ExpansionPolicy<S>> {
        Box::new(*self)
    }
}

// Implement ExpansionPolicy for Box<dyn ExpansionPolicy>
impl<S: GameState> ExpansionPolicy<S> for Box<dyn ExpansionPolicy<S>> {
    fn select_action_to_expand(
        &self,
        node: &MCTSNode<S>,
        actions: &[S::Action],
        rng: &mut dyn RngCore,
    ) -> Option<usize> {
        (**self).select_action_to_expand(node, actions, rng)
    }

    fn clone_box(&self) -> Box<dyn ExpansionPolicy<S>> {
        (**self).clone_box()
    }
}
