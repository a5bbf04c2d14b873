//! Tree data structures for Monte Carlo Tree Search
//!
//! Nodes live in a flat arena owned by [`SearchTree`]. Parent and child links
//! are [`NodeId`] handles into that arena, so a child can walk back to the root
//! during backpropagation without any shared ownership.

use std::collections::HashMap;
use std::fmt;

use crate::{game_state::GameState, MCTSError, Result};

/// Handle to a node inside a [`SearchTree`]
///
/// Only valid for the tree that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the arena index of this handle
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Represents one explored state in the search tree
///
/// Statistics can only change through [`SearchTree::update`] and children can
/// only be added through [`SearchTree::add_child`].
#[derive(Debug, Clone)]
pub struct MCTSNode<S: GameState> {
    state: S,

    /// The action that led to this state (None for root)
    action: Option<S::Action>,

    parent: Option<NodeId>,

    /// Children in creation order
    children: Vec<NodeId>,

    /// Lookup from action to the child it produced
    expanded: HashMap<S::Action, NodeId>,

    num_visits: u64,
    total_reward: f64,
    is_terminal: bool,
    is_fully_expanded: bool,

    /// Depth of this node in the tree (root = 0)
    depth: usize,
}

impl<S: GameState> MCTSNode<S> {
    /// Creates a detached node for `state`
    ///
    /// Terminality is read from the state once; a terminal node starts fully
    /// expanded and never gains children.
    pub fn new(state: S, action: Option<S::Action>, parent: Option<NodeId>, depth: usize) -> Self {
        let is_terminal = state.is_terminal();

        MCTSNode {
            state,
            action,
            parent,
            children: Vec::new(),
            expanded: HashMap::new(),
            num_visits: 0,
            total_reward: 0.0,
            is_terminal,
            is_fully_expanded: is_terminal,
            depth,
        }
    }

    /// The state wrapped by this node
    pub fn state(&self) -> &S {
        &self.state
    }

    /// The action that led here from the parent
    pub fn action(&self) -> Option<&S::Action> {
        self.action.as_ref()
    }

    /// The parent node, None for the root
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in the order they were expanded
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Returns the child registered under `action`, if any
    pub fn child(&self, action: &S::Action) -> Option<NodeId> {
        self.expanded.get(action).copied()
    }

    /// Returns true if `action` already has a child
    pub fn has_child(&self, action: &S::Action) -> bool {
        self.expanded.contains_key(action)
    }

    /// Number of simulations that passed through or started at this node
    pub fn num_visits(&self) -> u64 {
        self.num_visits
    }

    /// Sum of all rewards backpropagated through this node
    pub fn total_reward(&self) -> f64 {
        self.total_reward
    }

    /// Returns the average reward (value) of this node
    pub fn value(&self) -> f64 {
        if self.num_visits == 0 {
            return 0.0;
        }
        self.total_reward / self.num_visits as f64
    }

    pub fn is_terminal(&self) -> bool {
        self.is_terminal
    }

    /// True once every legal action has a child, or when the node is terminal
    pub fn is_fully_expanded(&self) -> bool {
        self.is_fully_expanded
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns true if this node has no children
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    fn register_child(&mut self, action: S::Action, child: NodeId) -> Result<()> {
        if self.expanded.contains_key(&action) {
            return Err(MCTSError::DuplicateAction(format!("{:?}", action)));
        }
        self.expanded.insert(action, child);
        self.children.push(child);
        Ok(())
    }

    fn record(&mut self, reward: f64) {
        self.num_visits += 1;
        self.total_reward += reward;
    }
}

/// Arena holding every node of one search
///
/// The root always has handle index 0. A tree is built by one search call and
/// dropped as a whole when the next search starts.
#[derive(Debug, Clone)]
pub struct SearchTree<S: GameState> {
    nodes: Vec<MCTSNode<S>>,
    max_depth: usize,
}

impl<S: GameState> SearchTree<S> {
    /// Creates a tree containing only a root for `state`
    pub fn new(state: S) -> Self {
        SearchTree {
            nodes: vec![MCTSNode::new(state, None, None, 0)],
            max_depth: 0,
        }
    }

    /// Handle of the root node
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Returns the node behind `id`
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this tree.
    pub fn get(&self, id: NodeId) -> &MCTSNode<S> {
        &self.nodes[id.0]
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Deepest node depth created so far
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Child handles of `id` in expansion order
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).children()
    }

    /// Iterates over every node with its handle
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &MCTSNode<S>)> {
        self.nodes.iter().enumerate().map(|(i, node)| (NodeId(i), node))
    }

    /// Creates a child of `parent` holding `state`, reached through `action`
    ///
    /// Fails with [`MCTSError::DuplicateAction`] if `action` already has a child;
    /// callers are expected to check [`MCTSNode::has_child`] first.
    pub fn add_child(&mut self, parent: NodeId, action: S::Action, state: S) -> Result<NodeId> {
        if self.get(parent).has_child(&action) {
            return Err(MCTSError::DuplicateAction(format!("{:?}", action)));
        }

        let id = NodeId(self.nodes.len());
        let depth = self.get(parent).depth + 1;
        let child = MCTSNode::new(state, Some(action.clone()), Some(parent), depth);

        self.nodes[parent.0].register_child(action, id)?;
        self.nodes.push(child);
        self.max_depth = self.max_depth.max(depth);

        Ok(id)
    }

    /// Marks `id` as fully expanded; the flag never reverts
    pub(crate) fn mark_fully_expanded(&mut self, id: NodeId) {
        self.nodes[id.0].is_fully_expanded = true;
    }

    /// Increments the visit count of `id` and adds `reward` to its total
    pub fn update(&mut self, id: NodeId, reward: f64) {
        self.nodes[id.0].record(reward);
    }

    /// Returns a visualization of the tree, one node per line in depth-first order
    pub fn visualize(&self) -> String {
        let mut output = String::new();
        let mut pending = vec![self.root()];

        while let Some(id) = pending.pop() {
            let node = self.get(id);
            let indent = "  ".repeat(node.depth);
            let action_str = match &node.action {
                Some(action) => format!("{:?}", action),
                None => "Root".to_string(),
            };

            output.push_str(&format!(
                "{}{} (visits: {}, value: {:.3})\n",
                indent,
                action_str,
                node.num_visits,
                node.value()
            ));

            // Reversed so the first child is printed first
            pending.extend(node.children.iter().rev());
        }

        output
    }
}
