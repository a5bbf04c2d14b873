//! Policies for different phases of the MCTS algorithm
//!
//! This module contains implementations of the pluggable policies:
//! - Selection policies: How to score children while descending the tree
//! - Simulation policies: How to play out games from a new node
//! - Expansion policies: Which missing action becomes the new node

pub mod expansion;
pub mod selection;
pub mod simulation;

pub use expansion::{ExpansionPolicy, FirstUnexpandedPolicy, RandomExpansionPolicy};
pub use selection::{best_child, FnSelectionPolicy, SelectionPolicy, UCB1Policy};
pub use simulation::{HeuristicPolicy, RandomPolicy, SimulationPolicy};
