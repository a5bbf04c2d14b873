//! Traits defining the decision process searched by MCTS.
//!
//! The GameState trait is the primary interface that must be implemented for any
//! game or decision process that will be used with the search engine.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for actions that can be taken in a game
///
/// Actions identify transitions. Two actions are equal iff they represent the
/// same transition from equivalent states; the engine uses equality and hashing
/// to tell which actions of a node already have a child.
pub trait Action: Clone + Debug + Eq + Hash + Send + Sync {}

impl<T> Action for T where T: Clone + Debug + Eq + Hash + Send + Sync {}

/// Trait for the player to move in a state
///
/// The engine only needs a signed multiplier from the player. The default
/// selection policy multiplies a child's mean reward by the sign of the player
/// to move at the parent, which assumes a two-player zero-sum convention where
/// rewards are expressed from the first player's point of view (`+1` for one
/// side, `-1` for the other). Single-agent or cooperative processes should
/// return a constant sign, see [`NoPlayer`].
pub trait Player: Clone + Debug + PartialEq + Send + Sync {
    /// Returns the multiplier applied to rewards when this player is to move
    fn sign(&self) -> f64;
}

/// Trait defining the state interface required for MCTS
///
/// A state is immutable per step: [`take_action`](GameState::take_action)
/// returns a new state and never modifies the receiver.
pub trait GameState: Clone + Debug + Send + Sync {
    /// The type of actions that can be taken in this game
    type Action: Action;

    /// The type of players in this game
    type Player: Player;

    /// Returns the legal actions from this state
    ///
    /// Must be non-empty unless the state is terminal. The order is significant:
    /// the default expansion policy expands the first action without a child.
    ///
    /// # Example
    ///
    /// ```
    /// # use mcts_engine::{GameState, NoPlayer};
    /// # #[derive(Clone, Debug)]
    /// # struct Counter(u8);
    /// # impl GameState for Counter {
    /// # type Action = u8;
    /// # type Player = NoPlayer;
    /// fn get_possible_actions(&self) -> Vec<u8> {
    ///     if self.is_terminal() { vec![] } else { vec![1, 2] }
    /// }
    /// # fn take_action(&self, action: &u8) -> Self { Counter(self.0 + action) }
    /// # fn is_terminal(&self) -> bool { self.0 >= 5 }
    /// # fn get_reward(&self) -> f64 { 0.0 }
    /// # fn get_current_player(&self) -> NoPlayer { NoPlayer }
    /// # }
    /// ```
    fn get_possible_actions(&self) -> Vec<Self::Action>;

    /// Applies an action, returning the successor state
    ///
    /// # Parameters
    ///
    /// * `action`: one of the actions returned by `get_possible_actions`
    fn take_action(&self, action: &Self::Action) -> Self;

    /// Returns true if no further actions can be taken
    fn is_terminal(&self) -> bool;

    /// Returns the reward of a terminal state
    ///
    /// Only meaningful when `is_terminal()` is true. The sign and magnitude
    /// convention belongs to the implementation; it must agree with the
    /// signs returned by [`Player::sign`].
    fn get_reward(&self) -> f64;

    /// Returns the player whose turn it is in this state
    fn get_current_player(&self) -> Self::Player;
}

macro_rules! impl_signed_player {
    ($($t:ty),*) => {
        $(
            impl Player for $t {
                fn sign(&self) -> f64 {
                    *self as f64
                }
            }
        )*
    };
}

impl_signed_player!(i8, i16, i32, i64, f32, f64);

/// Unit marker for processes without adversarial players
///
/// Its sign is always `1.0`, so rewards are maximised at every level of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoPlayer;

impl Player for NoPlayer {
    fn sign(&self) -> f64 {
        1.0
    }
}
