//! Simulation (rollout) policies for the MCTS algorithm
//!
//! Simulation policies estimate the value of a freshly expanded node by
//! playing its state out to a terminal state.

use rand::{seq::SliceRandom, RngCore};

use crate::{game_state::GameState, MCTSError, Result};

/// Trait for policies that simulate games
pub trait SimulationPolicy<S: GameState>: Send + Sync {
    /// Simulates a game from the given state and returns its reward
    ///
    /// A terminal `state` must yield `state.get_reward()` without taking any
    /// action.
    fn simulate(&self, state: &S, rng: &mut dyn RngCore) -> Result<f64>;

    /// Create a boxed clone of this policy
    fn clone_box(&self) -> Box<dyn SimulationPolicy<S>>;
}

/// Random simulation policy
///
/// This policy plays uniformly random legal moves until the game ends. A
/// non-terminal state without legal actions is reported as
/// [`MCTSError::NonTerminalDeadEnd`] rather than scored.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPolicy;

impl RandomPolicy {
    /// Creates a new random policy
    pub fn new() -> Self {
        RandomPolicy
    }
}

impl<S: GameState> SimulationPolicy<S> for RandomPolicy {
    fn simulate(&self, state: &S, rng: &mut dyn RngCore) -> Result<f64> {
        if state.is_terminal() {
            return Ok(state.get_reward());
        }

        let mut current = state.clone();
        while !current.is_terminal() {
            let actions = current.get_possible_actions();
            let action = actions
                .choose(&mut *rng)
                .ok_or_else(|| MCTSError::NonTerminalDeadEnd(format!("{:?}", current)))?;
            current = current.take_action(action);
        }

        Ok(current.get_reward())
    }

    fn clone_box(&self) -> Box<dyn SimulationPolicy<S>> {
        Box::new(*self)
    }
}

/// Heuristic simulation policy
///
/// Terminal states report their true reward; any other state is scored by the
/// heuristic function instead of being played out.
#[derive(Debug, Clone)]
pub struct HeuristicPolicy<F, S>
where
    F: Fn(&S) -> f64 + Clone + Send + Sync + 'static,
    S: GameState + 'static,
{
    /// The heuristic function
    heuristic: F,
    _phantom: std::marker::PhantomData<fn(&S)>,
}

impl<F, S> HeuristicPolicy<F, S>
where
    F: Fn(&S) -> f64 + Clone + Send + Sync + 'static,
    S: GameState + 'static,
{
    /// Creates a new heuristic policy with the given function
    pub fn new(heuristic: F) -> Self {
        HeuristicPolicy {
            heuristic,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<F, S> SimulationPolicy<S> for HeuristicPolicy<F, S>
where
    F: Fn(&S) -> f64 + Clone + Send + Sync + 'static,
    S: GameState + 'static,
{
    fn simulate(&self, state: &S, _rng: &mut dyn RngCore) -> Result<f64> {
        if state.is_terminal() {
            return Ok(state.get_reward());
        }

        Ok((self.heuristic)(state))
    }

    fn clone_box(&self) -> Box<dyn SimulationPolicy<S>> {
        Box::new(self.clone())
    }
}

// Implement SimulationPolicy for Box<dyn SimulationPolicy>
impl<S: GameState> SimulationPolicy<S> for Box<dyn SimulationPolicy<S>> {
    fn simulate(&self, state: &S, rng: &mut dyn RngCore) -> Result<f64> {
        (**self).simulate(state, rng)
    }

    fn clone_box(&self) -> Box<dyn SimulationPolicy<S>> {
        (**self).clone_box()
    }
}
