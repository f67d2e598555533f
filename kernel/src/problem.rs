//! The problem contract every searchable state space implements.
//!
//! A problem exposes an initial state, a goal test, ordered action
//! enumeration, a deterministic transition and a per-action cost. Search
//! algorithms are generic over [`Problem`]; they never know the concrete
//! domain.

use std::fmt::Debug;
use std::hash::Hash;

use crate::cache::ProblemCache;

/// A state space that search algorithms can explore.
///
/// # Contract
///
/// - `is_goal` is observable: conforming searches call it exactly once per
///   distinct state they examine for goal-ness, and callers count these calls.
///   Heuristics must not call it.
/// - `actions` order is significant. It decides which successor is generated
///   first and therefore its generation number (the tie-break key).
/// - `successor` and `cost` must only be given actions returned by
///   `actions` for the same state. Anything else is a caller bug.
/// - `cost` must be non-negative for uniform-cost and A* optimality.
pub trait Problem {
    /// State type. Equality and hashing drive explored-set and frontier membership.
    type State: Clone + Eq + Hash + Debug;
    /// Action type, as returned by [`Problem::actions`].
    type Action: Clone + Debug;

    /// The search's starting point.
    fn initial_state(&self) -> Self::State;

    /// Whether `state` satisfies the goal.
    fn is_goal(&self, state: &Self::State) -> bool;

    /// All actions legal from `state`, in deterministic order.
    fn actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Apply `action` to `state`.
    ///
    /// # Errors
    ///
    /// Returns [`ProblemError`] when the domain cannot produce the transition
    /// (an unfinished method, a diagnostic overlay rejecting the step). Search
    /// algorithms propagate this error unchanged.
    fn successor(
        &self,
        state: &Self::State,
        action: &Self::Action,
    ) -> Result<Self::State, ProblemError>;

    /// Incremental cost of taking `action` from `state`.
    fn cost(&self, _state: &Self::State, _action: &Self::Action) -> f64 {
        1.0
    }

    /// The memoization store owned by this problem instance.
    ///
    /// Must return the same store for the lifetime of the problem.
    fn cache(&self) -> &ProblemCache;
}

/// Failure raised by a problem while a search is running.
///
/// None of these are retried: every problem operation is deterministic, so a
/// retry would reproduce the same outcome.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProblemError {
    /// A domain method was deliberately left unfinished.
    #[error("problem operation not implemented: {operation}")]
    Unimplemented { operation: &'static str },

    /// A transition decreased the heuristic by more than its cost.
    #[error("{0}")]
    InconsistentHeuristic(Box<InconsistencyReport>),

    /// Any other domain-level failure.
    #[error("domain failure: {detail}")]
    Domain { detail: String },
}

/// Everything needed to pinpoint a heuristic consistency violation.
///
/// States and the action are rendered with their `Debug` form so the report
/// stays independent of the problem's types.
#[derive(Debug, Clone, PartialEq)]
pub struct InconsistencyReport {
    pub state: String,
    pub action: String,
    pub next_state: String,
    pub heuristic: f64,
    pub next_heuristic: f64,
    pub cost: f64,
}

impl InconsistencyReport {
    /// `h(state) - h(next_state)`, the decrease that exceeded the cost.
    #[must_use]
    pub fn decrease(&self) -> f64 {
        self.heuristic - self.next_heuristic
    }
}

impl std::fmt::Display for InconsistencyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "state (heuristic = {}):", self.heuristic)?;
        writeln!(f, "{}", self.state)?;
        writeln!(f, "action: {} (cost = {})", self.action, self.cost)?;
        writeln!(f, "next state (heuristic = {}):", self.next_heuristic)?;
        writeln!(f, "{}", self.next_state)?;
        writeln!(f, "decrease in heuristic exceeds the action cost")?;
        write!(
            f,
            "h(state) - h(next state) = {} - {} = {} > {} (action cost)",
            self.heuristic,
            self.next_heuristic,
            self.decrease(),
            self.cost
        )
    }
}
