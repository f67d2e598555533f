//! A goal-based agent that plans with a search and then follows the plan.
//!
//! The first time the agent is asked to act in a state it has no plan for,
//! it runs one search from that state, replays the solution through the
//! problem, and remembers the action to take in every state along the way.
//! Later questions about those states are answered from the plan.

use std::collections::HashMap;

use waypoint_kernel::Problem;

use crate::error::SearchError;
use crate::heuristic::Heuristic;
use crate::policy::{run, SearchPolicy};

#[derive(Debug)]
pub struct SearchAgent<P: Problem, H> {
    policy: SearchPolicy,
    heuristic: H,
    plan: HashMap<P::State, Option<P::Action>>,
    searches: u64,
}

impl<P, H> SearchAgent<P, H>
where
    P: Problem,
    H: Heuristic<P>,
{
    #[must_use]
    pub fn new(policy: SearchPolicy, heuristic: H) -> Self {
        Self {
            policy,
            heuristic,
            plan: HashMap::new(),
            searches: 0,
        }
    }

    /// The action to take in `state`.
    ///
    /// `None` means there is nothing to do: `state` is a goal, or no goal is
    /// reachable from it.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Problem`] if the problem aborts the search or
    /// the replay of its solution.
    pub fn act(&mut self, problem: &P, state: &P::State) -> Result<Option<P::Action>, SearchError> {
        if let Some(planned) = self.plan.get(state) {
            return Ok(planned.clone());
        }

        self.searches += 1;
        let result = run(&self.policy, problem, state.clone(), &self.heuristic)?;
        tracing::debug!(
            algorithm = %self.policy.algorithm,
            solved = result.is_solved(),
            goal_tests = result.stats.goal_tests,
            "agent planned"
        );

        let Some(actions) = result.solution else {
            self.plan.insert(state.clone(), None);
            return Ok(None);
        };

        let first = actions.first().cloned();
        let mut current = state.clone();
        for action in actions {
            let next = problem.successor(&current, &action)?;
            self.plan.insert(current, Some(action));
            current = next;
        }
        self.plan.insert(current, None);
        Ok(first)
    }

    /// Number of searches run so far.
    #[must_use]
    pub fn searches(&self) -> u64 {
        self.searches
    }

    /// Number of states the agent has a recorded decision for.
    #[must_use]
    pub fn planned_states(&self) -> usize {
        self.plan.len()
    }

    /// Forget the plan; the next `act` searches again.
    pub fn reset(&mut self) {
        self.plan.clear();
    }
}
