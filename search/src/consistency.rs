//! Diagnostic overlay that checks heuristic consistency during a search.
//!
//! [`ConsistencyChecked`] wraps a problem and a heuristic. Every transition
//! taken through it is checked against `h(s) - h(s') <= cost(s, a)`; a
//! violation aborts the search with [`ProblemError::InconsistentHeuristic`].
//! The returned successor state is never altered.

use waypoint_kernel::{InconsistencyReport, Problem, ProblemCache, ProblemError};

use crate::heuristic::Heuristic;

/// Check one transition `state -action-> next`.
///
/// # Errors
///
/// Returns [`ProblemError::InconsistentHeuristic`] when the heuristic drops
/// by more than the action cost.
pub fn check_transition<P, H>(
    problem: &P,
    heuristic: &H,
    state: &P::State,
    action: &P::Action,
    next: &P::State,
) -> Result<(), ProblemError>
where
    P: Problem + ?Sized,
    H: Heuristic<P> + ?Sized,
{
    let h = heuristic.estimate(problem, state);
    let h_next = heuristic.estimate(problem, next);
    let cost = problem.cost(state, action);
    if h - h_next > cost {
        let report = InconsistencyReport {
            state: format!("{state:?}"),
            action: format!("{action:?}"),
            next_state: format!("{next:?}"),
            heuristic: h,
            next_heuristic: h_next,
            cost,
        };
        tracing::warn!(
            action = %report.action,
            heuristic = h,
            next_heuristic = h_next,
            cost,
            "inconsistent heuristic"
        );
        return Err(ProblemError::InconsistentHeuristic(Box::new(report)));
    }
    Ok(())
}

/// A problem whose transitions are checked against a heuristic.
#[derive(Debug)]
pub struct ConsistencyChecked<'a, P: ?Sized, H: ?Sized> {
    inner: &'a P,
    heuristic: &'a H,
}

impl<'a, P, H> ConsistencyChecked<'a, P, H>
where
    P: Problem + ?Sized,
    H: Heuristic<P> + ?Sized,
{
    #[must_use]
    pub fn new(inner: &'a P, heuristic: &'a H) -> Self {
        Self { inner, heuristic }
    }

    #[must_use]
    pub fn inner(&self) -> &'a P {
        self.inner
    }

    /// The wrapped heuristic, usable by informed searches over `self`.
    #[must_use]
    pub fn heuristic(&self) -> Forwarded<'a, H> {
        Forwarded {
            heuristic: self.heuristic,
        }
    }
}

impl<P, H> Problem for ConsistencyChecked<'_, P, H>
where
    P: Problem + ?Sized,
    H: Heuristic<P> + ?Sized,
{
    type State = P::State;
    type Action = P::Action;

    fn initial_state(&self) -> P::State {
        self.inner.initial_state()
    }

    fn is_goal(&self, state: &P::State) -> bool {
        self.inner.is_goal(state)
    }

    fn actions(&self, state: &P::State) -> Vec<P::Action> {
        self.inner.actions(state)
    }

    fn successor(&self, state: &P::State, action: &P::Action) -> Result<P::State, ProblemError> {
        let next = self.inner.successor(state, action)?;
        check_transition(self.inner, self.heuristic, state, action, &next)?;
        Ok(next)
    }

    fn cost(&self, state: &P::State, action: &P::Action) -> f64 {
        self.inner.cost(state, action)
    }

    fn cache(&self) -> &ProblemCache {
        self.inner.cache()
    }
}

/// A heuristic for the wrapped problem, evaluated against the inner problem.
#[derive(Debug)]
pub struct Forwarded<'h, H: ?Sized> {
    heuristic: &'h H,
}

impl<P, H> Heuristic<ConsistencyChecked<'_, P, H>> for Forwarded<'_, H>
where
    P: Problem + ?Sized,
    H: Heuristic<P> + ?Sized,
{
    fn estimate(&self, problem: &ConsistencyChecked<'_, P, H>, state: &P::State) -> f64 {
        self.heuristic.estimate(problem.inner, state)
    }
}
