//! Goal-test recording: the order in which a search examines states.
//!
//! [`GoalRecorder`] wraps a problem and logs every `is_goal` argument. The
//! log belongs to the recorder, so repeated or concurrent searches over the
//! same problem never share it.

use std::cell::RefCell;

use waypoint_kernel::{Problem, ProblemCache, ProblemError};
use waypoint_search::Heuristic;

#[derive(Debug)]
pub struct GoalRecorder<'a, P: Problem + ?Sized> {
    inner: &'a P,
    tested: RefCell<Vec<P::State>>,
}

impl<'a, P: Problem + ?Sized> GoalRecorder<'a, P> {
    #[must_use]
    pub fn new(inner: &'a P) -> Self {
        Self {
            inner,
            tested: RefCell::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn inner(&self) -> &'a P {
        self.inner
    }

    /// Goal-tested states so far, in call order.
    #[must_use]
    pub fn tested(&self) -> Vec<P::State> {
        self.tested.borrow().clone()
    }

    #[must_use]
    pub fn into_tested(self) -> Vec<P::State> {
        self.tested.into_inner()
    }

    /// Adapt a heuristic for the inner problem to the recorder.
    #[must_use]
    pub fn lift<'h, H: Heuristic<P> + ?Sized>(&self, heuristic: &'h H) -> Lifted<'h, H> {
        Lifted { heuristic }
    }
}

impl<P: Problem + ?Sized> Problem for GoalRecorder<'_, P> {
    type State = P::State;
    type Action = P::Action;

    fn initial_state(&self) -> P::State {
        self.inner.initial_state()
    }

    fn is_goal(&self, state: &P::State) -> bool {
        self.tested.borrow_mut().push(state.clone());
        self.inner.is_goal(state)
    }

    fn actions(&self, state: &P::State) -> Vec<P::Action> {
        self.inner.actions(state)
    }

    fn successor(&self, state: &P::State, action: &P::Action) -> Result<P::State, ProblemError> {
        self.inner.successor(state, action)
    }

    fn cost(&self, state: &P::State, action: &P::Action) -> f64 {
        self.inner.cost(state, action)
    }

    fn cache(&self) -> &ProblemCache {
        self.inner.cache()
    }
}

/// A heuristic for `P`, usable on a [`GoalRecorder`] over `P`.
#[derive(Debug)]
pub struct Lifted<'h, H: ?Sized> {
    heuristic: &'h H,
}

impl<P, H> Heuristic<GoalRecorder<'_, P>> for Lifted<'_, H>
where
    P: Problem + ?Sized,
    H: Heuristic<P> + ?Sized,
{
    fn estimate(&self, problem: &GoalRecorder<'_, P>, state: &P::State) -> f64 {
        self.heuristic.estimate(problem.inner, state)
    }
}
