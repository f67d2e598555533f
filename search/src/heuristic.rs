//! Heuristic functions: `(problem, state) -> estimated remaining cost`.
//!
//! A heuristic must be pure with respect to its arguments. Expensive
//! precomputation belongs in the problem's [`ProblemCache`], not in the
//! heuristic value itself.
//!
//! [`ProblemCache`]: waypoint_kernel::ProblemCache

use waypoint_kernel::Problem;

/// An estimate of the cost still needed to reach a goal.
///
/// Admissible heuristics never overestimate; consistent ones also satisfy
/// `h(s) - h(s') <= cost(s, a)` across every transition. Neither property is
/// checked statically; see [`crate::consistency`].
pub trait Heuristic<P: Problem + ?Sized> {
    fn estimate(&self, problem: &P, state: &P::State) -> f64;
}

impl<P, F> Heuristic<P> for F
where
    P: Problem + ?Sized,
    F: Fn(&P, &P::State) -> f64,
{
    fn estimate(&self, problem: &P, state: &P::State) -> f64 {
        self(problem, state)
    }
}

/// The null heuristic. A* under it behaves as uniform-cost search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZeroHeuristic;

impl<P: Problem + ?Sized> Heuristic<P> for ZeroHeuristic {
    fn estimate(&self, _problem: &P, _state: &P::State) -> f64 {
        0.0
    }
}

/// Pin a closure to the higher-ranked signature [`Heuristic`] needs.
///
/// Closures with reference parameters are not always inferred as
/// `for<'a> Fn(&'a P, &'a S)`; routing them through this function fixes that.
pub fn from_fn<P, F>(f: F) -> F
where
    P: Problem + ?Sized,
    F: Fn(&P, &P::State) -> f64,
{
    f
}
