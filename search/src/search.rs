//! The five search algorithms and their shared expansion loop.
//!
//! Every algorithm seeds a frontier with the initial state, removes nodes in
//! its discipline's order, and closes each expanded state permanently. They
//! differ in frontier discipline and in when the goal test runs:
//!
//! | Algorithm | Frontier | Goal test |
//! |---|---|---|
//! | [`breadth_first_search`] | FIFO | initial state, then each new successor before insertion |
//! | [`depth_first_search`] | LIFO | on removal |
//! | [`uniform_cost_search`] | priority by `path_cost` | on removal |
//! | [`a_star_search`] | priority by `path_cost + h` | on removal |
//! | [`best_first_search`] | priority by `h` | on removal |
//!
//! `Problem::is_goal` is called exactly once per goal test and every call is
//! counted in [`SearchStats::goal_tests`].

use std::collections::HashSet;

use waypoint_kernel::{Problem, ProblemError};

use crate::frontier::{FifoFrontier, Frontier, LifoFrontier, PriorityFrontier};
use crate::heuristic::{Heuristic, ZeroHeuristic};
use crate::node::{GenerationCounter, Ranking, SearchNode};

/// Counters for one search call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Calls to `Problem::is_goal`.
    pub goal_tests: u64,
    /// Nodes whose successors were generated.
    pub expansions: u64,
    /// Successor states produced by expansions.
    pub generated: u64,
    /// Frontier entries replaced by a cheaper path to the same state.
    pub replaced: u64,
    /// Successors discarded as already explored or already waiting.
    pub duplicates_skipped: u64,
    /// Largest frontier size reached.
    pub frontier_high_water: u64,
}

/// Outcome of a search call.
///
/// `solution == None` means no solution exists; `Some(vec![])` means the
/// initial state is already a goal.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<A> {
    pub solution: Option<Vec<A>>,
    /// Sum of action costs along `solution`.
    pub path_cost: Option<f64>,
    pub stats: SearchStats,
}

impl<A> SearchResult<A> {
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.solution.is_some()
    }
}

/// A successor produced by expanding a node, before admission.
struct Successor<S, A> {
    action: A,
    state: S,
    step_cost: f64,
}

/// Per-call bookkeeping shared by all algorithms.
struct SearchRun<'p, P: Problem + ?Sized> {
    problem: &'p P,
    algorithm: &'static str,
    explored: HashSet<P::State>,
    generations: GenerationCounter,
    stats: SearchStats,
}

impl<'p, P: Problem + ?Sized> SearchRun<'p, P> {
    fn new(problem: &'p P, algorithm: &'static str) -> Self {
        tracing::debug!(algorithm, "search started");
        Self {
            problem,
            algorithm,
            explored: HashSet::new(),
            generations: GenerationCounter::new(),
            stats: SearchStats::default(),
        }
    }

    fn goal_test(&mut self, state: &P::State) -> bool {
        self.stats.goal_tests += 1;
        self.problem.is_goal(state)
    }

    fn root(&mut self, initial: P::State, h_cost: f64) -> SearchNode<P::State, P::Action> {
        let generation = self.generations.next_generation();
        SearchNode::root(initial, h_cost, generation)
    }

    fn child(
        &mut self,
        parent: &SearchNode<P::State, P::Action>,
        successor: Successor<P::State, P::Action>,
        h_cost: f64,
    ) -> SearchNode<P::State, P::Action> {
        let generation = self.generations.next_generation();
        parent.child(
            successor.action,
            successor.state,
            successor.step_cost,
            h_cost,
            generation,
        )
    }

    fn is_explored(&self, state: &P::State) -> bool {
        self.explored.contains(state)
    }

    /// Close `node`'s state and return its actions in order, without
    /// generating any successor.
    fn open(&mut self, node: &SearchNode<P::State, P::Action>) -> Vec<P::Action> {
        self.explored.insert(node.state.clone());
        self.stats.expansions += 1;
        tracing::trace!(
            algorithm = self.algorithm,
            state = ?node.state,
            depth = node.depth,
            path_cost = node.path_cost,
            h_cost = node.h_cost,
            "expanding node"
        );
        self.problem.actions(&node.state)
    }

    /// Apply one action of an opened node.
    fn generate(
        &mut self,
        node: &SearchNode<P::State, P::Action>,
        action: P::Action,
    ) -> Result<Successor<P::State, P::Action>, ProblemError> {
        let state = self.problem.successor(&node.state, &action)?;
        let step_cost = self.problem.cost(&node.state, &action);
        self.stats.generated += 1;
        Ok(Successor {
            action,
            state,
            step_cost,
        })
    }

    /// Open `node` and generate all of its successors in action order.
    fn expand(
        &mut self,
        node: &SearchNode<P::State, P::Action>,
    ) -> Result<Vec<Successor<P::State, P::Action>>, ProblemError> {
        let actions = self.open(node);
        actions
            .into_iter()
            .map(|action| self.generate(node, action))
            .collect()
    }

    fn finish<F: Frontier<P::State, P::Action>>(
        mut self,
        goal: Option<&SearchNode<P::State, P::Action>>,
        frontier: &F,
    ) -> SearchResult<P::Action> {
        self.stats.frontier_high_water = frontier.high_water() as u64;
        let result = SearchResult {
            solution: goal.map(SearchNode::path),
            path_cost: goal.map(|n| n.path_cost),
            stats: self.stats,
        };
        tracing::debug!(
            algorithm = self.algorithm,
            solved = result.is_solved(),
            path_cost = result.path_cost,
            goal_tests = self.stats.goal_tests,
            expansions = self.stats.expansions,
            generated = self.stats.generated,
            "search finished"
        );
        result
    }
}

/// Breadth-first search.
///
/// Goal-tests the initial state before anything else, then goal-tests each
/// new successor as it is generated and returns without enqueueing it.
/// Successors are generated one action at a time, so actions after the one
/// reaching the goal are never applied. This yields a shortest action-count
/// path when all actions cost the same.
///
/// # Errors
///
/// Propagates any [`ProblemError`] raised by the problem.
pub fn breadth_first_search<P>(
    problem: &P,
    initial: P::State,
) -> Result<SearchResult<P::Action>, ProblemError>
where
    P: Problem + ?Sized,
{
    let mut run = SearchRun::new(problem, "breadth_first");
    let mut frontier = FifoFrontier::new();

    let root = run.root(initial, 0.0);
    if run.goal_test(&root.state) {
        return Ok(run.finish(Some(&root), &frontier));
    }
    frontier.insert(root);

    while let Some(node) = frontier.remove_best() {
        for action in run.open(&node) {
            let successor = run.generate(&node, action)?;
            if run.is_explored(&successor.state) || frontier.contains(&successor.state) {
                run.stats.duplicates_skipped += 1;
                continue;
            }
            let child = run.child(&node, successor, 0.0);
            if run.goal_test(&child.state) {
                return Ok(run.finish(Some(&child), &frontier));
            }
            frontier.insert(child);
        }
    }
    Ok(run.finish(None, &frontier))
}

/// Depth-first search with an explicit stack.
///
/// Explored states are never pushed; states already on the stack may be
/// pushed again, and the newest copy is removed first. A popped entry whose
/// state was explored through a later copy is dropped without a goal test.
/// Finds some solution in a finite space; no optimality.
///
/// # Errors
///
/// Propagates any [`ProblemError`] raised by the problem.
pub fn depth_first_search<P>(
    problem: &P,
    initial: P::State,
) -> Result<SearchResult<P::Action>, ProblemError>
where
    P: Problem + ?Sized,
{
    let mut run = SearchRun::new(problem, "depth_first");
    let mut frontier = LifoFrontier::new();
    let root = run.root(initial, 0.0);
    frontier.insert(root);

    while let Some(node) = frontier.remove_best() {
        if run.is_explored(&node.state) {
            run.stats.duplicates_skipped += 1;
            continue;
        }
        if run.goal_test(&node.state) {
            return Ok(run.finish(Some(&node), &frontier));
        }
        for successor in run.expand(&node)? {
            if run.is_explored(&successor.state) {
                run.stats.duplicates_skipped += 1;
                continue;
            }
            let child = run.child(&node, successor, 0.0);
            frontier.insert(child);
        }
    }
    Ok(run.finish(None, &frontier))
}

/// Uniform-cost search: cheapest path first. Optimal for non-negative costs.
///
/// # Errors
///
/// Propagates any [`ProblemError`] raised by the problem.
pub fn uniform_cost_search<P>(
    problem: &P,
    initial: P::State,
) -> Result<SearchResult<P::Action>, ProblemError>
where
    P: Problem + ?Sized,
{
    priority_search(problem, initial, &ZeroHeuristic, Ranking::Cost, "uniform_cost")
}

/// A* search, ranked by `path_cost + h`. Optimal with an admissible heuristic.
///
/// # Errors
///
/// Propagates any [`ProblemError`] raised by the problem.
pub fn a_star_search<P, H>(
    problem: &P,
    initial: P::State,
    heuristic: &H,
) -> Result<SearchResult<P::Action>, ProblemError>
where
    P: Problem + ?Sized,
    H: Heuristic<P> + ?Sized,
{
    priority_search(problem, initial, heuristic, Ranking::Score, "a_star")
}

/// Greedy best-first search, ranked by `h` alone. No optimality.
///
/// # Errors
///
/// Propagates any [`ProblemError`] raised by the problem.
pub fn best_first_search<P, H>(
    problem: &P,
    initial: P::State,
    heuristic: &H,
) -> Result<SearchResult<P::Action>, ProblemError>
where
    P: Problem + ?Sized,
    H: Heuristic<P> + ?Sized,
{
    priority_search(
        problem,
        initial,
        heuristic,
        Ranking::Heuristic,
        "greedy_best_first",
    )
}

/// Shared loop for the priority disciplines.
///
/// A successor already waiting in the frontier replaces the waiting node
/// only when it reaches the state more cheaply; there is never a second
/// entry for one state. The heuristic is evaluated once per state admitted.
fn priority_search<P, H>(
    problem: &P,
    initial: P::State,
    heuristic: &H,
    ranking: Ranking,
    algorithm: &'static str,
) -> Result<SearchResult<P::Action>, ProblemError>
where
    P: Problem + ?Sized,
    H: Heuristic<P> + ?Sized,
{
    let estimate = |state: &P::State| {
        if ranking.uses_heuristic() {
            heuristic.estimate(problem, state)
        } else {
            0.0
        }
    };

    let mut run = SearchRun::new(problem, algorithm);
    let mut frontier = PriorityFrontier::new(ranking);
    let root_h = estimate(&initial);
    let root = run.root(initial, root_h);
    frontier.insert(root);

    while let Some(node) = frontier.remove_best() {
        if run.goal_test(&node.state) {
            return Ok(run.finish(Some(&node), &frontier));
        }
        for successor in run.expand(&node)? {
            if run.is_explored(&successor.state) {
                run.stats.duplicates_skipped += 1;
                continue;
            }
            let new_cost = node.path_cost + successor.step_cost;
            let waiting = frontier.get(&successor.state).map(|n| (n.path_cost, n.h_cost));
            match waiting {
                Some((old_cost, h_cost)) if new_cost < old_cost => {
                    let child = run.child(&node, successor, h_cost);
                    tracing::trace!(
                        algorithm,
                        state = ?child.state,
                        old_cost,
                        new_cost,
                        "replacing frontier entry"
                    );
                    let old_state = child.state.clone();
                    let displaced = frontier.replace(&old_state, child);
                    debug_assert!(displaced.is_some(), "replaced a state that was not waiting");
                    run.stats.replaced += 1;
                }
                Some(_) => run.stats.duplicates_skipped += 1,
                None => {
                    let h_cost = estimate(&successor.state);
                    let child = run.child(&node, successor, h_cost);
                    frontier.insert(child);
                }
            }
        }
    }
    Ok(run.finish(None, &frontier))
}
