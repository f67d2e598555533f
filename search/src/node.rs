//! Search node, action path, and frontier ordering key.

use std::rc::Rc;

use ordered_float::OrderedFloat;

/// One step of an action path, linked to the step before it.
///
/// Paths share their prefixes: every child of a node points at the same
/// parent step, so generating a successor is O(1) regardless of depth.
#[derive(Debug)]
struct PathStep<A> {
    action: A,
    parent: Option<Rc<PathStep<A>>>,
}

impl<A> Drop for PathStep<A> {
    // Unlink iteratively; the default recursive drop would exhaust the call
    // stack on paths hundreds of thousands of steps deep.
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(step) = next {
            match Rc::try_unwrap(step) {
                Ok(mut owned) => next = owned.parent.take(),
                Err(_) => break,
            }
        }
    }
}

/// An immutable search node.
///
/// Pairs a state with the action sequence that reached it from the initial
/// state (exclusive), its cumulative cost, its heuristic estimate, and a
/// generation number. Two nodes are the same frontier entry iff their states
/// are equal; nothing else is compared.
///
/// A better path to a state is a *new* node, never a mutation of the old one.
#[derive(Debug, Clone)]
pub struct SearchNode<S, A> {
    /// The state this node stands for.
    pub state: S,
    /// Sum of action costs from the initial state.
    pub path_cost: f64,
    /// Heuristic estimate for `state` (0 when the algorithm ranks without one).
    pub h_cost: f64,
    /// Number of actions from the initial state.
    pub depth: u32,
    /// Strictly increasing creation counter. Tie-break only; never a cost.
    pub generation: u64,
    last_step: Option<Rc<PathStep<A>>>,
}

impl<S, A: Clone> SearchNode<S, A> {
    /// The node for the initial state: empty path, zero cost.
    #[must_use]
    pub fn root(state: S, h_cost: f64, generation: u64) -> Self {
        Self {
            state,
            path_cost: 0.0,
            h_cost,
            depth: 0,
            generation,
            last_step: None,
        }
    }

    /// A successor reached by `action`, costing `step_cost` on top of this node.
    #[must_use]
    pub fn child(&self, action: A, state: S, step_cost: f64, h_cost: f64, generation: u64) -> Self {
        Self {
            state,
            path_cost: self.path_cost + step_cost,
            h_cost,
            depth: self.depth + 1,
            generation,
            last_step: Some(Rc::new(PathStep {
                action,
                parent: self.last_step.clone(),
            })),
        }
    }

    /// `path_cost + h_cost`, the A* ranking value.
    #[must_use]
    pub fn f_cost(&self) -> f64 {
        self.path_cost + self.h_cost
    }

    /// The actions from the initial state to this node, in order.
    #[must_use]
    pub fn path(&self) -> Vec<A> {
        let mut actions = Vec::with_capacity(self.depth as usize);
        let mut cursor = self.last_step.as_deref();
        while let Some(step) = cursor {
            actions.push(step.action.clone());
            cursor = step.parent.as_deref();
        }
        actions.reverse();
        actions
    }
}

/// Hands out generation numbers for one search call.
#[derive(Debug, Default)]
pub struct GenerationCounter {
    next: u64,
}

impl GenerationCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The next generation number. Never repeats within one counter.
    pub fn next_generation(&mut self) -> u64 {
        let generation = self.next;
        self.next += 1;
        generation
    }

    /// How many generation numbers have been issued.
    #[must_use]
    pub fn issued(&self) -> u64 {
        self.next
    }
}

/// What a priority frontier ranks nodes by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ranking {
    /// `path_cost` (uniform-cost search).
    Cost,
    /// `path_cost + h_cost` (A*).
    Score,
    /// `h_cost` alone (greedy best-first).
    Heuristic,
}

impl Ranking {
    /// Whether ranking needs a heuristic value at all.
    #[must_use]
    pub fn uses_heuristic(self) -> bool {
        !matches!(self, Self::Cost)
    }

    /// The ordering key of `node` under this ranking.
    #[must_use]
    pub fn key<S, A: Clone>(self, node: &SearchNode<S, A>) -> FrontierKey {
        let priority = match self {
            Self::Cost => node.path_cost,
            Self::Score => node.f_cost(),
            Self::Heuristic => node.h_cost,
        };
        FrontierKey {
            priority: OrderedFloat(priority),
            generation: node.generation,
        }
    }
}

/// The frontier ordering key: `(priority, generation)`.
///
/// Lower priority first, then older generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FrontierKey {
    pub priority: OrderedFloat<f64>,
    pub generation: u64,
}
