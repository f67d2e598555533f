//! Waypoint Search: deterministic graph search over an abstract problem.
//!
//! This crate provides the search layer for Waypoint. It depends only on
//! `waypoint_kernel`; it does NOT depend on `waypoint_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! waypoint_kernel  ←  waypoint_search  ←  waypoint_harness
//! (problem, cache)    (frontier, search)   (worlds, reports)
//! ```
//!
//! # Key types
//!
//! - [`SearchNode`] -- immutable node: state, shared action path, cost, generation
//! - [`Frontier`] -- FIFO, LIFO and priority disciplines behind one trait
//! - [`SearchResult`] -- solution (or none) plus [`SearchStats`]
//! - [`Heuristic`] -- `(problem, state) -> f64`, implemented by plain functions
//! - [`ConsistencyChecked`] -- diagnostic overlay checking `h(s) - h(s') <= cost`
//! - [`SearchPolicy`] -- TOML-configurable algorithm selection
//! - [`SearchAgent`] -- plans once, then follows the plan

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod agent;
pub mod consistency;
pub mod error;
pub mod frontier;
pub mod heuristic;
pub mod node;
pub mod policy;
pub mod search;

pub use agent::SearchAgent;
pub use consistency::{check_transition, ConsistencyChecked};
pub use error::SearchError;
pub use frontier::{FifoFrontier, Frontier, LifoFrontier, PriorityFrontier};
pub use heuristic::{Heuristic, ZeroHeuristic};
pub use node::{FrontierKey, GenerationCounter, Ranking, SearchNode};
pub use policy::{run, Algorithm, SearchPolicy};
pub use search::{
    a_star_search, best_first_search, breadth_first_search, depth_first_search,
    uniform_cost_search, SearchResult, SearchStats,
};
