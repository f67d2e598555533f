//! Waypoint Kernel: the problem contract shared by every search.
//!
//! # API Surface
//!
//! - [`problem::Problem`] -- the capability set a state space implements
//! - [`cache::ProblemCache`] -- per-problem memoization store for heuristics
//! - [`digest`] -- canonical JSON bytes and domain-separated SHA-256 hashes
//!
//! The kernel knows nothing about frontiers or algorithms; `waypoint_search`
//! depends on it, never the other way round.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cache;
pub mod digest;
pub mod problem;

pub use cache::{CacheError, ProblemCache};
pub use problem::{InconsistencyReport, Problem, ProblemError};
