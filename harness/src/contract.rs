//! World contract: what the runner needs from a world beyond [`Problem`].
//!
//! A world is a concrete, searchable state space built from some input text.
//! It provides:
//! - A unique identifier
//! - The input it was built from (bound into run reports by digest)
//! - Stable, human-readable renderings of states and actions
//!
//! A world does NOT provide hashing, report assembly or algorithm selection;
//! those belong to the runner and the search policy.

use waypoint_kernel::Problem;

pub trait SearchWorld: Problem {
    /// Unique world identifier (e.g., `"graph_routing"`).
    fn world_id(&self) -> &str;

    /// The text this world was parsed from.
    fn world_input(&self) -> &str;

    /// A stable rendering of `state` for reports.
    fn describe_state(&self, state: &Self::State) -> String;

    /// A stable rendering of `action` for reports.
    fn describe_action(&self, action: &Self::Action) -> String;
}

/// Failure building a world from its input text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot build {world} world: {detail}")]
pub struct WorldParseError {
    pub world: &'static str,
    pub detail: String,
}

impl WorldParseError {
    pub(crate) fn new(world: &'static str, detail: impl Into<String>) -> Self {
        Self {
            world,
            detail: detail.into(),
        }
    }
}
