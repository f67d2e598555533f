//! Search policy: which algorithm to run and whether to check the heuristic.
//!
//! Policies are plain TOML:
//!
//! ```toml
//! algorithm = "uniform_cost"
//! check_consistency = true
//! ```
//!
//! Missing fields take their defaults (`a_star`, no checking).

use std::path::Path;

use serde::{Deserialize, Serialize};
use waypoint_kernel::{Problem, ProblemError};

use crate::consistency::ConsistencyChecked;
use crate::error::SearchError;
use crate::heuristic::Heuristic;
use crate::search::{
    a_star_search, best_first_search, breadth_first_search, depth_first_search,
    uniform_cost_search, SearchResult,
};

/// The five search algorithms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    BreadthFirst,
    DepthFirst,
    UniformCost,
    #[default]
    AStar,
    GreedyBestFirst,
}

impl Algorithm {
    pub const ALL: [Self; 5] = [
        Self::BreadthFirst,
        Self::DepthFirst,
        Self::UniformCost,
        Self::AStar,
        Self::GreedyBestFirst,
    ];

    /// Stable name, identical to the serialized form.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::BreadthFirst => "breadth_first",
            Self::DepthFirst => "depth_first",
            Self::UniformCost => "uniform_cost",
            Self::AStar => "a_star",
            Self::GreedyBestFirst => "greedy_best_first",
        }
    }

    /// Whether the algorithm ranks by a heuristic.
    #[must_use]
    pub fn is_informed(self) -> bool {
        matches!(self, Self::AStar | Self::GreedyBestFirst)
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Search configuration loaded from TOML.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchPolicy {
    #[serde(default)]
    pub algorithm: Algorithm,

    /// Route every transition through [`ConsistencyChecked`].
    #[serde(default)]
    pub check_consistency: bool,
}

impl SearchPolicy {
    #[must_use]
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            check_consistency: false,
        }
    }

    #[must_use]
    pub fn with_consistency_check(mut self) -> Self {
        self.check_consistency = true;
        self
    }

    /// Parse a policy from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] for malformed TOML, unknown
    /// fields or an unknown algorithm name.
    pub fn from_toml_str(text: &str) -> Result<Self, SearchError> {
        let policy: Self = toml::from_str(text).map_err(|e| SearchError::InvalidPolicy {
            detail: e.message().to_string(),
        })?;
        policy.validate();
        Ok(policy)
    }

    /// Read and parse a policy file.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Io`] if the file cannot be read, otherwise as
    /// [`SearchPolicy::from_toml_str`].
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, SearchError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SearchError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Log a warning for combinations that are legal but probably unintended.
    pub fn validate(&self) {
        if self.check_consistency && !self.algorithm.is_informed() {
            tracing::warn!(
                algorithm = %self.algorithm,
                "consistency checking enabled for an algorithm that ignores the heuristic"
            );
        }
    }
}

/// Run the search `policy` selects.
///
/// Uninformed algorithms ignore `heuristic` for ranking; with
/// `check_consistency` set, every algorithm still has its transitions checked
/// against it.
///
/// # Errors
///
/// Returns [`SearchError::Problem`] when the problem (or the consistency
/// check) aborts the search.
pub fn run<P, H>(
    policy: &SearchPolicy,
    problem: &P,
    initial: P::State,
    heuristic: &H,
) -> Result<SearchResult<P::Action>, SearchError>
where
    P: Problem + ?Sized,
    H: Heuristic<P> + ?Sized,
{
    let result = if policy.check_consistency {
        let checked = ConsistencyChecked::new(problem, heuristic);
        dispatch(policy.algorithm, &checked, initial, &checked.heuristic())
    } else {
        dispatch(policy.algorithm, problem, initial, heuristic)
    };
    Ok(result?)
}

fn dispatch<P, H>(
    algorithm: Algorithm,
    problem: &P,
    initial: P::State,
    heuristic: &H,
) -> Result<SearchResult<P::Action>, ProblemError>
where
    P: Problem + ?Sized,
    H: Heuristic<P> + ?Sized,
{
    match algorithm {
        Algorithm::BreadthFirst => breadth_first_search(problem, initial),
        Algorithm::DepthFirst => depth_first_search(problem, initial),
        Algorithm::UniformCost => uniform_cost_search(problem, initial),
        Algorithm::AStar => a_star_search(problem, initial, heuristic),
        Algorithm::GreedyBestFirst => best_first_search(problem, initial, heuristic),
    }
}
