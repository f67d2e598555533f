//! Typed errors for policy-driven search runs.
//!
//! The search functions themselves only fail with [`ProblemError`]; "no
//! solution" is a normal result. `SearchError` adds the failures of loading
//! and validating a [`crate::policy::SearchPolicy`].

use waypoint_kernel::ProblemError;

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The problem aborted the search.
    #[error(transparent)]
    Problem(#[from] ProblemError),

    /// The policy text could not be parsed or failed validation.
    #[error("invalid search policy: {detail}")]
    InvalidPolicy { detail: String },

    /// The policy file could not be read.
    #[error("failed to read search policy {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
