//! Harness runner: search a world under a policy and produce a run report.
//!
//! The runner uses ONLY the search crate's public entry point
//! ([`waypoint_search::run`]) and the kernel's digest functions. It does not
//! implement any search logic itself.
//!
//! # Pipeline
//!
//! ```text
//! GoalRecorder::new(world) → policy::run() → describe solution + traversal
//!   → canonical_json_bytes() → canonical_hash(RunReport)
//! ```
//!
//! The report binds the world input, the policy and the goal-test traversal
//! by digest, so two runs produce byte-identical reports iff they searched
//! the same world the same way and examined the same states in the same
//! order.

use serde_json::json;

use waypoint_kernel::digest::canon::{canonical_json_bytes, CanonError};
use waypoint_kernel::digest::hash::{canonical_hash, ContentHash};
use waypoint_kernel::digest::hash_domain::HashDomain;
use waypoint_search::{run, Heuristic, SearchError, SearchPolicy, SearchStats};

use crate::contract::{SearchWorld, WorldParseError};
use crate::recorder::GoalRecorder;

/// Schema tag written into every report.
pub const REPORT_SCHEMA_VERSION: &str = "run_report.v1";

/// Error during a harness run.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error(transparent)]
    World(#[from] WorldParseError),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("report canonicalization failed: {0}")]
    Canon(#[from] CanonError),

    #[error("report encoding failed: {detail}")]
    Encode { detail: String },
}

/// Result of one harness run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub world_id: String,
    pub policy: SearchPolicy,
    /// Described actions of the solution; `None` when there is none.
    pub solution: Option<Vec<String>>,
    pub path_cost: Option<f64>,
    pub stats: SearchStats,
    /// Described goal-tested states, in order.
    pub traversal: Vec<String>,
    /// Canonical JSON bytes of the report.
    pub report_bytes: Vec<u8>,
    /// `canonical_hash(RunReport, report_bytes)`.
    pub digest: ContentHash,
}

impl RunReport {
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.solution.is_some()
    }
}

/// Search `world` from its initial state under `policy`.
///
/// # Errors
///
/// Returns [`HarnessError::Search`] if the world aborts the search (including
/// a consistency violation when the policy checks one), or a canonicalization
/// error if the report cannot be encoded.
pub fn run_search<W, H>(
    world: &W,
    policy: &SearchPolicy,
    heuristic: &H,
) -> Result<RunReport, HarnessError>
where
    W: SearchWorld,
    H: Heuristic<W> + ?Sized,
{
    let recorder = GoalRecorder::new(world);
    let result = run(policy, &recorder, world.initial_state(), &recorder.lift(heuristic))?;
    let traversal: Vec<String> = recorder
        .into_tested()
        .iter()
        .map(|s| world.describe_state(s))
        .collect();
    let solution: Option<Vec<String>> = result
        .solution
        .as_ref()
        .map(|actions| actions.iter().map(|a| world.describe_action(a)).collect());

    let world_input_digest = canonical_hash(HashDomain::WorldInput, world.world_input().as_bytes());
    let policy_value = serde_json::to_value(policy).map_err(|e| HarnessError::Encode {
        detail: e.to_string(),
    })?;
    let policy_digest = canonical_hash(HashDomain::SearchPolicy, &canonical_json_bytes(&policy_value)?);
    let traversal_digest =
        canonical_hash(HashDomain::Traversal, &canonical_json_bytes(&json!(traversal))?);

    let stats = result.stats;
    let report = json!({
        "schema_version": REPORT_SCHEMA_VERSION,
        "world_id": world.world_id(),
        "world_input_digest": world_input_digest.as_str(),
        "policy": policy_value,
        "policy_digest": policy_digest.as_str(),
        "solution": solution,
        // Canonical JSON carries integers only.
        "path_cost": result.path_cost.map(|c| c.to_string()),
        "stats": {
            "goal_tests": stats.goal_tests,
            "expansions": stats.expansions,
            "generated": stats.generated,
            "replaced": stats.replaced,
            "duplicates_skipped": stats.duplicates_skipped,
            "frontier_high_water": stats.frontier_high_water,
        },
        "traversal_len": traversal.len(),
        "traversal_digest": traversal_digest.as_str(),
    });
    let report_bytes = canonical_json_bytes(&report)?;
    let digest = canonical_hash(HashDomain::RunReport, &report_bytes);

    tracing::debug!(
        world = world.world_id(),
        algorithm = %policy.algorithm,
        solved = solution.is_some(),
        digest = %digest,
        "run report built"
    );

    Ok(RunReport {
        world_id: world.world_id().to_string(),
        policy: *policy,
        solution,
        path_cost: result.path_cost,
        stats,
        traversal,
        report_bytes,
        digest,
    })
}
