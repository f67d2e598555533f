//! Graph routing: find a route between two named nodes of a weighted graph.
//!
//! Input is JSON:
//!
//! ```json
//! {
//!   "graph": {
//!     "A": { "position": [0, 0], "adjacent": ["B", "C"] },
//!     "B": { "position": [4, 3], "adjacent": [] }
//!   },
//!   "start": "A",
//!   "goal": "B"
//! }
//! ```
//!
//! States and actions are both node indices: the action "go to B" leads to
//! state B. Nodes are indexed in name order and each adjacency list is
//! sorted by name, so action order never depends on JSON key order. Edge
//! cost is the Euclidean distance between node positions; adjacent names
//! that are not nodes are ignored.

use std::collections::BTreeMap;

use serde::Deserialize;
use waypoint_kernel::{Problem, ProblemCache, ProblemError};

use crate::contract::{SearchWorld, WorldParseError};
use crate::geometry::{euclidean_distance, Point};

const WORLD_ID: &str = "graph_routing";

#[derive(Debug, Deserialize)]
struct GraphDef {
    #[serde(default)]
    graph: BTreeMap<String, NodeDef>,
    start: String,
    goal: String,
}

#[derive(Debug, Deserialize)]
struct NodeDef {
    #[serde(default)]
    position: [i32; 2],
    #[serde(default)]
    adjacent: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub name: String,
    pub position: Point,
}

#[derive(Debug)]
pub struct GraphRoutingProblem {
    nodes: Vec<GraphNode>,
    adjacency: Vec<Vec<usize>>,
    start: usize,
    goal: usize,
    input: String,
    cache: ProblemCache,
}

impl GraphRoutingProblem {
    /// Parse a graph routing problem from its JSON description.
    ///
    /// # Errors
    ///
    /// Returns [`WorldParseError`] for malformed JSON or when `start` or
    /// `goal` does not name a node.
    pub fn from_json(text: &str) -> Result<Self, WorldParseError> {
        let def: GraphDef =
            serde_json::from_str(text).map_err(|e| WorldParseError::new(WORLD_ID, e.to_string()))?;

        let index: BTreeMap<&str, usize> = def
            .graph
            .keys()
            .enumerate()
            .map(|(i, name)| (name.as_str(), i))
            .collect();
        let lookup = |name: &str, role: &str| {
            index
                .get(name)
                .copied()
                .ok_or_else(|| WorldParseError::new(WORLD_ID, format!("{role} {name:?} is not a node")))
        };
        let start = lookup(&def.start, "start")?;
        let goal = lookup(&def.goal, "goal")?;

        let nodes = def
            .graph
            .iter()
            .map(|(name, node)| GraphNode {
                name: name.clone(),
                position: Point::new(node.position[0], node.position[1]),
            })
            .collect();
        let adjacency = def
            .graph
            .values()
            .map(|node| {
                let mut names: Vec<&str> = node.adjacent.iter().map(String::as_str).collect();
                names.sort_unstable();
                names.iter().filter_map(|n| index.get(n).copied()).collect()
            })
            .collect();

        Ok(Self {
            nodes,
            adjacency,
            start,
            goal,
            input: text.to_string(),
            cache: ProblemCache::new(),
        })
    }

    #[must_use]
    pub fn node(&self, index: usize) -> &GraphNode {
        &self.nodes[index]
    }

    /// Index of the node called `name`.
    #[must_use]
    pub fn node_index(&self, name: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.name == name)
    }

    #[must_use]
    pub fn goal(&self) -> usize {
        self.goal
    }
}

impl Problem for GraphRoutingProblem {
    type State = usize;
    type Action = usize;

    fn initial_state(&self) -> usize {
        self.start
    }

    fn is_goal(&self, state: &usize) -> bool {
        *state == self.goal
    }

    fn actions(&self, state: &usize) -> Vec<usize> {
        self.adjacency.get(*state).cloned().unwrap_or_default()
    }

    fn successor(&self, _state: &usize, action: &usize) -> Result<usize, ProblemError> {
        Ok(*action)
    }

    fn cost(&self, state: &usize, action: &usize) -> f64 {
        euclidean_distance(self.nodes[*state].position, self.nodes[*action].position)
    }

    fn cache(&self) -> &ProblemCache {
        &self.cache
    }
}

impl SearchWorld for GraphRoutingProblem {
    fn world_id(&self) -> &str {
        WORLD_ID
    }

    fn world_input(&self) -> &str {
        &self.input
    }

    fn describe_state(&self, state: &usize) -> String {
        self.nodes[*state].name.clone()
    }

    fn describe_action(&self, action: &usize) -> String {
        self.nodes[*action].name.clone()
    }
}

/// Straight-line distance to the goal. Admissible and consistent.
#[must_use]
pub fn graph_routing_heuristic(problem: &GraphRoutingProblem, state: &usize) -> f64 {
    euclidean_distance(problem.nodes[*state].position, problem.nodes[problem.goal].position)
}
