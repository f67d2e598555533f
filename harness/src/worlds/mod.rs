//! World implementations for the harness runner.

pub mod dungeon;
pub mod graph_routing;
pub mod parking;
