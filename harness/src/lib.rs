//! Waypoint Harness: concrete worlds and reproducible run reports.
//!
//! The harness builds worlds from text, runs them through the search crate
//! under a [`waypoint_search::SearchPolicy`], and packages the outcome as a
//! canonical-JSON report with a content digest.
//!
//! The harness does NOT implement search logic; it delegates to
//! `waypoint_search`. Worlds provide domain data only; the runner owns
//! orchestration.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod contract;
pub mod geometry;
pub mod recorder;
pub mod runner;
pub mod worlds;
