//! Canonical JSON and domain-separated content hashing.
//!
//! Run reports and fixtures are compared by digest, so there is exactly one
//! canonicalizer and one hash function in the workspace. Both live here.

pub mod canon;
pub mod hash;
pub mod hash_domain;
