//! Hash domain governance lock tests.
//!
//! Proves:
//! 1. The domain set has the expected size (catches forgotten additions to ALL)
//! 2. All domain byte strings are unique
//! 3. All domains are null-terminated
//! 4. All domains follow the `WAYPOINT::*::V1\0` naming convention
//! 5. No raw `WAYPOINT::` domain literals in production source outside `hash_domain.rs`

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use waypoint_kernel::digest::hash_domain::HashDomain;

// ---------------------------------------------------------------------------
// 1. Set size
// ---------------------------------------------------------------------------

#[test]
fn hash_domain_set_count() {
    assert_eq!(
        HashDomain::ALL.len(),
        4,
        "expected 4 domain variants; if you added a new domain, update this count"
    );
}

// ---------------------------------------------------------------------------
// 2. All unique bytes
// ---------------------------------------------------------------------------

#[test]
fn hash_domain_all_unique_bytes() {
    let mut seen = BTreeSet::new();
    for domain in HashDomain::ALL {
        assert!(
            seen.insert(domain.as_bytes()),
            "duplicate domain bytes: {domain}"
        );
    }
}

// ---------------------------------------------------------------------------
// 3. All null-terminated
// ---------------------------------------------------------------------------

#[test]
fn hash_domain_all_null_terminated() {
    for domain in HashDomain::ALL {
        assert!(
            domain.as_bytes().ends_with(&[0]),
            "{domain} is not null-terminated"
        );
        assert_eq!(
            domain.as_bytes().iter().filter(|&&b| b == 0).count(),
            1,
            "{domain} has an interior null"
        );
    }
}

// ---------------------------------------------------------------------------
// 4. Naming convention
// ---------------------------------------------------------------------------

#[test]
fn hash_domain_all_follow_naming_convention() {
    for domain in HashDomain::ALL {
        let bytes = domain.as_bytes();
        assert!(
            bytes.starts_with(b"WAYPOINT::"),
            "{domain} does not start with WAYPOINT::"
        );
        assert!(
            bytes.ends_with(b"::V1\0"),
            "{domain} does not end with ::V1\\0"
        );
    }
}

// ---------------------------------------------------------------------------
// 5. No raw WAYPOINT:: domain literals in production source
// ---------------------------------------------------------------------------

/// Scan kernel/, search/ and harness/ source for `b"WAYPOINT::` literals.
/// The only file allowed to contain them is `hash_domain.rs`.
#[test]
fn no_raw_domain_literals_outside_authority() {
    let production_dirs = [
        concat!(env!("CARGO_MANIFEST_DIR"), "/../../kernel/src"),
        concat!(env!("CARGO_MANIFEST_DIR"), "/../../search/src"),
        concat!(env!("CARGO_MANIFEST_DIR"), "/../../harness/src"),
    ];

    let pattern = "b\"WAYPOINT::";
    let authority_file = "hash_domain.rs";
    let mut violations = Vec::new();

    for dir in &production_dirs {
        let dir = Path::new(dir);
        assert!(dir.is_dir(), "production source dir missing: {}", dir.display());
        scan_dir_for_pattern(dir, pattern, authority_file, &mut violations);
    }

    assert!(
        violations.is_empty(),
        "raw WAYPOINT:: domain literals found outside {authority_file}:\n{}",
        violations.join("\n")
    );
}

fn scan_dir_for_pattern(
    dir: &Path,
    pattern: &str,
    authority_file: &str,
    violations: &mut Vec<String>,
) {
    for path in walkdir(dir) {
        if path.extension().and_then(|e| e.to_str()) != Some("rs") {
            continue;
        }
        if path.file_name().and_then(|n| n.to_str()) == Some(authority_file) {
            continue;
        }
        let Ok(content) = std::fs::read_to_string(&path) else {
            continue;
        };

        // Skip #[cfg(test)] module blocks via brace-depth tracking.
        let mut brace_depth: usize = 0;
        let mut skip_depth: Option<usize> = None;
        let mut cfg_test_pending = false;

        for (i, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.contains("#[cfg(test)]") {
                cfg_test_pending = true;
                continue;
            }

            let opens = line.chars().filter(|&c| c == '{').count();
            let closes = line.chars().filter(|&c| c == '}').count();
            if cfg_test_pending && opens > 0 {
                skip_depth = Some(brace_depth);
                cfg_test_pending = false;
            }
            brace_depth = brace_depth.saturating_add(opens).saturating_sub(closes);

            if let Some(depth) = skip_depth {
                if brace_depth <= depth {
                    skip_depth = None;
                }
                continue;
            }
            if trimmed.starts_with("//") {
                continue;
            }
            if trimmed.contains(pattern) {
                violations.push(format!("  {}:{}: {}", path.display(), i + 1, trimmed));
            }
        }
    }
}

/// Simple recursive directory walker.
fn walkdir(dir: &Path) -> Vec<PathBuf> {
    let mut results = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                results.extend(walkdir(&path));
            } else {
                results.push(path);
            }
        }
    }
    results
}
