//! Consistency checks over a normalized profile.
//!
//! Used by the `validate` command to vet a profile before it is handed to
//! downstream tooling. The root is the first entry; every other entry must
//! point at a known id, and the recorded totals must agree with the counts.

use super::json::NormalizedProfile;
use crate::utils::config::COUNT_TOLERANCE;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// A single problem found in a profile
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProfileIssue {
    #[error("Profile has no functions")]
    Empty,

    #[error("Duplicate function id {0}")]
    DuplicateId(u64),

    #[error("Root function {self_id} has count {count}, expected 0")]
    RootHasCount { self_id: u64, count: f64 },

    #[error("Function {self_id} references unknown parent {parent}")]
    UnknownParent { self_id: u64, parent: u64 },

    #[error("Function {self_id} has child_count {recorded} but its children add up to {expected}")]
    ChildCountMismatch {
        self_id: u64,
        recorded: f64,
        expected: f64,
    },

    #[error("total_count is {recorded} but function counts add up to {expected}")]
    TotalCountMismatch { recorded: f64, expected: f64 },
}

/// Check a profile and report every problem found
///
/// **Public** - an empty result means the profile is consistent
pub fn check_profile(profile: &NormalizedProfile) -> Vec<ProfileIssue> {
    let mut issues = Vec::new();

    let Some(root) = profile.root() else {
        return vec![ProfileIssue::Empty];
    };

    if root.count != 0.0 {
        issues.push(ProfileIssue::RootHasCount {
            self_id: root.self_id,
            count: root.count,
        });
    }

    let mut seen = HashSet::with_capacity(profile.functions.len());
    for entry in &profile.functions {
        if !seen.insert(entry.self_id) {
            issues.push(ProfileIssue::DuplicateId(entry.self_id));
        }
    }

    // Sum of (count + child_count) over each parent's direct children
    let mut child_sums: HashMap<u64, f64> = HashMap::new();
    for entry in profile.functions.iter().skip(1) {
        if !seen.contains(&entry.parent) {
            issues.push(ProfileIssue::UnknownParent {
                self_id: entry.self_id,
                parent: entry.parent,
            });
            continue;
        }
        *child_sums.entry(entry.parent).or_insert(0.0) += entry.count + entry.child_count;
    }

    for entry in &profile.functions {
        let expected = child_sums.get(&entry.self_id).copied().unwrap_or(0.0);
        if !approx_eq(entry.child_count, expected) {
            issues.push(ProfileIssue::ChildCountMismatch {
                self_id: entry.self_id,
                recorded: entry.child_count,
                expected,
            });
        }
    }

    let expected_total: f64 = profile.functions.iter().map(|f| f.count).sum();
    if !approx_eq(profile.total_count, expected_total) {
        issues.push(ProfileIssue::TotalCountMismatch {
            recorded: profile.total_count,
            expected: expected_total,
        });
    }

    issues
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= COUNT_TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::json::{FunctionEntry, Location};

    fn entry(self_id: u64, parent: u64, count: f64, child_count: f64) -> FunctionEntry {
        FunctionEntry {
            self_id,
            parent,
            location: Location {
                signature: format!("m{}", self_id),
            },
            count,
            child_count,
        }
    }

    fn consistent() -> NormalizedProfile {
        NormalizedProfile {
            functions: vec![
                entry(0, 0, 0.0, 150.0),
                entry(1, 0, 100.0, 50.0),
                entry(2, 1, 50.0, 0.0),
            ],
            total_count: 150.0,
        }
    }

    #[test]
    fn test_consistent_profile_passes() {
        assert!(check_profile(&consistent()).is_empty());
    }

    #[test]
    fn test_empty_profile() {
        let profile = NormalizedProfile {
            functions: vec![],
            total_count: 0.0,
        };
        assert_eq!(check_profile(&profile), vec![ProfileIssue::Empty]);
    }

    #[test]
    fn test_bad_child_count() {
        let mut profile = consistent();
        profile.functions[1].child_count = 40.0;

        let issues = check_profile(&profile);
        assert!(issues.contains(&ProfileIssue::ChildCountMismatch {
            self_id: 1,
            recorded: 40.0,
            expected: 50.0,
        }));
    }

    #[test]
    fn test_unknown_parent_and_total() {
        let mut profile = consistent();
        profile.functions.push(entry(3, 9, 1.0, 0.0));

        let issues = check_profile(&profile);
        assert!(issues.contains(&ProfileIssue::UnknownParent { self_id: 3, parent: 9 }));
        assert!(issues.contains(&ProfileIssue::TotalCountMismatch {
            recorded: 150.0,
            expected: 151.0,
        }));
    }

    #[test]
    fn test_duplicate_id() {
        let mut profile = consistent();
        profile.functions[2].self_id = 1;
        profile.functions[2].parent = 0;

        assert!(check_profile(&profile).contains(&ProfileIssue::DuplicateId(1)));
    }
}
