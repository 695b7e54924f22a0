//! Per-method summary of a normalized profile.
//!
//! Collapses every call path of the same method into one entry, trading the
//! call-stack information for a flat "where did the time go" table.

use super::json::{Location, NormalizedProfile};
use super::write_json;
use crate::utils::error::OutputError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Flat per-method totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSummary {
    /// One entry per distinct location, in first-seen order
    pub functions: Vec<FunctionSummary>,

    /// Carried over from the summarized profile
    pub total_count: f64,
}

/// Totals for one method across all of its call paths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSummary {
    /// Ids of every path node for this method
    pub self_ids: Vec<u64>,

    pub location: Location,

    pub total_self_count: f64,

    /// Sum of the paths' child counts. Recursive methods count nested
    /// samples once per enclosing path.
    pub total_child_count: f64,
}

/// Summarize a profile by location
///
/// **Public** - main entry point for the summarize command
pub fn summarize(profile: &NormalizedProfile) -> ProfileSummary {
    let mut positions: HashMap<&Location, usize> = HashMap::new();
    let mut functions: Vec<FunctionSummary> = Vec::new();

    for entry in &profile.functions {
        let position = *positions.entry(&entry.location).or_insert_with(|| {
            functions.push(FunctionSummary {
                self_ids: Vec::new(),
                location: entry.location.clone(),
                total_self_count: 0.0,
                total_child_count: 0.0,
            });
            functions.len() - 1
        });

        let summary = &mut functions[position];
        summary.self_ids.push(entry.self_id);
        summary.total_self_count += entry.count;
        summary.total_child_count += entry.child_count;
    }

    debug!(
        "Summarized {} paths into {} methods",
        profile.functions.len(),
        functions.len()
    );

    ProfileSummary {
        functions,
        total_count: profile.total_count,
    }
}

/// Write a summary to a JSON file
pub fn write_summary(
    summary: &ProfileSummary,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    write_json(summary, output_path.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::json::FunctionEntry;

    fn entry(
        self_id: u64,
        parent: u64,
        signature: &str,
        count: f64,
        child_count: f64,
    ) -> FunctionEntry {
        FunctionEntry {
            self_id,
            parent,
            location: Location {
                signature: signature.to_string(),
            },
            count,
            child_count,
        }
    }

    #[test]
    fn test_collapses_paths_by_method() {
        let profile = NormalizedProfile {
            functions: vec![
                entry(0, 0, "root", 0.0, 20.0),
                entry(1, 0, "A", 5.0, 10.0),
                entry(2, 0, "X", 5.0, 0.0),
                entry(3, 1, "log", 4.0, 0.0),
                entry(4, 1, "B", 6.0, 0.0),
                entry(5, 2, "log", 0.0, 0.0),
            ],
            total_count: 20.0,
        };

        let summary = summarize(&profile);

        let signatures: Vec<&str> = summary
            .functions
            .iter()
            .map(|f| f.location.signature.as_str())
            .collect();
        assert_eq!(signatures, vec!["root", "A", "X", "log", "B"]);

        let log = &summary.functions[3];
        assert_eq!(log.self_ids, vec![3, 5]);
        assert_eq!(log.total_self_count, 4.0);
        assert_eq!(summary.total_count, 20.0);
    }
}
