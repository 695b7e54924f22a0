//! Normalized profile JSON.
//!
//! The written document is a flat list of every tree node, sentinel
//! included, in construction order:
//!
//! ```text
//! {
//!   "functions": [
//!     { "self": 0, "parent": 0, "location": { "signature": "root" },
//!       "count": 0.0, "child_count": 150.0 },
//!     ...
//!   ],
//!   "total_count": 150.0
//! }
//! ```

use super::{read_json, write_json};
use crate::tree::CallTree;
use crate::utils::config::NO_PARENT_ID;
use crate::utils::error::OutputError;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level document written for one normalized tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedProfile {
    /// Every node in breadth-first construction order
    pub functions: Vec<FunctionEntry>,

    /// Sum of every entry's `count`
    pub total_count: f64,
}

/// One call path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionEntry {
    /// Node id
    #[serde(rename = "self")]
    pub self_id: u64,

    /// Id of the parent node, 0 for the sentinel
    pub parent: u64,

    pub location: Location,

    /// Samples attributed to this path
    pub count: f64,

    /// Samples attributed to every path below this one
    pub child_count: f64,
}

/// Source location of a profiled method
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub signature: String,
}

impl NormalizedProfile {
    /// The synthetic root entry, always first
    pub fn root(&self) -> Option<&FunctionEntry> {
        self.functions.first()
    }
}

/// Flatten an attributed and rolled-up tree
///
/// **Public** - last stage of the normalization pipeline
pub fn to_profile(tree: &CallTree<'_>) -> NormalizedProfile {
    let functions: Vec<FunctionEntry> = tree
        .iter()
        .map(|(_, node)| FunctionEntry {
            self_id: node.id(),
            parent: node
                .parent()
                .map(|p| tree.node(p).id())
                .unwrap_or(NO_PARENT_ID),
            location: Location {
                signature: node.method_name().to_string(),
            },
            count: node.self_count(),
            child_count: node.child_count(),
        })
        .collect();

    let total_count = functions.iter().fold(0.0, |acc, f| acc + f.count);

    NormalizedProfile {
        functions,
        total_count,
    }
}

/// Write a normalized profile to a JSON file
///
/// **Public** - main entry point for profile output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_profile(
    profile: &NormalizedProfile,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!(
        "Writing profile with {} functions to: {}",
        profile.functions.len(),
        output_path.display()
    );

    write_json(profile, output_path)
}

/// Render a profile to a pretty JSON string
pub fn profile_to_string(profile: &NormalizedProfile) -> Result<String, OutputError> {
    Ok(serde_json::to_string_pretty(profile)?)
}

/// Read a normalized profile from a JSON file
///
/// **Public** - used by validate, summarize and merge
pub fn read_profile(input_path: impl AsRef<Path>) -> Result<NormalizedProfile, OutputError> {
    read_json(input_path.as_ref())
}
