//! Output writers and post-processing for normalized profiles.
//!
//! This module handles:
//! - The normalized profile JSON (`json`)
//! - Consistency checks over a written profile (`validate`)
//! - Per-method summaries (`summary`)
//! - Merging several profiles into one tree (`merge`)

pub mod json;
pub mod merge;
pub mod summary;
pub mod validate;

// Re-export main types and functions
pub use json::{
    profile_to_string, read_profile, to_profile, write_profile, FunctionEntry, Location,
    NormalizedProfile,
};
pub use merge::{merge_profiles, MergeError};
pub use summary::{summarize, write_summary, FunctionSummary, ProfileSummary};
pub use validate::{check_profile, ProfileIssue};

use crate::utils::error::OutputError;
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, Write};
use tempfile::NamedTempFile;
use std::path::Path;

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Serialize `value` as pretty JSON and write it to `output_path`.
///
/// The document is rendered in memory, written to a temporary file next to
/// `output_path` and renamed into place, so a failed run never leaves a
/// partial file at `output_path`.
pub(crate) fn write_json<T: Serialize>(
    value: &T,
    output_path: &Path,
) -> Result<(), OutputError> {
    validate_path(output_path)?;

    let mut rendered = serde_json::to_vec_pretty(value)?;
    rendered.push(b'\n');

    let parent = match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // Create parent directories if needed
    if !parent.exists() {
        debug!("Creating parent directories: {}", parent.display());
        std::fs::create_dir_all(parent).map_err(|e| {
            OutputError::InvalidPath(format!(
                "Cannot create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let mut staged = NamedTempFile::new_in(parent).map_err(OutputError::WriteFailed)?;
    staged
        .write_all(&rendered)
        .and_then(|()| staged.as_file().sync_all())
        .map_err(OutputError::WriteFailed)?;
    staged
        .persist(output_path)
        .map_err(|e| OutputError::WriteFailed(e.error))?;

    info!(
        "Wrote {} ({} bytes)",
        output_path.display(),
        rendered.len()
    );

    Ok(())
}

/// Read and deserialize a JSON document
pub(crate) fn read_json<T: DeserializeOwned>(input_path: &Path) -> Result<T, OutputError> {
    debug!("Reading JSON from: {}", input_path.display());

    let file = File::open(input_path).map_err(|source| OutputError::ReadFailed {
        path: input_path.to_path_buf(),
        source,
    })?;

    Ok(serde_json::from_reader(BufReader::new(file))?)
}
