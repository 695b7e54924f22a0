//! Loader for exported profiling records.
//!
//! Accepts either a bare JSON array of records or an object carrying the
//! array under one of the known field names. Every record must parse: a
//! dropped record would silently change the totals of the rebuilt tree.

use super::schema::ProfileRecord;
use crate::utils::config::RECORD_LIST_FIELDS;
use crate::utils::error::ParseError;
use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Load profiling records from a JSON file
///
/// **Public** - main entry point for the normalize command
///
/// # Errors
/// * `ParseError::Io` - input missing or unreadable
/// * `ParseError::JsonError` - file is not JSON
/// * `ParseError::InvalidFormat` / `ParseError::InvalidRecord` - unexpected layout
pub fn load_records(input_path: impl AsRef<Path>) -> Result<Vec<ProfileRecord>, ParseError> {
    let input_path = input_path.as_ref();

    info!("Loading profiling records from: {}", input_path.display());

    let raw = fs::read_to_string(input_path).map_err(|source| ParseError::Io {
        path: input_path.to_path_buf(),
        source,
    })?;

    parse_records(&raw)
}

/// Parse profiling records from JSON text
///
/// **Public** - useful for tests and in-memory use
pub fn parse_records(raw: &str) -> Result<Vec<ProfileRecord>, ParseError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    parse_records_value(&value)
}

/// Parse profiling records from an already decoded JSON value
///
/// **Public** - lets callers that already hold a `Value` skip re-parsing
pub fn parse_records_value(value: &serde_json::Value) -> Result<Vec<ProfileRecord>, ParseError> {
    let entries = locate_record_list(value)?;

    let records = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            ProfileRecord::deserialize(entry)
                .map_err(|source| ParseError::InvalidRecord { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        "Parsed {} records ({} root candidates)",
        records.len(),
        records.iter().filter(|r| r.is_root_candidate()).count()
    );

    Ok(records)
}

/// Find the record array inside the decoded document
///
/// **Private** - internal helper for parse_records_value
fn locate_record_list(value: &serde_json::Value) -> Result<&[serde_json::Value], ParseError> {
    match value {
        serde_json::Value::Array(entries) => Ok(entries),

        serde_json::Value::Object(obj) => RECORD_LIST_FIELDS
            .iter()
            .find_map(|field| obj.get(*field).and_then(|v| v.as_array()))
            .map(Vec::as_slice)
            .ok_or_else(|| {
                ParseError::InvalidFormat(format!(
                    "Expected a record array under one of: {}",
                    RECORD_LIST_FIELDS.join(", ")
                ))
            }),

        _ => Err(ParseError::InvalidFormat(
            "Profiling data must be a JSON object or array".to_string(),
        )),
    }
}
