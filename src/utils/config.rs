//! Configuration and constants shared across the pipeline.

/// Current output schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Id handed to the sentinel when no explicit sequence is configured.
///
/// With a zero base, every node hanging directly off the sentinel reports
/// `"parent": 0`, which is the same value written for "no parent".
pub const DEFAULT_FIRST_ID: u64 = 0;

/// Parent id written for the sentinel itself
pub const NO_PARENT_ID: u64 = 0;

/// Signature emitted for the synthetic root node
pub const SENTINEL_SIGNATURE: &str = "root";

/// Absolute tolerance used when checking rolled-up counts in a written profile
pub const COUNT_TOLERANCE: f64 = 1e-6;

// Field names an exporter may use for the record list
pub const RECORD_LIST_FIELDS: &[&str] = &[
    "methods",
    "records",
    "profilingEvents",
    "profiling_events",
];
