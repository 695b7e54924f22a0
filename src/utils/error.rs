//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading profiling records
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Cannot read profiling data from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid record format: {0}")]
    InvalidFormat(String),

    #[error("Record {index} is malformed: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Internal-consistency failures raised while building, attributing or
/// rolling up the call tree.
///
/// None of these are recoverable: the run aborts rather than emitting a
/// degraded tree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    #[error("No caller edge from '{caller}' found on method '{method}' (node {node_id})")]
    MissingCallerEdge {
        node_id: u64,
        method: String,
        caller: String,
    },

    #[error("Caller chain of '{method}' is deeper than the deepest observed call stack ({max_depth})")]
    CallerChainTooDeep { method: String, max_depth: usize },

    #[error("Node {0} has no parent but is not the sentinel")]
    OrphanNode(u64),

    #[error("Node {0} already has a self count")]
    AlreadyAttributed(u64),

    #[error("Node {0} has no self count; attribution must run before roll-up")]
    NotAttributed(u64),

    #[error("Node {0} already has a child count")]
    AlreadyRolledUp(u64),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[source] std::io::Error),

    #[error("Failed to read file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
