//! Profiling record input.
//!
//! This module handles:
//! - The record/caller-edge schema produced by the upstream exporter
//! - Loading and validating the record list from JSON

pub mod records;
pub mod schema;

// Re-export main types
pub use records::{load_records, parse_records, parse_records_value};
pub use schema::{max_caller_chain_depth, CallerEdge, ProfileRecord};
