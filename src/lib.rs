//! HC Profile Tree
//!
//! Rebuilds a call tree from flat, per-method sampled profiling records.
//!
//! Each input record names a method, the samples taken in it, and the
//! methods seen calling it with the percentage of samples that came through
//! each. The library reconstructs one node per distinct call path, apportions
//! samples along the weighted caller edges, and rolls descendant counts up
//! into every node.
//!
//! ## Getting Started
//!
//! ```ignore
//! use hc_profile_tree::parser::load_records;
//! use hc_profile_tree::pipeline::normalize_to_profile;
//! use hc_profile_tree::tree::IdSequence;
//!
//! let records = load_records("methods.json")?;
//! let profile = normalize_to_profile(&records, IdSequence::new())?;
//! hc_profile_tree::output::write_profile(&profile, "profile.json")?;
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod tree;
pub mod utils;
