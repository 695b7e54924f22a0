//! Call tree model and reconstruction.
//!
//! This module turns flat per-method records into a tree with one node per
//! distinct call path:
//! - `node`: arena storage, node accessors and traversal
//! - `builder`: frontier-driven reconstruction and caller-chain matching

pub mod builder;
pub mod node;

// Re-export main types
pub use builder::{matches_as_child_of, TreeBuilder};
pub use node::{CallTree, IdSequence, NodeIndex, PathNode};
