//! Sample apportionment over a reconstructed call tree.
//!
//! This module fills in the counts the output carries:
//! - Self counts from caller-edge weights (`attributor`)
//! - Child counts rolled up from descendants (`rollup`)

pub mod attributor;
pub mod rollup;

// Re-export main functions
pub use attributor::{attribute, self_count_for};
pub use rollup::roll_up;
