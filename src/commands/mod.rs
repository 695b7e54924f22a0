//! CLI command implementations.
//!
//! Commands orchestrate the library components to perform user tasks.

pub mod models;
pub mod normalize;
pub mod utils;

// Re-export main command functions
pub use models::{MergeArgs, NormalizeArgs};
pub use normalize::{execute_normalize, validate_args};
pub use utils::{
    display_schema, display_version, merge_profile_files, summarize_profile_file,
    validate_profile_file,
};
