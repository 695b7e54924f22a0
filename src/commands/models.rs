use crate::utils::config::DEFAULT_FIRST_ID;
use std::path::PathBuf;

/// Arguments for the normalize command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct NormalizeArgs {
    /// Exported profiling records (JSON)
    pub input: PathBuf,

    /// Output path for the normalized profile
    pub output: PathBuf,

    /// Id given to the synthetic root; every other id follows it
    pub first_id: u64,

    /// Print a text summary to stdout after writing
    pub print_summary: bool,
}

impl Default for NormalizeArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output: PathBuf::from("profile.json"),
            first_id: DEFAULT_FIRST_ID,
            print_summary: false,
        }
    }
}

/// Arguments for the merge command
#[derive(Debug, Clone)]
pub struct MergeArgs {
    /// Normalized profiles to merge, in order
    pub inputs: Vec<PathBuf>,

    /// Output path for the merged profile
    pub output: PathBuf,

    /// Id given to the merged root
    pub first_id: u64,
}

impl Default for MergeArgs {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            output: PathBuf::from("merged.json"),
            first_id: DEFAULT_FIRST_ID,
        }
    }
}
