//! HC Profile Tree CLI
//!
//! Turns flat per-method profiling records into a per-call-path profile.
//! Run as `hc-profile-tree <INPUT> <OUTPUT>` or through the subcommands.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use hc_profile_tree::commands::{
    display_schema, display_version, execute_normalize, merge_profile_files,
    summarize_profile_file, validate_args, validate_profile_file, MergeArgs, NormalizeArgs,
};
use hc_profile_tree::utils::config::DEFAULT_FIRST_ID;

/// HC Profile Tree - call tree reconstruction for sampled method profiles
#[derive(Parser, Debug)]
#[command(name = "hc-profile-tree")]
#[command(version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Option<Commands>,

    /// Profiling records to normalize (shorthand for `normalize INPUT OUTPUT`)
    input: Option<PathBuf>,

    /// Output path for the normalized profile
    output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Rebuild the call tree and write the normalized profile
    Normalize {
        /// Exported profiling records (JSON)
        input: PathBuf,

        /// Output path for the normalized profile
        output: PathBuf,

        /// Id given to the synthetic root node
        #[arg(long, default_value_t = DEFAULT_FIRST_ID, env = "HC_PROFILE_FIRST_ID")]
        first_id: u64,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Collapse a normalized profile into per-method totals
    Summarize {
        /// Normalized profile JSON
        input: PathBuf,

        /// Output path for the summary
        output: PathBuf,
    },

    /// Merge several normalized profiles into one tree
    Merge {
        /// Output path for the merged profile
        #[arg(short, long)]
        output: PathBuf,

        /// Normalized profiles to merge
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Id given to the merged root node
        #[arg(long, default_value_t = DEFAULT_FIRST_ID)]
        first_id: u64,
    },

    /// Check a normalized profile for consistency
    Validate {
        /// Path to profile JSON file
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Some(Commands::Normalize {
            input,
            output,
            first_id,
            summary,
        }) => {
            run_normalize(NormalizeArgs {
                input,
                output,
                first_id,
                print_summary: summary,
            })?;
        }

        Some(Commands::Summarize { input, output }) => {
            summarize_profile_file(&input, &output)?;
        }

        Some(Commands::Merge {
            output,
            inputs,
            first_id,
        }) => {
            merge_profile_files(&MergeArgs {
                inputs,
                output,
                first_id,
            })?;
        }

        Some(Commands::Validate { file }) => {
            validate_profile_file(&file)?;
        }

        Some(Commands::Schema { show }) => {
            display_schema(show);
        }

        Some(Commands::Version) => {
            display_version();
        }

        None => match (cli.input, cli.output) {
            (Some(input), Some(output)) => {
                run_normalize(NormalizeArgs {
                    input,
                    output,
                    ..Default::default()
                })?;
            }
            _ => anyhow::bail!("Expected an input and an output path (see --help)"),
        },
    }

    Ok(())
}

/// Validate and run the normalize command
fn run_normalize(args: NormalizeArgs) -> Result<()> {
    validate_args(&args)?;
    execute_normalize(&args)?;
    Ok(())
}
