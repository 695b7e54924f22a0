//! Normalize command implementation.
//!
//! The normalize command:
//! 1. Loads the exported profiling records
//! 2. Rebuilds the call tree
//! 3. Attributes and rolls up sample counts
//! 4. Writes the flat profile JSON
//!
//! Nothing is written unless every step succeeds.

use crate::commands::models::NormalizeArgs;
use crate::output::{to_profile, validate_path, write_profile, NormalizedProfile};
use crate::parser::load_records;
use crate::pipeline::normalize;
use crate::tree::IdSequence;
use anyhow::{Context, Result};
use log::{debug, info};
use std::time::Instant;

/// Execute the normalize command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Input missing or unreadable
/// * Malformed records
/// * Internal-consistency failures while building the tree
/// * Output not writable
pub fn execute_normalize(args: &NormalizeArgs) -> Result<NormalizedProfile> {
    let start_time = Instant::now();

    let records = load_records(&args.input).with_context(|| {
        format!(
            "Failed to load profiling data from {}",
            args.input.display()
        )
    })?;

    info!("Rebuilding call tree from {} records...", records.len());
    let tree = normalize(&records, IdSequence::starting_at(args.first_id))
        .context("Failed to normalize profiling data")?;

    let profile = to_profile(&tree);
    debug!(
        "Profile has {} functions, total count {}",
        profile.functions.len(),
        profile.total_count
    );

    write_profile(&profile, &args.output).with_context(|| {
        format!("Failed to write profile to {}", args.output.display())
    })?;
    info!("✓ Profile written to: {}", args.output.display());

    if args.print_summary {
        print_profile_summary(&profile, records.len());
    }

    info!(
        "Normalize completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(profile)
}

/// Validate normalize arguments
///
/// **Public** - can be called before execute_normalize for early validation
pub fn validate_args(args: &NormalizeArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if args.input == args.output {
        anyhow::bail!("Output path must differ from the input path");
    }

    validate_path(&args.output).context("Invalid output path")?;

    Ok(())
}

/// Print a short human-readable summary to stdout.
///
/// **Private** - internal helper for execute_normalize
fn print_profile_summary(profile: &NormalizedProfile, record_count: usize) {
    let root_children = profile
        .root()
        .map(|root| {
            profile
                .functions
                .iter()
                .skip(1)
                .filter(|f| f.parent == root.self_id)
                .count()
        })
        .unwrap_or(0);

    println!();
    println!("  Records:      {}", record_count);
    println!("  Call paths:   {}", profile.functions.len().saturating_sub(1));
    println!("  Root methods: {}", root_children);
    println!("  Total count:  {:.2}", profile.total_count);
    println!();
}
