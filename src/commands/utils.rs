use crate::commands::models::MergeArgs;
use crate::output::{
    check_profile, merge_profiles, read_profile, summarize, write_profile, write_summary,
};
use crate::tree::IdSequence;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::{Context, Result};
use log::info;
use std::path::Path;

/// Validate a normalized profile file
pub fn validate_profile_file(file_path: &Path) -> Result<()> {
    println!("Validating profile: {}", file_path.display());

    let profile = read_profile(file_path)?;
    let issues = check_profile(&profile);

    if !issues.is_empty() {
        for issue in &issues {
            println!("  ✗ {}", issue);
        }
        anyhow::bail!("Profile has {} consistency issue(s)", issues.len());
    }

    println!("✓ Valid profile JSON");
    println!("  Functions: {}", profile.functions.len());
    println!("  Total Count: {}", profile.total_count);

    Ok(())
}

/// Summarize a normalized profile per method
pub fn summarize_profile_file(input: &Path, output: &Path) -> Result<()> {
    let profile = read_profile(input)
        .with_context(|| format!("Failed to read profile {}", input.display()))?;

    let summary = summarize(&profile);
    write_summary(&summary, output)
        .with_context(|| format!("Failed to write summary to {}", output.display()))?;

    info!(
        "✓ Summary of {} methods written to: {}",
        summary.functions.len(),
        output.display()
    );
    Ok(())
}

/// Merge normalized profiles into one
pub fn merge_profile_files(args: &MergeArgs) -> Result<()> {
    let profiles = args
        .inputs
        .iter()
        .map(|path| {
            read_profile(path).with_context(|| format!("Failed to read profile {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let merged = merge_profiles(&profiles, IdSequence::starting_at(args.first_id))
        .context("Failed to merge profiles")?;

    write_profile(&merged, &args.output)
        .with_context(|| format!("Failed to write merged profile to {}", args.output.display()))?;

    info!("✓ Merged profile written to: {}", args.output.display());
    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("HC Profile Tree Output Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  functions: array          - One entry per call path, root first");
        println!("    self: number            - Node id");
        println!("    parent: number          - Parent node id (0 for the root)");
        println!("    location: object");
        println!("      signature: string     - Method signature");
        println!("    count: number           - Samples attributed to this path");
        println!("    child_count: number     - Samples attributed below this path");
        println!("  total_count: number       - Sum of every count");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("HC Profile Tree v{}", env!("CARGO_PKG_VERSION"));
    println!("Profile Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Rebuilds per-call-path sample trees from flat method profiling records.");
}
