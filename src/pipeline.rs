//! End-to-end normalization: flat records in, rolled-up tree out.
//!
//! Stages run strictly in order (build, attribute, roll up) and the first
//! failure aborts the whole run.

use crate::aggregator::{attribute, roll_up};
use crate::output::json::{to_profile, NormalizedProfile};
use crate::parser::schema::ProfileRecord;
use crate::tree::{CallTree, IdSequence, TreeBuilder};
use crate::utils::error::TreeError;
use log::debug;

/// Build, attribute and roll up a tree for `records`
///
/// **Public** - main library entry point
pub fn normalize(records: &[ProfileRecord], ids: IdSequence) -> Result<CallTree<'_>, TreeError> {
    let mut tree = TreeBuilder::new(records).with_ids(ids).build()?;
    attribute(&mut tree)?;
    roll_up(&mut tree)?;

    debug!(
        "{} of {} records never resolved to a call path",
        unplaced_records(records, &tree),
        records.len()
    );

    Ok(tree)
}

/// Run the full pipeline and flatten the result
pub fn normalize_to_profile(
    records: &[ProfileRecord],
    ids: IdSequence,
) -> Result<NormalizedProfile, TreeError> {
    let tree = normalize(records, ids)?;
    Ok(to_profile(&tree))
}

/// Number of records that produced no node in `tree`
pub fn unplaced_records(records: &[ProfileRecord], tree: &CallTree<'_>) -> usize {
    let placed: Vec<&ProfileRecord> = tree
        .iter()
        .filter_map(|(_, node)| node.record())
        .collect();

    records
        .iter()
        .filter(|&record| !placed.iter().any(|&p| std::ptr::eq(p, record)))
        .count()
}
