//! Merge several normalized profiles into one tree.
//!
//! Paths are matched by signature under an already merged parent, so the
//! same call path from two runs lands on one node whose count is the sum of
//! both. Child counts are recomputed over the merged tree.

use super::json::{FunctionEntry, Location, NormalizedProfile};
use crate::tree::IdSequence;
use crate::utils::config::{NO_PARENT_ID, SENTINEL_SIGNATURE};
use log::{debug, info};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum MergeError {
    #[error("No profiles to merge")]
    NoProfiles,

    #[error("Profile {profile}: function {self_id} references parent {parent} before it appears")]
    UnknownParent {
        profile: usize,
        self_id: u64,
        parent: u64,
    },
}

/// Merge profiles, numbering the merged tree from `ids`
///
/// **Public** - main entry point for the merge command
///
/// Each input's first entry is taken as its root. Entries must list their
/// parent before themselves, which is how `to_profile` writes them.
///
/// # Errors
/// * `MergeError::NoProfiles` - empty input
/// * `MergeError::UnknownParent` - an entry's parent has not been seen yet
pub fn merge_profiles(
    profiles: &[NormalizedProfile],
    mut ids: IdSequence,
) -> Result<NormalizedProfile, MergeError> {
    if profiles.is_empty() {
        return Err(MergeError::NoProfiles);
    }

    // Merged arena: entries plus each entry's children, parents always first
    let mut entries = vec![FunctionEntry {
        self_id: ids.next_id(),
        parent: NO_PARENT_ID,
        location: Location {
            signature: SENTINEL_SIGNATURE.to_string(),
        },
        count: 0.0,
        child_count: 0.0,
    }];
    let mut children: Vec<Vec<usize>> = vec![Vec::new()];
    let mut by_path: HashMap<(Location, usize), usize> = HashMap::new();
    let mut total_count = 0.0;

    for (profile_index, profile) in profiles.iter().enumerate() {
        let Some((root, rest)) = profile.functions.split_first() else {
            continue;
        };

        // Input id -> merged arena position
        let mut positions: HashMap<u64, usize> = HashMap::from([(root.self_id, 0)]);
        entries[0].count += root.count;
        total_count += root.count;

        for entry in rest {
            let parent = *positions
                .get(&entry.parent)
                .ok_or(MergeError::UnknownParent {
                    profile: profile_index,
                    self_id: entry.self_id,
                    parent: entry.parent,
                })?;

            let key = (entry.location.clone(), parent);
            let position = match by_path.get(&key) {
                Some(&position) => position,
                None => {
                    let position = entries.len();
                    entries.push(FunctionEntry {
                        self_id: ids.next_id(),
                        parent: entries[parent].self_id,
                        location: entry.location.clone(),
                        count: 0.0,
                        child_count: 0.0,
                    });
                    children.push(Vec::new());
                    children[parent].push(position);
                    by_path.insert(key, position);
                    position
                }
            };

            entries[position].count += entry.count;
            total_count += entry.count;
            positions.insert(entry.self_id, position);
        }

        debug!(
            "Merged profile {} ({} functions)",
            profile_index,
            profile.functions.len()
        );
    }

    // Children always sit after their parent, so a reverse sweep is post-order
    for position in (0..entries.len()).rev() {
        let sum: f64 = children[position]
            .iter()
            .map(|&child| entries[child].count + entries[child].child_count)
            .fold(0.0, |acc, count| acc + count);
        entries[position].child_count = sum;
    }

    info!(
        "Merged {} profiles into {} functions",
        profiles.len(),
        entries.len()
    );

    Ok(NormalizedProfile {
        functions: entries,
        total_count,
    })
}
