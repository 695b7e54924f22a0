//! Self-count attribution.
//!
//! A node's self count is the share of its method's samples that arrived
//! through the caller it hangs under: `samples * weight / 100`, using the
//! record's edge for the parent's method. Nodes directly under the sentinel
//! are root methods and keep all of their samples.

use crate::tree::{CallTree, NodeIndex};
use crate::utils::error::TreeError;
use log::debug;

/// Assign a self count to every non-sentinel node
///
/// **Public** - second stage of the normalization pipeline
///
/// # Errors
/// * `TreeError::MissingCallerEdge` - a node's record has no edge for its
///   parent's method, meaning the tree and its records disagree
/// * `TreeError::AlreadyAttributed` - attribution ran twice on the same tree
pub fn attribute(tree: &mut CallTree<'_>) -> Result<(), TreeError> {
    let indices: Vec<NodeIndex> = tree
        .iter()
        .filter(|(_, node)| !node.is_sentinel())
        .map(|(index, _)| index)
        .collect();

    for index in indices {
        let count = self_count_for(tree, index)?;

        let node = tree.node_mut(index);
        let id = node.id();
        let slot = node.self_count_slot();
        if slot.is_some() {
            return Err(TreeError::AlreadyAttributed(id));
        }
        *slot = Some(count);
    }

    debug!(
        "Attributed {} samples across {} nodes",
        tree.total_self_count(),
        tree.node_count() - 1
    );

    Ok(())
}

/// Compute the self count `index` should carry, without storing it
///
/// **Public** - lets callers inspect a single node
pub fn self_count_for(tree: &CallTree<'_>, index: NodeIndex) -> Result<f64, TreeError> {
    let node = tree.node(index);
    let Some(record) = node.record() else {
        return Ok(0.0);
    };

    let parent = node
        .parent()
        .map(|p| tree.node(p))
        .ok_or(TreeError::OrphanNode(node.id()))?;

    let total = record.sample_count as f64;
    if parent.is_sentinel() {
        return Ok(total);
    }

    let edge = record
        .caller_edge(parent.method_name())
        .ok_or_else(|| TreeError::MissingCallerEdge {
            node_id: node.id(),
            method: record.name.clone(),
            caller: parent.method_name().to_string(),
        })?;

    Ok(total * edge.weight / 100.0)
}
