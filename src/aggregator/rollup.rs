//! Post-order roll-up of descendant counts.

use crate::tree::CallTree;
use crate::utils::error::TreeError;
use log::debug;

/// Fill in every node's child count and return the sentinel's
///
/// **Public** - third stage of the normalization pipeline
///
/// A leaf's child count is 0. An inner node's child count is the sum over
/// its direct children of `self_count + child_count`.
///
/// # Errors
/// * `TreeError::NotAttributed` - attribution has not run on this tree
/// * `TreeError::AlreadyRolledUp` - roll-up ran twice on the same tree
pub fn roll_up(tree: &mut CallTree<'_>) -> Result<f64, TreeError> {
    for index in tree.post_order() {
        let node = tree.node(index);
        if !node.is_attributed() {
            return Err(TreeError::NotAttributed(node.id()));
        }
        if node.is_rolled_up() {
            return Err(TreeError::AlreadyRolledUp(node.id()));
        }

        let total: f64 = node
            .children()
            .iter()
            .map(|&child| {
                let child = tree.node(child);
                child.self_count() + child.child_count()
            })
            // An empty f64 sum is -0.0; leaves must carry +0.0
            .fold(0.0, |acc, count| acc + count);

        *tree.node_mut(index).child_count_slot() = Some(total);
    }

    let total = tree.root().child_count();
    debug!("Rolled up {} samples below the root", total);

    Ok(total)
}
