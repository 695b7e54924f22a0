//! Layer-by-layer reconstruction of the call tree.
//!
//! Records without callers become the first layer under the sentinel. Each
//! following layer holds every record that resolves against a node of the
//! previous layer, where "resolves" means the record's caller evidence
//! agrees with that node's ancestry all the way back to the sentinel.
//!
//! A record reached through several distinct paths yields one node per path.
//! A record whose callers never resolve yields no node at all.

use super::node::{CallTree, IdSequence, NodeIndex};
use crate::parser::schema::{find_edge, max_caller_chain_depth, CallerEdge, ProfileRecord};
use crate::utils::error::TreeError;
use log::{debug, info};

/// Builds a [`CallTree`] from a flat record set
#[derive(Debug, Clone)]
pub struct TreeBuilder<'r> {
    records: &'r [ProfileRecord],
    ids: IdSequence,
}

impl<'r> TreeBuilder<'r> {
    /// Builder over `records` using the default id sequence
    pub fn new(records: &'r [ProfileRecord]) -> Self {
        Self {
            records,
            ids: IdSequence::new(),
        }
    }

    /// Use an explicit id sequence
    pub fn with_ids(mut self, ids: IdSequence) -> Self {
        self.ids = ids;
        self
    }

    /// Reconstruct the tree
    ///
    /// **Public** - first stage of the normalization pipeline
    ///
    /// # Errors
    /// * `TreeError::CallerChainTooDeep` - the tree grew past the deepest
    ///   caller chain present in the input
    /// * `TreeError::OrphanNode` - a non-sentinel node lost its parent
    pub fn build(self) -> Result<CallTree<'r>, TreeError> {
        let records = self.records;
        let mut ids = self.ids;
        let max_depth = max_caller_chain_depth(records);

        debug!(
            "Building call tree from {} records (deepest caller chain: {})",
            records.len(),
            max_depth
        );

        let mut tree = CallTree::with_sentinel(&mut ids);

        let mut frontier: Vec<NodeIndex> = records
            .iter()
            .filter(|record| record.is_root_candidate())
            .map(|record| tree.push_child(NodeIndex::SENTINEL, record, ids.next_id()))
            .collect();

        debug!("Layer 1: {} root methods", frontier.len());

        let mut layer = 1;
        while !frontier.is_empty() {
            let mut next_layer = Vec::new();

            for record in records {
                for &parent in &frontier {
                    if matches_as_child_of(&tree, parent, &record.callers, max_depth)? {
                        next_layer.push(tree.push_child(parent, record, ids.next_id()));
                    }
                }
            }

            if next_layer.is_empty() {
                break;
            }

            layer += 1;
            if layer > max_depth + 1 {
                let deepest = tree.node(next_layer[0]);
                return Err(TreeError::CallerChainTooDeep {
                    method: deepest.method_name().to_string(),
                    max_depth,
                });
            }

            debug!("Layer {}: {} nodes", layer, next_layer.len());
            frontier = next_layer;
        }

        info!(
            "Built call tree: {} nodes across {} layers",
            tree.node_count(),
            tree.max_depth()
        );

        Ok(tree)
    }
}

/// Check whether a record with the given caller evidence belongs directly
/// under `candidate`.
///
/// Walks up from `candidate` one ancestor per hop, each time consuming the
/// nested callers of the first edge naming that ancestor. The match holds
/// only if the walk reaches the sentinel exactly when the evidence runs out.
///
/// **Public** - exposed for path-matching tests
///
/// # Errors
/// * `TreeError::CallerChainTooDeep` - more than `max_hops` hops were needed
/// * `TreeError::OrphanNode` - a non-sentinel ancestor has no parent
pub fn matches_as_child_of(
    tree: &CallTree<'_>,
    candidate: NodeIndex,
    callers: &[CallerEdge],
    max_hops: usize,
) -> Result<bool, TreeError> {
    let mut current = candidate;
    let mut evidence = callers;
    let mut hops = 0;

    loop {
        let node = tree.node(current);
        if node.is_sentinel() {
            return Ok(evidence.is_empty());
        }

        let Some(edge) = find_edge(evidence, node.method_name()) else {
            return Ok(false);
        };

        hops += 1;
        if hops > max_hops {
            return Err(TreeError::CallerChainTooDeep {
                method: node.method_name().to_string(),
                max_depth: max_hops,
            });
        }

        current = node.parent().ok_or(TreeError::OrphanNode(node.id()))?;
        evidence = edge.callers.as_slice();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(name: &str, weight: f64) -> CallerEdge {
        CallerEdge::new(name, weight)
    }

    fn names<'a>(tree: &'a CallTree<'_>, index: NodeIndex) -> Vec<&'a str> {
        tree.node(index)
            .children()
            .iter()
            .map(|&c| tree.node(c).method_name())
            .collect()
    }

    #[test]
    fn test_single_chain() {
        let records = vec![
            ProfileRecord::new("A", 100, vec![]),
            ProfileRecord::new("B", 50, vec![edge("A", 100.0)]),
        ];

        let tree = TreeBuilder::new(&records).build().unwrap();

        assert_eq!(tree.node_count(), 3);
        assert_eq!(names(&tree, NodeIndex::SENTINEL), vec!["A"]);
        let a = tree.root().children()[0];
        assert_eq!(names(&tree, a), vec!["B"]);
    }

    #[test]
    fn test_unresolved_record_is_dropped() {
        let records = vec![
            ProfileRecord::new("A", 100, vec![]),
            ProfileRecord::new("C", 5, vec![edge("Z", 100.0)]),
        ];

        let tree = TreeBuilder::new(&records).build().unwrap();

        assert_eq!(tree.node_count(), 2);
        assert!(tree.iter().all(|(_, n)| n.method_name() != "C"));
    }

    #[test]
    fn test_split_callers_yield_one_node_per_path() {
        let records = vec![
            ProfileRecord::new("A", 10, vec![]),
            ProfileRecord::new("X", 10, vec![]),
            ProfileRecord::new("D", 10, vec![edge("A", 30.0), edge("X", 70.0)]),
        ];

        let tree = TreeBuilder::new(&records).build().unwrap();

        let roots = tree.root().children();
        assert_eq!(names(&tree, roots[0]), vec!["D"]);
        assert_eq!(names(&tree, roots[1]), vec!["D"]);
        assert_eq!(tree.node_count(), 5);
    }

    #[test]
    fn test_nested_evidence_disambiguates_paths() {
        // B is called from both A and X, but C is only ever reached via A -> B.
        let records = vec![
            ProfileRecord::new("A", 1, vec![]),
            ProfileRecord::new("X", 1, vec![]),
            ProfileRecord::new("B", 1, vec![edge("A", 50.0), edge("X", 50.0)]),
            ProfileRecord::new(
                "C",
                1,
                vec![edge("B", 100.0).with_callers(vec![edge("A", 100.0)])],
            ),
        ];

        let tree = TreeBuilder::new(&records).build().unwrap();

        let c_paths: Vec<Vec<&str>> = tree
            .iter()
            .filter(|(_, n)| n.method_name() == "C")
            .map(|(i, _)| tree.path(i))
            .collect();
        assert_eq!(c_paths, vec![vec!["A", "B", "C"]]);
    }

    #[test]
    fn test_missing_nested_evidence_stops_at_first_layer() {
        // C claims B as a caller but carries no evidence for B's callers, so
        // it can only match a B that sits directly under the sentinel.
        let records = vec![
            ProfileRecord::new("A", 1, vec![]),
            ProfileRecord::new("B", 1, vec![edge("A", 100.0)]),
            ProfileRecord::new("C", 1, vec![edge("B", 100.0)]),
        ];

        let tree = TreeBuilder::new(&records).build().unwrap();

        assert_eq!(tree.node_count(), 3);
    }

    #[test]
    fn test_repeated_method_at_different_depths() {
        let records = vec![
            ProfileRecord::new("main", 0, vec![]),
            ProfileRecord::new(
                "log",
                10,
                vec![
                    edge("main", 40.0),
                    edge("work", 60.0).with_callers(vec![edge("main", 100.0)]),
                ],
            ),
            ProfileRecord::new("work", 5, vec![edge("main", 100.0)]),
        ];

        let tree = TreeBuilder::new(&records).build().unwrap();

        let mut log_paths: Vec<Vec<&str>> = tree
            .iter()
            .filter(|(_, n)| n.method_name() == "log")
            .map(|(i, _)| tree.path(i))
            .collect();
        log_paths.sort();
        assert_eq!(
            log_paths,
            vec![vec!["main", "log"], vec!["main", "work", "log"]]
        );
    }

    #[test]
    fn test_ids_follow_construction_order() {
        let records = vec![
            ProfileRecord::new("A", 1, vec![]),
            ProfileRecord::new("B", 1, vec![edge("A", 100.0)]),
            ProfileRecord::new("C", 1, vec![]),
        ];

        let tree = TreeBuilder::new(&records)
            .with_ids(IdSequence::starting_at(1))
            .build()
            .unwrap();

        let order: Vec<(u64, &str)> = tree.iter().map(|(_, n)| (n.id(), n.method_name())).collect();
        assert_eq!(order, vec![(1, "root"), (2, "A"), (3, "C"), (4, "B")]);
    }

    #[test]
    fn test_empty_input_yields_sentinel_only() {
        let tree = TreeBuilder::new(&[]).build().unwrap();
        assert_eq!(tree.node_count(), 1);
        assert!(tree.root().children().is_empty());
    }

    #[test]
    fn test_hop_budget_is_enforced() {
        let records = vec![
            ProfileRecord::new("A", 1, vec![]),
            ProfileRecord::new("B", 1, vec![edge("A", 100.0)]),
        ];
        let tree = TreeBuilder::new(&records).build().unwrap();
        let a = tree.root().children()[0];

        let err = matches_as_child_of(&tree, a, &[edge("A", 100.0)], 0).unwrap_err();
        assert!(matches!(err, TreeError::CallerChainTooDeep { max_depth: 0, .. }));
        assert!(matches_as_child_of(&tree, a, &[edge("A", 100.0)], 1).unwrap());
    }
}
