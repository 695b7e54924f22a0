//! Arena-backed call tree.
//!
//! Nodes live in a single vector in construction order. Parents own their
//! children through index lists and children point back at their parent by
//! index, so there is no shared ownership to manage.

use crate::parser::schema::ProfileRecord;
use crate::utils::config::{DEFAULT_FIRST_ID, SENTINEL_SIGNATURE};

/// Position of a node in its tree's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(usize);

impl NodeIndex {
    /// The synthetic root is always the first node created
    pub const SENTINEL: NodeIndex = NodeIndex(0);

    /// Raw arena position
    pub fn index(self) -> usize {
        self.0
    }
}

/// Explicit id counter handed to the tree builder.
///
/// Ids are issued in construction order, starting with the sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdSequence {
    next: u64,
}

impl IdSequence {
    /// Sequence starting at [`DEFAULT_FIRST_ID`]
    pub fn new() -> Self {
        Self::starting_at(DEFAULT_FIRST_ID)
    }

    /// Sequence whose first issued id is `first`
    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }

    /// Issue the next id
    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Id the next call to `next_id` will return
    pub fn peek(&self) -> u64 {
        self.next
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}

/// One distinct call path through the profiled program
#[derive(Debug, Clone)]
pub struct PathNode<'r> {
    id: u64,
    record: Option<&'r ProfileRecord>,
    parent: Option<NodeIndex>,
    children: Vec<NodeIndex>,
    depth: usize,
    self_count: Option<f64>,
    child_count: Option<f64>,
}

impl<'r> PathNode<'r> {
    /// Id issued by the builder's sequence
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Record this node was resolved from (`None` for the sentinel)
    pub fn record(&self) -> Option<&'r ProfileRecord> {
        self.record
    }

    /// Method signature, or the sentinel placeholder
    pub fn method_name(&self) -> &str {
        self.record
            .map(|record| record.name.as_str())
            .unwrap_or(SENTINEL_SIGNATURE)
    }

    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }

    /// Distance from the sentinel (the sentinel itself is depth 0)
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_sentinel(&self) -> bool {
        self.record.is_none()
    }

    /// Samples attributed to this call path, 0 until attribution runs
    pub fn self_count(&self) -> f64 {
        self.self_count.unwrap_or(0.0)
    }

    /// Rolled-up self counts of every descendant, 0 until roll-up runs
    pub fn child_count(&self) -> f64 {
        self.child_count.unwrap_or(0.0)
    }

    pub fn is_attributed(&self) -> bool {
        self.self_count.is_some()
    }

    pub fn is_rolled_up(&self) -> bool {
        self.child_count.is_some()
    }

    pub(crate) fn self_count_slot(&mut self) -> &mut Option<f64> {
        &mut self.self_count
    }

    pub(crate) fn child_count_slot(&mut self) -> &mut Option<f64> {
        &mut self.child_count
    }
}

/// Call tree anchored at a synthetic root
#[derive(Debug, Clone)]
pub struct CallTree<'r> {
    nodes: Vec<PathNode<'r>>,
}

impl<'r> CallTree<'r> {
    /// Tree holding only the sentinel, which takes the next id from `ids`
    pub(crate) fn with_sentinel(ids: &mut IdSequence) -> Self {
        let sentinel = PathNode {
            id: ids.next_id(),
            record: None,
            parent: None,
            children: Vec::new(),
            depth: 0,
            self_count: Some(0.0),
            child_count: None,
        };
        Self {
            nodes: vec![sentinel],
        }
    }

    /// Append a node for `record` under `parent`
    pub(crate) fn push_child(
        &mut self,
        parent: NodeIndex,
        record: &'r ProfileRecord,
        id: u64,
    ) -> NodeIndex {
        let index = NodeIndex(self.nodes.len());
        let depth = self.nodes[parent.0].depth + 1;
        self.nodes.push(PathNode {
            id,
            record: Some(record),
            parent: Some(parent),
            children: Vec::new(),
            depth,
            self_count: None,
            child_count: None,
        });
        self.nodes[parent.0].children.push(index);
        index
    }

    pub fn root(&self) -> &PathNode<'r> {
        &self.nodes[NodeIndex::SENTINEL.0]
    }

    /// Node at `index`
    ///
    /// Panics if `index` was not issued by this tree.
    pub fn node(&self, index: NodeIndex) -> &PathNode<'r> {
        &self.nodes[index.0]
    }

    pub fn get(&self, index: NodeIndex) -> Option<&PathNode<'r>> {
        self.nodes.get(index.0)
    }

    pub(crate) fn node_mut(&mut self, index: NodeIndex) -> &mut PathNode<'r> {
        &mut self.nodes[index.0]
    }

    /// Number of nodes, sentinel included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Nodes in construction (breadth-first) order, sentinel first
    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &PathNode<'r>)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeIndex(i), node))
    }

    /// Method names from the first real ancestor down to `index`
    pub fn path(&self, index: NodeIndex) -> Vec<&str> {
        let mut names = Vec::with_capacity(self.node(index).depth);
        let mut cursor = Some(index);
        while let Some(current) = cursor {
            let node = self.node(current);
            if node.is_sentinel() {
                break;
            }
            names.push(node.method_name());
            cursor = node.parent;
        }
        names.reverse();
        names
    }

    /// Every node ordered so that children come before their parent
    pub fn post_order(&self) -> Vec<NodeIndex> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![(NodeIndex::SENTINEL, false)];

        while let Some((index, expanded)) = stack.pop() {
            if expanded {
                order.push(index);
                continue;
            }
            stack.push((index, true));
            for &child in self.node(index).children.iter().rev() {
                stack.push((child, false));
            }
        }

        order
    }

    /// Sum of every node's self count, sentinel included
    pub fn total_self_count(&self) -> f64 {
        self.nodes
            .iter()
            .fold(0.0, |acc, node| acc + node.self_count())
    }

    /// Deepest node depth in the tree
    pub fn max_depth(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }
}
