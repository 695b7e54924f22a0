//! Input schema for flattened per-method profiling records.
//!
//! One record describes a single method: how many samples landed in it and
//! which methods were seen calling it, each with the percentage of the
//! samples that arrived through that caller. Callers carry their own callers
//! so that a record can be pinned to a specific call path.

use serde::{Deserialize, Serialize};

/// Aggregated sampling data for one method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// Fully qualified method signature
    #[serde(alias = "methodName", alias = "method_name")]
    pub name: String,

    /// Total samples taken while this method was on top of the stack
    #[serde(default, alias = "totalSampleCount", alias = "samples")]
    pub sample_count: u64,

    /// Immediate callers, in the order the source reported them
    #[serde(default, alias = "callerEdges", alias = "callingMethods")]
    pub callers: Vec<CallerEdge>,
}

/// A weighted link from a method to one of its callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallerEdge {
    /// Name of the calling method
    #[serde(alias = "callerMethodName", alias = "methodName")]
    pub name: String,

    /// Share of the callee's samples seen through this caller, nominally 0-100.
    /// Not range-checked.
    #[serde(default, alias = "weightPercent", alias = "percent")]
    pub weight: f64,

    /// The caller's own callers, one hop further back
    #[serde(default, alias = "callerEdges", alias = "callingMethods")]
    pub callers: Vec<CallerEdge>,
}

impl ProfileRecord {
    /// Create a record with the given callers
    pub fn new(name: impl Into<String>, sample_count: u64, callers: Vec<CallerEdge>) -> Self {
        Self {
            name: name.into(),
            sample_count,
            callers,
        }
    }

    /// A record with no callers hangs directly off the sentinel
    pub fn is_root_candidate(&self) -> bool {
        self.callers.is_empty()
    }

    /// First caller edge naming `caller`, if any
    pub fn caller_edge(&self, caller: &str) -> Option<&CallerEdge> {
        find_edge(&self.callers, caller)
    }

    /// Deepest chain of caller evidence carried by this record.
    ///
    /// A root candidate has depth 0, a record whose callers have no callers
    /// of their own has depth 1, and so on.
    pub fn caller_chain_depth(&self) -> usize {
        chain_depth(&self.callers)
    }
}

impl CallerEdge {
    /// Create a caller edge with no further caller evidence
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
            callers: Vec::new(),
        }
    }

    /// Attach the caller's own callers
    pub fn with_callers(mut self, callers: Vec<CallerEdge>) -> Self {
        self.callers = callers;
        self
    }
}

/// Deepest caller chain across a record set
///
/// **Public** - bounds the recursion in the tree builder
pub fn max_caller_chain_depth(records: &[ProfileRecord]) -> usize {
    records
        .iter()
        .map(ProfileRecord::caller_chain_depth)
        .max()
        .unwrap_or(0)
}

/// Find the first edge in `edges` whose caller is `name`
pub(crate) fn find_edge<'a>(edges: &'a [CallerEdge], name: &str) -> Option<&'a CallerEdge> {
    edges.iter().find(|edge| edge.name == name)
}

/// Walk the nested caller lists with an explicit stack so that deeply
/// nested input cannot exhaust the call stack.
fn chain_depth(edges: &[CallerEdge]) -> usize {
    let mut deepest = 0;
    let mut pending: Vec<(&[CallerEdge], usize)> = vec![(edges, 0)];

    while let Some((level, depth)) = pending.pop() {
        if level.is_empty() {
            deepest = deepest.max(depth);
            continue;
        }
        for edge in level {
            pending.push((&edge.callers, depth + 1));
        }
    }

    deepest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_depth() {
        let root = ProfileRecord::new("main", 10, vec![]);
        assert_eq!(root.caller_chain_depth(), 0);

        let nested = ProfileRecord::new(
            "leaf",
            5,
            vec![
                CallerEdge::new("mid", 60.0)
                    .with_callers(vec![CallerEdge::new("main", 100.0)]),
                CallerEdge::new("main", 40.0),
            ],
        );
        assert_eq!(nested.caller_chain_depth(), 2);
        assert_eq!(max_caller_chain_depth(&[root, nested]), 2);
    }

    #[test]
    fn test_caller_edge_takes_first_match() {
        let record = ProfileRecord::new(
            "leaf",
            5,
            vec![CallerEdge::new("a", 10.0), CallerEdge::new("a", 90.0)],
        );
        assert_eq!(record.caller_edge("a").map(|e| e.weight), Some(10.0));
        assert!(record.caller_edge("b").is_none());
    }

    #[test]
    fn test_deserialize_aliases() {
        let record: ProfileRecord = serde_json::from_value(serde_json::json!({
            "methodName": "com.example.Foo.bar()V",
            "totalSampleCount": 42,
            "callerEdges": [
                { "callerMethodName": "com.example.Main.main()V", "weightPercent": 100.0 }
            ]
        }))
        .unwrap();

        assert_eq!(record.name, "com.example.Foo.bar()V");
        assert_eq!(record.sample_count, 42);
        assert_eq!(record.callers[0].name, "com.example.Main.main()V");
        assert!(record.callers[0].callers.is_empty());
    }
}
