// src/core/call_graph/call_graph.rs
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{JavascopeError, Result};
use super::super::syntax::SourceUnit;
use super::super::walker;

/// Edge in the call graph, identified by the literal caller and callee names
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallEdge {
    pub caller: String,
    pub callee: String,
}

impl CallEdge {
    pub fn new(caller: impl Into<String>, callee: impl Into<String>) -> Self {
        Self {
            caller: caller.into(),
            callee: callee.into(),
        }
    }
}

/// Rendering bucket of a node, decided by naming convention only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeClass {
    /// Name starts with an upper-case letter
    ClassLike,
    MethodLike,
}

impl NodeClass {
    /// Classify a name by the case of its first character; `None` for an empty name
    pub fn of(name: &str) -> Option<Self> {
        let first = name.chars().next()?;
        if first.is_uppercase() {
            Some(NodeClass::ClassLike)
        } else {
            Some(NodeClass::MethodLike)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallNode {
    pub name: String,
    pub class: NodeClass,
}

/// Deduplicated set of call edges across a whole project.
///
/// Edges iterate in first-insertion order, so the output is stable for a
/// stable file order.
#[derive(Debug, Clone, Default)]
pub struct CallGraph {
    edges: IndexSet<CallEdge>,
}

impl CallGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a call edge, returning whether it was new
    pub fn add_edge(&mut self, caller: &str, callee: &str) -> Result<bool> {
        if caller.is_empty() || callee.is_empty() {
            return Err(JavascopeError::Graph(format!(
                "empty node name in edge \"{}\" -> \"{}\"",
                caller, callee
            )));
        }
        Ok(self.edges.insert(CallEdge::new(caller, callee)))
    }

    /// Fold every (declaration, invocation) pair of a unit, returning the number of new edges
    pub fn add_unit(&mut self, unit: &SourceUnit) -> Result<usize> {
        let mut added = 0;
        for (method, invocation) in walker::call_pairs(unit) {
            if self.add_edge(method.name(), invocation.name())? {
                added += 1;
            }
        }

        debug!("{}: {} new call edges", unit.path().display(), added);
        Ok(added)
    }

    pub fn edges(&self) -> impl Iterator<Item = &CallEdge> {
        self.edges.iter()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains(&self, caller: &str, callee: &str) -> bool {
        self.edges.contains(&CallEdge::new(caller, callee))
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Union of edge endpoints in first-seen order, each with its classification
    pub fn nodes(&self) -> Vec<CallNode> {
        let mut seen: IndexSet<&str> = IndexSet::new();
        for edge in &self.edges {
            seen.insert(&edge.caller);
            seen.insert(&edge.callee);
        }

        seen.into_iter()
            .filter_map(|name| {
                NodeClass::of(name).map(|class| CallNode {
                    name: name.to_string(),
                    class,
                })
            })
            .collect()
    }

    /// Get statistics about the call graph
    pub fn get_statistics(&self) -> CallGraphStats {
        let nodes = self.nodes();
        let class_like = nodes.iter().filter(|n| n.class == NodeClass::ClassLike).count();

        CallGraphStats {
            total_calls: self.edges.len(),
            total_nodes: nodes.len(),
            class_like,
            method_like: nodes.len() - class_like,
            self_calls: self.edges.iter().filter(|e| e.caller == e.callee).count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallGraphStats {
    pub total_calls: usize,
    pub total_nodes: usize,
    pub class_like: usize,
    pub method_like: usize,
    pub self_calls: usize,
}
