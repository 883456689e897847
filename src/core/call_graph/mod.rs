// src/core/call_graph/mod.rs
//! Call graph construction and DOT serialization
//!
//! Edges are identified by literal method names only: invocations are never
//! resolved to the class that declares the callee.

mod call_graph;
mod dot;

pub use call_graph::{CallGraph, CallNode, CallEdge, NodeClass, CallGraphStats};
pub use dot::{DotSerializer, Palette};
