//! Structural metrics and call graphs for Java projects.
//!
//! Source files are parsed with tree-sitter, lowered into a small syntax tree
//! and folded file by file into project metrics and a name-based call graph,
//! which is written as Graphviz DOT and rendered through the `dot` tool.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod menu;

pub use error::{JavascopeError, MetricsError, Result};
