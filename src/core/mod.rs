// src/core/mod.rs
mod engine;
mod parser;
mod project;
mod renderer;
mod syntax;

pub mod metrics;
pub mod report;
pub mod walker;

// Call graph construction and serialization
mod call_graph;

// Language-specific parsers
mod languages;

pub use syntax::{
    MethodDeclaration, MethodInvocation, NodeKind, SourceUnit, Span, SyntaxNode, TypeDeclaration,
};
pub use parser::{CodeParser, ParseSummary};
pub use languages::{JavaParser, LanguageParser};
pub use project::Project;
pub use metrics::{
    ClassMetricMap, MetricTotals, MetricsAggregator, ProjectStatistics, SelectionOptions,
};
pub use call_graph::{
    CallGraph, CallNode, CallEdge, NodeClass, CallGraphStats, DotSerializer, Palette,
};
pub use renderer::{DotRenderer, GraphRenderer};

// Export the main engine
pub use engine::{Engine, GraphArtifacts};
