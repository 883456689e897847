//! Language-neutral syntax tree consumed by the analysis engine.
//!
//! Language parsers lower their concrete trees into [`SyntaxNode`]s that keep
//! only the constructs the engine reasons about (packages, types, methods,
//! fields and invocations) while preserving their nesting and source order.

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

/// Kind of a retained syntax node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Root of a parsed file
    Unit,
    Package,
    Type,
    /// Methods and constructors
    Method,
    Field,
    Invocation,
    /// Enum, record and annotation bodies or initializer blocks; their
    /// members do not belong to the enclosing type
    Scope,
}

/// Line range of a node, 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start_line: usize,
    pub end_line: usize,
}

impl Span {
    pub fn new(start_line: usize, end_line: usize) -> Self {
        Self { start_line, end_line }
    }

    /// Number of line breaks covered by the span
    pub fn line_delta(&self) -> usize {
        self.end_line.saturating_sub(self.start_line)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub name: String,
    pub span: Span,
    /// Declared parameters, only meaningful for methods
    pub parameter_count: usize,
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    pub fn new(kind: NodeKind, name: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            name: name.into(),
            span,
            parameter_count: 0,
            children: Vec::new(),
        }
    }

    pub fn with_parameters(mut self, parameter_count: usize) -> Self {
        self.parameter_count = parameter_count;
        self
    }

    pub fn with_children(mut self, children: Vec<SyntaxNode>) -> Self {
        self.children = children;
        self
    }

    pub fn is(&self, kind: NodeKind) -> bool {
        self.kind == kind
    }

    /// Direct children of the given kind
    pub fn children_of(&self, kind: NodeKind) -> impl Iterator<Item = &SyntaxNode> {
        self.children.iter().filter(move |child| child.kind == kind)
    }
}

/// One parsed source file
#[derive(Debug, Clone)]
pub struct SourceUnit {
    path: PathBuf,
    root: SyntaxNode,
}

impl SourceUnit {
    pub fn new(path: impl Into<PathBuf>, root: SyntaxNode) -> Self {
        Self {
            path: path.into(),
            root,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }
}

/// A class-like declaration
#[derive(Debug, Clone, Copy)]
pub struct TypeDeclaration<'a>(&'a SyntaxNode);

impl<'a> TypeDeclaration<'a> {
    pub fn from_node(node: &'a SyntaxNode) -> Option<Self> {
        node.is(NodeKind::Type).then_some(Self(node))
    }

    pub fn name(&self) -> &'a str {
        &self.0.name
    }

    pub fn span(&self) -> Span {
        self.0.span
    }

    /// Methods and constructors declared directly in the body
    pub fn methods(&self) -> impl Iterator<Item = MethodDeclaration<'a>> {
        self.0.children_of(NodeKind::Method).map(MethodDeclaration)
    }

    /// Field declaration statements declared directly in the body
    pub fn fields(&self) -> impl Iterator<Item = &'a SyntaxNode> {
        self.0.children_of(NodeKind::Field)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MethodDeclaration<'a>(&'a SyntaxNode);

impl<'a> MethodDeclaration<'a> {
    pub fn from_node(node: &'a SyntaxNode) -> Option<Self> {
        node.is(NodeKind::Method).then_some(Self(node))
    }

    pub fn name(&self) -> &'a str {
        &self.0.name
    }

    pub fn span(&self) -> Span {
        self.0.span
    }

    pub fn parameter_count(&self) -> usize {
        self.0.parameter_count
    }

    pub fn node(&self) -> &'a SyntaxNode {
        self.0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MethodInvocation<'a>(&'a SyntaxNode);

impl<'a> MethodInvocation<'a> {
    pub fn from_node(node: &'a SyntaxNode) -> Option<Self> {
        node.is(NodeKind::Invocation).then_some(Self(node))
    }

    /// Literal callee name, never resolved to a declaration
    pub fn name(&self) -> &'a str {
        &self.0.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: usize, end: usize) -> Span {
        Span::new(start, end)
    }

    #[test]
    fn test_type_view_only_sees_direct_members() {
        let nested_method = SyntaxNode::new(NodeKind::Method, "inner", span(4, 4));
        let field = SyntaxNode::new(NodeKind::Field, "listener", span(3, 5))
            .with_children(vec![nested_method]);
        let method = SyntaxNode::new(NodeKind::Method, "run", span(6, 8)).with_parameters(2);
        let class = SyntaxNode::new(NodeKind::Type, "Worker", span(1, 9))
            .with_children(vec![field, method]);

        let ty = TypeDeclaration::from_node(&class).unwrap();
        assert_eq!(ty.name(), "Worker");
        assert_eq!(ty.fields().count(), 1);

        let methods: Vec<_> = ty.methods().map(|m| m.name()).collect();
        assert_eq!(methods, vec!["run"]);
        assert_eq!(ty.methods().next().unwrap().parameter_count(), 2);
    }

    #[test]
    fn test_views_reject_other_kinds() {
        let node = SyntaxNode::new(NodeKind::Field, "x", span(1, 1));
        assert!(TypeDeclaration::from_node(&node).is_none());
        assert!(MethodDeclaration::from_node(&node).is_none());
        assert!(MethodInvocation::from_node(&node).is_none());
    }

    #[test]
    fn test_line_delta() {
        assert_eq!(span(3, 7).line_delta(), 4);
        assert_eq!(span(5, 5).line_delta(), 0);
    }
}
