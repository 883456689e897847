// src/core/languages/java.rs
use std::path::Path;
use tree_sitter::{Node, Parser};

use crate::error::{JavascopeError, Result};
use super::LanguageParser;
use super::super::syntax::{NodeKind, SourceUnit, Span, SyntaxNode};

/// Java parser using Tree-sitter, lowering the concrete tree into a [`SourceUnit`]
pub struct JavaParser {
    parser: Parser,
}

impl JavaParser {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        let java_language = tree_sitter_java::language();
        parser.set_language(&java_language)
            .map_err(|e| JavascopeError::Parser(format!("Failed to set Java language: {}", e)))?;

        Ok(Self { parser })
    }
}

impl LanguageParser for JavaParser {
    fn parse(&mut self, content: &str, file_path: &Path) -> Result<SourceUnit> {
        let tree = self.parser.parse(content, None)
            .ok_or_else(|| JavascopeError::Parser(
                format!("Failed to parse Java code in {}", file_path.display())
            ))?;

        let root_node = tree.root_node();
        if root_node.has_error() {
            let line = first_error_line(root_node).unwrap_or(root_node.start_position().row + 1);
            return Err(JavascopeError::Parser(format!(
                "Malformed Java source in {} near line {}",
                file_path.display(),
                line
            )));
        }

        let mut children = Vec::new();
        lower_children(root_node, content, &mut children);

        let root = SyntaxNode::new(NodeKind::Unit, file_stem(file_path), span_of(root_node))
            .with_children(children);

        Ok(SourceUnit::new(file_path, root))
    }

    fn language_name(&self) -> &str {
        "java"
    }
}

/// Walk the children of `node`, attaching retained constructs to `out` and
/// flattening everything else into the nearest retained ancestor.
fn lower_children(node: Node, source: &str, out: &mut Vec<SyntaxNode>) {
    let mut cursor = node.walk();

    for child in node.children(&mut cursor) {
        match retain(child, source) {
            Some(mut retained) => {
                lower_children(child, source, &mut retained.children);
                out.push(retained);
            }
            None => lower_children(child, source, out),
        }
    }
}

fn retain(node: Node, source: &str) -> Option<SyntaxNode> {
    let span = span_of(node);
    let in_type_body = node.parent()
        .is_some_and(|parent| matches!(parent.kind(), "class_body" | "interface_body"));

    match node.kind() {
        "package_declaration" => {
            let name = package_name(node, source)?;
            Some(SyntaxNode::new(NodeKind::Package, name, span))
        }
        "class_declaration" | "interface_declaration" => {
            let name = field_text(node, "name", source)?;
            Some(SyntaxNode::new(NodeKind::Type, name, span))
        }
        "method_declaration" | "constructor_declaration" => {
            let name = field_text(node, "name", source)?;
            let parameters = node.child_by_field_name("parameters")
                .map(count_parameters)
                .unwrap_or(0);
            Some(SyntaxNode::new(NodeKind::Method, name, span).with_parameters(parameters))
        }
        "field_declaration" | "constant_declaration" => {
            let name = node.child_by_field_name("declarator")
                .and_then(|declarator| field_text(declarator, "name", source))
                .unwrap_or_default();
            Some(SyntaxNode::new(NodeKind::Field, name, span))
        }
        "method_invocation" => {
            let name = field_text(node, "name", source)?;
            Some(SyntaxNode::new(NodeKind::Invocation, name, span))
        }
        "enum_declaration" | "record_declaration" | "annotation_type_declaration" => {
            let name = field_text(node, "name", source).unwrap_or_default();
            Some(SyntaxNode::new(NodeKind::Scope, name, span))
        }
        "static_initializer" => Some(SyntaxNode::new(NodeKind::Scope, "static", span)),
        "block" if in_type_body => Some(SyntaxNode::new(NodeKind::Scope, "", span)),
        _ => None,
    }
}

fn count_parameters(parameters: Node) -> usize {
    let mut cursor = parameters.walk();
    parameters.named_children(&mut cursor)
        .filter(|p| matches!(p.kind(), "formal_parameter" | "spread_parameter"))
        .count()
}

fn package_name(node: Node, source: &str) -> Option<String> {
    node.named_children(&mut node.walk())
        .find(|child| matches!(child.kind(), "scoped_identifier" | "identifier"))
        .map(|child| node_text(child, source))
}

fn field_text(node: Node, field: &str, source: &str) -> Option<String> {
    node.child_by_field_name(field).map(|child| node_text(child, source))
}

/// Extract text content of a node
fn node_text(node: Node, source: &str) -> String {
    source[node.byte_range()].to_string()
}

fn span_of(node: Node) -> Span {
    Span::new(node.start_position().row + 1, node.end_position().row + 1)
}

fn first_error_line(node: Node) -> Option<usize> {
    if node.is_error() || node.is_missing() {
        return Some(node.start_position().row + 1);
    }

    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children.into_iter()
        .filter(|child| child.has_error())
        .find_map(first_error_line)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}
