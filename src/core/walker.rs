//! Pre-order selection over [`SyntaxNode`] trees.
//!
//! Every traversal is a plain function returning the matching nodes in
//! declaration-before-children order. Traversals compose: invocations are
//! found by first selecting method declarations and then walking each
//! declaration's own sub-tree.

use super::syntax::{
    MethodDeclaration, MethodInvocation, NodeKind, SourceUnit, SyntaxNode, TypeDeclaration,
};

/// Collect every node under `root` (inclusive) accepted by `predicate`, in pre-order
pub fn select<'t, P>(root: &'t SyntaxNode, predicate: P) -> Vec<&'t SyntaxNode>
where
    P: Fn(&SyntaxNode) -> bool,
{
    let mut selected = Vec::new();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if predicate(node) {
            selected.push(node);
        }
        // Reverse so the leftmost child is visited first
        stack.extend(node.children.iter().rev());
    }

    selected
}

pub fn select_kind(root: &SyntaxNode, kind: NodeKind) -> Vec<&SyntaxNode> {
    select(root, |node| node.kind == kind)
}

/// All type declarations of a unit, nested ones included
pub fn types(unit: &SourceUnit) -> Vec<TypeDeclaration<'_>> {
    select_kind(unit.root(), NodeKind::Type)
        .into_iter()
        .filter_map(TypeDeclaration::from_node)
        .collect()
}

/// All method and constructor declarations of a unit, wherever they are nested
pub fn declarations(unit: &SourceUnit) -> Vec<MethodDeclaration<'_>> {
    select_kind(unit.root(), NodeKind::Method)
        .into_iter()
        .filter_map(MethodDeclaration::from_node)
        .collect()
}

/// Invocations anywhere inside a method's sub-tree, including nested declarations
pub fn invocations<'t>(method: &MethodDeclaration<'t>) -> Vec<MethodInvocation<'t>> {
    select_kind(method.node(), NodeKind::Invocation)
        .into_iter()
        .filter_map(MethodInvocation::from_node)
        .collect()
}

/// Declared package names, normally exactly one per unit
pub fn packages(unit: &SourceUnit) -> Vec<&str> {
    select_kind(unit.root(), NodeKind::Package)
        .into_iter()
        .map(|node| node.name.as_str())
        .collect()
}

/// Every (enclosing declaration, invocation) pair of a unit
pub fn call_pairs(unit: &SourceUnit) -> Vec<(MethodDeclaration<'_>, MethodInvocation<'_>)> {
    declarations(unit)
        .into_iter()
        .flat_map(|method| {
            invocations(&method)
                .into_iter()
                .map(move |invocation| (method, invocation))
        })
        .collect()
}
