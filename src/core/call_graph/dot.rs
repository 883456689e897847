// src/core/call_graph/dot.rs
//! Graphviz DOT output for the call graph.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::GraphConfig;
use crate::error::Result;
use super::{CallGraph, NodeClass};

/// Fill colors for the two node buckets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub class_color: String,
    pub method_color: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            class_color: "lightblue".to_string(),
            method_color: "lightgreen".to_string(),
        }
    }
}

impl Palette {
    pub fn color_for(&self, class: NodeClass) -> &str {
        match class {
            NodeClass::ClassLike => &self.class_color,
            NodeClass::MethodLike => &self.method_color,
        }
    }
}

/// Serializes a [`CallGraph`] to the DOT language
#[derive(Debug, Clone, Default)]
pub struct DotSerializer {
    palette: Palette,
}

impl DotSerializer {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    pub fn from_config(config: &GraphConfig) -> Self {
        Self::new(Palette {
            class_color: config.class_color.clone(),
            method_color: config.method_color.clone(),
        })
    }

    pub fn to_dot(&self, graph: &CallGraph) -> String {
        let mut out = String::new();
        out.push_str("digraph CallGraph {\n");
        out.push_str("node [shape=rectangle, style=filled];\n");

        for edge in graph.edges() {
            let _ = writeln!(out, "{} -> {};", quote(&edge.caller), quote(&edge.callee));
        }

        for node in graph.nodes() {
            let _ = writeln!(
                out,
                "{} [fillcolor={}, style=filled];",
                quote(&node.name),
                self.palette.color_for(node.class)
            );
        }

        self.push_legend(&mut out);
        out.push_str("}\n");
        out
    }

    /// Write the description to `path`, creating parent directories on demand
    pub fn write(&self, graph: &CallGraph, path: &Path) -> Result<PathBuf> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_dot(graph))?;

        info!("Wrote call graph description: {}", path.display());
        Ok(path.to_path_buf())
    }

    fn push_legend(&self, out: &mut String) {
        out.push_str("subgraph cluster_legend {\n");
        out.push_str("label=\"Legend\";\n");
        out.push_str("key [label=<<TABLE BORDER=\"0\" CELLBORDER=\"1\" CELLSPACING=\"0\">\n");
        let _ = writeln!(out, "<TR><TD BGCOLOR=\"{}\">Class</TD></TR>", self.palette.class_color);
        let _ = writeln!(out, "<TR><TD BGCOLOR=\"{}\">Method</TD></TR>", self.palette.method_color);
        out.push_str("</TABLE>>, shape=plaintext]\n");
        out.push_str("}\n");
    }
}

/// Quote an identifier for DOT
fn quote(name: &str) -> String {
    let escaped = name.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", escaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn sample_graph() -> CallGraph {
        let mut graph = CallGraph::new();
        graph.add_edge("main", "Engine").unwrap();
        graph.add_edge("main", "run").unwrap();
        graph.add_edge("run", "run").unwrap();
        graph
    }

    fn statement_lines(dot: &str, marker: &str) -> HashSet<String> {
        dot.lines().filter(|l| l.contains(marker)).map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_header_and_footer() {
        let dot = DotSerializer::default().to_dot(&sample_graph());
        assert!(dot.starts_with("digraph CallGraph {\nnode [shape=rectangle, style=filled];\n"));
        assert!(dot.ends_with("}\n}\n"));
    }

    #[test]
    fn test_one_statement_per_edge() {
        let dot = DotSerializer::default().to_dot(&sample_graph());
        let expected: HashSet<String> = [
            "\"main\" -> \"Engine\";",
            "\"main\" -> \"run\";",
            "\"run\" -> \"run\";",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        assert_eq!(statement_lines(&dot, " -> "), expected);
    }

    #[test]
    fn test_node_colors_follow_classification() {
        let dot = DotSerializer::default().to_dot(&sample_graph());
        let expected: HashSet<String> = [
            "\"main\" [fillcolor=lightgreen, style=filled];",
            "\"Engine\" [fillcolor=lightblue, style=filled];",
            "\"run\" [fillcolor=lightgreen, style=filled];",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        assert_eq!(statement_lines(&dot, "[fillcolor="), expected);
    }

    #[test]
    fn test_legend_uses_palette() {
        let serializer = DotSerializer::new(Palette {
            class_color: "orange".to_string(),
            method_color: "gray".to_string(),
        });
        let dot = serializer.to_dot(&CallGraph::new());
        assert!(dot.contains("subgraph cluster_legend {"));
        assert!(dot.contains("<TR><TD BGCOLOR=\"orange\">Class</TD></TR>"));
        assert!(dot.contains("<TR><TD BGCOLOR=\"gray\">Method</TD></TR>"));
        assert!(!dot.contains(" -> "));
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("a\"b"), "\"a\\\"b\"");
    }

    #[test]
    fn test_write_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resources/graphs/callgraph.dot");
        let written = DotSerializer::default().write(&sample_graph(), &path).unwrap();

        assert_eq!(written, path);
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"main\" -> \"run\";"));
    }
}
