use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, Mutex};

use assert_fs::prelude::*;
use async_trait::async_trait;
use predicates::prelude::*;

use javascope::config::Config;
use javascope::core::{Engine, GraphRenderer, NodeClass, SelectionOptions};
use javascope::Result;

const ALPHA: &str = r#"package app;

public class Alpha {
    private int count;
    private String label;

    public void m1() {
        m2();
    }

    public void m2() {
        m3();
    }

    public void helper(int x, int y) {
    }
}
"#;

const BETA: &str = r#"package app.util;

class beta {
    int a;
    int b;
    int c;
    int d;
    int e;

    void solo() {
    }
}
"#;

/// Records render requests instead of spawning Graphviz
#[derive(Clone, Default)]
struct RecordingRenderer {
    calls: Arc<Mutex<Vec<(String, String)>>>,
    fail: bool,
}

#[async_trait]
impl GraphRenderer for RecordingRenderer {
    async fn render(&self, dot_file: &Path, image_file: &Path) -> Result<()> {
        self.calls.lock().unwrap().push((
            dot_file.display().to_string(),
            image_file.display().to_string(),
        ));
        if self.fail {
            Err(javascope::JavascopeError::Render("dot exited with 1".to_string()))
        } else {
            Ok(())
        }
    }

    fn renderer_name(&self) -> &str {
        "recording"
    }
}

fn project() -> assert_fs::TempDir {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("src/app/Alpha.java").write_str(ALPHA).unwrap();
    temp.child("src/app/util/beta.java").write_str(BETA).unwrap();
    temp
}

fn engine(output: &assert_fs::TempDir, renderer: RecordingRenderer) -> Engine {
    let mut config = Config::default();
    config.graph.output_dir = output.path().join("resources/graphs");
    Engine::with_config(config).unwrap().with_renderer(Box::new(renderer))
}

#[test]
fn statistics_for_two_classes() {
    let temp = project();
    let output = assert_fs::TempDir::new().unwrap();
    let mut engine = engine(&output, RecordingRenderer::default());
    let project = engine.open_project(temp.path()).unwrap();

    let stats = engine
        .statistics(&project, SelectionOptions { percent: 50.0, threshold: 2 })
        .unwrap();

    assert_eq!(stats.files, 2);
    assert_eq!(stats.totals.classes, 2);
    assert_eq!(stats.totals.methods, 4);
    assert_eq!(stats.totals.package_count(), 2);
    assert_eq!(stats.totals.attributes, 7);
    assert_eq!(stats.totals.max_parameters, 2);
    // end line of each file's last type declaration
    assert_eq!(stats.totals.lines, 17 + 12);

    assert_eq!(stats.averages.methods_per_class, Some(2));
    assert_eq!(stats.averages.attributes_per_class, Some(4));

    assert_eq!(stats.outliers.top_by_attributes, vec!["beta".to_string()]);
    assert_eq!(stats.outliers.top_by_methods, vec!["Alpha".to_string()]);
    assert!(stats.outliers.top_in_both.is_empty());
    assert_eq!(stats.outliers.more_methods_than_threshold, vec!["Alpha".to_string()]);
}

#[test]
fn call_graph_edges_and_nodes() {
    let temp = project();
    let output = assert_fs::TempDir::new().unwrap();
    let mut engine = engine(&output, RecordingRenderer::default());
    let project = engine.open_project(temp.path()).unwrap();

    let graph = engine.build_call_graph(&project).unwrap();

    let edges: HashSet<(String, String)> = graph
        .edges()
        .map(|e| (e.caller.clone(), e.callee.clone()))
        .collect();
    let expected: HashSet<(String, String)> = [("m1", "m2"), ("m2", "m3")]
        .iter()
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .collect();
    assert_eq!(edges, expected);

    let nodes = graph.nodes();
    let names: HashSet<&str> = nodes.iter().map(|n| n.name.as_str()).collect();
    let expected_names: HashSet<&str> = ["m1", "m2", "m3"].into_iter().collect();
    assert_eq!(names, expected_names);
    assert!(nodes.iter().all(|n| n.class == NodeClass::MethodLike));
}

#[test]
fn duplicate_file_adds_no_edges() {
    let temp = project();
    let output = assert_fs::TempDir::new().unwrap();
    let mut engine = engine(&output, RecordingRenderer::default());
    let project = engine.open_project(temp.path()).unwrap();
    let before = engine.build_call_graph(&project).unwrap().edge_count();

    temp.child("src/copy/Alpha.java").write_str(ALPHA).unwrap();
    let after = engine.build_call_graph(&project).unwrap().edge_count();
    assert_eq!(before, after);
}

#[tokio::test]
async fn graph_run_writes_dot_and_renders() {
    let temp = project();
    let output = assert_fs::TempDir::new().unwrap();
    let renderer = RecordingRenderer::default();
    let mut engine = engine(&output, renderer.clone());
    let project = engine.open_project(temp.path()).unwrap();

    let artifacts = engine.generate_call_graph(&project).await.unwrap();

    let dot = output.child("resources/graphs/callgraph.dot");
    dot.assert(predicate::path::exists());
    dot.assert(predicate::str::starts_with("digraph CallGraph {"));
    dot.assert(predicate::str::contains("\"m1\" -> \"m2\";"));
    dot.assert(predicate::str::contains("\"m3\" [fillcolor=lightgreen, style=filled];"));
    dot.assert(predicate::str::contains("subgraph cluster_legend"));

    assert_eq!(artifacts.stats.total_calls, 2);
    assert_eq!(artifacts.image_path, Some(output.path().join("resources/graphs/callgraph.png")));

    let calls = renderer.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].0.ends_with("callgraph.dot"));
}

#[tokio::test]
async fn render_failure_keeps_description() {
    let temp = project();
    let output = assert_fs::TempDir::new().unwrap();
    let renderer = RecordingRenderer {
        fail: true,
        ..RecordingRenderer::default()
    };
    let mut engine = engine(&output, renderer);
    let project = engine.open_project(temp.path()).unwrap();

    let artifacts = engine.generate_call_graph(&project).await.unwrap();

    assert!(artifacts.image_path.is_none());
    assert!(artifacts.render_error.unwrap().contains("exited with 1"));
    output
        .child("resources/graphs/callgraph.dot")
        .assert(predicate::str::contains("\"m2\" -> \"m3\";"));
}

#[test]
fn malformed_source_fails_the_run() {
    let temp = project();
    temp.child("src/Broken.java").write_str("class Broken { void f( }").unwrap();
    let output = assert_fs::TempDir::new().unwrap();
    let mut engine = engine(&output, RecordingRenderer::default());
    let project = engine.open_project(temp.path()).unwrap();

    let err = engine.build_call_graph(&project).unwrap_err();
    assert!(err.to_string().contains("Broken.java"));
}

#[test]
fn project_without_sources_is_rejected() {
    let temp = assert_fs::TempDir::new().unwrap();
    let output = assert_fs::TempDir::new().unwrap();
    let engine = engine(&output, RecordingRenderer::default());

    assert!(engine.open_project(temp.path()).is_err());
}

#[test]
fn empty_project_has_undefined_averages() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("src").create_dir_all().unwrap();
    let output = assert_fs::TempDir::new().unwrap();
    let mut engine = engine(&output, RecordingRenderer::default());
    let project = engine.open_project(temp.path()).unwrap();

    let stats = engine
        .statistics(&project, SelectionOptions { percent: 10.0, threshold: 10 })
        .unwrap();
    assert_eq!(stats.totals.classes, 0);
    assert!(stats.totals.average_methods_per_class().is_err());
    assert_eq!(stats.averages.methods_per_class, None);
    assert_eq!(stats.averages.lines_per_method, None);
}
