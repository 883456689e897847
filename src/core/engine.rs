// src/core/engine.rs
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::Result;
use super::{
    CallGraph, CallGraphStats, CodeParser, DotRenderer, DotSerializer, GraphRenderer,
    MetricsAggregator, Project, ProjectStatistics, SelectionOptions,
};

/// Files produced by a call graph run
#[derive(Debug, Clone)]
pub struct GraphArtifacts {
    pub dot_path: PathBuf,
    /// `None` when rendering failed
    pub image_path: Option<PathBuf>,
    pub render_error: Option<String>,
    pub stats: CallGraphStats,
}

/// Main orchestration engine: one configuration, passed explicitly to every step
pub struct Engine {
    config: Config,
    parser: CodeParser,
    serializer: DotSerializer,
    renderer: Box<dyn GraphRenderer>,
}

impl Engine {
    /// Create a new engine, loading configuration from `config_path` or the usual locations
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let config = Config::load_or_default(config_path)?;
        debug!("Loaded configuration: {:?}", config);
        Self::with_config(config)
    }

    pub fn with_config(config: Config) -> Result<Self> {
        let parser = CodeParser::new(&config.project, &config.parsing)?;
        let serializer = DotSerializer::from_config(&config.graph);
        let renderer = Box::new(DotRenderer::from_config(&config.graph));

        Ok(Self {
            config,
            parser,
            serializer,
            renderer,
        })
    }

    /// Replace the image renderer
    pub fn with_renderer(mut self, renderer: Box<dyn GraphRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Validate a project root against the configured layout
    pub fn open_project<P: AsRef<Path>>(&self, root: P) -> Result<Project> {
        let project = Project::open(root, &self.config.project)?;
        info!("Selected project: {}", project.root().display());
        Ok(project)
    }

    /// Outlier selection parameters from configuration
    pub fn selection_options(&self) -> SelectionOptions {
        SelectionOptions {
            percent: self.config.metrics.top_percent,
            threshold: self.config.metrics.method_threshold,
        }
    }

    /// Fold every source file of the project into structural metrics
    pub fn statistics(&mut self, project: &Project, options: SelectionOptions) -> Result<ProjectStatistics> {
        info!("Computing statistics for {}", project.source_dir().display());

        let mut aggregator = MetricsAggregator::new();
        let summary = self.parser.for_each_unit(project.source_dir(), |unit| {
            aggregator.accumulate(unit);
            Ok(())
        })?;

        let stats = aggregator.finalize(options)?;
        info!(
            "Analyzed {} files: {} classes, {} methods",
            summary.parsed,
            stats.class_count(),
            stats.method_count()
        );
        if stats.class_count() == 0 {
            warn!("No classes found under {}", project.source_dir().display());
        }

        Ok(stats)
    }

    /// Fold every (declaration, invocation) pair of the project into a call graph
    pub fn build_call_graph(&mut self, project: &Project) -> Result<CallGraph> {
        info!("Building call graph for {}", project.source_dir().display());

        let mut graph = CallGraph::new();
        let summary = self.parser.for_each_unit(project.source_dir(), |unit| {
            graph.add_unit(unit)?;
            Ok(())
        })?;

        info!("Found {} call edges in {} files", graph.edge_count(), summary.parsed);
        Ok(graph)
    }

    /// Build, serialize and render the call graph.
    ///
    /// A rendering failure is logged and reported in the artifacts; the DOT
    /// description is already on disk at that point.
    pub async fn generate_call_graph(&mut self, project: &Project) -> Result<GraphArtifacts> {
        let graph = self.build_call_graph(project)?;
        let dot_path = self.serializer.write(&graph, &self.config.graph.dot_path())?;
        let image_path = self.config.graph.image_path();

        info!("Rendering with {}", self.renderer.renderer_name());
        let (image_path, render_error) = match self.renderer.render(&dot_path, &image_path).await {
            Ok(()) => {
                info!("Call graph generated: {}", image_path.display());
                (Some(image_path), None)
            }
            Err(e) => {
                warn!("Failed to render call graph image: {}", e);
                (None, Some(e.to_string()))
            }
        };

        Ok(GraphArtifacts {
            dot_path,
            image_path,
            render_error,
            stats: graph.get_statistics(),
        })
    }
}
