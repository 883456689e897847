use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{JavascopeError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Project layout
    pub project: ProjectConfig,

    /// Source code parsing configuration
    pub parsing: ParsingConfig,

    /// Outlier selection settings
    pub metrics: MetricsConfig,

    /// Call graph output settings
    pub graph: GraphConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Conventional source directory that must exist under a project root
    pub source_subdir: PathBuf,

    /// Files whose name contains this marker are analyzed
    pub file_marker: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingConfig {
    /// Maximum file size to parse (in bytes)
    pub max_file_size: usize,

    /// Abort the whole run on the first unreadable or malformed file
    pub fail_fast: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Share of classes reported as outliers, in percent
    pub top_percent: f64,

    /// Classes with strictly more methods than this are reported
    pub method_threshold: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Directory receiving the DOT description and the rendered image
    pub output_dir: PathBuf,

    /// File name of the DOT description
    pub dot_file: String,

    /// File name of the rendered image
    pub image_file: String,

    /// Graphviz executable used for rendering
    pub renderer: String,

    /// Output format passed to the renderer as `-T<format>`
    pub image_format: String,

    /// Fill color of class-like nodes
    pub class_color: String,

    /// Fill color of method-like nodes
    pub method_color: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            source_subdir: PathBuf::from("src"),
            file_marker: ".java".to_string(),
        }
    }
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            max_file_size: 1024 * 1024, // 1MB
            fail_fast: true,
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            top_percent: 10.0,
            method_threshold: 10,
        }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("resources/graphs"),
            dot_file: "callgraph.dot".to_string(),
            image_file: "callgraph.png".to_string(),
            renderer: "dot".to_string(),
            image_format: "png".to_string(),
            class_color: "lightblue".to_string(),
            method_color: "lightgreen".to_string(),
        }
    }
}

impl GraphConfig {
    pub fn dot_path(&self) -> PathBuf {
        self.output_dir.join(&self.dot_file)
    }

    pub fn image_path(&self) -> PathBuf {
        self.output_dir.join(&self.image_file)
    }
}

impl Config {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| JavascopeError::Config(e.to_string()))?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| JavascopeError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration with fallback to default
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(p) => {
                if p.as_ref().exists() {
                    Self::load(p)
                } else {
                    Ok(Self::default())
                }
            }
            None => {
                let candidates = [
                    "Javascope.toml",
                    "javascope.toml",
                    ".javascope.toml",
                ];

                for candidate in &candidates {
                    if Path::new(candidate).exists() {
                        return Self::load(candidate);
                    }
                }

                Ok(Self::default())
            }
        }
    }
}
