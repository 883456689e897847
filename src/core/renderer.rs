// src/core/renderer.rs
use std::path::{Path, PathBuf};
use std::process::Stdio;
use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::config::GraphConfig;
use crate::error::{JavascopeError, Result};

/// Turns a DOT description into an image
#[async_trait]
pub trait GraphRenderer: Send + Sync {
    /// Render `dot_file` into `image_file`, waiting for completion
    async fn render(&self, dot_file: &Path, image_file: &Path) -> Result<()>;

    /// Get the renderer name
    fn renderer_name(&self) -> &str;
}

/// Runs the Graphviz executable as a subprocess sharing our stdio
#[derive(Debug, Clone)]
pub struct DotRenderer {
    program: String,
    format: String,
}

impl DotRenderer {
    pub fn new(program: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            format: format.into(),
        }
    }

    pub fn from_config(config: &GraphConfig) -> Self {
        Self::new(config.renderer.clone(), config.image_format.clone())
    }
}

#[async_trait]
impl GraphRenderer for DotRenderer {
    async fn render(&self, dot_file: &Path, image_file: &Path) -> Result<()> {
        let dot_file = absolute(dot_file)?;
        debug!(
            "Running {} -T{} {} -o {}",
            self.program,
            self.format,
            dot_file.display(),
            image_file.display()
        );

        let status = Command::new(&self.program)
            .arg(format!("-T{}", self.format))
            .arg(&dot_file)
            .arg("-o")
            .arg(image_file)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| JavascopeError::Render(format!("failed to run '{}': {}", self.program, e)))?;

        if !status.success() {
            return Err(JavascopeError::Render(format!(
                "'{}' exited with {}",
                self.program, status
            )));
        }

        Ok(())
    }

    fn renderer_name(&self) -> &str {
        &self.program
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
