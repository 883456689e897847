use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::{ParsingConfig, ProjectConfig};
use crate::error::{JavascopeError, Result};
use super::languages::{JavaParser, LanguageParser};
use super::SourceUnit;

/// Outcome of a pass over a source directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseSummary {
    /// Files parsed and handed to the consumer
    pub parsed: usize,

    /// Files skipped because parsing failed and `fail_fast` is off
    pub skipped: Vec<PathBuf>,
}

/// Discovers source files and parses them one at a time
pub struct CodeParser {
    file_marker: String,
    config: ParsingConfig,
    language_parser: Box<dyn LanguageParser>,
}

impl CodeParser {
    pub fn new(project: &ProjectConfig, config: &ParsingConfig) -> Result<Self> {
        Ok(Self {
            file_marker: project.file_marker.clone(),
            config: config.clone(),
            language_parser: Box::new(JavaParser::new()?),
        })
    }

    /// Recursively list the files under `dir` whose name contains the file marker,
    /// sorted by path so every run processes them in the same order
    pub fn discover_sources<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<PathBuf>> {
        let mut sources = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).sort_by_file_name() {
            let entry = entry.map_err(|e| JavascopeError::FileSystem(e.to_string()))?;
            if entry.file_type().is_file() && self.should_parse_file(entry.path()) {
                sources.push(entry.into_path());
            }
        }

        sources.sort();
        debug!("Discovered {} source files under {}", sources.len(), dir.as_ref().display());
        Ok(sources)
    }

    /// Parse a single source file
    pub fn parse_file<P: AsRef<Path>>(&mut self, file_path: P) -> Result<SourceUnit> {
        let path = file_path.as_ref();

        let bytes = std::fs::read(path)?;
        if bytes.len() > self.config.max_file_size {
            return Err(JavascopeError::Parser(
                format!("File {} exceeds maximum size limit", path.display())
            ));
        }

        let source_content = String::from_utf8(bytes).map_err(|e| {
            JavascopeError::Parser(format!("File {} is not valid UTF-8: {}", path.display(), e))
        })?;

        self.language_parser.parse(&source_content, path)
    }

    /// Parse every discovered file under `dir` and hand each unit to `consume`.
    ///
    /// Units are dropped right after `consume` returns. A failing file aborts
    /// the pass unless `fail_fast` is disabled, in which case it is skipped.
    pub fn for_each_unit<P, F>(&mut self, dir: P, mut consume: F) -> Result<ParseSummary>
    where
        P: AsRef<Path>,
        F: FnMut(&SourceUnit) -> Result<()>,
    {
        let mut summary = ParseSummary::default();

        for path in self.discover_sources(dir)? {
            let unit = match self.parse_file(&path) {
                Ok(unit) => unit,
                Err(e) if !self.config.fail_fast => {
                    warn!("Skipping {}: {}", path.display(), e);
                    summary.skipped.push(path);
                    continue;
                }
                Err(e) => return Err(e),
            };

            debug!("Parsed {} as {}", path.display(), self.language_parser.language_name());
            consume(&unit)?;
            summary.parsed += 1;
        }

        Ok(summary)
    }

    /// Determine if a file should be parsed based on its name
    fn should_parse_file(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| name.to_string_lossy().contains(self.file_marker.as_str()))
            .unwrap_or(false)
    }
}
