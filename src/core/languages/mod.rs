//! Language-specific parsers
//!
//! Each language lowers its concrete syntax tree into the shared
//! [`SourceUnit`] representation consumed by the analysis engine.

mod java;

pub use java::JavaParser;

use crate::error::Result;
use super::SourceUnit;

/// Trait that all language parsers must implement
pub trait LanguageParser {
    /// Parse source code into a syntax tree, failing on malformed input
    fn parse(&mut self, content: &str, file_path: &std::path::Path) -> Result<SourceUnit>;

    /// Get the language name
    fn language_name(&self) -> &str;
}
