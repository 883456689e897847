use std::path::{Path, PathBuf};
use serde::Serialize;

use crate::config::ProjectConfig;
use crate::error::{JavascopeError, Result};

/// A validated project selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    root: PathBuf,
    source_dir: PathBuf,
}

impl Project {
    /// Validate that `root` holds the conventional source directory
    pub fn open<P: AsRef<Path>>(root: P, config: &ProjectConfig) -> Result<Self> {
        let root = root.as_ref();
        let source_dir = root.join(&config.source_subdir);

        if !source_dir.is_dir() {
            return Err(JavascopeError::InvalidProject(format!(
                "{} is not a Java project ('{}' directory not found)",
                root.display(),
                config.source_subdir.display()
            )));
        }

        Ok(Self {
            root: root.to_path_buf(),
            source_dir,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory the analysis walks
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_requires_source_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = Project::open(dir.path(), &ProjectConfig::default()).unwrap_err();
        assert!(matches!(err, JavascopeError::InvalidProject(_)));

        std::fs::create_dir(dir.path().join("src")).unwrap();
        let project = Project::open(dir.path(), &ProjectConfig::default()).unwrap();
        assert_eq!(project.source_dir(), dir.path().join("src"));
        assert_eq!(project.root(), dir.path());
    }

    #[test]
    fn test_source_file_is_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("src"), "").unwrap();
        assert!(Project::open(dir.path(), &ProjectConfig::default()).is_err());
    }
}
