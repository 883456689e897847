use thiserror::Error;

/// Main error type for Javascope operations
#[derive(Error, Debug)]
pub enum JavascopeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parser error: {0}")]
    Parser(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("File system error: {0}")]
    FileSystem(String),

    #[error("Invalid project: {0}")]
    InvalidProject(String),

    #[error("Call graph error: {0}")]
    Graph(String),

    #[error(transparent)]
    Metrics(#[from] MetricsError),

    #[error("Render error: {0}")]
    Render(String),
}

/// Failures of the metric arithmetic and outlier selection
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricsError {
    #[error("cannot compute {0}: divide by zero")]
    DivideByZero(&'static str),

    #[error("percentage must be within 0..=100, got {0}")]
    InvalidPercentage(f64),
}

pub type Result<T> = std::result::Result<T, JavascopeError>;
