//! Error types for the polymc CLI.

use thiserror::Error;

/// Result alias used across the CLI.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Invalid command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Polygon or region construction error
    #[error("Geometry error: {0}")]
    Geometry(#[from] estimator_core::types::GeometryError),

    /// Run configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] estimator_engine::error::ConfigError),

    /// Engine execution error
    #[error("Engine error: {0}")]
    Engine(#[from] estimator_engine::error::EngineError),

    /// Result serialisation error
    #[error("Serialisation error: {0}")]
    Serialisation(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
