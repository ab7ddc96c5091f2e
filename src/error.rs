//! Error types for the tmb-calc library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the library.
#[derive(Error, Debug)]
pub enum TmbError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Missing required column '{column}' in {context}")]
    MissingColumn { column: String, context: String },

    #[error("Malformed region at {}:{line}: {reason}", .path.display())]
    MalformedRegion {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("Malformed driver annotation '{value}' in column '{column}' at line {line}: {reason}")]
    MalformedDriverField {
        column: String,
        line: usize,
        value: String,
        reason: String,
    },

    #[error("Malformed frequency '{value}' in column '{column}' at line {line}")]
    MalformedFrequency {
        column: String,
        line: usize,
        value: String,
    },

    #[error("Region footprint is zero; cannot normalize mutation count")]
    DivisionByZeroFootprint,

    #[error("Unknown annotation database '{0}'")]
    UnknownDatabase(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, TmbError>;
