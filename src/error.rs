//! Error types for stratus.
//!
//! All errors use `thiserror` for ergonomic error handling and proper error chains.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for stratus operations.
pub type Result<T> = std::result::Result<T, StratusError>;

/// Main error type for stratus.
#[derive(Error, Debug)]
pub enum StratusError {
    // Network lookup errors
    #[error("VPC {vpc_id} not found in region {region}")]
    VpcNotFound { vpc_id: String, region: String },

    // Image asset errors
    #[error("Build context not found: {path:?}. {hint}")]
    BuildContextMissing { path: PathBuf, hint: String },

    #[error("Image asset build failed: {reason}")]
    BuildFailed { reason: String },

    // Stackfile errors
    #[error("Stackfile parse error: {reason}")]
    StackfileParseError { reason: String },

    #[error("Unsupported stackfile version: {version}")]
    UnsupportedStackfileVersion { version: String },

    #[error("File read error: {path}: {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // Template errors
    #[error("Resource {resource} references {target}, which does not exist in the template")]
    DanglingReference { resource: String, target: String },

    #[error("Circular dependency detected at resource: {resource}")]
    CircularDependency { resource: String },

    #[error("Template serialization failed: {reason}")]
    TemplateSerialization { reason: String },

    // Configuration errors
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    // File system errors
    #[error("I/O error at {path:?}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StratusError {
    /// Create an InvalidConfig error from any error type.
    pub fn invalid_config(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidConfig { reason: err.to_string() }
    }
}
