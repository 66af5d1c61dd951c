//! Error types and handling for plugpack
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`config`]: Configuration and rule errors, raised before any I/O
//! - [`source`]: Errors reading content sources and dependency artifacts
//! - [`archive`]: Errors producing the intermediate and final archives

pub mod archive;
pub mod config;
pub mod source;

use miette::Diagnostic;
use thiserror::Error;

use crate::assembler::Phase;

/// Main error type for plugpack operations
#[derive(Error, Diagnostic, Debug)]
pub enum PackagerError {
    // Configuration errors
    #[error("Invalid selector '{selector}': {reason}")]
    #[diagnostic(
        code(plugpack::config::invalid_selector),
        help("Selector components are either a literal value or exactly '*'")
    )]
    InvalidSelector { selector: String, reason: String },

    #[error("Conflicting options: {message}")]
    #[diagnostic(code(plugpack::config::conflicting_options))]
    ConflictingOptions { message: String },

    #[error("Configuration file not found: {path}")]
    #[diagnostic(
        code(plugpack::config::not_found),
        help("Create a plugpack.yaml in the project directory or pass --config")
    )]
    ConfigNotFound { path: String },

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(plugpack::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(plugpack::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(plugpack::config::invalid))]
    ConfigInvalid { message: String },

    // Source errors
    #[error("Failed to read content source: {path}: {reason}")]
    #[diagnostic(code(plugpack::source::read_failed))]
    SourceReadFailed { path: String, reason: String },

    #[error("Failed to read artifact {artifact} at {path}: {reason}")]
    #[diagnostic(
        code(plugpack::source::artifact_read_failed),
        help("Dependency artifacts must be resolved to readable files before packaging")
    )]
    ArtifactReadFailed {
        artifact: String,
        path: String,
        reason: String,
    },

    // Archive errors
    #[error("Cannot create project jar at {path}: {reason}")]
    #[diagnostic(code(plugpack::archive::intermediate_failed))]
    IntermediateArchiveFailed { path: String, reason: String },

    #[error("Cannot create archive at {path}: {reason}")]
    #[diagnostic(code(plugpack::archive::final_failed))]
    FinalArchiveFailed { path: String, reason: String },

    #[error("Failed to write assembly report: {path}: {reason}")]
    #[diagnostic(code(plugpack::archive::report_failed))]
    ReportWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(plugpack::fs::io_error))]
    IoError { message: String },
}

impl PackagerError {
    /// Pipeline phase the error was raised in, if it belongs to one
    pub fn phase(&self) -> Option<Phase> {
        match self {
            Self::InvalidSelector { .. }
            | Self::ConflictingOptions { .. }
            | Self::ConfigNotFound { .. }
            | Self::ConfigReadFailed { .. }
            | Self::ConfigParseFailed { .. }
            | Self::ConfigInvalid { .. } => Some(Phase::Configuration),
            Self::SourceReadFailed { .. } | Self::ArtifactReadFailed { .. } => Some(Phase::Merge),
            Self::IntermediateArchiveFailed { .. } => Some(Phase::IntermediateArchive),
            Self::FinalArchiveFailed { .. } => Some(Phase::FinalArchive),
            Self::ReportWriteFailed { .. } | Self::IoError { .. } => None,
        }
    }
}

impl From<std::io::Error> for PackagerError {
    fn from(err: std::io::Error) -> Self {
        PackagerError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for PackagerError {
    fn from(err: serde_yaml::Error) -> Self {
        PackagerError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for PackagerError {
    fn from(err: serde_json::Error) -> Self {
        PackagerError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, PackagerError>;
