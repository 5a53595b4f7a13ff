//! Error types for syntax tree operations

use crate::node::NodeKind;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Loyc tree operations
#[derive(Debug, Error)]
pub enum LoycError {
    /// A mutation was requested that the node kind does not support,
    /// e.g. changing the literal value of an identifier
    #[error("Invalid operation: cannot {operation} on {kind} node")]
    InvalidOperation {
        operation: &'static str,
        kind: NodeKind,
    },

    /// An attribute or argument list was built from an absent element
    #[error("Absent element at index {index} of {list} list")]
    AbsentElement { list: &'static str, index: usize },

    /// Indexed child access outside of `[min, max]`
    #[error("Child index {index} is outside of [{min}, {max}]")]
    IndexOutOfRange { index: i32, min: i32, max: i32 },

    /// A pattern uses a feature the matcher does not implement
    #[error("Unsupported pattern: {message}")]
    UnsupportedPattern { message: String },

    /// A template refers to a capture that was never bound
    #[error("Unbound capture: ${name}")]
    UnboundCapture { name: String },

    /// The rewrite engine ran out of its expansion budget
    #[error("Expansion limit of {limit} rewrites exceeded")]
    ExpansionLimit { limit: usize },

    /// Configuration loading or validation errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// File system I/O errors
    #[error("IO error for path '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidOperation,
    ContractViolation,
    Pattern,
    Rewrite,
    Config,
    Io,
}

impl LoycError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            LoycError::InvalidOperation { .. } => ErrorKind::InvalidOperation,
            LoycError::AbsentElement { .. } | LoycError::IndexOutOfRange { .. } => {
                ErrorKind::ContractViolation
            }
            LoycError::UnsupportedPattern { .. } => ErrorKind::Pattern,
            LoycError::UnboundCapture { .. } | LoycError::ExpansionLimit { .. } => {
                ErrorKind::Rewrite
            }
            LoycError::ConfigError { .. } => ErrorKind::Config,
            LoycError::IoError { .. } => ErrorKind::Io,
        }
    }

    /// Check if this error is recoverable (the caller can skip the offending
    /// node or rule and keep going)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, LoycError::UnboundCapture { .. })
    }

    /// Create an invalid operation error
    pub fn invalid_operation(operation: &'static str, kind: NodeKind) -> Self {
        Self::InvalidOperation { operation, kind }
    }

    /// Create an unsupported pattern error
    pub fn unsupported_pattern(message: impl Into<String>) -> Self {
        Self::UnsupportedPattern {
            message: message.into(),
        }
    }

    /// Create an unbound capture error
    pub fn unbound_capture(name: impl Into<String>) -> Self {
        Self::UnboundCapture { name: name.into() }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for LoycError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError {
            path: PathBuf::new(),
            source: err,
        }
    }
}
