//! Error types for the identshrink library.
//!
//! Every failure of a rename run is terminal: the pass either produces a fully
//! renamed program or one of these errors, never a partially edited result.

use std::io;

use thiserror::Error;

use crate::rename::symbol::TextSpan;

/// Main result type for identshrink operations.
pub type Result<T> = std::result::Result<T, RenameError>;

/// Error type for all identshrink operations.
#[derive(Error, Debug)]
pub enum RenameError {
    /// A traversed declaration node has no resolvable symbol
    #[error("No declared symbol for {node} in {document}")]
    NoSymbol {
        /// Description of the syntax node (id and kind)
        node: String,
        /// Name of the document containing the node
        document: String,
    },

    /// Two or more distinct names were proposed for the same source location
    #[error(
        "{document}:{span} conflicts: '{original_text}' renamed to {}",
        .candidates.join(" and ")
    )]
    RenameConflict {
        /// Name of the document containing the location
        document: String,
        /// Span of the contested text
        span: TextSpan,
        /// Text currently at the span
        original_text: String,
        /// Every distinct name proposed for the span
        candidates: Vec<String>,
    },

    /// Two accepted edits in one document touch the same bytes
    #[error("{document}: edits at {first} and {second} overlap")]
    OverlappingEdits {
        /// Name of the document
        document: String,
        /// Span of the earlier edit
        first: TextSpan,
        /// Span of the later edit
        second: TextSpan,
    },

    /// A location or node referred to a document the program does not contain
    #[error("Unknown document: {document}")]
    UnknownDocument {
        /// Document identifier as reported by the semantic service
        document: String,
    },

    /// I/O related errors
    #[error("I/O error: {message}")]
    Io {
        /// Human-readable error message
        message: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error description
        message: String,
        /// Configuration field that caused the error
        field: Option<String>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error description
        message: String,
        /// Data format being processed
        data_type: Option<String>,
        /// Underlying serialization error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors for input data
    #[error("Validation error: {message}")]
    Validation {
        /// Error description
        message: String,
        /// Field or input that failed validation
        field: Option<String>,
    },

    /// A rename task panicked or was cancelled
    #[error("Concurrency error: {message}")]
    Concurrency {
        /// Error description
        message: String,
    },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal {
        /// Error description
        message: String,
    },
}

impl RenameError {
    /// Create a new I/O error with context
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: None,
        }
    }

    /// Create a new configuration error with field context
    pub fn config_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Create a new validation error naming the offending field
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a missing-symbol error
    pub fn no_symbol(node: impl Into<String>, document: impl Into<String>) -> Self {
        Self::NoSymbol {
            node: node.into(),
            document: document.into(),
        }
    }

    /// Create an unknown-document error
    pub fn unknown_document(document: impl ToString) -> Self {
        Self::UnknownDocument {
            document: document.to_string(),
        }
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// True for the two run-fatal kinds raised by the renamer itself.
    pub fn is_rename_failure(&self) -> bool {
        matches!(
            self,
            Self::NoSymbol { .. } | Self::RenameConflict { .. } | Self::OverlappingEdits { .. }
        )
    }
}

impl From<io::Error> for RenameError {
    fn from(err: io::Error) -> Self {
        Self::io("I/O operation failed", err)
    }
}

impl From<serde_json::Error> for RenameError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: format!("JSON serialization failed: {err}"),
            data_type: Some("JSON".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_yaml::Error> for RenameError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization {
            message: format!("YAML serialization failed: {err}"),
            data_type: Some("YAML".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<tokio::task::JoinError> for RenameError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Concurrency {
            message: format!("rename task failed: {err}"),
        }
    }
}
