/*!
 * Error types for the docfill application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 *
 * Conditions that the substitution engine tolerates (unresolved placeholders,
 * paragraphs without runs, rejected cosmetic style edits) have no fatal variant.
 */

use thiserror::Error;

/// Errors raised by a run's style when a cosmetic edit is requested
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StyleError {
    /// The style is locked (theme-linked or protected) and cannot be edited
    #[error("Style is locked and cannot be modified")]
    Locked,

    /// The style system does not support the requested change
    #[error("Unsupported style change: {0}")]
    Unsupported(String),
}

/// Errors that can occur when loading or saving documents
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Error reading or writing the document file
    #[error("Document I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document tree could not be decoded or encoded
    #[error("Failed to parse document: {0}")]
    Parse(#[from] serde_json::Error),

    /// The file is not a supported document template
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),
}

/// Errors found while validating the configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A configuration value is invalid
    #[error("Invalid configuration value for '{field}': {message}")]
    InvalidValue {
        /// Name of the offending field
        field: String,
        /// Why the value was rejected
        message: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from document loading or saving
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Error from configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
