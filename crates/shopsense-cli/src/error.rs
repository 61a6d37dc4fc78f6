//! CLI error types.

use thiserror::Error;

/// Errors surfaced by CLI commands.
#[derive(Error, Debug)]
pub enum CliError {
    /// Failed to read an input or write an output file
    #[error("IO error on {path}: {source}")]
    Io {
        /// The offending path
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A session file did not parse as JSON
    #[error("Failed to parse {path}: {source}")]
    Parse {
        /// The offending path
        path: String,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// Classifier vocabulary or configuration error
    #[error(transparent)]
    Classifier(#[from] shopsense_classifier::ClassifierError),

    /// Serialization of the report failed
    #[error("Failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
