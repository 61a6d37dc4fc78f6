//! Error types for the classifier

use thiserror::Error;

/// Errors that can occur during classification setup
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Vocabulary table error
    #[error("Vocabulary error: {0}")]
    Vocabulary(String),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(String),
}
