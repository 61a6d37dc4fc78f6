//! Error types for the pipeline

use shopsense_classifier::ClassifierError;
use thiserror::Error;

/// Errors that can occur while running the extraction pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The session payload could not be interpreted at all
    #[error("Invalid session payload: {0}")]
    Payload(String),

    /// Classifier configuration or vocabulary error
    #[error("Classifier error: {0}")]
    Classifier(#[from] ClassifierError),

    /// Repository operation failed
    #[error("Storage error: {0}")]
    Storage(String),
}
