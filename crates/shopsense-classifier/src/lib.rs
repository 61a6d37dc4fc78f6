//! Shopsense Classifier
//!
//! The per-interaction half of the pipeline: normalization of raw intake
//! records, the heuristic intent classifier, the keyword vocabulary it runs
//! on, URL shape predicates shared across the workspace, and the focused
//! pricing/availability extractor.
//!
//! The classifier prefers to under-classify ambiguous input rather than
//! guess; every decision carries a confidence and a reasoning string.

pub mod config;
pub mod error;
pub mod intent;
pub mod normalizer;
pub mod pricing;
pub mod urls;
pub mod vocabulary;

pub use config::ClassifierConfig;
pub use error::ClassifierError;
pub use intent::IntentClassifier;
pub use normalizer::{normalize_interaction, normalize_payload, NormalizedBatch};
pub use pricing::{PriceInfo, PriceSource, StockStatus};
pub use vocabulary::Vocabulary;
