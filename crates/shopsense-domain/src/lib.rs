//! Shopsense Domain Layer
//!
//! Core data model for the world-model extraction pipeline: interaction
//! records as they arrive from session intake, the classification sum type
//! produced by the heuristic engine, the extracted entity records that get
//! persisted, and the repository trait at the storage seam.
//!
//! ## Key Concepts
//!
//! - **Interaction**: one recorded user action (click/input/...) with page
//!   and element context
//! - **Classification**: a tagged variant over category / product /
//!   product attribute / ui / ignore, each with a confidence and reasoning
//! - **Extracted entities**: deduplicated domain, category, and product
//!   records derived from many per-event observations
//! - **Confidence floors**: minimum confidence required before an entity
//!   is persisted
//!
//! ## Architecture
//!
//! This crate carries no pipeline logic. The classifier, aggregators, and
//! analyzers live in sibling crates and depend on these types; storage
//! implementations plug in through [`traits::WorldModelRepository`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod classification;
pub mod confidence;
pub mod entity;
pub mod interaction;
pub mod traits;

// Re-exports for convenience
pub use classification::{AttributeObservation, Classification, ClassificationKind};
pub use confidence::ConfidenceFloors;
pub use entity::{
    ExtractedCategory, ExtractedDomain, ExtractedProduct, ProductVariants, UrlPatterns,
};
pub use interaction::{
    ElementInfo, InteractionMetadata, PageContext, PageSnapshot, PageState, ParsedInteraction,
    RawElement, RawInteraction, Selectors, SessionContext,
};
pub use traits::WorldModelRepository;
