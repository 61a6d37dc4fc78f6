//! Shopsense Pipeline
//!
//! End-to-end orchestration: session intake, interaction normalization,
//! heuristic classification, entity extraction, persistence, and the
//! per-session navigation and flow summaries.
//!
//! # Architecture
//!
//! The pipeline is generic over [`shopsense_domain::WorldModelRepository`],
//! so storage backends plug in at the seam. Sessions are independent: a
//! failed session is recorded in the run stats and never aborts the batch.

#![warn(missing_docs)]

pub mod error;
pub mod pipeline;
pub mod session;
pub mod site;
pub mod stats;

pub use error::PipelineError;
pub use pipeline::{Pipeline, SessionOutcome};
pub use session::SessionRecord;
pub use site::SiteExtractor;
pub use stats::{RunStats, SessionFailure};
