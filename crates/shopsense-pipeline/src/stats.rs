//! Run statistics and reporting

use serde::Serialize;
use shopsense_domain::ClassificationKind;
use std::collections::HashMap;
use uuid::Uuid;

/// A session the pipeline failed to process.
#[derive(Debug, Clone, Serialize)]
pub struct SessionFailure {
    /// Session identifier
    pub session_id: String,
    /// Error text
    pub error: String,
}

/// Counters accumulated across one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    /// Run identifier
    pub run_id: Uuid,

    /// Sessions processed to completion
    pub sessions_processed: usize,

    /// Sessions that failed, with their errors
    pub failures: Vec<SessionFailure>,

    /// Interaction records seen across all sessions
    pub interactions_seen: usize,

    /// Interaction records dropped as unparsable
    pub interactions_dropped: usize,

    /// Classification outcomes per kind
    pub classifications: HashMap<ClassificationKind, usize>,

    /// New domain records created
    pub domains_created: usize,

    /// New category records created
    pub categories_created: usize,

    /// Product records created or enriched
    pub products_upserted: usize,

    /// Entities skipped for falling below a confidence floor
    pub low_confidence_skips: usize,

    /// Wall-clock runtime in milliseconds
    pub runtime_ms: u128,
}

impl Default for RunStats {
    fn default() -> Self {
        Self {
            run_id: Uuid::now_v7(),
            sessions_processed: 0,
            failures: Vec::new(),
            interactions_seen: 0,
            interactions_dropped: 0,
            classifications: HashMap::new(),
            domains_created: 0,
            categories_created: 0,
            products_upserted: 0,
            low_confidence_skips: 0,
            runtime_ms: 0,
        }
    }
}

impl RunStats {
    /// Create new empty stats with a fresh run id.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one classification outcome.
    pub fn record_classification(&mut self, kind: ClassificationKind) {
        *self.classifications.entry(kind).or_insert(0) += 1;
    }

    /// Record a failed session.
    pub fn record_failure(&mut self, session_id: &str, error: &str) {
        self.failures.push(SessionFailure {
            session_id: session_id.to_string(),
            error: error.to_string(),
        });
    }

    /// Count of classifications of one kind.
    pub fn classified(&self, kind: ClassificationKind) -> usize {
        self.classifications.get(&kind).copied().unwrap_or(0)
    }

    /// Human-readable run summary.
    pub fn summary(&self) -> String {
        format!(
            "run {}: {} sessions ({} failed), {} interactions ({} dropped), \
             {} domains, {} categories, {} product upserts, {} low-confidence skips, {}ms",
            self.run_id,
            self.sessions_processed,
            self.failures.len(),
            self.interactions_seen,
            self.interactions_dropped,
            self.domains_created,
            self.categories_created,
            self.products_upserted,
            self.low_confidence_skips,
            self.runtime_ms,
        )
    }
}
