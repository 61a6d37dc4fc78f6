//! Session intake records

use serde::{Deserialize, Serialize};
use shopsense_domain::SessionContext;

/// One captured shopping session as handed to the pipeline.
///
/// `enhanced_interactions` is kept as raw JSON: capture tooling emits it
/// either as an array or as an object with numeric string keys, and the
/// normalizer sorts that out per record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// Session identifier from the capture layer
    pub session_id: String,

    /// Raw interaction payload (array or numeric-keyed object)
    #[serde(default)]
    pub enhanced_interactions: serde_json::Value,

    /// Session-level hints (page type, intent, shopping stage, ...)
    #[serde(default)]
    pub context: SessionContext,
}

impl SessionRecord {
    /// Build a record from already-parsed parts; used by tests and callers
    /// that assemble sessions programmatically.
    pub fn new(session_id: impl Into<String>, enhanced_interactions: serde_json::Value) -> Self {
        Self {
            session_id: session_id.into(),
            enhanced_interactions,
            context: SessionContext::default(),
        }
    }

    /// The session-level classifier context.
    pub fn context(&self) -> &SessionContext {
        &self.context
    }
}
