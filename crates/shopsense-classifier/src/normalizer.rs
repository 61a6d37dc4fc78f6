//! Interaction normalizer
//!
//! Cleans raw intake records before anything else touches them. The one
//! hard contract: sibling/nearby/parent element dumps never survive
//! normalization - they contaminate downstream product/category matching.
//! Neighbor text snippets are kept aside in interaction metadata for the
//! pricing extractor only.

use serde_json::Value;
use shopsense_domain::{
    ElementInfo, InteractionMetadata, PageContext, ParsedInteraction, RawInteraction,
};
use tracing::warn;

/// Result of normalizing one session payload.
#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    /// Interactions that survived normalization, in order
    pub interactions: Vec<ParsedInteraction>,
    /// Count of records dropped as unparsable
    pub dropped: usize,
}

/// Normalize a session's `enhancedInteractions` payload.
///
/// The payload is either a JSON array or an array-like mapping with numeric
/// string keys; the mapping form is coerced into an ordered sequence.
/// Unparsable records are dropped with a warning; the rest continue.
pub fn normalize_payload(payload: &Value) -> NormalizedBatch {
    let records: Vec<&Value> = match payload {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => {
            let mut keyed: Vec<(usize, &Value)> = map
                .iter()
                .filter_map(|(k, v)| k.parse::<usize>().ok().map(|idx| (idx, v)))
                .collect();
            keyed.sort_by_key(|(idx, _)| *idx);
            keyed.into_iter().map(|(_, v)| v).collect()
        }
        _ => Vec::new(),
    };

    let mut batch = NormalizedBatch::default();
    for (idx, record) in records.iter().enumerate() {
        match normalize_interaction(record, idx) {
            Some(interaction) => batch.interactions.push(interaction),
            None => {
                warn!(index = idx, "dropping unparsable interaction record");
                batch.dropped += 1;
            }
        }
    }
    batch
}

/// Normalize a single raw interaction record.
///
/// Returns `None` when the record cannot be parsed or carries no usable
/// page context; the caller skips it and continues.
pub fn normalize_interaction(record: &Value, index: usize) -> Option<ParsedInteraction> {
    let raw: RawInteraction = serde_json::from_value(record.clone()).ok()?;

    let event_type = raw.event_type.filter(|t| !t.trim().is_empty())?;
    let context = raw.context.filter(|c| !c.url.trim().is_empty())?;

    let element = raw.element.unwrap_or_default();
    let neighbor_texts = element
        .nearby_text
        .iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();

    // Sibling/nearby/parent dumps are dropped here by construction:
    // ElementInfo has no fields to hold them.
    let element = ElementInfo {
        text: element.text.unwrap_or_default().trim().to_string(),
        tag: element.tag.unwrap_or_default().trim().to_lowercase(),
        id: element.id,
        class_name: element.class_name,
        attributes: element.attributes,
    };

    Some(ParsedInteraction {
        id: raw.id.unwrap_or_else(|| format!("interaction-{}", index)),
        event_type,
        timestamp: raw.timestamp.unwrap_or(0.0),
        session_time: raw.session_time.unwrap_or(0.0),
        context: PageContext {
            url: context.url.trim().to_string(),
            page_title: context.page_title,
            page_type: context.page_type,
            page_context: context.page_context,
        },
        element,
        selectors: raw.selectors.unwrap_or_default(),
        state: raw.state.unwrap_or_default(),
        metadata: InteractionMetadata { neighbor_texts },
    })
}
