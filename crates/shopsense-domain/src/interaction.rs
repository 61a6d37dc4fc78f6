//! Interaction records - raw wire form and the normalized parsed form

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One raw interaction as delivered by session intake.
///
/// Field names on the wire are camelCase JSON. Every field is optional or
/// defaulted because capture quality varies wildly between sites; the
/// normalizer decides what is salvageable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawInteraction {
    /// Intake-assigned identifier, if any
    pub id: Option<String>,

    /// Event type: click, input, scroll, ...
    #[serde(rename = "type")]
    pub event_type: Option<String>,

    /// Epoch milliseconds
    pub timestamp: Option<f64>,

    /// Milliseconds since session start
    pub session_time: Option<f64>,

    /// Page context at the time of the event
    pub context: Option<PageContext>,

    /// The interacted element
    pub element: Option<RawElement>,

    /// Selector candidates for the element
    pub selectors: Option<Selectors>,

    /// Before/after page snapshots
    pub state: Option<PageState>,

    /// Free-form capture metadata
    pub metadata: Option<serde_json::Value>,
}

/// Page context attached to an interaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageContext {
    /// Page URL
    pub url: String,
    /// Page title
    pub page_title: Option<String>,
    /// Capture-side page type hint (category, product, cart, ...)
    pub page_type: Option<String>,
    /// Additional free-form page context
    pub page_context: Option<String>,
}

/// The raw captured element, including the sibling/nearby dumps that the
/// normalizer is contractually required to strip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawElement {
    /// Visible text of the element
    pub text: Option<String>,
    /// Tag name (a, span, button, ...)
    pub tag: Option<String>,
    /// DOM id attribute
    pub id: Option<String>,
    /// DOM class attribute
    pub class_name: Option<String>,
    /// Other element attributes
    pub attributes: HashMap<String, String>,
    /// Text snippets of spatially nearby elements; retained only for
    /// price/stock inference
    pub nearby_text: Vec<String>,
    /// Sibling element dump - stripped by the normalizer, a known source
    /// of false-positive product/category matches
    pub siblings: Option<serde_json::Value>,
    /// Nearby element dump - stripped by the normalizer
    pub nearby_elements: Option<serde_json::Value>,
    /// Parent element dump - stripped by the normalizer
    pub parent_elements: Option<serde_json::Value>,
}

/// Selector candidates for the interacted element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Selectors {
    /// Preferred selector
    pub primary: Option<String>,
    /// XPath candidate
    pub xpath: Option<String>,
    /// CSS candidate
    pub css: Option<String>,
}

impl Selectors {
    /// The best available selector, preferring primary > css > xpath.
    pub fn best(&self) -> Option<&str> {
        self.primary
            .as_deref()
            .or(self.css.as_deref())
            .or(self.xpath.as_deref())
    }
}

/// Before/after page snapshots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageState {
    /// Snapshot before the event
    pub before: Option<PageSnapshot>,
    /// Snapshot after the event
    pub after: Option<PageSnapshot>,
}

/// A single page snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageSnapshot {
    /// Page title at snapshot time
    pub title: Option<String>,
    /// Page URL at snapshot time
    pub url: Option<String>,
}

/// The normalized interaction retained by the pipeline.
///
/// Contract: sibling/nearby/parent element dumps from the raw record are
/// never carried here. Neighbor text survives only inside
/// [`InteractionMetadata::neighbor_texts`] and is consulted exclusively by
/// the pricing extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedInteraction {
    /// Stable identifier (intake-assigned or positional)
    pub id: String,
    /// Event type: click, input, scroll, ...
    #[serde(rename = "type")]
    pub event_type: String,
    /// Epoch milliseconds
    pub timestamp: f64,
    /// Milliseconds since session start
    pub session_time: f64,
    /// Page context
    pub context: PageContext,
    /// Cleaned element
    pub element: ElementInfo,
    /// Selector candidates
    pub selectors: Selectors,
    /// Before/after snapshots
    pub state: PageState,
    /// Retained metadata
    pub metadata: InteractionMetadata,
}

impl ParsedInteraction {
    /// Trimmed element text.
    pub fn text(&self) -> &str {
        self.element.text.trim()
    }

    /// URL of the page the event occurred on.
    pub fn url(&self) -> &str {
        &self.context.url
    }

    /// Whether the element is a link or link-like span.
    pub fn is_link_like(&self) -> bool {
        matches!(self.element.tag.as_str(), "a" | "span")
    }

    /// Whether the element is a clickable control.
    pub fn is_clickable(&self) -> bool {
        matches!(self.element.tag.as_str(), "a" | "button" | "span" | "input")
    }
}

/// Element fields retained after normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementInfo {
    /// Visible text
    pub text: String,
    /// Tag name, lowercased
    pub tag: String,
    /// DOM id attribute
    pub id: Option<String>,
    /// DOM class attribute
    pub class_name: Option<String>,
    /// Other element attributes
    pub attributes: HashMap<String, String>,
}

impl ElementInfo {
    /// Case-insensitive test for a class-name hint.
    pub fn has_class_hint(&self, hint: &str) -> bool {
        self.class_name
            .as_deref()
            .map(|c| c.to_lowercase().contains(hint))
            .unwrap_or(false)
    }
}

/// Metadata carried through normalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionMetadata {
    /// Spatial neighbor text snippets, for price/stock inference only
    pub neighbor_texts: Vec<String>,
}

/// Session-level hints supplied by intake, used as classifier context.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionContext {
    /// Dominant page type for the session
    pub page_type: Option<String>,
    /// Inferred user intent
    pub user_intent: Option<String>,
    /// Shopping stage hint (browsing, product, checkout, ...)
    pub shopping_stage: Option<String>,
    /// Behavior type hint
    pub behavior_type: Option<String>,
    /// Capture quality score [0, 1]
    pub quality_score: Option<f64>,
}
