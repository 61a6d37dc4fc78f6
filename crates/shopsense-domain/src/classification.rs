//! Classification - the tagged result of the intent classifier

use crate::interaction::ElementInfo;
use serde::{Deserialize, Serialize};

/// What kind of real-world entity a single interaction represents.
///
/// A sum type rather than a free-form record: each variant carries only the
/// payload it needs, so downstream aggregators match on the variant instead
/// of probing for field presence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classification {
    /// A category navigation link
    Category {
        /// Display name of the category
        name: String,
        /// Normalized category path (e.g. `women/dresses`)
        path: String,
        /// URL the link points at or was clicked on
        url: String,
        /// Classifier confidence [0, 1]
        confidence: f64,
        /// Why the classifier decided this
        reasoning: String,
    },

    /// A product page or product link
    Product {
        /// Candidate product name
        name: String,
        /// Product page URL
        url: String,
        /// Selector of the interacted element
        selector: String,
        /// Classifier confidence [0, 1]
        confidence: f64,
        /// Why the classifier decided this
        reasoning: String,
    },

    /// A product variant attribute (color swatch, size chip, action button)
    ProductAttribute {
        /// The attribute value as displayed
        value: String,
        /// Selector of the interacted element
        selector: String,
        /// Element details for downstream inspection
        element: ElementInfo,
        /// Classifier confidence [0, 1]
        confidence: f64,
        /// Why the classifier decided this
        reasoning: String,
    },

    /// A UI control with no entity meaning
    Ui {
        /// The control label
        label: String,
        /// Classifier confidence [0, 1]
        confidence: f64,
        /// Why the classifier decided this
        reasoning: String,
    },

    /// Nothing usable (includes plain browsing)
    Ignore {
        /// Classifier confidence [0, 1]
        confidence: f64,
        /// Why the classifier decided this
        reasoning: String,
    },
}

/// Discriminant of [`Classification`], for counters and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationKind {
    /// Category link
    Category,
    /// Product page or link
    Product,
    /// Variant attribute
    ProductAttribute,
    /// UI control
    Ui,
    /// Nothing usable
    Ignore,
}

impl Classification {
    /// The confidence score of this classification.
    pub fn confidence(&self) -> f64 {
        match self {
            Classification::Category { confidence, .. }
            | Classification::Product { confidence, .. }
            | Classification::ProductAttribute { confidence, .. }
            | Classification::Ui { confidence, .. }
            | Classification::Ignore { confidence, .. } => *confidence,
        }
    }

    /// The reasoning string of this classification.
    pub fn reasoning(&self) -> &str {
        match self {
            Classification::Category { reasoning, .. }
            | Classification::Product { reasoning, .. }
            | Classification::ProductAttribute { reasoning, .. }
            | Classification::Ui { reasoning, .. }
            | Classification::Ignore { reasoning, .. } => reasoning,
        }
    }

    /// The variant discriminant.
    pub fn kind(&self) -> ClassificationKind {
        match self {
            Classification::Category { .. } => ClassificationKind::Category,
            Classification::Product { .. } => ClassificationKind::Product,
            Classification::ProductAttribute { .. } => ClassificationKind::ProductAttribute,
            Classification::Ui { .. } => ClassificationKind::Ui,
            Classification::Ignore { .. } => ClassificationKind::Ignore,
        }
    }

    /// Whether this classification can contribute to a persisted entity.
    pub fn is_entity_signal(&self) -> bool {
        matches!(
            self,
            Classification::Category { .. }
                | Classification::Product { .. }
                | Classification::ProductAttribute { .. }
        )
    }
}

/// A product attribute observation detached from its classification, as
/// consumed by the attribute aggregator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeObservation {
    /// The attribute value as displayed
    pub value: String,
    /// Selector of the interacted element
    pub selector: String,
    /// Confidence of the originating classification
    pub confidence: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_accessor() {
        let c = Classification::Ignore {
            confidence: 0.3,
            reasoning: "browsing".to_string(),
        };
        assert_eq!(c.confidence(), 0.3);
        assert_eq!(c.kind(), ClassificationKind::Ignore);
        assert!(!c.is_entity_signal());
    }

    #[test]
    fn test_entity_signal_variants() {
        let c = Classification::Category {
            name: "Women".to_string(),
            path: "women".to_string(),
            url: "https://example.com/women".to_string(),
            confidence: 0.8,
            reasoning: "category vocabulary".to_string(),
        };
        assert!(c.is_entity_signal());
        assert_eq!(c.kind(), ClassificationKind::Category);
    }

    #[test]
    fn test_serialized_tag() {
        let c = Classification::Ui {
            label: "Back".to_string(),
            confidence: 0.9,
            reasoning: "control vocabulary".to_string(),
        };
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains(r#""kind":"ui""#));
    }
}
