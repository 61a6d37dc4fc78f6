//! Heuristic intent classifier
//!
//! Given one interaction, session-level hints, and a bounded look-ahead
//! window, decides what kind of real-world entity the interaction
//! represents. Heuristics run in priority order and short-circuit on the
//! first strong match; anything ambiguous falls through to a low-confidence
//! ignore rather than a guess.

use crate::config::ClassifierConfig;
use crate::urls;
use crate::vocabulary::Vocabulary;
use shopsense_domain::{Classification, ParsedInteraction, SessionContext};
use tracing::debug;

/// The heuristic intent classifier.
pub struct IntentClassifier {
    vocab: Vocabulary,
    config: ClassifierConfig,
}

impl IntentClassifier {
    /// Create a classifier with the given vocabulary and configuration.
    pub fn new(vocab: Vocabulary, config: ClassifierConfig) -> Self {
        Self { vocab, config }
    }

    /// Create a classifier with default tables and configuration.
    pub fn default_tables() -> Self {
        Self::new(Vocabulary::default(), ClassifierConfig::default())
    }

    /// The vocabulary this classifier matches against.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    /// The classifier configuration.
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify one interaction.
    ///
    /// `lookahead` is the window of interactions following this one; only
    /// the first `config.lookahead_window` entries are consulted.
    pub fn classify(
        &self,
        interaction: &ParsedInteraction,
        session: &SessionContext,
        lookahead: &[ParsedInteraction],
    ) -> Classification {
        let lookahead = &lookahead[..lookahead.len().min(self.config.lookahead_window)];
        let text = interaction.text();
        let url = interaction.url();

        // 1. Text length gate: nothing meaningful outside the bounds
        if text.len() < self.config.min_text_len || text.len() > self.config.max_text_len {
            return Classification::Ignore {
                confidence: 0.5,
                reasoning: format!("text length {} outside meaningful bounds", text.len()),
            };
        }

        // 2. Product attribute test: size, color, style, action, availability
        if let Some(classification) = self.try_attribute(interaction, text) {
            return classification;
        }

        // 3. UI control vocabulary
        if let Some(classification) = self.try_ui(text) {
            return classification;
        }

        // 4. Category test
        if let Some(classification) = self.try_category(interaction, text, url, lookahead) {
            return classification;
        }

        // 5. Product test
        if let Some(classification) = self.try_product(interaction, text, url, session, lookahead)
        {
            return classification;
        }

        // Default: plain browsing, low confidence
        let confidence = if session
            .behavior_type
            .as_deref()
            .is_some_and(|b| b.contains("brows"))
        {
            0.5
        } else {
            0.3
        };
        debug!(
            interaction = %interaction.id,
            confidence,
            "no heuristic matched, classifying as browsing"
        );
        Classification::Ignore {
            confidence,
            reasoning: "browsing".to_string(),
        }
    }

    fn try_attribute(
        &self,
        interaction: &ParsedInteraction,
        text: &str,
    ) -> Option<Classification> {
        let (confidence, reasoning) = if self.vocab.is_color(text) {
            (0.85, "known color name")
        } else if self.vocab.is_size_token(text) {
            (0.8, "size token")
        } else if self.vocab.is_style(text) {
            (0.8, "style keyword")
        } else if self.vocab.is_action_phrase(text) {
            (0.85, "cart action phrase")
        } else if self.vocab.is_availability_phrase(text) {
            (0.8, "availability phrase")
        } else {
            return None;
        };

        Some(Classification::ProductAttribute {
            value: text.to_string(),
            selector: interaction
                .selectors
                .best()
                .unwrap_or_default()
                .to_string(),
            element: interaction.element.clone(),
            confidence,
            reasoning: reasoning.to_string(),
        })
    }

    fn try_ui(&self, text: &str) -> Option<Classification> {
        let lower = text.to_lowercase();
        if self.vocab.is_ui_term(text) {
            return Some(Classification::Ui {
                label: text.to_string(),
                confidence: 0.9,
                reasoning: "exact control vocabulary match".to_string(),
            });
        }
        // Partial control match only on short labels; longer text with an
        // embedded control word can still be a product name
        if text.len() <= 20
            && self
                .vocab
                .ui_terms
                .iter()
                .any(|t| t.len() > 3 && lower.contains(t.as_str()))
        {
            return Some(Classification::Ui {
                label: text.to_string(),
                confidence: 0.7,
                reasoning: "partial control vocabulary match".to_string(),
            });
        }
        None
    }

    fn try_category(
        &self,
        interaction: &ParsedInteraction,
        text: &str,
        url: &str,
        lookahead: &[ParsedInteraction],
    ) -> Option<Classification> {
        let vocab_match = self.vocab.is_category_term(text)
            || (text.len() < self.config.max_category_text_len
                && self.vocab.contains_category_term(text));
        let short_link =
            text.len() < self.config.max_category_text_len && interaction.is_link_like();

        if vocab_match && short_link {
            let path = urls::category_path_from_url(url)
                .unwrap_or_else(|| text.to_lowercase().replace(' ', "-"));
            return Some(Classification::Category {
                name: text.to_string(),
                path,
                url: url.to_string(),
                confidence: 0.8,
                reasoning: "category vocabulary on a short link".to_string(),
            });
        }

        // URL shape evidence: the page itself, or where the click led
        let on_category_page = urls::is_category_url(url);
        let led_to_category = interaction.is_link_like()
            && lookahead
                .first()
                .is_some_and(|next| urls::is_category_url(next.url()) && next.url() != url);

        if (on_category_page || led_to_category)
            && vocab_match
        {
            let target = if led_to_category {
                lookahead.first().map(|n| n.url()).unwrap_or(url)
            } else {
                url
            };
            let path = urls::category_path_from_url(target)?;
            return Some(Classification::Category {
                name: text.to_string(),
                path,
                url: target.to_string(),
                confidence: 0.7,
                reasoning: "category url shape".to_string(),
            });
        }
        None
    }

    fn try_product(
        &self,
        interaction: &ParsedInteraction,
        text: &str,
        url: &str,
        session: &SessionContext,
        lookahead: &[ParsedInteraction],
    ) -> Option<Classification> {
        let on_product_page = urls::is_product_url(url);
        // A click that lands on a product page within the window is product
        // navigation evidence
        let led_to_product = interaction.is_link_like()
            && lookahead
                .iter()
                .any(|next| urls::is_product_url(next.url()) && next.url() != url);

        if !on_product_page && !led_to_product {
            return None;
        }
        if !self.is_valid_product_name(text) {
            return None;
        }
        if text.len() < self.config.min_product_name_len {
            return None;
        }

        // Confidence scales with specificity: longer, multi-word,
        // non-generic text scores higher
        let mut confidence: f64 = if on_product_page { 0.7 } else { 0.65 };
        if text.split_whitespace().count() >= 2 {
            confidence += 0.05;
        }
        if text.len() >= 15 {
            confidence += 0.05;
        }
        if !self.vocab.contains_category_term(text) {
            confidence += 0.05;
        }
        if session
            .shopping_stage
            .as_deref()
            .is_some_and(|s| s.contains("product"))
        {
            confidence += 0.05;
        }
        let confidence = confidence.min(0.95);

        Some(Classification::Product {
            name: text.to_string(),
            url: urls::strip_query(url),
            selector: interaction
                .selectors
                .best()
                .unwrap_or_default()
                .to_string(),
            confidence,
            reasoning: "descriptive text on a product page url".to_string(),
        })
    }

    /// Whether `text` is acceptable as a product name: rejects pure
    /// category/UI terms, out-of-bounds lengths, and bare size tokens.
    pub fn is_valid_product_name(&self, text: &str) -> bool {
        let text = text.trim();
        if text.len() < self.config.min_text_len || text.len() > self.config.max_text_len {
            return false;
        }
        if self.vocab.is_ui_term(text)
            || self.vocab.is_category_term(text)
            || self.vocab.is_size_token(text)
            || self.vocab.is_action_phrase(text)
        {
            return false;
        }
        true
    }

    /// Tie-break rule for competing product-name candidates: prefer longer
    /// text, then more words; never replace with a shorter name.
    pub fn is_better_name(candidate: &str, held: &str) -> bool {
        let (c_len, h_len) = (candidate.trim().len(), held.trim().len());
        if c_len != h_len {
            return c_len > h_len;
        }
        candidate.split_whitespace().count() > held.split_whitespace().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopsense_domain::{
        ElementInfo, InteractionMetadata, PageContext, PageState, Selectors,
    };

    fn interaction(url: &str, text: &str, tag: &str) -> ParsedInteraction {
        ParsedInteraction {
            id: "i-0".to_string(),
            event_type: "click".to_string(),
            timestamp: 0.0,
            session_time: 0.0,
            context: PageContext {
                url: url.to_string(),
                ..Default::default()
            },
            element: ElementInfo {
                text: text.to_string(),
                tag: tag.to_string(),
                ..Default::default()
            },
            selectors: Selectors {
                primary: Some("#el".to_string()),
                ..Default::default()
            },
            state: PageState::default(),
            metadata: InteractionMetadata::default(),
        }
    }

    fn classify(url: &str, text: &str, tag: &str) -> Classification {
        IntentClassifier::default_tables().classify(
            &interaction(url, text, tag),
            &SessionContext::default(),
            &[],
        )
    }

    #[test]
    fn test_color_swatch_is_attribute() {
        let c = classify("https://www2.hm.com/en_us/productpage.1265337002.html", "Black", "button");
        match c {
            Classification::ProductAttribute { value, confidence, .. } => {
                assert_eq!(value, "Black");
                assert!(confidence >= 0.8);
            }
            other => panic!("expected attribute, got {:?}", other),
        }
    }

    #[test]
    fn test_size_chip_is_attribute() {
        let c = classify("https://example.com/p/tee/123", "M", "button");
        assert!(matches!(c, Classification::ProductAttribute { .. }));
    }

    #[test]
    fn test_add_to_bag_is_action_attribute() {
        let c = classify("https://example.com/p/tee/123", "Add to Bag", "button");
        match c {
            Classification::ProductAttribute { value, reasoning, .. } => {
                assert_eq!(value, "Add to Bag");
                assert!(reasoning.contains("action"));
            }
            other => panic!("expected attribute, got {:?}", other),
        }
    }

    #[test]
    fn test_ui_control_is_ui() {
        let c = classify("https://example.com/browse/women", "Back", "button");
        assert!(matches!(c, Classification::Ui { .. }));
        let c = classify("https://example.com/browse/women", "Sort by", "button");
        assert!(matches!(c, Classification::Ui { .. }));
    }

    #[test]
    fn test_long_text_ignored() {
        let text = "a".repeat(80);
        let c = classify("https://example.com/p/tee/123", &text, "div");
        assert!(matches!(c, Classification::Ignore { .. }));
    }

    #[test]
    fn test_category_link() {
        let c = classify("https://www.gap.com/browse/women", "Women", "a");
        match c {
            Classification::Category { name, path, confidence, .. } => {
                assert_eq!(name, "Women");
                assert_eq!(path, "women");
                assert!(confidence >= 0.6);
            }
            other => panic!("expected category, got {:?}", other),
        }
    }

    #[test]
    fn test_category_by_lookahead() {
        // Click text is category vocabulary and the next interaction lands
        // on a category-shaped URL
        let clicked = interaction("https://www.gap.com/", "Sale", "a");
        let landed = interaction("https://www.gap.com/browse/sale", "", "div");
        let c = IntentClassifier::default_tables().classify(
            &clicked,
            &SessionContext::default(),
            &[landed],
        );
        match c {
            Classification::Category { path, .. } => assert_eq!(path, "sale"),
            other => panic!("expected category, got {:?}", other),
        }
    }

    #[test]
    fn test_product_name_on_product_page() {
        let c = classify(
            "https://www2.hm.com/en_us/productpage.1265337002.html",
            "Classic Cotton Crew Tee",
            "h1",
        );
        match c {
            Classification::Product { name, confidence, .. } => {
                assert_eq!(name, "Classic Cotton Crew Tee");
                assert!(confidence >= 0.7);
            }
            other => panic!("expected product, got {:?}", other),
        }
    }

    #[test]
    fn test_short_text_not_a_product_name() {
        // "Tee" is below the product-name length floor
        let c = classify("https://example.com/p/tee/123", "Tee", "h1");
        assert!(matches!(c, Classification::Ignore { .. }));
    }

    #[test]
    fn test_category_term_on_product_page_not_a_product() {
        let c = classify("https://example.com/p/tee/123", "Women", "span");
        assert!(!matches!(c, Classification::Product { .. }));
    }

    #[test]
    fn test_specific_names_score_higher() {
        let classifier = IntentClassifier::default_tables();
        let session = SessionContext::default();
        let generic = classifier.classify(
            &interaction("https://example.com/p/tee/123", "Basic", "h1"),
            &session,
            &[],
        );
        let specific = classifier.classify(
            &interaction(
                "https://example.com/p/tee/123",
                "Classic Cotton Crew Tee",
                "h1",
            ),
            &session,
            &[],
        );
        assert!(specific.confidence() > generic.confidence());
    }

    #[test]
    fn test_default_is_low_confidence_ignore() {
        let c = classify("https://example.com/help", "Shipping information", "div");
        match c {
            Classification::Ignore { confidence, .. } => {
                assert!((0.3..=0.5).contains(&confidence));
            }
            other => panic!("expected ignore, got {:?}", other),
        }
    }

    #[test]
    fn test_name_tie_break() {
        assert!(IntentClassifier::is_better_name(
            "Classic Cotton Crew Tee",
            "Tee"
        ));
        assert!(!IntentClassifier::is_better_name(
            "Tee",
            "Classic Cotton Crew Tee"
        ));
        // Equal length: more words wins
        assert!(IntentClassifier::is_better_name("Crew Tee", "Crewtee1"));
    }

    #[test]
    fn test_valid_product_name_filter() {
        let classifier = IntentClassifier::default_tables();
        assert!(classifier.is_valid_product_name("Classic Cotton Crew Tee"));
        assert!(!classifier.is_valid_product_name("Women"));
        assert!(!classifier.is_valid_product_name("M"));
        assert!(!classifier.is_valid_product_name("Add to Cart"));
        assert!(!classifier.is_valid_product_name("x"));
    }
}
