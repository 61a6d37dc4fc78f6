//! Product attribute aggregation
//!
//! Consumes one product-page group's classifications: picks the best
//! product-name candidate and merges every attribute observation into a
//! single extracted product. When no valid product name surfaced but
//! attributes did, a fallback product is synthesized rather than losing the
//! observations.

use crate::buckets::AttributeBuckets;
use once_cell::sync::Lazy;
use regex::Regex;
use shopsense_classifier::{pricing, urls, IntentClassifier};
use shopsense_domain::{Classification, ExtractedProduct, ParsedInteraction, SessionContext};
use tracing::debug;

static PATH_SLUG: Lazy<Regex> = Lazy::new(|| Regex::new(r"/(?:p|s)/([^/?#]+)").unwrap());

const FALLBACK_CONFIDENCE: f64 = 0.8;

struct NameCandidate {
    name: String,
    url: String,
    selector: String,
    confidence: f64,
    reasoning: String,
}

/// Merges one product-page group into a single product record.
pub struct ProductAggregator {
    classifier: IntentClassifier,
}

impl ProductAggregator {
    /// Create an aggregator running the given classifier over group members.
    pub fn new(classifier: IntentClassifier) -> Self {
        Self { classifier }
    }

    /// Aggregate a product-page group into one extracted product.
    ///
    /// Returns `None` when neither a base product nor any attribute was
    /// found in the group.
    pub fn aggregate(
        &self,
        group_key: &str,
        interactions: &[ParsedInteraction],
        session: &SessionContext,
    ) -> Option<ExtractedProduct> {
        let first = interactions.first()?;
        let vocab = self.classifier.vocabulary();

        let mut buckets = AttributeBuckets::default();
        let mut candidate: Option<NameCandidate> = None;
        let mut price = None;

        for (idx, interaction) in interactions.iter().enumerate() {
            if price.is_none() {
                price = pricing::extract_price(interaction).map(|p| p.price);
            }

            match self
                .classifier
                .classify(interaction, session, &interactions[idx + 1..])
            {
                Classification::ProductAttribute { value, .. } => {
                    buckets.absorb(&value, vocab);
                }
                Classification::Product {
                    name,
                    url,
                    selector,
                    confidence,
                    reasoning,
                } => {
                    if !self.classifier.is_valid_product_name(&name) {
                        continue;
                    }
                    let better = match &candidate {
                        Some(held) => IntentClassifier::is_better_name(&name, &held.name),
                        None => true,
                    };
                    if better {
                        candidate = Some(NameCandidate {
                            name,
                            url,
                            selector,
                            confidence,
                            reasoning,
                        });
                    }
                }
                _ => {}
            }
        }

        let (base, reasoning) = match candidate {
            Some(candidate) => (candidate, None),
            None if !buckets.is_empty() => {
                let name = self
                    .name_from_slug(first.url())
                    .or_else(|| self.name_from_page_text(interactions))
                    .unwrap_or_else(|| "Unknown Product".to_string());
                debug!(group = group_key, name = %name, "synthesizing fallback product");
                (
                    NameCandidate {
                        name,
                        url: urls::strip_query(first.url()),
                        selector: first.selectors.best().unwrap_or_default().to_string(),
                        confidence: FALLBACK_CONFIDENCE,
                        reasoning: String::new(),
                    },
                    Some("derived from attributes only".to_string()),
                )
            }
            None => return None,
        };

        let category_path = self.category_hint(interactions);
        let (variants, actions, availability) = buckets.into_parts();

        Some(ExtractedProduct {
            product_id: group_key.to_string(),
            product_name: base.name,
            price,
            url: base.url,
            selector: base.selector,
            category_path,
            confidence: base.confidence,
            reasoning: reasoning.unwrap_or(base.reasoning),
            variants,
            actions,
            availability,
        })
    }

    /// Product name inferred from the URL slug, when the slug is
    /// descriptive (hyphenated, not purely numeric).
    fn name_from_slug(&self, url: &str) -> Option<String> {
        let slug = PATH_SLUG.captures(url)?.get(1)?.as_str();
        if slug.chars().all(|c| c.is_ascii_digit()) || !slug.contains('-') {
            return None;
        }
        let name = urls::title_from_slug(slug);
        self.classifier.is_valid_product_name(&name).then_some(name)
    }

    /// Longest non-UI/non-category text observed anywhere on the page.
    /// Attribute values (colors, sizes, styles, actions, availability) do
    /// not qualify as names.
    fn name_from_page_text(&self, interactions: &[ParsedInteraction]) -> Option<String> {
        let vocab = self.classifier.vocabulary();
        interactions
            .iter()
            .map(|i| i.text())
            .filter(|t| self.classifier.is_valid_product_name(t))
            .filter(|t| {
                !vocab.is_color(t)
                    && !vocab.is_size_token(t)
                    && !vocab.is_style(t)
                    && !vocab.is_availability_phrase(t)
            })
            .max_by_key(|t| t.len())
            .map(|t| t.to_string())
    }

    /// Category path hint: URL path segments that are category vocabulary.
    fn category_hint(&self, interactions: &[ParsedInteraction]) -> String {
        let vocab = self.classifier.vocabulary();
        for interaction in interactions {
            if let Some(path) = urls::category_path_from_url(interaction.url()) {
                let segments: Vec<&str> = path
                    .split('/')
                    .filter(|s| vocab.is_category_term(s))
                    .collect();
                if !segments.is_empty() {
                    return segments.join("/");
                }
            }
        }
        String::new()
    }
}
