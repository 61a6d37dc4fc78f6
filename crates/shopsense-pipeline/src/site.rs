//! Site-level extraction: domains and categories
//!
//! Domains come straight from the URLs observed in a session. Categories
//! come from category-typed classifications, merged by host and path
//! before they are handed to the repository.

use shopsense_classifier::{urls, Vocabulary};
use shopsense_domain::{
    Classification, ExtractedCategory, ExtractedDomain, ParsedInteraction, UrlPatterns,
};
use std::collections::BTreeMap;

/// Derives domain and category records from a session.
pub struct SiteExtractor {
    vocab: Vocabulary,
}

impl SiteExtractor {
    /// Create an extractor with the given vocabulary.
    pub fn new(vocab: Vocabulary) -> Self {
        Self { vocab }
    }

    /// One domain record per unique hostname in the session, with URL
    /// shape inventories filled from every URL seen on that host.
    pub fn domains(&self, interactions: &[ParsedInteraction]) -> Vec<ExtractedDomain> {
        let mut by_host: BTreeMap<String, ExtractedDomain> = BTreeMap::new();

        for interaction in interactions {
            let url = interaction.url();
            let Some(host) = urls::hostname(url) else {
                continue;
            };

            let entry = by_host.entry(host.clone()).or_insert_with(|| {
                let vendor = urls::vendor_token(&host);
                ExtractedDomain {
                    domain: host.clone(),
                    site_name: capitalize(&vendor),
                    site_type: "retail".to_string(),
                    url_patterns: UrlPatterns::default(),
                }
            });
            bucket_url(&mut entry.url_patterns, url);
        }

        by_host.into_values().collect()
    }

    /// Category records from category classifications, paired with the
    /// hostname they belong to and merged by `(host, path)`.
    ///
    /// The host comes from the classification's own URL, so one session
    /// spanning several retailers files each category under the right
    /// domain. URLs union; the highest-confidence observation supplies the
    /// name, confidence, and reasoning.
    pub fn categories(
        &self,
        classifications: &[Classification],
    ) -> Vec<(String, ExtractedCategory)> {
        let mut by_key: BTreeMap<(String, String), ExtractedCategory> = BTreeMap::new();

        for classification in classifications {
            let Classification::Category {
                name,
                path,
                url,
                confidence,
                reasoning,
            } = classification
            else {
                continue;
            };
            if path.is_empty() {
                continue;
            }
            let Some(host) = urls::hostname(url) else {
                continue;
            };

            match by_key.get_mut(&(host.clone(), path.clone())) {
                Some(existing) => {
                    if !existing.urls.contains(url) {
                        existing.urls.push(url.clone());
                    }
                    if *confidence > existing.confidence {
                        existing.category_name = name.clone();
                        existing.category_type = self.vocab.category_type_of(name).to_string();
                        existing.confidence = *confidence;
                        existing.reasoning = reasoning.clone();
                    }
                }
                None => {
                    by_key.insert(
                        (host, path.clone()),
                        ExtractedCategory {
                            category_path: path.clone(),
                            category_name: name.clone(),
                            category_type: self.vocab.category_type_of(name).to_string(),
                            urls: vec![url.clone()],
                            confidence: *confidence,
                            reasoning: reasoning.clone(),
                        },
                    );
                }
            }
        }

        by_key.into_iter().map(|((host, _), c)| (host, c)).collect()
    }
}

impl Default for SiteExtractor {
    fn default() -> Self {
        Self::new(Vocabulary::default())
    }
}

fn bucket_url(patterns: &mut UrlPatterns, url: &str) {
    let push = |bucket: &mut Vec<String>| {
        if !bucket.iter().any(|u| u == url) {
            bucket.push(url.to_string());
        }
    };
    if urls::is_product_url(url) {
        push(&mut patterns.product);
    }
    if urls::is_category_url(url) {
        push(&mut patterns.category);
    }
    if urls::is_search_url(url) {
        push(&mut patterns.search);
    }
    if urls::is_sale_url(url) {
        push(&mut patterns.sale);
    }
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
