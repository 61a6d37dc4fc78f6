//! Shopsense Storage Layer
//!
//! In-memory implementation of the `WorldModelRepository` trait.
//!
//! # Architecture
//!
//! - Domains keyed by hostname, created once and never mutated
//! - Categories keyed by `(domain, category_path)`, created once
//! - Products keyed by `(domain, product_id)`, created or enriched
//!
//! Enrichment merges variant/action/availability lists, keeps the better
//! name, the maximum confidence, and the union of source interaction ids,
//! so re-processing the same session leaves the store unchanged.

#![warn(missing_docs)]

use async_trait::async_trait;
use shopsense_domain::{
    ExtractedCategory, ExtractedDomain, ExtractedProduct, WorldModelRepository,
};
use std::collections::BTreeMap;
use std::convert::Infallible;
use tokio::sync::Mutex;
use tracing::debug;

/// A stored product along with the interaction ids that contributed to it.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredProduct {
    /// The product record
    pub product: ExtractedProduct,
    /// Interaction ids that contributed, deduplicated
    pub source_interactions: Vec<String>,
}

#[derive(Debug, Default)]
struct Inner {
    domains: BTreeMap<String, ExtractedDomain>,
    categories: BTreeMap<(String, String), ExtractedCategory>,
    products: BTreeMap<(String, String), StoredProduct>,
}

/// In-memory world-model repository.
///
/// Backed by a single async mutex; fine for per-run pipelines and tests.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    inner: Mutex<Inner>,
}

impl MemoryRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored domains.
    pub async fn domain_count(&self) -> usize {
        self.inner.lock().await.domains.len()
    }

    /// Number of stored categories across all domains.
    pub async fn category_count(&self) -> usize {
        self.inner.lock().await.categories.len()
    }

    /// Number of stored products across all domains.
    pub async fn product_count(&self) -> usize {
        self.inner.lock().await.products.len()
    }

    /// All stored domains.
    pub async fn domains(&self) -> Vec<ExtractedDomain> {
        self.inner.lock().await.domains.values().cloned().collect()
    }

    /// All categories for one domain.
    pub async fn categories_for(&self, domain: &str) -> Vec<ExtractedCategory> {
        let inner = self.inner.lock().await;
        inner
            .categories
            .iter()
            .filter(|((d, _), _)| d == domain)
            .map(|(_, c)| c.clone())
            .collect()
    }

    /// All products for one domain.
    pub async fn products_for(&self, domain: &str) -> Vec<StoredProduct> {
        let inner = self.inner.lock().await;
        inner
            .products
            .iter()
            .filter(|((d, _), _)| d == domain)
            .map(|(_, p)| p.clone())
            .collect()
    }

    /// Look up a single product by `(domain, product_id)`.
    pub async fn product(&self, domain: &str, product_id: &str) -> Option<StoredProduct> {
        let inner = self.inner.lock().await;
        inner
            .products
            .get(&(domain.to_string(), product_id.to_string()))
            .cloned()
    }
}

#[async_trait]
impl WorldModelRepository for MemoryRepository {
    type Error = Infallible;

    async fn get_domain(&self, domain: &str) -> Result<Option<ExtractedDomain>, Self::Error> {
        Ok(self.inner.lock().await.domains.get(domain).cloned())
    }

    async fn upsert_domain(&self, domain: ExtractedDomain) -> Result<(), Self::Error> {
        let mut inner = self.inner.lock().await;
        if !inner.domains.contains_key(&domain.domain) {
            debug!(domain = %domain.domain, "created domain");
            inner.domains.insert(domain.domain.clone(), domain);
        }
        Ok(())
    }

    async fn get_category(
        &self,
        domain: &str,
        category_path: &str,
    ) -> Result<Option<ExtractedCategory>, Self::Error> {
        let inner = self.inner.lock().await;
        Ok(inner
            .categories
            .get(&(domain.to_string(), category_path.to_string()))
            .cloned())
    }

    async fn upsert_category(
        &self,
        domain: &str,
        category: ExtractedCategory,
    ) -> Result<(), Self::Error> {
        let mut inner = self.inner.lock().await;
        let key = (domain.to_string(), category.category_path.clone());
        if !inner.categories.contains_key(&key) {
            debug!(domain, path = %category.category_path, "created category");
            inner.categories.insert(key, category);
        }
        Ok(())
    }

    async fn upsert_product(
        &self,
        domain: &str,
        product: ExtractedProduct,
        source_interactions: &[String],
    ) -> Result<(), Self::Error> {
        let mut inner = self.inner.lock().await;
        let key = (domain.to_string(), product.product_id.clone());
        match inner.products.get_mut(&key) {
            Some(existing) => {
                debug!(domain, id = %product.product_id, "enriched product");
                merge_product(existing, product, source_interactions);
            }
            None => {
                debug!(domain, id = %product.product_id, "created product");
                inner.products.insert(
                    key,
                    StoredProduct {
                        product,
                        source_interactions: dedup(source_interactions.to_vec()),
                    },
                );
            }
        }
        Ok(())
    }
}

fn merge_product(existing: &mut StoredProduct, incoming: ExtractedProduct, sources: &[String]) {
    let current = &mut existing.product;

    if better_name(&incoming.product_name, &current.product_name) {
        current.product_name = incoming.product_name;
        current.selector = incoming.selector;
    }
    if current.price.is_none() {
        current.price = incoming.price;
    }
    if current.category_path.is_empty() {
        current.category_path = incoming.category_path;
    }
    if incoming.confidence > current.confidence {
        current.confidence = incoming.confidence;
        current.reasoning = incoming.reasoning;
    }

    extend_unique(&mut current.variants.colors, incoming.variants.colors);
    extend_unique(&mut current.variants.sizes, incoming.variants.sizes);
    extend_unique(&mut current.variants.styles, incoming.variants.styles);
    extend_unique(&mut current.actions, incoming.actions);
    extend_unique(&mut current.availability, incoming.availability);

    for id in sources {
        if !existing.source_interactions.contains(id) {
            existing.source_interactions.push(id.clone());
        }
    }
}

/// Longer names beat shorter ones; among equal lengths, more words win.
/// The placeholder name always loses to a real candidate.
fn better_name(candidate: &str, current: &str) -> bool {
    if current == "Unknown Product" && candidate != "Unknown Product" {
        return true;
    }
    if candidate == "Unknown Product" {
        return false;
    }
    if candidate.len() != current.len() {
        return candidate.len() > current.len();
    }
    candidate.split_whitespace().count() > current.split_whitespace().count()
}

fn extend_unique(target: &mut Vec<String>, incoming: Vec<String>) {
    for value in incoming {
        if !target
            .iter()
            .any(|existing| existing.eq_ignore_ascii_case(&value))
        {
            target.push(value);
        }
    }
}

fn dedup(mut values: Vec<String>) -> Vec<String> {
    let mut seen = Vec::with_capacity(values.len());
    values.retain(|v| {
        if seen.contains(v) {
            false
        } else {
            seen.push(v.clone());
            true
        }
    });
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopsense_domain::ProductVariants;

    fn domain() -> ExtractedDomain {
        ExtractedDomain {
            domain: "www.gap.com".to_string(),
            site_name: "Gap".to_string(),
            site_type: "retail".to_string(),
            url_patterns: Default::default(),
        }
    }

    fn category(path: &str) -> ExtractedCategory {
        ExtractedCategory {
            category_path: path.to_string(),
            category_name: "Dresses".to_string(),
            category_type: "product_type".to_string(),
            urls: vec![],
            confidence: 0.8,
            reasoning: "category vocabulary match".to_string(),
        }
    }

    fn product(name: &str, confidence: f64) -> ExtractedProduct {
        ExtractedProduct {
            product_id: "gap-product-123".to_string(),
            product_name: name.to_string(),
            price: None,
            url: "https://www.gap.com/p/tee/123".to_string(),
            selector: "#name".to_string(),
            category_path: "women/dresses".to_string(),
            confidence,
            reasoning: "product page url".to_string(),
            variants: ProductVariants::default(),
            actions: vec![],
            availability: vec![],
        }
    }

    #[tokio::test]
    async fn test_domain_created_once() {
        let repo = MemoryRepository::new();
        repo.upsert_domain(domain()).await.unwrap();

        let mut renamed = domain();
        renamed.site_name = "Other".to_string();
        repo.upsert_domain(renamed).await.unwrap();

        let stored = repo.get_domain("www.gap.com").await.unwrap().unwrap();
        assert_eq!(stored.site_name, "Gap");
        assert_eq!(repo.domain_count().await, 1);
    }

    #[tokio::test]
    async fn test_category_reupsert_is_noop() {
        let repo = MemoryRepository::new();
        repo.upsert_category("www.gap.com", category("women/dresses"))
            .await
            .unwrap();

        let mut changed = category("women/dresses");
        changed.confidence = 0.99;
        repo.upsert_category("www.gap.com", changed).await.unwrap();

        let stored = repo
            .get_category("www.gap.com", "women/dresses")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.confidence, 0.8);
        assert_eq!(repo.category_count().await, 1);
    }

    #[tokio::test]
    async fn test_categories_keyed_per_domain() {
        let repo = MemoryRepository::new();
        repo.upsert_category("www.gap.com", category("women/dresses"))
            .await
            .unwrap();
        repo.upsert_category("www.hm.com", category("women/dresses"))
            .await
            .unwrap();
        assert_eq!(repo.category_count().await, 2);
        assert_eq!(repo.categories_for("www.gap.com").await.len(), 1);
    }

    #[tokio::test]
    async fn test_product_enrichment_merges_lists() {
        let repo = MemoryRepository::new();
        let mut first = product("Tee", 0.7);
        first.variants.colors = vec!["Black".to_string()];
        repo.upsert_product("www.gap.com", first, &["i1".to_string()])
            .await
            .unwrap();

        let mut second = product("Organic Cotton Tee", 0.85);
        second.variants.colors = vec!["black".to_string(), "Navy".to_string()];
        second.variants.sizes = vec!["M".to_string()];
        second.price = Some(24.99);
        repo.upsert_product("www.gap.com", second, &["i1".to_string(), "i2".to_string()])
            .await
            .unwrap();

        let stored = repo.product("www.gap.com", "gap-product-123").await.unwrap();
        assert_eq!(stored.product.product_name, "Organic Cotton Tee");
        assert_eq!(stored.product.confidence, 0.85);
        assert_eq!(stored.product.price, Some(24.99));
        // case-insensitive union
        assert_eq!(stored.product.variants.colors, vec!["Black", "Navy"]);
        assert_eq!(stored.product.variants.sizes, vec!["M"]);
        assert_eq!(stored.source_interactions, vec!["i1", "i2"]);
    }

    #[tokio::test]
    async fn test_enrichment_keeps_better_existing_name() {
        let repo = MemoryRepository::new();
        repo.upsert_product("www.gap.com", product("Organic Cotton Tee", 0.85), &[])
            .await
            .unwrap();
        repo.upsert_product("www.gap.com", product("Tee", 0.6), &[])
            .await
            .unwrap();

        let stored = repo.product("www.gap.com", "gap-product-123").await.unwrap();
        assert_eq!(stored.product.product_name, "Organic Cotton Tee");
        assert_eq!(stored.product.confidence, 0.85);
    }

    #[tokio::test]
    async fn test_placeholder_name_replaced() {
        let repo = MemoryRepository::new();
        repo.upsert_product("www.gap.com", product("Unknown Product", 0.8), &[])
            .await
            .unwrap();
        repo.upsert_product("www.gap.com", product("Slim Jeans", 0.75), &[])
            .await
            .unwrap();

        let stored = repo.product("www.gap.com", "gap-product-123").await.unwrap();
        assert_eq!(stored.product.product_name, "Slim Jeans");
    }

    #[tokio::test]
    async fn test_reprocessing_is_idempotent() {
        let repo = MemoryRepository::new();
        let mut p = product("Organic Cotton Tee", 0.85);
        p.variants.colors = vec!["Black".to_string()];
        repo.upsert_product("www.gap.com", p.clone(), &["i1".to_string()])
            .await
            .unwrap();
        let before = repo.product("www.gap.com", "gap-product-123").await.unwrap();

        repo.upsert_product("www.gap.com", p, &["i1".to_string()])
            .await
            .unwrap();
        let after = repo.product("www.gap.com", "gap-product-123").await.unwrap();
        assert_eq!(before, after);
        assert_eq!(repo.product_count().await, 1);
    }
}
