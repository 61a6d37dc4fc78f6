//! Trait definitions for external interactions
//!
//! These traits define the boundary between the extraction pipeline and
//! infrastructure. Storage implementations live in other crates; the
//! pipeline only ever creates or enriches entities, never deletes.

use crate::entity::{ExtractedCategory, ExtractedDomain, ExtractedProduct};
use async_trait::async_trait;

/// Repository for persisted world-model entities.
///
/// All upserts are idempotent (last-writer-wins), which is what makes
/// cross-worker races safe when sessions are processed in parallel.
#[async_trait]
pub trait WorldModelRepository: Send + Sync {
    /// Error type for repository operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Look up a domain by hostname.
    async fn get_domain(&self, domain: &str) -> Result<Option<ExtractedDomain>, Self::Error>;

    /// Create the domain if absent; a no-op when it already exists.
    async fn upsert_domain(&self, domain: ExtractedDomain) -> Result<(), Self::Error>;

    /// Look up a category by `(domain, category_path)`.
    async fn get_category(
        &self,
        domain: &str,
        category_path: &str,
    ) -> Result<Option<ExtractedCategory>, Self::Error>;

    /// Create the category if absent; a no-op on re-encounter.
    async fn upsert_category(
        &self,
        domain: &str,
        category: ExtractedCategory,
    ) -> Result<(), Self::Error>;

    /// Create the product or enrich an existing one with merged
    /// variant/action/availability lists. `source_interactions` records the
    /// interaction ids that contributed.
    async fn upsert_product(
        &self,
        domain: &str,
        product: ExtractedProduct,
        source_interactions: &[String],
    ) -> Result<(), Self::Error>;
}
