//! Extracted world-model entities

use serde::{Deserialize, Serialize};

/// URL shape inventory observed for a domain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlPatterns {
    /// URLs matching category shapes
    pub category: Vec<String>,
    /// URLs matching product shapes
    pub product: Vec<String>,
    /// URLs matching search shapes
    pub search: Vec<String>,
    /// URLs matching sale shapes
    pub sale: Vec<String>,
}

/// Site domain metadata. Created once per unique domain encountered and
/// never mutated afterwards; upserts are idempotent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedDomain {
    /// Hostname (e.g. `www.gap.com`)
    pub domain: String,
    /// Human-readable site name
    pub site_name: String,
    /// Site type (currently always `retail`)
    pub site_type: String,
    /// Observed URL shape buckets
    pub url_patterns: UrlPatterns,
}

/// A category record derived from category-typed classifications.
///
/// Invariant: persisted only when `confidence >= ConfidenceFloors.category`;
/// deduplicated by `(domain, category_path)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedCategory {
    /// Normalized category path (e.g. `women/dresses`)
    pub category_path: String,
    /// Display name
    pub category_name: String,
    /// Category type (gender segment, product type, promotional, ...)
    pub category_type: String,
    /// URLs this category was observed at
    pub urls: Vec<String>,
    /// Classification confidence [0, 1]
    pub confidence: f64,
    /// Why this was extracted
    pub reasoning: String,
}

/// Variant attribute lists merged across a product-page group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariants {
    /// Color options observed
    pub colors: Vec<String>,
    /// Size options observed
    pub sizes: Vec<String>,
    /// Style options observed
    pub styles: Vec<String>,
}

impl ProductVariants {
    /// Whether no variants were observed.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty() && self.sizes.is_empty() && self.styles.is_empty()
    }
}

/// A product catalog record.
///
/// Invariant: persisted only when `confidence >= ConfidenceFloors.product`;
/// deduplicated by `(domain, product_id)`. Variant/action/availability lists
/// merge all attribute classifications from interactions sharing the same
/// product-page group key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedProduct {
    /// Group-key-derived product identifier
    pub product_id: String,
    /// Best product name candidate
    pub product_name: String,
    /// Extracted price, if any
    pub price: Option<f64>,
    /// Product page URL
    pub url: String,
    /// Selector of the naming element
    pub selector: String,
    /// Category path the product was reached through
    pub category_path: String,
    /// Aggregate confidence [0, 1]
    pub confidence: f64,
    /// Why this was extracted
    pub reasoning: String,
    /// Merged variant attributes
    pub variants: ProductVariants,
    /// Cart/purchase action labels observed
    pub actions: Vec<String>,
    /// Availability phrases observed
    pub availability: Vec<String>,
}
