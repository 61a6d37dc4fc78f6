//! Product-page grouping
//!
//! Clusters interactions by inferred product-page identity so attributes
//! scattered across many clicks on the same page can be merged. Site
//! families are an ordered table of (URL shape, id capture) rows evaluated
//! in one dispatch loop; adding a retailer is adding a row.

use once_cell::sync::Lazy;
use regex::Regex;
use shopsense_domain::ParsedInteraction;
use shopsense_classifier::urls;
use std::collections::BTreeMap;

struct SiteFamily {
    name: &'static str,
    pattern: Regex,
    // When false the row is an anchor test only; the key is the stripped
    // base URL instead of a vendor-product id
    id_keyed: bool,
}

// First match wins. Order matters: specific retailer shapes come before
// the generic fallback anchor.
static SITE_FAMILIES: Lazy<Vec<SiteFamily>> = Lazy::new(|| {
    vec![
        SiteFamily {
            name: "path-id",
            pattern: Regex::new(r"/p/[^/]+/(\d+)(?:[/?#]|$)").unwrap(),
            id_keyed: true,
        },
        SiteFamily {
            name: "numeric-productpage",
            pattern: Regex::new(r"/productpage\.(\d{10,})").unwrap(),
            id_keyed: true,
        },
        SiteFamily {
            name: "query-pid",
            pattern: Regex::new(r"[?&]pid=([A-Za-z0-9]+)").unwrap(),
            id_keyed: true,
        },
        SiteFamily {
            name: "slug-numeric-id",
            pattern: Regex::new(r"/s/[^/]+/(\d+)(?:[/?#]|$)").unwrap(),
            id_keyed: true,
        },
        SiteFamily {
            name: "marketplace-asin",
            pattern: Regex::new(r"/dp/([A-Z0-9]{10})(?:[/?#]|$)").unwrap(),
            id_keyed: true,
        },
        SiteFamily {
            name: "generic-product-anchor",
            pattern: Regex::new(r"(?i)/product(?:/|\.|$)|/p/[^/]+").unwrap(),
            id_keyed: false,
        },
    ]
});

/// Groups interactions by inferred product-page identity.
#[derive(Debug, Default)]
pub struct ProductPageGrouper;

impl ProductPageGrouper {
    /// Create a grouper over the built-in site-family table.
    pub fn new() -> Self {
        Self
    }

    /// Group key for a URL, or `None` when no site family matches. URLs
    /// with no key stay available for category classification only.
    pub fn group_key(&self, url: &str) -> Option<String> {
        for family in SITE_FAMILIES.iter() {
            // The pid shape also appears on pure category browse URLs;
            // those are not product pages
            if family.name == "query-pid" && url.to_lowercase().contains("category") {
                continue;
            }
            if let Some(captures) = family.pattern.captures(url) {
                if family.id_keyed {
                    let id = captures.get(1)?.as_str();
                    let vendor = urls::hostname(url).map(|h| urls::vendor_token(&h))?;
                    return Some(format!("{}-product-{}", vendor, id));
                }
                return Some(urls::strip_query(url));
            }
        }
        None
    }

    /// Group interactions by product-page identity, preserving member
    /// order. Interactions on unmatched URLs are excluded.
    pub fn group(
        &self,
        interactions: &[ParsedInteraction],
    ) -> BTreeMap<String, Vec<ParsedInteraction>> {
        let mut groups: BTreeMap<String, Vec<ParsedInteraction>> = BTreeMap::new();
        for interaction in interactions {
            if let Some(key) = self.group_key(interaction.url()) {
                groups.entry(key).or_default().push(interaction.clone());
            }
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(url: &str) -> Option<String> {
        ProductPageGrouper::new().group_key(url)
    }

    #[test]
    fn test_numeric_productpage_family() {
        assert_eq!(
            key("https://www2.hm.com/en_us/productpage.1265337002.html"),
            Some("hm-product-1265337002".to_string())
        );
    }

    #[test]
    fn test_query_pid_family() {
        assert_eq!(
            key("https://www.gap.com/browse/product.do?pid=796255112&vid=1"),
            Some("gap-product-796255112".to_string())
        );
    }

    #[test]
    fn test_slug_numeric_family() {
        assert_eq!(
            key("https://www.nordstrom.com/s/ecco-soft-60-aeon-sneaker-women/8427767?origin=category"),
            Some("nordstrom-product-8427767".to_string())
        );
    }

    #[test]
    fn test_path_id_family() {
        assert_eq!(
            key("https://shop.example.com/p/classic-crew-tee/44821"),
            Some("example-product-44821".to_string())
        );
    }

    #[test]
    fn test_marketplace_asin_family() {
        assert_eq!(
            key("https://www.amazon.com/dp/B0C1XYZ123?th=1"),
            Some("amazon-product-B0C1XYZ123".to_string())
        );
    }

    #[test]
    fn test_pid_on_category_browse_is_not_a_product() {
        assert_eq!(key("https://www.gap.com/browse/category.do?pid=5743"), None);
    }

    #[test]
    fn test_fallback_strips_query_and_fragment() {
        assert_eq!(
            key("https://example.com/p/slug-only?color=black#reviews"),
            Some("https://example.com/p/slug-only".to_string())
        );
    }

    #[test]
    fn test_unmatched_url_excluded() {
        assert_eq!(key("https://example.com/browse/women"), None);
        assert_eq!(key("https://example.com/cart"), None);
    }
}
