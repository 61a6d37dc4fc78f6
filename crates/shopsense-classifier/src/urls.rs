//! URL shape predicates and hostname helpers
//!
//! Shared across the classifier, the product-page grouper, the site
//! extractor, and the analyzers. Hostname/URL parse failures are "no
//! signal", never errors.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

static CATEGORY_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)/(browse|category|categories|c|shop)(/|$)|/(men|women|kids|baby|girls|boys)(/|$)|[?&]cid=").unwrap()
});

static PRODUCT_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)/productpage\.\d+|/p/[^/]+|/dp/[A-Z0-9]{10}|/s/[^/]+/\d+|[?&]pid=|/product(/|\.|$)").unwrap()
});

static SEARCH_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)/search|[?&](q|query|searchterm)=").unwrap());

static SALE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)/(sale|clearance|deals)(/|$)").unwrap());

static CART_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)/(cart|bag|basket)(/|$|\.)").unwrap());

static CHECKOUT_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)/(checkout|payment|order)(/|$|\.)").unwrap());

static PURCHASE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)/(confirmation|order-confirm(ed|ation)?|thank-?you)(/|$|\.)").unwrap());

/// Whether the URL matches a category browse shape.
pub fn is_category_url(url: &str) -> bool {
    CATEGORY_URL.is_match(url) && !is_product_url(url)
}

/// Whether the URL matches a known product-page shape.
pub fn is_product_url(url: &str) -> bool {
    PRODUCT_URL.is_match(url)
}

/// Whether the URL matches a search shape.
pub fn is_search_url(url: &str) -> bool {
    SEARCH_URL.is_match(url)
}

/// Whether the URL matches a sale shape.
pub fn is_sale_url(url: &str) -> bool {
    SALE_URL.is_match(url)
}

/// Whether the URL is a cart page.
pub fn is_cart_url(url: &str) -> bool {
    CART_URL.is_match(url)
}

/// Whether the URL is a checkout page.
pub fn is_checkout_url(url: &str) -> bool {
    CHECKOUT_URL.is_match(url) && !is_cart_url(url)
}

/// Whether the URL is an order-confirmation page.
pub fn is_purchase_url(url: &str) -> bool {
    PURCHASE_URL.is_match(url)
}

/// Hostname of a URL, if it parses.
pub fn hostname(url: &str) -> Option<String> {
    Url::parse(url).ok()?.host_str().map(|h| h.to_lowercase())
}

/// Vendor token for group keys: the registrable label of the hostname
/// (`www2.hm.com` -> `hm`, `www.nordstrom.com` -> `nordstrom`).
pub fn vendor_token(host: &str) -> String {
    let labels: Vec<&str> = host.split('.').filter(|l| !l.is_empty()).collect();
    if labels.len() < 2 {
        return host.to_string();
    }
    let mut idx = labels.len() - 2;
    // Two-part public suffixes like co.uk
    if idx > 0 && matches!(labels[idx], "co" | "com" | "net" | "org" | "ac") {
        idx -= 1;
    }
    labels[idx].to_string()
}

/// The URL with query string and fragment stripped.
pub fn strip_query(url: &str) -> String {
    match Url::parse(url) {
        Ok(mut parsed) => {
            parsed.set_query(None);
            parsed.set_fragment(None);
            parsed.to_string()
        }
        Err(_) => url.split(['?', '#']).next().unwrap_or(url).to_string(),
    }
}

// Path prefixes that carry routing, not category meaning
const ROUTING_SEGMENTS: [&str; 6] = ["browse", "category", "categories", "c", "shop", "en_us"];

/// Normalized category path derived from a category-shaped URL
/// (`/browse/women/dresses` -> `women/dresses`). `None` when the URL does
/// not parse or no meaningful segments remain.
pub fn category_path_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segments: Vec<String> = parsed
        .path_segments()?
        .filter(|s| !s.is_empty())
        .map(|s| s.to_lowercase())
        .filter(|s| !ROUTING_SEGMENTS.contains(&s.as_str()))
        .filter(|s| !s.contains('.'))
        .collect();
    if segments.is_empty() {
        None
    } else {
        Some(segments.join("/"))
    }
}

/// Human-readable name from a URL slug (`ecco-soft-60-aeon-sneaker` ->
/// `Ecco Soft 60 Aeon Sneaker`).
pub fn title_from_slug(slug: &str) -> String {
    slug.split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
