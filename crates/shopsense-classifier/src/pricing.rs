//! Pricing and availability extraction
//!
//! A focused utility used by the product grouper/aggregator: pulls price,
//! discount, and stock status out of an interaction's own text or, failing
//! that, its recorded spatial neighbors.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use shopsense_domain::ParsedInteraction;

/// Where the accepted price was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    /// The interacted element's own text
    Element,
    /// A spatial neighbor's text
    Neighbor,
}

/// Stock status inferred from keyword scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    /// Explicitly in stock / purchasable
    InStock,
    /// Explicitly out of stock
    OutOfStock,
    /// Limited availability
    LimitedStock,
    /// No signal
    Unknown,
}

/// Extracted price and availability information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceInfo {
    /// Current price
    pub price: f64,
    /// Pre-discount price, when two distinct neighbor prices were seen
    pub original_price: Option<f64>,
    /// Rounded discount percentage
    pub discount_percent: Option<u32>,
    /// Currency code
    pub currency: String,
    /// Inferred stock status
    pub stock_status: StockStatus,
    /// Where the price was found
    pub price_extracted_from: PriceSource,
}

struct PricePattern {
    regex: Regex,
    confidence: f64,
}

// Ordered by pattern specificity; each carries its own confidence.
static PRICE_PATTERNS: Lazy<Vec<PricePattern>> = Lazy::new(|| {
    let table: [(&str, f64); 5] = [
        (r"(?i)price:\s*\$(\d+(?:\.\d{1,2})?)", 0.95),
        (r"(?i)sale:\s*\$(\d+(?:\.\d{1,2})?)", 0.90),
        (r"(?i)now:\s*\$(\d+(?:\.\d{1,2})?)", 0.85),
        (r"\$(\d+(?:\.\d{1,2})?)", 0.90),
        (r"(?i)(\d+(?:\.\d{1,2})?)\s*usd", 0.80),
    ];
    table
        .iter()
        .map(|(pattern, confidence)| PricePattern {
            regex: Regex::new(pattern).unwrap(),
            confidence: *confidence,
        })
        .collect()
});

const MIN_PATTERN_CONFIDENCE: f64 = 0.7;
const MAX_SANE_PRICE: f64 = 10_000.0;

/// Extract price and stock information from an interaction.
///
/// Precedence: the element's own text first; spatial neighbors only when
/// the element text has no acceptable match. Two distinct neighbor prices
/// are read as a markdown: the larger is the original price.
pub fn extract_price(interaction: &ParsedInteraction) -> Option<PriceInfo> {
    let neighbors = &interaction.metadata.neighbor_texts;
    let stock_status = scan_stock(interaction.text(), neighbors);

    if let Some(price) = first_price(interaction.text()) {
        return Some(PriceInfo {
            price,
            original_price: None,
            discount_percent: None,
            currency: "USD".to_string(),
            stock_status,
            price_extracted_from: PriceSource::Element,
        });
    }

    let mut neighbor_prices: Vec<f64> = Vec::new();
    for text in neighbors {
        if let Some(price) = first_price(text) {
            if !neighbor_prices.contains(&price) {
                neighbor_prices.push(price);
            }
        }
    }

    match neighbor_prices.len() {
        0 => None,
        1 => Some(PriceInfo {
            price: neighbor_prices[0],
            original_price: None,
            discount_percent: None,
            currency: "USD".to_string(),
            stock_status,
            price_extracted_from: PriceSource::Neighbor,
        }),
        _ => {
            let price = neighbor_prices.iter().copied().fold(f64::MAX, f64::min);
            let original = neighbor_prices.iter().copied().fold(f64::MIN, f64::max);
            let discount = ((original - price) / original * 100.0).round() as u32;
            Some(PriceInfo {
                price,
                original_price: Some(original),
                discount_percent: Some(discount),
                currency: "USD".to_string(),
                stock_status,
                price_extracted_from: PriceSource::Neighbor,
            })
        }
    }
}

/// First acceptable price in `text`: the highest-priority pattern whose
/// confidence clears the bar and whose amount is sane.
fn first_price(text: &str) -> Option<f64> {
    for pattern in PRICE_PATTERNS.iter() {
        if pattern.confidence <= MIN_PATTERN_CONFIDENCE {
            continue;
        }
        if let Some(captures) = pattern.regex.captures(text) {
            if let Ok(amount) = captures[1].parse::<f64>() {
                if amount > 0.0 && amount < MAX_SANE_PRICE {
                    return Some(amount);
                }
            }
        }
    }
    None
}

fn scan_stock(element_text: &str, neighbors: &[String]) -> StockStatus {
    let mut combined = element_text.to_lowercase();
    for text in neighbors {
        combined.push(' ');
        combined.push_str(&text.to_lowercase());
    }

    if ["out of stock", "sold out", "unavailable"]
        .iter()
        .any(|k| combined.contains(k))
    {
        StockStatus::OutOfStock
    } else if ["limited", "only", "few left"]
        .iter()
        .any(|k| combined.contains(k))
    {
        StockStatus::LimitedStock
    } else if ["in stock", "available", "add to cart"]
        .iter()
        .any(|k| combined.contains(k))
    {
        StockStatus::InStock
    } else {
        StockStatus::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopsense_domain::{
        ElementInfo, InteractionMetadata, PageContext, PageState, ParsedInteraction, Selectors,
    };

    fn interaction(text: &str, neighbors: &[&str]) -> ParsedInteraction {
        ParsedInteraction {
            id: "i-0".to_string(),
            event_type: "click".to_string(),
            timestamp: 0.0,
            session_time: 0.0,
            context: PageContext {
                url: "https://example.com/p/tee/123".to_string(),
                ..Default::default()
            },
            element: ElementInfo {
                text: text.to_string(),
                tag: "span".to_string(),
                ..Default::default()
            },
            selectors: Selectors::default(),
            state: PageState::default(),
            metadata: InteractionMetadata {
                neighbor_texts: neighbors.iter().map(|s| s.to_string()).collect(),
            },
        }
    }

    #[test]
    fn test_element_text_wins_over_neighbors() {
        let info = extract_price(&interaction("Price: $45.00", &["$60.00"])).unwrap();
        assert_eq!(info.price, 45.0);
        assert_eq!(info.original_price, None);
        assert_eq!(info.price_extracted_from, PriceSource::Element);
    }

    #[test]
    fn test_neighbor_discount_inference() {
        let info = extract_price(&interaction("Add to cart", &["$45", "$60"])).unwrap();
        assert_eq!(info.price, 45.0);
        assert_eq!(info.original_price, Some(60.0));
        assert_eq!(info.discount_percent, Some(25));
        assert_eq!(info.price_extracted_from, PriceSource::Neighbor);
    }

    #[test]
    fn test_single_neighbor_price() {
        let info = extract_price(&interaction("Buy", &["Now: $19.99"])).unwrap();
        assert_eq!(info.price, 19.99);
        assert_eq!(info.original_price, None);
        assert_eq!(info.price_extracted_from, PriceSource::Neighbor);
    }

    #[test]
    fn test_usd_suffix_pattern() {
        let info = extract_price(&interaction("129.50 USD", &[])).unwrap();
        assert_eq!(info.price, 129.5);
    }

    #[test]
    fn test_no_price_anywhere() {
        assert!(extract_price(&interaction("Classic Cotton Crew Tee", &[])).is_none());
    }

    #[test]
    fn test_insane_amount_rejected() {
        assert!(extract_price(&interaction("$99999", &[])).is_none());
        assert!(extract_price(&interaction("$0", &[])).is_none());
    }

    #[test]
    fn test_stock_status_priority() {
        let info = extract_price(&interaction("$20", &["Sold out"])).unwrap();
        assert_eq!(info.stock_status, StockStatus::OutOfStock);

        let info = extract_price(&interaction("$20", &["Only a few left"])).unwrap();
        assert_eq!(info.stock_status, StockStatus::LimitedStock);

        let info = extract_price(&interaction("$20", &["In stock, ships today"])).unwrap();
        assert_eq!(info.stock_status, StockStatus::InStock);

        let info = extract_price(&interaction("$20", &[])).unwrap();
        assert_eq!(info.stock_status, StockStatus::Unknown);
    }
}
