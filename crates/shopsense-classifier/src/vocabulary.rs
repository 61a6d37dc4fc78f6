//! Heuristic keyword vocabulary
//!
//! All keyword tables the classifier matches against, externalized as data
//! so new site families can be added without touching classifier logic.

use crate::error::ClassifierError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// Size chips: xs/s/m/l/xl..., 1-3 digit numerics, and waist sizes like 32w
static SIZE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(xs|s|m|l|xl|xxl|xxxl|\d{1,3}|\d{1,3}w)$").unwrap());

/// Keyword tables used by the intent classifier and attribute buckets.
///
/// Matching is case-insensitive. Term lists hold lowercase entries;
/// `from_toml` allows site-specific overrides to be deployed as data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// UI control labels carrying no entity meaning
    pub ui_terms: Vec<String>,
    /// Cart/purchase action phrases
    pub action_phrases: Vec<String>,
    /// Category vocabulary: gender/age segments and product-type nouns
    pub category_terms: Vec<String>,
    /// Promotional category terms (sale, new, featured)
    pub promo_terms: Vec<String>,
    /// Known color names
    pub color_names: Vec<String>,
    /// Style/fit keywords
    pub style_keywords: Vec<String>,
    /// Availability phrases
    pub availability_phrases: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        fn list(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }

        Self {
            ui_terms: list(&[
                "back",
                "continue",
                "next",
                "previous",
                "close",
                "menu",
                "sort",
                "sort by",
                "filter",
                "filters",
                "apply",
                "cancel",
                "search",
                "sign in",
                "log in",
                "sign up",
                "account",
                "view all",
                "show more",
                "load more",
                "skip to content",
                "accept cookies",
            ]),
            action_phrases: list(&[
                "add to cart",
                "add to bag",
                "add to basket",
                "buy now",
                "shop now",
                "checkout",
                "proceed to checkout",
                "place order",
            ]),
            category_terms: list(&[
                "men",
                "women",
                "kids",
                "baby",
                "girls",
                "boys",
                "shoes",
                "accessories",
                "clothing",
                "jeans",
                "shirts",
                "t-shirts",
                "dresses",
                "sweaters",
                "jackets",
                "pants",
                "shorts",
                "activewear",
                "swimwear",
                "home",
                "beauty",
            ]),
            promo_terms: list(&["sale", "new", "new arrivals", "featured", "clearance"]),
            color_names: list(&[
                "black", "white", "gray", "grey", "navy", "blue", "red", "green", "yellow",
                "orange", "pink", "purple", "brown", "beige", "khaki", "olive", "cream", "tan",
                "burgundy", "charcoal",
            ]),
            style_keywords: list(&[
                "slim", "regular", "loose", "fit", "relaxed", "skinny", "straight", "bootcut",
                "oversized", "cropped",
            ]),
            availability_phrases: list(&[
                "in stock",
                "sold out",
                "out of stock",
                "low stock",
                "only a few left",
                "available",
                "unavailable",
            ]),
        }
    }
}

impl Vocabulary {
    /// Load vocabulary overrides from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ClassifierError> {
        toml::from_str(toml_str).map_err(|e| ClassifierError::TomlParse(e.to_string()))
    }

    /// Validate that no table is empty.
    pub fn validate(&self) -> Result<(), ClassifierError> {
        let tables: [(&str, &Vec<String>); 7] = [
            ("ui_terms", &self.ui_terms),
            ("action_phrases", &self.action_phrases),
            ("category_terms", &self.category_terms),
            ("promo_terms", &self.promo_terms),
            ("color_names", &self.color_names),
            ("style_keywords", &self.style_keywords),
            ("availability_phrases", &self.availability_phrases),
        ];
        for (name, table) in tables {
            if table.is_empty() {
                return Err(ClassifierError::Vocabulary(format!("{} is empty", name)));
            }
        }
        Ok(())
    }

    /// Exact match against the UI control table.
    pub fn is_ui_term(&self, text: &str) -> bool {
        let lower = text.trim().to_lowercase();
        self.ui_terms.iter().any(|t| *t == lower)
    }

    /// Whether the text is (or contains) a cart/purchase action phrase.
    pub fn is_action_phrase(&self, text: &str) -> bool {
        let lower = text.trim().to_lowercase();
        self.action_phrases.iter().any(|t| lower.contains(t.as_str()))
    }

    /// Whether the text is a bare size token.
    pub fn is_size_token(&self, text: &str) -> bool {
        SIZE_TOKEN.is_match(text.trim())
    }

    /// Whether the text is a known color name.
    pub fn is_color(&self, text: &str) -> bool {
        let lower = text.trim().to_lowercase();
        self.color_names.iter().any(|t| *t == lower)
    }

    /// Whether the text is a style/fit keyword (single term or phrase of
    /// style terms, e.g. "Slim Fit").
    pub fn is_style(&self, text: &str) -> bool {
        let lower = text.trim().to_lowercase();
        if lower.is_empty() {
            return false;
        }
        lower
            .split_whitespace()
            .all(|word| self.style_keywords.iter().any(|t| *t == word))
    }

    /// Whether the text is an availability phrase.
    pub fn is_availability_phrase(&self, text: &str) -> bool {
        let lower = text.trim().to_lowercase();
        self.availability_phrases
            .iter()
            .any(|t| lower.contains(t.as_str()))
    }

    /// Whether the text matches the category vocabulary (segment noun,
    /// product-type noun, or promotional term).
    pub fn is_category_term(&self, text: &str) -> bool {
        let lower = text.trim().to_lowercase();
        self.category_terms.iter().any(|t| *t == lower)
            || self.promo_terms.iter().any(|t| *t == lower)
    }

    /// Whether any single word of the text is category vocabulary.
    pub fn contains_category_term(&self, text: &str) -> bool {
        let lower = text.trim().to_lowercase();
        lower.split_whitespace().any(|word| {
            self.category_terms.iter().any(|t| *t == word)
                || self.promo_terms.iter().any(|t| *t == word)
        })
    }

    /// Classify a category term into a coarse category type.
    pub fn category_type_of(&self, text: &str) -> &'static str {
        let lower = text.trim().to_lowercase();
        if self.promo_terms.iter().any(|t| lower.contains(t.as_str())) {
            "promotional"
        } else if matches!(
            lower.as_str(),
            "men" | "women" | "kids" | "baby" | "girls" | "boys"
        ) {
            "segment"
        } else {
            "product_type"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_validates() {
        assert!(Vocabulary::default().validate().is_ok());
    }

    #[test]
    fn test_size_tokens() {
        let vocab = Vocabulary::default();
        assert!(vocab.is_size_token("M"));
        assert!(vocab.is_size_token("xl"));
        assert!(vocab.is_size_token("32"));
        assert!(vocab.is_size_token("32W"));
        assert!(!vocab.is_size_token("1234"));
        assert!(!vocab.is_size_token("Medium Roast"));
    }

    #[test]
    fn test_colors_and_styles() {
        let vocab = Vocabulary::default();
        assert!(vocab.is_color("Black"));
        assert!(vocab.is_color("  navy "));
        assert!(!vocab.is_color("Blackberry"));
        assert!(vocab.is_style("Slim"));
        assert!(vocab.is_style("Slim Fit"));
        assert!(!vocab.is_style("Slim Jeans"));
    }

    #[test]
    fn test_action_and_availability() {
        let vocab = Vocabulary::default();
        assert!(vocab.is_action_phrase("Add to Bag"));
        assert!(vocab.is_action_phrase("ADD TO CART"));
        assert!(!vocab.is_action_phrase("Bag"));
        assert!(vocab.is_availability_phrase("Only a few left!"));
        assert!(vocab.is_availability_phrase("Sold Out"));
    }

    #[test]
    fn test_category_terms() {
        let vocab = Vocabulary::default();
        assert!(vocab.is_category_term("Women"));
        assert!(vocab.is_category_term("sale"));
        assert!(!vocab.is_category_term("Classic Cotton Crew Tee"));
        assert!(vocab.contains_category_term("jeans on sale"));
        assert_eq!(vocab.category_type_of("women"), "segment");
        assert_eq!(vocab.category_type_of("sale"), "promotional");
        assert_eq!(vocab.category_type_of("jeans"), "product_type");
    }

    #[test]
    fn test_toml_overrides() {
        let toml = r#"
            color_names = ["heather", "marl"]
        "#;
        let vocab = Vocabulary::from_toml(toml).unwrap();
        assert!(vocab.is_color("heather"));
        assert!(!vocab.is_color("black"));
        // Unspecified tables keep their defaults
        assert!(vocab.is_ui_term("back"));
    }
}
