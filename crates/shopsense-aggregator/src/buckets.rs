//! Typed attribute buckets
//!
//! Attribute values from a product-page group are sorted into exactly one
//! bucket each; the first matching bucket wins.

use serde::{Deserialize, Serialize};
use shopsense_classifier::Vocabulary;
use shopsense_domain::ProductVariants;

/// Accumulated attribute observations for one product-page group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeBuckets {
    /// Color values
    pub colors: Vec<String>,
    /// Size values
    pub sizes: Vec<String>,
    /// Style/fit values
    pub styles: Vec<String>,
    /// Cart/purchase action labels
    pub actions: Vec<String>,
    /// Availability phrases
    pub availability: Vec<String>,
}

impl AttributeBuckets {
    /// Sort `value` into the first bucket whose vocabulary it matches.
    /// A value lands in at most one bucket; unmatched values are dropped.
    /// Returns whether the value was absorbed.
    pub fn absorb(&mut self, value: &str, vocab: &Vocabulary) -> bool {
        let value = value.trim();
        if value.is_empty() {
            return false;
        }
        let bucket = if vocab.is_color(value) {
            &mut self.colors
        } else if vocab.is_size_token(value) {
            &mut self.sizes
        } else if vocab.is_style(value) {
            &mut self.styles
        } else if vocab.is_action_phrase(value) {
            &mut self.actions
        } else if vocab.is_availability_phrase(value) {
            &mut self.availability
        } else {
            return false;
        };
        push_unique(bucket, value);
        true
    }

    /// Whether every bucket is empty.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
            && self.sizes.is_empty()
            && self.styles.is_empty()
            && self.actions.is_empty()
            && self.availability.is_empty()
    }

    /// Split into the variant lists and the action/availability lists of
    /// an extracted product.
    pub fn into_parts(self) -> (ProductVariants, Vec<String>, Vec<String>) {
        (
            ProductVariants {
                colors: self.colors,
                sizes: self.sizes,
                styles: self.styles,
            },
            self.actions,
            self.availability,
        )
    }
}

fn push_unique(bucket: &mut Vec<String>, value: &str) {
    if !bucket.iter().any(|v| v.eq_ignore_ascii_case(value)) {
        bucket.push(value.to_string());
    }
}
