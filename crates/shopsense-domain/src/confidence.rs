//! Persistence confidence floors

use serde::{Deserialize, Serialize};

/// Minimum classification confidence required before an entity is persisted.
///
/// The defaults (0.6 for categories, 0.7 for products) are inherited from
/// observed behavior, not calibration against ground truth, so they are
/// configuration rather than constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceFloors {
    /// Floor for category persistence
    pub category: f64,
    /// Floor for product persistence
    pub product: f64,
}

impl Default for ConfidenceFloors {
    fn default() -> Self {
        Self {
            category: 0.6,
            product: 0.7,
        }
    }
}

impl ConfidenceFloors {
    /// Whether a category with this confidence may be persisted.
    pub fn admits_category(&self, confidence: f64) -> bool {
        confidence >= self.category
    }

    /// Whether a product with this confidence may be persisted.
    pub fn admits_product(&self, confidence: f64) -> bool {
        confidence >= self.product
    }

    /// Validate that both floors are inside [0, 1].
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.category) {
            return Err(format!("category floor {} out of [0, 1]", self.category));
        }
        if !(0.0..=1.0).contains(&self.product) {
            return Err(format!("product floor {} out of [0, 1]", self.product));
        }
        Ok(())
    }
}
