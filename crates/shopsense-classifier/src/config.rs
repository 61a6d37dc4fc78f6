//! Configuration for the classifier

use crate::error::ClassifierError;
use serde::{Deserialize, Serialize};
use shopsense_domain::ConfidenceFloors;

/// Configuration for the intent classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Minimum element text length considered meaningful
    pub min_text_len: usize,

    /// Maximum element text length considered meaningful
    pub max_text_len: usize,

    /// Minimum text length for a product name candidate
    pub min_product_name_len: usize,

    /// Maximum text length for the category short-text test
    pub max_category_text_len: usize,

    /// Look-ahead window for disambiguation (interactions, not time)
    pub lookahead_window: usize,

    /// Persistence confidence floors
    pub floors: ConfidenceFloors,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            min_text_len: 2,
            max_text_len: 60,
            min_product_name_len: 5,
            max_category_text_len: 30,
            lookahead_window: 4,
            floors: ConfidenceFloors::default(),
        }
    }
}

impl ClassifierConfig {
    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ClassifierError> {
        toml::from_str(toml_str).map_err(|e| ClassifierError::TomlParse(e.to_string()))
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String, ClassifierError> {
        toml::to_string_pretty(self).map_err(|e| ClassifierError::TomlParse(e.to_string()))
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ClassifierError> {
        if self.min_text_len == 0 {
            return Err(ClassifierError::Config(
                "min_text_len must be greater than 0".to_string(),
            ));
        }
        if self.max_text_len <= self.min_text_len {
            return Err(ClassifierError::Config(
                "max_text_len must exceed min_text_len".to_string(),
            ));
        }
        if self.min_product_name_len < self.min_text_len {
            return Err(ClassifierError::Config(
                "min_product_name_len cannot be below min_text_len".to_string(),
            ));
        }
        if self.lookahead_window > 4 {
            return Err(ClassifierError::Config(
                "lookahead_window is bounded at 4 interactions".to_string(),
            ));
        }
        self.floors
            .validate()
            .map_err(ClassifierError::Config)?;
        Ok(())
    }
}
