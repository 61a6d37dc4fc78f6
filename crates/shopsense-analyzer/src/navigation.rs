//! Navigation architecture extraction
//!
//! Builds the category hierarchy, the primary/secondary/footer navigation
//! inventories, and the observed hierarchy depth from a full session's
//! interaction stream.

use serde::{Deserialize, Serialize};
use shopsense_classifier::{urls, Vocabulary};
use shopsense_domain::ParsedInteraction;
use std::collections::BTreeMap;
use tracing::debug;

/// A node in the observed category hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNode {
    /// Normalized category path
    pub path: String,
    /// Display name (last path segment, prettified)
    pub name: String,
    /// Parent path (the path minus its last segment)
    pub parent: Option<String>,
    /// Depth level, 0 for top-level categories
    pub level: usize,
    /// URLs this category was observed at
    pub urls: Vec<String>,
}

/// One entry in a navigation inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationItem {
    /// Link/button label
    pub label: String,
    /// Target or host URL
    pub url: String,
    /// Click count across the session
    pub clicks: usize,
    /// Engagement rating derived from click count
    pub engagement: Engagement,
}

/// Three-bucket engagement rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Engagement {
    /// More than 3 occurrences
    High,
    /// More than 1 occurrence
    Medium,
    /// A single occurrence
    Low,
}

impl Engagement {
    fn from_clicks(clicks: usize) -> Self {
        if clicks > 3 {
            Engagement::High
        } else if clicks > 1 {
            Engagement::Medium
        } else {
            Engagement::Low
        }
    }
}

/// The derived navigation architecture of a session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationArchitecture {
    /// Observed category hierarchy
    pub hierarchy: Vec<CategoryNode>,
    /// Primary navigation inventory
    pub primary: Vec<NavigationItem>,
    /// Secondary navigation inventory
    pub secondary: Vec<NavigationItem>,
    /// Footer navigation inventory
    pub footer: Vec<NavigationItem>,
    /// Hierarchy depth: max category level + 1
    pub depth: usize,
}

/// Extracts navigation architecture from an interaction stream.
pub struct NavigationExtractor {
    vocab: Vocabulary,
}

impl NavigationExtractor {
    /// Create an extractor with the given vocabulary.
    pub fn new(vocab: Vocabulary) -> Self {
        Self { vocab }
    }

    /// Build the navigation architecture for one session.
    pub fn extract(&self, interactions: &[ParsedInteraction]) -> NavigationArchitecture {
        let hierarchy = self.build_hierarchy(interactions);
        let depth = hierarchy
            .iter()
            .map(|node| node.level)
            .max()
            .map(|level| level + 1)
            .unwrap_or(0);

        let (primary, secondary, footer) = self.build_inventories(interactions);
        debug!(
            categories = hierarchy.len(),
            depth,
            primary = primary.len(),
            "extracted navigation architecture"
        );

        NavigationArchitecture {
            hierarchy,
            primary,
            secondary,
            footer,
            depth,
        }
    }

    fn build_hierarchy(&self, interactions: &[ParsedInteraction]) -> Vec<CategoryNode> {
        let mut nodes: BTreeMap<String, CategoryNode> = BTreeMap::new();

        for interaction in interactions {
            if interaction.event_type != "click" || !interaction.is_link_like() {
                continue;
            }
            let url = interaction.url();
            if !urls::is_category_url(url) {
                continue;
            }
            let Some(path) = urls::category_path_from_url(url) else {
                continue;
            };

            let level = path.matches('/').count();
            let parent = path.rsplit_once('/').map(|(head, _)| head.to_string());
            let name = path
                .rsplit('/')
                .next()
                .map(urls::title_from_slug)
                .unwrap_or_default();

            let node = nodes.entry(path.clone()).or_insert_with(|| CategoryNode {
                path,
                name,
                parent,
                level,
                urls: Vec::new(),
            });
            if !node.urls.contains(&url.to_string()) {
                node.urls.push(url.to_string());
            }
        }

        nodes.into_values().collect()
    }

    fn build_inventories(
        &self,
        interactions: &[ParsedInteraction],
    ) -> (Vec<NavigationItem>, Vec<NavigationItem>, Vec<NavigationItem>) {
        #[derive(PartialEq, Eq, PartialOrd, Ord)]
        enum Zone {
            Primary,
            Secondary,
            Footer,
        }

        let mut counts: BTreeMap<(Zone, String, String), usize> = BTreeMap::new();

        for interaction in interactions {
            if interaction.event_type != "click" || !interaction.is_clickable() {
                continue;
            }
            let label = interaction.text();
            if label.is_empty() {
                continue;
            }

            let element = &interaction.element;
            let zone = if element.tag == "footer" || element.has_class_hint("footer") {
                Zone::Footer
            } else if element.has_class_hint("sub")
                || element.has_class_hint("secondary")
                || self
                    .vocab
                    .promo_terms
                    .iter()
                    .any(|t| label.to_lowercase().contains(t.as_str()))
            {
                Zone::Secondary
            } else {
                Zone::Primary
            };

            *counts
                .entry((zone, label.to_string(), interaction.url().to_string()))
                .or_insert(0) += 1;
        }

        let mut primary = Vec::new();
        let mut secondary = Vec::new();
        let mut footer = Vec::new();
        for ((zone, label, url), clicks) in counts {
            let item = NavigationItem {
                label,
                url,
                clicks,
                engagement: Engagement::from_clicks(clicks),
            };
            match zone {
                Zone::Primary => primary.push(item),
                Zone::Secondary => secondary.push(item),
                Zone::Footer => footer.push(item),
            }
        }
        (primary, secondary, footer)
    }
}

impl Default for NavigationExtractor {
    fn default() -> Self {
        Self::new(Vocabulary::default())
    }
}
