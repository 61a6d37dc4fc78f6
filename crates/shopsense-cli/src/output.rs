//! Report assembly and output formatting.

use crate::cli::CliFormat;
use crate::error::Result;
use serde::Serialize;
use shopsense_analyzer::CompletionStatus;
use shopsense_domain::{ExtractedCategory, ExtractedDomain, ExtractedProduct};
use shopsense_pipeline::{RunStats, SessionOutcome};
use shopsense_store::MemoryRepository;

/// The full outcome of one analyze run.
#[derive(Debug, Serialize)]
pub struct RunReport {
    /// Run counters
    pub stats: RunStats,
    /// Extracted entities grouped per domain
    pub domains: Vec<DomainReport>,
    /// Per-session funnel summaries
    pub sessions: Vec<SessionReport>,
}

/// Entities extracted for one domain.
#[derive(Debug, Serialize)]
pub struct DomainReport {
    /// The domain record
    pub domain: ExtractedDomain,
    /// Categories observed on this domain
    pub categories: Vec<ExtractedCategory>,
    /// Products observed on this domain
    pub products: Vec<ProductReport>,
}

/// One product with its provenance.
#[derive(Debug, Serialize)]
pub struct ProductReport {
    /// The product record
    #[serde(flatten)]
    pub product: ExtractedProduct,
    /// Interaction ids that contributed
    pub source_interactions: Vec<String>,
}

/// One session's funnel summary.
#[derive(Debug, Serialize)]
pub struct SessionReport {
    /// Session identifier
    pub session_id: String,
    /// Funnel completion status
    pub completion: CompletionStatus,
    /// Funnel stage visits
    pub stage_visits: usize,
    /// Whether cart activity was abandoned
    pub abandoned_cart: bool,
    /// Observed navigation hierarchy depth
    pub navigation_depth: usize,
}

/// Assemble a report from the repository contents and session outcomes.
pub async fn build_report(
    repo: &MemoryRepository,
    outcomes: &[SessionOutcome],
    stats: RunStats,
) -> RunReport {
    let mut domains = Vec::new();
    for domain in repo.domains().await {
        let categories = repo.categories_for(&domain.domain).await;
        let products = repo
            .products_for(&domain.domain)
            .await
            .into_iter()
            .map(|stored| ProductReport {
                product: stored.product,
                source_interactions: stored.source_interactions,
            })
            .collect();
        domains.push(DomainReport {
            domain,
            categories,
            products,
        });
    }

    let sessions = outcomes
        .iter()
        .map(|outcome| SessionReport {
            session_id: outcome.session_id.clone(),
            completion: outcome.flow.completion,
            stage_visits: outcome.flow.stages.len(),
            abandoned_cart: outcome.flow.abandoned_cart,
            navigation_depth: outcome.navigation.depth,
        })
        .collect();

    RunReport {
        stats,
        domains,
        sessions,
    }
}

/// Renders reports in the selected output format.
pub struct Formatter {
    format: CliFormat,
}

impl Formatter {
    /// Create a formatter for the given format.
    pub fn new(format: CliFormat) -> Self {
        Self { format }
    }

    /// Render a full run report.
    pub fn render(&self, report: &RunReport) -> Result<String> {
        match self.format {
            CliFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            CliFormat::Table => Ok(render_text(report)),
        }
    }
}

fn render_text(report: &RunReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", report.stats.summary()));

    for entry in &report.domains {
        out.push_str(&format!(
            "\n{} ({})\n",
            entry.domain.site_name, entry.domain.domain
        ));
        for category in &entry.categories {
            out.push_str(&format!(
                "  category  {:<30} {:<14} {:.2}\n",
                category.category_path, category.category_type, category.confidence
            ));
        }
        for product in &entry.products {
            let price = product
                .product
                .price
                .map(|p| format!("${:.2}", p))
                .unwrap_or_else(|| "-".to_string());
            out.push_str(&format!(
                "  product   {:<30} {:<14} {:.2}\n",
                product.product.product_name, price, product.product.confidence
            ));
        }
    }

    if !report.sessions.is_empty() {
        out.push('\n');
    }
    for session in &report.sessions {
        let completion = match session.completion {
            CompletionStatus::Completed => "completed",
            CompletionStatus::InProgress => "in progress",
            CompletionStatus::Abandoned => "abandoned",
        };
        out.push_str(&format!(
            "session {}: {} ({} stage visits, depth {})\n",
            session.session_id, completion, session.stage_visits, session.navigation_depth
        ));
    }
    out
}
