//! The extraction pipeline
//!
//! Orchestrates one run: normalize each session's payload, classify every
//! interaction, derive domain/category/product records, persist them
//! through the repository, and compute the per-session navigation and
//! flow summaries.

use crate::error::PipelineError;
use crate::session::SessionRecord;
use crate::site::SiteExtractor;
use crate::stats::RunStats;
use shopsense_aggregator::{ProductAggregator, ProductPageGrouper};
use shopsense_analyzer::{
    FlowAnalyzer, NavigationArchitecture, NavigationExtractor, ShoppingFlowAnalysis,
};
use shopsense_classifier::{normalizer, urls, ClassifierConfig, IntentClassifier, Vocabulary};
use shopsense_domain::{
    Classification, ConfidenceFloors, ParsedInteraction, WorldModelRepository,
};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Per-session derived summaries, returned alongside the persisted
/// entities but never stored.
#[derive(Debug)]
pub struct SessionOutcome {
    /// Session identifier
    pub session_id: String,
    /// Navigation architecture as the shopper experienced it
    pub navigation: NavigationArchitecture,
    /// Shopping-funnel analysis
    pub flow: ShoppingFlowAnalysis,
}

/// The world-model extraction pipeline.
///
/// Generic over the repository so tests and callers can plug in any
/// storage backend.
pub struct Pipeline<R: WorldModelRepository> {
    repo: R,
    classifier: IntentClassifier,
    grouper: ProductPageGrouper,
    aggregator: ProductAggregator,
    site: SiteExtractor,
    navigation: NavigationExtractor,
    flow: FlowAnalyzer,
    floors: ConfidenceFloors,
}

impl<R: WorldModelRepository> Pipeline<R> {
    /// Create a pipeline with the default vocabulary and configuration.
    pub fn new(repo: R) -> Self {
        Self::with_config(repo, Vocabulary::default(), ClassifierConfig::default())
    }

    /// Create a pipeline with explicit vocabulary and configuration.
    pub fn with_config(repo: R, vocab: Vocabulary, config: ClassifierConfig) -> Self {
        let floors = config.floors;
        Self {
            repo,
            classifier: IntentClassifier::new(vocab.clone(), config.clone()),
            grouper: ProductPageGrouper::new(),
            aggregator: ProductAggregator::new(IntentClassifier::new(vocab.clone(), config)),
            site: SiteExtractor::new(vocab.clone()),
            navigation: NavigationExtractor::new(vocab),
            flow: FlowAnalyzer::new(),
            floors,
        }
    }

    /// The underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Process a batch of sessions.
    ///
    /// One bad session never aborts the run: its error is recorded in the
    /// stats and the next session proceeds.
    pub async fn process_batch(&self, sessions: &[SessionRecord]) -> (Vec<SessionOutcome>, RunStats) {
        let started = Instant::now();
        let mut stats = RunStats::new();
        let mut outcomes = Vec::new();

        for session in sessions {
            match self.process_session(session, &mut stats).await {
                Ok(outcome) => {
                    stats.sessions_processed += 1;
                    outcomes.push(outcome);
                }
                Err(err) => {
                    warn!(session_id = %session.session_id, error = %err, "session failed");
                    stats.record_failure(&session.session_id, &err.to_string());
                }
            }
        }

        stats.runtime_ms = started.elapsed().as_millis();
        info!("{}", stats.summary());
        (outcomes, stats)
    }

    /// Process one session end to end.
    pub async fn process_session(
        &self,
        session: &SessionRecord,
        stats: &mut RunStats,
    ) -> Result<SessionOutcome, PipelineError> {
        if session.enhanced_interactions.is_null() {
            return Err(PipelineError::Payload(
                "missing enhancedInteractions".to_string(),
            ));
        }

        let batch = normalizer::normalize_payload(&session.enhanced_interactions);
        stats.interactions_seen += batch.interactions.len() + batch.dropped;
        stats.interactions_dropped += batch.dropped;
        let interactions = batch.interactions;

        let context = session.context();
        let classifications: Vec<Classification> = interactions
            .iter()
            .enumerate()
            .map(|(idx, interaction)| {
                let classification =
                    self.classifier
                        .classify(interaction, context, &interactions[idx + 1..]);
                stats.record_classification(classification.kind());
                classification
            })
            .collect();

        self.persist_domains(&interactions, stats).await?;
        self.persist_categories(&classifications, stats).await?;
        self.persist_products(&interactions, context, stats).await?;

        Ok(SessionOutcome {
            session_id: session.session_id.clone(),
            navigation: self.navigation.extract(&interactions),
            flow: self.flow.analyze(&interactions),
        })
    }

    async fn persist_domains(
        &self,
        interactions: &[ParsedInteraction],
        stats: &mut RunStats,
    ) -> Result<(), PipelineError> {
        for domain in self.site.domains(interactions) {
            let existing = self
                .repo
                .get_domain(&domain.domain)
                .await
                .map_err(storage_err)?;
            if existing.is_none() {
                stats.domains_created += 1;
            }
            self.repo.upsert_domain(domain).await.map_err(storage_err)?;
        }
        Ok(())
    }

    async fn persist_categories(
        &self,
        classifications: &[Classification],
        stats: &mut RunStats,
    ) -> Result<(), PipelineError> {
        for (host, category) in self.site.categories(classifications) {
            if !self.floors.admits_category(category.confidence) {
                debug!(
                    path = %category.category_path,
                    confidence = category.confidence,
                    "category below confidence floor"
                );
                stats.low_confidence_skips += 1;
                continue;
            }
            let existing = self
                .repo
                .get_category(&host, &category.category_path)
                .await
                .map_err(storage_err)?;
            if existing.is_none() {
                stats.categories_created += 1;
            }
            self.repo
                .upsert_category(&host, category)
                .await
                .map_err(storage_err)?;
        }
        Ok(())
    }

    async fn persist_products(
        &self,
        interactions: &[ParsedInteraction],
        context: &shopsense_domain::SessionContext,
        stats: &mut RunStats,
    ) -> Result<(), PipelineError> {
        for (key, members) in self.grouper.group(interactions) {
            let Some(product) = self.aggregator.aggregate(&key, &members, context) else {
                continue;
            };
            if !self.floors.admits_product(product.confidence) {
                debug!(
                    id = %product.product_id,
                    confidence = product.confidence,
                    "product below confidence floor"
                );
                stats.low_confidence_skips += 1;
                continue;
            }
            let Some(host) = urls::hostname(&product.url)
                .or_else(|| members.first().and_then(|m| urls::hostname(m.url())))
            else {
                continue;
            };
            let sources: Vec<String> = members.iter().map(|m| m.id.clone()).collect();
            self.repo
                .upsert_product(&host, product, &sources)
                .await
                .map_err(storage_err)?;
            stats.products_upserted += 1;
        }
        Ok(())
    }
}

fn storage_err<E: std::error::Error>(err: E) -> PipelineError {
    PipelineError::Storage(err.to_string())
}
