//! Pipeline coordination from index pages to enriched content.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::{Instrument, Span};

use crate::config::ScrapeConfig;
use crate::content::{self, ContentItem};
use crate::corrections::CorrectionTable;
use crate::errors::ScrapeError;
use crate::extractor::{Extractor, PatternSet};
use crate::limiter::ConcurrencyLimiter;
use crate::paginator::{IndexApi, PageRequest, Paginator};
use crate::resolver::{ContentResolver, MetadataProvider};
use crate::types::{Category, EnrichedContent, ModelType, RawResult};

/// Describes one index provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Label carried by every log line of the provider
    pub name: String,
    pub model_type: ModelType,
    /// Initial request; per-page requests are derived from it
    pub query: PageRequest,
    /// Title patterns in priority order
    pub patterns: PatternSet,
}

impl ProviderConfig {
    /// Creates a provider using the built-in patterns of its category.
    ///
    /// # Errors
    /// - `ScrapeError::InvalidPattern` - Never for the shipped patterns
    pub fn new(
        name: impl Into<String>,
        model_type: ModelType,
        query: PageRequest,
    ) -> Result<Self, ScrapeError> {
        Ok(Self {
            name: name.into(),
            model_type,
            query,
            patterns: PatternSet::defaults_for(model_type.category())?,
        })
    }

    /// Replaces the title patterns.
    pub fn with_patterns(mut self, patterns: PatternSet) -> Self {
        self.patterns = patterns;
        self
    }

    pub fn category(&self) -> Category {
        self.model_type.category()
    }
}

/// Stage of a run.
///
/// `Failed` is only reachable from `Paginating`; item-level problems never
/// fail the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Init,
    Paginating,
    Extracting,
    Resolving,
    Done,
    Failed,
}

/// Output of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Enriched records in completion order
    pub content: Vec<EnrichedContent>,
    /// Results no title pattern matched
    pub unmatched: usize,
    /// Items dropped as expected skips
    pub skipped: usize,
    /// Items whose resolution failed
    pub failed: usize,
    pub state: RunState,
}

/// Drives pagination, extraction and bounded resolution for one provider.
#[derive(Debug)]
pub struct Orchestrator {
    provider: ProviderConfig,
    paginator: Paginator,
    extractor: Extractor,
    resolver: ContentResolver,
    limiter: ConcurrencyLimiter,
    state: watch::Sender<RunState>,
    span: Span,
}

impl Orchestrator {
    /// Wires the pipeline components for a provider.
    ///
    /// # Errors
    /// - `ScrapeError::Configuration` - Configuration fails validation
    pub fn new(
        provider: ProviderConfig,
        index: Arc<dyn IndexApi>,
        metadata: Arc<dyn MetadataProvider>,
        corrections: Arc<CorrectionTable>,
        config: &ScrapeConfig,
    ) -> Result<Self, ScrapeError> {
        config.validate()?;

        let span = tracing::info_span!("provider", name = %provider.name);
        let (state, _) = watch::channel(RunState::Init);

        Ok(Self {
            paginator: Paginator::new(index, provider.name.clone(), config, span.clone()),
            extractor: Extractor::new(provider.patterns.clone(), span.clone()),
            resolver: ContentResolver::new(corrections, metadata, span.clone()),
            limiter: ConcurrencyLimiter::new(config.max_concurrency)?,
            provider,
            state,
            span,
        })
    }

    /// Receiver of run-state transitions.
    pub fn subscribe(&self) -> watch::Receiver<RunState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> RunState {
        *self.state.borrow()
    }

    pub fn provider(&self) -> &ProviderConfig {
        &self.provider
    }

    /// Runs the provider's configured query and returns the enriched records.
    ///
    /// # Errors
    /// - `ScrapeError::NoPages` - Index reports no pages
    /// - Any error of a page request
    pub async fn search(&self) -> Result<Vec<EnrichedContent>, ScrapeError> {
        let query = self.provider.query.clone();
        Ok(self.run(&query).await?.content)
    }

    /// Runs the whole pipeline for a query.
    ///
    /// Only pagination errors end the run with an error; per-item outcomes
    /// are tallied in the report.
    ///
    /// # Errors
    /// - `ScrapeError::NoPages` - Index reports no pages
    /// - Any error of a page request
    pub async fn run(&self, query: &PageRequest) -> Result<RunReport, ScrapeError> {
        async {
            self.transition(RunState::Paginating);
            let results = match self.paginator.fetch_all(query).await {
                Ok(results) => results,
                Err(error) => {
                    tracing::error!("{}: {}", self.provider.name, error);
                    self.transition(RunState::Failed);
                    return Err(error);
                }
            };

            self.transition(RunState::Extracting);
            let (items, unmatched, mut skipped) = self.extract_all(&results, &query.language);

            self.transition(RunState::Resolving);
            let outcomes = self
                .limiter
                .run(items, |item| self.resolver.resolve(item))
                .await;

            let mut content = Vec::with_capacity(outcomes.len());
            let mut failed = 0;
            for outcome in outcomes {
                match outcome.result {
                    Ok(Some(enriched)) => content.push(enriched),
                    Ok(None) => skipped += 1,
                    Err(error) => {
                        tracing::error!("{}: {}", self.provider.name, error);
                        failed += 1;
                    }
                }
            }

            tracing::info!(
                "{}: Resolved {} items ({} unmatched, {} skipped, {} failed)",
                self.provider.name,
                content.len(),
                unmatched,
                skipped,
                failed
            );
            self.transition(RunState::Done);

            Ok::<_, ScrapeError>(RunReport {
                content,
                unmatched,
                skipped,
                failed,
                state: RunState::Done,
            })
        }
        .instrument(self.span.clone())
        .await
    }

    /// Extracts and assembles content items; returns them with the
    /// unmatched and skipped counts.
    fn extract_all(
        &self,
        results: &[RawResult],
        language: &str,
    ) -> (Vec<ContentItem>, usize, usize) {
        let category = self.provider.category();
        let mut items = Vec::with_capacity(results.len());
        let mut unmatched = 0;
        let mut skipped = 0;

        for raw in results {
            let language = raw.language.as_deref().unwrap_or(language);
            let Some(attributes) = self.extractor.extract(raw, language) else {
                unmatched += 1;
                continue;
            };

            match ContentItem::from_raw(raw, attributes, category, &self.provider.name) {
                Some(item) => items.push(item),
                None => {
                    tracing::info!("{}: No torrent payload in '{}'", self.provider.name, raw.title);
                    skipped += 1;
                }
            }
        }

        (content::coalesce(items), unmatched, skipped)
    }

    fn transition(&self, state: RunState) {
        tracing::debug!("{}: {:?}", self.provider.name, state);
        self.state.send_replace(state);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::paginator::SearchPage;
    use crate::types::{CanonicalId, MetadataRecord};

    /// Index fake serving the same page for every request.
    #[derive(Debug)]
    struct OnePageIndex {
        page: serde_json::Value,
        calls: AtomicUsize,
    }

    impl OnePageIndex {
        fn new(page: serde_json::Value) -> Self {
            Self {
                page,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl IndexApi for OnePageIndex {
        async fn search(&self, _request: &PageRequest) -> Result<SearchPage, ScrapeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            serde_json::from_value(self.page.clone()).map_err(|e| ScrapeError::ParseError {
                reason: e.to_string(),
            })
        }
    }

    /// Metadata fake listing every slug except the ones named in `missing`,
    /// and failing for the ones named in `broken`.
    #[derive(Debug, Default)]
    struct SlugMetadata {
        missing: Vec<&'static str>,
        broken: Vec<&'static str>,
    }

    #[async_trait]
    impl MetadataProvider for SlugMetadata {
        async fn lookup(
            &self,
            _category: Category,
            id: &CanonicalId,
        ) -> Result<Option<MetadataRecord>, ScrapeError> {
            if self.broken.contains(&id.as_str()) {
                return Err(ScrapeError::ProviderError {
                    reason: "503 Service Unavailable".to_string(),
                });
            }
            if self.missing.contains(&id.as_str()) {
                return Ok(None);
            }
            Ok(Some(MetadataRecord {
                id: Some(format!("id-{id}")),
                title: id.to_string(),
                ..MetadataRecord::default()
            }))
        }
    }

    fn orchestrator(
        model_type: ModelType,
        index: Arc<OnePageIndex>,
        metadata: SlugMetadata,
    ) -> Orchestrator {
        let provider = ProviderConfig::new("Test", model_type, PageRequest::paged("en")).unwrap();
        Orchestrator::new(
            provider,
            index,
            Arc::new(metadata),
            Arc::new(CorrectionTable::new()),
            &ScrapeConfig::default(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_one_matched_one_unmatched_movie() {
        let index = Arc::new(OnePageIndex::new(json!({
            "total_pages": 1,
            "results": [
                { "title": "Big Buck Bunny (2008) [1080p]", "magnet": "magnet:bbb" },
                { "title": "untitled home video", "magnet": "magnet:home" }
            ]
        })));
        let orchestrator = orchestrator(ModelType::Movie, index.clone(), SlugMetadata::default());
        let states = orchestrator.subscribe();

        let report = orchestrator.run(&PageRequest::paged("en")).await.unwrap();

        assert_eq!(report.content.len(), 1);
        assert_eq!(report.content[0].id, "id-big-buck-bunny-2008");
        assert_eq!(report.unmatched, 1);
        assert_eq!(report.state, RunState::Done);
        assert_eq!(*states.borrow(), RunState::Done);
        // Probe plus one page.
        assert_eq!(index.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_zero_pages_fails_run() {
        let index = Arc::new(OnePageIndex::new(json!({
            "data": { "movie_count": 0, "movies": [] }
        })));
        let orchestrator = orchestrator(ModelType::Movie, index, SlugMetadata::default());

        let error = orchestrator.search().await.unwrap_err();

        assert!(matches!(error, ScrapeError::NoPages { .. }));
        assert!(error.is_fatal());
        assert_eq!(orchestrator.state(), RunState::Failed);
    }

    #[tokio::test]
    async fn test_item_failures_and_skips_do_not_fail_run() {
        let index = Arc::new(OnePageIndex::new(json!({
            "data": {
                "movie_count": 3,
                "movies": [
                    { "title": "Gravity (2013)", "magnet": "magnet:g" },
                    { "title": "Arrival (2016)", "magnet": "magnet:a" },
                    { "title": "Solaris (1972)", "magnet": "magnet:s" }
                ]
            }
        })));
        let metadata = SlugMetadata {
            missing: vec!["arrival-2016"],
            broken: vec!["solaris-1972"],
        };
        let orchestrator = orchestrator(ModelType::AnimeMovie, index, metadata);

        let report = orchestrator.run(&PageRequest::paged("en")).await.unwrap();

        assert_eq!(report.content.len(), 1);
        assert_eq!(report.content[0].slug, "gravity-2013");
        assert_eq!(report.skipped, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.state, RunState::Done);
    }

    #[tokio::test]
    async fn test_show_releases_coalesce_into_one_record() {
        let index = Arc::new(OnePageIndex::new(json!({
            "total_pages": 1,
            "results": [
                { "title": "Lost.S01E01.720p.HDTV", "magnet": "magnet:e1" },
                { "title": "Lost.S01E02.720p.HDTV", "magnet": "magnet:e2" }
            ]
        })));
        let orchestrator = orchestrator(ModelType::Show, index, SlugMetadata::default());

        let report = orchestrator.run(&PageRequest::paged("en")).await.unwrap();

        assert_eq!(report.content.len(), 1);
        let show = &report.content[0];
        assert_eq!(show.id, "id-lost");
        assert_eq!(show.num_seasons(), 1);
        let crate::types::ContentTorrents::Show(seasons) = &show.torrents else {
            panic!("expected show torrents");
        };
        assert_eq!(seasons[&1].len(), 2);
        assert_eq!(seasons[&1][&2]["720p"].url, "magnet:e2");
    }

    #[test]
    fn test_invalid_configuration_is_rejected() {
        let provider =
            ProviderConfig::new("Test", ModelType::Movie, PageRequest::paged("en")).unwrap();
        let config = ScrapeConfig {
            max_concurrency: 0,
            ..ScrapeConfig::default()
        };

        let result = Orchestrator::new(
            provider,
            Arc::new(OnePageIndex::new(json!({}))),
            Arc::new(SlugMetadata::default()),
            Arc::new(CorrectionTable::new()),
            &config,
        );
        assert!(matches!(result, Err(ScrapeError::Configuration { .. })));
    }
}
