//! Sequential page walking over a content-index API.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{Instrument, Span};

use crate::config::ScrapeConfig;
use crate::errors::ScrapeError;
use crate::types::RawResult;

/// Trait for content-index search APIs.
///
/// Implementations cover real HTTP indexes and fakes for testing.
#[async_trait]
pub trait IndexApi: Send + Sync + std::fmt::Debug {
    /// Fetches one page of results for the request.
    ///
    /// # Errors
    /// - `ScrapeError::NetworkError` - Network connectivity issues
    /// - `ScrapeError::ProviderError` - Index answered with an error
    /// - `ScrapeError::ParseError` - Response body had an unexpected shape
    async fn search(&self, request: &PageRequest) -> Result<SearchPage, ScrapeError>;
}

/// Query for one page of an index search.
///
/// Each page gets its own request value derived from the initial one; the
/// initial request is never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page cursor, `None` for indexes that do not paginate by offset
    pub offset: Option<u32>,
    pub language: String,
    /// Static parameters forwarded to the index untouched
    #[serde(default)]
    pub params: BTreeMap<String, String>,
}

impl PageRequest {
    /// Creates a request without a page cursor.
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            offset: None,
            language: language.into(),
            params: BTreeMap::new(),
        }
    }

    /// Creates a request whose cursor starts at the first page.
    pub fn paged(language: impl Into<String>) -> Self {
        Self {
            offset: Some(1),
            ..Self::new(language)
        }
    }

    /// Adds a static parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Derives the request for a 1-based page number.
    ///
    /// Only cursor-bearing requests move; a request without an offset is
    /// reissued unchanged for every page.
    pub fn for_page(&self, page: u32) -> Self {
        let mut request = self.clone();
        if request.offset.is_some() {
            request.offset = Some(page);
        }
        request
    }
}

/// One page of an index response.
///
/// Indexes report results either as a top-level `results` list or nested
/// under `data.movies`; both are honoured. Entries stay undecoded until
/// [`Paginator::fetch_pages`] reads them one by one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub results: Option<Vec<Value>>,
    #[serde(default)]
    pub data: Option<SearchData>,
    #[serde(default)]
    pub total_pages: Option<u32>,
}

/// Nested payload of indexes that wrap their results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchData {
    #[serde(default)]
    pub movies: Option<Vec<Value>>,
    #[serde(default)]
    pub movie_count: Option<u64>,
}

impl SearchPage {
    /// Page count as reported, or derived from the item count.
    ///
    /// An explicit non-zero `total_pages` wins; otherwise the count is
    /// `ceil(movie_count / page_size)`. Returns zero when neither is usable.
    pub fn page_count(&self, page_size: u32) -> u32 {
        if let Some(total) = self.total_pages.filter(|total| *total > 0) {
            return total;
        }

        self.data
            .as_ref()
            .and_then(|data| data.movie_count)
            .filter(|_| page_size > 0)
            .map(|count| count.div_ceil(u64::from(page_size)))
            .and_then(|pages| u32::try_from(pages).ok())
            .unwrap_or(0)
    }

    /// Flattens both result shapes, direct results first.
    pub fn into_entries(self) -> Vec<Value> {
        let nested = self.data.and_then(|data| data.movies).unwrap_or_default();
        let mut results = self.results.unwrap_or_default();
        results.extend(nested);
        results
    }
}

/// Walks every page of an index search in series.
#[derive(Debug, Clone)]
pub struct Paginator {
    api: Arc<dyn IndexApi>,
    name: String,
    page_size: u32,
    single_page: bool,
    span: Span,
}

impl Paginator {
    /// Creates a paginator for the named provider.
    pub fn new(api: Arc<dyn IndexApi>, name: impl Into<String>, config: &ScrapeConfig, span: Span) -> Self {
        Self {
            api,
            name: name.into(),
            page_size: config.page_size,
            single_page: config.test_mode_single_page,
            span,
        }
    }

    /// Probes the index and determines how many pages to walk.
    ///
    /// In single-page mode the answer is always one, whatever the probe says.
    ///
    /// # Errors
    /// - `ScrapeError::NoPages` - Index reports zero or no page count
    /// - Any error of the probe request
    pub async fn total_pages(&self, request: &PageRequest) -> Result<u32, ScrapeError> {
        async {
            let probe = self.api.search(request).await?;

            let total_pages = if self.single_page {
                1
            } else {
                probe.page_count(self.page_size)
            };

            if total_pages == 0 {
                let error = ScrapeError::NoPages {
                    provider: self.name.clone(),
                    reported: total_pages.to_string(),
                };
                tracing::error!("{}", error);
                return Err(error);
            }

            tracing::info!("{}: Total pages {}", self.name, total_pages);
            Ok::<_, ScrapeError>(total_pages)
        }
        .instrument(self.span.clone())
        .await
    }

    /// Fetches pages `1..=total_pages` strictly one after another.
    ///
    /// # Errors
    /// - Any error of a page request; pages fetched so far are discarded
    pub async fn fetch_pages(
        &self,
        request: &PageRequest,
        total_pages: u32,
    ) -> Result<Vec<RawResult>, ScrapeError> {
        async {
            let mut torrents = Vec::new();

            for page in 1..=total_pages {
                let page_request = request.for_page(page);
                tracing::info!(
                    "{}: Started searching {} on page {} out of {}",
                    self.name,
                    self.name,
                    page,
                    total_pages
                );

                let response = self.api.search(&page_request).await?;
                torrents.extend(
                    response
                        .into_entries()
                        .into_iter()
                        .filter_map(|entry| self.decode(entry)),
                );
            }

            tracing::info!("{}: Found {} torrents.", self.name, torrents.len());
            Ok::<_, ScrapeError>(torrents)
        }
        .instrument(self.span.clone())
        .await
    }

    /// Decodes one page entry; a malformed entry is dropped with a warning.
    fn decode(&self, entry: Value) -> Option<RawResult> {
        match serde_json::from_value::<RawResult>(entry) {
            Ok(raw) => Some(raw),
            Err(error) => {
                tracing::warn!("{}: Skipping malformed result: {}", self.name, error);
                None
            }
        }
    }

    /// Determines the page count and fetches every page.
    ///
    /// # Errors
    /// - `ScrapeError::NoPages` - Index reports zero or no page count
    /// - Any error of the probe or a page request
    pub async fn fetch_all(&self, request: &PageRequest) -> Result<Vec<RawResult>, ScrapeError> {
        let total_pages = self.total_pages(request).await?;
        self.fetch_pages(request, total_pages).await
    }
}
