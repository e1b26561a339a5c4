//! Fake index and metadata capabilities shared by the integration tests.

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};
use trawler_core::{
    CanonicalId, Category, IndexApi, MetadataProvider, MetadataRecord, PageRequest, RawResult,
    ScrapeError, SearchPage,
};

/// Index serving fixed pages, selected by the request's page cursor.
///
/// Requests without a cursor get the first page. Every response reports
/// `total_pages` unless a probe override is set.
#[derive(Debug)]
pub struct PagedIndex {
    pages: Vec<Vec<Value>>,
    probe: Option<Value>,
    requests: Mutex<Vec<PageRequest>>,
}

impl PagedIndex {
    pub fn new(pages: Vec<Vec<Value>>) -> Self {
        Self {
            pages,
            probe: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Single page holding the given results.
    pub fn single(results: Vec<Value>) -> Self {
        Self::new(vec![results])
    }

    /// Replaces the page-count fields of every response.
    pub fn with_probe(mut self, probe: Value) -> Self {
        self.probe = Some(probe);
        self
    }

    pub fn offsets(&self) -> Vec<Option<u32>> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|request| request.offset)
            .collect()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl IndexApi for PagedIndex {
    async fn search(&self, request: &PageRequest) -> Result<SearchPage, ScrapeError> {
        self.requests.lock().unwrap().push(request.clone());

        let page = request.offset.unwrap_or(1) as usize;
        let results = self.pages.get(page - 1).cloned().unwrap_or_default();

        let mut body = self
            .probe
            .clone()
            .unwrap_or_else(|| json!({ "total_pages": self.pages.len() }));
        body["results"] = Value::Array(results);

        serde_json::from_value(body).map_err(|e| ScrapeError::ParseError {
            reason: e.to_string(),
        })
    }
}

/// Raw movie result with a flat magnet link.
pub fn movie(title: &str) -> Value {
    json!({ "title": title, "magnet": format!("magnet:?dn={}", title.replace(' ', ".")) })
}

/// Raw show result carrying its own episode listing.
pub fn show_with_listing(title: &str, episodes: &[(u32, u32)]) -> Value {
    let listing: Vec<Value> = episodes
        .iter()
        .map(|(season, number)| {
            json!({
                "season": season,
                "number": number,
                "torrents": { "480p": { "url": format!("magnet:?s={season}&e={number}") } }
            })
        })
        .collect();
    json!({ "title": title, "episodes": listing })
}

/// Metadata source listing every identifier except the missing ones.
///
/// Records get the identity `tt-<id>`. Lookups can be slowed down to observe
/// how many run at once, and made to fail for chosen identifiers.
#[derive(Debug, Default)]
pub struct FakeMetadata {
    delay: Option<Duration>,
    missing: HashSet<String>,
    failing: HashSet<String>,
    lookups: Mutex<Vec<(Category, String)>>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl FakeMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn without(mut self, id: &str) -> Self {
        self.missing.insert(id.to_string());
        self
    }

    pub fn failing_for(mut self, id: &str) -> Self {
        self.failing.insert(id.to_string());
        self
    }

    pub fn lookups(&self) -> Vec<(Category, String)> {
        self.lookups.lock().unwrap().clone()
    }

    pub fn looked_up_ids(&self) -> Vec<String> {
        self.lookups().into_iter().map(|(_, id)| id).collect()
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetadataProvider for FakeMetadata {
    async fn lookup(
        &self,
        category: Category,
        id: &CanonicalId,
    ) -> Result<Option<MetadataRecord>, ScrapeError> {
        self.lookups
            .lock()
            .unwrap()
            .push((category, id.to_string()));

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.contains(id.as_str()) {
            return Err(ScrapeError::NetworkError {
                reason: format!("lookup of {id} timed out"),
            });
        }
        if self.missing.contains(id.as_str()) {
            return Ok(None);
        }

        Ok(Some(MetadataRecord {
            id: Some(format!("tt-{id}")),
            title: id.to_string(),
            slug: Some(id.to_string()),
            ..MetadataRecord::default()
        }))
    }
}

/// Titles of raw results, for assertions on page contents.
pub fn titles(results: &[RawResult]) -> Vec<String> {
    results.iter().map(|r| r.title.clone()).collect()
}
