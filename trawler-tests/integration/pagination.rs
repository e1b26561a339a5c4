//! Page walking against a fake index.

use std::sync::Arc;

use serde_json::json;
use tracing::Span;
use trawler_core::{
    CorrectionTable, ModelType, Orchestrator, PageRequest, Paginator, ProviderConfig, RunState,
    ScrapeConfig, ScrapeError,
};

use crate::fakes::{FakeMetadata, PagedIndex, movie, titles};

fn three_pages() -> PagedIndex {
    PagedIndex::new(vec![
        vec![movie("Sintel (2010)"), movie("Elephants Dream (2006)")],
        vec![movie("Big Buck Bunny (2008)")],
        vec![movie("Tears of Steel (2012)")],
    ])
}

#[tokio::test]
async fn test_three_pages_fetched_sequentially() {
    let index = Arc::new(three_pages());
    let paginator = Paginator::new(index.clone(), "Fake", &ScrapeConfig::default(), Span::none());

    let results = paginator.fetch_all(&PageRequest::paged("en")).await.unwrap();

    // The probe, then pages 1, 2 and 3 in order.
    assert_eq!(index.offsets(), vec![Some(1), Some(1), Some(2), Some(3)]);
    assert_eq!(
        titles(&results),
        vec![
            "Sintel (2010)",
            "Elephants Dream (2006)",
            "Big Buck Bunny (2008)",
            "Tears of Steel (2012)"
        ]
    );
}

#[tokio::test]
async fn test_page_count_derived_from_item_count() {
    let index = Arc::new(three_pages().with_probe(json!({ "data": { "movie_count": 120 } })));
    let paginator = Paginator::new(index.clone(), "Fake", &ScrapeConfig::default(), Span::none());

    let total = paginator.total_pages(&PageRequest::paged("en")).await.unwrap();

    assert_eq!(total, 3);
    assert_eq!(index.request_count(), 1);
}

#[tokio::test]
async fn test_zero_pages_aborts_with_no_output() {
    let index = Arc::new(three_pages().with_probe(json!({ "total_pages": 0 })));
    let metadata = Arc::new(FakeMetadata::new());
    let provider = ProviderConfig::new("Fake", ModelType::Movie, PageRequest::paged("en")).unwrap();
    let orchestrator = Orchestrator::new(
        provider,
        index.clone(),
        metadata.clone(),
        Arc::new(CorrectionTable::new()),
        &ScrapeConfig::default(),
    )
    .unwrap();
    let states = orchestrator.subscribe();

    let error = orchestrator.run(&PageRequest::paged("en")).await.unwrap_err();

    assert!(matches!(
        &error,
        ScrapeError::NoPages { provider, reported } if provider == "Fake" && reported == "0"
    ));
    assert_eq!(error.to_string(), "Fake: totalPages returned: '0'");
    assert_eq!(*states.borrow(), RunState::Failed);
    assert_eq!(index.request_count(), 1);
    assert!(metadata.lookups().is_empty());
}

#[tokio::test]
async fn test_single_page_mode_ignores_reported_total() {
    let index = Arc::new(three_pages().with_probe(json!({ "total_pages": 0 })));
    let config = ScrapeConfig {
        test_mode_single_page: true,
        ..ScrapeConfig::default()
    };
    let paginator = Paginator::new(index.clone(), "Fake", &config, Span::none());

    let results = paginator.fetch_all(&PageRequest::paged("en")).await.unwrap();

    assert_eq!(index.offsets(), vec![Some(1), Some(1)]);
    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn test_unpaged_request_is_reissued_unchanged() {
    let index = Arc::new(three_pages());
    let paginator = Paginator::new(index.clone(), "Fake", &ScrapeConfig::default(), Span::none());
    let request = PageRequest::new("en").with_param("sort", "seeds");

    let results = paginator.fetch_all(&request).await.unwrap();

    assert_eq!(index.offsets(), vec![None, None, None, None]);
    assert_eq!(results.len(), 6);
    assert_eq!(request.offset, None);
}
