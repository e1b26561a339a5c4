//! Bounded resolution under a slow metadata source.

use std::sync::Arc;
use std::time::Duration;

use trawler_core::{
    CorrectionTable, ModelType, Orchestrator, PageRequest, ProviderConfig, ScrapeConfig,
};

use crate::fakes::{FakeMetadata, PagedIndex, movie};

fn ten_movies() -> PagedIndex {
    PagedIndex::single(
        (0..10)
            .map(|n| movie(&format!("Open Movie {n} (2010)")))
            .collect(),
    )
}

async fn run_with_bound(max_concurrency: usize, metadata: Arc<FakeMetadata>) -> usize {
    let provider = ProviderConfig::new("Fake", ModelType::Movie, PageRequest::paged("en")).unwrap();
    let config = ScrapeConfig {
        max_concurrency,
        ..ScrapeConfig::default()
    };
    let orchestrator = Orchestrator::new(
        provider,
        Arc::new(ten_movies()),
        metadata,
        Arc::new(CorrectionTable::new()),
        &config,
    )
    .unwrap();

    orchestrator.search().await.unwrap().len()
}

#[tokio::test]
async fn test_peak_lookups_never_exceed_bound() {
    let metadata = Arc::new(FakeMetadata::new().with_delay(Duration::from_millis(20)));

    let resolved = run_with_bound(2, metadata.clone()).await;

    assert_eq!(resolved, 10);
    assert_eq!(metadata.lookups().len(), 10);
    assert!(metadata.peak() <= 2, "peak was {}", metadata.peak());
    assert!(metadata.peak() >= 1);
}

#[tokio::test]
async fn test_bound_of_one_serialises_lookups() {
    let metadata = Arc::new(FakeMetadata::new().with_delay(Duration::from_millis(5)));

    let resolved = run_with_bound(1, metadata.clone()).await;

    assert_eq!(resolved, 10);
    assert_eq!(metadata.peak(), 1);
}

#[tokio::test]
async fn test_failing_lookup_does_not_cancel_siblings() {
    let metadata = Arc::new(
        FakeMetadata::new()
            .with_delay(Duration::from_millis(5))
            .failing_for("open-movie-3-2010")
            .failing_for("open-movie-7-2010"),
    );

    let resolved = run_with_bound(2, metadata.clone()).await;

    assert_eq!(resolved, 8);
    assert_eq!(metadata.lookups().len(), 10);
}
