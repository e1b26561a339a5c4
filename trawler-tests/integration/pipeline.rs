//! End-to-end runs of the orchestrator over fake capabilities.

use std::io::Write;
use std::sync::{Arc, Mutex};

use serde_json::json;
use trawler_core::types::ContentTorrents;
use trawler_core::{
    Category, CorrectionTable, ModelType, Orchestrator, PageRequest, ProviderConfig, RunState,
    ScrapeConfig,
};

use crate::fakes::{FakeMetadata, PagedIndex, movie, show_with_listing};

fn orchestrator(
    model_type: ModelType,
    index: Arc<PagedIndex>,
    metadata: Arc<FakeMetadata>,
    corrections: CorrectionTable,
) -> Orchestrator {
    let provider = ProviderConfig::new("Fake", model_type, PageRequest::paged("en")).unwrap();
    Orchestrator::new(
        provider,
        index,
        metadata,
        Arc::new(corrections),
        &ScrapeConfig::default(),
    )
    .unwrap()
}

/// Log sink collecting formatted events in memory.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_one_page_two_movies_one_enriched() {
    let index = Arc::new(PagedIndex::single(vec![
        movie("Sintel (2010) [1080p]"),
        movie("holiday footage final cut"),
    ]));
    let metadata = Arc::new(FakeMetadata::new());
    let orchestrator = orchestrator(
        ModelType::Movie,
        index,
        metadata.clone(),
        CorrectionTable::builtin(),
    );

    let report = orchestrator.run(&PageRequest::paged("en")).await.unwrap();

    assert_eq!(report.content.len(), 1);
    assert_eq!(report.state, RunState::Done);
    assert_ne!(report.state, RunState::Failed);
    assert_eq!(report.unmatched, 1);
    assert_eq!(metadata.looked_up_ids(), vec!["sintel-2010"]);

    let sintel = &report.content[0];
    assert_eq!(sintel.id, "tt-sintel-2010");
    assert_eq!(sintel.category, Category::Movie);
    let ContentTorrents::Movie(torrents) = &sintel.torrents else {
        panic!("expected movie torrents");
    };
    assert_eq!(
        torrents["en"]["1080p"].url,
        "magnet:?dn=Sintel.(2010).[1080p]"
    );
}

#[tokio::test]
async fn test_unmatched_title_is_logged_as_warning() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let index = Arc::new(PagedIndex::single(vec![
        movie("Sintel (2010)"),
        movie("holiday footage final cut"),
    ]));
    let orchestrator = orchestrator(
        ModelType::Movie,
        index,
        Arc::new(FakeMetadata::new()),
        CorrectionTable::new(),
    );
    orchestrator.search().await.unwrap();

    let output = logs.contents();
    assert!(output.contains("WARN"));
    assert!(output.contains("Could not find data from torrent: 'holiday footage final cut'"));
    assert!(output.contains("Fake: Total pages 1"));
    assert!(output.contains("Fake: Found 2 torrents."));
}

#[tokio::test]
async fn test_show_without_episodes_after_leading_entry_removed_is_excluded() {
    let index = Arc::new(PagedIndex::single(vec![
        show_with_listing("Gate S01E01", &[(1, 1)]),
        show_with_listing("Lost S01E01", &[(1, 0), (1, 1), (1, 2)]),
    ]));
    let metadata = Arc::new(FakeMetadata::new());
    let orchestrator = orchestrator(
        ModelType::Show,
        index,
        metadata.clone(),
        CorrectionTable::new(),
    );

    let report = orchestrator.run(&PageRequest::paged("en")).await.unwrap();

    assert_eq!(report.content.len(), 1);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.content[0].id, "tt-lost");
    // Gate never reaches the metadata source.
    assert_eq!(metadata.looked_up_ids(), vec!["lost"]);

    let ContentTorrents::Show(seasons) = &report.content[0].torrents else {
        panic!("expected show torrents");
    };
    let episodes: Vec<_> = seasons[&1].keys().copied().collect();
    assert_eq!(episodes, vec![1, 2]);
}

#[tokio::test]
async fn test_builtin_corrections_rewrite_lookup_identifier() {
    let index = Arc::new(PagedIndex::single(vec![
        movie("Shingeki no Kyojin S01E05 720p"),
        movie("Shingeki no Kyojin S01E06 720p"),
    ]));
    let metadata = Arc::new(FakeMetadata::new());
    let orchestrator = orchestrator(
        ModelType::AnimeShow,
        index,
        metadata.clone(),
        CorrectionTable::builtin(),
    );

    let report = orchestrator.run(&PageRequest::paged("en")).await.unwrap();

    assert_eq!(
        metadata.lookups(),
        vec![(Category::Show, "attack-on-titan".to_string())]
    );
    assert_eq!(report.content.len(), 1);

    let titan = &report.content[0];
    assert_eq!(titan.id, "tt-attack-on-titan");
    let ContentTorrents::Show(seasons) = &titan.torrents else {
        panic!("expected show torrents");
    };
    assert_eq!(seasons[&1].keys().copied().collect::<Vec<_>>(), vec![5, 6]);
    assert!(seasons[&1][&5].contains_key("720p"));
}

#[tokio::test]
async fn test_unlisted_and_failing_titles_do_not_fail_run() {
    let index = Arc::new(PagedIndex::single(vec![
        movie("Sintel (2010)"),
        movie("Tears of Steel (2012)"),
        movie("Cosmos Laundromat (2015)"),
    ]));
    let metadata = Arc::new(
        FakeMetadata::new()
            .without("tears-of-steel-2012")
            .failing_for("cosmos-laundromat-2015"),
    );
    let orchestrator = orchestrator(
        ModelType::Movie,
        index,
        metadata,
        CorrectionTable::new(),
    );

    let report = orchestrator.run(&PageRequest::paged("en")).await.unwrap();

    assert_eq!(report.content.len(), 1);
    assert_eq!(report.content[0].slug, "sintel-2010");
    assert_eq!(report.skipped, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(report.state, RunState::Done);
    assert_eq!(orchestrator.state(), RunState::Done);
}

#[tokio::test]
async fn test_releases_of_one_movie_are_resolved_once() {
    let index = Arc::new(PagedIndex::single(vec![
        movie("Sintel (2010) 720p"),
        movie("Sintel (2010) 1080p"),
    ]));
    let metadata = Arc::new(FakeMetadata::new());
    let orchestrator = orchestrator(
        ModelType::Movie,
        index,
        metadata.clone(),
        CorrectionTable::new(),
    );

    let report = orchestrator.run(&PageRequest::paged("en")).await.unwrap();

    assert_eq!(metadata.looked_up_ids(), vec!["sintel-2010"]);
    let ContentTorrents::Movie(torrents) = &report.content[0].torrents else {
        panic!("expected movie torrents");
    };
    let qualities: Vec<_> = torrents["en"].keys().cloned().collect();
    assert_eq!(qualities, vec!["1080p", "720p"]);
}

#[tokio::test]
async fn test_malformed_results_are_dropped_without_failing_run() {
    let index = Arc::new(PagedIndex::single(vec![
        movie("Sintel (2010)"),
        json!({ "name": "no title field", "magnet": "magnet:x" }),
        json!({
            "title": "Arrival (2016)",
            "torrents": [{ "url": "magnet:arrival", "seeds": "12", "quality": "1080p" }]
        }),
    ]));
    let metadata = Arc::new(FakeMetadata::new());
    let orchestrator = orchestrator(
        ModelType::Movie,
        index,
        metadata.clone(),
        CorrectionTable::new(),
    );

    let report = orchestrator.run(&PageRequest::paged("en")).await.unwrap();

    assert_eq!(report.state, RunState::Done);
    assert_eq!(report.content.len(), 2);
    let mut looked_up = metadata.looked_up_ids();
    looked_up.sort();
    assert_eq!(looked_up, vec!["arrival-2016", "sintel-2010"]);

    let arrival = report
        .content
        .iter()
        .find(|content| content.slug == "arrival-2016")
        .unwrap();
    let ContentTorrents::Movie(torrents) = &arrival.torrents else {
        panic!("expected movie torrents");
    };
    assert_eq!(torrents["en"]["1080p"].seeds, 12);
}

#[tokio::test]
async fn test_each_listing_loses_its_own_leading_entry_before_merge() {
    let index = Arc::new(PagedIndex::single(vec![
        show_with_listing("Lost S01E01", &[(1, 1)]),
        show_with_listing("Lost S01E02", &[(1, 1), (1, 2)]),
    ]));
    let metadata = Arc::new(FakeMetadata::new());
    let orchestrator = orchestrator(
        ModelType::Show,
        index,
        metadata.clone(),
        CorrectionTable::new(),
    );

    let report = orchestrator.run(&PageRequest::paged("en")).await.unwrap();

    assert_eq!(metadata.looked_up_ids(), vec!["lost"]);
    let ContentTorrents::Show(seasons) = &report.content[0].torrents else {
        panic!("expected show torrents");
    };
    let episodes: Vec<_> = seasons
        .iter()
        .flat_map(|(season, episodes)| episodes.keys().map(move |episode| (*season, *episode)))
        .collect();
    assert_eq!(episodes, vec![(1, 2)]);
}
