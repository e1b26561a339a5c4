//! Resolution of content items against the canonical metadata source.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{Instrument, Span};

use crate::content::{ContentItem, ContentPayload};
use crate::corrections::CorrectionTable;
use crate::errors::ScrapeError;
use crate::types::{
    CanonicalId, Category, ContentTorrents, EnrichedContent, EpisodeDescriptor, EpisodeTorrents,
    MetadataRecord, MovieTorrents,
};

/// Trait for authoritative metadata sources.
///
/// Only `lookup` must be provided; the merge operations default to attaching
/// the payload to the record as-is.
#[async_trait]
pub trait MetadataProvider: Send + Sync + std::fmt::Debug {
    /// Looks up a record by canonical identifier.
    ///
    /// Returns `Ok(None)` when the source does not list the title.
    ///
    /// # Errors
    /// - `ScrapeError::NetworkError` - Network connectivity issues
    /// - `ScrapeError::ProviderError` - Source answered with an error status
    /// - `ScrapeError::ParseError` - Response body had an unexpected shape
    async fn lookup(
        &self,
        category: Category,
        id: &CanonicalId,
    ) -> Result<Option<MetadataRecord>, ScrapeError>;

    /// Attaches movie torrents to a record.
    ///
    /// # Errors
    /// - `ScrapeError::MetadataFetchFailed` - Record has no identity
    async fn merge_movie_torrents(
        &self,
        record: MetadataRecord,
        torrents: MovieTorrents,
        id: &CanonicalId,
    ) -> Result<EnrichedContent, ScrapeError> {
        attach(record, id, Category::Movie, ContentTorrents::Movie(torrents))
    }

    /// Attaches an episode-to-torrent mapping to a record.
    ///
    /// # Errors
    /// - `ScrapeError::MetadataFetchFailed` - Record has no identity
    async fn merge_episode_torrents(
        &self,
        record: MetadataRecord,
        episodes: EpisodeTorrents,
        id: &CanonicalId,
    ) -> Result<EnrichedContent, ScrapeError> {
        attach(record, id, Category::Show, ContentTorrents::Show(episodes))
    }
}

/// Default merge of a record and its payload.
fn attach(
    record: MetadataRecord,
    id: &CanonicalId,
    category: Category,
    torrents: ContentTorrents,
) -> Result<EnrichedContent, ScrapeError> {
    let identity = record
        .identity()
        .ok_or_else(|| ScrapeError::MetadataFetchFailed {
            id: id.to_string(),
            reason: "record has no identity".to_string(),
        })?
        .to_string();

    Ok(EnrichedContent {
        id: identity,
        slug: record.slug.unwrap_or_else(|| id.to_string()),
        title: record.title,
        year: record.year,
        category,
        imdb_id: record.imdb_id,
        tmdb_id: record.tmdb_id,
        overview: record.overview,
        genres: record.genres,
        rating: record.rating,
        runtime: record.runtime,
        torrents,
        updated: chrono::Utc::now(),
    })
}

/// Groups an episode listing by season and episode number.
///
/// Entries without torrents are left out.
pub fn episode_torrents(episodes: Vec<EpisodeDescriptor>) -> EpisodeTorrents {
    let mut seasons: EpisodeTorrents = BTreeMap::new();
    for episode in episodes.into_iter().filter(|e| !e.torrents.is_empty()) {
        seasons
            .entry(episode.season)
            .or_default()
            .entry(episode.episode)
            .or_default()
            .extend(episode.torrents);
    }
    seasons
}

/// Maps content items to canonical identifiers and enriches them.
#[derive(Debug, Clone)]
pub struct ContentResolver {
    corrections: Arc<CorrectionTable>,
    metadata: Arc<dyn MetadataProvider>,
    span: Span,
}

impl ContentResolver {
    /// Creates a resolver logging into the given span.
    pub fn new(
        corrections: Arc<CorrectionTable>,
        metadata: Arc<dyn MetadataProvider>,
        span: Span,
    ) -> Self {
        Self {
            corrections,
            metadata,
            span,
        }
    }

    /// Resolves one content item.
    ///
    /// Returns `Ok(None)` for the expected skips: a show left with no valid
    /// episodes, or a title the metadata source does not list.
    ///
    /// # Errors
    /// - `ScrapeError::MetadataFetchFailed` - Lookup or merge failed
    pub async fn resolve(&self, item: ContentItem) -> Result<Option<EnrichedContent>, ScrapeError> {
        async move {
            let ContentItem {
                category,
                attributes,
                payload,
            } = item;

            let payload = match payload {
                ContentPayload::Movie { torrents } => {
                    ContentTorrents::Movie(BTreeMap::from([(attributes.language.clone(), torrents)]))
                }
                ContentPayload::Show { episodes } => {
                    let seasons = episode_torrents(episodes);
                    if seasons.is_empty() {
                        tracing::info!("{}: no valid episodes, skipping", attributes.title);
                        return Ok(None);
                    }
                    ContentTorrents::Show(seasons)
                }
            };

            let id = self
                .corrections
                .correct(category, &attributes.lookup_slug(category));

            let record = self
                .metadata
                .lookup(category, &id)
                .await
                .map_err(|e| failed(&id, e))?;

            let Some(record) = record.filter(|record| record.identity().is_some()) else {
                tracing::debug!("No metadata found for '{}'", id);
                return Ok(None);
            };

            let merged = match payload {
                ContentTorrents::Movie(torrents) => {
                    self.metadata.merge_movie_torrents(record, torrents, &id).await
                }
                ContentTorrents::Show(seasons) => {
                    self.metadata.merge_episode_torrents(record, seasons, &id).await
                }
            }
            .map_err(|e| failed(&id, e))?;

            tracing::debug!("Resolved '{}' as {}", attributes.title, merged.id);
            Ok::<_, ScrapeError>(Some(merged))
        }
        .instrument(self.span.clone())
        .await
    }
}

fn failed(id: &CanonicalId, error: ScrapeError) -> ScrapeError {
    match error {
        error @ ScrapeError::MetadataFetchFailed { .. } => error,
        other => ScrapeError::MetadataFetchFailed {
            id: id.to_string(),
            reason: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::types::{ExtractedAttributes, TorrentPayload};

    /// Metadata fake answering from a fixed list and recording lookups.
    #[derive(Debug, Default)]
    struct StaticMetadata {
        records: Vec<(String, MetadataRecord)>,
        lookups: Mutex<Vec<(Category, String)>>,
        fail: bool,
    }

    impl StaticMetadata {
        fn with_record(mut self, id: &str, identity: Option<&str>) -> Self {
            self.records.push((
                id.to_string(),
                MetadataRecord {
                    id: identity.map(str::to_string),
                    title: id.replace('-', " "),
                    ..MetadataRecord::default()
                },
            ));
            self
        }

        fn looked_up(&self) -> Vec<(Category, String)> {
            self.lookups.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MetadataProvider for StaticMetadata {
        async fn lookup(
            &self,
            category: Category,
            id: &CanonicalId,
        ) -> Result<Option<MetadataRecord>, ScrapeError> {
            self.lookups
                .lock()
                .unwrap()
                .push((category, id.to_string()));
            if self.fail {
                return Err(ScrapeError::NetworkError {
                    reason: "connection reset".to_string(),
                });
            }
            Ok(self
                .records
                .iter()
                .find(|(key, _)| key == id.as_str())
                .map(|(_, record)| record.clone()))
        }
    }

    fn torrent(url: &str) -> TorrentPayload {
        TorrentPayload {
            url: url.to_string(),
            quality: None,
            seeds: 1,
            peers: 0,
            size_bytes: None,
            file_size: None,
            provider: None,
        }
    }

    fn attributes(slug: &str, year: Option<u16>) -> ExtractedAttributes {
        ExtractedAttributes {
            title: slug.replace('-', " "),
            slug: slug.to_string(),
            year,
            season: None,
            episode: None,
            language: "en".to_string(),
            quality: "720p".to_string(),
        }
    }

    fn movie(slug: &str, year: u16) -> ContentItem {
        ContentItem {
            category: Category::Movie,
            attributes: attributes(slug, Some(year)),
            payload: ContentPayload::Movie {
                torrents: BTreeMap::from([("720p".to_string(), torrent("magnet:m"))]),
            },
        }
    }

    fn episode(season: u32, number: u32, url: Option<&str>) -> EpisodeDescriptor {
        EpisodeDescriptor {
            season,
            episode: number,
            torrents: url
                .map(|url| BTreeMap::from([("480p".to_string(), torrent(url))]))
                .unwrap_or_default(),
        }
    }

    fn show(slug: &str, episodes: Vec<EpisodeDescriptor>) -> ContentItem {
        ContentItem {
            category: Category::Show,
            attributes: attributes(slug, None),
            payload: ContentPayload::Show { episodes },
        }
    }

    fn resolver(table: CorrectionTable, metadata: Arc<StaticMetadata>) -> ContentResolver {
        ContentResolver::new(Arc::new(table), metadata, Span::none())
    }

    #[tokio::test]
    async fn test_movie_resolves_with_year_slug() {
        let metadata =
            Arc::new(StaticMetadata::default().with_record("interstellar-2014", Some("157336")));
        let resolved = resolver(CorrectionTable::new(), metadata.clone())
            .resolve(movie("interstellar", 2014))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(resolved.id, "157336");
        assert_eq!(resolved.slug, "interstellar-2014");
        assert_eq!(resolved.category, Category::Movie);
        let ContentTorrents::Movie(torrents) = &resolved.torrents else {
            panic!("expected movie torrents");
        };
        assert_eq!(torrents["en"]["720p"].url, "magnet:m");
        assert_eq!(
            metadata.looked_up(),
            vec![(Category::Movie, "interstellar-2014".to_string())]
        );
    }

    #[tokio::test]
    async fn test_correction_applied_before_lookup() {
        let metadata = Arc::new(StaticMetadata::default().with_record("the-office-us", Some("1")));
        let table = CorrectionTable::new().with_entry(Category::Show, "the-office", "the-office-us");

        let resolved = resolver(table, metadata.clone())
            .resolve(show(
                "the-office",
                vec![episode(1, 0, None), episode(1, 1, Some("magnet:o1"))],
            ))
            .await
            .unwrap();

        assert!(resolved.is_some());
        assert_eq!(
            metadata.looked_up(),
            vec![(Category::Show, "the-office-us".to_string())]
        );
    }

    #[tokio::test]
    async fn test_show_groups_episodes_by_season() {
        let metadata = Arc::new(StaticMetadata::default().with_record("lost", Some("4607")));
        let resolved = resolver(CorrectionTable::new(), metadata)
            .resolve(show(
                "lost",
                vec![
                    episode(1, 1, Some("magnet:e1")),
                    episode(1, 2, None),
                    episode(2, 1, Some("magnet:s2e1")),
                ],
            ))
            .await
            .unwrap()
            .unwrap();

        let ContentTorrents::Show(seasons) = &resolved.torrents else {
            panic!("expected show torrents");
        };
        assert!(!seasons[&1].contains_key(&2));
        assert_eq!(seasons[&1][&1]["480p"].url, "magnet:e1");
        assert_eq!(seasons[&2][&1]["480p"].url, "magnet:s2e1");
        assert_eq!(resolved.num_seasons(), 2);
    }

    #[tokio::test]
    async fn test_show_without_remaining_episodes_is_skipped_before_lookup() {
        let metadata = Arc::new(StaticMetadata::default().with_record("lost", Some("4607")));
        let resolved = resolver(CorrectionTable::new(), metadata.clone())
            .resolve(show("lost", vec![episode(1, 1, None)]))
            .await
            .unwrap();

        assert!(resolved.is_none());
        assert!(metadata.looked_up().is_empty());
    }

    #[tokio::test]
    async fn test_missing_identity_is_skipped() {
        let metadata = Arc::new(
            StaticMetadata::default()
                .with_record("interstellar-2014", None)
                .with_record("gravity-2013", Some("  ")),
        );
        let resolver = resolver(CorrectionTable::new(), metadata);

        assert!(resolver.resolve(movie("interstellar", 2014)).await.unwrap().is_none());
        assert!(resolver.resolve(movie("gravity", 2013)).await.unwrap().is_none());
        assert!(resolver.resolve(movie("unlisted", 2001)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_lookup_failure_is_reported_per_item() {
        let metadata = Arc::new(StaticMetadata {
            fail: true,
            ..StaticMetadata::default()
        });
        let error = resolver(CorrectionTable::new(), metadata)
            .resolve(movie("interstellar", 2014))
            .await
            .unwrap_err();

        assert!(matches!(
            &error,
            ScrapeError::MetadataFetchFailed { id, reason }
                if id == "interstellar-2014" && reason.contains("connection reset")
        ));
        assert!(!error.is_fatal());
    }
}
