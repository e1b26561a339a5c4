//! Trakt metadata client.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

use super::parse_base_url;
use crate::config::HttpConfig;
use crate::errors::ScrapeError;
use crate::resolver::MetadataProvider;
use crate::types::{CanonicalId, Category, MetadataRecord};

/// Trakt API version sent with every request.
const TRAKT_API_VERSION: &str = "2";

/// Public Trakt API endpoint.
pub const TRAKT_BASE_URL: &str = "https://api.trakt.tv";

/// Metadata source backed by the Trakt summary endpoints.
///
/// Records are identified by their IMDb id; a title Trakt lists without one
/// is treated as unlisted.
#[derive(Debug, Clone)]
pub struct TraktMetadata {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
}

/// Summary returned by `/movies/{id}` and `/shows/{id}`.
#[derive(Debug, Deserialize)]
struct TraktSummary {
    title: Option<String>,
    year: Option<u16>,
    ids: TraktIds,
    overview: Option<String>,
    #[serde(default)]
    genres: Vec<String>,
    rating: Option<f32>,
    runtime: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct TraktIds {
    slug: Option<String>,
    imdb: Option<String>,
    tmdb: Option<u64>,
}

impl From<TraktSummary> for MetadataRecord {
    fn from(summary: TraktSummary) -> Self {
        MetadataRecord {
            id: summary.ids.imdb.clone(),
            title: summary.title.unwrap_or_default(),
            year: summary.year,
            slug: summary.ids.slug,
            imdb_id: summary.ids.imdb,
            tmdb_id: summary.ids.tmdb,
            overview: summary.overview,
            genres: summary.genres,
            rating: summary.rating,
            runtime: summary.runtime,
        }
    }
}

impl TraktMetadata {
    /// Creates a client for the Trakt API at `base_url`.
    ///
    /// # Errors
    /// - `ScrapeError::Configuration` - URL is invalid, API key is blank or the client cannot be built
    pub fn new(base_url: &str, api_key: &str, http: &HttpConfig) -> Result<Self, ScrapeError> {
        if api_key.trim().is_empty() {
            return Err(ScrapeError::Configuration {
                reason: "Trakt API key must not be empty".to_string(),
            });
        }

        Ok(Self {
            client: http.build_client()?,
            base_url: parse_base_url(base_url)?,
            api_key: api_key.trim().to_string(),
        })
    }

    /// Summary URL of a title.
    fn summary_url(&self, category: Category, id: &CanonicalId) -> Result<Url, ScrapeError> {
        let collection = match category {
            Category::Movie => "movies",
            Category::Show => "shows",
        };

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ScrapeError::Configuration {
                reason: format!("'{}' cannot be used as a base URL", self.base_url),
            })?
            .pop_if_empty()
            .push(collection)
            .push(id.as_str());
        url.query_pairs_mut().append_pair("extended", "full");
        Ok(url)
    }
}

#[async_trait]
impl MetadataProvider for TraktMetadata {
    async fn lookup(
        &self,
        category: Category,
        id: &CanonicalId,
    ) -> Result<Option<MetadataRecord>, ScrapeError> {
        let url = self.summary_url(category, id)?;

        let response = self
            .client
            .get(url)
            .header("trakt-api-key", &self.api_key)
            .header("trakt-api-version", TRAKT_API_VERSION)
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                tracing::debug!("Trakt does not list '{}'", id);
                Ok(None)
            }
            status if !status.is_success() => Err(ScrapeError::ProviderError {
                reason: format!("Trakt HTTP {status} for '{id}'"),
            }),
            _ => {
                let summary: TraktSummary = response.json().await?;
                Ok(Some(summary.into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn client(base_url: &str) -> TraktMetadata {
        TraktMetadata::new(base_url, "key", &HttpConfig::default()).unwrap()
    }

    #[test]
    fn test_summary_url() {
        let trakt = client("https://api.trakt.tv");
        let url = trakt
            .summary_url(Category::Movie, &CanonicalId::new("the-matrix-1999"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.trakt.tv/movies/the-matrix-1999?extended=full"
        );

        let trakt = client("http://localhost:8080/trakt/");
        let url = trakt
            .summary_url(Category::Show, &CanonicalId::new("house-of-cards-2013"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/trakt/shows/house-of-cards-2013?extended=full"
        );
    }

    #[test]
    fn test_summary_maps_to_record() {
        let summary: TraktSummary = serde_json::from_value(json!({
            "title": "The Matrix",
            "year": 1999,
            "ids": { "trakt": 481, "slug": "the-matrix-1999", "imdb": "tt0133093", "tmdb": 603 },
            "overview": "Set in the 22nd century...",
            "genres": ["action", "science-fiction"],
            "rating": 8.5,
            "runtime": 136
        }))
        .unwrap();

        let record = MetadataRecord::from(summary);
        assert_eq!(record.identity(), Some("tt0133093"));
        assert_eq!(record.slug.as_deref(), Some("the-matrix-1999"));
        assert_eq!(record.tmdb_id, Some(603));
        assert_eq!(record.genres.len(), 2);
        assert_eq!(record.runtime, Some(136));
    }

    #[test]
    fn test_summary_without_imdb_has_no_identity() {
        let summary: TraktSummary = serde_json::from_value(json!({
            "title": "Obscure Pilot",
            "ids": { "trakt": 1, "slug": "obscure-pilot" }
        }))
        .unwrap();

        assert!(MetadataRecord::from(summary).identity().is_none());
    }

    #[test]
    fn test_blank_api_key_is_rejected() {
        let result = TraktMetadata::new(TRAKT_BASE_URL, "  ", &HttpConfig::default());
        assert!(matches!(result, Err(ScrapeError::Configuration { .. })));
    }
}
