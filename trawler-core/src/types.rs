//! Data types shared across the scraping pipeline.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::errors::ScrapeError;

/// Torrent payloads of a movie, keyed by language and then by quality tag.
pub type MovieTorrents = BTreeMap<String, BTreeMap<String, TorrentPayload>>;

/// Torrent payloads of a show, keyed by season, episode and quality tag.
pub type EpisodeTorrents = BTreeMap<u32, BTreeMap<u32, BTreeMap<String, TorrentPayload>>>;

/// Content category; determines extraction and merge strategy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Movie,
    Show,
}

impl Category {
    /// Returns the lowercase wire name of the category.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Movie => "movie",
            Category::Show => "show",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Model a provider stores its content as.
///
/// Anime variants share the extraction and merge strategy of their
/// live-action counterparts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ModelType {
    AnimeMovie,
    AnimeShow,
    Movie,
    Show,
}

impl ModelType {
    /// Category whose strategy this model uses.
    pub fn category(self) -> Category {
        match self {
            ModelType::AnimeMovie | ModelType::Movie => Category::Movie,
            ModelType::AnimeShow | ModelType::Show => Category::Show,
        }
    }

    /// Returns the lowercase wire name of the model type.
    pub fn as_str(self) -> &'static str {
        match self {
            ModelType::AnimeMovie => "animemovie",
            ModelType::AnimeShow => "animeshow",
            ModelType::Movie => "movie",
            ModelType::Show => "show",
        }
    }
}

impl FromStr for ModelType {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "animemovie" => Ok(ModelType::AnimeMovie),
            "animeshow" => Ok(ModelType::AnimeShow),
            "movie" => Ok(ModelType::Movie),
            "show" => Ok(ModelType::Show),
            _ => Err(ScrapeError::Configuration {
                reason: format!("'{s}' is not a valid value for ModelTypes!"),
            }),
        }
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Download locator plus swarm statistics for one release.
///
/// Counts are accepted as numbers or numeric strings; anything else reads
/// as zero or absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TorrentPayload {
    /// Magnet link or .torrent URL
    #[serde(alias = "magnet", alias = "link")]
    pub url: String,
    /// Quality tag as reported by the index, when it reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    #[serde(default, alias = "seeders", deserialize_with = "lenient_count")]
    pub seeds: u32,
    #[serde(default, alias = "leechers", deserialize_with = "lenient_count")]
    pub peers: u32,
    #[serde(default, deserialize_with = "lenient_bytes")]
    pub size_bytes: Option<u64>,
    /// Human readable size
    #[serde(
        default,
        alias = "size",
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub file_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

impl TorrentPayload {
    /// Fills `file_size` from `size_bytes` when the index gave only the latter.
    pub fn with_display_size(mut self) -> Self {
        if self.file_size.is_none() {
            self.file_size = self.size_bytes.map(human_size);
        }
        self
    }
}

/// Renders a byte count in binary units with one decimal, e.g. `1.4 GB`.
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value_as_u64(&value)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(0))
}

fn lenient_bytes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value_as_u64(&value))
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(text) if !text.trim().is_empty() => Ok(Some(text)),
        _ => Ok(None),
    }
}

/// One numbered slot of a show's episode listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EpisodeDescriptor {
    pub season: u32,
    #[serde(alias = "number")]
    pub episode: u32,
    /// Per-episode torrent payloads keyed by quality tag
    #[serde(default)]
    pub torrents: BTreeMap<String, TorrentPayload>,
}

/// One entry returned by the content-index search API.
///
/// Immutable once fetched. Provider-specific fields the pipeline does not
/// interpret are kept in `fields`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawResult {
    pub title: String,
    /// Category reported by the index; the provider's category applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Torrents listed by indexes that group several releases per title
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub torrents: Vec<TorrentPayload>,
    /// Ordered episode listing, shows only
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub episodes: Vec<EpisodeDescriptor>,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, Value>,
}

impl RawResult {
    /// Creates a raw result with only a title set.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category: None,
            language: None,
            torrents: Vec::new(),
            episodes: Vec::new(),
            fields: serde_json::Map::new(),
        }
    }

    /// Reads the torrent carried directly on the result by flat indexes.
    ///
    /// Looks for a locator under `magnet`, `url` or `link` and picks up
    /// seed, peer and size counts when present.
    pub fn flat_torrent(&self, provider: &str) -> Option<TorrentPayload> {
        let url = ["magnet", "url", "link"]
            .iter()
            .find_map(|key| self.fields.get(*key).and_then(Value::as_str))?;

        let count = |keys: &[&str]| -> u32 {
            keys.iter()
                .find_map(|key| self.fields.get(*key).and_then(value_as_u64))
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(0)
        };

        let size_bytes = ["size_bytes", "size"]
            .iter()
            .find_map(|key| self.fields.get(*key).and_then(value_as_u64));

        let torrent = TorrentPayload {
            url: url.to_string(),
            quality: None,
            seeds: count(&["seeds", "seeders"]),
            peers: count(&["peers", "leechers"]),
            size_bytes,
            file_size: self
                .fields
                .get("filesize")
                .and_then(Value::as_str)
                .map(str::to_string),
            provider: Some(provider.to_string()),
        };
        Some(torrent.with_display_size())
    }
}

/// Accepts numbers encoded either as JSON numbers or numeric strings.
fn value_as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Structured attributes derived from a release title.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractedAttributes {
    /// Title as captured, with separators normalised to spaces
    pub title: String,
    /// Slug guess derived from the title
    pub slug: String,
    pub year: Option<u16>,
    pub season: Option<u32>,
    pub episode: Option<u32>,
    pub language: String,
    pub quality: String,
}

impl ExtractedAttributes {
    /// Slug used to look the title up for the given category.
    ///
    /// Movies are keyed by slug and year, shows by slug alone.
    pub fn lookup_slug(&self, category: Category) -> String {
        match (category, self.year) {
            (Category::Movie, Some(year)) => format!("{}-{year}", self.slug),
            _ => self.slug.clone(),
        }
    }
}

/// Corrected, stable slug used to look up authoritative metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalId(String);

impl CanonicalId {
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Authoritative metadata returned by the metadata capability.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MetadataRecord {
    /// Identity of the record; the record is unusable without one
    pub id: Option<String>,
    pub title: String,
    pub year: Option<u16>,
    pub slug: Option<String>,
    pub imdb_id: Option<String>,
    pub tmdb_id: Option<u64>,
    pub overview: Option<String>,
    pub genres: Vec<String>,
    pub rating: Option<f32>,
    /// Runtime in minutes
    pub runtime: Option<u32>,
}

impl MetadataRecord {
    /// Returns the identity when it is present and non-blank.
    pub fn identity(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.trim().is_empty())
    }
}

/// Torrents attached to an enriched record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase", tag = "kind", content = "torrents")]
pub enum ContentTorrents {
    Movie(MovieTorrents),
    Show(EpisodeTorrents),
}

/// Metadata merged with provider payloads; the pipeline's output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrichedContent {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub year: Option<u16>,
    pub category: Category,
    pub imdb_id: Option<String>,
    pub tmdb_id: Option<u64>,
    pub overview: Option<String>,
    pub genres: Vec<String>,
    pub rating: Option<f32>,
    pub runtime: Option<u32>,
    pub torrents: ContentTorrents,
    pub updated: chrono::DateTime<chrono::Utc>,
}

impl EnrichedContent {
    /// Number of seasons carrying at least one episode, zero for movies.
    pub fn num_seasons(&self) -> usize {
        match &self.torrents {
            ContentTorrents::Movie(_) => 0,
            ContentTorrents::Show(seasons) => seasons.values().filter(|s| !s.is_empty()).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_model_type_parsing() {
        assert_eq!("animeshow".parse::<ModelType>().unwrap(), ModelType::AnimeShow);
        assert_eq!("Movie".parse::<ModelType>().unwrap(), ModelType::Movie);
        assert_eq!(ModelType::AnimeMovie.category(), Category::Movie);
        assert_eq!(ModelType::AnimeShow.category(), Category::Show);

        let error = "cartoon".parse::<ModelType>().unwrap_err();
        assert!(error.to_string().contains("'cartoon' is not a valid value"));
    }

    #[test]
    fn test_raw_result_keeps_unknown_fields() {
        let raw: RawResult = serde_json::from_value(json!({
            "title": "Big Buck Bunny 2008 1080p",
            "magnet": "magnet:?xt=urn:btih:abc",
            "seeds": "42",
            "leechers": 7,
            "size": 1_073_741_824u64,
            "uploader": "someone"
        }))
        .unwrap();

        assert_eq!(raw.fields.get("uploader"), Some(&json!("someone")));

        let torrent = raw.flat_torrent("KAT").unwrap();
        assert_eq!(torrent.url, "magnet:?xt=urn:btih:abc");
        assert_eq!(torrent.seeds, 42);
        assert_eq!(torrent.peers, 7);
        assert_eq!(torrent.file_size.as_deref(), Some("1.0 GB"));
        assert_eq!(torrent.provider.as_deref(), Some("KAT"));
    }

    #[test]
    fn test_torrent_counts_accept_numeric_strings() {
        let torrent: TorrentPayload = serde_json::from_value(json!({
            "url": "magnet:?xt=urn:btih:def",
            "seeds": "12",
            "peers": null,
            "size_bytes": "734003200",
            "size": 734003200u64
        }))
        .unwrap();

        assert_eq!(torrent.seeds, 12);
        assert_eq!(torrent.peers, 0);
        assert_eq!(torrent.size_bytes, Some(734_003_200));
        assert!(torrent.file_size.is_none());
        assert_eq!(
            torrent.with_display_size().file_size.as_deref(),
            Some("700.0 MB")
        );
    }

    #[test]
    fn test_human_size_units() {
        assert_eq!(human_size(512), "512.0 B");
        assert_eq!(human_size(1536), "1.5 KB");
        assert_eq!(human_size(1_503_238_553), "1.4 GB");
    }

    #[test]
    fn test_flat_torrent_requires_locator() {
        let raw = RawResult::new("No Locator 2010");
        assert!(raw.flat_torrent("KAT").is_none());
    }

    #[test]
    fn test_lookup_slug_appends_year_for_movies() {
        let attributes = ExtractedAttributes {
            title: "The Matrix".to_string(),
            slug: "the-matrix".to_string(),
            year: Some(1999),
            season: None,
            episode: None,
            language: "en".to_string(),
            quality: "1080p".to_string(),
        };

        assert_eq!(attributes.lookup_slug(Category::Movie), "the-matrix-1999");
        assert_eq!(attributes.lookup_slug(Category::Show), "the-matrix");
    }

    #[test]
    fn test_blank_identity_is_not_an_identity() {
        let mut record = MetadataRecord {
            id: Some("  ".to_string()),
            ..MetadataRecord::default()
        };
        assert!(record.identity().is_none());

        record.id = Some("tt0133093".to_string());
        assert_eq!(record.identity(), Some("tt0133093"));
    }
}
