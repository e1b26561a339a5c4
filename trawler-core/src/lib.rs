//! Trawler Core - Torrent index scraping and metadata enrichment

#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![warn(clippy::too_many_lines)]
//!
//! Walks a paginated content-index API, extracts structured attributes from
//! each release title, resolves the title against a canonical metadata source
//! and merges the result with the release's torrent payloads.

pub mod config;
pub mod content;
pub mod corrections;
pub mod errors;
pub mod extractor;
pub mod limiter;
pub mod orchestrator;
pub mod paginator;
pub mod providers;
pub mod resolver;
pub mod types;

// Re-export main types
pub use config::{HttpConfig, ScrapeConfig};
pub use content::{ContentItem, ContentPayload};
pub use corrections::CorrectionTable;
pub use errors::ScrapeError;
pub use extractor::{Extractor, PatternSet, TitlePattern};
pub use limiter::{ConcurrencyLimiter, ItemOutcome};
pub use orchestrator::{Orchestrator, ProviderConfig, RunReport, RunState};
pub use paginator::{IndexApi, PageRequest, Paginator, SearchData, SearchPage};
pub use providers::{HttpIndexApi, TraktMetadata};
pub use resolver::{ContentResolver, MetadataProvider};
pub use types::{
    CanonicalId, Category, EnrichedContent, EpisodeDescriptor, EpisodeTorrents,
    ExtractedAttributes, MetadataRecord, ModelType, RawResult, TorrentPayload,
};

/// Convenience type alias for Results with ScrapeError.
pub type Result<T> = std::result::Result<T, ScrapeError>;
