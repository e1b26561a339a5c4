//! HTTP implementations of the index and metadata capabilities.

pub mod index;
pub mod trakt;

pub use index::HttpIndexApi;
pub use trakt::TraktMetadata;

use url::Url;

use crate::errors::ScrapeError;

/// Parses a configured base URL.
fn parse_base_url(base_url: &str) -> Result<Url, ScrapeError> {
    Url::parse(base_url).map_err(|e| ScrapeError::Configuration {
        reason: format!("Invalid base URL '{base_url}': {e}"),
    })
}
