//! Error types for scraping and enrichment.

use thiserror::Error;

/// Errors that can occur while scraping an index or enriching its results.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The index reported no usable page count, so nothing can be scraped.
    #[error("{provider}: totalPages returned: '{reported}'")]
    NoPages {
        /// Name of the provider whose index was probed
        provider: String,
        /// The page count as reported or computed, rendered for the log
        reported: String,
    },

    /// Network communication error occurred while talking to a capability.
    #[error("Network error: {reason}")]
    NetworkError {
        /// The reason for the network error
        reason: String,
    },

    /// Failed to parse a response body or a configuration file.
    #[error("Parse error: {reason}")]
    ParseError {
        /// The reason for the parse error
        reason: String,
    },

    /// An external capability returned an error status or is unavailable.
    #[error("Provider error: {reason}")]
    ProviderError {
        /// The reason for the provider error
        reason: String,
    },

    /// Metadata lookup or merge failed for a single item.
    #[error("Metadata fetch failed for '{id}': {reason}")]
    MetadataFetchFailed {
        /// Identifier that was being looked up
        id: String,
        /// The reason for the metadata failure
        reason: String,
    },

    /// A title pattern could not be compiled.
    #[error("Invalid title pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The offending pattern source
        pattern: String,
        /// Compiler message
        reason: String,
    },

    /// Configuration value is missing or out of range.
    #[error("Configuration error: {reason}")]
    Configuration {
        /// The reason the configuration was rejected
        reason: String,
    },

    /// A concurrently scheduled item panicked instead of returning.
    #[error("Task panicked: {reason}")]
    TaskPanicked {
        /// Panic payload, when it was a string
        reason: String,
    },
}

impl ScrapeError {
    /// Checks if this error aborts a whole run rather than a single item.
    ///
    /// Only pagination and configuration failures are run-level; everything
    /// else is absorbed as a per-item failure by the orchestrator.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ScrapeError::NoPages { .. } | ScrapeError::Configuration { .. }
        )
    }
}

impl From<reqwest::Error> for ScrapeError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ScrapeError::ParseError {
                reason: error.to_string(),
            }
        } else {
            ScrapeError::NetworkError {
                reason: error.to_string(),
            }
        }
    }
}
