//! Centralized configuration for Trawler.
//!
//! All tunable parameters are defined here to avoid hard-coded values
//! scattered throughout the pipeline.

use std::time::Duration;

use crate::errors::ScrapeError;

/// Scraping pipeline configuration.
///
/// Supports environment variable overrides for runtime customization.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Maximum metadata operations in flight at once
    pub max_concurrency: usize,
    /// Walk only the first page regardless of the reported total
    pub test_mode_single_page: bool,
    /// Items per index page, used to derive page counts from item counts
    pub page_size: u32,
    /// Language assumed for results that carry none
    pub default_language: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 2,
            test_mode_single_page: false,
            page_size: 50,
            default_language: "en".to_string(),
        }
    }
}

impl ScrapeConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Unparseable values are ignored and the default kept.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(value) = std::env::var("TRAWLER_MAX_CONCURRENCY")
            && let Ok(count) = value.parse::<usize>()
        {
            config.max_concurrency = count;
        }

        if let Ok(value) = std::env::var("TRAWLER_SINGLE_PAGE") {
            config.test_mode_single_page = matches!(value.as_str(), "1" | "true" | "yes");
        }

        if let Ok(value) = std::env::var("TRAWLER_PAGE_SIZE")
            && let Ok(size) = value.parse::<u32>()
        {
            config.page_size = size;
        }

        if let Ok(language) = std::env::var("TRAWLER_LANGUAGE")
            && !language.trim().is_empty()
        {
            config.default_language = language.trim().to_lowercase();
        }

        config
    }

    /// Checks that every value is usable.
    ///
    /// # Errors
    /// - `ScrapeError::Configuration` - Concurrency or page size is zero
    pub fn validate(&self) -> Result<(), ScrapeError> {
        if self.max_concurrency == 0 {
            return Err(ScrapeError::Configuration {
                reason: "max_concurrency must be greater than zero".to_string(),
            });
        }
        if self.page_size == 0 {
            return Err(ScrapeError::Configuration {
                reason: "page_size must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// HTTP client configuration shared by the index and metadata clients.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Per-request timeout
    pub request_timeout: Duration,
    /// User agent for HTTP requests
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            user_agent: format!("trawler/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpConfig {
    /// Builds a reqwest client honouring this configuration.
    ///
    /// # Errors
    /// - `ScrapeError::Configuration` - TLS backend or client could not be initialised
    pub fn build_client(&self) -> Result<reqwest::Client, ScrapeError> {
        reqwest::Client::builder()
            .timeout(self.request_timeout)
            .user_agent(self.user_agent.clone())
            .build()
            .map_err(|e| ScrapeError::Configuration {
                reason: format!("Cannot build HTTP client: {e}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScrapeConfig::default();
        assert_eq!(config.max_concurrency, 2);
        assert!(!config.test_mode_single_page);
        assert_eq!(config.page_size, 50);
        assert_eq!(config.default_language, "en");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let config = ScrapeConfig {
            max_concurrency: 0,
            ..ScrapeConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ScrapeError::Configuration { .. })
        ));

        let config = ScrapeConfig {
            page_size: 0,
            ..ScrapeConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_http_client_builds() {
        let config = HttpConfig::default();
        assert!(config.user_agent.starts_with("trawler/"));
        assert!(config.build_client().is_ok());
    }
}
