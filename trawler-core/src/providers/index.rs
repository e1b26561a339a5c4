//! JSON index API client.

use async_trait::async_trait;
use url::Url;

use super::parse_base_url;
use crate::config::HttpConfig;
use crate::errors::ScrapeError;
use crate::paginator::{IndexApi, PageRequest, SearchPage};

/// Index search client speaking the common `results` / `data.movies` shape.
///
/// Every request is a GET on the base URL; the page cursor, language and
/// static parameters travel as query parameters.
#[derive(Debug, Clone)]
pub struct HttpIndexApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpIndexApi {
    /// Creates a client for the index at `base_url`.
    ///
    /// # Errors
    /// - `ScrapeError::Configuration` - URL is invalid or the client cannot be built
    pub fn new(base_url: &str, http: &HttpConfig) -> Result<Self, ScrapeError> {
        Ok(Self {
            client: http.build_client()?,
            base_url: parse_base_url(base_url)?,
        })
    }

    /// Creates a client sharing an existing reqwest client.
    pub fn with_client(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// Query parameters for a page request.
    fn query_pairs(request: &PageRequest) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(request.params.len() + 2);
        if let Some(offset) = request.offset {
            pairs.push(("page".to_string(), offset.to_string()));
        }
        pairs.push(("lang".to_string(), request.language.clone()));
        pairs.extend(
            request
                .params
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        pairs
    }
}

#[async_trait]
impl IndexApi for HttpIndexApi {
    async fn search(&self, request: &PageRequest) -> Result<SearchPage, ScrapeError> {
        let response = self
            .client
            .get(self.base_url.clone())
            .query(&Self::query_pairs(request))
            .send()
            .await
            .map_err(|e| ScrapeError::NetworkError {
                reason: format!("Index request failed: {e}"),
            })?;

        if !response.status().is_success() {
            return Err(ScrapeError::ProviderError {
                reason: format!("Index HTTP {}", response.status()),
            });
        }

        response
            .json::<SearchPage>()
            .await
            .map_err(|e| ScrapeError::ParseError {
                reason: format!("Index JSON parsing failed: {e}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_pairs_include_cursor_language_and_params() {
        let request = PageRequest::paged("de")
            .with_param("sort_by", "date_added")
            .for_page(4);

        let pairs = HttpIndexApi::query_pairs(&request);
        assert_eq!(
            pairs,
            vec![
                ("page".to_string(), "4".to_string()),
                ("lang".to_string(), "de".to_string()),
                ("sort_by".to_string(), "date_added".to_string()),
            ]
        );
    }

    #[test]
    fn test_unpaged_request_has_no_page_parameter() {
        let pairs = HttpIndexApi::query_pairs(&PageRequest::new("en"));
        assert!(pairs.iter().all(|(key, _)| key != "page"));
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let result = HttpIndexApi::new("not a url", &HttpConfig::default());
        assert!(matches!(result, Err(ScrapeError::Configuration { .. })));
    }
}
