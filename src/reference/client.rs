//! Outbound HTTP access to the reference data service

use async_trait::async_trait;
use axum::http::StatusCode;
use reqwest::{Client, Url};
use std::time::Duration;

use super::query::ReferenceQuery;
use crate::core::error::ReferenceDataError;

/// Status, length and body text of a reference data response
///
/// The body is kept verbatim so non-2xx payloads can be surfaced as error text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub content_length: Option<u64>,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        let body = body.into();
        Self {
            status,
            content_length: Some(body.len() as u64),
            body,
        }
    }
}

/// Issues one GET per lookup and returns the raw response
///
/// Implementations only fail with `Err` when no HTTP response was obtained at
/// all. Any status code, including errors, is an `Ok`.
#[async_trait]
pub trait ReferenceDataClient: Send + Sync {
    async fn fetch(&self, query: &ReferenceQuery) -> Result<RawResponse, ReferenceDataError>;
}

/// `reqwest`-backed client rooted at a base address
#[derive(Debug, Clone)]
pub struct HttpReferenceDataClient {
    base_url: Url,
    http: Client,
}

impl HttpReferenceDataClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ReferenceDataError> {
        let mut parsed = Url::parse(base_url)
            .map_err(|_| ReferenceDataError::InvalidBaseUrl(base_url.to_string()))?;
        // Url::join replaces the last segment unless the base ends with a slash
        if !parsed.path().ends_with('/') {
            let path = format!("{}/", parsed.path());
            parsed.set_path(&path);
        }

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("payval/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ReferenceDataError::ClientBuild)?;

        Ok(Self {
            base_url: parsed,
            http,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl ReferenceDataClient for HttpReferenceDataClient {
    async fn fetch(&self, query: &ReferenceQuery) -> Result<RawResponse, ReferenceDataError> {
        let path = query.lookup().path();
        let url = self
            .base_url
            .join(path)
            .map_err(|err| ReferenceDataError::UrlJoin {
                path: path.to_string(),
                message: err.to_string(),
            })?;

        let response = self
            .http
            .get(url)
            .query(&query.query_pairs())
            .send()
            .await
            .map_err(|source| ReferenceDataError::Request {
                path: query.path_and_query(),
                source,
            })?;

        let status = response.status();
        let content_length = response.content_length();
        let body = response
            .text()
            .await
            .map_err(|source| ReferenceDataError::Body {
                path: query.path_and_query(),
                source,
            })?;

        Ok(RawResponse {
            status,
            content_length,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gains_trailing_slash() {
        let client =
            HttpReferenceDataClient::new("http://refdata.local/api", Duration::from_secs(5))
                .unwrap();
        assert_eq!(client.base_url().as_str(), "http://refdata.local/api/");
        assert_eq!(
            client.base_url().join("schemeTypes").unwrap().as_str(),
            "http://refdata.local/api/schemeTypes"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let err = HttpReferenceDataClient::new("not a url", Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, ReferenceDataError::InvalidBaseUrl(_)));
    }

    #[test]
    fn test_raw_response_records_length() {
        let raw = RawResponse::new(StatusCode::OK, "[]");
        assert_eq!(raw.content_length, Some(2));
    }
}
