//! HTTP layer: single-attempt GET and status mapping.
//!
//! This is the ONLY place for status code handling. client/mod.rs never
//! interprets status codes.

use tracing::debug;
use url::Url;

use crate::bundle::FetchedBundle;
use crate::error::{SeisError, SeisResult};
use crate::types::ModelInfo;

/// Longest slice of an error body carried into an error message.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// HTTP backend for making requests (holds reqwest client and endpoint).
#[derive(Debug, Clone)]
pub(crate) struct HttpBackend {
    pub(crate) client: reqwest::Client,
    pub(crate) endpoint: String,
}

impl HttpBackend {
    /// Fetch and parse the model grid description.
    pub(crate) async fn fetch_model_info(&self, url: &Url) -> SeisResult<ModelInfo> {
        let response = self.get(url).await?;

        response
            .json()
            .await
            .map_err(|e| SeisError::InvalidResponse {
                message: format!("failed to parse model info: {}", e),
            })
    }

    /// Fetch and decode a three-object bundle.
    pub(crate) async fn fetch_bundle(&self, url: &Url) -> SeisResult<FetchedBundle> {
        let response = self.get(url).await?;

        let body = response.bytes().await.map_err(|e| SeisError::Network {
            message: format!("failed to read response body: {}", e),
        })?;
        debug!(bytes = body.len(), "received bundle body");

        FetchedBundle::from_bytes(&body).map_err(|e| SeisError::InvalidResponse {
            message: format!("malformed bundle: {}", e),
        })
    }

    /// One GET, no retry.
    pub(crate) async fn get(&self, url: &Url) -> SeisResult<reqwest::Response> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        match status.as_u16() {
            200..=299 => Ok(response),

            404 => Err(SeisError::NotFound {
                what: describe_request(url),
            }),

            _ => {
                let message = response
                    .text()
                    .await
                    .map(|body| body.chars().take(MAX_ERROR_BODY_CHARS).collect::<String>())
                    .ok()
                    .filter(|body| !body.is_empty())
                    .unwrap_or_else(|| status.to_string());
                Err(SeisError::Network {
                    message: format!("HTTP {}: {}", status.as_u16(), message),
                })
            }
        }
    }
}

/// `path?query` of a request, for error messages.
fn describe_request(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}
