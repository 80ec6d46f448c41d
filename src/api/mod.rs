pub mod summary;
pub mod thumbnail;
pub mod types;

use std::time::Duration;

use reqwest::Response;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::AppConfig;

/// Shown for transport, status and parse failures.
pub const MSG_UNAVAILABLE: &str = "Data not available, Look for another one.";
/// Shown when the API answers but has no article for the query.
pub const MSG_NOT_FOUND: &str = "Data not available";

const USER_AGENT: &str = concat!("wikisearch/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error (status {status}): {detail}")]
    ApiError { status: u16, detail: String },
    #[error("deserialization error: {0}")]
    Deserialize(String),
    #[error("no article found for {query:?}")]
    NotFound { query: String },
    #[error("image decode error: {0}")]
    Image(#[from] image::ImageError),
}

/// The user-facing buckets every [`ApiClientError`] collapses into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    Parse,
    NotFound,
}

impl FailureKind {
    pub fn user_message(self) -> &'static str {
        match self {
            FailureKind::NotFound => MSG_NOT_FOUND,
            FailureKind::Network | FailureKind::Parse => MSG_UNAVAILABLE,
        }
    }
}

impl ApiClientError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ApiClientError::Http(_) | ApiClientError::ApiError { .. } => FailureKind::Network,
            ApiClientError::Deserialize(_) | ApiClientError::Image(_) => FailureKind::Parse,
            ApiClientError::NotFound { .. } => FailureKind::NotFound,
        }
    }

    pub fn user_message(&self) -> &'static str {
        self.kind().user_message()
    }
}

// ---------------------------------------------------------------------------
// API client
// ---------------------------------------------------------------------------

/// Client for the wiki summary API and the thumbnails it links to.
///
/// Holds no mutable state, so it is shared between tasks behind an `Arc`.
#[derive(Debug, Clone)]
pub struct WikiClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl WikiClient {
    pub fn new(config: &AppConfig) -> Result<Self, ApiClientError> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            http_client: builder.build()?,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a GET and reject non-2xx statuses.
    async fn get(&self, url: &str) -> Result<Response, ApiClientError> {
        let resp = self.http_client.get(url).send().await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiClientError::ApiError {
                status: status.as_u16(),
                detail: body,
            });
        }

        Ok(resp)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<T, ApiClientError> {
        let body = self.get(url).await?.text().await?;
        serde_json::from_str::<T>(&body)
            .map_err(|e| ApiClientError::Deserialize(format!("{e}: {body}")))
    }

    pub(crate) async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, ApiClientError> {
        Ok(self.get(url).await?.bytes().await?.to_vec())
    }
}

#[cfg(test)]
pub(crate) fn test_client(base_url: &str) -> WikiClient {
    let config = AppConfig {
        api_base_url: base_url.to_string(),
        ..AppConfig::default()
    };
    WikiClient::new(&config).expect("client builds")
}
