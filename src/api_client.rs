use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use serde_json::Value;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Header carrying the static API key
pub const API_KEY_HEADER: &str = "api-key";

/// Everything the client needs, resolved by the caller before construction
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Timeout,
    Http,
    Decode,
    Transport,
}

impl ErrorKind {
    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::Timeout => "timeout",
            ErrorKind::Http => "HTTP error",
            ErrorKind::Decode => "invalid response",
            ErrorKind::Transport => "network error",
        }
    }
}

/// A failed fetch. `Display` is the text shown to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("connection timeout")]
    Timeout,

    #[error("HTTP error: {status} {reason} for url: {url}")]
    Http {
        status: u16,
        reason: String,
        url: String,
    },

    #[error("error: invalid JSON response: {0}")]
    Decode(String),

    #[error("error: {0}")]
    Transport(String),
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::Timeout => ErrorKind::Timeout,
            FetchError::Http { .. } => ErrorKind::Http,
            FetchError::Decode(_) => ErrorKind::Decode,
            FetchError::Transport(_) => ErrorKind::Transport,
        }
    }

    fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

pub type FetchOutcome = std::result::Result<Value, FetchError>;

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
    // Set when the key cannot travel in a header; every fetch then fails with it
    key_error: Option<String>,
}

impl ApiClient {
    /// Fails only when the HTTP client itself cannot be built. A key that is
    /// not a valid header value is reported by each `fetch` instead.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let key_error = match HeaderValue::from_str(&config.api_key) {
            Ok(mut api_key) => {
                api_key.set_sensitive(true);
                headers.insert(HeaderName::from_static(API_KEY_HEADER), api_key);
                None
            }
            Err(e) => {
                tracing::warn!(
                    target: "api_client",
                    "API key cannot be sent as a header, requests will fail: {}",
                    e
                );
                Some(format!("invalid API-KEY header: {}", e))
            }
        };
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        if config.api_key.is_empty() {
            tracing::warn!(target: "api_client", "No API key configured, requests are unauthenticated");
        }

        Ok(Self {
            base_url: config.base_url,
            client,
            key_error,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `base_url + path` and decode the body as JSON
    pub async fn fetch(&self, path: &str) -> FetchOutcome {
        let url = format!("{}{}", self.base_url, path);
        let started = Instant::now();
        tracing::info!(target: "api_client", "GET {}", url);

        let outcome = self.send(&url).await;

        match &outcome {
            Ok(_) => tracing::info!(
                target: "api_client",
                "GET {} succeeded in {:?}",
                path,
                started.elapsed()
            ),
            Err(e) => tracing::warn!(
                target: "api_client",
                "GET {} failed after {:?}: {}",
                path,
                started.elapsed(),
                e
            ),
        }

        outcome
    }

    async fn send(&self, url: &str) -> FetchOutcome {
        if let Some(msg) = &self.key_error {
            return Err(FetchError::Transport(msg.clone()));
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        let status = response.status();
        tracing::debug!(target: "api_client", "{} -> {}", url, status);

        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await.map_err(FetchError::from_reqwest)?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}
