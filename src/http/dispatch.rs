//! Builds and sends a single HTTP request with injected credentials.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::Value;

use crate::config::{API_KEY_PARAM, ClientConfig, FORMAT_PARAM, FORMAT_VALUE};

/// Response header carrying the remote-assigned request id.
const REQUEST_ID_HEADER: &str = "x-amzn-requestid";

/// Response header with the remote's rate-limit backoff hint, in seconds.
const RETRY_AFTER_HEADER: &str = "retry-after";

/// One logical remote call before credentials and defaults are merged in.
///
/// Produced by resource modules (or parsed from the remote's pagination
/// links); consumed by the dispatcher.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestDescriptor {
    /// Path relative to the configured base URL, e.g. `bill/117`.
    pub path: String,
    /// Query parameters. Sorted, so the outbound query string is stable.
    pub params: BTreeMap<String, String>,
}

impl RequestDescriptor {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: BTreeMap::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

/// A response the remote actually produced with a 2xx status, body decoded
/// as JSON but otherwise untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub request_id: Option<String>,
    pub body: Value,
}

/// A failed attempt, carrying whatever the transport or remote reported.
///
/// `status` is `None` exactly when the request never produced an HTTP
/// response (connect failure, timeout). The triggering body is preserved
/// verbatim for the normalizer; classification does not happen here.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFailure {
    pub status: Option<u16>,
    pub request_id: Option<String>,
    pub retry_after: Option<Duration>,
    pub body: Option<Value>,
    pub message: String,
}

impl RawFailure {
    fn transport(error: &reqwest::Error) -> Self {
        Self {
            status: None,
            request_id: None,
            retry_after: None,
            body: None,
            message: format!("Failed to send request to the Congress API: {}", error),
        }
    }
}

/// The dispatch seam: exactly one outbound HTTP call per invocation, no
/// retries at this layer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Dispatch: Send + Sync {
    async fn send(&self, descriptor: &RequestDescriptor) -> Result<RawResponse, RawFailure>;
}

/// Dispatcher over a shared `reqwest::Client`.
#[derive(Clone)]
pub struct Dispatcher {
    client: Client,
    config: ClientConfig,
}

impl Dispatcher {
    pub fn new(client: Client, config: ClientConfig) -> Self {
        Self { client, config }
    }

    /// Joins the descriptor path to the base URL with exactly one slash,
    /// regardless of leading/trailing slashes on either side.
    fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Merge order: defaults, then descriptor params, then forced overrides.
    /// The API key and format marker always win.
    fn merged_params(&self, descriptor: &RequestDescriptor) -> Vec<(String, String)> {
        let mut merged = self.config.default_params().clone();
        merged.extend(descriptor.params.clone());
        merged.insert(FORMAT_PARAM.to_string(), FORMAT_VALUE.to_string());
        merged.insert(API_KEY_PARAM.to_string(), self.config.api_key().to_string());
        merged.into_iter().collect()
    }
}

#[async_trait]
impl Dispatch for Dispatcher {
    #[tracing::instrument(skip(self))]
    async fn send(&self, descriptor: &RequestDescriptor) -> Result<RawResponse, RawFailure> {
        let url = self.url_for(&descriptor.path);
        let params = self.merged_params(descriptor);

        debug!("GET {} with {} query parameters...", url, params.len());

        let response = match self.client.get(&url).query(&params).send().await {
            Ok(response) => response,
            Err(error) => return Err(RawFailure::transport(&error)),
        };

        let status = response.status().as_u16();
        let request_id = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let retry_after = response
            .headers()
            .get(RETRY_AFTER_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<u64>().ok())
            .map(Duration::from_secs);

        let text = match response.text().await {
            Ok(text) => text,
            Err(error) => {
                return Err(RawFailure {
                    status: Some(status),
                    request_id,
                    retry_after,
                    body: None,
                    message: format!("Failed to read response body: {}", error),
                });
            }
        };

        if (200..300).contains(&status) {
            match serde_json::from_str::<Value>(&text) {
                Ok(body) => Ok(RawResponse {
                    status,
                    request_id,
                    body,
                }),
                Err(error) => Err(RawFailure {
                    status: Some(status),
                    request_id,
                    retry_after: None,
                    body: None,
                    message: format!("Failed to parse JSON response body: {}", error),
                }),
            }
        } else {
            // HTTP-level failure: preserve the status and body verbatim and
            // let the normalizer classify it.
            Err(RawFailure {
                status: Some(status),
                request_id,
                retry_after,
                body: serde_json::from_str::<Value>(&text).ok(),
                message: format!("HTTP {}", status),
            })
        }
    }
}
