//! Client configuration, validated once at construction time.

use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};
use reqwest::Url;

/// Default base URL for the Congress.gov v3 API.
pub const DEFAULT_BASE_URL: &str = "https://api.congress.gov/v3";

/// Query parameter carrying the API key on every request.
pub(crate) const API_KEY_PARAM: &str = "api_key";

/// Query parameter forcing the response format.
pub(crate) const FORMAT_PARAM: &str = "format";
pub(crate) const FORMAT_VALUE: &str = "json";

/// Immutable configuration for a [`crate::CongressClient`].
///
/// Validation happens here, not on the first request: an unusable API key or
/// base URL fails construction with a descriptive message before any network
/// call is possible.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    api_key: String,
    base_url: String,
    default_params: BTreeMap<String, String>,
}

impl ClientConfig {
    /// Creates a configuration with the default base URL.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            bail!(
                "Congress API key must not be empty. \
                 Request one at https://api.congress.gov/sign-up/ and pass it to ClientConfig::new."
            );
        }

        let mut default_params = BTreeMap::new();
        default_params.insert(FORMAT_PARAM.to_string(), FORMAT_VALUE.to_string());

        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            default_params,
        })
    }

    /// Replaces the base URL. The URL must be absolute with an http(s) scheme.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        let parsed = Url::parse(&base_url)
            .with_context(|| format!("Invalid base URL '{}'", base_url))?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            bail!(
                "Base URL '{}' must be an absolute http or https URL",
                base_url
            );
        }
        self.base_url = base_url.trim_end_matches('/').to_string();
        Ok(self)
    }

    /// Adds a default query parameter sent with every request. Explicit
    /// per-request parameters take precedence over defaults.
    pub fn with_default_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.default_params.insert(key.into(), value.to_string());
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn default_params(&self) -> &BTreeMap<String, String> {
        &self.default_params
    }
}
