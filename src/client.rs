//! The shared client every resource lookup flows through.

use anyhow::{Context, Result};
use futures_util::Stream;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{CongressApiError, ErrorKind};
use crate::http::{Dispatcher, Envelope, RequestDescriptor, RetryPolicy, execute, normalize_response};

/// Outcome of one call through the pipeline.
pub type ApiResult<T> = Result<T, CongressApiError>;

/// Client for the Congress.gov v3 API.
///
/// Construct one instance at process startup and share it: the client holds
/// only immutable configuration and a connection-pooling `reqwest::Client`,
/// so concurrent calls through `&self` need no locking. Retry state lives on
/// the stack of each call.
pub struct CongressClient {
    config: ClientConfig,
    dispatcher: Dispatcher,
    policy: RetryPolicy,
}

impl CongressClient {
    /// Creates a client with the default retry policy.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_policy(config, RetryPolicy::default())
    }

    pub fn with_policy(config: ClientConfig, policy: RetryPolicy) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("congress-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build the HTTP client")?;
        Ok(Self {
            dispatcher: Dispatcher::new(client, config.clone()),
            config,
            policy,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Runs the full pipeline for one descriptor: dispatch with retries,
    /// normalize, and decode the payload into `T`.
    #[tracing::instrument(skip(self))]
    pub async fn request<T: DeserializeOwned>(
        &self,
        descriptor: &RequestDescriptor,
    ) -> ApiResult<Envelope<T>> {
        let response = execute(&self.dispatcher, &self.policy, descriptor).await?;
        decode(normalize_response(response, self.config.base_url()))
    }

    /// Convenience for list endpoints: builds the descriptor from a path and
    /// query parameters and decodes the payload as a sequence.
    #[tracing::instrument(skip(self, params))]
    pub async fn get_collection<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> ApiResult<Envelope<Vec<T>>> {
        self.request(&descriptor_for(path, params)).await
    }

    /// Fetches the page after `envelope`, or `None` when the remote supplied
    /// no next link. Every call issues an independent remote request; walking
    /// the same envelope twice fetches the page twice.
    #[tracing::instrument(skip(self, envelope))]
    pub async fn fetch_next<T: DeserializeOwned>(
        &self,
        envelope: &Envelope<T>,
    ) -> Option<ApiResult<Envelope<T>>> {
        let descriptor = envelope.next_page()?.clone();
        Some(self.request(&descriptor).await)
    }

    /// Symmetric to [`fetch_next`](Self::fetch_next) for the previous link.
    #[tracing::instrument(skip(self, envelope))]
    pub async fn fetch_previous<T: DeserializeOwned>(
        &self,
        envelope: &Envelope<T>,
    ) -> Option<ApiResult<Envelope<T>>> {
        let descriptor = envelope.previous_page()?.clone();
        Some(self.request(&descriptor).await)
    }

    /// Lazily walks a collection page by page. The stream is finite: it ends
    /// after the page without a next link, or after the first error.
    ///
    /// No iteration cap is imposed here. Collections like `bill` run to tens
    /// of thousands of pages, so callers looping over an unbounded walk
    /// should cap it themselves (for example with `StreamExt::take`).
    pub fn pages<'a, T: DeserializeOwned + 'a>(
        &'a self,
        path: &str,
        params: &[(&str, &str)],
    ) -> impl Stream<Item = ApiResult<Envelope<Vec<T>>>> + 'a {
        let first = descriptor_for(path, params);
        futures_util::stream::try_unfold(Some(first), move |state| async move {
            let Some(descriptor) = state else {
                return Ok(None);
            };
            let envelope = self.request::<Vec<T>>(&descriptor).await?;
            let next = envelope.next_page().cloned();
            Ok(Some((envelope, next)))
        })
    }
}

fn descriptor_for(path: &str, params: &[(&str, &str)]) -> RequestDescriptor {
    let mut descriptor = RequestDescriptor::new(path);
    for (key, value) in params {
        descriptor = descriptor.with_param(*key, value);
    }
    descriptor
}

/// Converts the normalized payload into the caller's type. A payload that
/// does not fit `T` is a contract violation, reported as `UnknownError`.
fn decode<T: DeserializeOwned>(envelope: Envelope<Value>) -> ApiResult<Envelope<T>> {
    let Envelope {
        data,
        pagination,
        meta,
    } = envelope;
    match serde_json::from_value::<T>(data) {
        Ok(data) => Ok(Envelope {
            data,
            pagination,
            meta,
        }),
        Err(error) => Err(CongressApiError::new(
            ErrorKind::UnknownError,
            None,
            format!("Failed to decode response payload: {}", error),
            None,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_client;
    use futures_util::StreamExt;
    use serde_json::json;

    #[tokio::test]
    async fn test_request_decodes_typed_payload() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/bill?api_key=test-key&format=json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"bills": [{"number": "3076"}], "pagination": {"count": 1}}"#)
            .create_async()
            .await;

        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Row {
            number: String,
        }

        let client = test_client(&server.url());
        let envelope: Envelope<Vec<Row>> = client
            .request(&RequestDescriptor::new("bill"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(envelope.data.len(), 1);
        assert_eq!(envelope.data[0].number, "3076");
        assert_eq!(envelope.pagination.unwrap().count, 1);
    }

    #[tokio::test]
    async fn test_request_decode_mismatch_is_unknown_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/bill?api_key=test-key&format=json")
            .with_status(200)
            .with_body(r#"{"bills": {"not": "an array"}}"#)
            .create_async()
            .await;

        let client = test_client(&server.url());
        let error = client
            .request::<Vec<Value>>(&RequestDescriptor::new("bill"))
            .await
            .unwrap_err();
        assert_eq!(error.kind, ErrorKind::UnknownError);
        assert!(error.detail.contains("decode"));
    }

    #[tokio::test]
    async fn test_get_collection_builds_params() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/member?api_key=test-key&format=json&limit=2")
            .with_status(200)
            .with_body(r#"{"members": [{}, {}]}"#)
            .create_async()
            .await;

        let client = test_client(&server.url());
        let envelope = client
            .get_collection::<Value>("member", &[("limit", "2")])
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(envelope.data.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_next_returns_none_without_link() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/bill?api_key=test-key&format=json")
            .with_status(200)
            .with_body(r#"{"bills": [], "pagination": {"count": 0}}"#)
            .create_async()
            .await;

        let client = test_client(&server.url());
        let envelope = client
            .request::<Vec<Value>>(&RequestDescriptor::new("bill"))
            .await
            .unwrap();
        assert!(client.fetch_next(&envelope).await.is_none());
        assert!(client.fetch_previous(&envelope).await.is_none());
    }

    #[tokio::test]
    async fn test_pages_walks_until_last() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let page1 = server
            .mock("GET", "/bill?api_key=test-key&format=json&limit=1")
            .with_status(200)
            .with_body(format!(
                r#"{{"bills": [{{"n": 1}}],
                     "pagination": {{"count": 2, "next": "{}/bill?offset=1&limit=1"}}}}"#,
                url
            ))
            .create_async()
            .await;
        let page2 = server
            .mock("GET", "/bill?api_key=test-key&format=json&limit=1&offset=1")
            .with_status(200)
            .with_body(r#"{"bills": [{"n": 2}], "pagination": {"count": 2}}"#)
            .create_async()
            .await;

        let client = test_client(&url);
        let pages: Vec<_> = client.pages::<Value>("bill", &[("limit", "1")]).collect().await;

        page1.assert_async().await;
        page2.assert_async().await;
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].as_ref().unwrap().data, vec![json!({"n": 1})]);
        assert_eq!(pages[1].as_ref().unwrap().data, vec![json!({"n": 2})]);
    }

    #[tokio::test]
    async fn test_pages_yields_error_and_ends() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/bill?api_key=test-key&format=json")
            .with_status(404)
            .create_async()
            .await;

        let client = test_client(&server.url());
        let pages: Vec<_> = client.pages::<Value>("bill", &[]).collect().await;

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].as_ref().unwrap_err().kind, ErrorKind::NotFound);
    }
}
