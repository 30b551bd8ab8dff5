//! Pure mapping from raw HTTP outcomes to the uniform envelope or a
//! classified error. No I/O, no retry awareness.

use serde_json::{Map, Value};

use super::dispatch::{RawFailure, RawResponse, RequestDescriptor};
use crate::config::{API_KEY_PARAM, FORMAT_PARAM};
use crate::error::{CongressApiError, ErrorKind};

/// Top-level key the remote uses for its own request metadata.
const REQUEST_META_KEY: &str = "request";

/// Uniform success wrapper: the unwrapped payload, pagination cues, and any
/// secondary metadata the remote attached, passed through verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    pub data: T,
    pub pagination: Option<PaginationInfo>,
    pub meta: Map<String, Value>,
}

impl<T> Envelope<T> {
    pub fn has_next(&self) -> bool {
        self.next_page().is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.previous_page().is_some()
    }

    /// Ready-to-dispatch descriptor for the following page, if the remote
    /// supplied a next link.
    pub fn next_page(&self) -> Option<&RequestDescriptor> {
        self.pagination.as_ref().and_then(|p| p.next.as_ref())
    }

    pub fn previous_page(&self) -> Option<&RequestDescriptor> {
        self.pagination.as_ref().and_then(|p| p.previous.as_ref())
    }
}

/// Pagination cues extracted from a collection response. `next`/`previous`
/// are pre-parsed descriptors, `None` exactly when the remote supplied no
/// corresponding link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationInfo {
    pub count: u64,
    pub next: Option<RequestDescriptor>,
    pub previous: Option<RequestDescriptor>,
}

/// Maps a raw dispatch outcome into an envelope or a classified error.
pub fn normalize(
    raw: Result<RawResponse, RawFailure>,
    base_url: &str,
) -> Result<Envelope<Value>, CongressApiError> {
    match raw {
        Ok(response) => Ok(normalize_response(response, base_url)),
        Err(failure) => Err(classify_failure(&failure)),
    }
}

/// Success path: unwraps the primary top-level key and extracts pagination
/// and secondary metadata.
pub fn normalize_response(response: RawResponse, base_url: &str) -> Envelope<Value> {
    let mut fields = match response.body {
        Value::Object(fields) => fields,
        // Non-object payloads pass through whole.
        other => {
            return Envelope {
                data: other,
                pagination: None,
                meta: Map::new(),
            };
        }
    };

    let pagination = fields
        .remove("pagination")
        .and_then(|value| parse_pagination(&value, base_url));

    let candidates: Vec<String> = fields
        .keys()
        .filter(|key| key.as_str() != REQUEST_META_KEY)
        .cloned()
        .collect();

    if let [primary] = candidates.as_slice() {
        let data = fields.remove(primary).unwrap_or(Value::Null);
        Envelope {
            data,
            pagination,
            meta: fields,
        }
    } else {
        // Zero or several primary keys: no unambiguous unwrap, so the
        // remaining object passes through as-is.
        let mut meta = Map::new();
        if let Some(request) = fields.remove(REQUEST_META_KEY) {
            meta.insert(REQUEST_META_KEY.to_string(), request);
        }
        Envelope {
            data: Value::Object(fields),
            pagination,
            meta,
        }
    }
}

fn parse_pagination(value: &Value, base_url: &str) -> Option<PaginationInfo> {
    let fields = value.as_object()?;
    let count = fields.get("count").and_then(Value::as_u64).unwrap_or(0);
    let next = fields
        .get("next")
        .and_then(Value::as_str)
        .and_then(|link| parse_link(link, base_url));
    let previous = ["previous", "prev"]
        .iter()
        .find_map(|key| fields.get(*key))
        .and_then(Value::as_str)
        .and_then(|link| parse_link(link, base_url));
    Some(PaginationInfo {
        count,
        next,
        previous,
    })
}

/// Parses a pagination link string into a dispatchable descriptor, isolating
/// every other component from the remote's URL format. The API key and
/// format marker are stripped since the dispatcher re-injects them.
fn parse_link(link: &str, base_url: &str) -> Option<RequestDescriptor> {
    let url = reqwest::Url::parse(link).ok()?;

    let base_path = reqwest::Url::parse(base_url)
        .map(|base| base.path().trim_end_matches('/').to_string())
        .unwrap_or_default();
    let mut path = url.path().to_string();
    if !base_path.is_empty() && path.starts_with(&base_path) {
        path = path[base_path.len()..].to_string();
    }

    let mut descriptor = RequestDescriptor::new(path.trim_start_matches('/'));
    for (key, value) in url.query_pairs() {
        if key == API_KEY_PARAM || key == FORMAT_PARAM {
            continue;
        }
        descriptor.params.insert(key.into_owned(), value.into_owned());
    }
    Some(descriptor)
}

/// The single classification point: maps a raw failure to the error
/// taxonomy. The retry engine and the caller-visible error share this
/// mapping, so "is this retryable" has one source of truth.
pub fn classify_failure(failure: &RawFailure) -> CongressApiError {
    let kind = match failure.status {
        Some(401) | Some(403) => ErrorKind::Unauthorized,
        Some(404) => ErrorKind::NotFound,
        Some(429) => ErrorKind::RateLimited,
        Some(400) | Some(422) => ErrorKind::ValidationError,
        Some(status) if status >= 500 => ErrorKind::ServerError,
        Some(_) => ErrorKind::UnknownError,
        None => ErrorKind::NetworkError,
    };

    let detail = failure
        .body
        .as_ref()
        .and_then(extract_detail)
        .unwrap_or_else(|| default_detail(kind, failure));

    let request_id = failure.request_id.clone().or_else(|| {
        failure
            .body
            .as_ref()
            .and_then(|body| body.get("requestId"))
            .and_then(Value::as_str)
            .map(str::to_string)
    });

    CongressApiError::new(kind, failure.status, detail, request_id)
}

/// The remote wraps error messages a few different ways; take the first one
/// that is present.
fn extract_detail(body: &Value) -> Option<String> {
    if let Some(error) = body.get("error") {
        if let Some(message) = error.get("message").and_then(Value::as_str) {
            return Some(message.to_string());
        }
        if let Some(message) = error.as_str() {
            return Some(message.to_string());
        }
    }
    body.get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn default_detail(kind: ErrorKind, failure: &RawFailure) -> String {
    match kind {
        ErrorKind::Unauthorized => "the API key was missing or rejected".to_string(),
        ErrorKind::NotFound => "the requested resource was not found".to_string(),
        ErrorKind::RateLimited => "the rate limit was exceeded".to_string(),
        ErrorKind::ValidationError => "the request was rejected as invalid".to_string(),
        ErrorKind::ServerError => match failure.status {
            Some(status) => format!("the Congress API returned HTTP {}", status),
            None => "the Congress API failed".to_string(),
        },
        ErrorKind::NetworkError | ErrorKind::UnknownError => failure.message.clone(),
    }
}
