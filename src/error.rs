//! The error taxonomy every failed call resolves to.

/// Classification of a failed API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The API key was missing, invalid, or lacks access (HTTP 401/403).
    Unauthorized,
    /// The requested resource does not exist (HTTP 404).
    NotFound,
    /// The remote rejected the call for rate limiting (HTTP 429).
    RateLimited,
    /// The request itself was malformed (HTTP 400/422).
    ValidationError,
    /// The remote failed (HTTP 5xx).
    ServerError,
    /// The request never reached the remote (connect failure, timeout).
    NetworkError,
    /// Anything that does not fit the categories above.
    UnknownError,
}

impl ErrorKind {
    /// Whether a later attempt at the same call may succeed.
    pub fn is_transient(self) -> bool {
        matches!(self, ErrorKind::RateLimited | ErrorKind::ServerError)
    }
}

/// A classified failure, constructed exactly once at the point where the raw
/// HTTP or transport outcome is mapped to the taxonomy, and surfaced to the
/// caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CongressApiError {
    pub kind: ErrorKind,
    /// HTTP status, or `None` for transport-level failures.
    pub status: Option<u16>,
    /// Human-readable description, taken from the remote's error body when
    /// one was present.
    pub detail: String,
    /// Remote-assigned request id, when the remote supplied one.
    pub request_id: Option<String>,
    /// Whether the retry engine may re-attempt this class of failure.
    pub retryable: bool,
}

impl CongressApiError {
    pub fn new(
        kind: ErrorKind,
        status: Option<u16>,
        detail: impl Into<String>,
        request_id: Option<String>,
    ) -> Self {
        Self {
            kind,
            status,
            detail: detail.into(),
            request_id,
            retryable: kind.is_transient(),
        }
    }
}

impl std::fmt::Display for CongressApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ErrorKind::Unauthorized => {
                write!(f, "Authentication failed: {}. Check your Congress API key.", self.detail)?;
            }
            ErrorKind::NotFound => {
                write!(f, "Not found: {}", self.detail)?;
            }
            ErrorKind::RateLimited => {
                write!(f, "Rate limit exceeded: {}. Try again later.", self.detail)?;
            }
            ErrorKind::ValidationError => {
                write!(f, "Invalid request: {}", self.detail)?;
            }
            ErrorKind::ServerError => {
                write!(f, "Server error: {}", self.detail)?;
            }
            ErrorKind::NetworkError => {
                write!(f, "Network error: {}", self.detail)?;
            }
            ErrorKind::UnknownError => {
                write!(f, "Unexpected error: {}", self.detail)?;
            }
        }
        if let Some(status) = self.status {
            write!(f, " (HTTP {})", status)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request id {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for CongressApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_kinds() {
        assert!(ErrorKind::RateLimited.is_transient());
        assert!(ErrorKind::ServerError.is_transient());
        assert!(!ErrorKind::Unauthorized.is_transient());
        assert!(!ErrorKind::NotFound.is_transient());
        assert!(!ErrorKind::ValidationError.is_transient());
        assert!(!ErrorKind::NetworkError.is_transient());
        assert!(!ErrorKind::UnknownError.is_transient());
    }

    #[test]
    fn test_retryable_follows_kind() {
        let err = CongressApiError::new(ErrorKind::RateLimited, Some(429), "slow down", None);
        assert!(err.retryable);

        let err = CongressApiError::new(ErrorKind::NotFound, Some(404), "no such bill", None);
        assert!(!err.retryable);
    }

    #[test]
    fn test_display_includes_detail_and_status() {
        let err = CongressApiError::new(
            ErrorKind::NotFound,
            Some(404),
            "Bill not found",
            Some("abc-123".to_string()),
        );
        let rendered = err.to_string();
        assert!(rendered.contains("Not found: Bill not found"));
        assert!(rendered.contains("HTTP 404"));
        assert!(rendered.contains("abc-123"));
    }

    #[test]
    fn test_display_network_error_without_status() {
        let err = CongressApiError::new(ErrorKind::NetworkError, None, "connection refused", None);
        let rendered = err.to_string();
        assert!(rendered.contains("Network error: connection refused"));
        assert!(!rendered.contains("HTTP"));
    }
}
