//! Readable classification of HTTP status failures.

use reqwest::StatusCode;

/// An HTTP response that came back with a failure status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpStatusError {
    /// The server has no such resource (HTTP 404)
    NotFound(String),
    /// Access to the resource was refused (HTTP 401/403)
    Forbidden(String),
    /// Too many requests (HTTP 429)
    RateLimited(String),
    /// Any other 4xx response
    ClientError(u16),
    /// Any 5xx response
    ServerError(u16),
}

impl std::fmt::Display for HttpStatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpStatusError::NotFound(url) => write!(f, "Not found: {}", url),
            HttpStatusError::Forbidden(url) => write!(f, "Access forbidden: {}", url),
            HttpStatusError::RateLimited(url) => {
                write!(f, "Rate limit exceeded: {}. Try again later.", url)
            }
            HttpStatusError::ClientError(code) => write!(f, "Request error: HTTP {}", code),
            HttpStatusError::ServerError(code) => write!(f, "Server error: HTTP {}", code),
        }
    }
}

impl std::error::Error for HttpStatusError {}

/// Maps a `reqwest` error carrying a status code to an [`HttpStatusError`].
/// Returns `None` for transport-level errors (connection refused, DNS, TLS).
pub fn classify_error(error: &reqwest::Error) -> Option<HttpStatusError> {
    let status = error.status()?;
    let url = error
        .url()
        .map(|u| u.to_string())
        .unwrap_or_else(|| "<unknown url>".to_string());

    let classified = match status {
        StatusCode::NOT_FOUND => HttpStatusError::NotFound(url),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => HttpStatusError::Forbidden(url),
        StatusCode::TOO_MANY_REQUESTS => HttpStatusError::RateLimited(url),
        s if s.is_client_error() => HttpStatusError::ClientError(s.as_u16()),
        s => HttpStatusError::ServerError(s.as_u16()),
    };
    Some(classified)
}

/// Converts an error from `error_for_status()` into an `anyhow::Error`,
/// replacing status failures with a readable [`HttpStatusError`].
pub fn check_status(error: reqwest::Error) -> anyhow::Error {
    match classify_error(&error) {
        Some(status) => anyhow::Error::from(status),
        None => anyhow::Error::from(error),
    }
}
