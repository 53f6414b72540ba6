//! HTTP client error types.

use thiserror::Error;

/// Errors that can occur when making HTTP requests.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Failed to send the request.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP error response.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request timeout.
    #[error("Request timed out")]
    Timeout,
}

impl FetchError {
    /// Check if this is an HTTP 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::HttpError { status: 404, .. })
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::ParseError(e.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_builder() {
            FetchError::InvalidUrl(e.to_string())
        } else {
            FetchError::RequestError(e.to_string())
        }
    }
}

/// Errors surfaced by the catalog client.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog could not be reached.
    #[error("Catalog unavailable: {0}")]
    Network(#[from] FetchError),

    /// The requested record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The catalog answered with something that is not a catalog payload.
    #[error("Malformed catalog response: {0}")]
    Parse(String),
}
