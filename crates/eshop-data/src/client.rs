//! Base-URL aware fetch client.

use std::fmt;
use std::sync::Arc;

use reqwest::Url;

use crate::{FetchError, Request, Response, Transport};

/// HTTP client bound to a base URL and a [`Transport`].
///
/// Paths are given as segments and query values as pairs; both are
/// percent-encoded when the URL is built.
#[derive(Clone)]
pub struct FetchClient {
    base_url: Url,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl FetchClient {
    /// Create a client for `base_url`.
    pub fn new(base_url: &str, transport: Arc<dyn Transport>) -> Result<Self, FetchError> {
        let base_url =
            Url::parse(base_url).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self {
            base_url,
            transport,
        })
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the URL for `segments` below the base URL.
    pub fn url(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// GET `segments` and return the response, whatever its status.
    pub async fn get(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Response, FetchError> {
        let url = self.url(segments, query)?;
        tracing::debug!(url = %url, "catalog request");

        let request = Request::get(url.clone()).header("Accept", "application/json");
        let response = self.transport.send(request).await.map_err(|e| {
            tracing::warn!(url = %url, error = %e, "catalog request failed");
            e
        })?;

        tracing::debug!(url = %url, status = response.status, bytes = response.body.len(), "catalog response");
        Ok(response)
    }
}
