//! Outbound request description.

use reqwest::Url;

/// A GET request to the catalog.
///
/// The catalog API is read-only, so requests carry only a URL and headers.
#[derive(Debug, Clone)]
pub struct Request {
    pub(crate) url: Url,
    pub(crate) headers: Vec<(String, String)>,
}

impl Request {
    /// Create a GET request.
    pub fn get(url: Url) -> Self {
        Self {
            url,
            headers: Vec::new(),
        }
    }

    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Target URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Path plus query, e.g. `/products/search?q=phone`.
    pub fn path_and_query(&self) -> String {
        match self.url.query() {
            Some(query) => format!("{}?{}", self.url.path(), query),
            None => self.url.path().to_string(),
        }
    }

    /// Headers in insertion order.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_and_query() {
        let url = Url::parse("https://dummyjson.com/products/search?q=red%20shoes").unwrap();
        assert_eq!(Request::get(url).path_and_query(), "/products/search?q=red%20shoes");

        let url = Url::parse("https://dummyjson.com/products/1").unwrap();
        assert_eq!(Request::get(url).path_and_query(), "/products/1");
    }

    #[test]
    fn test_headers_keep_order() {
        let url = Url::parse("https://dummyjson.com/").unwrap();
        let req = Request::get(url).header("Accept", "application/json").header("X-Trace", "1");
        assert_eq!(req.headers()[0].0, "Accept");
        assert_eq!(req.headers().len(), 2);
    }
}
