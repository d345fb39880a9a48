//! HTTP access to the OEIS search endpoint.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::catalog::cache::ResponseCache;
use crate::core::term::{terms_to_query_string, Term};
use crate::core::types::ANumber;
use crate::utils::validation::cache_key;

/// Public OEIS server
pub const DEFAULT_OEIS_BASE: &str = "https://oeis.org";

/// Default network timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: f64 = 10.0;

const USER_AGENT: &str = concat!("oeis-probe/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Response from {url} is not valid JSON: {source}")]
    InvalidJson {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Performs a GET and returns the response body
pub trait Transport {
    /// # Errors
    ///
    /// Returns a `TransportError` on network failure, timeout, or non-2xx status.
    fn get(&self, url: &str) -> Result<String, TransportError>;
}

/// Blocking `reqwest` transport
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// # Errors
    ///
    /// Returns `TransportError::Client` if the TLS backend cannot be initialised.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(TransportError::Client)?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<String, TransportError> {
        let request_error = |source: reqwest::Error| TransportError::Request {
            url: url.to_string(),
            source,
        };

        self.client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .and_then(reqwest::blocking::Response::text)
            .map_err(request_error)
    }
}

/// Client for the OEIS JSON search API, with an optional response cache
pub struct OeisClient {
    base: String,
    transport: Box<dyn Transport>,
    cache: Option<Box<dyn ResponseCache>>,
}

impl OeisClient {
    pub fn new(base: impl Into<String>, transport: Box<dyn Transport>) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
            transport,
            cache: None,
        }
    }

    #[must_use]
    pub fn with_cache(mut self, cache: Box<dyn ResponseCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// URL searching for the first `max_terms` terms.
    ///
    /// Terms are digits and `-` only and the commas are left as-is, so the
    /// query needs no further escaping.
    #[must_use]
    pub fn search_url(&self, terms: &[Term], max_terms: usize) -> String {
        let q = terms_to_query_string(terms, Some(max_terms));
        format!("{}/search?q={q}&fmt=json", self.base)
    }

    /// URL looking up a single sequence by A-number
    #[must_use]
    pub fn id_url(&self, a_number: &ANumber) -> String {
        format!("{}/search?q=id%3A{a_number}&fmt=json", self.base)
    }

    /// Search by the first `max_terms` terms
    ///
    /// # Errors
    ///
    /// Returns a `TransportError` if the request fails or the body is not JSON.
    pub fn search(&self, terms: &[Term], max_terms: usize) -> Result<Value, TransportError> {
        self.get_json(&self.search_url(terms, max_terms))
    }

    /// Fetch one sequence by A-number
    ///
    /// # Errors
    ///
    /// Returns a `TransportError` if the request fails or the body is not JSON.
    pub fn fetch_by_id(&self, a_number: &ANumber) -> Result<Value, TransportError> {
        self.get_json(&self.id_url(a_number))
    }

    fn get_json(&self, url: &str) -> Result<Value, TransportError> {
        let key = cache_key(url);

        if let Some(cached) = self.cache.as_ref().and_then(|cache| cache.get(&key)) {
            match serde_json::from_str(&cached) {
                Ok(value) => {
                    debug!("Cache hit for {url}");
                    return Ok(value);
                }
                Err(e) => debug!("Discarding cached response for {url}: {e}"),
            }
        }

        debug!("GET {url}");
        let body = self.transport.get(url)?;
        let value: Value = serde_json::from_str(&body).map_err(|source| {
            TransportError::InvalidJson {
                url: url.to_string(),
                source,
            }
        })?;

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.put(&key, &body) {
                warn!("Failed to cache response for {url}: {e}");
            }
        }

        Ok(value)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use super::*;
    use crate::catalog::cache::DiskCache;
    use crate::core::term::terms_from;

    /// Canned responses keyed by URL, recording every request made
    #[derive(Clone, Default)]
    pub(crate) struct FakeTransport {
        pub responses: HashMap<String, String>,
        pub requests: Rc<RefCell<Vec<String>>>,
    }

    impl FakeTransport {
        pub fn respond(mut self, url: &str, body: &str) -> Self {
            self.responses.insert(url.to_string(), body.to_string());
            self
        }
    }

    impl Transport for FakeTransport {
        fn get(&self, url: &str) -> Result<String, TransportError> {
            self.requests.borrow_mut().push(url.to_string());
            self.responses
                .get(url)
                .cloned()
                .ok_or_else(|| TransportError::InvalidJson {
                    url: url.to_string(),
                    source: serde_json::from_str::<Value>("").unwrap_err(),
                })
        }
    }

    #[test]
    fn test_search_url() {
        let client = OeisClient::new("https://oeis.org/", Box::new(FakeTransport::default()));
        let terms = terms_from(&[1, 2, -3, 4]);
        assert_eq!(
            client.search_url(&terms, 3),
            "https://oeis.org/search?q=1,2,-3&fmt=json"
        );
        assert_eq!(
            client.search_url(&terms, 40),
            "https://oeis.org/search?q=1,2,-3,4&fmt=json"
        );
    }

    #[test]
    fn test_id_url() {
        let client = OeisClient::new("https://oeis.org", Box::new(FakeTransport::default()));
        let a: ANumber = "a000045".parse().unwrap();
        assert_eq!(
            client.id_url(&a),
            "https://oeis.org/search?q=id%3AA000045&fmt=json"
        );
    }

    #[test]
    fn test_search_uses_cache_after_first_fetch() {
        let url = "http://local/search?q=1,2,3&fmt=json";
        let transport = FakeTransport::default().respond(url, r#"[{"number": 27}]"#);
        let requests = Rc::clone(&transport.requests);

        let dir = tempfile::tempdir().unwrap();
        let cache = DiskCache::open(dir.path(), 30).unwrap();
        let client = OeisClient::new("http://local", Box::new(transport)).with_cache(Box::new(cache));

        let terms = terms_from(&[1, 2, 3]);
        let first = client.search(&terms, 40).unwrap();
        let second = client.search(&terms, 40).unwrap();

        assert_eq!(first, second);
        assert_eq!(requests.borrow().len(), 1);
    }

    #[test]
    fn test_transport_error_propagates() {
        let client = OeisClient::new("http://local", Box::new(FakeTransport::default()));
        assert!(client.search(&terms_from(&[1]), 40).is_err());
    }

    #[test]
    fn test_invalid_json_body() {
        let url = "http://local/search?q=1&fmt=json";
        let transport = FakeTransport::default().respond(url, "<html>busy</html>");
        let client = OeisClient::new("http://local", Box::new(transport));
        assert!(matches!(
            client.search(&terms_from(&[1]), 40),
            Err(TransportError::InvalidJson { .. })
        ));
    }
}
