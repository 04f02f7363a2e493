//! HTTP request type.

use std::collections::HashMap;

use trailhead_router::{Method, PathParams, RouteOptions};

/// An HTTP request as seen by handlers.
#[derive(Debug, Clone)]
pub struct Request {
    /// HTTP method, uppercased.
    pub method: String,
    /// Request path, rewritten on each mount delegation.
    pub path: String,
    /// Path as received, set by the first delegation.
    pub original_path: Option<String>,
    /// Path parameters extracted from URL patterns.
    pub params: PathParams,
    /// Options of the matched route, layered over those of enclosing mounts.
    pub options: RouteOptions,
    /// Query string parameters.
    pub query: HashMap<String, String>,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// Request body.
    pub body: Vec<u8>,
}

impl Request {
    /// Creates a new request.
    ///
    /// A query string in `target` is split off into [`Request::query`].
    pub fn new(method: impl AsRef<str>, target: impl Into<String>) -> Self {
        let target = target.into();
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path.to_string(), Self::parse_query_string(query)),
            None => (target, HashMap::new()),
        };
        Self {
            method: method.as_ref().to_ascii_uppercase(),
            path,
            original_path: None,
            params: PathParams::new(),
            options: RouteOptions::new(),
            query,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Creates a GET request.
    pub fn get(target: impl Into<String>) -> Self {
        Self::new(Method::Get.as_str(), target)
    }

    /// Creates a POST request.
    pub fn post(target: impl Into<String>) -> Self {
        Self::new(Method::Post.as_str(), target)
    }

    /// Creates a PUT request.
    pub fn put(target: impl Into<String>) -> Self {
        Self::new(Method::Put.as_str(), target)
    }

    /// Creates a DELETE request.
    pub fn delete(target: impl Into<String>) -> Self {
        Self::new(Method::Delete.as_str(), target)
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Gets a header value.
    pub fn get_header(&self, key: &str) -> Option<&str> {
        // Case-insensitive header lookup
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Gets a query parameter.
    pub fn get_query(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    /// Gets a captured path parameter.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key)
    }

    /// Path as originally received, before any mount rewrote it.
    pub fn original_path(&self) -> &str {
        self.original_path.as_deref().unwrap_or(&self.path)
    }

    /// Returns the body as a string.
    pub fn body_string(&self) -> Option<String> {
        String::from_utf8(self.body.clone()).ok()
    }

    /// Parses the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Parses query parameters from a query string.
    pub fn parse_query_string(query: &str) -> HashMap<String, String> {
        query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .filter_map(|pair| {
                let mut parts = pair.splitn(2, '=');
                let key = parts.next()?;
                let value = parts.next().unwrap_or("");
                Some((urlencoding_decode(key), urlencoding_decode(value)))
            })
            .collect()
    }
}

/// Simple URL decoding.
fn urlencoding_decode(s: &str) -> String {
    let mut bytes = Vec::with_capacity(s.len());
    let mut rest = s.as_bytes();

    while let Some((&b, tail)) = rest.split_first() {
        match b {
            b'%' if tail.len() >= 2 => {
                let decoded = std::str::from_utf8(&tail[..2])
                    .ok()
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok());
                if let Some(byte) = decoded {
                    bytes.push(byte);
                    rest = &tail[2..];
                    continue;
                }
                bytes.push(b);
            }
            b'+' => bytes.push(b' '),
            _ => bytes.push(b),
        }
        rest = tail;
    }

    String::from_utf8_lossy(&bytes).into_owned()
}
