//! HTTP response type and handler return-value coercion.

use std::collections::HashMap;

use serde_json::Value;

/// An HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Creates a new response with the given status.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Creates a 200 OK response.
    pub fn ok() -> Self {
        Self::new(200)
    }

    /// Creates a response with JSON content.
    pub fn json<T: serde::Serialize>(data: &T) -> Self {
        match serde_json::to_vec(data) {
            Ok(body) => Self::ok()
                .header("Content-Type", "application/json")
                .body(body),
            Err(_) => Self::internal_server_error(),
        }
    }

    /// Creates a response with plain text content.
    pub fn text(body: impl Into<String>) -> Self {
        Self::ok()
            .header("Content-Type", "text/plain; charset=utf-8")
            .body(body.into())
    }

    /// Creates a redirect response.
    pub fn redirect(url: impl Into<String>) -> Self {
        Self::new(302).header("Location", url)
    }

    /// Creates a 404 Not Found response.
    pub fn not_found() -> Self {
        Self::new(404).body("Not Found")
    }

    /// Creates a 500 Internal Server Error response.
    pub fn internal_server_error() -> Self {
        Self::new(500).body("Internal Server Error")
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Sets the status code.
    #[must_use]
    pub const fn status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Returns the body as a string.
    pub fn body_string(&self) -> Option<String> {
        String::from_utf8(self.body.clone()).ok()
    }

    /// Returns the status text for the current status code.
    pub const fn status_text(&self) -> &'static str {
        match self.status {
            200 => "OK",
            201 => "Created",
            204 => "No Content",
            301 => "Moved Permanently",
            302 => "Found",
            400 => "Bad Request",
            401 => "Unauthorized",
            403 => "Forbidden",
            404 => "Not Found",
            422 => "Unprocessable Entity",
            500 => "Internal Server Error",
            _ => "Unknown",
        }
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::ok()
    }
}

/// Conversion from a handler's return value into a [`Response`].
pub trait IntoResponse {
    /// Performs the conversion.
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response {
        self
    }
}

/// A bare body is a 200.
impl IntoResponse for String {
    fn into_response(self) -> Response {
        Response::ok().body(self)
    }
}

impl IntoResponse for &'static str {
    fn into_response(self) -> Response {
        Response::ok().body(self)
    }
}

impl IntoResponse for Vec<u8> {
    fn into_response(self) -> Response {
        Response::ok().body(self)
    }
}

impl<B: Into<Vec<u8>>> IntoResponse for (u16, B) {
    fn into_response(self) -> Response {
        Response::new(self.0).body(self.1)
    }
}

/// Status, headers and body.
impl<B: Into<Vec<u8>>> IntoResponse for (u16, HashMap<String, String>, B) {
    fn into_response(self) -> Response {
        let (status, headers, body) = self;
        Response {
            status,
            headers,
            body: body.into(),
        }
    }
}

/// A JSON object with a numeric `status` key is read as a structured
/// response: `headers` (object) and `body` (string, or any JSON value to be
/// serialized) are optional. Anything else becomes a 200 JSON body.
impl IntoResponse for Value {
    fn into_response(self) -> Response {
        let mut map = match self {
            Self::Object(map) => map,
            other => return Response::json(&other),
        };
        let Some(status) = map
            .get("status")
            .and_then(Self::as_u64)
            .and_then(|s| u16::try_from(s).ok())
        else {
            return Response::json(&map);
        };

        let mut response = Response::new(status);
        if let Some(Self::Object(headers)) = map.remove("headers") {
            for (key, value) in headers {
                let value = match value {
                    Self::String(s) => s,
                    other => other.to_string(),
                };
                response = response.header(key, value);
            }
        }
        match map.remove("body") {
            Some(Self::String(body)) => response.body(body),
            Some(Self::Null) | None => response,
            Some(other) => Response::json(&other).status(status).merge_headers(response),
        }
    }
}

impl Response {
    fn merge_headers(mut self, other: Self) -> Self {
        self.headers.extend(other.headers);
        self
    }
}
