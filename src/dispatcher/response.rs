use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::Value;

/// Content type for successful responses.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Content type for error responses.
pub const CONTENT_TYPE_TEXT: &str = "text/plain";

/// Response body, already serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    /// JSON content type, no content.
    Empty,
    Json(Vec<u8>),
    Text(String),
}

/// A complete response as a value: status, extra headers and body.
///
/// Handlers build these and the HTTP boundary writes them out through
/// `IntoResponse`, which adds `Content-Type` and `Content-Length`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: Vec<(HeaderName, String)>,
    pub body: ResponseBody,
}

impl ApiResponse {
    pub fn json(status: StatusCode, value: &Value) -> Self {
        // Serializing a `Value` cannot fail: keys are always strings.
        let body = serde_json::to_vec(value).unwrap_or_default();
        ApiResponse {
            status,
            headers: Vec::new(),
            body: ResponseBody::Json(body),
        }
    }

    pub fn empty(status: StatusCode) -> Self {
        ApiResponse {
            status,
            headers: Vec::new(),
            body: ResponseBody::Empty,
        }
    }

    pub fn text(status: StatusCode, message: impl Into<String>) -> Self {
        ApiResponse {
            status,
            headers: Vec::new(),
            body: ResponseBody::Text(message.into()),
        }
    }

    pub fn with_header(mut self, name: HeaderName, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    /// Header value by name, for inspection in tests and logs.
    pub fn header(&self, name: &HeaderName) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn content_type(&self) -> &'static str {
        match self.body {
            ResponseBody::Empty | ResponseBody::Json(_) => CONTENT_TYPE_JSON,
            ResponseBody::Text(_) => CONTENT_TYPE_TEXT,
        }
    }

    pub fn body_bytes(&self) -> &[u8] {
        match &self.body {
            ResponseBody::Empty => &[],
            ResponseBody::Json(bytes) => bytes,
            ResponseBody::Text(text) => text.as_bytes(),
        }
    }

    /// Body parsed back into JSON, `None` for empty or text bodies.
    pub fn json_body(&self) -> Option<Value> {
        match &self.body {
            ResponseBody::Json(bytes) => serde_json::from_slice(bytes).ok(),
            _ => None,
        }
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(self.content_type()),
        );
        headers.insert(
            header::CONTENT_LENGTH,
            HeaderValue::from(self.body_bytes().len()),
        );
        for (name, value) in &self.headers {
            if let Ok(value) = HeaderValue::from_str(value) {
                headers.insert(name.clone(), value);
            }
        }

        let body = match self.body {
            ResponseBody::Empty => Body::empty(),
            ResponseBody::Json(bytes) => Body::from(bytes),
            ResponseBody::Text(text) => Body::from(text),
        };

        (self.status, headers, body).into_response()
    }
}
