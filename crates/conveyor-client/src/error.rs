//! Client error types and translation of failed HTTP responses.

use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use serde_json::Value;
use thiserror::Error;

/// Client error type.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed below the HTTP layer (DNS, connect, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A custom transport failed to deliver the request.
    #[error("Transport error: {0}")]
    Transport(String),

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server returned an error response.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A successful response body had an unexpected shape.
    #[error("Unexpected response body: {0}")]
    UnexpectedBody(String),

    /// The response envelope did not contain the expected field.
    #[error("Missing field '{0}' in response")]
    MissingField(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(err) => Some(err.status),
            _ => None,
        }
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// Check if this is a rate limit error.
    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(429)
    }

    /// Check if this is a server error.
    pub fn is_server_error(&self) -> bool {
        matches!(self.status(), Some(status) if status >= 500)
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error returned by the remote API for any status >= 400.
#[derive(Debug, Clone, Error)]
#[error("API error ({status}): {message}")]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Human-readable message.
    pub message: String,
    /// Platform error code (e.g. `IM005`), when supplied.
    pub code: Option<String>,
    /// Free-form detail, when supplied.
    pub detail: Option<Value>,
    /// Structured sub-errors, when supplied.
    pub sub_errors: Vec<Value>,
}

impl ApiError {
    /// Create an error with only a status and message.
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code: None,
            detail: None,
            sub_errors: Vec::new(),
        }
    }
}

/// Build an [`ApiError`] from a failed response.
///
/// The body is read as JSON when the content type says so (or when it parses
/// as JSON anyway), otherwise as plain text. A text body never becomes the
/// message; it is kept in `detail`.
pub fn translate(status: StatusCode, headers: &HeaderMap, body: &str) -> ApiError {
    let status = status.as_u16();
    let is_json = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("json"));

    let parsed = if is_json || body.trim_start().starts_with('{') {
        serde_json::from_str::<Value>(body).ok()
    } else {
        None
    };

    let Some(Value::Object(obj)) = parsed else {
        let text = body.trim();
        let mut err = ApiError::new(status, format!("HTTP {}", status));
        if !text.is_empty() {
            err.detail = Some(Value::String(text.to_string()));
        }
        return err;
    };

    let message = obj
        .get("message")
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| format!("HTTP {}", status));

    let code = obj.get("code").and_then(|c| match c {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    });

    let sub_errors = obj
        .get("suberrors")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    ApiError {
        status,
        message,
        code,
        detail: obj.get("detail").filter(|d| !d.is_null()).cloned(),
        sub_errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn json_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    #[test]
    fn test_translate_json_body() {
        let body = r#"{"message":"Scenario not found","code":"IM005","detail":"id 7","suberrors":[{"message":"x"}]}"#;
        let err = translate(StatusCode::NOT_FOUND, &json_headers(), body);
        assert_eq!(err.status, 404);
        assert_eq!(err.message, "Scenario not found");
        assert_eq!(err.code.as_deref(), Some("IM005"));
        assert_eq!(err.detail, Some(Value::String("id 7".into())));
        assert_eq!(err.sub_errors.len(), 1);
    }

    #[test]
    fn test_translate_json_without_message() {
        let err = translate(StatusCode::BAD_REQUEST, &json_headers(), r#"{"code":42}"#);
        assert_eq!(err.message, "HTTP 400");
        assert_eq!(err.code.as_deref(), Some("42"));
    }

    #[test]
    fn test_translate_plain_text() {
        let err = translate(
            StatusCode::BAD_GATEWAY,
            &HeaderMap::new(),
            "<html>upstream down</html>",
        );
        assert_eq!(err.status, 502);
        assert_eq!(err.message, "HTTP 502");
        assert_eq!(
            err.detail,
            Some(Value::String("<html>upstream down</html>".into()))
        );
        assert!(err.sub_errors.is_empty());
    }

    #[test]
    fn test_translate_empty_body() {
        let err = translate(StatusCode::UNAUTHORIZED, &HeaderMap::new(), "");
        assert_eq!(err.message, "HTTP 401");
        assert_eq!(err.detail, None);
    }

    #[test]
    fn test_translate_invalid_json_falls_back_to_text() {
        let err = translate(StatusCode::BAD_REQUEST, &json_headers(), "{not json");
        assert_eq!(err.message, "HTTP 400");
        assert_eq!(err.detail, Some(Value::String("{not json".into())));
    }

    #[test]
    fn test_error_predicates() {
        let err = Error::from(ApiError::new(404, "gone"));
        assert!(err.is_not_found());
        assert!(!err.is_server_error());
        assert_eq!(err.to_string(), "API error (404): gone");

        assert!(Error::from(ApiError::new(429, "slow down")).is_rate_limited());
        assert!(Error::from(ApiError::new(503, "busy")).is_server_error());
        assert!(Error::from(ApiError::new(401, "who")).is_auth_error());
        assert_eq!(Error::Config("x".into()).status(), None);
    }
}
