//! Per-request options.

use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde_json::Value;

use crate::encode::Query;
use crate::error::{Error, Result};

/// Request body.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Serialized with `serde_json` and sent as `application/json`.
    Json(Value),
    /// Sent byte-for-byte with whatever content type the caller set.
    Text(String),
}

/// Method, headers, query and body for a single dispatch.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub query: Query,
    pub body: Option<Body>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: HeaderMap::new(),
            query: Query::new(),
            body: None,
        }
    }
}

impl RequestOptions {
    /// A GET request.
    pub fn get() -> Self {
        Self::default()
    }

    /// A request with the given method and no body.
    pub fn method(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// A POST request.
    pub fn post() -> Self {
        Self::method(Method::POST)
    }

    /// A PUT request.
    pub fn put() -> Self {
        Self::method(Method::PUT)
    }

    /// A PATCH request.
    pub fn patch() -> Self {
        Self::method(Method::PATCH)
    }

    /// A DELETE request.
    pub fn delete() -> Self {
        Self::method(Method::DELETE)
    }

    /// Set the query.
    pub fn query(mut self, query: Query) -> Self {
        self.query = query;
        self
    }

    /// Set a JSON body from any serializable value.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(Body::Json(serde_json::to_value(body)?));
        Ok(self)
    }

    /// Set a JSON body from a value that is already JSON.
    pub fn json_value(mut self, body: Value) -> Self {
        self.body = Some(Body::Json(body));
        self
    }

    /// Set a pre-serialized body and its content type.
    pub fn text(mut self, body: impl Into<String>, content_type: &'static str) -> Self {
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        self.body = Some(Body::Text(body.into()));
        self
    }

    /// Add a header.
    pub fn header(mut self, name: &str, value: &str) -> Result<Self> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| Error::Config(format!("Invalid header name '{}'", name)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|_| Error::Config(format!("Invalid value for header '{}'", name)))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// True when the body will be serialized by the client.
    pub(crate) fn has_json_body(&self) -> bool {
        matches!(self.body, Some(Body::Json(_)))
    }

    /// The body as it goes on the wire.
    pub(crate) fn serialized_body(&self) -> Result<Option<String>> {
        match &self.body {
            None => Ok(None),
            Some(Body::Json(value)) => Ok(Some(serde_json::to_string(value)?)),
            Some(Body::Text(text)) => Ok(Some(text.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_is_get() {
        let opts = RequestOptions::default();
        assert_eq!(opts.method, Method::GET);
        assert!(opts.body.is_none());
        assert!(opts.query.is_empty());
    }

    #[test]
    fn test_json_body_serialized() {
        let opts = RequestOptions::post()
            .json(&json!({"name": "flow", "teamId": 1}))
            .unwrap();
        assert!(opts.has_json_body());
        assert_eq!(
            opts.serialized_body().unwrap().as_deref(),
            Some(r#"{"name":"flow","teamId":1}"#)
        );
    }

    #[test]
    fn test_text_body_passes_through() {
        let opts = RequestOptions::put().text("# Title\n\nbody", "text/markdown");
        assert!(!opts.has_json_body());
        assert_eq!(opts.headers[CONTENT_TYPE], "text/markdown");
        assert_eq!(
            opts.serialized_body().unwrap().as_deref(),
            Some("# Title\n\nbody")
        );
    }

    #[test]
    fn test_invalid_header_rejected() {
        assert!(RequestOptions::get().header("bad header", "x").is_err());
        assert!(RequestOptions::get().header("x-ok", "line\nbreak").is_err());
    }
}
