//! Pluggable transport stages.
//!
//! A request passes through four stages: header preparation, URL
//! preparation, the network call, and response decoding. [`Transport`]
//! exposes each stage as a method so a consumer can replace one of them
//! (inject a test double, add tracing, change TLS settings) without touching
//! the resource APIs. Only [`Transport::send`] has no default.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Method, StatusCode};
use serde_json::Value;

use crate::auth::Credential;
use crate::error::{Error, Result};

/// URL scheme used to reach the zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Protocol {
    Http,
    #[default]
    Https,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }
}

impl std::str::FromStr for Protocol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "http" => Ok(Protocol::Http),
            "https" => Ok(Protocol::Https),
            other => Err(Error::Config(format!("unsupported protocol '{}'", other))),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where API requests are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Regional host, e.g. `eu1.example.com` (a port may be included).
    pub zone: String,
    /// URL scheme.
    pub protocol: Protocol,
    /// API version number.
    pub version: u32,
}

impl Endpoint {
    /// Base URL that rooted paths are resolved against.
    pub fn base_url(&self) -> String {
        format!("{}://{}/api/v{}", self.protocol, self.zone, self.version)
    }

    /// Resolve a request path to an absolute URL.
    ///
    /// - `/path` resolves against `protocol://zone/api/v{version}`.
    /// - `//host/path` is protocol-relative.
    /// - Anything else is used verbatim.
    pub fn resolve(&self, path: &str) -> String {
        if path.starts_with("//") {
            format!("{}:{}", self.protocol, path)
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url(), path)
        } else {
            path.to_string()
        }
    }
}

/// A fully prepared request, ready to be sent.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

/// A raw response as returned by the network stage.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl HttpResponse {
    /// Build a response; convenient for test doubles.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Build a JSON response.
    pub fn json(status: u16, body: &Value) -> Self {
        Self::new(status, body.to_string())
            .with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
    }

    /// Add a header.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Inputs to header preparation.
#[derive(Debug)]
pub struct HeaderContext<'a> {
    /// Credential to authorize with.
    pub credential: &'a Credential,
    /// Value for the `user-agent` header.
    pub user_agent: &'a str,
    /// Client-wide default headers.
    pub defaults: &'a HeaderMap,
    /// Per-request headers supplied by the caller.
    pub request: &'a HeaderMap,
    /// Whether the body is JSON produced by the client.
    pub json_body: bool,
}

/// The overridable stages of a request.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Merge default, caller and authorization headers.
    fn prepare_headers(&self, ctx: &HeaderContext<'_>) -> Result<HeaderMap> {
        default_headers(ctx)
    }

    /// Turn a request path into an absolute URL.
    fn prepare_url(&self, endpoint: &Endpoint, path: &str) -> String {
        endpoint.resolve(path)
    }

    /// Perform one network call.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;

    /// Decode a successful response body.
    fn decode(&self, response: HttpResponse) -> Result<Value> {
        decode_response(response)
    }
}

/// Default header merge.
///
/// Precedence, lowest first: user agent, client defaults, JSON content type,
/// caller headers. Authorization is always set last and cannot be
/// overridden by the caller.
pub fn default_headers(ctx: &HeaderContext<'_>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(ctx.user_agent)
            .map_err(|_| Error::Config("Invalid user agent".to_string()))?,
    );
    for (name, value) in ctx.defaults {
        headers.insert(name.clone(), value.clone());
    }
    if ctx.json_body {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }
    for (name, value) in ctx.request {
        headers.insert(name.clone(), value.clone());
    }
    headers.insert(AUTHORIZATION, ctx.credential.header_value()?);
    Ok(headers)
}

/// Default response decoding.
///
/// JSON content types are parsed, an empty body decodes to `null`, and any
/// other body is returned as a JSON string.
pub fn decode_response(response: HttpResponse) -> Result<Value> {
    if response.body.trim().is_empty() {
        return Ok(Value::Null);
    }
    let is_json = response
        .headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"));
    if is_json {
        Ok(serde_json::from_str(&response.body)?)
    } else {
        Ok(Value::String(response.body))
    }
}

/// Transport backed by a `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Create a transport with its own connection pool.
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self { http, timeout })
    }

    /// Wrap an existing `reqwest::Client` (custom TLS, proxies, ...).
    pub fn with_client(http: reqwest::Client, timeout: Duration) -> Self {
        Self { http, timeout }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = self
            .http
            .request(request.method, &request.url)
            .headers(request.headers)
            .timeout(self.timeout);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint() -> Endpoint {
        Endpoint {
            zone: "eu1.example.com".to_string(),
            protocol: Protocol::Https,
            version: 2,
        }
    }

    #[test]
    fn test_resolve_rooted_path() {
        assert_eq!(
            endpoint().resolve("/scenarios/5"),
            "https://eu1.example.com/api/v2/scenarios/5"
        );
    }

    #[test]
    fn test_resolve_protocol_relative() {
        assert_eq!(
            endpoint().resolve("//cdn.example.com/file.json"),
            "https://cdn.example.com/file.json"
        );
    }

    #[test]
    fn test_resolve_absolute_verbatim() {
        assert_eq!(
            endpoint().resolve("http://other.example.com/x?y=1"),
            "http://other.example.com/x?y=1"
        );
    }

    #[test]
    fn test_protocol_parse() {
        assert_eq!("HTTP".parse::<Protocol>().unwrap(), Protocol::Http);
        assert_eq!("https".parse::<Protocol>().unwrap(), Protocol::Https);
        assert!("ftp".parse::<Protocol>().is_err());
    }

    #[test]
    fn test_header_precedence() {
        let credential = Credential::new("oauth-token");
        let mut defaults = HeaderMap::new();
        defaults.insert("x-team", HeaderValue::from_static("1"));
        defaults.insert(USER_AGENT, HeaderValue::from_static("custom-agent"));
        let mut request = HeaderMap::new();
        request.insert("x-team", HeaderValue::from_static("2"));
        request.insert(CONTENT_TYPE, HeaderValue::from_static("text/markdown"));
        request.insert(AUTHORIZATION, HeaderValue::from_static("Bearer forged"));

        let headers = default_headers(&HeaderContext {
            credential: &credential,
            user_agent: "conveyor-client/0.0.0",
            defaults: &defaults,
            request: &request,
            json_body: true,
        })
        .unwrap();

        assert_eq!(headers[USER_AGENT], "custom-agent");
        assert_eq!(headers["x-team"], "2");
        assert_eq!(headers[CONTENT_TYPE], "text/markdown");
        assert_eq!(headers[AUTHORIZATION], "Bearer oauth-token");
    }

    #[test]
    fn test_decode_json() {
        let response = HttpResponse::json(200, &serde_json::json!({"scenario": {"id": 1}}));
        assert_eq!(
            decode_response(response).unwrap()["scenario"]["id"],
            serde_json::json!(1)
        );
    }

    #[test]
    fn test_decode_text_and_empty() {
        assert_eq!(
            decode_response(HttpResponse::new(200, "# Readme")).unwrap(),
            Value::String("# Readme".into())
        );
        assert_eq!(decode_response(HttpResponse::new(204, "")).unwrap(), Value::Null);
    }
}
