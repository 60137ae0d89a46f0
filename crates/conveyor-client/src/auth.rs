//! Credential classification and the `Authorization` header.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use reqwest::header::HeaderValue;

use crate::error::{Error, Result};

/// Platform API keys are issued as hyphenated UUIDs; older keys are 40 hex chars.
static API_KEY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}|[0-9a-fA-F]{40})$",
    )
    .expect("API key pattern is valid")
});

/// Authorization scheme implied by a credential's shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// A platform API key, sent as `Token <key>`.
    ApiKey,
    /// An OAuth access token, sent as `Bearer <token>`.
    Bearer,
}

impl AuthScheme {
    /// The scheme word used in the header.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthScheme::ApiKey => "Token",
            AuthScheme::Bearer => "Bearer",
        }
    }
}

/// Classify a credential string.
pub fn classify(token: &str) -> AuthScheme {
    if API_KEY_PATTERN.is_match(token) {
        AuthScheme::ApiKey
    } else {
        AuthScheme::Bearer
    }
}

/// Build the `Authorization` header value for a credential.
///
/// The value is marked sensitive so it is redacted from `Debug` output.
pub fn authorization_header(token: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(&format!("{} {}", classify(token).as_str(), token))
        .map_err(|_| Error::Config("Invalid credential".to_string()))?;
    value.set_sensitive(true);
    Ok(value)
}

/// An opaque credential. Classified per request, never stored classified.
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    /// Wrap a credential string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw credential.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// The scheme this credential will be sent with.
    pub fn scheme(&self) -> AuthScheme {
        classify(&self.0)
    }

    /// The `Authorization` header value.
    pub fn header_value(&self) -> Result<HeaderValue> {
        authorization_header(&self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential")
            .field(&self.scheme())
            .field(&"[redacted]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_key_uses_token_scheme() {
        let key = "8a3b1c2d-1234-4abc-9def-0123456789ab";
        assert_eq!(classify(key), AuthScheme::ApiKey);
        assert_eq!(
            authorization_header(key).unwrap().to_str().unwrap(),
            format!("Token {}", key)
        );
    }

    #[test]
    fn test_hex_key_uses_token_scheme() {
        let key = "0123456789abcdef0123456789abcdef01234567";
        assert_eq!(key.len(), 40);
        assert_eq!(classify(key), AuthScheme::ApiKey);
    }

    #[test]
    fn test_other_tokens_use_bearer() {
        for token in [
            "eyJhbGciOiJSUzI1NiJ9.payload.sig",
            "short",
            "0123456789abcdef0123456789abcdef0123456",
            "zz3b1c2d-1234-4abc-9def-0123456789ab",
            "",
        ] {
            assert_eq!(classify(token), AuthScheme::Bearer, "token {token:?}");
        }
        assert_eq!(
            authorization_header("abc.def").unwrap().to_str().unwrap(),
            "Bearer abc.def"
        );
    }

    #[test]
    fn test_header_is_sensitive() {
        assert!(authorization_header("tok").unwrap().is_sensitive());
    }

    #[test]
    fn test_credential_debug_redacts() {
        let cred = Credential::new("super-secret");
        let printed = format!("{:?}", cred);
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("Bearer"));
    }

    #[test]
    fn test_newline_in_token_is_rejected() {
        assert!(authorization_header("bad\ntoken").is_err());
    }
}
