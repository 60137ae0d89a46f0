//! Settings types.

use std::collections::BTreeMap;
use std::time::Duration;

use conveyor_client::{ClientBuilder, ConveyorClient, Protocol, RetryPolicy};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::secrets::ResolvedToken;

/// Environment variable overriding the zone.
pub const ZONE_ENV: &str = "CONVEYOR_ZONE";

/// Environment variable overriding the API version.
pub const API_VERSION_ENV: &str = "CONVEYOR_API_VERSION";

/// Connection settings for the API client.
///
/// Every field is optional so that layers can be merged; unset fields fall
/// back to the client's defaults when the builder is produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Regional host, e.g. `eu1.example.com`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    /// API version number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<u32>,
    /// `https` (default) or `http`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Plaintext token. Prefer `token_env`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Name of an environment variable holding the token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_env: Option<String>,
    /// Headers sent with every request.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    /// Retry behavior.
    #[serde(skip_serializing_if = "RetrySettings::is_empty")]
    pub retry: RetrySettings,
}

/// `[retry]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_delay_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_delay_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backoff_multiplier: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_on_429: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_on_server_error: Option<bool>,
}

impl RetrySettings {
    /// True when no retry field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge another section on top of this one (other takes priority).
    pub fn merge(&mut self, other: RetrySettings) {
        self.max_retries = other.max_retries.or(self.max_retries);
        self.base_delay_ms = other.base_delay_ms.or(self.base_delay_ms);
        self.max_delay_ms = other.max_delay_ms.or(self.max_delay_ms);
        self.backoff_multiplier = other.backoff_multiplier.or(self.backoff_multiplier);
        self.retry_on_429 = other.retry_on_429.or(self.retry_on_429);
        self.retry_on_server_error = other.retry_on_server_error.or(self.retry_on_server_error);
    }

    /// The retry policy these settings describe, starting from the client default.
    pub fn policy(&self) -> RetryPolicy {
        let mut policy = RetryPolicy::default();
        if let Some(n) = self.max_retries {
            policy = policy.with_max_retries(n);
        }
        if let Some(ms) = self.base_delay_ms {
            policy = policy.with_base_delay(Duration::from_millis(ms));
        }
        if let Some(ms) = self.max_delay_ms {
            policy = policy.with_max_delay(Duration::from_millis(ms));
        }
        if let Some(m) = self.backoff_multiplier {
            policy = policy.with_backoff_multiplier(m);
        }
        if let Some(enabled) = self.retry_on_429 {
            policy = policy.with_retry_on_429(enabled);
        }
        if let Some(enabled) = self.retry_on_server_error {
            policy = policy.with_retry_on_server_error(enabled);
        }
        policy
    }
}

impl ClientSettings {
    /// Parse settings from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Merge another layer on top of this one (other takes priority).
    pub fn merge(&mut self, other: ClientSettings) {
        if other.zone.is_some() {
            self.zone = other.zone;
        }
        if other.api_version.is_some() {
            self.api_version = other.api_version;
        }
        if other.protocol.is_some() {
            self.protocol = other.protocol;
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
        if other.token.is_some() {
            self.token = other.token;
        }
        if other.token_env.is_some() {
            self.token_env = other.token_env;
        }
        self.headers.extend(other.headers);
        self.retry.merge(other.retry);
    }

    /// Apply `CONVEYOR_ZONE` and `CONVEYOR_API_VERSION` from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_with(|name| std::env::var(name).ok())
    }

    /// Apply environment overrides using a custom variable lookup.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(zone) = lookup(ZONE_ENV).filter(|z| !z.is_empty()) {
            self.zone = Some(zone);
        }
        if let Some(version) = lookup(API_VERSION_ENV).filter(|v| !v.is_empty()) {
            let parsed = version
                .trim()
                .trim_start_matches('v')
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidValue {
                    field: API_VERSION_ENV.to_string(),
                    message: format!("'{}' is not a version number", version),
                })?;
            self.api_version = Some(parsed);
        }
        Ok(())
    }

    /// True when the token is stored in the file itself.
    pub fn has_plaintext_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// The configured protocol, defaulting to HTTPS.
    pub fn protocol(&self) -> Result<Protocol> {
        match self.protocol.as_deref() {
            None => Ok(Protocol::default()),
            Some(p) => p.parse().map_err(|_| ConfigError::InvalidValue {
                field: "protocol".to_string(),
                message: format!("'{}' is not http or https", p),
            }),
        }
    }

    /// A client builder carrying every configured setting and the given token.
    pub fn client_builder(&self, token: &ResolvedToken) -> Result<ClientBuilder> {
        let zone = self
            .zone
            .as_deref()
            .filter(|z| !z.trim().is_empty())
            .ok_or(ConfigError::MissingZone)?;

        let mut builder = ConveyorClient::builder()
            .zone(zone)
            .token(token.value.as_str())
            .protocol(self.protocol()?)
            .retry_policy(self.retry.policy());
        if let Some(version) = self.api_version {
            builder = builder.api_version(version);
        }
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        Ok(builder)
    }

    /// Resolve the token and build a client.
    pub fn build_client(&self) -> Result<ConveyorClient> {
        let token = self.resolve_token()?;
        self.client_builder(&token)?
            .build()
            .map_err(|e| ConfigError::InvalidValue {
                field: "client".to_string(),
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::TokenSource;

    fn token() -> ResolvedToken {
        ResolvedToken {
            value: "a1b2c3d4-e5f6-7890-abcd-ef1234567890".to_string(),
            source: TokenSource::ConfigFile,
        }
    }

    #[test]
    fn test_parse_full_settings() {
        let settings = ClientSettings::from_toml(
            r#"
zone = "eu1.example.com"
api_version = 2
protocol = "https"
timeout_secs = 10
token_env = "MY_TOKEN"

[headers]
x-team = "5"

[retry]
max_retries = 5
retry_on_429 = true
"#,
        )
        .unwrap();

        assert_eq!(settings.zone.as_deref(), Some("eu1.example.com"));
        assert_eq!(settings.api_version, Some(2));
        assert_eq!(settings.timeout_secs, Some(10));
        assert_eq!(settings.token_env.as_deref(), Some("MY_TOKEN"));
        assert_eq!(settings.headers["x-team"], "5");
        assert_eq!(settings.retry.max_retries, Some(5));
        assert_eq!(settings.retry.retry_on_429, Some(true));
        assert!(!settings.has_plaintext_token());
    }

    #[test]
    fn test_empty_settings() {
        let settings = ClientSettings::from_toml("").unwrap();
        assert_eq!(settings, ClientSettings::default());
    }

    #[test]
    fn test_merge_later_wins() {
        let mut base = ClientSettings::from_toml(
            r#"
zone = "eu1.example.com"
token = "base-token"

[headers]
x-a = "1"
x-b = "1"

[retry]
max_retries = 2
retry_on_429 = true
"#,
        )
        .unwrap();
        let overlay = ClientSettings::from_toml(
            r#"
zone = "us1.example.com"

[headers]
x-b = "2"

[retry]
max_retries = 4
"#,
        )
        .unwrap();

        base.merge(overlay);
        assert_eq!(base.zone.as_deref(), Some("us1.example.com"));
        assert_eq!(base.token.as_deref(), Some("base-token"));
        assert_eq!(base.headers["x-a"], "1");
        assert_eq!(base.headers["x-b"], "2");
        assert_eq!(base.retry.max_retries, Some(4));
        assert_eq!(base.retry.retry_on_429, Some(true));
    }

    #[test]
    fn test_env_overrides() {
        let mut settings = ClientSettings {
            zone: Some("eu1.example.com".to_string()),
            ..Default::default()
        };
        settings
            .apply_env_with(|name| match name {
                ZONE_ENV => Some("eu2.example.com".to_string()),
                API_VERSION_ENV => Some("v3".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(settings.zone.as_deref(), Some("eu2.example.com"));
        assert_eq!(settings.api_version, Some(3));
    }

    #[test]
    fn test_env_invalid_version() {
        let mut settings = ClientSettings::default();
        let err = settings
            .apply_env_with(|name| (name == API_VERSION_ENV).then(|| "two".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_retry_policy_from_settings() {
        let retry = RetrySettings {
            max_retries: Some(1),
            base_delay_ms: Some(50),
            retry_on_server_error: Some(true),
            ..Default::default()
        };
        let policy = retry.policy();
        assert_eq!(policy.max_retries, 1);
        assert_eq!(policy.base_delay, Duration::from_millis(50));
        assert!(policy.retry_on_server_error);
        assert!(!policy.retry_on_429);
    }

    #[test]
    fn test_protocol_default_and_invalid() {
        let mut settings = ClientSettings::default();
        assert_eq!(settings.protocol().unwrap(), Protocol::Https);
        settings.protocol = Some("http".to_string());
        assert_eq!(settings.protocol().unwrap(), Protocol::Http);
        settings.protocol = Some("gopher".to_string());
        assert!(settings.protocol().is_err());
    }

    #[test]
    fn test_client_builder_requires_zone() {
        let err = ClientSettings::default().client_builder(&token()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingZone));
    }

    #[test]
    fn test_client_builder_applies_settings() {
        let settings = ClientSettings {
            zone: Some("eu1.example.com".to_string()),
            api_version: Some(3),
            protocol: Some("http".to_string()),
            ..Default::default()
        };
        let client = settings.client_builder(&token()).unwrap().build().unwrap();
        assert_eq!(client.endpoint().base_url(), "http://eu1.example.com/api/v3");
    }

    #[test]
    fn test_to_toml_omits_unset() {
        let settings = ClientSettings {
            zone: Some("eu1.example.com".to_string()),
            ..Default::default()
        };
        let out = settings.to_toml().unwrap();
        assert!(out.contains("zone = \"eu1.example.com\""));
        assert!(!out.contains("retry"));
        assert!(!out.contains("headers"));
    }
}
