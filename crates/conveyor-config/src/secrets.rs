//! API token resolution.
//!
//! Resolution order:
//! 1. `CONVEYOR_API_TOKEN`
//! 2. The variable named by `token_env`
//! 3. Config file `token` (plaintext)

use std::fmt;

use crate::error::{ConfigError, Result};
use crate::types::ClientSettings;

/// Environment variable holding the API token.
pub const TOKEN_ENV: &str = "CONVEYOR_API_TOKEN";

/// A token together with where it was found.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedToken {
    /// The token.
    pub value: String,
    /// Where the token was found.
    pub source: TokenSource,
}

impl fmt::Debug for ResolvedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedToken")
            .field("value", &"[REDACTED]")
            .field("source", &self.source)
            .finish()
    }
}

/// Where a token was resolved from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    /// Supplied directly, e.g. on the command line.
    Explicit,
    /// Environment variable.
    EnvVar(String),
    /// Config file (plaintext).
    ConfigFile,
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenSource::Explicit => write!(f, "command line"),
            TokenSource::EnvVar(var) => write!(f, "env var {}", var),
            TokenSource::ConfigFile => write!(f, "config file (plaintext)"),
        }
    }
}

impl ResolvedToken {
    /// A token supplied directly by the caller.
    pub fn explicit(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            source: TokenSource::Explicit,
        }
    }
}

impl ClientSettings {
    /// Resolve the API token from the process environment and config.
    pub fn resolve_token(&self) -> Result<ResolvedToken> {
        self.resolve_token_with(|name| std::env::var(name).ok())
    }

    /// Resolve the API token using a custom variable lookup.
    pub fn resolve_token_with<F>(&self, lookup: F) -> Result<ResolvedToken>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_vars = std::iter::once(TOKEN_ENV).chain(self.token_env.as_deref());
        for var in env_vars {
            if let Some(value) = lookup(var).filter(|v| !v.is_empty()) {
                return Ok(ResolvedToken {
                    value,
                    source: TokenSource::EnvVar(var.to_string()),
                });
            }
        }

        match self.token.as_deref() {
            Some(token) if !token.is_empty() => Ok(ResolvedToken {
                value: token.to_string(),
                source: TokenSource::ConfigFile,
            }),
            _ => Err(ConfigError::TokenNotFound {
                env_var: TOKEN_ENV.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> ClientSettings {
        ClientSettings {
            token: Some("file-token".to_string()),
            token_env: Some("TEAM_TOKEN".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_primary_env_wins() {
        let token = settings()
            .resolve_token_with(|name| Some(format!("{}-value", name)))
            .unwrap();
        assert_eq!(token.value, "CONVEYOR_API_TOKEN-value");
        assert_eq!(token.source, TokenSource::EnvVar(TOKEN_ENV.to_string()));
    }

    #[test]
    fn test_named_env_before_file() {
        let token = settings()
            .resolve_token_with(|name| (name == "TEAM_TOKEN").then(|| "team".to_string()))
            .unwrap();
        assert_eq!(token.value, "team");
        assert_eq!(token.source, TokenSource::EnvVar("TEAM_TOKEN".to_string()));
    }

    #[test]
    fn test_file_token_fallback() {
        let token = settings().resolve_token_with(|_| None).unwrap();
        assert_eq!(token.value, "file-token");
        assert_eq!(token.source, TokenSource::ConfigFile);
    }

    #[test]
    fn test_empty_values_skipped() {
        let settings = ClientSettings {
            token: Some(String::new()),
            ..Default::default()
        };
        let err = settings
            .resolve_token_with(|_| Some(String::new()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::TokenNotFound { .. }));
    }

    #[test]
    fn test_debug_redacts_value() {
        let debug = format!("{:?}", ResolvedToken::explicit("secret"));
        assert!(!debug.contains("secret"));
        assert!(debug.contains("Explicit"));
    }
}
