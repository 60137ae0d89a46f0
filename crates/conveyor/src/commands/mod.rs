//! CLI command handlers.

pub mod call;
pub mod config;
pub mod tools;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use conveyor_client::ConveyorClient;
use conveyor_config::{LoadedSettings, ResolvedToken};

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Output as JSON for scripting.
    pub json_output: bool,
    /// Verbose output enabled.
    pub verbose: bool,
    /// Zone from the command line.
    pub zone: Option<String>,
    /// Token from the command line.
    pub token: Option<String>,
    /// Config directory from the command line.
    pub config_dir: Option<PathBuf>,
}

impl Context {
    /// Load settings with command-line overrides applied on top.
    pub fn settings(&self) -> Result<LoadedSettings> {
        let mut loaded = conveyor_config::load_settings(None, self.config_dir.as_deref())
            .context("failed to load configuration")?;
        for warning in &loaded.warnings {
            tracing::warn!("{}", warning);
        }
        if let Some(zone) = &self.zone {
            loaded.settings.zone = Some(zone.clone());
        }
        Ok(loaded)
    }

    /// The token to authenticate with.
    pub fn token(&self, loaded: &LoadedSettings) -> Result<ResolvedToken> {
        match &self.token {
            Some(token) => Ok(ResolvedToken::explicit(token.as_str())),
            None => Ok(loaded.settings.resolve_token()?),
        }
    }

    /// Build an API client from settings and overrides.
    pub fn client(&self) -> Result<ConveyorClient> {
        let loaded = self.settings()?;
        let token = self.token(&loaded)?;
        tracing::debug!(source = %token.source, "Resolved API token");
        let client = loaded
            .settings
            .client_builder(&token)?
            .build()
            .context("failed to create API client")?;
        Ok(client)
    }
}
