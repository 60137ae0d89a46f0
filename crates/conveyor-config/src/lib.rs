//! Client configuration for the conveyor API client.
//!
//! Provides TOML-based settings with:
//! - Config file layering (user config dir + project-local overrides)
//! - Environment overrides (`CONVEYOR_ZONE`, `CONVEYOR_API_VERSION`, ...)
//! - Token resolution (env var → named env var → config file)
//! - Conversion into a [`conveyor_client::ClientBuilder`]

pub mod discovery;
pub mod error;
pub mod secrets;
pub mod types;

pub use discovery::{
    LoadedSettings, SettingsSource, load_settings, load_settings_file, user_config_dir,
    user_config_path,
};
pub use error::{ConfigError, Result};
pub use secrets::{ResolvedToken, TOKEN_ENV, TokenSource};
pub use types::{ClientSettings, RetrySettings};
