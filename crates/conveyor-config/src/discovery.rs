//! Settings file discovery and layered merging.
//!
//! Resolution order (later overrides earlier):
//! 1. `$CONVEYOR_CONFIG_DIR/config.toml`, or `conveyor/config.toml` in the
//!    platform config directory
//! 2. `./conveyor.toml` (project-local)
//! 3. Environment (`CONVEYOR_ZONE`, `CONVEYOR_API_VERSION`)
//! 4. CLI arguments (handled externally)

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::types::ClientSettings;

/// Project-local config filename.
const PROJECT_CONFIG_FILE: &str = "conveyor.toml";

/// Config filename within the user config directory.
const USER_CONFIG_FILE: &str = "config.toml";

/// Application name for platform directory resolution.
const APP_NAME: &str = "conveyor";

/// Environment variable overriding the user config directory.
const CONFIG_DIR_ENV: &str = "CONVEYOR_CONFIG_DIR";

/// A config file that was checked during discovery.
#[derive(Debug, Clone)]
pub struct SettingsSource {
    /// Path to the config file.
    pub path: PathBuf,
    /// Whether the file was found and loaded.
    pub loaded: bool,
}

/// Result of discovery and loading.
#[derive(Debug, Clone)]
pub struct LoadedSettings {
    /// The merged settings.
    pub settings: ClientSettings,
    /// Files that were checked, lowest precedence first.
    pub sources: Vec<SettingsSource>,
    /// Problems worth reporting that did not stop loading.
    pub warnings: Vec<String>,
}

impl LoadedSettings {
    /// Paths of files that were actually loaded.
    pub fn loaded_from(&self) -> Vec<&Path> {
        self.sources
            .iter()
            .filter(|s| s.loaded)
            .map(|s| s.path.as_path())
            .collect()
    }
}

/// Discover, load and merge every settings layer, then apply the environment.
///
/// `config_dir` overrides both `CONVEYOR_CONFIG_DIR` and the platform
/// default. `project_dir` defaults to the current directory.
pub fn load_settings(
    project_dir: Option<&Path>,
    config_dir: Option<&Path>,
) -> Result<LoadedSettings> {
    let mut loaded = load_files(project_dir, config_dir)?;
    loaded.settings.apply_env()?;
    Ok(loaded)
}

/// Load and merge the file layers only.
pub(crate) fn load_files(
    project_dir: Option<&Path>,
    config_dir: Option<&Path>,
) -> Result<LoadedSettings> {
    let mut settings = ClientSettings::default();
    let mut sources = Vec::new();
    let mut warnings = Vec::new();

    let user_path = match config_dir {
        Some(dir) => Some(dir.join(USER_CONFIG_FILE)),
        None => user_config_path(),
    };
    if let Some(path) = user_path {
        sources.push(load_layer(&mut settings, &path, &mut warnings));
    }

    let project_path = project_dir
        .map(|d| d.join(PROJECT_CONFIG_FILE))
        .unwrap_or_else(|| PathBuf::from(PROJECT_CONFIG_FILE));
    sources.push(load_layer(&mut settings, &project_path, &mut warnings));

    Ok(LoadedSettings {
        settings,
        sources,
        warnings,
    })
}

/// Load settings from one file (no discovery).
pub fn load_settings_file(path: &Path) -> Result<ClientSettings> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.display().to_string(),
        source: e,
    })?;
    ClientSettings::from_toml(&contents)
}

/// Path of the user config file.
pub fn user_config_path() -> Option<PathBuf> {
    user_config_dir().map(|d| d.join(USER_CONFIG_FILE))
}

/// The user config directory.
///
/// Checks `CONVEYOR_CONFIG_DIR` first, then the platform default.
pub fn user_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV)
        && !dir.is_empty()
    {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

/// Load one file into `settings` if it exists.
///
/// An unreadable or malformed file is reported as a warning and skipped.
fn load_layer(
    settings: &mut ClientSettings,
    path: &Path,
    warnings: &mut Vec<String>,
) -> SettingsSource {
    if !path.is_file() {
        return SettingsSource {
            path: path.to_path_buf(),
            loaded: false,
        };
    }

    match load_settings_file(path) {
        Ok(layer) => {
            if layer.has_plaintext_token() {
                warnings.push(format!(
                    "{} contains a plaintext API token. \
                     Consider token_env or the CONVEYOR_API_TOKEN environment variable instead.",
                    path.display()
                ));
            }
            settings.merge(layer);
            SettingsSource {
                path: path.to_path_buf(),
                loaded: true,
            }
        }
        Err(e) => {
            warnings.push(format!("Failed to load {}: {}", path.display(), e));
            SettingsSource {
                path: path.to_path_buf(),
                loaded: false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_user_config_path_shape() {
        if let Some(p) = user_config_path() {
            assert!(p.ends_with("config.toml"));
        }
    }

    #[test]
    fn test_load_file_not_found() {
        let err = load_settings_file(Path::new("/nonexistent/conveyor.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }

    #[test]
    fn test_load_file_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("conveyor.toml");
        fs::write(&path, "zone = [unterminated").unwrap();
        let err = load_settings_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_no_files() {
        let project = TempDir::new().unwrap();
        let user = TempDir::new().unwrap();
        let loaded = load_files(Some(project.path()), Some(user.path())).unwrap();
        assert_eq!(loaded.settings, ClientSettings::default());
        assert!(loaded.loaded_from().is_empty());
        assert!(loaded.warnings.is_empty());
    }

    #[test]
    fn test_project_overrides_user() {
        let project = TempDir::new().unwrap();
        let user = TempDir::new().unwrap();
        fs::write(
            user.path().join("config.toml"),
            r#"
zone = "eu1.example.com"
token_env = "USER_TOKEN"

[retry]
retry_on_429 = true
"#,
        )
        .unwrap();
        fs::write(
            project.path().join("conveyor.toml"),
            r#"
zone = "us1.example.com"

[retry]
max_retries = 1
"#,
        )
        .unwrap();

        let loaded = load_files(Some(project.path()), Some(user.path())).unwrap();
        let settings = &loaded.settings;
        assert_eq!(settings.zone.as_deref(), Some("us1.example.com"));
        assert_eq!(settings.token_env.as_deref(), Some("USER_TOKEN"));
        assert_eq!(settings.retry.retry_on_429, Some(true));
        assert_eq!(settings.retry.max_retries, Some(1));
        assert_eq!(loaded.loaded_from().len(), 2);
    }

    #[test]
    fn test_plaintext_token_warns() {
        let project = TempDir::new().unwrap();
        let user = TempDir::new().unwrap();
        fs::write(
            project.path().join("conveyor.toml"),
            "zone = \"eu1.example.com\"\ntoken = \"abc\"\n",
        )
        .unwrap();

        let loaded = load_files(Some(project.path()), Some(user.path())).unwrap();
        assert_eq!(loaded.warnings.len(), 1);
        assert!(loaded.warnings[0].contains("plaintext API token"));
        assert_eq!(loaded.settings.token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_malformed_layer_skipped_with_warning() {
        let project = TempDir::new().unwrap();
        let user = TempDir::new().unwrap();
        fs::write(user.path().join("config.toml"), "zone = \"eu1.example.com\"\n").unwrap();
        fs::write(project.path().join("conveyor.toml"), "not toml {{").unwrap();

        let loaded = load_files(Some(project.path()), Some(user.path())).unwrap();
        assert_eq!(loaded.settings.zone.as_deref(), Some("eu1.example.com"));
        assert_eq!(loaded.loaded_from().len(), 1);
        assert!(loaded.warnings[0].starts_with("Failed to load"));
    }
}
