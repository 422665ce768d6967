//! Application configuration for aireadme.
//!
//! User config lives at `~/.aireadme/aireadme.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AiReadmeError, Result};
use crate::types::{DEFAULT_CHANGELOG_TITLE, DEFAULT_HEADLINE};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "aireadme.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".aireadme";

// ---------------------------------------------------------------------------
// Config structs (matching aireadme.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Scope discovery settings.
    #[serde(default)]
    pub discovery: DiscoveryConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Headline for files created without an explicit one.
    #[serde(default = "default_headline")]
    pub headline: String,

    /// Title of the changelog section.
    #[serde(default = "default_changelog_title")]
    pub changelog_title: String,

    /// When no scope matches any changed path, fall back to the single
    /// highest-priority scope instead of returning nothing.
    #[serde(default = "default_true")]
    pub fallback_to_root_scope: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            headline: default_headline(),
            changelog_title: default_changelog_title(),
            fallback_to_root_scope: true,
        }
    }
}

fn default_headline() -> String {
    DEFAULT_HEADLINE.into()
}
fn default_changelog_title() -> String {
    DEFAULT_CHANGELOG_TITLE.into()
}
fn default_true() -> bool {
    true
}

/// `[discovery]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Extra directory names to skip while walking, in addition to the
    /// built-in version-control/dependency/build-output set.
    #[serde(default)]
    pub ignore_dirs: Vec<String>,

    /// Whether the walker follows symbolic links.
    #[serde(default = "default_true")]
    pub follow_links: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            ignore_dirs: Vec::new(),
            follow_links: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.aireadme/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| AiReadmeError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.aireadme/aireadme.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| AiReadmeError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| AiReadmeError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| AiReadmeError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| AiReadmeError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| AiReadmeError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("headline"));
        assert!(toml_str.contains("fallback_to_root_scope"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.defaults.headline, DEFAULT_HEADLINE);
        assert_eq!(parsed.defaults.changelog_title, "Changelog");
        assert!(parsed.defaults.fallback_to_root_scope);
        assert!(parsed.discovery.follow_links);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[defaults]
headline = "Team Conventions"
fallback_to_root_scope = false

[discovery]
ignore_dirs = ["vendor", "coverage"]
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.defaults.headline, "Team Conventions");
        assert!(!config.defaults.fallback_to_root_scope);
        assert_eq!(config.defaults.changelog_title, "Changelog");
        assert_eq!(config.discovery.ignore_dirs, vec!["vendor", "coverage"]);
        assert!(config.discovery.follow_links);
    }

    #[test]
    fn missing_file_surfaces_io_error() {
        let result = load_config_from(Path::new("/nonexistent/aireadme.toml"));
        assert!(matches!(result, Err(AiReadmeError::Io { .. })));
    }
}
