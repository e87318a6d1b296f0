//! Configuration management for livepage.
//!
//! Loads configuration from ${LIVEPAGE_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Returns the default config template with comments.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for livepage configuration and data directories.
    //!
    //! LIVEPAGE_HOME resolution order:
    //! 1. LIVEPAGE_HOME environment variable (if set)
    //! 2. ~/.config/livepage (default)
    //! 3. ./.livepage when no home directory can be determined

    use std::path::PathBuf;

    /// Returns the livepage home directory.
    pub fn livepage_home() -> PathBuf {
        if let Ok(home) = std::env::var("LIVEPAGE_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".livepage"),
            |h| h.join(".config").join("livepage"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        livepage_home().join("config.toml")
    }

    /// Returns the default directory for rendered previews.
    pub fn previews_dir() -> PathBuf {
        livepage_home().join("previews")
    }

    /// Returns the directory for log files.
    pub fn logs_dir() -> PathBuf {
        livepage_home().join("logs")
    }
}

/// Live session settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Server-Sent Events endpoint streaming server messages.
    pub url: Option<String>,
    /// Sent as the `user_id` query parameter when set.
    pub user_id: Option<String>,
}

/// Rendered application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Output directory for preview pages.
    pub dir: Option<String>,
    /// Open each rendered application in the system browser.
    pub open_browser: bool,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            dir: None,
            open_browser: true,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub preview: PreviewConfig,
}

impl Config {
    const DEFAULT_LOG_FILTER: &str = "livepage=info,livepage_core=info,livepage_tui=info";

    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Resolved preview directory.
    pub fn preview_dir(&self) -> PathBuf {
        match self.preview.dir.as_deref().map(str::trim) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => paths::previews_dir(),
        }
    }

    /// Session URL, ignoring blank values.
    pub fn session_url(&self) -> Option<&str> {
        self.session
            .url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Creates a default config file at the given path.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: Self::DEFAULT_LOG_FILTER.to_string(),
            session: SessionConfig::default(),
            preview: PreviewConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert!(config.preview.open_browser);
        assert_eq!(config.session_url(), None);
        assert!(config.log_filter.contains("livepage"));
    }

    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(
            &config_path,
            "[session]\nurl = \"http://localhost:7860/events\"\n",
        )
        .unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.session_url(), Some("http://localhost:7860/events"));
        assert!(config.preview.open_browser);
        assert_eq!(config.session.user_id, None);
    }

    #[test]
    fn test_load_invalid_toml_errors() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "[session\n").unwrap();

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }

    #[test]
    fn test_blank_url_is_none() {
        let config = Config {
            session: SessionConfig {
                url: Some("   ".to_string()),
                user_id: None,
            },
            ..Default::default()
        };
        assert_eq!(config.session_url(), None);
    }

    #[test]
    fn test_preview_dir_override() {
        let config = Config {
            preview: PreviewConfig {
                dir: Some("/tmp/pages".to_string()),
                open_browser: false,
            },
            ..Default::default()
        };
        assert_eq!(config.preview_dir(), PathBuf::from("/tmp/pages"));
    }

    #[test]
    fn test_init_creates_config_with_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("subdir").join("config.toml");

        Config::init(&config_path).unwrap();

        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("open_browser = true"));
        assert!(contents.contains("# url ="));

        let loaded = Config::load_from(&config_path).unwrap();
        assert!(loaded.preview.open_browser);
    }

    #[test]
    fn test_init_fails_if_exists() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "").unwrap();

        assert!(Config::init(&config_path).is_err());
    }
}
