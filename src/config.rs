//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\mb-track-rename\config.toml
//! - macOS: ~/Library/Application Support/mb-track-rename/config.toml
//! - Linux: ~/.config/mb-track-rename/config.toml
//!
//! The file is optional. Every field has a default, so a partial file only
//! overrides what it names. Command-line flags take precedence over it.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Web service settings
    pub musicbrainz: MusicBrainzConfig,

    /// Release-group disambiguation settings
    pub release: ReleaseConfig,

    /// Output filename settings
    pub naming: NamingConfig,
}

/// MusicBrainz web service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MusicBrainzConfig {
    /// API root, without trailing slash
    pub base_url: String,

    /// Contact (email or URL) appended to the User-Agent
    pub contact: Option<String>,

    /// Overall timeout per HTTP request
    pub timeout_secs: u64,

    /// Fixed pause between dependent requests
    pub request_delay_ms: u64,
}

impl Default for MusicBrainzConfig {
    fn default() -> Self {
        Self {
            base_url: "https://musicbrainz.org/ws/2".to_string(),
            contact: None,
            timeout_secs: 20,
            request_delay_ms: 1000,
        }
    }
}

impl MusicBrainzConfig {
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}

impl Config {
    /// Reject settings that would make every request fail.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.musicbrainz.base_url.trim().is_empty() {
            return Err(crate::error::Error::config("musicbrainz.base_url must not be empty"));
        }
        if self.musicbrainz.timeout_secs == 0 {
            return Err(crate::error::Error::config("musicbrainz.timeout_secs must be at least 1"));
        }
        Ok(())
    }
}

/// Release-group disambiguation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Country code that earns a bonus when picking a release
    pub preferred_country: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            preferred_country: "US".to_string(),
        }
    }
}

/// Output filename settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Use "NN Artist - Title.ext" instead of "NN Title.ext"
    pub artist_in_filename: bool,
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("mb-track-rename"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from the default location
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };
    load_from(&path)
}

/// Load configuration from an explicit path
pub fn load_from(path: &Path) -> Config {
    if !path.exists() {
        tracing::debug!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::debug!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Save configuration to `path`
///
/// Creates the parent directory if it doesn't exist.
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path).map_err(|e| ConfigError::Rename(temp_path, path.to_path_buf(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

impl From<ConfigError> for crate::error::Error {
    fn from(e: ConfigError) -> Self {
        crate::error::Error::config(e.to_string())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.musicbrainz.timeout_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[musicbrainz]"));
        assert!(toml.contains("[release]"));
        assert!(toml.contains("[naming]"));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.musicbrainz.base_url, "https://musicbrainz.org/ws/2");
        assert_eq!(config.musicbrainz.timeout_secs, 20);
        assert_eq!(config.musicbrainz.request_delay(), Duration::from_secs(1));
        assert_eq!(config.release.preferred_country, "US");
        assert!(!config.naming.artist_in_filename);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
[naming]
artist_in_filename = true

[musicbrainz]
contact = "me@example.org"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert!(config.naming.artist_in_filename);
        assert_eq!(config.musicbrainz.contact.as_deref(), Some("me@example.org"));
        assert_eq!(config.musicbrainz.request_delay_ms, 1000);
        assert_eq!(config.release.preferred_country, "US");
    }

    #[test]
    fn test_save_then_load_from() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.release.preferred_country = "GB".to_string();
        config.musicbrainz.request_delay_ms = 1500;

        save_to(&config, &path).unwrap();
        assert!(!path.with_extension("toml.tmp").exists());

        let loaded = load_from(&path);
        assert_eq!(loaded.release.preferred_country, "GB");
        assert_eq!(loaded.musicbrainz.request_delay_ms, 1500);
    }

    #[test]
    fn test_load_from_missing_file_is_default() {
        let dir = tempdir().unwrap();
        let config = load_from(&dir.path().join("absent.toml"));
        assert_eq!(config.musicbrainz.timeout_secs, 20);
    }

    #[test]
    fn test_load_from_garbage_is_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is = = not toml").unwrap();

        let config = load_from(&path);
        assert_eq!(config.release.preferred_country, "US");
    }
}
