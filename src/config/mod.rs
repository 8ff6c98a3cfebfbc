//! Configuration management.
//!
//! Settings come from an optional TOML file plus environment overrides
//! (`BIOMATERIAL_FINDER_GEMINI__MODEL=...`, `BIOMATERIAL_FINDER_LOGGING__LEVEL=debug`).
//!
//! ```toml
//! [gemini]
//! api_key = "your-api-key"          # optional; GEMINI_API_KEY is also read
//! model = "gemini-pro"
//! api_url = "https://generativelanguage.googleapis.com/v1beta"
//!
//! [registry]
//! timeout_secs = 30
//! default_limit = 20
//!
//! [logging]
//! level = "info"
//! format = "text"                    # or "json"
//! ```
//!
//! The registry address itself is not configurable.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "BIOMATERIAL_FINDER";

/// Config file name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "biomaterial-finder.toml";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Language model settings
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Registry scraping settings
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Gemini API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key; summaries fall back to a fixed template without one
    #[serde(default = "default_api_key")]
    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: default_api_key(),
            model: default_model(),
            api_url: default_api_url(),
        }
    }
}

impl GeminiConfig {
    /// Whether a non-empty API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

fn default_api_key() -> Option<String> {
    std::env::var("GEMINI_API_KEY").ok()
}

fn default_model() -> String {
    "gemini-pro".to_string()
}

fn default_api_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

/// Registry scraping settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// HTTP request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Page size when the caller gives none
    #[serde(default = "default_limit")]
    pub default_limit: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            default_limit: default_limit(),
        }
    }
}

impl RegistryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_limit() -> usize {
    crate::models::DEFAULT_LIMIT
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// "text" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

/// Load configuration from a file, with environment overrides on top
pub fn load_config(path: &Path) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    settings.try_deserialize()
}

/// Configuration from environment overrides and defaults only
pub fn get_config() -> Result<Config, config::ConfigError> {
    config::Config::builder()
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?
        .try_deserialize()
}

/// Find a config file in the working directory or the user config directory
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("biomaterial-finder").join("config.toml"))
        .filter(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.gemini.model, "gemini-pro");
        assert_eq!(
            config.gemini.api_url,
            "https://generativelanguage.googleapis.com/v1beta"
        );
        assert_eq!(config.registry.timeout(), Duration::from_secs(30));
        assert_eq!(config.registry.default_limit, 20);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let toml_content = r#"
[gemini]
api_key = "test-key"
model = "gemini-1.5-flash"

[registry]
timeout_secs = 5

[logging]
level = "debug"
format = "json"
"#;

        let mut file = File::create(&path).unwrap();
        file.write_all(toml_content.as_bytes()).unwrap();

        let config = load_config(&path).unwrap();

        assert_eq!(config.gemini.api_key, Some("test-key".to_string()));
        assert!(config.gemini.has_api_key());
        assert_eq!(config.gemini.model, "gemini-1.5-flash");
        assert_eq!(config.registry.timeout_secs, 5);
        assert_eq!(config.registry.default_limit, 20);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.is_json());
    }

    #[test]
    fn test_load_config_nonexistent() {
        let result = load_config(Path::new("/nonexistent/biomaterial-finder.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid.toml");

        std::fs::write(&path, "invalid = toml = content").unwrap();

        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_blank_api_key_is_not_a_key() {
        let gemini = GeminiConfig {
            api_key: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(!gemini.has_api_key());
    }
}
