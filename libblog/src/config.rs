//! Configuration management for Blogcast

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Default address of the JSON server
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
}

/// Which backend the post collection lives in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// In-process state only, lost on exit
    #[default]
    Local,
    /// REST-like JSON server at `remote.base_url`
    Remote,
}

impl std::str::FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Backend::Local),
            "remote" => Ok(Backend::Remote),
            _ => Err(format!(
                "Invalid backend: '{}'. Valid options: local, remote",
                s
            )),
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::Local => write!(f, "local"),
            Backend::Remote => write!(f, "remote"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: Backend,
    /// Start a local collection from the sample post instead of empty
    #[serde(default = "default_seed")]
    pub seed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout; unset means wait indefinitely
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_seed() -> bool {
    true
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Local,
            seed: default_seed(),
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl Config {
    /// Load configuration from the default location
    ///
    /// A missing file yields the defaults; `BLOG_BASE_URL` overrides the
    /// remote address either way.
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        let mut config = if config_path.exists() {
            Self::load_from_path(&config_path)?
        } else {
            tracing::debug!("No config file at {}, using defaults", config_path.display());
            Self::default()
        };

        if let Ok(base_url) = std::env::var("BLOG_BASE_URL") {
            config.remote.base_url = base_url;
        }

        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        Ok(config)
    }
}

/// Resolve the configuration file path following XDG Base Directory spec
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("BLOG_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("blogcast").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.store.backend, Backend::Local);
        assert!(config.store.seed);
        assert_eq!(config.remote.base_url, DEFAULT_BASE_URL);
        assert!(config.remote.timeout_secs.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let config: Config = toml::from_str(
            r#"
[store]
backend = "remote"
seed = false

[remote]
base_url = "http://example.test:4000"
timeout_secs = 5
"#,
        )
        .unwrap();

        assert_eq!(config.store.backend, Backend::Remote);
        assert!(!config.store.seed);
        assert_eq!(config.remote.base_url, "http://example.test:4000");
        assert_eq!(config.remote.timeout_secs, Some(5));
    }

    #[test]
    fn test_parse_partial_config_fills_defaults() {
        let config: Config = toml::from_str("[store]\nbackend = \"remote\"\n").unwrap();

        assert_eq!(config.store.backend, Backend::Remote);
        assert!(config.store.seed);
        assert_eq!(config.remote.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_invalid_backend_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[store]\nbackend = \"cloud\"\n").unwrap();

        let err = Config::load_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("local".parse::<Backend>().unwrap(), Backend::Local);
        assert_eq!("REMOTE".parse::<Backend>().unwrap(), Backend::Remote);
        assert!("cloud".parse::<Backend>().is_err());
        assert_eq!(Backend::Remote.to_string(), "remote");
    }

    #[test]
    #[serial]
    fn test_load_from_env_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[remote]\nbase_url = \"http://from-file:1\"\n").unwrap();

        std::env::set_var("BLOG_CONFIG", &path);
        std::env::remove_var("BLOG_BASE_URL");
        let config = Config::load().unwrap();
        std::env::remove_var("BLOG_CONFIG");

        assert_eq!(config.remote.base_url, "http://from-file:1");
    }

    #[test]
    #[serial]
    fn test_missing_file_uses_defaults_and_env_override() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.toml");

        std::env::set_var("BLOG_CONFIG", &path);
        std::env::set_var("BLOG_BASE_URL", "http://override:9");
        let config = Config::load().unwrap();
        std::env::remove_var("BLOG_CONFIG");
        std::env::remove_var("BLOG_BASE_URL");

        assert_eq!(config.store.backend, Backend::Local);
        assert_eq!(config.remote.base_url, "http://override:9");
    }
}
