// Configuration loader
// Loads settings from ~/.webmo/config.toml, then applies WEBMO_HOST

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::settings::Config;

/// Environment variable overriding the configured host
pub const HOST_ENV_VAR: &str = "WEBMO_HOST";

/// Default config file location, if a home directory exists
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".webmo/config.toml"))
}

/// Load configuration from the config file and environment
///
/// A missing config file is not an error; an unreadable or malformed one is.
pub fn load_config() -> Result<Config> {
    let config = match config_path() {
        Some(path) => load_config_from(&path)?,
        None => Config::default(),
    };

    Ok(apply_env_overrides(config, std::env::var(HOST_ENV_VAR).ok()))
}

/// Load configuration from a specific file, defaulting when it does not exist
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!(path = %path.display(), "No config file, using defaults");
        return Ok(Config::default());
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    debug!(path = %path.display(), ?config, "Loaded config");
    Ok(config)
}

/// Apply the host override; blank values are ignored
pub fn apply_env_overrides(mut config: Config, env_host: Option<String>) -> Config {
    if let Some(host) = env_host {
        if !host.trim().is_empty() {
            config.host = Some(host.trim().to_string());
        }
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_host_and_timeout() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "host = \"192.168.1.20\"\ntimeout_seconds = 5").unwrap();

        let config = load_config_from(file.path()).unwrap();
        assert_eq!(config.host.as_deref(), Some("192.168.1.20"));
        assert_eq!(config.timeout_seconds, Some(5));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "host = ").unwrap();

        let err = load_config_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_env_host_overrides_file() {
        let config = Config {
            host: Some("from-file".to_string()),
            timeout_seconds: Some(3),
        };
        let config = apply_env_overrides(config, Some("from-env".to_string()));
        assert_eq!(config.host.as_deref(), Some("from-env"));
        assert_eq!(config.timeout_seconds, Some(3));
    }

    #[test]
    fn test_blank_env_host_is_ignored() {
        let config = Config {
            host: Some("from-file".to_string()),
            timeout_seconds: None,
        };
        let config = apply_env_overrides(config, Some("  ".to_string()));
        assert_eq!(config.host.as_deref(), Some("from-file"));
    }
}
