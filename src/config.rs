// Configuration loading (TOML file, then env, then CLI overrides)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::extractor::{ExtractorConfig, RetryConfig};

pub const APP_NAME: &str = "video-info-server";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub extractor: ExtractorConfig,
    pub retry: RetryConfig,
}

impl Config {
    /// Fill unset provider paths from `YTDLP_PYTHON` / `YTDLP_PATH`
    pub fn apply_env(&mut self) {
        if self.extractor.python.is_none() {
            self.extractor.python = std::env::var("YTDLP_PYTHON").ok();
        }
        if self.extractor.ytdlp_path.is_none() {
            self.extractor.ytdlp_path = std::env::var("YTDLP_PATH").ok();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port cannot be 0");
        }

        if self.retry.max_retries > self.retry.max_retries_limit {
            anyhow::bail!(
                "retry.max_retries ({}) exceeds retry.max_retries_limit ({})",
                self.retry.max_retries,
                self.retry.max_retries_limit
            );
        }

        Ok(())
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    config.validate()?;
    tracing::info!("Loaded config from {:?}", path);

    Ok(config)
}

fn default_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("./config.toml"),
        PathBuf::from(format!("./{}.toml", APP_NAME)),
    ];

    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join(APP_NAME).join("config.toml"));
    }

    paths
}

/// Load config from `custom_path`, the default locations, or built-in defaults
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    for path in default_paths() {
        if path.exists() {
            return load_config(&path);
        }
    }

    tracing::debug!("No config file found, using defaults");
    Ok(Config::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::{ExtractorMode, RetryPolicy};
    use std::io::Write;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.retry.max_retries, 2);
        assert_eq!(config.retry.policy, RetryPolicy::All);
        assert_eq!(config.extractor.mode, ExtractorMode::Auto);
    }

    #[test]
    fn test_partial_file_overrides() {
        let config: Config = toml::from_str(
            r#"
            [server]
            port = 8080

            [extractor]
            mode = "cli"
            proxy = "socks5h://127.0.0.1:1080"
            process_timeout_secs = 90

            [retry]
            max_retries = 1
            policy = "transient"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.extractor.mode, ExtractorMode::Cli);
        assert_eq!(config.extractor.proxy.as_deref(), Some("socks5h://127.0.0.1:1080"));
        assert_eq!(config.extractor.process_timeout_secs, Some(90));
        assert_eq!(config.extractor.socket_timeout_secs, Some(15));
        assert_eq!(config.retry.max_retries, 1);
        assert_eq!(config.retry.max_retries_limit, 5);
        assert_eq!(config.retry.policy, RetryPolicy::Transient);
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nhost = \"127.0.0.1\"").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_missing_custom_path_is_error() {
        let err = load_config_or_default(Some(Path::new("/nonexistent/config.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[retry]\nmax_retries = 9\nmax_retries_limit = 3").unwrap();
        assert!(load_config(file.path()).is_err());

        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let result: std::result::Result<Config, _> = toml::from_str("[extractor]\nmode = \"lux\"");
        assert!(result.is_err());
    }
}
