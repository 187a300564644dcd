// InfoProvider trait and provider configuration

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::ExtractError;
use super::models::RawMediaInfo;

/// Which yt-dlp entry point to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractorMode {
    /// Python module yt_dlp (better for YouTube, avoids bot detection)
    Python,
    /// CLI binary yt-dlp (faster, no Python dependency)
    Cli,
    /// Pick per URL, falling back to whichever is installed
    #[default]
    Auto,
}

impl fmt::Display for ExtractorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Python => write!(f, "python"),
            Self::Cli => write!(f, "cli"),
            Self::Auto => write!(f, "auto"),
        }
    }
}

impl std::str::FromStr for ExtractorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "python" => Ok(Self::Python),
            "cli" => Ok(Self::Cli),
            "auto" => Ok(Self::Auto),
            other => Err(format!("unknown extractor mode '{}' (python, cli, auto)", other)),
        }
    }
}

/// Configuration shared by the yt-dlp providers (`[extractor]` table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    pub mode: ExtractorMode,
    /// Python interpreter for the module provider
    pub python: Option<String>,
    /// Path to the yt-dlp binary
    pub ytdlp_path: Option<String>,
    /// SOCKS5/HTTP proxy URL
    pub proxy: Option<String>,
    /// Path to cookies.txt file
    pub cookies_path: Option<String>,
    /// Use cookies from browser (Chrome)
    pub cookies_from_browser: bool,
    /// yt-dlp `--socket-timeout`
    pub socket_timeout_secs: Option<u32>,
    /// Kill the yt-dlp process after this long; unset waits for exit
    pub process_timeout_secs: Option<u64>,
    /// YouTube player client (android, web, tv)
    pub player_client: Option<String>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            mode: ExtractorMode::Auto,
            python: None,
            ytdlp_path: None,
            proxy: None,
            cookies_path: None,
            cookies_from_browser: false,
            socket_timeout_secs: Some(15),
            process_timeout_secs: None,
            player_client: None,
        }
    }
}

impl ExtractorConfig {
    /// yt-dlp arguments common to both providers, URL last
    pub fn ytdlp_args(&self, url: &str) -> Vec<String> {
        let mut args = vec![
            "--dump-json".to_string(),
            "--skip-download".to_string(),
            "--no-playlist".to_string(),
            "--no-warnings".to_string(),
        ];

        if let Some(timeout) = self.socket_timeout_secs {
            args.push("--socket-timeout".to_string());
            args.push(timeout.to_string());
        }

        if let Some(client) = &self.player_client {
            args.push("--extractor-args".to_string());
            args.push(format!("youtube:player_client={}", client));
        }

        // Cookies
        if let Some(path) = &self.cookies_path {
            args.push("--cookies".to_string());
            args.push(path.clone());
        } else if self.cookies_from_browser {
            args.push("--cookies-from-browser".to_string());
            args.push("chrome".to_string());
        }

        // Proxy
        if let Some(proxy) = &self.proxy {
            args.push("--proxy".to_string());
            args.push(proxy.clone());
        }

        // URLs starting with '-' must not be parsed as options
        args.push("--".to_string());
        args.push(url.to_string());
        args
    }
}

/// The extraction provider: URL in, raw media info out, nothing downloaded
#[async_trait]
pub trait InfoProvider: Send + Sync {
    /// Name of the provider (for logging)
    fn name(&self) -> &'static str;

    /// Check if this provider can run on this machine
    fn is_available(&self) -> bool;

    /// Extract metadata for `url` without downloading content
    async fn extract(&self, url: &str) -> Result<RawMediaInfo, ExtractError>;
}
