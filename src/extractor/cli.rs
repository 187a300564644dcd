// CLI provider - uses native `yt-dlp` binary
//
// Advantages:
// - Faster than Python mode
// - No Python dependency
//
// Disadvantages:
// - More likely to trigger YouTube bot detection

use async_trait::async_trait;
use std::process::Command as StdCommand;

use super::errors::ExtractError;
use super::models::RawMediaInfo;
use super::traits::{ExtractorConfig, InfoProvider};
use super::utils::{command_succeeds, media_info_from_output, run_output_with_timeout};

/// Provider backed by the yt-dlp binary
pub struct CliInfoProvider {
    ytdlp_path: String,
    config: ExtractorConfig,
}

impl CliInfoProvider {
    pub fn new(config: ExtractorConfig) -> Self {
        let ytdlp_path = config
            .ytdlp_path
            .clone()
            .unwrap_or_else(Self::find_ytdlp);
        Self { ytdlp_path, config }
    }

    /// Find yt-dlp binary
    fn find_ytdlp() -> String {
        let common_paths = [
            "/opt/homebrew/bin/yt-dlp", // Homebrew on Apple Silicon
            "/usr/local/bin/yt-dlp",    // Homebrew on Intel Mac, pip --user on Linux
            "/usr/bin/yt-dlp",          // System installation
        ];

        for path in common_paths {
            if std::path::Path::new(path).exists() {
                return path.to_string();
            }
        }

        if let Ok(output) = StdCommand::new("which").arg("yt-dlp").output() {
            if output.status.success() {
                if let Ok(path) = String::from_utf8(output.stdout) {
                    let trimmed = path.trim();
                    if !trimmed.is_empty() {
                        return trimmed.to_string();
                    }
                }
            }
        }

        "yt-dlp".to_string()
    }
}

#[async_trait]
impl InfoProvider for CliInfoProvider {
    fn name(&self) -> &'static str {
        "cli-yt-dlp"
    }

    fn is_available(&self) -> bool {
        command_succeeds(&self.ytdlp_path, &["--version"])
    }

    async fn extract(&self, url: &str) -> Result<RawMediaInfo, ExtractError> {
        let args = self.config.ytdlp_args(url);
        tracing::debug!("[CliProvider] Running: {} {}", self.ytdlp_path, args.join(" "));

        let output =
            run_output_with_timeout(&self.ytdlp_path, &args, self.config.process_timeout_secs)
                .await?;

        media_info_from_output(&output)
    }
}
