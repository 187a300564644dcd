// Python provider - uses `python3 -m yt_dlp`
//
// Advantages:
// - Better at bypassing YouTube bot detection
// - Works well with cookies/auth
//
// Disadvantages:
// - Requires Python 3 and yt-dlp module
// - Slightly slower than native binary

use async_trait::async_trait;

use super::errors::ExtractError;
use super::models::RawMediaInfo;
use super::traits::{ExtractorConfig, InfoProvider};
use super::utils::{command_succeeds, media_info_from_output, run_output_with_timeout};

/// Provider backed by the yt_dlp Python module
pub struct PythonInfoProvider {
    python_cmd: String,
    config: ExtractorConfig,
}

impl PythonInfoProvider {
    pub fn new(config: ExtractorConfig) -> Self {
        let python_cmd = config.python.clone().unwrap_or_else(Self::find_python);
        Self { python_cmd, config }
    }

    /// Find Python interpreter
    fn find_python() -> String {
        // A venv interpreter avoids Homebrew PEP 668 limitations
        if let Ok(custom) = std::env::var("YTDLP_PYTHON") {
            return custom;
        }

        let candidates = ["python3", "/opt/homebrew/bin/python3", "/usr/local/bin/python3"];

        for cmd in candidates {
            if command_succeeds(cmd, &["--version"]) {
                return cmd.to_string();
            }
        }

        "python3".to_string()
    }

    fn build_args(&self, url: &str) -> Vec<String> {
        let mut args = vec!["-m".to_string(), "yt_dlp".to_string()];
        args.extend(self.config.ytdlp_args(url));
        args
    }
}

#[async_trait]
impl InfoProvider for PythonInfoProvider {
    fn name(&self) -> &'static str {
        "python-yt-dlp"
    }

    fn is_available(&self) -> bool {
        command_succeeds(&self.python_cmd, &["-c", "import yt_dlp"])
    }

    async fn extract(&self, url: &str) -> Result<RawMediaInfo, ExtractError> {
        let args = self.build_args(url);
        tracing::debug!("[PythonProvider] Running: {} {}", self.python_cmd, args.join(" "));

        let output =
            run_output_with_timeout(&self.python_cmd, &args, self.config.process_timeout_secs)
                .await?;

        media_info_from_output(&output)
    }
}
