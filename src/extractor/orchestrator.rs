// Provider orchestration - mode selection and per-URL routing
//
// Strategy in auto mode:
// 1. For YouTube: Python provider preferred (better anti-bot bypass)
// 2. For other sites: CLI provider preferred (faster)
// 3. Whichever is installed when the preferred one is not

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

use super::cli::CliInfoProvider;
use super::errors::ExtractError;
use super::models::RawMediaInfo;
use super::python::PythonInfoProvider;
use super::traits::{ExtractorConfig, ExtractorMode, InfoProvider};

/// Availability snapshot taken at startup
#[derive(Debug, Clone, Serialize)]
pub struct ProviderStatus {
    pub provider: &'static str,
    pub mode: ExtractorMode,
    pub available: bool,
    /// None when the Python provider was not probed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub python_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cli_available: Option<bool>,
}

impl ProviderStatus {
    /// Status for a provider built outside `build_provider`
    pub fn for_provider(provider: &dyn InfoProvider, mode: ExtractorMode) -> Self {
        Self {
            provider: provider.name(),
            mode,
            available: provider.is_available(),
            python_available: None,
            cli_available: None,
        }
    }
}

fn is_youtube(url: &str) -> bool {
    let lower = url.to_lowercase();
    lower.contains("youtube.com") || lower.contains("youtu.be")
}

/// Routes each URL to the Python or CLI provider.
///
/// Availability is probed once on construction.
pub struct AutoProvider {
    python: Box<dyn InfoProvider>,
    cli: Box<dyn InfoProvider>,
    python_available: bool,
    cli_available: bool,
}

impl AutoProvider {
    pub fn new(python: Box<dyn InfoProvider>, cli: Box<dyn InfoProvider>) -> Self {
        let python_available = python.is_available();
        let cli_available = cli.is_available();
        Self {
            python,
            cli,
            python_available,
            cli_available,
        }
    }

    /// Determine the provider to use for a URL
    fn route(&self, url: &str) -> Option<&dyn InfoProvider> {
        let (primary, primary_ok, fallback, fallback_ok) = if is_youtube(url) {
            (&self.python, self.python_available, &self.cli, self.cli_available)
        } else {
            (&self.cli, self.cli_available, &self.python, self.python_available)
        };

        if primary_ok {
            Some(primary.as_ref())
        } else if fallback_ok {
            Some(fallback.as_ref())
        } else {
            None
        }
    }
}

#[async_trait]
impl InfoProvider for AutoProvider {
    fn name(&self) -> &'static str {
        "auto"
    }

    fn is_available(&self) -> bool {
        self.python_available || self.cli_available
    }

    async fn extract(&self, url: &str) -> Result<RawMediaInfo, ExtractError> {
        match self.route(url) {
            Some(provider) => {
                tracing::debug!("[Orchestrator] Using {} for {}", provider.name(), url);
                provider.extract(url).await
            }
            None => Err(ExtractError::other(
                "Neither Python yt_dlp nor yt-dlp binary available",
            )),
        }
    }
}

/// Build the provider for the configured mode and report what was found
pub fn build_provider(config: &ExtractorConfig) -> (Arc<dyn InfoProvider>, ProviderStatus) {
    let python = PythonInfoProvider::new(config.clone());
    let cli = CliInfoProvider::new(config.clone());

    let (provider, python_available, cli_available): (
        Arc<dyn InfoProvider>,
        Option<bool>,
        Option<bool>,
    ) = match config.mode {
        ExtractorMode::Python => {
            let available = python.is_available();
            (Arc::new(python), Some(available), None)
        }
        ExtractorMode::Cli => {
            let available = cli.is_available();
            (Arc::new(cli), None, Some(available))
        }
        ExtractorMode::Auto => {
            let auto = AutoProvider::new(Box::new(python), Box::new(cli));
            let probed = (Some(auto.python_available), Some(auto.cli_available));
            (Arc::new(auto), probed.0, probed.1)
        }
    };

    let available = python_available.unwrap_or(false) || cli_available.unwrap_or(false);
    if available {
        tracing::info!(
            "Provider {} ready (python: {:?}, cli: {:?})",
            provider.name(),
            python_available,
            cli_available
        );
    } else {
        tracing::warn!(
            "No yt-dlp installation found (mode: {}); extraction requests will fail",
            config.mode
        );
    }

    let status = ProviderStatus {
        provider: provider.name(),
        mode: config.mode,
        available,
        python_available,
        cli_available,
    };

    (provider, status)
}
