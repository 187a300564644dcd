// Retrier - bounded retries around a single provider call

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::diagnostics::{diagnose_error, FailureCause};
use super::errors::ExtractError;
use super::models::RawMediaInfo;
use super::traits::InfoProvider;

/// Which failures are worth another attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetryPolicy {
    /// Retry every failure kind
    #[default]
    All,
    /// Retry only failures diagnosed as transient (timeouts, rate limits, 5xx)
    Transient,
}

impl RetryPolicy {
    pub fn should_retry(&self, error: &ExtractError) -> bool {
        match self {
            Self::All => true,
            Self::Transient => diagnose_error(error.message()).map_or(false, |c| c.is_transient()),
        }
    }
}

/// `[retry]` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Upper bound for per-request overrides
    pub max_retries_limit: u32,
    pub policy: RetryPolicy,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            max_retries_limit: 5,
            policy: RetryPolicy::All,
        }
    }
}

impl RetryConfig {
    /// Retries for one request, honoring a caller override up to the limit
    pub fn effective_retries(&self, requested: Option<u32>) -> u32 {
        requested
            .map(|n| n.min(self.max_retries_limit))
            .unwrap_or(self.max_retries)
    }
}

pub struct Retrier {
    provider: Arc<dyn InfoProvider>,
    policy: RetryPolicy,
}

impl Retrier {
    pub fn new(provider: Arc<dyn InfoProvider>, policy: RetryPolicy) -> Self {
        Self { provider, policy }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Run the provider up to `max_retries + 1` times, back to back.
    ///
    /// Returns the first success, or the last error once attempts run out or
    /// the policy declines to retry it.
    pub async fn fetch(&self, url: &str, max_retries: u32) -> Result<RawMediaInfo, ExtractError> {
        let mut retries = 0;

        loop {
            match self.provider.extract(url).await {
                Ok(info) => {
                    if retries > 0 {
                        tracing::info!(
                            "[Retrier] ✓ {} succeeded after {} retries",
                            self.provider.name(),
                            retries
                        );
                    }
                    return Ok(info);
                }
                Err(e) => {
                    let cause = diagnose_error(e.message()).unwrap_or(FailureCause::Unknown);

                    if retries >= max_retries || !self.policy.should_retry(&e) {
                        tracing::warn!(
                            "[Retrier] ✗ {} failed after {} attempts ({}, {}): {}",
                            self.provider.name(),
                            retries + 1,
                            e.label(),
                            cause.description(),
                            e
                        );
                        return Err(e);
                    }

                    retries += 1;
                    tracing::warn!(
                        "[Retrier] Attempt {}/{} failed ({}, {}), retrying: {}",
                        retries,
                        max_retries + 1,
                        e.label(),
                        cause.description(),
                        e
                    );
                }
            }
        }
    }
}
