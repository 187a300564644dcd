//! Request handling shared by every transport.
//!
//! [`ExtractService::handle_extract_request`] validates the URL, runs the
//! [`Retrier`] and the [`Normalizer`], and maps failures to an
//! [`ApiError`] carrying the status code and JSON payload to send back.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::extractor::{ExtractError, InfoProvider, Retrier, RetryConfig};
use crate::normalizer::Normalizer;
use crate::response::CanonicalResponse;

pub const NO_URL_MESSAGE: &str = "No URL provided";

/// `url` from the query string or JSON body, plus an optional retry override
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExtractRequest {
    pub url: Option<String>,
    pub max_retries: Option<u32>,
}

impl ExtractRequest {
    pub fn for_url<S: Into<String>>(url: S) -> Self {
        Self {
            url: Some(url.into()),
            max_retries: None,
        }
    }
}

/// Error body sent to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("No URL provided")]
    MissingUrl,

    #[error("{}: {}", .0.label(), .0)]
    Extraction(#[from] ExtractError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingUrl => StatusCode::BAD_REQUEST,
            Self::Extraction(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn payload(&self) -> ErrorPayload {
        match self {
            Self::MissingUrl => ErrorPayload {
                error: NO_URL_MESSAGE.to_string(),
                details: None,
            },
            Self::Extraction(e) => ErrorPayload {
                error: e.label().to_string(),
                details: Some(e.message().to_string()),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status(), Json(self.payload())).into_response()
    }
}

/// Stateless per request; share it behind an `Arc`
pub struct ExtractService {
    retrier: Retrier,
    retry: RetryConfig,
}

impl ExtractService {
    pub fn new(provider: Arc<dyn InfoProvider>, retry: RetryConfig) -> Self {
        Self {
            retrier: Retrier::new(provider, retry.policy),
            retry,
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.retrier.provider_name()
    }

    pub async fn handle_extract_request(
        &self,
        request: ExtractRequest,
    ) -> Result<CanonicalResponse, ApiError> {
        let url = request
            .url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or(ApiError::MissingUrl)?;

        let max_retries = self.retry.effective_retries(request.max_retries);
        tracing::info!(
            "Extracting {} via {} (max retries: {})",
            url,
            self.provider_name(),
            max_retries
        );

        let info = self.retrier.fetch(url, max_retries).await?;
        Ok(Normalizer::normalize(info))
    }
}
