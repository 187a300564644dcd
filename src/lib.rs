//! Video metadata service.
//!
//! Fetches media information through yt-dlp ([`extractor`]), reshapes it into a
//! [`CanonicalResponse`] ([`normalizer`]) and serves it over HTTP ([`server`]).

pub mod config;
pub mod extractor;
pub mod normalizer;
pub mod response;
pub mod server;
pub mod service;

pub use config::Config;
pub use extractor::{ExtractError, InfoProvider, RawMediaInfo, RetryConfig, RetryPolicy};
pub use normalizer::Normalizer;
pub use response::CanonicalResponse;
pub use service::{ApiError, ExtractRequest, ExtractService};
