// Extractor module - yt-dlp backed info providers and the retry layer
//
// Provides two providers:
// - Python mode: Uses `python3 -m yt_dlp` (better for YouTube, avoids bot detection)
// - CLI mode: Uses native `yt-dlp` binary (faster, no Python dependency)
//
// The orchestrator picks between them, and the Retrier wraps whichever one
// is in use with bounded retries.

pub mod cli;
pub mod diagnostics;
pub mod errors;
pub mod models;
pub mod orchestrator;
pub mod python;
pub mod retrier;
pub mod traits;
pub mod utils;

pub use cli::CliInfoProvider;
pub use diagnostics::{diagnose_error, FailureCause};
pub use errors::{ExtractError, FailureKind};
pub use models::{RawFormat, RawMediaInfo, RawSubtitleFile, RawSubtitleMap};
pub use orchestrator::{build_provider, AutoProvider, ProviderStatus};
pub use python::PythonInfoProvider;
pub use retrier::{Retrier, RetryConfig, RetryPolicy};
pub use traits::{ExtractorConfig, ExtractorMode, InfoProvider};
