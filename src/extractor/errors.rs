// Error types for info providers

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

/// Failure classes a provider can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureKind {
    /// Provider could not fetch something it needed (page, API, manifest)
    Download,
    /// Site-specific extractor rejected or failed on the URL
    Extraction,
    /// Anything the provider did not classify (spawn failure, timeout, bad JSON)
    Other,
}

impl FailureKind {
    /// Label exposed in error payloads
    pub fn label(&self) -> &'static str {
        match self {
            Self::Download => "DownloadError",
            Self::Extraction => "ExtractorError",
            Self::Other => "Unexpected Error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    /// yt-dlp reported a download error
    #[error("{0}")]
    Download(String),

    /// yt-dlp reported an extractor error (`ERROR: [site] ...`)
    #[error("{0}")]
    Extraction(String),

    /// Unclassified failure
    #[error("{0}")]
    Other(String),
}

lazy_static! {
    // ERROR: [youtube] dQw4w9WgXcQ: Video unavailable
    static ref TAGGED_ERROR_RE: Regex = Regex::new(r"^ERROR:\s*\[[^\]]+\]").unwrap();
}

impl ExtractError {
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Download(_) => FailureKind::Download,
            Self::Extraction(_) => FailureKind::Extraction,
            Self::Other(_) => FailureKind::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        self.kind().label()
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Download(msg) | Self::Extraction(msg) | Self::Other(msg) => msg,
        }
    }

    /// Classify the stderr of a failed yt-dlp run.
    ///
    /// The last `ERROR:` line wins. A site tag in brackets marks an extractor
    /// error, a bare `ERROR:` line a download error. Output without any
    /// `ERROR:` line is left unclassified.
    pub fn from_stderr(stderr: &str) -> Self {
        let error_line = stderr
            .lines()
            .map(str::trim)
            .filter(|line| line.starts_with("ERROR:"))
            .last();

        // yt-dlp raises extractor failures as DownloadError too; the site tag
        // is what separates them here
        match error_line {
            Some(line) if TAGGED_ERROR_RE.is_match(line) => Self::Extraction(line.to_string()),
            Some(line) => Self::Download(line.to_string()),
            None => {
                let tail = stderr
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .last()
                    .unwrap_or("yt-dlp exited without an error message");
                Self::Other(tail.to_string())
            }
        }
    }
}
