// Failure diagnostics - identifies why a provider call failed
//
// Analyzes provider error text to determine:
// - Which cause it points at (timeout, rate limit, removed video, ...)
// - Whether an immediate retry has a chance of succeeding

use serde::{Deserialize, Serialize};

/// Causes behind a failed extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureCause {
    /// Socket or process timeout
    NetworkTimeout,

    /// Rate limiting (429 or similar)
    RateLimited,

    /// Upstream 5xx, dropped connection, DNS hiccup
    ServerError,

    /// Page or API fetched partially or not at all; often succeeds on rerun
    TransientExtraction,

    /// HTTP 403 Forbidden - general access denied
    Forbidden,

    /// Bot detection triggered
    BotDetection,

    /// Age-restricted content requiring login
    AgeRestricted,

    /// Private video requiring authorization
    PrivateVideo,

    /// Video deleted or unavailable
    VideoUnavailable,

    /// Geographic restriction
    GeoBlocked,

    /// DRM, paid or premium-only content
    DrmProtected,

    /// Member-only content (requires channel membership)
    MembersOnly,

    /// No extractor for this URL
    UnsupportedUrl,

    /// Generic/unknown failure
    Unknown,
}

impl FailureCause {
    /// Whether retrying the same request right away may succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::NetworkTimeout | Self::RateLimited | Self::ServerError | Self::TransientExtraction
        )
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::NetworkTimeout => "Network timeout",
            Self::RateLimited => "Rate limited by the site",
            Self::ServerError => "Upstream server error",
            Self::TransientExtraction => "Incomplete response from the site",
            Self::Forbidden => "Access denied (HTTP 403)",
            Self::BotDetection => "Bot detection triggered",
            Self::AgeRestricted => "Age-restricted content",
            Self::PrivateVideo => "Private video",
            Self::VideoUnavailable => "Video unavailable",
            Self::GeoBlocked => "Geographic restriction",
            Self::DrmProtected => "DRM-protected content",
            Self::MembersOnly => "Members-only content",
            Self::UnsupportedUrl => "Unsupported URL",
            Self::Unknown => "Unknown failure",
        }
    }
}

/// Analyze error text and return the most specific cause.
///
/// Permanent causes are checked before transient ones.
pub fn diagnose_error(error: &str) -> Option<FailureCause> {
    if error.trim().is_empty() {
        return None;
    }

    let lower = error.to_lowercase();
    let has = |patterns: &[&str]| patterns.iter().any(|p| lower.contains(p));

    let cause = if has(&[
        "drm",
        "widevine",
        "playready",
        "fairplay",
        "youtube premium",
        "requires purchase",
        "requires payment",
        "rental",
    ]) {
        FailureCause::DrmProtected
    } else if has(&["members only", "members-only", "join this channel", "available to members"]) {
        FailureCause::MembersOnly
    } else if has(&["age-restricted", "confirm your age", "age_verification"]) {
        FailureCause::AgeRestricted
    } else if has(&["private video", "video is private"]) {
        FailureCause::PrivateVideo
    } else if has(&[
        "video unavailable",
        "video is unavailable",
        "has been removed",
        "no longer available",
        "http error 404",
        "http error 410",
    ]) {
        FailureCause::VideoUnavailable
    } else if has(&["available in your country", "blocked in your country", "geo restrict"]) {
        FailureCause::GeoBlocked
    } else if has(&["unsupported url", "is not a valid url"]) {
        FailureCause::UnsupportedUrl
    } else if has(&["429", "rate limit", "too many requests"]) {
        FailureCause::RateLimited
    } else if has(&[
        "http error 500",
        "http error 502",
        "http error 503",
        "http error 504",
        "connection reset",
        "temporary failure in name resolution",
        "remote end closed connection",
    ]) {
        FailureCause::ServerError
    } else if has(&["captcha", "unusual traffic", "not a bot", "confirm you're not a bot"]) {
        FailureCause::BotDetection
    } else if has(&["403", "forbidden"]) {
        FailureCause::Forbidden
    } else if has(&["timeout", "timed out", "connection refused", "network unreachable"]) {
        FailureCause::NetworkTimeout
    } else if has(&[
        "unable to download webpage",
        "unable to download api page",
        "unable to download json",
        "incomplete data",
        "incompleteread",
        "unable to extract",
    ]) {
        FailureCause::TransientExtraction
    } else {
        FailureCause::Unknown
    };

    Some(cause)
}
