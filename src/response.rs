// Canonical response schema returned to callers

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One playable stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamDescriptor {
    pub format_id: Option<String>,
    pub ext: Option<String>,
    /// Exact size when known, approximate otherwise
    pub filesize: Option<u64>,
    /// Total bitrate in kbps
    pub bitrate: Option<f64>,
    /// Audio sample rate in Hz
    pub sample_rate: Option<u32>,
    pub fps: Option<f64>,
    pub height: Option<u32>,
    pub url: String,
}

/// Subtitle URLs (srt only) keyed by language code
pub type SubtitleUrls = IndexMap<String, Vec<String>>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubtitleIndex {
    pub manual: SubtitleUrls,
    pub auto: SubtitleUrls,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AvailableLanguages {
    /// Every language with srt subtitles, manual first, no duplicates
    pub subtitles: Vec<String>,
}

/// Normalized description of one video
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalResponse {
    pub title: Option<String>,
    pub thumbnail: Option<String>,
    pub channel: Option<String>,
    pub duration: Option<f64>,
    pub like_count: Option<u64>,
    pub comment_count: Option<u64>,
    pub view_count: Option<u64>,
    /// Audio-only streams in provider order
    pub audio_streams: Vec<StreamDescriptor>,
    /// Video streams grouped by resolution label
    pub video_streams: IndexMap<String, Vec<StreamDescriptor>>,
    pub subtitles: SubtitleIndex,
    pub available_languages: AvailableLanguages,
}
