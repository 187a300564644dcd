// Raw provider records as emitted by `yt-dlp --dump-json`

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::errors::ExtractError;

/// Video codec value yt-dlp uses for formats without a video track
pub const NO_VIDEO_CODEC: &str = "none";

/// One entry of the `formats` array
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawFormat {
    /// Format ID (e.g., "137", "140")
    pub format_id: Option<String>,
    /// File extension (mp4, webm, m4a)
    pub ext: Option<String>,
    /// Video codec (avc1, vp9, av01, none)
    pub vcodec: Option<String>,
    /// Audio codec (mp4a, opus, none)
    pub acodec: Option<String>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub width: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub height: Option<u32>,
    /// Resolution string (e.g., "1920x1080", "audio only")
    pub resolution: Option<String>,
    /// Format note (e.g., "1080p", "tiny")
    pub format_note: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub fps: Option<f64>,
    /// Total bitrate in kbps
    #[serde(default, deserialize_with = "lenient_f64")]
    pub tbr: Option<f64>,
    /// Audio sample rate in Hz
    #[serde(default, deserialize_with = "lenient_u32")]
    pub asr: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub filesize: Option<u64>,
    /// Approximate file size (when exact is unknown)
    #[serde(default, deserialize_with = "lenient_u64")]
    pub filesize_approx: Option<u64>,
    /// Direct media URL; manifest-only formats come without one
    pub url: Option<String>,
}

impl RawFormat {
    /// Get effective file size (exact or approximate)
    pub fn effective_size(&self) -> Option<u64> {
        self.filesize.or(self.filesize_approx)
    }

    pub fn is_audio_only(&self) -> bool {
        self.vcodec.as_deref() == Some(NO_VIDEO_CODEC)
    }

    /// Playback URL, if present and non-empty
    pub fn playable_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }
}

/// One file of a subtitle track
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSubtitleFile {
    pub ext: Option<String>,
    pub url: Option<String>,
    pub name: Option<String>,
}

/// Subtitle tracks keyed by language code
pub type RawSubtitleMap = IndexMap<String, Vec<RawSubtitleFile>>;

/// Full provider record for one video
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMediaInfo {
    pub id: Option<String>,
    pub title: Option<String>,
    pub uploader: Option<String>,
    pub channel: Option<String>,
    pub thumbnail: Option<String>,
    /// Duration in seconds; yt-dlp emits ints or floats
    #[serde(default, deserialize_with = "lenient_f64")]
    pub duration: Option<f64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub like_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub comment_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub view_count: Option<u64>,
    pub webpage_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub formats: Vec<RawFormat>,
    /// Manually authored subtitles
    #[serde(default, deserialize_with = "null_as_default")]
    pub subtitles: RawSubtitleMap,
    #[serde(default, deserialize_with = "null_as_default")]
    pub automatic_captions: RawSubtitleMap,
}

impl RawMediaInfo {
    /// Parse `--dump-json` output
    pub fn from_json(stdout: &[u8]) -> Result<Self, ExtractError> {
        serde_json::from_slice(stdout)
            .map_err(|e| ExtractError::other(format!("Invalid JSON from yt-dlp: {}", e)))
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Numeric field as f64; numeric strings are accepted, anything else is None
fn number_value(value: Option<Value>) -> Option<f64> {
    let number = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number_value(Option::<Value>::deserialize(deserializer)?))
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    if let Some(Value::Number(n)) = &value {
        if let Some(exact) = n.as_u64() {
            return Ok(Some(exact));
        }
    }

    Ok(number_value(value)
        .filter(|n| *n >= 0.0 && *n <= u64::MAX as f64)
        .map(|n| n.round() as u64))
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_u64(deserializer)?.and_then(|n| u32::try_from(n).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::errors::FailureKind;

    #[test]
    fn test_parse_dump_json() {
        let json = serde_json::json!({
            "id": "abc",
            "title": "Some video",
            "uploader": "Someone",
            "duration": 212.5,
            "view_count": 1000,
            "like_count": null,
            "extractor": "youtube",
            "formats": [
                {"format_id": "140", "ext": "m4a", "vcodec": "none", "acodec": "mp4a.40.2",
                 "asr": 44100, "tbr": 129.5, "filesize": 3_400_000, "url": "https://a"},
                {"format_id": "sb0", "ext": "mhtml", "vcodec": "none", "acodec": "none",
                 "fragments": [{"url": "x"}]}
            ],
            "subtitles": {"en": [{"ext": "srt", "url": "https://s", "name": "English"}]},
            "automatic_captions": null
        });

        let info = RawMediaInfo::from_json(json.to_string().as_bytes()).unwrap();
        assert_eq!(info.title.as_deref(), Some("Some video"));
        assert_eq!(info.duration, Some(212.5));
        assert_eq!(info.like_count, None);
        assert_eq!(info.formats.len(), 2);
        assert_eq!(info.formats[0].asr, Some(44100));
        assert!(info.formats[0].is_audio_only());
        assert_eq!(info.formats[1].playable_url(), None);
        assert_eq!(info.subtitles["en"][0].ext.as_deref(), Some("srt"));
        assert!(info.automatic_captions.is_empty());
    }

    #[test]
    fn test_missing_collections_default_empty() {
        let info = RawMediaInfo::from_json(br#"{"title": "T"}"#).unwrap();
        assert!(info.formats.is_empty());
        assert!(info.subtitles.is_empty());
        assert!(info.automatic_captions.is_empty());
    }

    #[test]
    fn test_float_and_odd_numbers_are_tolerated() {
        let json = br#"{
            "title": "T",
            "duration": "12.5",
            "view_count": 1000.0,
            "like_count": -3,
            "formats": [
                {"format_id": "18", "vcodec": "avc1", "height": 360.0, "width": "wide",
                 "filesize_approx": 3400000.5, "asr": null, "fps": 29.97, "url": "http://x/v"},
                {"format_id": "22", "vcodec": "avc1", "height": 1e12, "tbr": {"k": 1},
                 "url": "http://x/w"}
            ]
        }"#;

        let info = RawMediaInfo::from_json(json).unwrap();
        assert_eq!(info.duration, Some(12.5));
        assert_eq!(info.view_count, Some(1000));
        assert_eq!(info.like_count, None);

        let first = &info.formats[0];
        assert_eq!(first.height, Some(360));
        assert_eq!(first.width, None);
        assert_eq!(first.filesize_approx, Some(3_400_001));
        assert_eq!(first.asr, None);
        assert_eq!(first.fps, Some(29.97));

        let second = &info.formats[1];
        assert_eq!(second.height, None);
        assert_eq!(second.tbr, None);
    }

    #[test]
    fn test_float_height_groups_like_integer_height() {
        let json = br#"{"formats": [{"format_id": "18", "vcodec": "avc1", "height": 360.0,
                                     "url": "http://x/v"}]}"#;
        let info = RawMediaInfo::from_json(json).unwrap();
        let response = crate::normalizer::Normalizer::normalize(info);
        assert_eq!(response.video_streams["360"][0].height, Some(360));
    }

    #[test]
    fn test_invalid_json_is_other_failure() {
        let err = RawMediaInfo::from_json(b"not json").unwrap_err();
        assert_eq!(err.kind(), FailureKind::Other);
        assert!(err.message().starts_with("Invalid JSON"));
    }

    #[test]
    fn test_effective_size_prefers_exact() {
        let format = RawFormat {
            filesize: Some(10),
            filesize_approx: Some(12),
            ..Default::default()
        };
        assert_eq!(format.effective_size(), Some(10));

        let approx_only = RawFormat {
            filesize_approx: Some(12),
            ..Default::default()
        };
        assert_eq!(approx_only.effective_size(), Some(12));
    }

    #[test]
    fn test_empty_url_is_not_playable() {
        let format = RawFormat {
            url: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(format.playable_url(), None);
    }
}
