// Normalizer - turns a raw provider record into the canonical response
//
// Handles:
// - Dropping formats without a playable URL
// - Audio/video split on the "none" video codec
// - Grouping video streams by resolution label
// - srt-only subtitle index with first-seen language order

use indexmap::IndexMap;

use crate::extractor::models::{RawFormat, RawMediaInfo, RawSubtitleMap};
use crate::response::{
    AvailableLanguages, CanonicalResponse, StreamDescriptor, SubtitleIndex, SubtitleUrls,
};

/// The only subtitle format surfaced in responses
pub const SUBTITLE_EXT: &str = "srt";

/// Grouping key for video formats without height or format note
pub const UNKNOWN_RESOLUTION: &str = "unknown";

pub struct Normalizer;

impl Normalizer {
    /// Build the canonical response. Never fails; absent data yields empty
    /// containers and null scalars.
    pub fn normalize(info: RawMediaInfo) -> CanonicalResponse {
        let RawMediaInfo {
            title,
            uploader,
            channel,
            thumbnail,
            duration,
            like_count,
            comment_count,
            view_count,
            formats,
            subtitles,
            automatic_captions,
            ..
        } = info;

        let mut audio_streams = Vec::new();
        let mut video_streams: IndexMap<String, Vec<StreamDescriptor>> = IndexMap::new();

        for format in &formats {
            let Some(stream) = Self::stream_descriptor(format) else {
                continue;
            };

            if format.is_audio_only() {
                audio_streams.push(stream);
            } else {
                video_streams
                    .entry(Self::resolution_label(format))
                    .or_default()
                    .push(stream);
            }
        }

        let mut languages = Vec::new();
        let manual = Self::srt_index(&subtitles, &mut languages);
        let auto = Self::srt_index(&automatic_captions, &mut languages);

        CanonicalResponse {
            title,
            thumbnail,
            channel: channel.or(uploader),
            duration,
            like_count,
            comment_count,
            view_count,
            audio_streams,
            video_streams,
            subtitles: SubtitleIndex { manual, auto },
            available_languages: AvailableLanguages {
                subtitles: languages,
            },
        }
    }

    /// Descriptor for a format, or None when it has no playable URL
    pub fn stream_descriptor(format: &RawFormat) -> Option<StreamDescriptor> {
        let url = format.playable_url()?;

        Some(StreamDescriptor {
            format_id: format.format_id.clone(),
            ext: format.ext.clone(),
            filesize: format.effective_size(),
            bitrate: format.tbr,
            sample_rate: format.asr,
            fps: format.fps,
            height: format.height,
            url: url.to_string(),
        })
    }

    /// Height, else the format note, else "unknown"
    pub fn resolution_label(format: &RawFormat) -> String {
        if let Some(height) = format.height {
            return height.to_string();
        }

        format
            .format_note
            .as_deref()
            .filter(|note| !note.trim().is_empty())
            .unwrap_or(UNKNOWN_RESOLUTION)
            .to_string()
    }

    /// srt URLs per language; records newly seen languages in `languages`
    fn srt_index(tracks: &RawSubtitleMap, languages: &mut Vec<String>) -> SubtitleUrls {
        let mut index = SubtitleUrls::new();

        for (lang, files) in tracks {
            let urls: Vec<String> = files
                .iter()
                .filter(|file| file.ext.as_deref() == Some(SUBTITLE_EXT))
                .filter_map(|file| file.url.as_deref().filter(|u| !u.is_empty()))
                .map(str::to_string)
                .collect();

            if urls.is_empty() {
                continue;
            }

            if !languages.contains(lang) {
                languages.push(lang.clone());
            }
            index.insert(lang.clone(), urls);
        }

        index
    }
}
