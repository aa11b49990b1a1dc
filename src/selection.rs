//! Selection policies for the download endpoints
//!
//! - download-friendly: the client names a format id and a type; the policy
//!   only decides the content type and attachment name.
//! - best: picks the best video-only and audio-only pair for a merge and
//!   refuses partial selections.

use crate::classifier::BestSelection;
use crate::downloader::FormatSpec;
use crate::extractor::models::{FormatEntry, MediaInfo};
use crate::utils::error::{Result, Y2LocalError};

/// Requested rendition type for a download-friendly request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadKind {
    Progressive,
    AudioOnly,
}

impl DownloadKind {
    /// Anything other than `audio-only` is treated as video.
    pub fn parse(value: &str) -> Self {
        if value == "audio-only" {
            DownloadKind::AudioOnly
        } else {
            DownloadKind::Progressive
        }
    }
}

/// Response metadata for a binary download
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryTarget {
    pub content_type: &'static str,
    pub filename: &'static str,
}

impl DeliveryTarget {
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.filename)
    }
}

pub const VIDEO_TARGET: DeliveryTarget = DeliveryTarget {
    content_type: "video/mp4",
    filename: "video.mp4",
};

pub const AUDIO_TARGET: DeliveryTarget = DeliveryTarget {
    content_type: "audio/m4a",
    filename: "audio.m4a",
};

pub const BEST_TARGET: DeliveryTarget = DeliveryTarget {
    content_type: "video/mp4",
    filename: "video_best.mp4",
};

/// download-friendly policy. The format id is passed through untouched;
/// yt-dlp rejects ids that don't exist.
pub fn download_friendly(kind: DownloadKind, format_id: &str) -> (FormatSpec, DeliveryTarget) {
    let target = match kind {
        DownloadKind::AudioOnly => AUDIO_TARGET,
        DownloadKind::Progressive => VIDEO_TARGET,
    };
    (FormatSpec::single(format_id), target)
}

/// A complete best selection: both streams present
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestPair<'a> {
    pub video: &'a FormatEntry,
    pub audio: &'a FormatEntry,
}

impl BestPair<'_> {
    pub fn format_spec(&self) -> FormatSpec {
        FormatSpec::merge(&self.video.format_id, &self.audio.format_id)
    }
}

/// best policy
pub fn best(info: &MediaInfo) -> Result<BestPair<'_>> {
    match info.to_best() {
        BestSelection {
            best_video: Some(video),
            best_audio: Some(audio),
        } => Ok(BestPair { video, audio }),
        _ => Err(Y2LocalError::NoSelection),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, vcodec: &str, acodec: &str) -> FormatEntry {
        FormatEntry {
            format_id: id.to_string(),
            vcodec: Some(vcodec.into()),
            acodec: Some(acodec.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_download_kind_parse() {
        assert_eq!(DownloadKind::parse("audio-only"), DownloadKind::AudioOnly);
        assert_eq!(DownloadKind::parse("progressive"), DownloadKind::Progressive);
        assert_eq!(DownloadKind::parse("whatever"), DownloadKind::Progressive);
    }

    #[test]
    fn test_download_friendly_targets() {
        let (spec, target) = download_friendly(DownloadKind::AudioOnly, "140");
        assert_eq!(spec.to_string(), "140");
        assert_eq!(target.content_type, "audio/m4a");
        assert_eq!(target.content_disposition(), "attachment; filename=\"audio.m4a\"");

        let (_, target) = download_friendly(DownloadKind::Progressive, "18");
        assert_eq!(target.content_type, "video/mp4");
        assert_eq!(target.filename, "video.mp4");
    }

    #[test]
    fn test_best_requires_both_streams() {
        let only_video = MediaInfo {
            formats: vec![entry("137", "avc1", "none")],
            ..Default::default()
        };
        assert!(matches!(best(&only_video), Err(Y2LocalError::NoSelection)));

        let only_progressive = MediaInfo {
            formats: vec![entry("22", "avc1", "mp4a")],
            ..Default::default()
        };
        assert!(matches!(best(&only_progressive), Err(Y2LocalError::NoSelection)));
    }

    #[test]
    fn test_best_pair_merge_spec() {
        let media = MediaInfo {
            formats: vec![entry("137", "avc1", "none"), entry("140", "none", "mp4a")],
            ..Default::default()
        };
        let pair = best(&media).unwrap();
        assert_eq!(pair.format_spec().to_string(), "137+140");
        assert_eq!(BEST_TARGET.filename, "video_best.mp4");
    }
}
