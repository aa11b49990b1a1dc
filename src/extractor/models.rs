//! Data structures for the metadata document produced by `yt-dlp -J`

use serde::{Deserialize, Deserializer, Serialize};

/// Codec sentinel yt-dlp uses for a missing stream
pub const NO_CODEC: &str = "none";

/// Top-level media information
///
/// Only the fields the service reshapes are modelled; everything else in the
/// document is ignored. Absent fields stay absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploader: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub formats: Vec<FormatEntry>,
}

/// One rendition in the format catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormatEntry {
    #[serde(default)]
    pub format_id: String,
    #[serde(default)]
    pub vcodec: Option<String>,
    #[serde(default)]
    pub acodec: Option<String>,
    #[serde(default)]
    pub ext: Option<String>,
    /// Player-style label ("1080p"); only some extractors emit it
    #[serde(default, rename = "qualityLabel")]
    pub quality_label: Option<String>,
    /// yt-dlp's own quality note, used when `qualityLabel` is missing
    #[serde(default)]
    pub format_note: Option<String>,
    /// Audio bitrate in kbit/s
    #[serde(default)]
    pub abr: Option<f64>,
    #[serde(default)]
    pub height: Option<u64>,
}

/// Stream composition of a format entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    /// Video and audio in one file
    Progressive,
    VideoOnly,
    AudioOnly,
    /// Neither stream (storyboards, thumbnails); ignored by selection
    Empty,
}

impl FormatEntry {
    /// A codec counts as present unless yt-dlp reports the `"none"` sentinel.
    pub fn has_video(&self) -> bool {
        self.vcodec.as_deref() != Some(NO_CODEC)
    }

    pub fn has_audio(&self) -> bool {
        self.acodec.as_deref() != Some(NO_CODEC)
    }

    pub fn kind(&self) -> StreamKind {
        match (self.has_video(), self.has_audio()) {
            (true, true) => StreamKind::Progressive,
            (true, false) => StreamKind::VideoOnly,
            (false, true) => StreamKind::AudioOnly,
            (false, false) => StreamKind::Empty,
        }
    }

    /// Quality label shown to clients
    pub fn label(&self) -> Option<&str> {
        self.quality_label
            .as_deref()
            .or(self.format_note.as_deref())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<FormatEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<FormatEntry>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(vcodec: Option<&str>, acodec: Option<&str>) -> FormatEntry {
        FormatEntry {
            format_id: "x".to_string(),
            vcodec: vcodec.map(String::from),
            acodec: acodec.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_stream_kinds() {
        assert_eq!(entry(Some("avc1"), Some("mp4a")).kind(), StreamKind::Progressive);
        assert_eq!(entry(Some("vp9"), Some("none")).kind(), StreamKind::VideoOnly);
        assert_eq!(entry(Some("none"), Some("opus")).kind(), StreamKind::AudioOnly);
        assert_eq!(entry(Some("none"), Some("none")).kind(), StreamKind::Empty);
    }

    #[test]
    fn test_missing_codec_counts_as_present() {
        assert_eq!(entry(None, Some("none")).kind(), StreamKind::VideoOnly);
        assert_eq!(entry(None, None).kind(), StreamKind::Progressive);
    }

    #[test]
    fn test_deserialize_ignores_unknown_fields() {
        let json = r#"{
            "id": "abc",
            "title": "Clip",
            "duration": 12.5,
            "formats": [
                {"format_id": "18", "vcodec": "avc1", "acodec": "mp4a", "ext": "mp4",
                 "format_note": "360p", "height": 360, "url": "https://x", "tbr": 500.1}
            ]
        }"#;
        let info: MediaInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.title.as_deref(), Some("Clip"));
        assert_eq!(info.duration, Some(12.5));
        assert_eq!(info.uploader, None);
        assert_eq!(info.formats.len(), 1);
        assert_eq!(info.formats[0].label(), Some("360p"));
        assert_eq!(info.formats[0].height, Some(360));
    }

    #[test]
    fn test_null_or_missing_formats_is_empty() {
        let missing: MediaInfo = serde_json::from_str(r#"{"title": "t"}"#).unwrap();
        assert!(missing.formats.is_empty());

        let null: MediaInfo = serde_json::from_str(r#"{"formats": null}"#).unwrap();
        assert!(null.formats.is_empty());
    }

    #[test]
    fn test_quality_label_preferred_over_format_note() {
        let json = r#"{"format_id": "22", "qualityLabel": "720p", "format_note": "hd"}"#;
        let format: FormatEntry = serde_json::from_str(json).unwrap();
        assert_eq!(format.label(), Some("720p"));
    }

    #[test]
    fn test_absent_fields_not_serialized() {
        let info = MediaInfo {
            title: Some("t".into()),
            ..Default::default()
        };
        let value = serde_json::to_value(&info).unwrap();
        assert!(value.get("duration").is_none());
        assert!(value.get("uploader").is_none());
    }
}
