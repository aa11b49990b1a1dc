//! Format classification
//!
//! Turns the raw `yt-dlp -J` document into a [`MediaInfo`] and derives the
//! client-facing views from it: the progressive / audio-only option lists
//! ([`MediaInfo::to_options`]) and the best single-stream pair
//! ([`MediaInfo::to_best`]). Everything here is pure and does no I/O.

pub mod best;
pub mod options;

pub use best::BestSelection;
pub use options::{ClassifiedOption, FormatOptions};

use crate::extractor::models::MediaInfo;
use crate::utils::error::Result;

/// Parse a raw metadata document
pub fn classify(raw_json: &str) -> Result<MediaInfo> {
    Ok(serde_json::from_str(raw_json)?)
}

/// Leading-integer parse of a quality label ("1080p60" -> 1080).
///
/// Mirrors the loose numeric coercion clients already rely on: leading
/// whitespace and an optional sign are accepted, parsing stops at the first
/// non-digit, and a label with no leading digits (or no label at all)
/// counts as 0.
pub fn label_rank(label: Option<&str>) -> i64 {
    let Some(label) = label else {
        return 0;
    };

    let trimmed = label.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value.saturating_mul(10).saturating_add(i64::from(byte - b'0'));
    }

    if negative {
        -value
    } else {
        value
    }
}

/// Bitrate sort key; absent counts as 0
pub(crate) fn bitrate_rank(abr: Option<f64>) -> f64 {
    match abr {
        Some(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_invalid_json() {
        let err = classify("{\"title\": ").unwrap_err();
        assert_eq!(err.kind(), crate::utils::ErrorKind::Parse);
    }

    #[test]
    fn test_classify_extracts_top_level_fields() {
        let info = classify(r#"{"title": "T", "duration": 61, "uploader": "U"}"#).unwrap();
        assert_eq!(info.title.as_deref(), Some("T"));
        assert_eq!(info.duration, Some(61.0));
        assert_eq!(info.uploader.as_deref(), Some("U"));
        assert!(info.formats.is_empty());
    }

    #[test]
    fn test_label_rank() {
        assert_eq!(label_rank(Some("1080p")), 1080);
        assert_eq!(label_rank(Some("720p60")), 720);
        assert_eq!(label_rank(Some("  480p")), 480);
        assert_eq!(label_rank(Some("-5x")), -5);
        assert_eq!(label_rank(Some("hd")), 0);
        assert_eq!(label_rank(Some("")), 0);
        assert_eq!(label_rank(None), 0);
        assert_eq!(label_rank(Some("99999999999999999999999p")), i64::MAX);
    }

    #[test]
    fn test_bitrate_rank() {
        assert_eq!(bitrate_rank(Some(128.5)), 128.5);
        assert_eq!(bitrate_rank(None), 0.0);
        assert_eq!(bitrate_rank(Some(f64::NAN)), 0.0);
    }
}
