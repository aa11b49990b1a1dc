//! Property tests for format classification

use proptest::prelude::*;
use y2local::classifier::{label_rank, ClassifiedOption};
use y2local::extractor::{FormatEntry, MediaInfo, StreamKind};

fn codec() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(Some("none".to_string())),
        Just(Some("avc1".to_string())),
        Just(Some("opus".to_string())),
        Just(None),
    ]
}

fn label() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        (0u32..4320).prop_map(|h| Some(format!("{}p", h))),
        "[a-z]{0,4}".prop_map(Some),
    ]
}

prop_compose! {
    fn format_entry()(
        id in "[0-9a-z]{1,4}",
        vcodec in codec(),
        acodec in codec(),
        quality_label in label(),
        abr in proptest::option::of(0.0f64..512.0),
        height in proptest::option::of(0u64..4320),
    ) -> FormatEntry {
        FormatEntry {
            format_id: id,
            vcodec,
            acodec,
            ext: Some("mp4".to_string()),
            quality_label,
            format_note: None,
            abr,
            height,
        }
    }
}

prop_compose! {
    fn media_info()(formats in proptest::collection::vec(format_entry(), 0..24)) -> MediaInfo {
        MediaInfo {
            title: Some("prop".to_string()),
            duration: Some(1.0),
            uploader: None,
            formats,
        }
    }
}

proptest! {
    #[test]
    fn options_are_pure(media in media_info()) {
        prop_assert_eq!(media.to_options(), media.to_options());
        prop_assert_eq!(media.to_best(), media.to_best());
    }

    #[test]
    fn options_only_contain_their_kind(media in media_info()) {
        let options = media.to_options();

        let progressive_count = media.formats.iter().filter(|f| f.kind() == StreamKind::Progressive).count();
        let audio_count = media.formats.iter().filter(|f| f.kind() == StreamKind::AudioOnly).count();
        prop_assert_eq!(options.progressive.len(), progressive_count);
        prop_assert_eq!(options.audio_only.len(), audio_count);

        for option in &options.progressive {
            let is_progressive = matches!(option, ClassifiedOption::Progressive { .. });
            prop_assert!(is_progressive);
        }
        for option in &options.audio_only {
            let is_audio = matches!(option, ClassifiedOption::AudioOnly { .. });
            prop_assert!(is_audio);
        }
    }

    #[test]
    fn progressive_sorted_descending(media in media_info()) {
        let ranks: Vec<i64> = media
            .to_options()
            .progressive
            .iter()
            .map(|o| match o {
                ClassifiedOption::Progressive { label, .. } => label_rank(label.as_deref()),
                ClassifiedOption::AudioOnly { .. } => unreachable!(),
            })
            .collect();
        prop_assert!(ranks.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn audio_sorted_descending(media in media_info()) {
        let rates: Vec<f64> = media
            .to_options()
            .audio_only
            .iter()
            .map(|o| match o {
                ClassifiedOption::AudioOnly { bitrate, .. } => bitrate.unwrap_or(0.0),
                ClassifiedOption::Progressive { .. } => unreachable!(),
            })
            .collect();
        prop_assert!(rates.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn best_is_single_stream_and_maximal(media in media_info()) {
        let best = media.to_best();

        if let Some(video) = best.best_video {
            prop_assert_eq!(video.kind(), StreamKind::VideoOnly);
            let max = media
                .formats
                .iter()
                .filter(|f| f.kind() == StreamKind::VideoOnly)
                .map(|f| f.height.unwrap_or(0))
                .max()
                .unwrap_or(0);
            prop_assert_eq!(video.height.unwrap_or(0), max);
        } else {
            prop_assert!(media.formats.iter().all(|f| f.kind() != StreamKind::VideoOnly));
        }

        if let Some(audio) = best.best_audio {
            prop_assert_eq!(audio.kind(), StreamKind::AudioOnly);
            for other in media.formats.iter().filter(|f| f.kind() == StreamKind::AudioOnly) {
                prop_assert!(audio.abr.unwrap_or(0.0) >= other.abr.unwrap_or(0.0));
            }
        } else {
            prop_assert!(media.formats.iter().all(|f| f.kind() != StreamKind::AudioOnly));
        }
    }
}

#[test]
fn fixed_examples() {
    let progressive = |label: &str| FormatEntry {
        format_id: label.to_string(),
        vcodec: Some("avc1".to_string()),
        acodec: Some("mp4a".to_string()),
        quality_label: Some(label.to_string()),
        ..Default::default()
    };
    let media = MediaInfo {
        formats: vec![progressive("720p"), progressive("1080p"), progressive("480p")],
        ..Default::default()
    };
    let options = media.to_options();
    let ids: Vec<&str> = options.progressive.iter().map(|o| o.format_id()).collect();
    assert_eq!(ids, vec!["1080p", "720p", "480p"]);
}
