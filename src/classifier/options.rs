//! Progressive and audio-only option lists

use serde::Serialize;

use super::{bitrate_rank, label_rank};
use crate::extractor::models::{FormatEntry, MediaInfo, StreamKind};

/// A downloadable choice offered to the client
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ClassifiedOption {
    #[serde(rename = "progressive")]
    Progressive {
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        ext: Option<String>,
        format_id: String,
    },
    #[serde(rename = "audio-only")]
    AudioOnly {
        bitrate: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        ext: Option<String>,
        format_id: String,
    },
}

impl ClassifiedOption {
    pub fn format_id(&self) -> &str {
        match self {
            ClassifiedOption::Progressive { format_id, .. }
            | ClassifiedOption::AudioOnly { format_id, .. } => format_id,
        }
    }

    fn progressive(format: &FormatEntry) -> Self {
        ClassifiedOption::Progressive {
            label: format.label().map(String::from),
            ext: format.ext.clone(),
            format_id: format.format_id.clone(),
        }
    }

    fn audio_only(format: &FormatEntry) -> Self {
        ClassifiedOption::AudioOnly {
            // A zero bitrate is as good as unknown
            bitrate: format.abr.filter(|abr| *abr != 0.0),
            ext: format.ext.clone(),
            format_id: format.format_id.clone(),
        }
    }

    fn sort_label(&self) -> Option<&str> {
        match self {
            ClassifiedOption::Progressive { label, .. } => label.as_deref(),
            ClassifiedOption::AudioOnly { .. } => None,
        }
    }

    fn sort_bitrate(&self) -> Option<f64> {
        match self {
            ClassifiedOption::AudioOnly { bitrate, .. } => *bitrate,
            ClassifiedOption::Progressive { .. } => None,
        }
    }
}

/// Both option lists, each sorted best-first
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormatOptions {
    pub progressive: Vec<ClassifiedOption>,
    #[serde(rename = "audioOnly")]
    pub audio_only: Vec<ClassifiedOption>,
}

impl MediaInfo {
    /// Progressive options by numeric label descending, audio-only options by
    /// bitrate descending. Both sorts are stable, so ties keep catalog order.
    /// Video-only and empty entries are left out.
    pub fn to_options(&self) -> FormatOptions {
        let mut options = FormatOptions::default();

        for format in &self.formats {
            match format.kind() {
                StreamKind::Progressive => options
                    .progressive
                    .push(ClassifiedOption::progressive(format)),
                StreamKind::AudioOnly => options
                    .audio_only
                    .push(ClassifiedOption::audio_only(format)),
                StreamKind::VideoOnly | StreamKind::Empty => {}
            }
        }

        options
            .progressive
            .sort_by_key(|option| std::cmp::Reverse(label_rank(option.sort_label())));
        options.audio_only.sort_by(|a, b| {
            bitrate_rank(b.sort_bitrate()).total_cmp(&bitrate_rank(a.sort_bitrate()))
        });

        options
    }
}
