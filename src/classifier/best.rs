//! Best video-only / audio-only pair

use super::bitrate_rank;
use crate::extractor::models::{FormatEntry, MediaInfo, StreamKind};

/// Highest video-only entry by height and highest audio-only entry by bitrate
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BestSelection<'a> {
    pub best_video: Option<&'a FormatEntry>,
    pub best_audio: Option<&'a FormatEntry>,
}

impl BestSelection<'_> {
    pub fn is_complete(&self) -> bool {
        self.best_video.is_some() && self.best_audio.is_some()
    }
}

impl MediaInfo {
    /// Progressive entries never qualify: merging needs separate streams.
    /// Missing heights and bitrates count as 0; on ties the earliest entry in
    /// the catalog wins.
    pub fn to_best(&self) -> BestSelection<'_> {
        let best_video = first_max_by(
            self.formats_of(StreamKind::VideoOnly),
            |a, b| a.height.unwrap_or(0).cmp(&b.height.unwrap_or(0)),
        );
        let best_audio = first_max_by(self.formats_of(StreamKind::AudioOnly), |a, b| {
            bitrate_rank(a.abr).total_cmp(&bitrate_rank(b.abr))
        });

        BestSelection {
            best_video,
            best_audio,
        }
    }

    fn formats_of(&self, kind: StreamKind) -> impl Iterator<Item = &FormatEntry> {
        self.formats.iter().filter(move |f| f.kind() == kind)
    }
}

/// `Iterator::max_by` returns the last of equal maxima; we want the first.
fn first_max_by<'a, I, F>(iter: I, mut compare: F) -> Option<&'a FormatEntry>
where
    I: Iterator<Item = &'a FormatEntry>,
    F: FnMut(&FormatEntry, &FormatEntry) -> std::cmp::Ordering,
{
    iter.fold(None, |best, candidate| match best {
        Some(current) if compare(candidate, current).is_le() => Some(current),
        _ => Some(candidate),
    })
}
