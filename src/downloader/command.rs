//! yt-dlp invocation for streamed downloads

use std::ffi::OsString;
use std::fmt;
use std::path::Path;

/// Container used when yt-dlp has to merge separate streams
pub const MERGE_CONTAINER: &str = "mp4";

/// What to pass to `yt-dlp -f`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatSpec {
    /// One format id, downloaded as-is
    Single(String),
    /// Video-only and audio-only ids muxed into one container
    Merge { video: String, audio: String },
}

impl FormatSpec {
    pub fn single(format_id: impl Into<String>) -> Self {
        FormatSpec::Single(format_id.into())
    }

    pub fn merge(video: impl Into<String>, audio: impl Into<String>) -> Self {
        FormatSpec::Merge {
            video: video.into(),
            audio: audio.into(),
        }
    }

    pub fn is_merge(&self) -> bool {
        matches!(self, FormatSpec::Merge { .. })
    }
}

impl fmt::Display for FormatSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatSpec::Single(id) => f.write_str(id),
            FormatSpec::Merge { video, audio } => write!(f, "{}+{}", video, audio),
        }
    }
}

/// Build the argument list: selected format, ffmpeg for muxing (when one was
/// resolved), mp4 as the merge container and stdout (`-o -`) as the destination.
pub fn download_args(
    url: &str,
    spec: &FormatSpec,
    ffmpeg_location: Option<&Path>,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "-f".into(),
        spec.to_string().into(),
        "--no-warnings".into(),
        "--no-check-certificates".into(),
    ];
    if let Some(location) = ffmpeg_location {
        args.push("--ffmpeg-location".into());
        args.push(location.as_os_str().to_owned());
    }
    args.extend([
        "--merge-output-format".into(),
        MERGE_CONTAINER.into(),
        "-o".into(),
        "-".into(),
        "--".into(),
        url.into(),
    ]);
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_spec_display() {
        assert_eq!(FormatSpec::single("18").to_string(), "18");
        assert_eq!(FormatSpec::merge("137", "140").to_string(), "137+140");
        assert!(FormatSpec::merge("137", "140").is_merge());
        assert!(!FormatSpec::single("18").is_merge());
    }

    #[test]
    fn test_download_args_merge() {
        let args = download_args(
            "https://youtu.be/abc",
            &FormatSpec::merge("137", "140"),
            Some(Path::new("/usr/bin/ffmpeg")),
        );
        let args: Vec<String> = args
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        assert_eq!(
            args,
            vec![
                "-f",
                "137+140",
                "--no-warnings",
                "--no-check-certificates",
                "--ffmpeg-location",
                "/usr/bin/ffmpeg",
                "--merge-output-format",
                "mp4",
                "-o",
                "-",
                "--",
                "https://youtu.be/abc",
            ]
        );
    }

    #[test]
    fn test_url_is_last_after_separator() {
        // A "url" that looks like a flag must not be read as one
        let args = download_args("--exec=rm", &FormatSpec::single("18"), None);
        let n = args.len();
        assert_eq!(args[n - 2], OsString::from("--"));
        assert_eq!(args[n - 1], OsString::from("--exec=rm"));
    }

    #[test]
    fn test_unresolved_ffmpeg_location_is_omitted() {
        let args = download_args("https://youtu.be/abc", &FormatSpec::merge("137", "140"), None);
        assert!(!args.contains(&OsString::from("--ffmpeg-location")));
        assert!(args.contains(&OsString::from("--merge-output-format")));
    }
}
