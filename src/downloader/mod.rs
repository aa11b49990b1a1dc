//! Download adapter: yt-dlp invocation and output streaming

pub mod command;
pub mod stream;

pub use command::{download_args, FormatSpec};
pub use stream::{DownloadStream, MediaDownloader, YtDlpDownloader};
