//! y2local library
//!
//! HTTP front-end for yt-dlp: metadata lookups, format classification and
//! streamed downloads.

pub mod classifier;
pub mod downloader;
pub mod extractor;
pub mod selection;
pub mod server;
pub mod utils;

// Re-export main types for easier use
pub use classifier::{classify, BestSelection, ClassifiedOption, FormatOptions};
pub use downloader::{FormatSpec, MediaDownloader, YtDlpDownloader};
pub use extractor::{FormatEntry, MediaInfo, MetadataSource, YtDlpExtractor};
pub use server::{router, AppState};
pub use utils::{ServerSettings, Y2LocalError};
