pub mod models;
pub mod traits;
pub mod ytdlp;

pub use models::{FormatEntry, MediaInfo, StreamKind};
pub use traits::MetadataSource;
pub use ytdlp::YtDlpExtractor;
