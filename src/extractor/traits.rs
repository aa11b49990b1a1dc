use crate::utils::error::Result;
use async_trait::async_trait;

/// Source of raw metadata documents
///
/// Isolates the HTTP layer from how the metadata is obtained (a yt-dlp
/// process in production, canned documents in tests).
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Returns a unique identifier for this source (e.g., "yt-dlp")
    fn id(&self) -> &'static str;

    /// Fetches the raw JSON metadata text for `url`, verbatim
    async fn fetch_metadata(&self, url: &str) -> Result<String>;
}
