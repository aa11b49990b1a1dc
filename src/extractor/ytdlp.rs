//! yt-dlp wrapper for metadata extraction
//!
//! Runs `yt-dlp -J` for a URL and returns its stdout verbatim. The output is
//! accumulated into a bounded buffer before anything parses it; stderr is
//! forwarded to the injected log sink while the process runs.

use crate::extractor::traits::MetadataSource;
use crate::utils::error::{Result, Y2LocalError};
use crate::utils::log_sink::{self, LogSink};
use async_trait::async_trait;
use futures::StreamExt;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use tokio::process::{ChildStdout, Command as AsyncCommand};
use tokio_util::io::ReaderStream;
use tracing::{debug, error, info};

pub const TOOL_NAME: &str = "yt-dlp";

/// Arguments for a single-document metadata dump
pub fn metadata_args(url: &str) -> Vec<&str> {
    vec!["-J", "--no-warnings", "--no-check-certificates", "--", url]
}

/// Metadata extractor backed by a yt-dlp process per call
pub struct YtDlpExtractor {
    ytdlp_path: PathBuf,
    max_output_bytes: usize,
    log: Arc<dyn LogSink>,
}

impl YtDlpExtractor {
    pub fn new(ytdlp_path: impl Into<PathBuf>, max_output_bytes: usize, log: Arc<dyn LogSink>) -> Self {
        Self {
            ytdlp_path: ytdlp_path.into(),
            max_output_bytes,
            log,
        }
    }
}

#[async_trait]
impl MetadataSource for YtDlpExtractor {
    fn id(&self) -> &'static str {
        TOOL_NAME
    }

    async fn fetch_metadata(&self, url: &str) -> Result<String> {
        debug!("Fetching metadata for URL: {}", url);

        let mut child = AsyncCommand::new(&self.ytdlp_path)
            .args(metadata_args(url))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                error!("Could not start {:?}: {}", self.ytdlp_path, e);
                Y2LocalError::ToolLaunch(e)
            })?;

        let stderr_task = child
            .stderr
            .take()
            .map(|pipe| log_sink::forward_lines(pipe, TOOL_NAME, self.log.clone()));

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| Y2LocalError::Io(std::io::Error::other("yt-dlp stdout not captured")))?;

        let raw = match read_bounded(stdout, self.max_output_bytes).await {
            Ok(raw) => raw,
            Err(e) => {
                // Don't leave the process running when we stop reading
                if let Err(kill_err) = child.kill().await {
                    debug!("yt-dlp already gone: {}", kill_err);
                }
                return Err(e);
            }
        };

        let status = child.wait().await?;
        if let Some(task) = stderr_task {
            let _ = task.await;
        }

        if !status.success() {
            error!("yt-dlp metadata fetch failed for {} ({})", url, status);
            return Err(Y2LocalError::MetadataFailed {
                code: status.code(),
            });
        }

        info!("Fetched {} bytes of metadata for {}", raw.len(), url);
        Ok(String::from_utf8(raw)?)
    }
}

/// Concatenate chunks from the pipe in arrival order, failing once `limit` is
/// exceeded.
async fn read_bounded(stdout: ChildStdout, limit: usize) -> Result<Vec<u8>> {
    let mut chunks = ReaderStream::new(stdout);
    let mut raw = Vec::new();

    while let Some(chunk) = chunks.next().await {
        let chunk = chunk?;
        if raw.len() + chunk.len() > limit {
            error!("yt-dlp metadata output exceeded {} bytes", limit);
            return Err(Y2LocalError::MetadataTooLarge { limit });
        }
        raw.extend_from_slice(&chunk);
    }

    Ok(raw)
}
