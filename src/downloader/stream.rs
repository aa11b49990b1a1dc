//! Streaming yt-dlp's stdout to the caller
//!
//! The child process is owned by the returned stream. Chunks are only read
//! when the consumer polls, so a slow client slows the pipe instead of
//! growing a buffer. Dropping the stream kills the process.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, BoxStream, StreamExt};
use std::io;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use tokio::process::{Child, ChildStdout, Command as AsyncCommand};
use tokio_util::io::ReaderStream;
use tracing::{debug, error, info, warn};

use super::command::{download_args, FormatSpec};
use crate::extractor::ytdlp::TOOL_NAME;
use crate::utils::error::{Result, Y2LocalError};
use crate::utils::log_sink::{self, LogSink};

/// Read size for each chunk pulled from the pipe
const CHUNK_SIZE: usize = 64 * 1024;

/// Byte stream of the downloaded container
pub type DownloadStream = BoxStream<'static, io::Result<Bytes>>;

/// Starts downloads and hands back their output as a stream
#[async_trait]
pub trait MediaDownloader: Send + Sync {
    /// Resolves once the first byte is available (or the tool has finished).
    /// Failures before that point are reported as errors; failures after
    /// it end the stream with an `Err` item.
    async fn start_download(&self, url: &str, spec: &FormatSpec) -> Result<DownloadStream>;
}

/// Downloader backed by a yt-dlp process per call
pub struct YtDlpDownloader {
    ytdlp_path: PathBuf,
    ffmpeg_path: Option<PathBuf>,
    log: Arc<dyn LogSink>,
}

impl YtDlpDownloader {
    pub fn new(
        ytdlp_path: impl Into<PathBuf>,
        ffmpeg_path: Option<PathBuf>,
        log: Arc<dyn LogSink>,
    ) -> Self {
        Self {
            ytdlp_path: ytdlp_path.into(),
            ffmpeg_path,
            log,
        }
    }
}

#[async_trait]
impl MediaDownloader for YtDlpDownloader {
    async fn start_download(&self, url: &str, spec: &FormatSpec) -> Result<DownloadStream> {
        info!("Starting download of {} with format {}", url, spec);
        if spec.is_merge() && self.ffmpeg_path.is_none() {
            warn!("Merging {} without a resolved ffmpeg; yt-dlp must find one", spec);
        }

        let mut child = AsyncCommand::new(&self.ytdlp_path)
            .args(download_args(url, spec, self.ffmpeg_path.as_deref()))
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
            .ok_or_else(|| Y2LocalError::Io(io::Error::other("yt-dlp stdout not captured")))?;
        let mut chunks = ReaderStream::with_capacity(stdout, CHUNK_SIZE);

        // Nothing goes to the client until there is something to send, so an
        // early failure (bad format id, unavailable video) is still reportable.
        let first = match chunks.next().await {
            Some(Ok(bytes)) => bytes,
            Some(Err(e)) => {
                error!("Reading yt-dlp output failed: {}", e);
                return Err(e.into());
            }
            None => {
                let status = child.wait().await?;
                if let Some(task) = stderr_task {
                    let _ = task.await;
                }
                if status.success() {
                    warn!("yt-dlp produced no output for {}", url);
                    return Ok(stream::empty().boxed());
                }
                error!("yt-dlp download failed for {} ({})", url, status);
                return Err(Y2LocalError::DownloadFailed {
                    code: status.code(),
                });
            }
        };

        let state = StreamState {
            pending: Some(first),
            chunks,
            child,
            delivered: 0,
            finished: false,
        };

        Ok(stream::unfold(state, next_chunk).boxed())
    }
}

struct StreamState {
    pending: Option<Bytes>,
    chunks: ReaderStream<ChildStdout>,
    child: Child,
    delivered: u64,
    finished: bool,
}

impl Drop for StreamState {
    fn drop(&mut self) {
        if !self.finished {
            debug!(
                "Download stream dropped after {} bytes; killing yt-dlp",
                self.delivered
            );
        }
    }
}

async fn next_chunk(mut state: StreamState) -> Option<(io::Result<Bytes>, StreamState)> {
    if state.finished {
        return None;
    }

    if let Some(first) = state.pending.take() {
        state.delivered += first.len() as u64;
        return Some((Ok(first), state));
    }

    match state.chunks.next().await {
        Some(Ok(bytes)) => {
            state.delivered += bytes.len() as u64;
            Some((Ok(bytes), state))
        }
        Some(Err(e)) => {
            state.finished = true;
            warn!("yt-dlp output pipe failed after {} bytes: {}", state.delivered, e);
            if let Err(kill_err) = state.child.start_kill() {
                debug!("yt-dlp already gone: {}", kill_err);
            }
            Some((Err(e), state))
        }
        None => {
            state.finished = true;
            match state.child.wait().await {
                Ok(status) if status.success() => {
                    info!("Download finished ({} bytes)", state.delivered);
                    None
                }
                Ok(status) => {
                    // Headers are already out; all we can do is cut the body short.
                    warn!(
                        "yt-dlp exited with {} after {} bytes; truncating response",
                        status, state.delivered
                    );
                    let err = io::Error::other(format!("yt-dlp exited with {}", status));
                    Some((Err(err), state))
                }
                Err(e) => Some((Err(e), state)),
            }
        }
    }
}
