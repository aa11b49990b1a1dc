//! Diagnostic sink for child-process stderr
//!
//! yt-dlp writes progress and warnings to stderr. Those lines never reach the
//! client; each adapter forwards them to the `LogSink` it was constructed with.

use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Receives diagnostic lines emitted by external tools.
pub trait LogSink: Send + Sync {
    fn diagnostic(&self, tool: &str, line: &str);
}

/// Default sink: forwards lines as tracing events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn diagnostic(&self, tool: &str, line: &str) {
        let trimmed = line.trim_end();
        if trimmed.is_empty() {
            return;
        }
        if trimmed.starts_with("ERROR") || trimmed.starts_with("WARNING") {
            warn!(tool, "{}", trimmed);
        } else {
            debug!(tool, "{}", trimmed);
        }
    }
}

/// Collects lines in memory. Used by tests.
#[derive(Debug, Default)]
pub struct MemoryLogSink {
    lines: Mutex<Vec<String>>,
}

impl MemoryLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }
}

impl LogSink for MemoryLogSink {
    fn diagnostic(&self, tool: &str, line: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(format!("[{}] {}", tool, line));
        }
    }
}

/// Drain a child's stderr line by line into `sink`.
///
/// The task ends when the pipe closes, which happens when the child exits or
/// is killed, so callers may await it or simply let it run out.
pub fn forward_lines<R>(pipe: R, tool: &'static str, sink: Arc<dyn LogSink>) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(pipe).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => sink.diagnostic(tool, &line),
                Ok(None) => break,
                Err(e) => {
                    debug!("Stopped reading {} stderr: {}", tool, e);
                    break;
                }
            }
        }
    })
}
