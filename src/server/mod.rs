//! HTTP front-end
//!
//! One handler per endpoint; each request spawns its own yt-dlp processes and
//! shares nothing with other requests.

pub mod error;
pub mod routes;

pub use error::ApiError;
pub use routes::router;

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::downloader::{MediaDownloader, YtDlpDownloader};
use crate::extractor::{MetadataSource, YtDlpExtractor};
use crate::utils::config::ServerSettings;
use crate::utils::log_sink::LogSink;

/// Adapters shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<dyn MetadataSource>,
    pub downloader: Arc<dyn MediaDownloader>,
}

impl AppState {
    pub fn new(extractor: Arc<dyn MetadataSource>, downloader: Arc<dyn MediaDownloader>) -> Self {
        Self {
            extractor,
            downloader,
        }
    }

    /// yt-dlp backed adapters writing diagnostics to `log`
    pub fn from_settings(settings: &ServerSettings, log: Arc<dyn LogSink>) -> Self {
        let extractor = YtDlpExtractor::new(
            &settings.ytdlp_path,
            settings.max_metadata_bytes,
            log.clone(),
        );
        let downloader = YtDlpDownloader::new(
            &settings.ytdlp_path,
            settings.ffmpeg_path.clone(),
            log,
        );
        Self::new(Arc::new(extractor), Arc::new(downloader))
    }
}

/// Bind and serve until Ctrl-C
pub async fn serve(settings: ServerSettings, log: Arc<dyn LogSink>) -> Result<()> {
    let app = router(AppState::from_settings(&settings, log));

    let addr = settings.bind_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("could not bind {}", addr))?;

    info!("Servidor en http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
