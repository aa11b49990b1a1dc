//! y2local - HTTP front-end for yt-dlp
//!
//! Exposes metadata, format options and streamed downloads for a media URL.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use y2local::server;
use y2local::utils::{CliArgs, TracingLogSink};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("y2local=info,tower_http=info")),
        )
        .init();

    let settings = CliArgs::parse().into_settings();
    tracing::info!(
        "yt-dlp: {:?}, ffmpeg: {:?}",
        settings.ytdlp_path,
        settings.ffmpeg_path
    );

    server::serve(settings, Arc::new(TracingLogSink)).await
}
