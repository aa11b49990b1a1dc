//! Server configuration
//!
//! Values come from command-line flags, then environment variables, then
//! defaults. `clap` handles both the flag and the env lookup.

use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use crate::utils::tools;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MAX_METADATA_BYTES: usize = 64 * 1024 * 1024;

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "y2local", version, about = "HTTP front-end for yt-dlp")]
pub struct CliArgs {
    /// Address to bind
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Path to the yt-dlp binary (discovered when omitted)
    #[arg(long = "yt-dlp", env = "YTDLP_PATH")]
    pub ytdlp: Option<PathBuf>,

    /// Path to the ffmpeg binary passed to yt-dlp (discovered when omitted)
    #[arg(long, env = "FFMPEG_PATH")]
    pub ffmpeg: Option<PathBuf>,

    /// Upper bound for buffered metadata output
    #[arg(long, env = "MAX_METADATA_BYTES", default_value_t = DEFAULT_MAX_METADATA_BYTES)]
    pub max_metadata_bytes: usize,
}

impl CliArgs {
    /// Resolve tool paths and produce the final settings.
    pub fn into_settings(self) -> ServerSettings {
        ServerSettings {
            host: self.host,
            port: self.port,
            ytdlp_path: tools::resolve_ytdlp(self.ytdlp.as_deref()),
            ffmpeg_path: tools::resolve_ffmpeg(self.ffmpeg.as_deref()),
            max_metadata_bytes: self.max_metadata_bytes.max(1),
        }
    }
}

/// Runtime settings for the HTTP server and its tool adapters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub host: IpAddr,
    pub port: u16,
    pub ytdlp_path: PathBuf,
    /// `None` when ffmpeg was not found; yt-dlp then searches on its own
    pub ffmpeg_path: Option<PathBuf>,
    pub max_metadata_bytes: usize,
}

impl ServerSettings {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            ytdlp_path: PathBuf::from("yt-dlp"),
            ffmpeg_path: None,
            max_metadata_bytes: DEFAULT_MAX_METADATA_BYTES,
        }
    }
}
