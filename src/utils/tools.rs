//! Locating the external binaries (yt-dlp, ffmpeg)
//!
//! Search order for each tool:
//! 1. Explicit path from configuration
//! 2. Next to the running executable (for bundled deployments)
//! 3. System PATH
//! 4. Common installation paths (Homebrew, pip user installs, etc.)

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const YTDLP: &str = "yt-dlp";
const FFMPEG: &str = "ffmpeg";

/// Resolve the yt-dlp binary.
///
/// Falls back to the bare name `yt-dlp` so a missing binary surfaces as a
/// launch failure per request rather than a startup crash.
pub fn resolve_ytdlp(explicit: Option<&Path>) -> PathBuf {
    resolve(YTDLP, explicit)
}

/// Resolve the ffmpeg binary handed to yt-dlp via `--ffmpeg-location`.
///
/// `None` leaves yt-dlp to its own lookup; a bare name there would be taken
/// as a missing location and disable merging.
pub fn resolve_ffmpeg(explicit: Option<&Path>) -> Option<PathBuf> {
    let found = find_tool(FFMPEG, explicit);
    match &found {
        Some(path) => info!("✓ Using {}: {:?}", FFMPEG, path),
        None => warn!("✗ {} not found, yt-dlp will look for it itself", FFMPEG),
    }
    found
}

fn resolve(name: &str, explicit: Option<&Path>) -> PathBuf {
    match find_tool(name, explicit) {
        Some(path) => {
            info!("✓ Using {}: {:?}", name, path);
            path
        }
        None => {
            warn!("✗ {} not found, relying on PATH at spawn time", name);
            PathBuf::from(name)
        }
    }
}

/// Find a tool binary, returning `None` when no candidate exists.
pub fn find_tool(name: &str, explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        if is_executable(path) {
            return Some(path.to_path_buf());
        }
        warn!("Configured {} path is not executable: {:?}", name, path);
    }

    find_next_to_exe(name)
        .or_else(|| find_in_path(name))
        .or_else(|| find_in_common_paths(name))
}

fn find_next_to_exe(name: &str) -> Option<PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    let candidate = exe_path.parent()?.join(name);
    debug!("Checking bundled path: {:?}", candidate);
    if is_executable(&candidate) {
        Some(candidate)
    } else {
        None
    }
}

fn find_in_path(name: &str) -> Option<PathBuf> {
    which::which(name).ok().filter(|path| path.exists())
}

fn find_in_common_paths(name: &str) -> Option<PathBuf> {
    let mut candidates = vec![
        // macOS Homebrew (Apple Silicon)
        PathBuf::from("/opt/homebrew/bin").join(name),
        // macOS Homebrew (Intel) / manual installs
        PathBuf::from("/usr/local/bin").join(name),
        PathBuf::from("/usr/bin").join(name),
    ];

    // pip --user installs
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(".local").join("bin").join(name));
    }

    candidates.into_iter().find(|path| is_executable(path))
}

/// Check if a file exists and is executable
pub fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        if let Ok(metadata) = std::fs::metadata(path) {
            // Any executable bit will do
            return metadata.is_file() && metadata.permissions().mode() & 0o111 != 0;
        }
    }

    #[cfg(not(unix))]
    {
        return path.is_file();
    }

    false
}
