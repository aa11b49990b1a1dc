//! Error handling for y2local

use thiserror::Error;

/// Broad classification used to pick an HTTP status for an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or malformed request input
    Input,
    /// yt-dlp could not be started or exited with a failure
    ExternalTool,
    /// Metadata output was not a valid JSON document
    Parse,
    /// No qualifying format was found in the catalog
    Selection,
}

/// Main error type for y2local
///
/// The `Display` text of each variant is what clients see in the
/// `{"error": ...}` body, so it stays short and stable.
#[derive(Debug, Error)]
pub enum Y2LocalError {
    #[error("{0}")]
    MissingParameter(&'static str),

    #[error("Parámetros inválidos: {0}")]
    InvalidQuery(String),

    #[error("Error iniciando yt-dlp")]
    ToolLaunch(#[source] std::io::Error),

    #[error("No se pudo obtener info")]
    MetadataFailed { code: Option<i32> },

    #[error("No se pudo obtener info")]
    MetadataTooLarge { limit: usize },

    #[error("Fallo en la descarga")]
    DownloadFailed { code: Option<i32> },

    #[error("Error parseando JSON")]
    Parse(#[from] serde_json::Error),

    #[error("Error parseando JSON")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("No se encontró audio o video")]
    NoSelection,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Y2LocalError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Y2LocalError::MissingParameter(_) | Y2LocalError::InvalidQuery(_) => ErrorKind::Input,
            Y2LocalError::ToolLaunch(_)
            | Y2LocalError::MetadataFailed { .. }
            | Y2LocalError::MetadataTooLarge { .. }
            | Y2LocalError::DownloadFailed { .. }
            | Y2LocalError::Io(_) => ErrorKind::ExternalTool,
            Y2LocalError::Parse(_) | Y2LocalError::Encoding(_) => ErrorKind::Parse,
            Y2LocalError::NoSelection => ErrorKind::Selection,
        }
    }

    /// HTTP status code for this error: 400 for bad input, 500 otherwise.
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::Input => 400,
            _ => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, Y2LocalError>;
