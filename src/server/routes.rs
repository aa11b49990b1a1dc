//! Endpoint handlers
//!
//! Every endpoint takes the media URL as `?url=`. Metadata endpoints answer
//! with JSON; download endpoints answer with the container bytes streamed
//! straight from yt-dlp.

use axum::{
    body::Body,
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{de::IgnoredAny, Deserialize, Serialize};
use serde_json::Value;
use tower_http::trace::TraceLayer;
use tracing::debug;

use super::{ApiError, AppState};
use crate::classifier::{self, ClassifiedOption, FormatOptions};
use crate::downloader::DownloadStream;
use crate::extractor::models::{FormatEntry, MediaInfo};
use crate::selection::{self, DeliveryTarget, DownloadKind, BEST_TARGET};
use crate::utils::error::Y2LocalError;

pub const MISSING_URL: &str = "Falta ?url=";
pub const MISSING_DOWNLOAD_PARAMS: &str = "Faltan url, type o format_id";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/info", get(info))
        .route("/options", get(options))
        .route("/best", get(best))
        .route("/download-friendly", get(download_friendly))
        .route("/download-best", get(download_best))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[derive(Debug, Default, Deserialize)]
pub struct MediaQuery {
    pub url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FriendlyQuery {
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub format_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploader: Option<String>,
    pub options: FormatOptions,
}

#[derive(Debug, Serialize)]
pub struct BestVideo {
    pub format_id: String,
    pub quality: Option<String>,
    pub ext: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BestAudio {
    pub format_id: String,
    pub bitrate: Option<f64>,
    pub ext: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BestResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "bestVideo")]
    pub best_video: BestVideo,
    #[serde(rename = "bestAudio")]
    pub best_audio: BestAudio,
}

impl From<&FormatEntry> for BestVideo {
    fn from(format: &FormatEntry) -> Self {
        Self {
            format_id: format.format_id.clone(),
            quality: format.label().map(String::from),
            ext: format.ext.clone(),
        }
    }
}

impl From<&FormatEntry> for BestAudio {
    fn from(format: &FormatEntry) -> Self {
        Self {
            format_id: format.format_id.clone(),
            bitrate: format.abr,
            ext: format.ext.clone(),
        }
    }
}

/// Query strings axum cannot decode (duplicate keys and the like) are
/// reported through the same JSON error body as every other failure.
fn accept_query<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, Y2LocalError> {
    query
        .map(|Query(query)| query)
        .map_err(|rejection| Y2LocalError::InvalidQuery(rejection.body_text()))
}

/// Empty parameters count as missing
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn require_url(value: Option<String>) -> Result<String, Y2LocalError> {
    non_empty(value).ok_or(Y2LocalError::MissingParameter(MISSING_URL))
}

async fn fetch_media(state: &AppState, url: &str) -> Result<MediaInfo, Y2LocalError> {
    let raw = state.extractor.fetch_metadata(url).await?;
    classifier::classify(&raw)
}

fn attachment(target: DeliveryTarget, body: DownloadStream) -> Response {
    (
        [
            (header::CONTENT_TYPE, target.content_type.to_string()),
            (header::CONTENT_DISPOSITION, target.content_disposition()),
        ],
        Body::from_stream(body),
    )
        .into_response()
}

pub async fn health() -> Json<Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// GET /info: the metadata document exactly as yt-dlp printed it
pub async fn info(
    State(state): State<AppState>,
    query: Result<Query<MediaQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let url = require_url(accept_query(query)?.url)?;
    let raw = state.extractor.fetch_metadata(&url).await?;
    // Validate only; re-serialising would reorder keys
    serde_json::from_str::<IgnoredAny>(&raw).map_err(Y2LocalError::from)?;
    Ok(([(header::CONTENT_TYPE, "application/json")], raw).into_response())
}

/// GET /options: progressive and audio-only choices
pub async fn options(
    State(state): State<AppState>,
    query: Result<Query<MediaQuery>, QueryRejection>,
) -> Result<Json<OptionsResponse>, ApiError> {
    let url = require_url(accept_query(query)?.url)?;
    let media = fetch_media(&state, &url).await?;
    let options = media.to_options();
    debug!(
        "{} progressive / {} audio-only options for {} (top: {:?} / {:?})",
        options.progressive.len(),
        options.audio_only.len(),
        url,
        options.progressive.first().map(ClassifiedOption::format_id),
        options.audio_only.first().map(ClassifiedOption::format_id)
    );

    Ok(Json(OptionsResponse {
        title: media.title,
        duration: media.duration,
        uploader: media.uploader,
        options,
    }))
}

/// GET /best: best video-only and audio-only formats
pub async fn best(
    State(state): State<AppState>,
    query: Result<Query<MediaQuery>, QueryRejection>,
) -> Result<Json<BestResponse>, ApiError> {
    let url = require_url(accept_query(query)?.url)?;
    let media = fetch_media(&state, &url).await?;
    let pair = selection::best(&media)?;

    Ok(Json(BestResponse {
        title: media.title.clone(),
        best_video: pair.video.into(),
        best_audio: pair.audio.into(),
    }))
}

/// GET /download-friendly: stream one format chosen by the client
pub async fn download_friendly(
    State(state): State<AppState>,
    query: Result<Query<FriendlyQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let query = accept_query(query)?;
    let (Some(url), Some(kind), Some(format_id)) = (
        non_empty(query.url),
        non_empty(query.kind),
        non_empty(query.format_id),
    ) else {
        return Err(Y2LocalError::MissingParameter(MISSING_DOWNLOAD_PARAMS).into());
    };

    let (spec, target) = selection::download_friendly(DownloadKind::parse(&kind), &format_id);
    let stream = state.downloader.start_download(&url, &spec).await?;
    Ok(attachment(target, stream))
}

/// GET /download-best: merge the best video-only and audio-only formats
pub async fn download_best(
    State(state): State<AppState>,
    query: Result<Query<MediaQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let url = require_url(accept_query(query)?.url)?;
    let media = fetch_media(&state, &url).await?;
    let spec = selection::best(&media)?.format_spec();

    let stream = state.downloader.start_download(&url, &spec).await?;
    Ok(attachment(BEST_TARGET, stream))
}
