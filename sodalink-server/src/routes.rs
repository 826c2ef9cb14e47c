//! HTTP boundary for the extraction pipeline. Errors are reported in the
//! response body with a `success` flag; the HTTP status is always 200.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use sodalink_core::{LyricsDocument, SodaExtractor, SongInfo, TimedLine};
use std::sync::Arc;
use tracing::{info, warn};

const LOG_TARGET: &str = "sodalink::server";

/// Platform tag the endpoint accepts.
const PLATFORM_QISHUI: &str = "qishui";

pub type AppState = Arc<SodaExtractor>;

/// Build the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/parse-soda-link", post(parse_soda_link))
        .route("/api/health", get(health))
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
pub struct ParseRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
}

/// Uniform response shape shared by success and failure, matching the
/// original frontend contract.
#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lyrics: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lyrics_with_timing: Option<Vec<TimedLine>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub song_info: Option<SongInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ParseResponse {
    fn ok(document: LyricsDocument) -> Self {
        Self {
            success: true,
            lyrics: Some(document.lyrics),
            lyrics_with_timing: Some(document.lines),
            song_info: Some(document.song_info),
            source: Some(document.source),
            error: None,
        }
    }

    fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            lyrics: None,
            lyrics_with_timing: None,
            song_info: None,
            source: None,
            error: Some(message.into()),
        }
    }
}

async fn parse_soda_link(
    State(extractor): State<AppState>,
    body: Result<Json<ParseRequest>, JsonRejection>,
) -> Json<ParseResponse> {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(target: LOG_TARGET, "Unreadable request body: {}", rejection);
            return Json(ParseResponse::err(format!("server error: {rejection}")));
        }
    };

    let Some(url) = request.url.filter(|u| !u.trim().is_empty()) else {
        return Json(ParseResponse::err("missing url"));
    };

    if request.platform.as_deref() != Some(PLATFORM_QISHUI) {
        return Json(ParseResponse::err("unsupported platform"));
    }

    if !SodaExtractor::is_share_link(&url) {
        return Json(ParseResponse::err("invalid soda share link"));
    }

    info!(target: LOG_TARGET, "Parsing share link: {}", url);
    match extractor.extract(&url).await {
        Ok(document) => Json(ParseResponse::ok(document)),
        Err(e) => {
            warn!(target: LOG_TARGET, "Extraction failed: {}", e);
            Json(ParseResponse::err(e.to_string()))
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "service is running",
    })
}
