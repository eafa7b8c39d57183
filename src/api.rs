// src/api.rs
//! HTTP surface: analysis endpoint, CSV download, health. Presentation glue
//! around the pipeline; all sentiment semantics live in the other modules.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::export;
use crate::fetch::{self, CommentSource};
use crate::pipeline;
use crate::translate::Translator;
use crate::types::{Algorithm, AnalysisRequest, AnalysisResult, CommentRecord, SentimentCounts};

/// The JSON response caps the per-comment table; the CSV download carries
/// the full record set.
const TABLE_ROW_CAP: usize = 100;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn CommentSource>,
    pub translator: Arc<dyn Translator>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/analyze", post(analyze))
        .route("/download.csv", get(download_csv))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.1 }));
        (self.0, body).into_response()
    }
}

#[derive(Deserialize)]
struct AnalyzeReq {
    video_input: String,
    #[serde(default)]
    method: Algorithm,
    #[serde(default = "default_max_comments")]
    max_comments: usize,
}

fn default_max_comments() -> usize {
    100
}

#[derive(Serialize)]
struct AnalyzeResp {
    video_id: String,
    algorithm: Algorithm,
    stats: SentimentCounts,
    records: Vec<CommentRecord>,
}

/// Resolve the video, fetch its comments, and run the full analysis.
async fn run_analysis(
    state: &AppState,
    video_input: &str,
    method: Algorithm,
    max_comments: usize,
) -> Result<(String, AnalysisResult), ApiError> {
    let request = AnalysisRequest::new(video_input, max_comments, method);

    let video_id = fetch::extract_video_id(&request.video_url).ok_or_else(|| {
        ApiError(
            StatusCode::BAD_REQUEST,
            "could not extract a valid video id from the provided input".to_string(),
        )
    })?;

    let raw = state
        .source
        .fetch_comments(&video_id, request.comment_limit)
        .await
        .map_err(|e| {
            warn!(error = %e, source = state.source.name(), %video_id, "comment fetch failed");
            ApiError(
                StatusCode::BAD_GATEWAY,
                format!("comment fetch failed: {e:#}"),
            )
        })?;

    if raw.is_empty() {
        return Err(ApiError(
            StatusCode::BAD_REQUEST,
            "no comments found for this video".to_string(),
        ));
    }

    let result =
        pipeline::analyze_comments(raw, request.algorithm, state.translator.as_ref()).await;
    Ok((video_id, result))
}

async fn analyze(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeReq>,
) -> Result<Json<AnalyzeResp>, ApiError> {
    let (video_id, result) =
        run_analysis(&state, &body.video_input, body.method, body.max_comments).await?;

    let mut records = result.records;
    records.truncate(TABLE_ROW_CAP);

    Ok(Json(AnalyzeResp {
        video_id,
        algorithm: body.method,
        stats: result.counts,
        records,
    }))
}

#[derive(Deserialize)]
struct DownloadQuery {
    video_input: String,
    #[serde(default)]
    method: Algorithm,
    #[serde(default = "default_max_comments")]
    max_comments: usize,
}

async fn download_csv(
    State(state): State<AppState>,
    Query(q): Query<DownloadQuery>,
) -> Result<Response, ApiError> {
    let (video_id, result) =
        run_analysis(&state, &q.video_input, q.method, q.max_comments).await?;

    let bytes = export::to_csv_bytes(&result.records).map_err(|e| {
        ApiError(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("csv serialization failed: {e:#}"),
        )
    })?;

    let disposition = format!(
        "attachment; filename={}",
        export::csv_filename(&video_id)
    );
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
