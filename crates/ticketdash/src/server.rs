use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use ticketdash_core::{process_upload, DashboardConfig, UploadOutcome};
use ticketdash_parser::decode_upload_contents;
use tracing::{error, warn};

/// Upload size cap. Base64 inflates the file by a third, so this leaves room
/// for exports of roughly 24 MiB.
pub const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// Shared, read-only server state. Each request builds its own ticket table
/// and report; nothing computed from an upload is kept here.
#[derive(Clone)]
pub struct AppState {
    config: Arc<DashboardConfig>,
}

#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    pub filename: String,
    /// Browser data URL (`data:text/csv;base64,...`) or the raw CSV text.
    pub contents: String,
}

pub fn router(config: DashboardConfig) -> Router {
    let state = AppState {
        config: Arc::new(config),
    };

    Router::new()
        .route("/health", get(health))
        .route("/uploads", post(upload))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn upload(
    State(state): State<AppState>,
    Json(request): Json<UploadRequest>,
) -> Result<(StatusCode, Json<UploadOutcome>), StatusCode> {
    let payload = match decode_upload_contents(&request.contents) {
        Ok(payload) => payload,
        Err(err) => {
            warn!(filename = %request.filename, error = %err, "upload contents rejected");
            return Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(UploadOutcome::rejected(&err)),
            ));
        }
    };

    let config = Arc::clone(&state.config);
    let outcome = tokio::task::spawn_blocking(move || {
        process_upload(&payload, &request.filename, &config)
    })
    .await
    .map_err(|err| {
        error!("upload processing task failed: {err}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let status = if outcome.report.is_some() {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };
    Ok((status, Json(outcome)))
}
