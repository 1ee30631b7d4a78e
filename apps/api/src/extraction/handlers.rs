use std::sync::Arc;

use axum::{
    extract::multipart::{Multipart, MultipartError},
    extract::State,
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::extraction::batch::{run_batch, UploadedFile};
use crate::models::batch::BatchResponse;
use crate::state::AppState;

/// POST /parse-resume
///
/// Multipart form with one or more `files` fields. The response status is
/// computed from the per-file outcomes (200 / 207 / 400 / per-file code for
/// single-file batches); multipart read errors are request-level 400s.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<BatchResponse>), AppError> {
    let mut files = Vec::new();
    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        if field.name() != Some("files") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(bad_multipart)?;
        files.push(UploadedFile { filename, bytes });
    }

    info!("Received batch of {} file(s)", files.len());
    let (status, body) = run_batch(Arc::clone(&state.model), files).await;
    Ok((status, Json(body)))
}

fn bad_multipart(e: MultipartError) -> AppError {
    AppError::Validation(format!("invalid multipart request: {e}"))
}
