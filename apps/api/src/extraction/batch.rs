//! Batch aggregation — runs the per-file pipeline over every uploaded file
//! and folds the outcomes into one response.
//!
//! Files are fully independent: each runs extract → validate → orchestrate
//! in its own task, failures are classified into structured entries, and no
//! single file can abort the batch. Fan-out is bounded to cap outbound model
//! traffic, and outcome order always matches input order.

use std::sync::Arc;

use axum::http::StatusCode;
use bytes::Bytes;
use futures::stream::{self, StreamExt};
use tracing::error;

use crate::documents::{self, ExtractError};
use crate::extraction::orchestrator::run_pipeline;
use crate::llm_client::ModelClient;
use crate::models::batch::{BatchResponse, FailureKind, FileError, FileOutcome};

/// Cap on files processed simultaneously — bounds latency and outbound
/// request volume, not correctness.
pub const MAX_CONCURRENT_FILES: usize = 4;

/// One uploaded file, as read from the multipart stream.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Bytes,
}

/// Processes every file and computes the batch-level status.
pub async fn run_batch(
    model: Arc<dyn ModelClient>,
    files: Vec<UploadedFile>,
) -> (StatusCode, BatchResponse) {
    let tasks = files.into_iter().map(|file| {
        let model = Arc::clone(&model);
        let filename = file.filename.clone();
        async move {
            // Task-per-file: a panic inside one file's pipeline is contained
            // and classified instead of tearing down the batch.
            match tokio::spawn(async move { process_file(model.as_ref(), file).await }).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!("file task failed: {e}");
                    FileOutcome::Failure(FileError::new(
                        filename,
                        FailureKind::InternalError,
                        format!("unexpected failure: {e}"),
                    ))
                }
            }
        }
    });

    let outcomes: Vec<FileOutcome> = stream::iter(tasks)
        .buffered(MAX_CONCURRENT_FILES)
        .collect()
        .await;
    aggregate(outcomes)
}

/// Runs one file through extract → validate → orchestrate and classifies
/// any failure.
async fn process_file(model: &dyn ModelClient, file: UploadedFile) -> FileOutcome {
    let text = match documents::extract_text(&file.filename, &file.bytes) {
        Ok(text) => text,
        Err(e) => {
            let kind = match &e {
                ExtractError::UnsupportedFormat(_) => FailureKind::UnsupportedFormat,
                ExtractError::ExtractionFailed(_) | ExtractError::InsufficientText => {
                    FailureKind::ExtractionFailure
                }
            };
            return FileOutcome::Failure(FileError::new(&file.filename, kind, e.to_string()));
        }
    };

    match run_pipeline(model, &file.filename, &text).await {
        Ok(record) if !record.is_resume => {
            let reason = record
                .not_resume_reason
                .unwrap_or_else(|| "The document does not appear to be a resume".to_string());
            FileOutcome::Failure(FileError::new(&file.filename, FailureKind::NotAResume, reason))
        }
        Ok(record) => FileOutcome::Success(record),
        Err(e) => {
            FileOutcome::Failure(FileError::new(&file.filename, FailureKind::ModelError, e.to_string()))
        }
    }
}

/// Folds per-file outcomes into the batch response and its HTTP status.
///
/// Status rules: no files → 400; all succeeded → 200; mixed → 207; all
/// failed → the lone file's own status for single-file batches, 400
/// otherwise.
pub fn aggregate(outcomes: Vec<FileOutcome>) -> (StatusCode, BatchResponse) {
    let total_files = outcomes.len();
    let mut results = Vec::new();
    let mut errors = Vec::new();
    for outcome in outcomes {
        match outcome {
            FileOutcome::Success(record) => results.push(record),
            FileOutcome::Failure(err) => errors.push(err),
        }
    }
    let successful = results.len();
    let failed = errors.len();

    let (status_code, status, message) = if total_files == 0 {
        (
            StatusCode::BAD_REQUEST,
            "failed",
            "No files provided".to_string(),
        )
    } else if failed == 0 {
        (
            StatusCode::OK,
            "success",
            format!("Successfully processed {total_files} file(s)"),
        )
    } else if successful > 0 {
        (
            StatusCode::MULTI_STATUS,
            "partial",
            format!("Processed {successful} of {total_files} file(s); {failed} failed"),
        )
    } else if total_files == 1 {
        // A single-file batch surfaces the file's own failure code
        let code = StatusCode::from_u16(errors[0].status_code).unwrap_or(StatusCode::BAD_REQUEST);
        (code, "failed", format!("Failed to process '{}'", errors[0].filename))
    } else {
        (
            StatusCode::BAD_REQUEST,
            "failed",
            format!("All {total_files} file(s) failed"),
        )
    };

    (
        status_code,
        BatchResponse {
            status: status.to_string(),
            message,
            total_files,
            successful,
            failed,
            results,
            errors,
        },
    )
}
