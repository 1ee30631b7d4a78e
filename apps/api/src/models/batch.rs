use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::models::resume::ResumeRecord;

/// Outcome of one file's pipeline run. Failures never abort the batch —
/// they are collected alongside successes and aggregated.
#[derive(Debug)]
pub enum FileOutcome {
    Success(ResumeRecord),
    Failure(FileError),
}

/// Stable classification of a per-file failure, paired with the HTTP status
/// it maps to. `MalformedResponse` is deliberately absent: a malformed step
/// completion degrades its field group inside the record and never surfaces
/// as a file-level failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    UnsupportedFormat,
    ExtractionFailure,
    NotAResume,
    ModelError,
    InternalError,
}

impl FailureKind {
    pub fn label(&self) -> &'static str {
        match self {
            FailureKind::UnsupportedFormat => "Unsupported file format",
            FailureKind::ExtractionFailure => "Text extraction failed",
            FailureKind::NotAResume => "Not a resume",
            FailureKind::ModelError => "Model request failed",
            FailureKind::InternalError => "Internal error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            FailureKind::UnsupportedFormat => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            FailureKind::ExtractionFailure | FailureKind::NotAResume => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            FailureKind::ModelError | FailureKind::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Structured error entry for a failed file, as serialized into the batch
/// response's `errors` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileError {
    pub filename: String,
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl FileError {
    pub fn new(filename: impl Into<String>, kind: FailureKind, message: impl Into<String>) -> Self {
        FileError {
            filename: filename.into(),
            error: kind.label().to_string(),
            message: message.into(),
            status_code: kind.status().as_u16(),
        }
    }
}

/// Wire shape of a batch response.
///
/// `results` holds successful records in input order; `errors` holds failure
/// entries in input order. `successful + failed == total_files` always.
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchResponse {
    pub status: String,
    pub message: String,
    pub total_files: usize,
    pub successful: usize,
    pub failed: usize,
    pub results: Vec<ResumeRecord>,
    pub errors: Vec<FileError>,
}
