use axum::Json;
use serde_json::{json, Value};

use crate::llm_client;

/// GET /health
/// Liveness only — no core logic behind it.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "resume-parser"
    }))
}

/// GET /
/// Static service metadata.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "AI Resume Parser API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "/parse-resume": "POST - Upload and parse resume files",
            "/health": "GET - Health check"
        },
        "supported_formats": ["PDF", "DOCX", "DOC"],
        "model": llm_client::MODEL
    }))
}
