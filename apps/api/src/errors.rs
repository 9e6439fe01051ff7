use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// The model's raw extraction output could not be parsed as JSON.
    /// Surfaced to the caller, never retried here.
    #[error("Extraction parse error: {0}")]
    ExtractionParse(String),

    /// A parsed job record violated the output contract (e.g. `skills` not a
    /// list). Caught at parse time, before any prompt rendering touches it.
    #[error("Malformed job record: {0}")]
    MalformedJob(String),

    /// A similarity query arrived before the portfolio index was populated.
    /// Failing keeps "not loaded" distinguishable from "no matches".
    #[error("Portfolio index not loaded")]
    IndexNotLoaded,

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Vector index error: {0}")]
    Index(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::ExtractionParse(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EXTRACTION_PARSE_ERROR",
                msg.clone(),
            ),
            AppError::MalformedJob(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "MALFORMED_JOB_RECORD",
                msg.clone(),
            ),
            AppError::IndexNotLoaded => (
                StatusCode::SERVICE_UNAVAILABLE,
                "INDEX_NOT_LOADED",
                "Portfolio index has not been loaded".to_string(),
            ),
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::Index(msg) => {
                tracing::error!("Vector index error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INDEX_ERROR",
                    "A vector index error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
