use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractionError;
use crate::llm_client::LlmError;
use crate::rewriter::orchestrator::RewriteError;
use crate::template::TemplateError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every failure kind maps to its own error code so clients can tell
/// "fix your input" apart from "the AI service is down".
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("Malformed generation result: {0}")]
    MalformedGeneration(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<RewriteError> for AppError {
    fn from(error: RewriteError) -> Self {
        match error {
            RewriteError::Template(e) => AppError::Template(e),
            RewriteError::Generation(e) => AppError::Llm(e),
            RewriteError::MalformedResult(reason) => AppError::MalformedGeneration(reason),
        }
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
            ),
            AppError::Template(e @ TemplateError::Empty) => {
                (StatusCode::BAD_REQUEST, "EMPTY_TEMPLATE", e.to_string())
            }
            AppError::Template(e @ TemplateError::Malformed(_)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "MALFORMED_TEMPLATE",
                e.to_string(),
            ),
            AppError::Extraction(e) => {
                tracing::warn!("Extraction error: {e}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "EXTRACTION_ERROR",
                    format!("Failed to extract text from document: {e}"),
                )
            }
            AppError::Llm(e @ LlmError::Timeout { .. }) => {
                tracing::error!("LLM error: {e}");
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    "GENERATION_TIMEOUT",
                    format!("The AI service timed out: {e}"),
                )
            }
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "GENERATION_ERROR",
                    format!("The AI service is unavailable: {e}"),
                )
            }
            AppError::MalformedGeneration(reason) => {
                tracing::error!("Malformed generation result: {reason}");
                (
                    StatusCode::BAD_GATEWAY,
                    "MALFORMED_GENERATION_RESULT",
                    format!("The AI service returned an unusable response: {reason}"),
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
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
