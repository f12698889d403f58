//! Axum route handlers for the Rewrite API.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::rewriter::analysis::{analyze_resume, ResumeAnalysis};
use crate::rewriter::export::ExportKind;
use crate::rewriter::orchestrator::{rewrite_resume, RewriteOutcome, RewriteRequest};
use crate::state::AppState;
use crate::template::validation::{require_well_formed, validate};

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub original_resume: String,
    #[serde(default)]
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub resume: String,
    pub cover_letter: String,
    pub kind: ExportKind,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/rewrite
///
/// Full pipeline: template parse → generate → render. Returns the tailored
/// resume and cover letter, or an error naming what went wrong.
pub async fn handle_rewrite(
    State(state): State<AppState>,
    Json(request): Json<RewriteRequest>,
) -> Result<Json<RewriteOutcome>, AppError> {
    require_input(&request.original_resume, "Please upload a resume")?;
    require_input(&request.job_description, "Please provide a job description")?;
    require_input(
        &request.candidate_statement,
        "Please describe your experience and limitations",
    )?;
    // Blank templates are left to the parser so they report EMPTY_TEMPLATE.

    if request.strict {
        require_well_formed(validate(&request.format_template)?)?;
    }

    let outcome = rewrite_resume(state.generator.as_ref(), &request).await?;

    if request.strict && !outcome.missing_sections.is_empty() {
        return Err(AppError::UnprocessableEntity(format!(
            "Generated content is missing sections: {}",
            outcome.missing_sections.join(", ")
        )));
    }

    info!(
        "Rewrote resume: {} chars, cover letter {} chars",
        outcome.resume.len(),
        outcome.cover_letter.len()
    );
    Ok(Json(outcome))
}

/// POST /api/v1/analysis
///
/// Scores the original resume against the job description.
pub async fn handle_analysis(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<ResumeAnalysis>, AppError> {
    require_input(&request.original_resume, "Please upload a resume")?;
    require_input(&request.job_description, "Please provide a job description")?;

    let analysis =
        analyze_resume(&state.llm, &request.original_resume, &request.job_description).await?;

    Ok(Json(analysis))
}

/// POST /api/v1/export
///
/// Returns the resume, the cover letter, or both as a plain-text download.
pub async fn handle_export(Json(request): Json<ExportRequest>) -> Response {
    let body = request.kind.body(&request.resume, &request.cover_letter);
    let disposition = format!("attachment; filename=\"{}\"", request.kind.file_name());

    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}

fn require_input(value: &str, message: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(message.to_string()));
    }
    Ok(())
}
