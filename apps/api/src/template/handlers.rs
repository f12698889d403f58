//! Axum route handlers for template authoring.

use std::collections::HashMap;

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::report::ValidationReport;
use crate::template::parser::{parse, ParsedTemplate};
use crate::template::preview::{preview, section_names, SUGGESTED_VARIABLES};
use crate::template::validation::validate;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TemplateRequest {
    pub template: String,
}

#[derive(Debug, Serialize)]
pub struct ParseTemplateResponse {
    pub parsed: ParsedTemplate,
    pub section_names: Vec<String>,
    pub total_sections: usize,
    /// Indexes of non-blank sections without placeholders.
    pub literal_sections: Vec<usize>,
    pub generated_sections: Vec<usize>,
}

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub template: String,
    #[serde(default)]
    pub sample: HashMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub preview: String,
}

#[derive(Debug, Serialize)]
pub struct SuggestedVariablesResponse {
    pub variables: Vec<&'static str>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/templates/parse
pub async fn handle_parse_template(
    Json(request): Json<TemplateRequest>,
) -> Result<Json<ParseTemplateResponse>, AppError> {
    let parsed = parse(&request.template)?;

    Ok(Json(ParseTemplateResponse {
        section_names: section_names(&request.template),
        total_sections: parsed.sections.len(),
        literal_sections: parsed.literal_sections().map(|s| s.index).collect(),
        generated_sections: parsed.generated_sections().map(|s| s.index).collect(),
        parsed,
    }))
}

/// POST /api/v1/templates/validate
///
/// Problems come back in the report with 200; only a blank template is rejected.
pub async fn handle_validate_template(
    Json(request): Json<TemplateRequest>,
) -> Result<Json<ValidationReport>, AppError> {
    Ok(Json(validate(&request.template)?))
}

/// POST /api/v1/templates/preview
pub async fn handle_preview_template(
    Json(request): Json<PreviewRequest>,
) -> Result<Json<PreviewResponse>, AppError> {
    let preview = preview(&request.template, &request.sample)?;
    Ok(Json(PreviewResponse { preview }))
}

/// GET /api/v1/templates/suggested-variables
pub async fn handle_suggested_variables() -> Json<SuggestedVariablesResponse> {
    Json(SuggestedVariablesResponse {
        variables: SUGGESTED_VARIABLES.to_vec(),
    })
}
