//! Axum route handlers for document uploads.

use axum::{extract::Multipart, Json};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::{extract_text, validate_document, DocumentInfo};
use crate::models::report::ValidationReport;

/// Multipart field carrying the PDF.
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ValidateDocumentResponse {
    pub info: Option<DocumentInfo>,
    pub report: ValidationReport,
}

/// POST /api/v1/documents/extract
///
/// Accepts a multipart upload with a `file` field and returns its plain text.
pub async fn handle_extract(multipart: Multipart) -> Result<Json<ExtractResponse>, AppError> {
    let data = read_upload(multipart).await?;
    let size = data.len();

    let text = tokio::task::spawn_blocking(move || extract_text(&data))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Extraction task failed: {e}")))??;

    info!("Extracted {} chars from {} byte upload", text.len(), size);
    Ok(Json(ExtractResponse { text }))
}

/// POST /api/v1/documents/validate
///
/// Reports whether an upload is usable as resume input, without failing on bad PDFs.
pub async fn handle_validate_document(
    multipart: Multipart,
) -> Result<Json<ValidateDocumentResponse>, AppError> {
    let data = read_upload(multipart).await?;

    let (info, report) = tokio::task::spawn_blocking(move || validate_document(&data))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Validation task failed: {e}")))?;

    Ok(Json(ValidateDocumentResponse { info, report }))
}

async fn read_upload(mut multipart: Multipart) -> Result<Vec<u8>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid upload: {e}")))?
    {
        if field.name() == Some(FILE_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Invalid upload: {e}")))?;
            return Ok(bytes.to_vec());
        }
    }

    Err(AppError::Validation(format!(
        "Please upload a resume PDF in the `{FILE_FIELD}` field"
    )))
}
