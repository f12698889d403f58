//! Resume Rewrite — orchestrates one rewrite from raw inputs to finished text.
//!
//! Flow: parse template → build GenerationRequest → generate (single await,
//!       no retry) → check result shape → render template → return pair.
//!
//! All-or-nothing: either both the resume and the cover letter come back, or
//! the call fails as a whole.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::llm_client::LlmError;
use crate::rewriter::generator::{ContentGenerator, GenerationRequest};
use crate::template::substitution::missing_variables;
use crate::template::{parse, render, TemplateError};

#[derive(Debug, Error)]
pub enum RewriteError {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("Failed to generate content: {0}")]
    Generation(#[from] LlmError),

    #[error("Malformed generation result: {0}")]
    MalformedResult(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Inputs for one rewrite.
/// Text fields default to empty so that absent and blank inputs are
/// rejected the same way.
#[derive(Debug, Clone, Deserialize)]
pub struct RewriteRequest {
    #[serde(default)]
    pub original_resume: String,
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub format_template: String,
    #[serde(default)]
    pub candidate_statement: String,
    /// Reject malformed templates and incomplete results instead of
    /// returning them. Enforced by the HTTP handler.
    #[serde(default)]
    pub strict: bool,
}

/// Checked answer from the generation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    /// Placeholder name → generated text.
    pub sections: HashMap<String, String>,
    pub cover_letter: String,
}

impl GenerationResult {
    /// Checks the shape of a raw JSON answer.
    ///
    /// Requires a `sections` object and a `cover_letter` (or `coverLetter`)
    /// string. A section given as a list of strings is joined with newlines;
    /// any other non-string section value is rejected.
    pub fn from_value(value: Value) -> Result<Self, String> {
        let mut object = match value {
            Value::Object(map) => map,
            other => return Err(format!("expected a JSON object, got {}", kind_of(&other))),
        };

        let sections = match object.remove("sections") {
            Some(Value::Object(map)) => map,
            Some(other) => {
                return Err(format!(
                    "`sections` must be an object, got {}",
                    kind_of(&other)
                ))
            }
            None => return Err("missing required key `sections`".to_string()),
        };

        let cover_letter = match object.remove("cover_letter") {
            Some(Value::Null) | None => object.remove("coverLetter"),
            found => found,
        };
        let cover_letter = match cover_letter {
            Some(Value::String(text)) => text,
            Some(other) => {
                return Err(format!(
                    "`cover_letter` must be a string, got {}",
                    kind_of(&other)
                ))
            }
            None => return Err("missing required key `cover_letter`".to_string()),
        };

        let sections = sections
            .into_iter()
            .map(|(name, value)| section_text(&name, value).map(|text| (name, text)))
            .collect::<Result<HashMap<_, _>, _>>()?;

        Ok(Self {
            sections,
            cover_letter,
        })
    }
}

fn section_text(name: &str, value: Value) -> Result<String, String> {
    match value {
        Value::String(text) => Ok(text),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(line) => Ok(line),
                other => Err(format!(
                    "section `{name}` list items must be strings, got {}",
                    kind_of(&other)
                )),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(|lines| lines.join("\n")),
        other => Err(format!(
            "section `{name}` must be a string, got {}",
            kind_of(&other)
        )),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Finished resume and cover letter.
#[derive(Debug, Clone, Serialize)]
pub struct RewriteOutcome {
    pub resume: String,
    pub cover_letter: String,
    /// Template variables the service did not fill; they remain as literal
    /// `{name}` spans in `resume`.
    pub missing_sections: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Rewrite pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs one rewrite against the given generation backend.
pub async fn rewrite_resume(
    generator: &dyn ContentGenerator,
    request: &RewriteRequest,
) -> Result<RewriteOutcome, RewriteError> {
    let parsed = parse(&request.format_template)?;

    let generation_request = GenerationRequest::new(
        &parsed,
        &request.original_resume,
        &request.job_description,
        &request.candidate_statement,
    );
    info!(
        "Requesting {} generated sections ({} placeholders in template)",
        generation_request.sections.len(),
        parsed.variables.len()
    );

    let raw = generator.generate(&generation_request).await?;

    let result = GenerationResult::from_value(raw).map_err(|reason| {
        warn!("Rejected generation result: {reason}");
        RewriteError::MalformedResult(reason)
    })?;

    let resume = render(&request.format_template, &result.sections);

    let missing_sections = missing_variables(&parsed.variables, &result.sections);
    if !missing_sections.is_empty() {
        warn!(
            "Generation result left {} sections unfilled: {}",
            missing_sections.len(),
            missing_sections.join(", ")
        );
    }

    Ok(RewriteOutcome {
        resume,
        cover_letter: result.cover_letter,
        missing_sections,
    })
}
