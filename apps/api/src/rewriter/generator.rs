//! Generation collaborator — the seam between the rewrite pipeline and the LLM.
//!
//! `AppState` holds an `Arc<dyn ContentGenerator>`. The default backend is
//! `LlmContentGenerator`; tests swap in stubs without touching the orchestrator.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::llm_client::prompts::{HONESTY_INSTRUCTION, JSON_ONLY_SYSTEM};
use crate::llm_client::{ChatParams, LlmClient, LlmError};
use crate::rewriter::prompts::{REWRITE_PROMPT_TEMPLATE, REWRITE_SYSTEM_TEMPLATE};
use crate::template::{display_label, render, ParsedTemplate};

/// Sampling parameters for rewrite calls.
pub const REWRITE_PARAMS: ChatParams = ChatParams {
    max_tokens: 2000,
    temperature: 0.7,
};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// One slot the generation service must fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionSpec {
    pub name: String,
    /// `job_history` → `Job History`
    pub label: String,
}

/// Everything the generation service needs for one rewrite. Built per call.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest<'a> {
    pub original_resume: &'a str,
    pub job_description: &'a str,
    pub candidate_statement: &'a str,
    /// Distinct template variables in first-seen order.
    pub sections: Vec<SectionSpec>,
}

impl<'a> GenerationRequest<'a> {
    pub fn new(
        parsed: &ParsedTemplate,
        original_resume: &'a str,
        job_description: &'a str,
        candidate_statement: &'a str,
    ) -> Self {
        let sections = parsed
            .distinct_variables()
            .into_iter()
            .map(|name| SectionSpec {
                label: display_label(&name),
                name,
            })
            .collect();

        Self {
            original_resume,
            job_description,
            candidate_statement,
            sections,
        }
    }

    pub fn variable_names(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.name.as_str()).collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Produces the raw JSON answer for a generation request.
///
/// Implementations report transport, auth, timeout and unparseable-output
/// failures as `LlmError`. Checking the shape of the returned object is the
/// orchestrator's job.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest<'_>) -> Result<Value, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// LlmContentGenerator — default implementation
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmContentGenerator {
    llm: LlmClient,
}

impl LlmContentGenerator {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ContentGenerator for LlmContentGenerator {
    async fn generate(&self, request: &GenerationRequest<'_>) -> Result<Value, LlmError> {
        let (system, prompt) = build_rewrite_prompts(request)?;
        self.llm.call_json(&prompt, &system, REWRITE_PARAMS).await
    }
}

/// Builds the (system, user) prompt pair for a rewrite.
fn build_rewrite_prompts(request: &GenerationRequest<'_>) -> Result<(String, String), LlmError> {
    let variables_json = serde_json::to_string(&request.variable_names())?;

    let labels: serde_json::Map<String, Value> = request
        .sections
        .iter()
        .map(|s| (s.name.clone(), Value::String(s.label.clone())))
        .collect();
    let labels_json = serde_json::to_string(&labels)?;

    let system = render(
        REWRITE_SYSTEM_TEMPLATE,
        &HashMap::from([
            ("honesty_instruction".to_string(), HONESTY_INSTRUCTION.to_string()),
            ("json_only".to_string(), JSON_ONLY_SYSTEM.to_string()),
            ("variables_json".to_string(), variables_json),
            ("labels_json".to_string(), labels_json),
        ]),
    );

    let prompt = render(
        REWRITE_PROMPT_TEMPLATE,
        &HashMap::from([
            ("original_resume".to_string(), request.original_resume.to_string()),
            ("job_description".to_string(), request.job_description.to_string()),
            (
                "candidate_statement".to_string(),
                request.candidate_statement.to_string(),
            ),
        ]),
    );

    Ok((system, prompt))
}

// ────────────────────────────────────────────────────────────────────────────
// Test doubles
// ────────────────────────────────────────────────────────────────────────────
