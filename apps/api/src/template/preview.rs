//! Preview helpers for template authoring. Not part of the generation contract.

use std::collections::HashMap;

use crate::template::parser::{display_label, parse};
use crate::template::substitution::render;
use crate::template::TemplateError;

/// Placeholders commonly used in resume templates.
pub const SUGGESTED_VARIABLES: &[&str] = &[
    "summary",
    "objective",
    "technical_skills",
    "core_competencies",
    "job_history",
    "work_experience",
    "education",
    "certifications",
    "projects",
    "achievements",
    "awards",
    "publications",
    "volunteer_experience",
    "additional_skills",
    "languages",
];

/// Fills each placeholder with `sample[name]`, or with
/// `[Sample <Label> Content]` when no sample is given.
pub fn preview(template: &str, sample: &HashMap<String, String>) -> Result<String, TemplateError> {
    let parsed = parse(template)?;

    let content: HashMap<String, String> = parsed
        .distinct_variables()
        .into_iter()
        .map(|name| {
            let text = sample
                .get(&name)
                .cloned()
                .unwrap_or_else(|| format!("[Sample {} Content]", display_label(&name)));
            (name, text)
        })
        .collect();

    Ok(render(template, &content))
}

/// Labels for every placeholder, in template order. Empty when the template is blank.
pub fn section_names(template: &str) -> Vec<String> {
    parse(template)
        .map(|parsed| parsed.variables.iter().map(|v| display_label(v)).collect())
        .unwrap_or_default()
}
