//! Template validation — independent, non-short-circuiting structural checks.

use crate::models::report::ValidationReport;
use crate::template::parser::{parse, DIVIDER};
use crate::template::TemplateError;

/// Above this many placeholders the template gets a consolidation warning.
const MANY_VARIABLES: usize = 10;

/// Validates a template and reports every problem found.
///
/// Only a blank template is a hard failure. Unclosed braces are reported as
/// errors in the returned report; everything else is a warning.
pub fn validate(template: &str) -> Result<ValidationReport, TemplateError> {
    let parsed = parse(template)?;
    let mut report = ValidationReport::default();

    if parsed.variables.is_empty() {
        report.warn("Static template, no generated sections: the resume will be returned as written");
    }

    if parsed.variables.len() > MANY_VARIABLES {
        report.warn(format!(
            "Template has many variables ({}); consider consolidating",
            parsed.variables.len()
        ));
    }

    for line in unclosed_brace_lines(template) {
        report.error(format!("Malformed variable on line {line}: unclosed brace"));
    }

    if parsed.has_duplicates() {
        let mut repeated: Vec<&str> = Vec::new();
        for name in &parsed.variables {
            let count = parsed.variables.iter().filter(|v| *v == name).count();
            if count > 1 && !repeated.contains(&name.as_str()) {
                repeated.push(name);
            }
        }
        report.warn(format!(
            "Template contains duplicate variables ({}); every occurrence receives the same text",
            repeated.join(", ")
        ));
    }

    if !template.contains(DIVIDER) {
        report.warn(format!(
            "No section dividers found; consider using {DIVIDER} to structure the template"
        ));
    }

    Ok(report)
}

/// Turns a report with errors into [`TemplateError::Malformed`].
pub fn require_well_formed(report: ValidationReport) -> Result<ValidationReport, TemplateError> {
    if report.is_valid {
        Ok(report)
    } else {
        Err(TemplateError::Malformed(report.errors.join("; ")))
    }
}

/// 1-based line numbers of every `{` that reaches a newline or the end of
/// input before a `}`.
fn unclosed_brace_lines(template: &str) -> Vec<usize> {
    template
        .match_indices('{')
        .filter(|(open, _)| {
            let rest = &template[open + 1..];
            match rest.find(['}', '\n']) {
                Some(at) => rest[at..].starts_with('\n'),
                None => true,
            }
        })
        .map(|(open, _)| template[..open].matches('\n').count() + 1)
        .collect()
}
