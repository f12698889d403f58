//! Template Parser — splits a format template into sections and collects its placeholders.
//!
//! Template syntax:
//! - `---` divides the template into ordered sections.
//! - `{name}` marks a slot for generated text. `name` is any run of one or more
//!   characters other than `}`; it is not required to be identifier-like.
//!
//! There is no escape syntax. Stray braces in literal prose (currency, code
//! snippets) are captured as oddly-named placeholders, and a placeholder
//! written across a divider (`{na---me}`) is captured whole.

use serde::Serialize;

use crate::template::TemplateError;

/// Literal token separating sections.
pub const DIVIDER: &str = "---";

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Whether a section carries generated content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// No placeholders; copied to the output unchanged.
    Literal,
    /// At least one placeholder.
    Generated,
}

/// A slice of the template between dividers (or at its start/end).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub index: usize,
    /// Trimmed content; interior whitespace is untouched.
    pub content: String,
    /// Placeholder names found in this section, in order, duplicates kept.
    pub variables: Vec<String>,
}

impl Section {
    pub fn kind(&self) -> SectionKind {
        if self.variables.is_empty() {
            SectionKind::Literal
        } else {
            SectionKind::Generated
        }
    }

    pub fn is_blank(&self) -> bool {
        self.content.is_empty()
    }
}

/// Immutable, derived view of a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedTemplate {
    /// Every placeholder name in left-to-right order over the whole template.
    pub variables: Vec<String>,
    /// One entry per divider-separated slice; `len() == dividers + 1`.
    pub sections: Vec<Section>,
}

impl ParsedTemplate {
    /// Literal sections with content. Blank slices keep their slot in
    /// `sections` but are left out here.
    pub fn literal_sections(&self) -> impl Iterator<Item = &Section> {
        self.sections
            .iter()
            .filter(|s| s.kind() == SectionKind::Literal && !s.is_blank())
    }

    pub fn generated_sections(&self) -> impl Iterator<Item = &Section> {
        self.sections
            .iter()
            .filter(|s| s.kind() == SectionKind::Generated)
    }

    /// Variable names with duplicates removed, first occurrence wins.
    pub fn distinct_variables(&self) -> Vec<String> {
        let mut seen = Vec::with_capacity(self.variables.len());
        for name in &self.variables {
            if !seen.contains(name) {
                seen.push(name.clone());
            }
        }
        seen
    }

    pub fn has_duplicates(&self) -> bool {
        self.distinct_variables().len() != self.variables.len()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Parsing
// ────────────────────────────────────────────────────────────────────────────

/// Parses a format template.
///
/// Fails only when the template is blank. Everything else is accepted;
/// structural problems are reported by [`crate::template::validation::validate`].
pub fn parse(template: &str) -> Result<ParsedTemplate, TemplateError> {
    if template.trim().is_empty() {
        return Err(TemplateError::Empty);
    }

    let variables = scan_placeholders(template)
        .into_iter()
        .map(String::from)
        .collect();

    let sections = split_sections(template)
        .into_iter()
        .enumerate()
        .map(|(index, raw)| {
            let content = raw.trim();
            Section {
                index,
                content: content.to_string(),
                variables: scan_placeholders(content)
                    .into_iter()
                    .map(String::from)
                    .collect(),
            }
        })
        .collect();

    Ok(ParsedTemplate {
        variables,
        sections,
    })
}

/// Splits on every divider occurrence without trimming.
/// Joining the result with [`DIVIDER`] gives back the input exactly.
pub fn split_sections(template: &str) -> Vec<&str> {
    template.split(DIVIDER).collect()
}

/// Names of every non-overlapping `{name}` span, left to right.
///
/// An opening brace pairs with the next closing brace as long as at least one
/// character sits between them; that character run may include `{` and newlines.
pub fn scan_placeholders(text: &str) -> Vec<&str> {
    let mut found = Vec::new();
    let mut cursor = 0;

    while let Some(offset) = text[cursor..].find('{') {
        let open = cursor + offset;
        let name_start = open + 1;
        match text[name_start..].find('}') {
            Some(0) => cursor = name_start,
            Some(len) => {
                let close = name_start + len;
                found.push(&text[name_start..close]);
                cursor = close + 1;
            }
            // No closing brace anywhere after this point.
            None => break,
        }
    }

    found
}

/// Human-readable label for a placeholder: `job_history` → `Job History`.
///
/// Each alphabetic run starts upper-case and continues lower-case, so
/// `cv_2nd_page` becomes `Cv 2Nd Page`.
pub fn display_label(name: &str) -> String {
    let mut label = String::with_capacity(name.len());
    let mut prev_is_alpha = false;
    for c in name.replace('_', " ").chars() {
        if c.is_alphabetic() {
            if prev_is_alpha {
                label.extend(c.to_lowercase());
            } else {
                label.extend(c.to_uppercase());
            }
            prev_is_alpha = true;
        } else {
            label.push(c);
            prev_is_alpha = false;
        }
    }
    label
}
