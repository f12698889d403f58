//! Content substitution — fills `{name}` slots with generated text.

use std::collections::HashMap;

/// Replaces every literal `{name}` in `template` with `content[name]`.
///
/// - Every occurrence of a repeated name receives the same text.
/// - Names in `content` that the template never mentions are ignored.
/// - Placeholders without an entry in `content` stay in the output verbatim.
/// - Inserted text is never re-scanned, so braces inside generated content
///   come through untouched.
///
/// The template is walked once. Where two names could match at the same
/// position the longer one wins, which keeps the output independent of map
/// iteration order.
pub fn render(template: &str, content: &HashMap<String, String>) -> String {
    let mut names: Vec<&str> = content
        .keys()
        .map(String::as_str)
        .filter(|name| !name.is_empty())
        .collect();
    names.sort_by_key(|name| std::cmp::Reverse(name.len()));

    let mut output = String::with_capacity(template.len());
    let mut cursor = 0;

    while let Some(offset) = template[cursor..].find('{') {
        let open = cursor + offset;
        output.push_str(&template[cursor..open]);

        let rest = &template[open + 1..];
        let matched = names
            .iter()
            .find(|name| rest.starts_with(**name) && rest[name.len()..].starts_with('}'));

        match matched {
            Some(name) => {
                output.push_str(&content[*name]);
                cursor = open + name.len() + 2;
            }
            None => {
                output.push('{');
                cursor = open + 1;
            }
        }
    }

    output.push_str(&template[cursor..]);
    output
}

/// Distinct names in `variables` that `content` does not supply.
/// These are left as literal `{name}` spans by [`render`].
pub fn missing_variables(variables: &[String], content: &HashMap<String, String>) -> Vec<String> {
    let mut missing: Vec<String> = Vec::new();
    for name in variables {
        if !content.contains_key(name) && !missing.contains(name) {
            missing.push(name.clone());
        }
    }
    missing
}
