//! Format templates: parsing, validation, preview and content substitution.
//!
//! Apart from the HTTP handlers, everything here is a pure function over
//! strings. Nothing is cached and no state is shared between calls.

pub mod handlers;
pub mod parser;
pub mod preview;
pub mod substitution;
pub mod validation;

use thiserror::Error;

pub use parser::{display_label, parse, ParsedTemplate};
pub use substitution::render;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Template cannot be empty")]
    Empty,

    #[error("Malformed template: {0}")]
    Malformed(String),
}
