//! Plain-text export of a finished rewrite.

use serde::Deserialize;

const RULE_WIDTH: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportKind {
    Resume,
    CoverLetter,
    /// Resume and cover letter in one file.
    Package,
}

impl ExportKind {
    pub fn file_name(self) -> &'static str {
        match self {
            ExportKind::Resume => "rewritten_resume.txt",
            ExportKind::CoverLetter => "cover_letter.txt",
            ExportKind::Package => "application_package.txt",
        }
    }

    pub fn body(self, resume: &str, cover_letter: &str) -> String {
        match self {
            ExportKind::Resume => resume.to_string(),
            ExportKind::CoverLetter => cover_letter.to_string(),
            ExportKind::Package => application_package(resume, cover_letter),
        }
    }
}

pub fn application_package(resume: &str, cover_letter: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!("RESUME\n{rule}\n\n{resume}\n\n\nCOVER LETTER\n{rule}\n\n{cover_letter}")
}
