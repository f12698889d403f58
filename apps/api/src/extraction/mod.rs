//! Document text extraction — turns an uploaded resume PDF into plain text.
//!
//! pdf-extract is synchronous and CPU-bound; callers on the async runtime must
//! run these functions inside `tokio::task::spawn_blocking`.

pub mod handlers;

use serde::Serialize;
use thiserror::Error;

use crate::models::report::ValidationReport;

/// Page count above which extraction is flagged as slow.
const MANY_PAGES: usize = 10;
/// File size above which the upload is flagged as very large.
const LARGE_FILE_BYTES: usize = 10 * 1024 * 1024;
/// Below this many characters the extracted text is flagged as thin.
const MIN_TEXT_CHARS: usize = 50;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("No document was uploaded")]
    Empty,

    #[error("Document could not be read: {0}")]
    Corrupt(String),

    #[error("PDF is encrypted. Please provide an unencrypted PDF.")]
    Encrypted,

    #[error("No text could be extracted from the PDF. The PDF might be image-based or corrupted.")]
    NoText,
}

/// Basic facts about an uploaded PDF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentInfo {
    pub page_count: usize,
    pub is_encrypted: bool,
    pub file_size: usize,
}

/// Loads the PDF structure without extracting text.
pub fn document_info(data: &[u8]) -> Result<DocumentInfo, ExtractionError> {
    if data.is_empty() {
        return Err(ExtractionError::Empty);
    }

    // pdf-extract re-exports Document from lopdf
    let doc = pdf_extract::Document::load_mem(data)
        .map_err(|e| ExtractionError::Corrupt(e.to_string()))?;

    Ok(DocumentInfo {
        page_count: doc.get_pages().len(),
        is_encrypted: doc.is_encrypted(),
        file_size: data.len(),
    })
}

/// Extracts and cleans the text of every page.
pub fn extract_text(data: &[u8]) -> Result<String, ExtractionError> {
    let info = document_info(data)?;
    if info.is_encrypted {
        return Err(ExtractionError::Encrypted);
    }

    let raw = pdf_extract::extract_text_from_mem(data)
        .map_err(|e| ExtractionError::Corrupt(e.to_string()))?;

    let text = clean_text(&raw);
    if text.is_empty() {
        return Err(ExtractionError::NoText);
    }

    Ok(text)
}

/// Trims every line and drops blank ones.
pub fn clean_text(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Checks whether a PDF is usable as resume input.
///
/// Never fails: problems land in the report. `info` is `None` when the
/// document could not be loaded at all.
pub fn validate_document(data: &[u8]) -> (Option<DocumentInfo>, ValidationReport) {
    let mut report = ValidationReport::default();

    let info = match document_info(data) {
        Ok(info) => info,
        Err(e) => {
            report.error(format!("PDF validation failed: {e}"));
            return (None, report);
        }
    };

    if info.is_encrypted {
        report.error("PDF is encrypted");
    }

    if info.page_count == 0 {
        report.error("PDF has no pages");
    } else if info.page_count > MANY_PAGES {
        report.warn("PDF has many pages - text extraction might be slow");
    }

    if info.file_size > LARGE_FILE_BYTES {
        report.warn("PDF file is very large");
    }

    if report.is_valid {
        match extract_text(data) {
            Ok(text) if text.chars().count() < MIN_TEXT_CHARS => {
                report.warn("PDF contains very little text");
            }
            Ok(_) => {}
            Err(e) => report.error(format!("Text extraction failed: {e}")),
        }
    }

    (Some(info), report)
}

#[cfg(test)]
mod tests {
    use pdf_extract::content::{Content, Operation};
    use pdf_extract::{dictionary, Document, Object, Stream};

    use super::*;

    /// One page per entry of `pages`, each showing that line in Courier.
    /// An empty entry gives a page with no text operators.
    fn build_pdf(pages: &[&str], encrypted: bool) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for line in pages {
            let operations = if line.is_empty() {
                Vec::new()
            } else {
                vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*line)]),
                    Operation::new("ET", vec![]),
                ]
            };
            let content = Content { operations };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        if encrypted {
            let encrypt_id = doc.add_object(dictionary! {
                "Filter" => "Standard",
                "V" => 1,
                "R" => 2,
            });
            doc.trailer.set("Encrypt", encrypt_id);
        }

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_clean_text_trims_and_drops_blank_lines() {
        let raw = "  JANE DOE  \n\n\n   Software Engineer\n\t\n\x0cExperience  \n";
        assert_eq!(clean_text(raw), "JANE DOE\nSoftware Engineer\nExperience");
    }

    #[test]
    fn test_clean_text_of_whitespace_is_empty() {
        assert_eq!(clean_text(" \n \r\n\t"), "");
    }

    #[test]
    fn test_empty_upload_is_rejected() {
        assert!(matches!(extract_text(&[]), Err(ExtractionError::Empty)));
    }

    #[test]
    fn test_garbage_bytes_are_corrupt() {
        let result = extract_text(b"this is definitely not a pdf");
        assert!(matches!(result, Err(ExtractionError::Corrupt(_))));
    }

    #[test]
    fn test_validate_unreadable_document() {
        let (info, report) = validate_document(b"%PDF-garbage");
        assert!(info.is_none());
        assert!(!report.is_valid);
        assert!(report.errors[0].starts_with("PDF validation failed"));
    }

    #[test]
    fn test_extracts_text_from_pdf() {
        let pdf = build_pdf(&["Jane Doe Resume"], false);
        let text = extract_text(&pdf).unwrap();
        assert!(text.contains("Jane"));
    }

    #[test]
    fn test_encrypted_pdf_is_rejected() {
        let pdf = build_pdf(&["Jane Doe Resume"], true);
        assert!(matches!(extract_text(&pdf), Err(ExtractionError::Encrypted)));

        let (info, report) = validate_document(&pdf);
        assert!(info.unwrap().is_encrypted);
        assert!(!report.is_valid);
        assert!(report.errors.iter().any(|e| e == "PDF is encrypted"));
    }

    #[test]
    fn test_pdf_without_text_is_rejected() {
        let pdf = build_pdf(&[""], false);
        assert!(matches!(extract_text(&pdf), Err(ExtractionError::NoText)));

        let (_, report) = validate_document(&pdf);
        assert!(!report.is_valid);
        assert!(report.errors[0].starts_with("Text extraction failed"));
    }

    #[test]
    fn test_validate_warns_on_many_pages() {
        let pages = ["Experienced Rust engineer with ten years"; 11];
        let pdf = build_pdf(&pages, false);

        let (info, report) = validate_document(&pdf);
        assert_eq!(info.unwrap().page_count, 11);
        assert!(report.is_valid);
        assert!(report
            .warnings
            .iter()
            .any(|w| w.starts_with("PDF has many pages")));
        assert!(!report
            .warnings
            .iter()
            .any(|w| w == "PDF contains very little text"));
    }

    #[test]
    fn test_validate_warns_on_little_text() {
        let pdf = build_pdf(&["Jane Doe"], false);

        let (info, report) = validate_document(&pdf);
        assert_eq!(info.unwrap().page_count, 1);
        assert!(report.is_valid);
        assert_eq!(report.warnings, vec!["PDF contains very little text"]);
    }
}
