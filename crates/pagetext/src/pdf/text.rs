//! Selectable-text extraction.
//!
//! Embedded text is read with `lopdf` straight from the content streams. No
//! rendering library is involved, so this works even when Pdfium is absent.

use super::error::{PdfError, Result};
use crate::plugins::TextLayerExtractor;
use lopdf::Document;

/// Reads a PDF's text layer with lopdf.
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfTextExtractor;

impl LopdfTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextLayerExtractor for LopdfTextExtractor {
    fn extract_text(&self, pdf_bytes: &[u8]) -> Option<String> {
        match extract_text_from_pdf(pdf_bytes) {
            Ok(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    tracing::debug!("PDF has no selectable text");
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            Err(err) => {
                tracing::debug!("Selectable text unavailable: {}", err);
                None
            }
        }
    }
}

/// Extract the raw (untrimmed) text of every page, in page order.
pub fn extract_text_from_pdf(pdf_bytes: &[u8]) -> Result<String> {
    let document = Document::load_mem(pdf_bytes)?;

    if document.is_encrypted() {
        return Err(PdfError::PasswordRequired);
    }

    let pages = document.get_pages();
    let mut page_texts = Vec::with_capacity(pages.len());
    for page_number in pages.keys() {
        page_texts.push(document.extract_text(&[*page_number])?);
    }

    Ok(page_texts.join("\n"))
}
