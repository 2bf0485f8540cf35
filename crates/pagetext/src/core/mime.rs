//! MIME type detection and the PDF-only input gate.

use crate::{PagetextError, Result};
use std::path::Path;

pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Message returned for any input that is not a PDF.
pub const ONLY_PDF_MESSAGE: &str = "Only PDF files are allowed";

/// Detect MIME type from a file path.
///
/// # Errors
///
/// Returns `PagetextError::Validation` if the MIME type cannot be determined
/// from the extension.
pub fn detect_mime_type(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();

    let extension = path.extension().and_then(|ext| ext.to_str()).map(|s| s.to_lowercase());
    if extension.as_deref() == Some("pdf") {
        return Ok(PDF_MIME_TYPE.to_string());
    }

    if let Some(mime) = mime_guess::from_path(path).first() {
        return Ok(mime.to_string());
    }

    Err(PagetextError::validation(format!(
        "Could not determine MIME type from file path: {}",
        path.display()
    )))
}

/// Reject anything that is not named like a PDF, before extraction starts.
pub fn validate_pdf_path(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    match detect_mime_type(path) {
        Ok(mime) if mime == PDF_MIME_TYPE => Ok(()),
        Ok(mime) => {
            tracing::debug!("Rejecting {} ({})", path.display(), mime);
            Err(PagetextError::validation(ONLY_PDF_MESSAGE))
        }
        Err(_) => Err(PagetextError::validation(ONLY_PDF_MESSAGE)),
    }
}
