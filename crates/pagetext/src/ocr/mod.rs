//! OCR engine adapters.
//!
//! Two Tesseract backends implement [`OcrBackend`](crate::plugins::OcrBackend):
//!
//! - `tesseract` - linked in-process (cargo feature `ocr`)
//! - `tesseract-cli` - the `tesseract` executable, one subprocess per page
//!
//! Without the `ocr` feature the name `tesseract` resolves to the executable.
pub mod error;
pub mod subprocess;
pub mod tessdata;
#[cfg(feature = "ocr")]
pub mod tesseract_backend;
pub mod utils;

use crate::core::config::OcrConfig;
use crate::plugins::OcrBackend;
use crate::{PagetextError, Result};
use std::sync::Arc;

pub use error::OcrError;
pub use subprocess::TesseractCliBackend;
#[cfg(feature = "ocr")]
pub use tesseract_backend::TesseractBackend;
pub use utils::{normalize_page_text, strip_control_characters};

/// Names accepted in `OcrConfig::backend`.
pub const KNOWN_BACKENDS: &[&str] = &["tesseract", "tesseract-cli"];

/// Build the OCR backend named by `config.backend`.
pub fn backend_from_config(config: &OcrConfig) -> Result<Arc<dyn OcrBackend>> {
    match config.backend.as_str() {
        #[cfg(feature = "ocr")]
        "tesseract" => Ok(Arc::new(TesseractBackend::new())),
        #[cfg(not(feature = "ocr"))]
        "tesseract" => Ok(Arc::new(TesseractCliBackend::new())),
        "tesseract-cli" => Ok(Arc::new(TesseractCliBackend::new())),
        other => Err(PagetextError::validation(format!(
            "Unknown OCR backend '{}'. Expected one of: {}",
            other,
            KNOWN_BACKENDS.join(", ")
        ))),
    }
}
