//! Native Tesseract OCR backend.
//!
//! Links Tesseract in-process through `kreuzberg-tesseract` and hands it the
//! rendered page's RGB buffer directly, with no intermediate image file.

use super::error::OcrError;
use super::tessdata::{resolve_tessdata_path, validate_languages};
use crate::Result;
use crate::core::config::OcrConfig;
use crate::plugins::{OcrBackend, OcrBackendType, Plugin};
use crate::types::RasterImage;
use kreuzberg_tesseract::{TessPageSegMode, TesseractAPI};
use std::path::PathBuf;

/// Native Tesseract OCR backend.
///
/// A fresh `TesseractAPI` is created per page, so the backend itself holds no
/// engine state and can be shared across threads.
pub struct TesseractBackend {
    tessdata: Option<PathBuf>,
}

impl TesseractBackend {
    pub fn new() -> Self {
        Self {
            tessdata: resolve_tessdata_path(),
        }
    }

    pub fn with_tessdata(tessdata: PathBuf) -> Self {
        Self {
            tessdata: Some(tessdata),
        }
    }

    fn run(&self, image: &RasterImage, config: &OcrConfig) -> std::result::Result<String, OcrError> {
        let tessdata_path = self
            .tessdata
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();

        // Tesseract can crash on a missing language file instead of returning an error.
        if let Some(tessdata) = &self.tessdata {
            validate_languages(tessdata, &config.language)?;
        } else if config.language.trim().is_empty() {
            return Err(OcrError::InvalidLanguageCode("Language cannot be empty".to_string()));
        }

        let api = TesseractAPI::new();
        api.init(&tessdata_path, &config.language).map_err(|e| {
            OcrError::TesseractInitializationFailed(format!(
                "Failed to initialize language '{}': {}",
                config.language, e
            ))
        })?;

        let psm_mode = TessPageSegMode::from_int(config.psm as i32);
        api.set_page_seg_mode(psm_mode)
            .map_err(|e| OcrError::InvalidConfiguration(format!("Failed to set PSM mode: {}", e)))?;

        api.set_image(
            &image.pixels,
            image.width as i32,
            image.height as i32,
            3,
            image.bytes_per_line() as i32,
        )
        .map_err(|e| OcrError::ImageProcessingFailed(format!("Failed to set image: {}", e)))?;

        api.recognize()
            .map_err(|e| OcrError::ProcessingFailed(format!("Failed to recognize text: {}", e)))?;

        api.get_utf8_text()
            .map_err(|e| OcrError::ProcessingFailed(format!("Failed to extract text: {}", e)))
    }
}

impl Default for TesseractBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for TesseractBackend {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn version(&self) -> String {
        TesseractAPI::version()
    }

    fn initialize(&self) -> Result<()> {
        match &self.tessdata {
            Some(path) => tracing::debug!("Tesseract {} using tessdata at {}", self.version(), path.display()),
            None => tracing::warn!("No tessdata directory found; set TESSDATA_PREFIX if OCR fails"),
        }
        Ok(())
    }

    fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    fn description(&self) -> &str {
        "Tesseract OCR linked in-process"
    }
}

impl OcrBackend for TesseractBackend {
    fn recognize(&self, image: &RasterImage, config: &OcrConfig) -> Result<String> {
        Ok(self.run(image, config)?)
    }

    fn backend_type(&self) -> OcrBackendType {
        OcrBackendType::Tesseract
    }

    fn supports_language(&self, lang: &str) -> bool {
        match &self.tessdata {
            Some(tessdata) => validate_languages(tessdata, lang).is_ok(),
            // Tesseract falls back to its compiled-in data path.
            None => !lang.trim().is_empty(),
        }
    }
}
