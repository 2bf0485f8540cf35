//! OCR backend plugin trait.

use crate::Result;
use crate::core::config::OcrConfig;
use crate::plugins::Plugin;
use crate::types::RasterImage;

/// OCR backend types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OcrBackendType {
    /// Tesseract linked in-process
    Tesseract,
    /// The `tesseract` executable, one subprocess per page
    TesseractCli,
    /// Custom/third-party OCR backend
    Custom,
}

/// Trait for OCR backend plugins.
///
/// A backend turns one rendered page into text. It is shared across worker
/// threads when pages are recognized in parallel or under a deadline, so it
/// must be `Send + Sync`.
///
/// # Example
///
/// ```rust
/// use pagetext::plugins::{OcrBackend, OcrBackendType, Plugin};
/// use pagetext::{OcrConfig, RasterImage, Result};
///
/// struct FixedText;
///
/// impl Plugin for FixedText {
///     fn name(&self) -> &str { "fixed" }
///     fn version(&self) -> String { "1.0.0".to_string() }
///     fn initialize(&self) -> Result<()> { Ok(()) }
///     fn shutdown(&self) -> Result<()> { Ok(()) }
/// }
///
/// impl OcrBackend for FixedText {
///     fn recognize(&self, _image: &RasterImage, _config: &OcrConfig) -> Result<String> {
///         Ok("Hello".to_string())
///     }
///
///     fn backend_type(&self) -> OcrBackendType {
///         OcrBackendType::Custom
///     }
/// }
/// ```
pub trait OcrBackend: Plugin {
    /// Recognize the text on one page image.
    ///
    /// Returns an empty string for a blank page. Any error is fatal for the
    /// page, and therefore for the document being extracted.
    fn recognize(&self, image: &RasterImage, config: &OcrConfig) -> Result<String>;

    fn backend_type(&self) -> OcrBackendType;

    /// Whether this backend can recognize `lang` (a Tesseract language code).
    fn supports_language(&self, _lang: &str) -> bool {
        true
    }
}
