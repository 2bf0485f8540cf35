//! Main extraction entry points.
//!
//! The synchronous functions run the whole pipeline on the calling thread.
//! The async functions (feature `tokio-runtime`) move that work onto Tokio's
//! blocking pool, since rendering and OCR are CPU-bound.
//!
//! # Example
//!
//! ```rust,no_run
//! use pagetext::{ExtractionConfig, extract_file_sync};
//!
//! # fn main() -> pagetext::Result<()> {
//! let config = ExtractionConfig::default();
//! let result = extract_file_sync("document.pdf", &config)?;
//! println!("{} ({})", result.text, result.source);
//! # Ok(())
//! # }
//! ```

use crate::core::config::ExtractionConfig;
use crate::extractors::PdfExtractor;
use crate::recorder::ResultRecorder;
use crate::types::{DocumentRecord, ExtractionResult};
use crate::{PagetextError, Result};
use std::path::Path;

/// Name used for documents that arrive as a byte buffer.
pub const BYTES_DOCUMENT_NAME: &str = "<bytes>";

/// Extract text from a PDF file with a caller-supplied extractor.
pub fn extract_file_with(
    extractor: &PdfExtractor,
    path: impl AsRef<Path>,
    config: &ExtractionConfig,
) -> Result<ExtractionResult> {
    use crate::core::{io, mime};

    let path = path.as_ref();

    mime::validate_pdf_path(path)?;
    io::validate_file_exists(path)?;

    let bytes = io::read_file_sync(path)?;
    extractor.extract(&bytes, &io::document_name(path), config)
}

/// Extract text from a PDF file.
///
/// # Errors
///
/// - `Validation` for non-PDF paths, missing files and invalid configuration
/// - `Io` when the file cannot be read
/// - `DocumentOpen`, `PageRendering`, `PageRecognition` from the pipeline
#[cfg(feature = "pdf")]
pub fn extract_file_sync(path: impl AsRef<Path>, config: &ExtractionConfig) -> Result<ExtractionResult> {
    config.validate()?;
    let extractor = PdfExtractor::from_config(config)?;
    extract_file_with(&extractor, path, config)
}

/// Extract text from PDF bytes.
#[cfg(feature = "pdf")]
pub fn extract_bytes_sync(content: &[u8], config: &ExtractionConfig) -> Result<ExtractionResult> {
    extract_named_bytes(content, BYTES_DOCUMENT_NAME, config)
}

#[cfg(feature = "pdf")]
fn extract_named_bytes(content: &[u8], document: &str, config: &ExtractionConfig) -> Result<ExtractionResult> {
    config.validate()?;
    let extractor = PdfExtractor::from_config(config)?;
    extractor.extract(content, document, config)
}

/// Extract text from a PDF file on Tokio's blocking pool.
#[cfg(all(feature = "pdf", feature = "tokio-runtime"))]
pub async fn extract_file(path: impl AsRef<Path>, config: &ExtractionConfig) -> Result<ExtractionResult> {
    use crate::core::{io, mime};

    let path = path.as_ref();
    mime::validate_pdf_path(path)?;
    io::validate_file_exists(path)?;

    let bytes = io::read_file_async(path).await?;
    let document = io::document_name(path);
    let config = config.clone();
    run_blocking(move || extract_named_bytes(&bytes, &document, &config)).await
}

/// Extract text from PDF bytes on Tokio's blocking pool.
#[cfg(all(feature = "pdf", feature = "tokio-runtime"))]
pub async fn extract_bytes(content: &[u8], config: &ExtractionConfig) -> Result<ExtractionResult> {
    let content = content.to_vec();
    let config = config.clone();
    run_blocking(move || extract_named_bytes(&content, BYTES_DOCUMENT_NAME, &config)).await
}

#[cfg(all(feature = "pdf", feature = "tokio-runtime"))]
async fn run_blocking<F>(task: F) -> Result<ExtractionResult>
where
    F: FnOnce() -> Result<ExtractionResult> + Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| PagetextError::Other(format!("Extraction task failed: {}", e)))?
}

/// Extract with `extractor` and record the outcome.
///
/// Nothing is recorded when extraction fails.
pub fn extract_and_record_with(
    extractor: &PdfExtractor,
    path: impl AsRef<Path>,
    config: &ExtractionConfig,
    recorder: &dyn ResultRecorder,
) -> Result<ExtractionResult> {
    let path = path.as_ref();
    let result = extract_file_with(extractor, path, config)?;
    recorder.record(&DocumentRecord::new(crate::core::io::document_name(path), &result))?;
    Ok(result)
}

/// Extract a PDF file and hand the result to `recorder`.
#[cfg(feature = "pdf")]
pub fn extract_and_record(
    path: impl AsRef<Path>,
    config: &ExtractionConfig,
    recorder: &dyn ResultRecorder,
) -> Result<ExtractionResult> {
    config.validate()?;
    let extractor = PdfExtractor::from_config(config)?;
    extract_and_record_with(&extractor, path, config, recorder)
}
