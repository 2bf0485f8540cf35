//! pagetext - PDF to plain text, with an OCR fallback for scanned documents.
//!
//! Extraction first reads the PDF's embedded (selectable) text. If there is
//! none, every page is rendered and recognized with Tesseract, and the page
//! texts are joined with `--- Page N ---` markers.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pagetext::{ExtractionConfig, ExtractionSource, extract_file_sync};
//!
//! # fn main() -> pagetext::Result<()> {
//! let config = ExtractionConfig::default();
//! let result = extract_file_sync("document.pdf", &config)?;
//! if result.source == ExtractionSource::Ocr {
//!     for (page, text) in pagetext::text::split_pages(&result.text) {
//!         println!("page {}: {}", page, text);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Core** (`core`): configuration, input validation, entry points
//! - **Extractors** (`extractors`): the text-layer/OCR decision pipeline
//! - **PDF** (`pdf`): lopdf text layer and Pdfium page rendering
//! - **OCR** (`ocr`): Tesseract backends
//! - **Plugins** (`plugins`): traits the pipeline's collaborators implement
//! - **Recorder** / **Cloud**: persistence and the managed-OCR extension point

#![deny(unsafe_code)]

pub mod cloud;
pub mod core;
pub mod error;
pub mod extractors;
pub mod ocr;
pub mod plugins;
pub mod recorder;
pub mod text;
pub mod types;

#[cfg(feature = "pdf")]
pub mod pdf;

pub use error::{PagetextError, Result};
pub use types::*;

pub use crate::core::config::{CloudOcrConfig, ExtractionConfig, OcrConfig};
pub use crate::core::extractor::{extract_and_record_with, extract_file_with};
pub use crate::core::mime::{PDF_MIME_TYPE, detect_mime_type, validate_pdf_path};
pub use extractors::PdfExtractor;
pub use recorder::{JsonLinesRecorder, ResultRecorder};

#[cfg(feature = "pdf")]
pub use crate::core::extractor::{extract_and_record, extract_bytes_sync, extract_file_sync};

#[cfg(all(feature = "pdf", feature = "tokio-runtime"))]
pub use crate::core::extractor::{extract_bytes, extract_file};
