//! Plugin traits for the collaborators of the extraction pipeline.
//!
//! - [`Plugin`] - Base trait with lifecycle and metadata
//! - [`OcrBackend`] - Recognizes text on a rendered page
//! - [`TextLayerExtractor`] - Reads a PDF's embedded text
//! - [`PageRasterizer`] / [`RasterDocument`] - Render PDF pages to images
//!
//! OCR backends are stored as `Arc<dyn OcrBackend>` so they can be shared with
//! the worker threads that enforce page deadlines and parallel recognition.

mod ocr;
mod pdf;
mod traits;

pub use ocr::{OcrBackend, OcrBackendType};
pub use pdf::{PageRasterizer, RasterDocument, TextLayerExtractor};
pub use traits::Plugin;
