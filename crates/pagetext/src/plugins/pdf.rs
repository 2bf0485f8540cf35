//! Traits for the two PDF-facing collaborators of the extraction pipeline.
//!
//! Keeping them behind traits lets the orchestrator run against in-memory
//! doubles in tests.

use crate::Result;
use crate::types::RasterImage;

/// Pulls embedded (selectable) text out of a PDF without rendering it.
pub trait TextLayerExtractor: Send + Sync {
    /// Text of all pages in document order, trimmed.
    ///
    /// Returns `None` when the text layer is empty or whitespace-only, and
    /// also when the document cannot be parsed at all. This method never fails:
    /// a missing text layer only means the caller should fall back to OCR.
    fn extract_text(&self, pdf_bytes: &[u8]) -> Option<String>;
}

/// Opens PDFs for page rendering.
pub trait PageRasterizer {
    /// Open a document held in memory.
    ///
    /// A document that cannot be opened (corrupt, unsupported, password
    /// protected) is an error. The returned handle is released when dropped.
    fn open<'a>(&'a self, pdf_bytes: &'a [u8]) -> Result<Box<dyn RasterDocument + 'a>>;
}

/// An open document that can render its pages.
pub trait RasterDocument {
    fn page_count(&self) -> usize;

    /// Render the page at `page_index` (zero-based), scaled by `zoom` from the
    /// PDF's 72 points per inch.
    fn render_page(&self, page_index: usize, zoom: f32) -> Result<RasterImage>;
}
