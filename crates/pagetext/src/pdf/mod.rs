//! PDF access: selectable-text extraction and page rendering.
//!
//! - **Text layer**: `lopdf` reads embedded text from the content streams
//! - **Rendering**: `pdfium-render` rasterizes pages to RGB images for OCR
//!
//! # Example
//!
//! ```rust,no_run
//! use pagetext::pdf::{LopdfTextExtractor, PdfiumRasterizer};
//! use pagetext::plugins::{PageRasterizer, TextLayerExtractor};
//!
//! # fn example() -> pagetext::Result<()> {
//! let pdf_bytes = std::fs::read("document.pdf")?;
//!
//! if let Some(text) = LopdfTextExtractor::new().extract_text(&pdf_bytes) {
//!     println!("{}", text);
//! } else {
//!     let rasterizer = PdfiumRasterizer::new();
//!     let document = rasterizer.open(&pdf_bytes)?;
//!     let first_page = document.render_page(0, 2.0)?;
//!     println!("{}x{}", first_page.width, first_page.height);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! This module requires the `pdf` feature.
mod bindings;
pub mod error;
pub mod rendering;
pub mod text;

pub use error::PdfError;
pub use rendering::{DEFAULT_ZOOM, PdfiumDocument, PdfiumRasterizer, zoom_to_dpi};
pub use text::{LopdfTextExtractor, extract_text_from_pdf};
