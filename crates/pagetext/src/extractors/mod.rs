//! Built-in document extractors.
pub mod pdf;

pub use pdf::PdfExtractor;
