//! Text assembly and segmentation for multi-page OCR output.
pub mod pages;

pub use pages::{assemble_pages, count_page_markers, page_marker, split_pages};
