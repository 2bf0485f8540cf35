use super::bindings::bind_pdfium;
use super::error::{PdfError, Result};
use crate::plugins::{PageRasterizer, RasterDocument};
use crate::types::RasterImage;
use once_cell::unsync::OnceCell;
use pdfium_render::prelude::*;

pub const PDF_POINTS_PER_INCH: f64 = 72.0;

/// Default zoom: twice the native resolution, roughly 144 DPI.
pub const DEFAULT_ZOOM: f32 = 2.0;

/// DPI equivalent of rendering at `zoom`.
pub fn zoom_to_dpi(zoom: f32) -> f64 {
    zoom as f64 * PDF_POINTS_PER_INCH
}

/// Page rasterizer backed by the system Pdfium library.
///
/// Pdfium is bound on the first `open`, so constructing the rasterizer never
/// fails and documents with a text layer never need the library.
#[derive(Default)]
pub struct PdfiumRasterizer {
    pdfium: OnceCell<Pdfium>,
}

impl PdfiumRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    fn pdfium(&self) -> Result<&Pdfium> {
        self.pdfium.get_or_try_init(|| {
            let binding = bind_pdfium(PdfError::LibraryUnavailable, "page rendering")?;
            Ok(Pdfium::new(binding))
        })
    }

    pub fn open_document<'a>(&'a self, pdf_bytes: &'a [u8]) -> Result<PdfiumDocument<'a>> {
        let document = self.pdfium()?.load_pdf_from_byte_slice(pdf_bytes, None).map_err(|e| {
            let err_msg = e.to_string();
            if err_msg.contains("password") || err_msg.contains("Password") {
                PdfError::PasswordRequired
            } else {
                PdfError::InvalidPdf(err_msg)
            }
        })?;

        Ok(PdfiumDocument { document })
    }
}

impl PageRasterizer for PdfiumRasterizer {
    fn open<'a>(&'a self, pdf_bytes: &'a [u8]) -> crate::Result<Box<dyn RasterDocument + 'a>> {
        let document = self.open_document(pdf_bytes)?;
        Ok(Box::new(document))
    }
}

/// An open Pdfium document. Pdfium closes it when this is dropped.
pub struct PdfiumDocument<'a> {
    document: PdfDocument<'a>,
}

impl PdfiumDocument<'_> {
    pub fn render(&self, page_index: usize, zoom: f32) -> Result<RasterImage> {
        let index = u16::try_from(page_index).map_err(|_| PdfError::PageNotFound(page_index))?;
        let page = self
            .document
            .pages()
            .get(index)
            .map_err(|_| PdfError::PageNotFound(page_index))?;

        let config = PdfRenderConfig::new().scale_page_by_factor(zoom);

        let bitmap = page
            .render_with_config(&config)
            .map_err(|e| PdfError::RenderingFailed {
                page_index,
                message: format!("Failed to render page: {}", e),
            })?;

        let image = bitmap.as_image().into_rgb8();

        Ok(RasterImage::from_rgb8(image))
    }
}

impl RasterDocument for PdfiumDocument<'_> {
    fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    fn render_page(&self, page_index: usize, zoom: f32) -> crate::Result<RasterImage> {
        Ok(self.render(page_index, zoom)?)
    }
}
