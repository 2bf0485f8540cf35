//! The PDF extraction orchestrator.
//!
//! Tries the embedded text layer first. When it is empty, every page is
//! rendered and recognized with OCR, and the page texts are framed into a
//! single result (see [`crate::text::pages`]).

use crate::core::config::{ExtractionConfig, OcrConfig};
use crate::ocr::normalize_page_text;
use crate::plugins::{OcrBackend, PageRasterizer, Plugin, RasterDocument, TextLayerExtractor};
use crate::text::pages::assemble_pages;
use crate::types::{ExtractionResult, ExtractionSource, PageText, RasterImage};
use crate::{PagetextError, Result};
use crossbeam_channel::RecvTimeoutError;
use once_cell::sync::OnceCell;
use rayon::prelude::*;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Pages slower than this are logged at warn level.
const SLOW_PAGE_THRESHOLD: Duration = Duration::from_secs(30);

/// Extracts text from PDFs, falling back to OCR page by page.
///
/// The three collaborators are pluggable; [`PdfExtractor::from_config`] wires
/// up lopdf, Pdfium and the configured Tesseract backend.
pub struct PdfExtractor {
    text_layer: Box<dyn TextLayerExtractor>,
    rasterizer: Box<dyn PageRasterizer>,
    ocr: Arc<dyn OcrBackend>,
    ocr_ready: OnceCell<()>,
}

impl PdfExtractor {
    pub fn new(
        text_layer: Box<dyn TextLayerExtractor>,
        rasterizer: Box<dyn PageRasterizer>,
        ocr: Arc<dyn OcrBackend>,
    ) -> Self {
        Self {
            text_layer,
            rasterizer,
            ocr,
            ocr_ready: OnceCell::new(),
        }
    }

    /// Build the default pipeline for `config`.
    ///
    /// Neither Pdfium nor Tesseract is touched until a document actually needs OCR.
    #[cfg(feature = "pdf")]
    pub fn from_config(config: &ExtractionConfig) -> Result<Self> {
        let ocr = crate::ocr::backend_from_config(&config.ocr)?;
        Ok(Self::new(
            Box::new(crate::pdf::LopdfTextExtractor::new()),
            Box::new(crate::pdf::PdfiumRasterizer::new()),
            ocr,
        ))
    }

    pub fn ocr_backend(&self) -> &Arc<dyn OcrBackend> {
        &self.ocr
    }

    /// Extract the text of one PDF.
    ///
    /// `document` identifies the input in error messages (usually its file name).
    ///
    /// # Errors
    ///
    /// - `Validation` if `config` is invalid
    /// - `DocumentOpen` if OCR is needed and the document cannot be opened
    /// - `PageRendering` / `PageRecognition` if any page fails; no partial text is returned
    pub fn extract(&self, pdf_bytes: &[u8], document: &str, config: &ExtractionConfig) -> Result<ExtractionResult> {
        config.validate()?;

        if config.force_ocr {
            tracing::debug!("force_ocr set, skipping text layer of {}", document);
        } else if let Some(text) = self.selectable_text(pdf_bytes) {
            tracing::debug!("Using selectable text of {} ({} chars)", document, text.len());
            return Ok(ExtractionResult::new(text, ExtractionSource::SelectableText));
        } else {
            tracing::debug!("No selectable text in {}, falling back to OCR", document);
        }

        let pages = self.recognize_document(pdf_bytes, document, config)?;
        Ok(ExtractionResult::new(assemble_pages(&pages), ExtractionSource::Ocr))
    }

    fn selectable_text(&self, pdf_bytes: &[u8]) -> Option<String> {
        self.text_layer
            .extract_text(pdf_bytes)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
    }

    /// Render and recognize every page, in page order.
    pub fn recognize_document(
        &self,
        pdf_bytes: &[u8],
        document: &str,
        config: &ExtractionConfig,
    ) -> Result<Vec<PageText>> {
        let handle = self
            .rasterizer
            .open(pdf_bytes)
            .map_err(|e| PagetextError::document_open(document, e))?;
        let page_count = handle.page_count();
        if page_count == 0 {
            return Ok(Vec::new());
        }

        self.ensure_ocr_ready(&config.ocr)?;
        tracing::debug!(
            "Running OCR ({}) on {} page(s) of {} at zoom {}",
            self.ocr.name(),
            page_count,
            document,
            config.zoom
        );

        if config.parallel_pages {
            self.recognize_parallel(handle.as_ref(), page_count, config)
        } else {
            (0..page_count)
                .map(|page_index| {
                    let image = render_page(handle.as_ref(), page_index, config.zoom)?;
                    recognize_page(&self.ocr, page_index, image, &config.ocr)
                })
                .collect()
        }
    }

    /// Initialize the OCR backend on first use and check it can read `config.language`.
    fn ensure_ocr_ready(&self, config: &OcrConfig) -> Result<()> {
        self.ocr_ready.get_or_try_init(|| {
            self.ocr.initialize()?;
            tracing::debug!("OCR backend {} ready: {}", self.ocr.name(), self.ocr.description());
            Ok::<(), PagetextError>(())
        })?;

        if !self.ocr.supports_language(&config.language) {
            return Err(PagetextError::validation(format!(
                "OCR backend '{}' does not support language '{}'",
                self.ocr.name(),
                config.language
            )));
        }
        Ok(())
    }

    /// Render pages in order and recognize them concurrently, one batch per
    /// round so that at most a thread pool's worth of images is held at once.
    fn recognize_parallel(
        &self,
        handle: &dyn RasterDocument,
        page_count: usize,
        config: &ExtractionConfig,
    ) -> Result<Vec<PageText>> {
        let batch_size = rayon::current_num_threads().max(1);
        let mut pages = Vec::with_capacity(page_count);

        let mut batch_start = 0;
        while batch_start < page_count {
            let batch_end = (batch_start + batch_size).min(page_count);
            let images = (batch_start..batch_end)
                .map(|page_index| Ok((page_index, render_page(handle, page_index, config.zoom)?)))
                .collect::<Result<Vec<(usize, RasterImage)>>>()?;

            let ocr = &self.ocr;
            let recognized = images
                .into_par_iter()
                .map(|(page_index, image)| recognize_page(ocr, page_index, image, &config.ocr))
                .collect::<Result<Vec<PageText>>>()?;

            pages.extend(recognized);
            batch_start = batch_end;
        }

        Ok(pages)
    }
}

impl Drop for PdfExtractor {
    fn drop(&mut self) {
        if self.ocr_ready.get().is_none() {
            return;
        }
        if let Err(e) = self.ocr.shutdown() {
            tracing::warn!("Failed to shut down OCR backend {}: {}", self.ocr.name(), e);
        }
    }
}

fn recognize_page(
    ocr: &Arc<dyn OcrBackend>,
    page_index: usize,
    image: RasterImage,
    config: &OcrConfig,
) -> Result<PageText> {
    let started = Instant::now();
    let raw = recognize_with_deadline(ocr, page_index, image, config)?;
    let elapsed = started.elapsed();

    if elapsed > SLOW_PAGE_THRESHOLD {
        tracing::warn!("OCR of page {} took {:.1}s", page_index + 1, elapsed.as_secs_f64());
    } else {
        tracing::debug!("OCR of page {} took {}ms", page_index + 1, elapsed.as_millis());
    }

    Ok(PageText {
        index: page_index,
        text: normalize_page_text(&raw),
    })
}

fn render_page(handle: &dyn RasterDocument, page_index: usize, zoom: f32) -> Result<RasterImage> {
    handle.render_page(page_index, zoom).map_err(|e| match e {
        PagetextError::PageRendering { .. } | PagetextError::MissingDependency(_) | PagetextError::Io(_) => e,
        other => PagetextError::PageRendering {
            page_index,
            message: other.to_string(),
        },
    })
}

/// Run one recognition, bounded by `config.page_timeout_secs`.
///
/// With a deadline the engine runs on its own thread. If the deadline passes
/// the page fails and the worker's eventual result is discarded.
fn recognize_with_deadline(
    ocr: &Arc<dyn OcrBackend>,
    page_index: usize,
    image: RasterImage,
    config: &OcrConfig,
) -> Result<String> {
    let Some(timeout_secs) = config.page_timeout_secs else {
        return ocr
            .recognize(&image, config)
            .map_err(|e| PagetextError::page_recognition_from(page_index, e));
    };

    let (tx, rx) = crossbeam_channel::bounded(1);
    let backend = Arc::clone(ocr);
    let worker_config = config.clone();

    std::thread::Builder::new()
        .name(format!("pagetext-ocr-{}", page_index + 1))
        .spawn(move || {
            let result = backend.recognize(&image, &worker_config);
            // The receiver is gone if the deadline already passed.
            let _ = tx.send(result);
        })
        .map_err(|e| PagetextError::page_recognition(page_index, format!("Failed to start OCR worker: {}", e)))?;

    match rx.recv_timeout(Duration::from_secs(timeout_secs)) {
        Ok(result) => result.map_err(|e| PagetextError::page_recognition_from(page_index, e)),
        Err(RecvTimeoutError::Timeout) => {
            tracing::warn!("OCR of page {} exceeded {}s deadline", page_index + 1, timeout_secs);
            Err(PagetextError::page_recognition(
                page_index,
                format!("OCR did not finish within {}s", timeout_secs),
            ))
        }
        Err(RecvTimeoutError::Disconnected) => Err(PagetextError::page_recognition(
            page_index,
            "OCR worker stopped without a result",
        )),
    }
}
