//! Test doubles and PDF fixtures shared by the integration tests.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use pagetext::plugins::{OcrBackend, OcrBackendType, PageRasterizer, Plugin, RasterDocument, TextLayerExtractor};
use pagetext::{OcrConfig, PagetextError, PdfExtractor, RasterImage, Result};
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Text layer that always reports the same text.
pub struct FixedTextLayer(pub Option<String>);

impl FixedTextLayer {
    pub fn empty() -> Self {
        Self(None)
    }

    pub fn with_text(text: &str) -> Self {
        Self(Some(text.to_string()))
    }
}

impl TextLayerExtractor for FixedTextLayer {
    fn extract_text(&self, _pdf_bytes: &[u8]) -> Option<String> {
        self.0.clone()
    }
}

/// Rasterizer whose pages are 1x1 images with the page index in the red channel.
///
/// `open_handles` tracks documents that have been opened and not yet dropped.
pub struct MockRasterizer {
    page_count: usize,
    open_error: Option<String>,
    fail_render_at: Option<usize>,
    pub open_handles: Arc<AtomicUsize>,
    pub opened: Arc<AtomicUsize>,
    pub zooms: Arc<Mutex<Vec<f32>>>,
}

impl MockRasterizer {
    pub fn with_pages(page_count: usize) -> Self {
        Self {
            page_count,
            open_error: None,
            fail_render_at: None,
            open_handles: Arc::new(AtomicUsize::new(0)),
            opened: Arc::new(AtomicUsize::new(0)),
            zooms: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn unopenable(message: &str) -> Self {
        Self {
            open_error: Some(message.to_string()),
            ..Self::with_pages(0)
        }
    }

    pub fn failing_render_at(mut self, page_index: usize) -> Self {
        self.fail_render_at = Some(page_index);
        self
    }
}

impl PageRasterizer for MockRasterizer {
    fn open<'a>(&'a self, _pdf_bytes: &'a [u8]) -> Result<Box<dyn RasterDocument + 'a>> {
        if let Some(message) = &self.open_error {
            return Err(PagetextError::Other(message.clone()));
        }
        self.opened.fetch_add(1, Ordering::SeqCst);
        self.open_handles.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockDocument {
            page_count: self.page_count,
            fail_render_at: self.fail_render_at,
            open_handles: Arc::clone(&self.open_handles),
            zooms: Arc::clone(&self.zooms),
        }))
    }
}

struct MockDocument {
    page_count: usize,
    fail_render_at: Option<usize>,
    open_handles: Arc<AtomicUsize>,
    zooms: Arc<Mutex<Vec<f32>>>,
}

impl RasterDocument for MockDocument {
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn render_page(&self, page_index: usize, zoom: f32) -> Result<RasterImage> {
        self.zooms.lock().unwrap().push(zoom);
        if self.fail_render_at == Some(page_index) {
            return Err(PagetextError::Other("corrupt page content stream".to_string()));
        }
        RasterImage::new(1, 1, vec![page_index as u8, 0, 0])
    }
}

impl Drop for MockDocument {
    fn drop(&mut self) {
        self.open_handles.fetch_sub(1, Ordering::SeqCst);
    }
}

/// OCR backend that answers with a scripted text per page index.
pub struct ScriptedOcr {
    page_texts: Vec<String>,
    slow_page: Option<(usize, Duration)>,
    fail_page: Option<usize>,
    init_error: Option<String>,
    languages: Option<Vec<String>>,
    pub initializations: AtomicUsize,
    pub shutdowns: AtomicUsize,
    pub recognitions: AtomicUsize,
}

impl ScriptedOcr {
    pub fn new(page_texts: &[&str]) -> Self {
        Self {
            page_texts: page_texts.iter().map(|text| text.to_string()).collect(),
            slow_page: None,
            fail_page: None,
            init_error: None,
            languages: None,
            initializations: AtomicUsize::new(0),
            shutdowns: AtomicUsize::new(0),
            recognitions: AtomicUsize::new(0),
        }
    }

    /// Text `Page N` for each of `count` pages.
    pub fn numbered(count: usize) -> Self {
        let texts: Vec<String> = (1..=count).map(|n| format!("Page {n} body")).collect();
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        Self::new(&refs)
    }

    pub fn slow_on(mut self, page_index: usize, delay: Duration) -> Self {
        self.slow_page = Some((page_index, delay));
        self
    }

    pub fn failing_on(mut self, page_index: usize) -> Self {
        self.fail_page = Some(page_index);
        self
    }

    /// `initialize` fails as if the engine were not installed.
    pub fn not_installed(mut self) -> Self {
        self.init_error = Some("tesseract: not found".to_string());
        self
    }

    pub fn with_languages(mut self, languages: &[&str]) -> Self {
        self.languages = Some(languages.iter().map(|lang| lang.to_string()).collect());
        self
    }

    pub fn recognitions(&self) -> usize {
        self.recognitions.load(Ordering::SeqCst)
    }

    pub fn initializations(&self) -> usize {
        self.initializations.load(Ordering::SeqCst)
    }

    pub fn shutdowns(&self) -> usize {
        self.shutdowns.load(Ordering::SeqCst)
    }
}

impl Plugin for ScriptedOcr {
    fn name(&self) -> &str {
        "scripted"
    }

    fn version(&self) -> String {
        "1.0.0".to_string()
    }

    fn initialize(&self) -> Result<()> {
        if let Some(message) = &self.init_error {
            return Err(PagetextError::MissingDependency(message.clone()));
        }
        self.initializations.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn shutdown(&self) -> Result<()> {
        self.shutdowns.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl OcrBackend for ScriptedOcr {
    fn recognize(&self, image: &RasterImage, _config: &OcrConfig) -> Result<String> {
        self.recognitions.fetch_add(1, Ordering::SeqCst);
        let page_index = image.pixels[0] as usize;

        if let Some((slow, delay)) = self.slow_page
            && slow == page_index
        {
            std::thread::sleep(delay);
        }
        if self.fail_page == Some(page_index) {
            return Err(PagetextError::Other("engine crashed".to_string()));
        }

        // Tesseract ends its output with a newline and a form feed.
        let text = self.page_texts.get(page_index).cloned().unwrap_or_default();
        Ok(format!("{text}\n\x0c"))
    }

    fn backend_type(&self) -> OcrBackendType {
        OcrBackendType::Custom
    }

    fn supports_language(&self, lang: &str) -> bool {
        match &self.languages {
            Some(languages) => languages.iter().any(|known| known == lang),
            None => true,
        }
    }
}

pub fn extractor_with(
    text_layer: FixedTextLayer,
    rasterizer: MockRasterizer,
    ocr: &Arc<ScriptedOcr>,
) -> PdfExtractor {
    let backend: Arc<dyn OcrBackend> = Arc::clone(ocr) as Arc<dyn OcrBackend>;
    PdfExtractor::new(Box::new(text_layer), Box::new(rasterizer), backend)
}

/// Build a PDF with one page per entry; empty entries produce pages without text.
pub fn pdf_with_page_texts(texts: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in texts {
        let operations = if text.is_empty() {
            Vec::new()
        } else {
            vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ]
        };
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}
