use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Cursor;

use crate::{PagetextError, Result};

/// Which strategy produced the text of an [`ExtractionResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractionSource {
    /// Text embedded in the PDF's content streams.
    SelectableText,
    /// Local OCR of rendered page images.
    Ocr,
    /// Text substituted afterwards by a managed document-analysis service.
    CloudOcr,
}

impl ExtractionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionSource::SelectableText => "selectable-text",
            ExtractionSource::Ocr => "ocr",
            ExtractionSource::CloudOcr => "cloud-ocr",
        }
    }
}

impl fmt::Display for ExtractionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The text of one document plus the tag of the strategy that produced it.
///
/// `source` is only ever `SelectableText` when `text` is non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub text: String,
    pub source: ExtractionSource,
}

impl ExtractionResult {
    pub fn new(text: impl Into<String>, source: ExtractionSource) -> Self {
        Self {
            text: text.into(),
            source,
        }
    }
}

/// Recognized text of a single page, keyed by its zero-based index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    pub index: usize,
    pub text: String,
}

/// A rendered page: tightly packed RGB8 pixels, no alpha.
#[derive(Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl RasterImage {
    /// Build an image from raw RGB8 pixels, checking the buffer length.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 3;
        if pixels.len() != expected {
            return Err(PagetextError::validation(format!(
                "RGB buffer of {} bytes does not match {}x{} image ({} bytes expected)",
                pixels.len(),
                width,
                height,
                expected
            )));
        }
        Ok(Self { width, height, pixels })
    }

    pub fn from_rgb8(image: image::RgbImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            pixels: image.into_raw(),
        }
    }

    pub fn bytes_per_line(&self) -> u32 {
        self.width * 3
    }

    /// Encode the page as PNG, for engines that take image files.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let buffer = image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
            .ok_or_else(|| PagetextError::validation("RGB buffer is smaller than the image dimensions"))?;

        let mut png = Vec::new();
        buffer
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .map_err(|e| PagetextError::Other(format!("Failed to encode page image as PNG: {}", e)))?;
        Ok(png)
    }
}

impl fmt::Debug for RasterImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RasterImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pixels", &format_args!("[{} bytes]", self.pixels.len()))
            .finish()
    }
}

/// The persisted row for one processed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub file_name: String,
    pub extracted_text: String,
    pub ocr_source: ExtractionSource,
    pub created_at: DateTime<Utc>,
}

impl DocumentRecord {
    /// Build a record stamped with the current UTC time.
    pub fn new(file_name: impl Into<String>, result: &ExtractionResult) -> Self {
        Self {
            file_name: file_name.into(),
            extracted_text: result.text.clone(),
            ocr_source: result.source,
            created_at: Utc::now(),
        }
    }
}
