//! Error types for pagetext.
//!
//! Every fallible operation in the crate returns [`PagetextError`]. The
//! variants follow the extraction pipeline's failure taxonomy:
//!
//! - `Validation` - input rejected before extraction starts (non-PDF file, bad config)
//! - `DocumentOpen` - the document cannot be parsed or rendered at all
//! - `PageRendering` - an opened document failed to render one of its pages
//! - `PageRecognition` - OCR failed (or timed out) on one page
//! - `Io` - file system errors, always bubbled up unchanged
//! - `MissingDependency` - pdfium or tesseract is not available
//!
//! A missing text layer is not an error: the selectable-text extractor reports it
//! as `None` and the orchestrator falls back to OCR.
//!
//! # Example
//!
//! ```rust
//! use pagetext::{PagetextError, Result};
//!
//! fn check_zoom(zoom: f32) -> Result<f32> {
//!     if !zoom.is_finite() || zoom <= 0.0 {
//!         return Err(PagetextError::validation(format!("Invalid zoom factor: {}", zoom)));
//!     }
//!     Ok(zoom)
//! }
//!
//! assert!(check_zoom(2.0).is_ok());
//! assert!(check_zoom(0.0).is_err());
//! ```
use thiserror::Error;

/// Result type alias using `PagetextError`.
pub type Result<T> = std::result::Result<T, PagetextError>;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for all pagetext operations.
#[derive(Debug, Error)]
pub enum PagetextError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("Failed to open document '{document}': {message}")]
    DocumentOpen {
        document: String,
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("Failed to render page {page_index}: {message}")]
    PageRendering { page_index: usize, message: String },

    #[error("OCR failed on page {page_index}: {message}")]
    PageRecognition {
        page_index: usize,
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("Missing dependency: {0}")]
    MissingDependency(String),

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for PagetextError {
    fn from(err: serde_json::Error) -> Self {
        PagetextError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<toml::de::Error> for PagetextError {
    fn from(err: toml::de::Error) -> Self {
        PagetextError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_yaml_ng::Error> for PagetextError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        PagetextError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<crate::ocr::error::OcrError> for PagetextError {
    fn from(err: crate::ocr::error::OcrError) -> Self {
        match err {
            crate::ocr::error::OcrError::NotInstalled(msg) => PagetextError::MissingDependency(msg),
            other => PagetextError::Other(other.to_string()),
        }
    }
}

#[cfg(feature = "pdf")]
impl From<crate::pdf::error::PdfError> for PagetextError {
    fn from(err: crate::pdf::error::PdfError) -> Self {
        match err {
            crate::pdf::error::PdfError::LibraryUnavailable(msg) => PagetextError::MissingDependency(msg),
            crate::pdf::error::PdfError::RenderingFailed { page_index, message } => {
                PagetextError::PageRendering { page_index, message }
            }
            other => PagetextError::Other(other.to_string()),
        }
    }
}

macro_rules! error_constructor {
    ($name:ident, $variant:ident) => {
        pastey::paste! {
            #[doc = "Create a " $variant " error"]
            pub fn $name<S: Into<String>>(message: S) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: None,
                }
            }

            #[doc = "Create a " $variant " error with source"]
            pub fn [<$name _with_source>]<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
                message: S,
                source: E,
            ) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: Some(Box::new(source)),
                }
            }
        }
    };
}

impl PagetextError {
    error_constructor!(validation, Validation);
    error_constructor!(serialization, Serialization);

    /// Wrap a failure to open `document` as a fatal `DocumentOpen` error.
    ///
    /// Errors that already describe a missing pdfium library or an I/O problem
    /// are passed through untouched.
    pub fn document_open<S: Into<String>>(document: S, err: PagetextError) -> Self {
        match err {
            PagetextError::MissingDependency(_) | PagetextError::Io(_) | PagetextError::DocumentOpen { .. } => err,
            other => PagetextError::DocumentOpen {
                document: document.into(),
                message: other.to_string(),
                source: Some(Box::new(other)),
            },
        }
    }

    /// Create a `PageRecognition` error for the page at `page_index`.
    pub fn page_recognition<S: Into<String>>(page_index: usize, message: S) -> Self {
        PagetextError::PageRecognition {
            page_index,
            message: message.into(),
            source: None,
        }
    }

    /// Attribute an OCR backend failure to the page at `page_index`.
    pub fn page_recognition_from(page_index: usize, err: PagetextError) -> Self {
        match err {
            PagetextError::PageRecognition { .. } => err,
            other => PagetextError::PageRecognition {
                page_index,
                message: other.to_string(),
                source: Some(Box::new(other)),
            },
        }
    }
}
