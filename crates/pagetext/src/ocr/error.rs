use std::fmt;

/// OCR-specific errors.
#[derive(Debug, Clone)]
pub enum OcrError {
    NotInstalled(String),
    TesseractInitializationFailed(String),
    InvalidConfiguration(String),
    InvalidLanguageCode(String),
    ImageProcessingFailed(String),
    ProcessingFailed(String),
    IOError(String),
}

impl fmt::Display for OcrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInstalled(msg) => write!(f, "Tesseract is not installed: {}", msg),
            Self::TesseractInitializationFailed(msg) => {
                write!(f, "Tesseract initialization failed: {}", msg)
            }
            Self::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
            Self::InvalidLanguageCode(msg) => write!(f, "Invalid language code: {}", msg),
            Self::ImageProcessingFailed(msg) => write!(f, "Image processing failed: {}", msg),
            Self::ProcessingFailed(msg) => write!(f, "OCR processing failed: {}", msg),
            Self::IOError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for OcrError {}

// NOTE: No From<std::io::Error> impl - IO errors must bubble up unchanged
