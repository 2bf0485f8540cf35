//! OCR through the `tesseract` executable.
//!
//! Each page is written to a temporary PNG and recognized with
//! `tesseract <png> stdout -l <lang> --psm <psm>`.

use super::error::OcrError;
use crate::Result;
use crate::core::config::OcrConfig;
use crate::plugins::{OcrBackend, OcrBackendType, Plugin};
use crate::types::RasterImage;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

pub const DEFAULT_TESSERACT_EXECUTABLE: &str = "tesseract";

pub struct TesseractCliBackend {
    executable: PathBuf,
}

impl TesseractCliBackend {
    pub fn new() -> Self {
        Self::with_executable(DEFAULT_TESSERACT_EXECUTABLE)
    }

    pub fn with_executable(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    fn tesseract_version(&self) -> std::result::Result<String, OcrError> {
        let output = Command::new(&self.executable)
            .arg("--version")
            .output()
            .map_err(|e| OcrError::NotInstalled(format!("{}: {}", self.executable.display(), e)))?;

        // Older releases print the version banner to stderr.
        let banner = if output.stdout.is_empty() {
            String::from_utf8_lossy(&output.stderr).into_owned()
        } else {
            String::from_utf8_lossy(&output.stdout).into_owned()
        };

        Ok(banner
            .lines()
            .next()
            .map(|line| line.trim().trim_start_matches("tesseract").trim().to_string())
            .unwrap_or_default())
    }

    fn run(&self, image: &RasterImage, config: &OcrConfig) -> std::result::Result<String, OcrError> {
        let png = image
            .to_png()
            .map_err(|e| OcrError::ImageProcessingFailed(e.to_string()))?;

        let mut file = tempfile::Builder::new()
            .prefix("pagetext-page-")
            .suffix(".png")
            .tempfile()
            .map_err(|e| OcrError::IOError(format!("Failed to create temporary page image: {}", e)))?;
        file.write_all(&png)
            .and_then(|_| file.flush())
            .map_err(|e| OcrError::IOError(format!("Failed to write temporary page image: {}", e)))?;

        let output = Command::new(&self.executable)
            .arg(file.path())
            .arg("stdout")
            .arg("-l")
            .arg(&config.language)
            .arg("--psm")
            .arg(config.psm.to_string())
            .output()
            .map_err(|e| OcrError::NotInstalled(format!("Failed to run {}: {}", self.executable.display(), e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::ProcessingFailed(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for TesseractCliBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for TesseractCliBackend {
    fn name(&self) -> &str {
        "tesseract-cli"
    }

    fn version(&self) -> String {
        self.tesseract_version().unwrap_or_else(|_| "unknown".to_string())
    }

    fn initialize(&self) -> Result<()> {
        let version = self.tesseract_version()?;
        tracing::debug!("Using {} {}", self.executable.display(), version);
        Ok(())
    }

    fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    fn description(&self) -> &str {
        "Tesseract OCR via the tesseract executable"
    }
}

impl OcrBackend for TesseractCliBackend {
    fn recognize(&self, image: &RasterImage, config: &OcrConfig) -> Result<String> {
        Ok(self.run(image, config)?)
    }

    fn backend_type(&self) -> OcrBackendType {
        OcrBackendType::TesseractCli
    }
}
