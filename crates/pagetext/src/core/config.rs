//! Configuration loading and management.
//!
//! Configuration is passed explicitly into every extraction call. It can be
//! built programmatically, loaded from TOML, YAML or JSON, or discovered as a
//! `pagetext.toml` in the current directory or one of its parents.

use crate::{PagetextError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name looked up by [`ExtractionConfig::discover`].
pub const CONFIG_FILE_NAME: &str = "pagetext.toml";

/// Highest Tesseract page segmentation mode.
pub const MAX_PSM: u8 = 13;

const DEADLINE_DISABLED_NOTE: &str = "\n# ocr.page_timeout_secs is unset: the per-page OCR deadline is disabled.\n\
# TOML cannot express this; use `page_timeout_secs: null` in YAML or JSON to keep it.\n";

/// Main extraction configuration.
///
/// # Example
///
/// ```rust
/// use pagetext::core::config::ExtractionConfig;
///
/// let config = ExtractionConfig::default();
/// assert_eq!(config.zoom, 2.0);
/// assert_eq!(config.ocr.language, "eng");
///
/// // let config = ExtractionConfig::from_toml_file("pagetext.toml")?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Render scale relative to 72 DPI (2.0 is about 144 DPI)
    #[serde(default = "default_zoom")]
    pub zoom: f32,

    /// Skip the selectable-text attempt and always OCR
    #[serde(default)]
    pub force_ocr: bool,

    /// Recognize pages concurrently (output order is unchanged)
    #[serde(default)]
    pub parallel_pages: bool,

    #[serde(default)]
    pub ocr: OcrConfig,

    /// Managed document-analysis service settings, used only by the cloud adapter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud: Option<CloudOcrConfig>,
}

/// OCR configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrConfig {
    /// OCR backend: tesseract, tesseract-cli
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Language code (e.g., "eng", "eng+deu")
    #[serde(default = "default_eng")]
    pub language: String,

    /// Tesseract page segmentation mode (0-13)
    #[serde(default = "default_psm")]
    pub psm: u8,

    /// Deadline for recognizing one page; `None` waits indefinitely
    #[serde(default = "default_page_timeout")]
    pub page_timeout_secs: Option<u64>,
}

/// Settings for the managed document-analysis service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudOcrConfig {
    #[serde(default = "default_region")]
    pub region: String,

    /// Bucket uploaded documents live in, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,

    /// Analysis features to request (e.g. "TABLES", "FORMS")
    #[serde(default = "default_feature_types")]
    pub feature_types: Vec<String>,
}

fn default_zoom() -> f32 {
    2.0
}

fn default_backend() -> String {
    "tesseract".to_string()
}

fn default_eng() -> String {
    "eng".to_string()
}

fn default_psm() -> u8 {
    3
}

fn default_page_timeout() -> Option<u64> {
    Some(120)
}

fn default_region() -> String {
    "ap-southeast-1".to_string()
}

fn default_feature_types() -> Vec<String> {
    vec!["TABLES".to_string(), "FORMS".to_string()]
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            zoom: default_zoom(),
            force_ocr: false,
            parallel_pages: false,
            ocr: OcrConfig::default(),
            cloud: None,
        }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            language: default_eng(),
            psm: default_psm(),
            page_timeout_secs: default_page_timeout(),
        }
    }
}

impl Default for CloudOcrConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            bucket: None,
            feature_types: default_feature_types(),
        }
    }
}

impl OcrConfig {
    /// Check the values an OCR backend relies on.
    pub fn validate(&self) -> Result<()> {
        if self.backend.trim().is_empty() {
            return Err(PagetextError::validation("OCR backend cannot be empty"));
        }
        if self.language.trim().is_empty() {
            return Err(PagetextError::validation(
                "OCR language cannot be empty. Please specify a valid language code (e.g., 'eng')",
            ));
        }
        if self.psm > MAX_PSM {
            return Err(PagetextError::validation(format!(
                "Invalid page segmentation mode {}: must be between 0 and {}",
                self.psm, MAX_PSM
            )));
        }
        if self.page_timeout_secs == Some(0) {
            return Err(PagetextError::validation(
                "page_timeout_secs must be greater than zero (omit it to disable the deadline)",
            ));
        }
        Ok(())
    }
}

impl ExtractionConfig {
    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !self.zoom.is_finite() || self.zoom <= 0.0 {
            return Err(PagetextError::validation(format!(
                "Invalid zoom factor {}: must be a finite number greater than zero",
                self.zoom
            )));
        }
        self.ocr.validate()
    }

    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            PagetextError::validation(format!("Failed to read config file {}: {}", path.as_ref().display(), e))
        })?;

        toml::from_str(&content)
            .map_err(|e| PagetextError::validation(format!("Invalid TOML in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            PagetextError::validation(format!("Failed to read config file {}: {}", path.as_ref().display(), e))
        })?;

        serde_yaml_ng::from_str(&content)
            .map_err(|e| PagetextError::validation(format!("Invalid YAML in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            PagetextError::validation(format!("Failed to read config file {}: {}", path.as_ref().display(), e))
        })?;

        serde_json::from_str(&content)
            .map_err(|e| PagetextError::validation(format!("Invalid JSON in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration, choosing the format from the file extension.
    ///
    /// `.yaml`/`.yml` and `.json` are recognized; anything else is read as TOML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Discover configuration file in parent directories.
    ///
    /// Searches for `pagetext.toml` in the current directory and its parents.
    ///
    /// # Returns
    ///
    /// - `Some(config)` if found
    /// - `None` if no config file found
    pub fn discover() -> Result<Option<Self>> {
        let current = std::env::current_dir().map_err(PagetextError::Io)?;
        Self::discover_from(&current)
    }

    /// Like [`discover`](Self::discover), starting at `start` instead of the current directory.
    pub fn discover_from(start: &Path) -> Result<Option<Self>> {
        let mut current = Some(start);

        while let Some(dir) = current {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if candidate.exists() {
                tracing::debug!("Using configuration from {}", candidate.display());
                return Ok(Some(Self::from_toml_file(candidate)?));
            }
            current = dir.parent();
        }

        Ok(None)
    }

    /// Render the configuration as TOML.
    ///
    /// TOML has no null, so a disabled OCR deadline cannot be written as a
    /// value; it is left out and flagged with a comment instead. Loading the
    /// output back restores the default deadline.
    pub fn to_toml_string(&self) -> Result<String> {
        let mut rendered = toml::to_string_pretty(self)
            .map_err(|e| PagetextError::serialization_with_source("Failed to serialize configuration as TOML", e))?;

        if self.ocr.page_timeout_secs.is_none() {
            rendered.push_str(DEADLINE_DISABLED_NOTE);
        }
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = ExtractionConfig::default();
        assert_eq!(config.zoom, 2.0);
        assert!(!config.force_ocr);
        assert!(!config.parallel_pages);
        assert_eq!(config.ocr.backend, "tesseract");
        assert_eq!(config.ocr.language, "eng");
        assert_eq!(config.ocr.psm, 3);
        assert_eq!(config.ocr.page_timeout_secs, Some(120));
        assert!(config.cloud.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cloud_defaults() {
        let cloud = CloudOcrConfig::default();
        assert_eq!(cloud.region, "ap-southeast-1");
        assert!(cloud.bucket.is_none());
        assert_eq!(cloud.feature_types, vec!["TABLES", "FORMS"]);
    }

    #[test]
    fn test_validate_rejects_bad_zoom() {
        for zoom in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let config = ExtractionConfig {
                zoom,
                ..ExtractionConfig::default()
            };
            assert!(config.validate().is_err(), "zoom {} should be rejected", zoom);
        }
    }

    #[test]
    fn test_validate_rejects_bad_ocr_settings() {
        let mut config = ExtractionConfig::default();
        config.ocr.language = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = ExtractionConfig::default();
        config.ocr.psm = 14;
        assert!(config.validate().is_err());

        let mut config = ExtractionConfig::default();
        config.ocr.page_timeout_secs = Some(0);
        assert!(config.validate().is_err());

        let mut config = ExtractionConfig::default();
        config.ocr.page_timeout_secs = None;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("pagetext.toml");
        fs::write(
            &config_path,
            r#"
zoom = 3.0
force_ocr = true

[ocr]
language = "deu"
psm = 6
"#,
        )
        .unwrap();

        let config = ExtractionConfig::from_toml_file(&config_path).unwrap();
        assert_eq!(config.zoom, 3.0);
        assert!(config.force_ocr);
        assert!(!config.parallel_pages);
        assert_eq!(config.ocr.language, "deu");
        assert_eq!(config.ocr.psm, 6);
        assert_eq!(config.ocr.backend, "tesseract");
        assert_eq!(config.ocr.page_timeout_secs, Some(120));
    }

    #[test]
    fn test_from_yaml_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.yaml");
        fs::write(
            &config_path,
            "parallel_pages: true\nocr:\n  backend: tesseract-cli\n  page_timeout_secs: null\ncloud:\n  bucket: uploads\n",
        )
        .unwrap();

        let config = ExtractionConfig::from_file(&config_path).unwrap();
        assert!(config.parallel_pages);
        assert_eq!(config.ocr.backend, "tesseract-cli");
        assert_eq!(config.ocr.page_timeout_secs, None);
        let cloud = config.cloud.unwrap();
        assert_eq!(cloud.bucket.as_deref(), Some("uploads"));
        assert_eq!(cloud.region, "ap-southeast-1");
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        fs::write(&config_path, r#"{"zoom": 1.5, "ocr": {"language": "eng+fra"}}"#).unwrap();

        let config = ExtractionConfig::from_file(&config_path).unwrap();
        assert_eq!(config.zoom, 1.5);
        assert_eq!(config.ocr.language, "eng+fra");
    }

    #[test]
    fn test_invalid_toml_is_validation_error() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("pagetext.toml");
        fs::write(&config_path, "zoom = [not valid").unwrap();

        let err = ExtractionConfig::from_toml_file(&config_path).unwrap_err();
        assert!(matches!(err, PagetextError::Validation { .. }));
    }

    #[test]
    fn test_discover_walks_up() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "zoom = 4.0\n").unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        let config = ExtractionConfig::discover_from(&nested).unwrap().unwrap();
        assert_eq!(config.zoom, 4.0);
    }

    #[test]
    fn test_discover_none() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("empty");
        fs::create_dir_all(&nested).unwrap();
        // A pagetext.toml further up the real filesystem would be picked up,
        // so only assert that lookup itself succeeds.
        assert!(ExtractionConfig::discover_from(&nested).is_ok());
    }

    #[test]
    fn test_to_toml_string_round_trips() {
        let config = ExtractionConfig {
            zoom: 1.5,
            parallel_pages: true,
            cloud: Some(CloudOcrConfig::default()),
            ..ExtractionConfig::default()
        };
        let rendered = config.to_toml_string().unwrap();
        assert!(rendered.contains("zoom = 1.5"));
        let parsed: ExtractionConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
        assert!(!rendered.contains("deadline is disabled"));
    }

    #[test]
    fn test_to_toml_string_flags_disabled_deadline() {
        let mut config = ExtractionConfig::default();
        config.ocr.page_timeout_secs = None;

        let rendered = config.to_toml_string().unwrap();

        assert!(!rendered.contains("page_timeout_secs ="));
        assert!(rendered.contains("# ocr.page_timeout_secs is unset: the per-page OCR deadline is disabled."));
        // The note is a comment, so the output still parses.
        let parsed: ExtractionConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.ocr.page_timeout_secs, OcrConfig::default().page_timeout_secs);
    }
}
