//! Adapter interface for a managed document-analysis (cloud OCR) service.
//!
//! This is an extension point only: nothing here is called by the
//! extraction pipeline. A caller that wants the managed service's text
//! analyzes the document itself and substitutes the result with
//! [`apply_cloud_ocr`].

use crate::types::{ExtractionResult, ExtractionSource};
use crate::{PagetextError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

pub use crate::core::config::CloudOcrConfig;

const BUCKET_SCHEME: &str = "s3://";

/// Where the document to analyze lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentLocation {
    Local(PathBuf),
    Bucket { bucket: String, key: String },
}

impl DocumentLocation {
    /// Parse `s3://bucket/key` into a bucket location; anything else is a local path.
    pub fn parse(location: &str) -> Result<Self> {
        let Some(rest) = location.strip_prefix(BUCKET_SCHEME) else {
            return Ok(DocumentLocation::Local(PathBuf::from(location)));
        };

        match rest.split_once('/') {
            Some((bucket, key)) if !bucket.is_empty() && !key.is_empty() => Ok(DocumentLocation::Bucket {
                bucket: bucket.to_string(),
                key: key.to_string(),
            }),
            _ => Err(PagetextError::validation(format!(
                "Invalid bucket location '{}': expected s3://bucket/key",
                location
            ))),
        }
    }

    /// Place `file_name` in the configured bucket, or keep it local when none is set.
    pub fn for_upload(file_name: &str, config: &CloudOcrConfig) -> Self {
        match &config.bucket {
            Some(bucket) => DocumentLocation::Bucket {
                bucket: bucket.clone(),
                key: file_name.to_string(),
            },
            None => DocumentLocation::Local(PathBuf::from(file_name)),
        }
    }
}

impl fmt::Display for DocumentLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentLocation::Local(path) => write!(f, "{}", path.display()),
            DocumentLocation::Bucket { bucket, key } => write!(f, "{}{}/{}", BUCKET_SCHEME, bucket, key),
        }
    }
}

/// Kind of a block returned by the analysis service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockType {
    Page,
    Line,
    Word,
    Table,
    Cell,
    KeyValueSet,
    #[serde(other)]
    Other,
}

/// One block of the service's response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    pub block_type: BlockType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl TextBlock {
    pub fn line(text: impl Into<String>) -> Self {
        Self {
            block_type: BlockType::Line,
            text: Some(text.into()),
        }
    }
}

/// A managed document-analysis service.
pub trait CloudOcrService: Send + Sync {
    fn analyze(&self, location: &DocumentLocation, config: &CloudOcrConfig) -> Result<Vec<TextBlock>>;
}

/// Join the text of all `LINE` blocks with newlines, trimmed.
pub fn collect_line_text(blocks: &[TextBlock]) -> String {
    blocks
        .iter()
        .filter(|block| block.block_type == BlockType::Line)
        .filter_map(|block| block.text.as_deref())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Replace `result`'s text with the service's line text and tag it `cloud-ocr`.
///
/// On error `result` is untouched and the error is returned.
pub fn apply_cloud_ocr(
    result: &mut ExtractionResult,
    service: &dyn CloudOcrService,
    location: &DocumentLocation,
    config: &CloudOcrConfig,
) -> Result<()> {
    let blocks = service.analyze(location, config)?;
    tracing::debug!("Cloud OCR returned {} blocks for {}", blocks.len(), location);

    result.text = collect_line_text(&blocks);
    result.source = ExtractionSource::CloudOcr;
    Ok(())
}
