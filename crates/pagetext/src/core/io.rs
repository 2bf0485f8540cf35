//! File I/O utilities.

use crate::{PagetextError, Result};
use std::path::Path;

/// Read a file asynchronously.
///
/// # Errors
///
/// Returns `PagetextError::Io` for I/O errors (these always bubble up).
#[cfg(feature = "tokio-runtime")]
pub async fn read_file_async(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    tokio::fs::read(path.as_ref()).await.map_err(PagetextError::Io)
}

/// Read a file synchronously.
///
/// # Errors
///
/// Returns `PagetextError::Io` for I/O errors (these always bubble up).
pub fn read_file_sync(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    std::fs::read(path.as_ref()).map_err(PagetextError::Io)
}

/// Validate that a file exists.
///
/// # Errors
///
/// Returns `PagetextError::Validation` if file doesn't exist.
pub fn validate_file_exists(path: impl AsRef<Path>) -> Result<()> {
    if !path.as_ref().exists() {
        return Err(PagetextError::validation(format!(
            "File does not exist: {}",
            path.as_ref().display()
        )));
    }
    Ok(())
}

/// Name used to identify a document in errors and records.
pub fn document_name(path: impl AsRef<Path>) -> String {
    let path = path.as_ref();
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
