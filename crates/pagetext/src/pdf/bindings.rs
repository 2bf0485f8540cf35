use super::error::PdfError;
use once_cell::sync::Lazy;
use pdfium_render::prelude::*;
use std::sync::Mutex;

/// Cached outcome of the first attempt to bind the system Pdfium library.
enum InitializationState {
    Uninitialized,
    Initialized,
    /// Initialization failed with this error message
    Failed(String),
}

/// Lazily initialized Pdfium state.
///
/// Pdfium is only bound on first use. A failed first attempt is remembered so
/// that every later extraction reports the same error without probing the
/// filesystem again.
///
/// We cache the initialization state rather than the bindings themselves, so
/// each caller gets fresh bindings without requiring `Clone` on
/// `Box<dyn PdfiumLibraryBindings>`.
static PDFIUM_STATE: Lazy<Mutex<InitializationState>> = Lazy::new(|| Mutex::new(InitializationState::Uninitialized));

fn bind_system_library(context: &str) -> std::result::Result<Box<dyn PdfiumLibraryBindings>, String> {
    Pdfium::bind_to_system_library().map_err(|e| format!("Failed to initialize Pdfium ({}): {}", context, e))
}

/// Get Pdfium bindings with lazy initialization.
///
/// # Arguments
///
/// * `map_err` - Function to map error strings to `PdfError` variants
/// * `context` - Context string for error reporting
pub(crate) fn bind_pdfium(
    map_err: fn(String) -> PdfError,
    context: &'static str,
) -> Result<Box<dyn PdfiumLibraryBindings>, PdfError> {
    let mut state = PDFIUM_STATE
        .lock()
        .map_err(|e| map_err(format!("Failed to acquire lock on Pdfium state ({}): {}", context, e)))?;

    match &*state {
        InitializationState::Uninitialized => match bind_system_library(context) {
            Ok(bindings) => {
                tracing::debug!("Pdfium bound to system library");
                *state = InitializationState::Initialized;
                Ok(bindings)
            }
            Err(err) => {
                tracing::warn!("{}", err);
                *state = InitializationState::Failed(err.clone());
                Err(map_err(err))
            }
        },
        InitializationState::Failed(err) => Err(map_err(format!(
            "Pdfium initialization previously failed ({}): {}",
            context, err
        ))),
        InitializationState::Initialized => bind_system_library(context).map_err(map_err),
    }
}
