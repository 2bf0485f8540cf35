//! Base plugin trait definition.
//!
//! Every pluggable collaborator of the extraction pipeline implements `Plugin`,
//! which provides lifecycle management and metadata.

use crate::Result;

/// Lifecycle and identity shared by all plugins.
///
/// Plugins are shared as `Arc<dyn Trait>` and must be `Send + Sync`.
pub trait Plugin: Send + Sync {
    /// Unique, lowercase, kebab-case name of the plugin (e.g. `"tesseract-cli"`).
    fn name(&self) -> &str;

    fn version(&self) -> String;

    /// Called once before the plugin is first used.
    ///
    /// Return an error if a required external resource (library, executable,
    /// language data) is missing.
    fn initialize(&self) -> Result<()>;

    fn shutdown(&self) -> Result<()>;

    fn description(&self) -> &str {
        ""
    }
}
