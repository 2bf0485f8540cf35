//! Core extraction orchestration: configuration, input checks and entry points.
pub mod config;
pub mod extractor;
pub mod io;
pub mod mime;
