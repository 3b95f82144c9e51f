//! Error types for docfill library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for docfill operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading, filling, saving or rendering
/// documents.
///
/// Template anomalies (unmatched block markers, data of the wrong shape) are
/// not errors: the engine leaves the markup untouched and carries on.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The template file does not exist.
    #[error("Template file '{}' not found", .0.display())]
    TemplateNotFound(PathBuf),

    /// The data file does not exist.
    #[error("Data file '{}' not found", .0.display())]
    DataNotFound(PathBuf),

    /// The data file parsed but does not have the expected shape.
    #[error("Invalid template data: {0}")]
    InvalidData(String),

    /// JSON syntax or structure error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No store handles the given file extension.
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// A store failed to decode or encode a document.
    #[error("Document store error: {0}")]
    Store(String),

    /// No external converter program could be located.
    #[error("No fixed-layout converter found (set DOCFILL_CONVERTER or install LibreOffice)")]
    ConverterNotFound,

    /// The external converter failed.
    #[error("Conversion failed: {0}")]
    Conversion(String),
}
