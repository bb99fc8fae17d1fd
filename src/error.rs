// src/error.rs
use thiserror::Error;

/// Failures surfaced by the export pipeline.
///
/// Writer-internal library errors are flattened to strings here so nothing
/// format-specific leaks past the orchestrator boundary.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF generation failed: {0}")]
    Pdf(String),
    #[error("DOCX generation failed: {0}")]
    Docx(String),
}
