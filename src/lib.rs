// src/lib.rs
//! Document export pipeline: loose profile in, PDF/DOCX/HTML artifact out.
//!
//! The pipeline is pure and synchronous (normalize, resolve a template,
//! dispatch to a writer), with the filesystem touched only by
//! [`DocumentExporter::export_to_file`].

pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod normalizer;
pub mod render;
pub mod template_system;
pub mod types;
pub mod utils;

pub use config::ExportConfig;
pub use error::ExportError;
pub use generator::{derive_filename, DocumentExporter, ExportArtifact, ExportFormat};
pub use render::DocumentKind;
pub use template_system::{TemplateRegistry, TemplateStyle, DEFAULT_TEMPLATE};
pub use types::document::Document;
pub use types::form_data::RawFormState;

use std::path::PathBuf;

/// Convenience function for one-shot exports.
pub fn export_profile(
    raw: &RawFormState,
    format: ExportFormat,
    config: ExportConfig,
) -> Result<PathBuf, ExportError> {
    DocumentExporter::new(config).export_to_file(raw, format)
}
