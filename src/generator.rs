// src/generator.rs
//! Export orchestrator.
//!
//! Normalizes the raw profile, resolves the template, dispatches to the
//! matching writer, and derives the artifact filename. Writer failures stop
//! here: they are logged and surfaced as a single error, nothing is retried,
//! and no partial file ever reaches the output directory.

use std::fs;
use std::path::PathBuf;

use tracing::{error, info};

use crate::config::ExportConfig;
use crate::error::ExportError;
use crate::normalizer::normalize;
use crate::render::html::render_html;
use crate::render::pdf::render_pdf;
use crate::render::{docx::render_docx, DocumentKind};
use crate::template_system::TemplateRegistry;
use crate::types::document::{Document, Personal};
use crate::types::form_data::RawFormState;
use crate::utils::sanitize_name_part;

/// Target format for one export invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Docx,
    Html,
}

impl ExportFormat {
    /// Parse a format string. Unknown values yield `None`; per the error
    /// policy the caller logs and ignores them rather than failing.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "pdf" => Some(ExportFormat::Pdf),
            "docx" => Some(ExportFormat::Docx),
            "html" => Some(ExportFormat::Html),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
            ExportFormat::Html => "html",
        }
    }
}

/// A finished export: filename plus artifact bytes.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Derive `{first}_{last}_{kind}.{ext}`, lowercased and sanitized, falling
/// back to `{kind}.{ext}` when both name parts are absent. Profiles without
/// a name deliberately collide on the same filename.
pub fn derive_filename(personal: &Personal, kind: DocumentKind, format: ExportFormat) -> String {
    let mut parts: Vec<String> = Vec::new();
    for raw in [&personal.first_name, &personal.last_name] {
        let cleaned = sanitize_name_part(raw.trim());
        if !cleaned.is_empty() {
            parts.push(cleaned);
        }
    }
    parts.push(kind.as_str().to_string());
    format!("{}.{}", parts.join("_"), format.extension())
}

pub struct DocumentExporter {
    pub config: ExportConfig,
    registry: TemplateRegistry,
}

impl DocumentExporter {
    pub fn new(config: ExportConfig) -> Self {
        Self {
            config,
            registry: TemplateRegistry::new(),
        }
    }

    /// Run the full pipeline and return the artifact without touching the
    /// filesystem.
    pub fn export(
        &self,
        raw: &RawFormState,
        format: ExportFormat,
    ) -> Result<ExportArtifact, ExportError> {
        let document = normalize(raw);
        self.export_document(&document, format)
    }

    /// Export an already-normalized document.
    pub fn export_document(
        &self,
        document: &Document,
        format: ExportFormat,
    ) -> Result<ExportArtifact, ExportError> {
        let style = self.registry.get(&self.config.template);
        let kind = self.config.kind;
        info!(
            "Exporting {} as {} with template '{}'",
            kind,
            format.extension(),
            style.id
        );

        let result = match format {
            ExportFormat::Pdf => render_pdf(document, style, kind, self.config.reference_date),
            ExportFormat::Docx => render_docx(document, style, kind, self.config.reference_date),
            ExportFormat::Html => {
                Ok(render_html(document, style, kind, self.config.reference_date).into_bytes())
            }
        };

        let bytes = match result {
            Ok(bytes) => bytes,
            Err(e) => {
                error!("{} export failed: {}", format.extension(), e);
                return Err(e);
            }
        };

        let filename = derive_filename(&document.personal, kind, format);
        info!("Rendered {} ({} bytes)", filename, bytes.len());
        Ok(ExportArtifact { filename, bytes })
    }

    /// Export and write the artifact into the configured output directory.
    pub fn export_to_file(
        &self,
        raw: &RawFormState,
        format: ExportFormat,
    ) -> Result<PathBuf, ExportError> {
        let artifact = self.export(raw, format)?;
        fs::create_dir_all(&self.config.output_dir)?;
        let path = self.config.output_dir.join(&artifact.filename);
        fs::write(&path, &artifact.bytes)?;
        info!("Wrote {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn config(kind: DocumentKind) -> ExportConfig {
        ExportConfig::new(kind)
            .with_reference_date(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap())
    }

    fn raw_profile() -> RawFormState {
        serde_json::from_value(json!({
            "personal": { "firstName": "Jane", "lastName": "Doe" },
            "experience": [{
                "position": "Engineer",
                "company": "Acme",
                "startDate": "2020-01",
                "current": true,
                "description": "Built things.",
                "achievements": ["Shipped X"]
            }],
            "skills": ["Go"]
        }))
        .unwrap()
    }

    #[test]
    fn test_format_parse() {
        assert_eq!(ExportFormat::parse("pdf"), Some(ExportFormat::Pdf));
        assert_eq!(ExportFormat::parse(" DOCX "), Some(ExportFormat::Docx));
        assert_eq!(ExportFormat::parse("html"), Some(ExportFormat::Html));
        assert_eq!(ExportFormat::parse("odt"), None);
        assert_eq!(ExportFormat::parse(""), None);
    }

    #[test]
    fn test_filename_derivation() {
        let personal = Personal {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            ..Default::default()
        };
        assert_eq!(
            derive_filename(&personal, DocumentKind::Resume, ExportFormat::Pdf),
            "jane_doe_resume.pdf"
        );
        assert_eq!(
            derive_filename(&personal, DocumentKind::CoverLetter, ExportFormat::Docx),
            "jane_doe_cover_letter.docx"
        );
    }

    #[test]
    fn test_filename_fallback_without_name() {
        let personal = Personal::default();
        assert_eq!(
            derive_filename(&personal, DocumentKind::Resume, ExportFormat::Pdf),
            "resume.pdf"
        );
        assert_eq!(
            derive_filename(&personal, DocumentKind::Resume, ExportFormat::Html),
            "resume.html"
        );
    }

    #[test]
    fn test_filename_single_part_name() {
        let personal = Personal {
            first_name: "Jane".to_string(),
            ..Default::default()
        };
        assert_eq!(
            derive_filename(&personal, DocumentKind::Resume, ExportFormat::Pdf),
            "jane_resume.pdf"
        );
    }

    #[test]
    fn test_export_all_formats() {
        let exporter = DocumentExporter::new(config(DocumentKind::Resume));
        let raw = raw_profile();
        for format in [ExportFormat::Pdf, ExportFormat::Docx, ExportFormat::Html] {
            let artifact = exporter.export(&raw, format).unwrap();
            assert_eq!(
                artifact.filename,
                format!("jane_doe_resume.{}", format.extension())
            );
            assert!(!artifact.bytes.is_empty());
        }
    }

    #[test]
    fn test_unknown_template_falls_back() {
        let exporter = DocumentExporter::new(
            config(DocumentKind::Resume).with_template("doesnotexist"),
        );
        let html = exporter.export(&raw_profile(), ExportFormat::Html).unwrap();

        let default_exporter = DocumentExporter::new(config(DocumentKind::Resume));
        let default_html = default_exporter
            .export(&raw_profile(), ExportFormat::Html)
            .unwrap();
        assert_eq!(html.bytes, default_html.bytes);
    }

    #[test]
    fn test_html_export_idempotent() {
        let exporter = DocumentExporter::new(config(DocumentKind::Resume));
        let raw = raw_profile();
        let a = exporter.export(&raw, ExportFormat::Html).unwrap();
        let b = exporter.export(&raw, ExportFormat::Html).unwrap();
        assert_eq!(a.bytes, b.bytes);
        assert_eq!(a.filename, b.filename);
    }

    #[test]
    fn test_export_to_file_writes_artifact() {
        let dir = std::env::temp_dir().join("cvforge_generator_test");
        let _ = fs::remove_dir_all(&dir);
        let exporter = DocumentExporter::new(
            config(DocumentKind::Resume).with_output_dir(dir.clone()),
        );
        let path = exporter
            .export_to_file(&raw_profile(), ExportFormat::Html)
            .unwrap();
        assert_eq!(path, dir.join("jane_doe_resume.html"));
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("Engineer"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_cover_letter_export() {
        let raw: RawFormState = serde_json::from_value(json!({
            "personal": { "firstName": "Jane", "lastName": "Doe" },
            "coverLetter": {
                "jobDetails": { "company": "Acme", "hiringManager": "Sam Lee" },
                "content": "I would like to apply."
            }
        }))
        .unwrap();
        let exporter = DocumentExporter::new(config(DocumentKind::CoverLetter));
        let artifact = exporter.export(&raw, ExportFormat::Html).unwrap();
        assert_eq!(artifact.filename, "jane_doe_cover_letter.html");
        let html = String::from_utf8(artifact.bytes).unwrap();
        assert!(html.contains("Dear Sam Lee,"));
        assert!(html.contains("March 2, 2026"));
    }
}
