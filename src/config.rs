// src/config.rs
use chrono::{Local, NaiveDate};
use std::path::PathBuf;

use crate::render::DocumentKind;
use crate::template_system::DEFAULT_TEMPLATE;

/// Per-export configuration, passed by value into the exporter.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub kind: DocumentKind,
    pub template: String,
    pub output_dir: PathBuf,
    /// Date rendered on cover letters. Fixed at construction so repeated
    /// exports of the same profile produce the same output.
    pub reference_date: NaiveDate,
}

impl ExportConfig {
    pub fn new(kind: DocumentKind) -> Self {
        Self {
            kind,
            template: DEFAULT_TEMPLATE.to_string(),
            output_dir: PathBuf::from("output"),
            reference_date: Local::now().date_naive(),
        }
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = dir;
        self
    }

    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = date;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExportConfig::new(DocumentKind::Resume);
        assert_eq!(config.kind, DocumentKind::Resume);
        assert_eq!(config.template, DEFAULT_TEMPLATE);
        assert_eq!(config.output_dir, PathBuf::from("output"));
    }

    #[test]
    fn test_builder_chain() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let config = ExportConfig::new(DocumentKind::CoverLetter)
            .with_template("classic")
            .with_output_dir(PathBuf::from("/tmp/out"))
            .with_reference_date(date);
        assert_eq!(config.template, "classic");
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.reference_date, date);
    }
}
