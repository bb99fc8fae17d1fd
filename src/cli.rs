// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::config::ExportConfig;
use crate::generator::{DocumentExporter, ExportFormat};
use crate::render::DocumentKind;
use crate::template_system::TemplateRegistry;
use crate::types::form_data::RawFormState;

#[derive(Parser)]
#[command(name = "cvforge")]
#[command(about = "Render resume and cover letter profiles to PDF, DOCX, or HTML")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Export a profile to the requested format
    Export {
        /// Profile file (.json or .toml)
        #[arg(long)]
        input: PathBuf,
        /// Target format: pdf, docx, or html
        #[arg(long)]
        format: String,
        #[arg(long, default_value = "modern")]
        template: String,
        /// Document kind: resume or cover-letter
        #[arg(long, default_value = "resume")]
        kind: String,
        #[arg(long, default_value = "output")]
        output: PathBuf,
    },
    /// List available templates
    Templates,
    /// Print the standalone HTML preview to stdout
    Preview {
        /// Profile file (.json or .toml)
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value = "modern")]
        template: String,
        /// Document kind: resume or cover-letter
        #[arg(long, default_value = "resume")]
        kind: String,
    },
}

/// Decode a profile file by extension; `.toml` is TOML, everything else JSON.
pub fn load_profile(path: &Path) -> Result<RawFormState> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile: {}", path.display()))?;

    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("toml"))
        .unwrap_or(false);

    if is_toml {
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML profile: {}", path.display()))
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON profile: {}", path.display()))
    }
}

fn parse_kind(value: &str) -> DocumentKind {
    match value.trim().to_lowercase().as_str() {
        "cover-letter" | "cover_letter" | "coverletter" | "letter" => DocumentKind::CoverLetter,
        "resume" | "cv" => DocumentKind::Resume,
        other => {
            warn!("Unknown document kind '{}', defaulting to resume", other);
            DocumentKind::Resume
        }
    }
}

pub fn handle_command(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Export {
            input,
            format,
            template,
            kind,
            output,
        } => {
            // Unsupported format strings are logged and ignored, not raised.
            let Some(format) = ExportFormat::parse(&format) else {
                warn!("Unsupported export format '{}', nothing to do", format);
                return Ok(());
            };

            let raw = load_profile(&input)?;
            let config = ExportConfig::new(parse_kind(&kind))
                .with_template(template)
                .with_output_dir(output);
            let exporter = DocumentExporter::new(config);

            match exporter.export_to_file(&raw, format) {
                Ok(path) => {
                    println!("✓ Exported to {}", path.display());
                    Ok(())
                }
                Err(e) => {
                    // Details are already in the log; the user gets the
                    // single failure signal.
                    anyhow::bail!("Export failed, try again ({})", e)
                }
            }
        }

        Command::Templates => {
            let registry = TemplateRegistry::new();
            for id in registry.ids() {
                match registry.description(id) {
                    Some(description) => println!("{:<14} {}", id, description),
                    None => println!("{}", id),
                }
            }
            Ok(())
        }

        Command::Preview { input, template, kind } => {
            let raw = load_profile(&input)?;
            let config = ExportConfig::new(parse_kind(&kind)).with_template(template);
            let exporter = DocumentExporter::new(config);
            let artifact = exporter.export(&raw, ExportFormat::Html)?;
            let html = String::from_utf8(artifact.bytes)
                .context("HTML renderer produced invalid UTF-8")?;
            println!("{}", html);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert_eq!(parse_kind("resume"), DocumentKind::Resume);
        assert_eq!(parse_kind("cover-letter"), DocumentKind::CoverLetter);
        assert_eq!(parse_kind("cover_letter"), DocumentKind::CoverLetter);
        assert_eq!(parse_kind("bogus"), DocumentKind::Resume);
    }

    #[test]
    fn test_load_profile_json_and_toml() {
        let dir = std::env::temp_dir().join("cvforge_cli_test");
        fs::create_dir_all(&dir).unwrap();

        let json_path = dir.join("profile.json");
        fs::write(&json_path, r#"{"personal": {"firstName": "Jane"}}"#).unwrap();
        let raw = load_profile(&json_path).unwrap();
        assert_eq!(
            raw.personal.unwrap().first_name.as_deref(),
            Some("Jane")
        );

        let toml_path = dir.join("profile.toml");
        fs::write(&toml_path, "[personal]\nfirstName = \"Jo\"\n").unwrap();
        let raw = load_profile(&toml_path).unwrap();
        assert_eq!(raw.personal.unwrap().first_name.as_deref(), Some("Jo"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_profile_missing_file_errors() {
        assert!(load_profile(Path::new("/nonexistent/profile.json")).is_err());
    }
}
