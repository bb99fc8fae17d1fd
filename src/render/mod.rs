// src/render/mod.rs
//! Format writers. Each takes the canonical document plus a template style
//! by value and produces a complete artifact; none of them touches the
//! filesystem.

pub mod docx;
pub mod html;
pub mod metrics;
pub mod pdf;

use serde::{Deserialize, Serialize};

/// Which of the two document layouts a writer should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Resume,
    CoverLetter,
}

impl DocumentKind {
    /// Filename component for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Resume => "resume",
            DocumentKind::CoverLetter => "cover_letter",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
