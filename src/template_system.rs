// src/template_system.rs
//! Visual template registry.
//!
//! A template resolves to a [`TemplateStyle`] descriptor (colors, typography,
//! spacing, layout) that all three writers consume by value. The set is
//! closed and built once at startup; unknown ids fall back to the default
//! template instead of erroring.

use serde::Serialize;
use tracing::debug;

pub const DEFAULT_TEMPLATE: &str = "modern";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateStyle {
    pub id: String,
    pub color_scheme: ColorScheme,
    pub typography: Typography,
    pub spacing: Spacing,
    pub layout: Layout,
}

/// Colors as `#RRGGBB` hex strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorScheme {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Typography {
    pub family: FontFamily,
    pub sizes: FontSizes,
}

/// Point sizes for the four text roles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontSizes {
    pub name: f32,
    pub heading: f32,
    pub body: f32,
    pub small: f32,
}

/// Gaps in millimetres; the HTML and DOCX writers scale them to their units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Spacing {
    pub section_gap: f32,
    pub item_gap: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub columns: u8,
    pub header_style: HeaderStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    Sans,
    Serif,
}

impl FontFamily {
    pub fn html_stack(&self) -> &'static str {
        match self {
            FontFamily::Sans => "Helvetica, Arial, sans-serif",
            FontFamily::Serif => "'Times New Roman', Georgia, serif",
        }
    }

    pub fn docx_name(&self) -> &'static str {
        match self {
            FontFamily::Sans => "Arial",
            FontFamily::Serif => "Times New Roman",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderStyle {
    /// Name on a full-width rule in the primary color.
    Banner,
    /// Name with a thin rule under the contact line.
    Underline,
    /// Name and contact line only.
    Plain,
}

/// Parse `#RRGGBB` into unit-interval RGB. Malformed input renders black
/// rather than erroring; the registry only ships well-formed values.
pub fn hex_to_rgb(hex: &str) -> (f32, f32, f32) {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return (0.0, 0.0, 0.0);
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).unwrap_or(0) as f32 / 255.0
    };
    (channel(0..2), channel(2..4), channel(4..6))
}

pub struct TemplateRegistry {
    templates: Vec<TemplateEntry>,
}

struct TemplateEntry {
    id: &'static str,
    description: &'static str,
    style: TemplateStyle,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self {
            templates: vec![
                TemplateEntry {
                    id: "modern",
                    description: "Blue banner header, sans-serif",
                    style: TemplateStyle {
                        id: "modern".to_string(),
                        color_scheme: ColorScheme {
                            primary: "#2563EB".to_string(),
                            secondary: "#64748B".to_string(),
                            accent: "#0EA5E9".to_string(),
                            text: "#1E293B".to_string(),
                        },
                        typography: Typography {
                            family: FontFamily::Sans,
                            sizes: FontSizes {
                                name: 22.0,
                                heading: 13.0,
                                body: 10.0,
                                small: 9.0,
                            },
                        },
                        spacing: Spacing {
                            section_gap: 7.0,
                            item_gap: 4.0,
                        },
                        layout: Layout {
                            columns: 1,
                            header_style: HeaderStyle::Banner,
                        },
                    },
                },
                TemplateEntry {
                    id: "minimal",
                    description: "Grayscale, tight spacing",
                    style: TemplateStyle {
                        id: "minimal".to_string(),
                        color_scheme: ColorScheme {
                            primary: "#111827".to_string(),
                            secondary: "#6B7280".to_string(),
                            accent: "#9CA3AF".to_string(),
                            text: "#111827".to_string(),
                        },
                        typography: Typography {
                            family: FontFamily::Sans,
                            sizes: FontSizes {
                                name: 19.0,
                                heading: 11.5,
                                body: 9.5,
                                small: 8.5,
                            },
                        },
                        spacing: Spacing {
                            section_gap: 5.0,
                            item_gap: 3.0,
                        },
                        layout: Layout {
                            columns: 1,
                            header_style: HeaderStyle::Plain,
                        },
                    },
                },
                TemplateEntry {
                    id: "professional",
                    description: "Navy and gold, serif",
                    style: TemplateStyle {
                        id: "professional".to_string(),
                        color_scheme: ColorScheme {
                            primary: "#1F3A5F".to_string(),
                            secondary: "#5B6B82".to_string(),
                            accent: "#B08D44".to_string(),
                            text: "#22272E".to_string(),
                        },
                        typography: Typography {
                            family: FontFamily::Serif,
                            sizes: FontSizes {
                                name: 21.0,
                                heading: 12.5,
                                body: 10.0,
                                small: 9.0,
                            },
                        },
                        spacing: Spacing {
                            section_gap: 7.0,
                            item_gap: 4.0,
                        },
                        layout: Layout {
                            columns: 1,
                            header_style: HeaderStyle::Underline,
                        },
                    },
                },
                TemplateEntry {
                    id: "classic",
                    description: "Black on white, serif",
                    style: TemplateStyle {
                        id: "classic".to_string(),
                        color_scheme: ColorScheme {
                            primary: "#1A1A1A".to_string(),
                            secondary: "#4D4D4D".to_string(),
                            accent: "#1A1A1A".to_string(),
                            text: "#1A1A1A".to_string(),
                        },
                        typography: Typography {
                            family: FontFamily::Serif,
                            sizes: FontSizes {
                                name: 20.0,
                                heading: 12.0,
                                body: 10.0,
                                small: 9.0,
                            },
                        },
                        spacing: Spacing {
                            section_gap: 6.0,
                            item_gap: 4.0,
                        },
                        layout: Layout {
                            columns: 1,
                            header_style: HeaderStyle::Underline,
                        },
                    },
                },
            ],
        }
    }

    /// Resolve a template id, falling back to the default for unknown ids.
    pub fn get(&self, template_id: &str) -> &TemplateStyle {
        let requested = template_id.trim().to_lowercase();
        if let Some(entry) = self.templates.iter().find(|t| t.id == requested) {
            return &entry.style;
        }
        debug!(
            "Unknown template id '{}', falling back to '{}'",
            template_id, DEFAULT_TEMPLATE
        );
        &self
            .templates
            .iter()
            .find(|t| t.id == DEFAULT_TEMPLATE)
            .expect("registry always contains the default template")
            .style
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.templates.iter().map(|t| t.id).collect()
    }

    pub fn description(&self, template_id: &str) -> Option<&'static str> {
        self.templates
            .iter()
            .find(|t| t.id == template_id)
            .map(|t| t.description)
    }

    pub fn exists(&self, template_id: &str) -> bool {
        let requested = template_id.trim().to_lowercase();
        self.templates.iter().any(|t| t.id == requested)
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_ids_resolve() {
        let registry = TemplateRegistry::new();
        for id in ["modern", "minimal", "professional", "classic"] {
            assert_eq!(registry.get(id).id, id);
            assert!(registry.exists(id));
        }
    }

    #[test]
    fn test_unknown_id_falls_back_to_default() {
        let registry = TemplateRegistry::new();
        assert_eq!(registry.get("doesnotexist"), registry.get(DEFAULT_TEMPLATE));
        assert!(!registry.exists("doesnotexist"));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = TemplateRegistry::new();
        assert_eq!(registry.get("Modern").id, "modern");
        assert_eq!(registry.get("  CLASSIC  ").id, "classic");
    }

    #[test]
    fn test_ids_lists_closed_set() {
        let registry = TemplateRegistry::new();
        assert_eq!(
            registry.ids(),
            vec!["modern", "minimal", "professional", "classic"]
        );
    }

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#FF0000"), (1.0, 0.0, 0.0));
        assert_eq!(hex_to_rgb("000000"), (0.0, 0.0, 0.0));
        let (r, g, b) = hex_to_rgb("#2563EB");
        assert!((r - 37.0 / 255.0).abs() < 1e-6);
        assert!((g - 99.0 / 255.0).abs() < 1e-6);
        assert!((b - 235.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_hex_to_rgb_malformed_is_black() {
        assert_eq!(hex_to_rgb("nope"), (0.0, 0.0, 0.0));
        assert_eq!(hex_to_rgb("#12345"), (0.0, 0.0, 0.0));
    }
}
