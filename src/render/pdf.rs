// src/render/pdf.rs
//! Imperative PDF writer.
//!
//! Draws each block against printpdf's page API while tracking an explicit
//! vertical cursor. Before any block is emitted the writer checks that the
//! block's reserve fits above the bottom margin and otherwise opens a fresh
//! page and resets the cursor to the top margin; wrapped text re-checks the
//! threshold per line, so a paragraph can span a page break without clipping.

use std::io::BufWriter;

use chrono::NaiveDate;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rgb,
};

use crate::error::ExportError;
use crate::render::metrics::{metrics_for, CharMetrics, PT_TO_MM};
use crate::render::DocumentKind;
use crate::template_system::{hex_to_rgb, FontFamily, HeaderStyle, TemplateStyle};
use crate::types::document::{CoverLetter, Document};
use crate::utils::{date_range, join_nonempty};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const CONTENT_WIDTH_MM: f32 = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
const BULLET_INDENT_MM: f32 = 5.0;

// Reserves checked before a block starts; a heading must keep room for at
// least one following body line so it never strands at a page bottom.
const HEADING_RESERVE_MM: f32 = 14.0;
const ENTRY_RESERVE_MM: f32 = 10.0;

fn line_height_mm(font_size_pt: f32) -> f32 {
    font_size_pt * PT_TO_MM * 1.45
}

/// Render the document to PDF bytes.
pub fn render_pdf(
    doc: &Document,
    style: &TemplateStyle,
    kind: DocumentKind,
    letter_date: NaiveDate,
) -> Result<Vec<u8>, ExportError> {
    let title = match kind {
        DocumentKind::Resume => "Resume",
        DocumentKind::CoverLetter => "Cover Letter",
    };
    let (pdf, page, layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");

    let (regular_face, bold_face) = match style.typography.family {
        FontFamily::Sans => (BuiltinFont::Helvetica, BuiltinFont::HelveticaBold),
        FontFamily::Serif => (BuiltinFont::TimesRoman, BuiltinFont::TimesBold),
    };
    let regular = pdf
        .add_builtin_font(regular_face)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    let bold = pdf
        .add_builtin_font(bold_face)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    let layer = pdf.get_page(page).get_layer(layer);
    let mut writer = PdfWriter {
        pdf: &pdf,
        layer,
        regular,
        bold,
        style,
        metrics: metrics_for(style.typography.family),
        y: PAGE_HEIGHT_MM - MARGIN_MM,
    };

    match kind {
        DocumentKind::Resume => writer.write_resume(doc),
        DocumentKind::CoverLetter => writer.write_letter(doc, letter_date),
    }

    let mut buf: Vec<u8> = Vec::new();
    {
        let mut out = BufWriter::new(&mut buf);
        pdf.save(&mut out)
            .map_err(|e| ExportError::Pdf(e.to_string()))?;
    }
    Ok(buf)
}

struct PdfWriter<'a> {
    pdf: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    style: &'a TemplateStyle,
    metrics: &'static CharMetrics,
    /// Vertical cursor in millimetres from the page bottom.
    y: f32,
}

impl<'a> PdfWriter<'a> {
    fn new_page(&mut self) {
        let (page, layer) = self
            .pdf
            .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        self.layer = self.pdf.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT_MM - MARGIN_MM;
    }

    /// Page-break check performed before every block.
    fn ensure_space(&mut self, reserve_mm: f32) {
        if self.y - reserve_mm < MARGIN_MM {
            self.new_page();
        }
    }

    fn set_color(&self, hex: &str) {
        let (r, g, b) = hex_to_rgb(hex);
        self.layer.set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));
    }

    /// Draw one line at the cursor and advance it.
    fn text_line(&mut self, text: &str, size_pt: f32, bold: bool, hex: &str, x_mm: f32) {
        self.ensure_space(line_height_mm(size_pt));
        self.set_color(hex);
        let font = if bold { &self.bold } else { &self.regular };
        self.layer
            .use_text(text, size_pt, Mm(x_mm), Mm(self.y), font);
        self.y -= line_height_mm(size_pt);
    }

    fn text_line_centered(&mut self, text: &str, size_pt: f32, bold: bool, hex: &str) {
        let width = self.metrics.width_mm(text, size_pt);
        let x = ((PAGE_WIDTH_MM - width) / 2.0).max(MARGIN_MM);
        self.text_line(text, size_pt, bold, hex, x);
    }

    /// Wrap to the given width and emit line by line, re-checking the page
    /// threshold for each emitted line.
    fn text_wrapped(&mut self, text: &str, size_pt: f32, hex: &str, x_mm: f32, width_mm: f32) {
        for line in self.metrics.wrap(text, size_pt, width_mm) {
            self.text_line(&line, size_pt, false, hex, x_mm);
        }
    }

    fn rule(&mut self, from_x: f32, to_x: f32, thickness_pt: f32, hex: &str) {
        let (r, g, b) = hex_to_rgb(hex);
        self.layer
            .set_outline_color(Color::Rgb(Rgb::new(r, g, b, None)));
        self.layer.set_outline_thickness(thickness_pt);
        let line = Line {
            points: vec![
                (Point::new(Mm(from_x), Mm(self.y)), false),
                (Point::new(Mm(to_x), Mm(self.y)), false),
            ],
            is_closed: false,
        };
        self.layer.add_line(line);
    }

    // ===== Shared header =====

    fn write_header(&mut self, doc: &Document) {
        let sizes = &self.style.typography.sizes;
        let colors = &self.style.color_scheme;

        let name = doc.personal.full_name();
        if !name.is_empty() {
            self.text_line_centered(&name, sizes.name, true, &colors.primary);
        }

        let contact = doc.personal.contact_parts().join("  |  ");
        if !contact.is_empty() {
            self.text_line_centered(&contact, sizes.small, false, &colors.secondary);
        }

        if !doc.personal.links.is_empty() {
            let links: Vec<String> = doc
                .personal
                .links
                .iter()
                .map(|(platform, url)| format!("{}: {}", platform, url))
                .collect();
            self.text_line_centered(&links.join("  |  "), sizes.small, false, &colors.accent);
        }

        match self.style.layout.header_style {
            HeaderStyle::Banner => {
                self.rule(MARGIN_MM, PAGE_WIDTH_MM - MARGIN_MM, 1.2, &colors.primary);
                self.y -= 3.0;
            }
            HeaderStyle::Underline => {
                self.rule(MARGIN_MM, PAGE_WIDTH_MM - MARGIN_MM, 0.4, &colors.primary);
                self.y -= 3.0;
            }
            HeaderStyle::Plain => {}
        }
        self.y -= self.style.spacing.section_gap / 2.0;
    }

    fn section_heading(&mut self, title: &str) {
        let sizes = &self.style.typography.sizes;
        let colors = &self.style.color_scheme;
        self.ensure_space(HEADING_RESERVE_MM);
        self.y -= self.style.spacing.section_gap / 2.0;
        self.text_line(&title.to_uppercase(), sizes.heading, true, &colors.primary, MARGIN_MM);
        self.y += line_height_mm(sizes.heading) * 0.35;
        self.rule(MARGIN_MM, PAGE_WIDTH_MM - MARGIN_MM, 0.25, &colors.accent);
        self.y -= line_height_mm(sizes.heading) * 0.35;
    }

    /// Entry title on the left, date range right-aligned on the same line.
    fn entry_head(&mut self, title: &str, dates: &str) {
        let sizes = &self.style.typography.sizes;
        let colors = &self.style.color_scheme;
        self.ensure_space(ENTRY_RESERVE_MM);
        self.set_color(&colors.text);
        let line_y = self.y;
        self.layer
            .use_text(title, sizes.body, Mm(MARGIN_MM), Mm(line_y), &self.bold);
        if !dates.is_empty() {
            let width = self.metrics.width_mm(dates, sizes.small);
            self.set_color(&colors.secondary);
            self.layer.use_text(
                dates,
                sizes.small,
                Mm(PAGE_WIDTH_MM - MARGIN_MM - width),
                Mm(line_y),
                &self.regular,
            );
        }
        self.y -= line_height_mm(sizes.body);
    }

    fn bullets(&mut self, items: &[String]) {
        let sizes = &self.style.typography.sizes;
        let colors = &self.style.color_scheme;
        let wrap_width = CONTENT_WIDTH_MM - BULLET_INDENT_MM - 3.0;
        for item in items {
            let lines = self.metrics.wrap(item, sizes.body, wrap_width);
            for (i, line) in lines.iter().enumerate() {
                self.ensure_space(line_height_mm(sizes.body));
                self.set_color(&colors.text);
                if i == 0 {
                    self.layer.use_text(
                        "\u{2022}",
                        sizes.body,
                        Mm(MARGIN_MM + BULLET_INDENT_MM - 3.0),
                        Mm(self.y),
                        &self.regular,
                    );
                }
                self.layer.use_text(
                    line.as_str(),
                    sizes.body,
                    Mm(MARGIN_MM + BULLET_INDENT_MM),
                    Mm(self.y),
                    &self.regular,
                );
                self.y -= line_height_mm(sizes.body);
            }
        }
    }

    // ===== Resume layout =====

    fn write_resume(&mut self, doc: &Document) {
        let sizes = self.style.typography.sizes.clone();
        let colors = self.style.color_scheme.clone();
        let item_gap = self.style.spacing.item_gap;

        self.write_header(doc);

        if !doc.personal.summary.is_empty() {
            self.section_heading("Summary");
            self.text_wrapped(
                &doc.personal.summary,
                sizes.body,
                &colors.text,
                MARGIN_MM,
                CONTENT_WIDTH_MM,
            );
        }

        if !doc.experience.is_empty() {
            self.section_heading("Experience");
            for exp in &doc.experience {
                let dates = date_range(&exp.start_date, exp.end_date.as_deref(), exp.current);
                self.entry_head(&exp.position, &dates);
                let sub = join_nonempty(&[&exp.company, &exp.location], ", ");
                if !sub.is_empty() {
                    self.text_line(&sub, sizes.small, false, &colors.secondary, MARGIN_MM);
                }
                if !exp.description.is_empty() {
                    self.text_wrapped(
                        &exp.description,
                        sizes.body,
                        &colors.text,
                        MARGIN_MM,
                        CONTENT_WIDTH_MM,
                    );
                }
                self.bullets(&exp.achievements);
                self.y -= item_gap;
            }
        }

        if !doc.education.is_empty() {
            self.section_heading("Education");
            for edu in &doc.education {
                let degree = edu.degree_line();
                let title = if degree.is_empty() { &edu.school } else { &degree };
                let dates = date_range(&edu.start_date, edu.end_date.as_deref(), false);
                self.entry_head(title, &dates);
                if !degree.is_empty() && !edu.school.is_empty() {
                    self.text_line(&edu.school, sizes.small, false, &colors.secondary, MARGIN_MM);
                }
                if let Some(gpa) = &edu.gpa {
                    self.text_line(
                        &format!("GPA: {}", gpa),
                        sizes.small,
                        false,
                        &colors.secondary,
                        MARGIN_MM,
                    );
                }
                if !edu.description.is_empty() {
                    self.text_wrapped(
                        &edu.description,
                        sizes.body,
                        &colors.text,
                        MARGIN_MM,
                        CONTENT_WIDTH_MM,
                    );
                }
                self.bullets(&edu.achievements);
                self.y -= item_gap;
            }
        }

        if !doc.skills.is_empty() {
            self.section_heading("Skills");
            let labels: Vec<String> = doc
                .skills
                .iter()
                .map(|s| match &s.proficiency {
                    Some(level) => format!("{} ({})", s.name, level),
                    None => s.name.clone(),
                })
                .collect();
            self.text_wrapped(
                &labels.join("  \u{2022}  "),
                sizes.body,
                &colors.text,
                MARGIN_MM,
                CONTENT_WIDTH_MM,
            );
        }

        if !doc.languages.is_empty() {
            self.section_heading("Languages");
            let labels: Vec<String> = doc
                .languages
                .iter()
                .map(|l| match &l.proficiency {
                    Some(level) => format!("{} ({})", l.name, level),
                    None => l.name.clone(),
                })
                .collect();
            self.text_wrapped(
                &labels.join("  \u{2022}  "),
                sizes.body,
                &colors.text,
                MARGIN_MM,
                CONTENT_WIDTH_MM,
            );
        }

        if !doc.certifications.is_empty() {
            self.section_heading("Certifications");
            for cert in &doc.certifications {
                let dates = date_range(
                    cert.date.as_deref().unwrap_or_default(),
                    cert.expiry.as_deref(),
                    false,
                );
                self.entry_head(&cert.name, &dates);
                let mut sub_parts: Vec<String> = Vec::new();
                if !cert.issuer.is_empty() {
                    sub_parts.push(cert.issuer.clone());
                }
                if let Some(id) = &cert.credential_id {
                    sub_parts.push(format!("Credential {}", id));
                }
                if let Some(url) = &cert.url {
                    sub_parts.push(url.clone());
                }
                let sub = sub_parts.join("  |  ");
                if !sub.is_empty() {
                    self.text_line(&sub, sizes.small, false, &colors.secondary, MARGIN_MM);
                }
                self.y -= item_gap;
            }
        }

        if !doc.projects.is_empty() {
            self.section_heading("Projects");
            for project in &doc.projects {
                let dates = date_range(
                    project.start_date.as_deref().unwrap_or_default(),
                    project.end_date.as_deref(),
                    false,
                );
                self.entry_head(&project.name, &dates);
                if !project.technologies.is_empty() {
                    self.text_line(
                        &project.technologies.join(", "),
                        sizes.small,
                        false,
                        &colors.secondary,
                        MARGIN_MM,
                    );
                }
                if let Some(url) = &project.url {
                    self.text_line(url, sizes.small, false, &colors.accent, MARGIN_MM);
                }
                if !project.description.is_empty() {
                    self.text_wrapped(
                        &project.description,
                        sizes.body,
                        &colors.text,
                        MARGIN_MM,
                        CONTENT_WIDTH_MM,
                    );
                }
                self.bullets(&project.achievements);
                self.y -= item_gap;
            }
        }
    }

    // ===== Cover letter layout =====

    fn write_letter(&mut self, doc: &Document, letter_date: NaiveDate) {
        let sizes = self.style.typography.sizes.clone();
        let colors = self.style.color_scheme.clone();
        let empty = CoverLetter::default();
        let letter = doc.cover_letter.as_ref().unwrap_or(&empty);
        let details = &letter.job_details;

        self.write_header(doc);

        self.text_line(
            &letter_date.format("%B %-d, %Y").to_string(),
            sizes.body,
            false,
            &colors.text,
            MARGIN_MM,
        );
        self.y -= self.style.spacing.item_gap;

        if !details.hiring_manager.is_empty() {
            self.text_line(&details.hiring_manager, sizes.body, false, &colors.text, MARGIN_MM);
        }
        if !details.company.is_empty() {
            self.text_line(&details.company, sizes.body, false, &colors.text, MARGIN_MM);
        }
        if !details.hiring_manager.is_empty() || !details.company.is_empty() {
            self.y -= self.style.spacing.item_gap;
        }

        let greeting = if details.hiring_manager.is_empty() {
            "Dear Hiring Manager,".to_string()
        } else {
            format!("Dear {},", details.hiring_manager)
        };
        self.text_line(&greeting, sizes.body, false, &colors.text, MARGIN_MM);
        self.y -= self.style.spacing.item_gap / 2.0;

        for paragraph in letter
            .content
            .split('\n')
            .map(str::trim)
            .filter(|p| !p.is_empty())
        {
            self.text_wrapped(paragraph, sizes.body, &colors.text, MARGIN_MM, CONTENT_WIDTH_MM);
            self.y -= self.style.spacing.item_gap / 2.0;
        }

        self.y -= self.style.spacing.item_gap;
        self.text_line("Sincerely,", sizes.body, false, &colors.text, MARGIN_MM);
        let name = doc.personal.full_name();
        if !name.is_empty() {
            self.y -= self.style.spacing.item_gap;
            self.text_line(&name, sizes.body, true, &colors.text, MARGIN_MM);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template_system::TemplateRegistry;
    use crate::types::document::{Experience, Personal, Skill};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn count_occurrences(haystack: &[u8], needle: &[u8]) -> usize {
        if needle.is_empty() || haystack.len() < needle.len() {
            return 0;
        }
        haystack.windows(needle.len()).filter(|w| w == &needle).count()
    }

    /// Page objects carry `/Type /Page`; the page-tree node is `/Type /Pages`
    /// and must not be counted. The serializer may or may not separate the
    /// key and value with a space, so both spellings are counted.
    fn count_pages(bytes: &[u8]) -> usize {
        let page = count_occurrences(bytes, b"/Type /Page") + count_occurrences(bytes, b"/Type/Page");
        let pages = count_occurrences(bytes, b"/Type /Pages") + count_occurrences(bytes, b"/Type/Pages");
        page - pages
    }

    fn small_doc() -> Document {
        Document {
            personal: Personal {
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                email: "jane@example.com".to_string(),
                summary: "Engineer.".to_string(),
                ..Default::default()
            },
            skills: vec![Skill {
                name: "Go".to_string(),
                proficiency: None,
            }],
            ..Default::default()
        }
    }

    fn oversized_doc() -> Document {
        let description = "Designed, built, and operated a number of internal services \
                           with a focus on reliability and observability. "
            .repeat(4);
        let achievements: Vec<String> = (0..6)
            .map(|i| {
                format!(
                    "Achievement {i}: improved throughput of the ingestion pipeline by \
                     rewriting the hot path and adding backpressure"
                )
            })
            .collect();
        let mut doc = small_doc();
        doc.experience = (0..8)
            .map(|i| Experience {
                position: format!("Engineer {i}"),
                company: "Acme".to_string(),
                start_date: "2015-02".to_string(),
                end_date: Some("2019-11".to_string()),
                description: description.clone(),
                achievements: achievements.clone(),
                ..Default::default()
            })
            .collect();
        doc
    }

    #[test]
    fn test_single_page_for_small_document() {
        let registry = TemplateRegistry::new();
        let bytes = render_pdf(
            &small_doc(),
            registry.get("modern"),
            DocumentKind::Resume,
            date(),
        )
        .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert_eq!(count_pages(&bytes), 1);
    }

    #[test]
    fn test_pagination_boundary_adds_pages() {
        let registry = TemplateRegistry::new();
        let bytes = render_pdf(
            &oversized_doc(),
            registry.get("modern"),
            DocumentKind::Resume,
            date(),
        )
        .unwrap();
        assert!(
            count_pages(&bytes) > 1,
            "content exceeding one page must paginate"
        );
    }

    #[test]
    fn test_page_count_is_deterministic() {
        let registry = TemplateRegistry::new();
        let doc = oversized_doc();
        let a = render_pdf(&doc, registry.get("modern"), DocumentKind::Resume, date()).unwrap();
        let b = render_pdf(&doc, registry.get("modern"), DocumentKind::Resume, date()).unwrap();
        assert_eq!(count_pages(&a), count_pages(&b));
        assert_eq!(a.len(), b.len());
    }

    #[test]
    fn test_all_templates_render() {
        let registry = TemplateRegistry::new();
        for id in registry.ids() {
            let bytes = render_pdf(
                &small_doc(),
                registry.get(id),
                DocumentKind::Resume,
                date(),
            )
            .unwrap();
            assert!(bytes.starts_with(b"%PDF"), "template {id} failed");
        }
    }

    #[test]
    fn test_cover_letter_renders_single_page() {
        let registry = TemplateRegistry::new();
        let mut doc = small_doc();
        doc.cover_letter = Some(CoverLetter {
            job_details: crate::types::document::JobDetails {
                company: "Acme".to_string(),
                hiring_manager: "Sam Lee".to_string(),
                ..Default::default()
            },
            content: "I would like to apply.".to_string(),
        });
        let bytes = render_pdf(
            &doc,
            registry.get("classic"),
            DocumentKind::CoverLetter,
            date(),
        )
        .unwrap();
        assert_eq!(count_pages(&bytes), 1);
    }

    #[test]
    fn test_long_letter_paginates() {
        let registry = TemplateRegistry::new();
        let mut doc = small_doc();
        doc.cover_letter = Some(CoverLetter {
            job_details: Default::default(),
            content: "A paragraph about my background and motivation, long enough to wrap \
                      across several lines once rendered at body size.\n"
                .repeat(40),
        });
        let bytes = render_pdf(
            &doc,
            registry.get("modern"),
            DocumentKind::CoverLetter,
            date(),
        )
        .unwrap();
        assert!(count_pages(&bytes) > 1);
    }

    #[test]
    fn test_empty_document_still_renders() {
        let registry = TemplateRegistry::new();
        let bytes = render_pdf(
            &Document::default(),
            registry.get("minimal"),
            DocumentKind::Resume,
            date(),
        )
        .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert_eq!(count_pages(&bytes), 1);
    }
}
