// src/render/docx.rs
//! DOCX writer.
//!
//! Builds a docx-rs node tree (headings, styled paragraph runs, a borderless
//! single-row table for skill chips) in the same section order as the PDF
//! writer and packs it to an in-memory OOXML package. Optional fields append
//! nodes only when present; empty sections contribute nothing to the tree.

use chrono::NaiveDate;
use docx_rs::{
    AlignmentType, Docx, Paragraph, Run, RunFonts, Table, TableCell, TableRow,
};

use crate::error::ExportError;
use crate::render::DocumentKind;
use crate::template_system::{FontFamily, HeaderStyle, TemplateStyle};
use crate::types::document::{CoverLetter, Document};
use crate::utils::{date_range, join_nonempty};

/// Render the document to DOCX bytes.
pub fn render_docx(
    doc: &Document,
    style: &TemplateStyle,
    kind: DocumentKind,
    letter_date: NaiveDate,
) -> Result<Vec<u8>, ExportError> {
    let mut docx = Docx::new();

    docx = push_header(docx, doc, style);
    docx = match kind {
        DocumentKind::Resume => push_resume(docx, doc, style),
        DocumentKind::CoverLetter => push_letter(docx, doc, style, letter_date),
    };

    let mut cursor = std::io::Cursor::new(Vec::new());
    docx.build()
        .pack(&mut cursor)
        .map_err(|e| ExportError::Docx(e.to_string()))?;
    Ok(cursor.into_inner())
}

fn docx_color(hex: &str) -> String {
    hex.trim_start_matches('#').to_string()
}

fn half_points(size_pt: f32) -> usize {
    (size_pt * 2.0).round() as usize
}

fn styled_run(text: &str, size_pt: f32, hex: &str, bold: bool, family: FontFamily) -> Run {
    let mut run = Run::new()
        .add_text(text)
        .size(half_points(size_pt))
        .color(docx_color(hex))
        .fonts(RunFonts::new().ascii(family.docx_name()));
    if bold {
        run = run.bold();
    }
    run
}

fn spacer(style: &TemplateStyle) -> Paragraph {
    Paragraph::new().add_run(
        Run::new()
            .add_text("")
            .size(half_points(style.spacing.item_gap)),
    )
}

fn section_heading(title: &str, style: &TemplateStyle) -> Paragraph {
    Paragraph::new().add_run(styled_run(
        &title.to_uppercase(),
        style.typography.sizes.heading,
        &style.color_scheme.primary,
        true,
        style.typography.family,
    ))
}

/// Entry title with the date range appended right after it in the secondary
/// color; OOXML tab stops are avoided to keep the tree simple.
fn entry_head(title: &str, dates: &str, style: &TemplateStyle) -> Paragraph {
    let sizes = &style.typography.sizes;
    let family = style.typography.family;
    let mut paragraph = Paragraph::new().add_run(styled_run(
        title,
        sizes.body,
        &style.color_scheme.text,
        true,
        family,
    ));
    if !dates.is_empty() {
        paragraph = paragraph.add_run(styled_run(
            &format!("   {}", dates),
            sizes.small,
            &style.color_scheme.secondary,
            false,
            family,
        ));
    }
    paragraph
}

fn body_paragraph(text: &str, style: &TemplateStyle) -> Paragraph {
    Paragraph::new().add_run(styled_run(
        text,
        style.typography.sizes.body,
        &style.color_scheme.text,
        false,
        style.typography.family,
    ))
}

fn sub_paragraph(text: &str, style: &TemplateStyle) -> Paragraph {
    Paragraph::new().add_run(styled_run(
        text,
        style.typography.sizes.small,
        &style.color_scheme.secondary,
        false,
        style.typography.family,
    ))
}

fn bullet_paragraph(text: &str, style: &TemplateStyle) -> Paragraph {
    Paragraph::new()
        .add_run(styled_run(
            &format!("\u{2022} {}", text),
            style.typography.sizes.body,
            &style.color_scheme.text,
            false,
            style.typography.family,
        ))
        .indent(Some(360), None, None, None)
}

fn push_header(mut docx: Docx, doc: &Document, style: &TemplateStyle) -> Docx {
    let sizes = &style.typography.sizes;
    let family = style.typography.family;
    let centered = !matches!(style.layout.header_style, HeaderStyle::Plain);
    let align = if centered {
        AlignmentType::Center
    } else {
        AlignmentType::Left
    };

    let name = doc.personal.full_name();
    if !name.is_empty() {
        docx = docx.add_paragraph(
            Paragraph::new()
                .add_run(styled_run(
                    &name,
                    sizes.name,
                    &style.color_scheme.primary,
                    true,
                    family,
                ))
                .align(align),
        );
    }

    let contact = doc.personal.contact_parts().join("  |  ");
    if !contact.is_empty() {
        docx = docx.add_paragraph(
            Paragraph::new()
                .add_run(styled_run(
                    &contact,
                    sizes.small,
                    &style.color_scheme.secondary,
                    false,
                    family,
                ))
                .align(align),
        );
    }

    if !doc.personal.links.is_empty() {
        let links: Vec<String> = doc
            .personal
            .links
            .iter()
            .map(|(platform, url)| format!("{}: {}", platform, url))
            .collect();
        docx = docx.add_paragraph(
            Paragraph::new()
                .add_run(styled_run(
                    &links.join("  |  "),
                    sizes.small,
                    &style.color_scheme.accent,
                    false,
                    family,
                ))
                .align(align),
        );
    }

    docx.add_paragraph(spacer(style))
}

fn chip_table(labels: &[String], style: &TemplateStyle) -> Table {
    let cells: Vec<TableCell> = labels
        .iter()
        .map(|label| {
            TableCell::new().add_paragraph(Paragraph::new().add_run(styled_run(
                label,
                style.typography.sizes.small,
                &style.color_scheme.text,
                false,
                style.typography.family,
            )))
        })
        .collect();
    Table::new(vec![TableRow::new(cells)]).clear_all_border()
}

fn proficiency_label(name: &str, proficiency: Option<&str>) -> String {
    match proficiency {
        Some(level) => format!("{} ({})", name, level),
        None => name.to_string(),
    }
}

fn push_resume(mut docx: Docx, doc: &Document, style: &TemplateStyle) -> Docx {
    if !doc.personal.summary.is_empty() {
        docx = docx
            .add_paragraph(section_heading("Summary", style))
            .add_paragraph(body_paragraph(&doc.personal.summary, style))
            .add_paragraph(spacer(style));
    }

    if !doc.experience.is_empty() {
        docx = docx.add_paragraph(section_heading("Experience", style));
        for exp in &doc.experience {
            let dates = date_range(&exp.start_date, exp.end_date.as_deref(), exp.current);
            docx = docx.add_paragraph(entry_head(&exp.position, &dates, style));
            let sub = join_nonempty(&[&exp.company, &exp.location], ", ");
            if !sub.is_empty() {
                docx = docx.add_paragraph(sub_paragraph(&sub, style));
            }
            if !exp.description.is_empty() {
                docx = docx.add_paragraph(body_paragraph(&exp.description, style));
            }
            for achievement in &exp.achievements {
                docx = docx.add_paragraph(bullet_paragraph(achievement, style));
            }
            docx = docx.add_paragraph(spacer(style));
        }
    }

    if !doc.education.is_empty() {
        docx = docx.add_paragraph(section_heading("Education", style));
        for edu in &doc.education {
            let degree = edu.degree_line();
            let title = if degree.is_empty() { &edu.school } else { &degree };
            let dates = date_range(&edu.start_date, edu.end_date.as_deref(), false);
            docx = docx.add_paragraph(entry_head(title, &dates, style));
            if !degree.is_empty() && !edu.school.is_empty() {
                docx = docx.add_paragraph(sub_paragraph(&edu.school, style));
            }
            if let Some(gpa) = &edu.gpa {
                docx = docx.add_paragraph(sub_paragraph(&format!("GPA: {}", gpa), style));
            }
            if !edu.description.is_empty() {
                docx = docx.add_paragraph(body_paragraph(&edu.description, style));
            }
            for achievement in &edu.achievements {
                docx = docx.add_paragraph(bullet_paragraph(achievement, style));
            }
            docx = docx.add_paragraph(spacer(style));
        }
    }

    if !doc.skills.is_empty() {
        let labels: Vec<String> = doc
            .skills
            .iter()
            .map(|s| proficiency_label(&s.name, s.proficiency.as_deref()))
            .collect();
        docx = docx
            .add_paragraph(section_heading("Skills", style))
            .add_table(chip_table(&labels, style))
            .add_paragraph(spacer(style));
    }

    if !doc.languages.is_empty() {
        let labels: Vec<String> = doc
            .languages
            .iter()
            .map(|l| proficiency_label(&l.name, l.proficiency.as_deref()))
            .collect();
        docx = docx
            .add_paragraph(section_heading("Languages", style))
            .add_table(chip_table(&labels, style))
            .add_paragraph(spacer(style));
    }

    if !doc.certifications.is_empty() {
        docx = docx.add_paragraph(section_heading("Certifications", style));
        for cert in &doc.certifications {
            let dates = date_range(
                cert.date.as_deref().unwrap_or_default(),
                cert.expiry.as_deref(),
                false,
            );
            docx = docx.add_paragraph(entry_head(&cert.name, &dates, style));
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
            if !sub_parts.is_empty() {
                docx = docx.add_paragraph(sub_paragraph(&sub_parts.join("  |  "), style));
            }
        }
        docx = docx.add_paragraph(spacer(style));
    }

    if !doc.projects.is_empty() {
        docx = docx.add_paragraph(section_heading("Projects", style));
        for project in &doc.projects {
            let dates = date_range(
                project.start_date.as_deref().unwrap_or_default(),
                project.end_date.as_deref(),
                false,
            );
            docx = docx.add_paragraph(entry_head(&project.name, &dates, style));
            if !project.technologies.is_empty() {
                docx = docx.add_paragraph(sub_paragraph(&project.technologies.join(", "), style));
            }
            if let Some(url) = &project.url {
                docx = docx.add_paragraph(sub_paragraph(url, style));
            }
            if !project.description.is_empty() {
                docx = docx.add_paragraph(body_paragraph(&project.description, style));
            }
            for achievement in &project.achievements {
                docx = docx.add_paragraph(bullet_paragraph(achievement, style));
            }
            docx = docx.add_paragraph(spacer(style));
        }
    }

    docx
}

fn push_letter(
    mut docx: Docx,
    doc: &Document,
    style: &TemplateStyle,
    letter_date: NaiveDate,
) -> Docx {
    let empty = CoverLetter::default();
    let letter = doc.cover_letter.as_ref().unwrap_or(&empty);
    let details = &letter.job_details;

    docx = docx
        .add_paragraph(body_paragraph(
            &letter_date.format("%B %-d, %Y").to_string(),
            style,
        ))
        .add_paragraph(spacer(style));

    let mut has_recipient = false;
    if !details.hiring_manager.is_empty() {
        docx = docx.add_paragraph(body_paragraph(&details.hiring_manager, style));
        has_recipient = true;
    }
    if !details.company.is_empty() {
        docx = docx.add_paragraph(body_paragraph(&details.company, style));
        has_recipient = true;
    }
    if has_recipient {
        docx = docx.add_paragraph(spacer(style));
    }

    let greeting = if details.hiring_manager.is_empty() {
        "Dear Hiring Manager,".to_string()
    } else {
        format!("Dear {},", details.hiring_manager)
    };
    docx = docx.add_paragraph(body_paragraph(&greeting, style));

    for paragraph in letter
        .content
        .split('\n')
        .map(str::trim)
        .filter(|p| !p.is_empty())
    {
        docx = docx.add_paragraph(body_paragraph(paragraph, style));
    }

    docx = docx
        .add_paragraph(spacer(style))
        .add_paragraph(body_paragraph("Sincerely,", style));
    let name = doc.personal.full_name();
    if !name.is_empty() {
        docx = docx.add_paragraph(Paragraph::new().add_run(styled_run(
            &name,
            style.typography.sizes.body,
            &style.color_scheme.text,
            true,
            style.typography.family,
        )));
    }
    docx
}
