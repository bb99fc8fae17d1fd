// src/render/html.rs
//! Self-contained HTML renderer.
//!
//! The output carries its entire stylesheet inline and references no host
//! page assets, so the same string serves the on-screen preview and the
//! `.html` export artifact. Sections with no data produce no markup at all.
//! Every piece of user text goes through [`escape_html`] before
//! interpolation.

use chrono::NaiveDate;

use crate::render::DocumentKind;
use crate::template_system::{HeaderStyle, TemplateStyle};
use crate::types::document::{CoverLetter, Document};
use crate::utils::date_range;

/// Escape text for interpolation into element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a complete standalone HTML document.
pub fn render_html(
    doc: &Document,
    style: &TemplateStyle,
    kind: DocumentKind,
    letter_date: NaiveDate,
) -> String {
    let title = match kind {
        DocumentKind::Resume => format!("{} - Resume", doc.personal.full_name()),
        DocumentKind::CoverLetter => format!("{} - Cover Letter", doc.personal.full_name()),
    };

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape_html(title.trim())));
    html.push_str("<style>\n");
    html.push_str(&stylesheet(style));
    html.push_str("</style>\n</head>\n<body>\n");

    push_header(&mut html, doc, style);
    match kind {
        DocumentKind::Resume => push_resume_body(&mut html, doc),
        DocumentKind::CoverLetter => push_letter_body(&mut html, doc, letter_date),
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn stylesheet(style: &TemplateStyle) -> String {
    let colors = &style.color_scheme;
    let sizes = &style.typography.sizes;
    let header_rules = match style.layout.header_style {
        HeaderStyle::Banner => format!(
            "header {{ background: {}; color: #ffffff; padding: 8mm 10mm; margin: -20mm -20mm 8mm -20mm; }}\n\
             header h1 {{ color: #ffffff; }}\n\
             header .contact, header .links a {{ color: #ffffff; }}\n",
            colors.primary
        ),
        HeaderStyle::Underline => format!(
            "header {{ border-bottom: 0.6mm solid {}; padding-bottom: 4mm; margin-bottom: 6mm; }}\n",
            colors.primary
        ),
        HeaderStyle::Plain => "header { margin-bottom: 6mm; }\n".to_string(),
    };

    format!(
        "@page {{ size: A4; margin: 0; }}\n\
         * {{ margin: 0; padding: 0; box-sizing: border-box; }}\n\
         body {{ font-family: {font}; font-size: {body}pt; color: {text}; \
         width: 210mm; min-height: 297mm; margin: 0 auto; padding: 20mm; background: #ffffff; }}\n\
         h1 {{ font-size: {name}pt; color: {primary}; }}\n\
         h2 {{ font-size: {heading}pt; color: {primary}; text-transform: uppercase; \
         letter-spacing: 0.5pt; margin-bottom: {item_gap}mm; }}\n\
         section {{ margin-bottom: {section_gap}mm; }}\n\
         .entry {{ margin-bottom: {item_gap}mm; }}\n\
         .entry-head {{ display: flex; justify-content: space-between; }}\n\
         .entry-title {{ font-weight: bold; }}\n\
         .entry-sub {{ color: {secondary}; font-size: {small}pt; }}\n\
         .dates {{ color: {secondary}; font-size: {small}pt; white-space: nowrap; }}\n\
         .contact {{ color: {secondary}; font-size: {small}pt; margin-top: 1mm; }}\n\
         .links a {{ color: {accent}; text-decoration: none; margin-right: 3mm; font-size: {small}pt; }}\n\
         ul {{ margin: 1mm 0 0 5mm; }}\n\
         li {{ margin-bottom: 0.8mm; }}\n\
         .chips span {{ display: inline-block; border: 0.3mm solid {accent}; color: {text}; \
         border-radius: 2mm; padding: 0.8mm 2.5mm; margin: 0 1.5mm 1.5mm 0; font-size: {small}pt; }}\n\
         .letter-date {{ margin-bottom: 6mm; }}\n\
         .recipient {{ margin-bottom: 6mm; }}\n\
         .letter p {{ margin-bottom: 4mm; text-align: justify; }}\n\
         .signature {{ margin-top: 8mm; }}\n\
         @media print {{ body {{ width: 210mm; }} }}\n\
         {header_rules}",
        font = style.typography.family.html_stack(),
        name = sizes.name,
        heading = sizes.heading,
        body = sizes.body,
        small = sizes.small,
        primary = colors.primary,
        secondary = colors.secondary,
        accent = colors.accent,
        text = colors.text,
        section_gap = style.spacing.section_gap,
        item_gap = style.spacing.item_gap,
        header_rules = header_rules,
    )
}

fn push_header(html: &mut String, doc: &Document, _style: &TemplateStyle) {
    let personal = &doc.personal;
    html.push_str("<header>\n");
    let name = personal.full_name();
    if !name.is_empty() {
        html.push_str(&format!("<h1>{}</h1>\n", escape_html(&name)));
    }
    let contact = personal.contact_parts();
    if !contact.is_empty() {
        let parts: Vec<String> = contact.iter().map(|p| escape_html(p)).collect();
        html.push_str(&format!(
            "<div class=\"contact\">{}</div>\n",
            parts.join(" &middot; ")
        ));
    }
    if !personal.links.is_empty() {
        html.push_str("<div class=\"links\">");
        for (platform, url) in &personal.links {
            html.push_str(&format!(
                "<a href=\"{}\">{}</a>",
                escape_html(url),
                escape_html(platform)
            ));
        }
        html.push_str("</div>\n");
    }
    html.push_str("</header>\n");
}

fn push_resume_body(html: &mut String, doc: &Document) {
    if !doc.personal.summary.is_empty() {
        html.push_str("<section>\n<h2>Summary</h2>\n");
        html.push_str(&format!("<p>{}</p>\n", escape_html(&doc.personal.summary)));
        html.push_str("</section>\n");
    }

    if !doc.experience.is_empty() {
        html.push_str("<section>\n<h2>Experience</h2>\n");
        for exp in &doc.experience {
            html.push_str("<div class=\"entry\">\n<div class=\"entry-head\">\n");
            html.push_str(&format!(
                "<span class=\"entry-title\">{}</span>\n",
                escape_html(&exp.position)
            ));
            let dates = date_range(&exp.start_date, exp.end_date.as_deref(), exp.current);
            if !dates.is_empty() {
                html.push_str(&format!("<span class=\"dates\">{}</span>\n", escape_html(&dates)));
            }
            html.push_str("</div>\n");
            let sub = crate::utils::join_nonempty(&[&exp.company, &exp.location], ", ");
            if !sub.is_empty() {
                html.push_str(&format!("<div class=\"entry-sub\">{}</div>\n", escape_html(&sub)));
            }
            if !exp.description.is_empty() {
                html.push_str(&format!("<p>{}</p>\n", escape_html(&exp.description)));
            }
            push_bullets(html, &exp.achievements);
            html.push_str("</div>\n");
        }
        html.push_str("</section>\n");
    }

    if !doc.education.is_empty() {
        html.push_str("<section>\n<h2>Education</h2>\n");
        for edu in &doc.education {
            html.push_str("<div class=\"entry\">\n<div class=\"entry-head\">\n");
            let degree = edu.degree_line();
            let title = if degree.is_empty() { &edu.school } else { &degree };
            html.push_str(&format!(
                "<span class=\"entry-title\">{}</span>\n",
                escape_html(title)
            ));
            let dates = date_range(&edu.start_date, edu.end_date.as_deref(), false);
            if !dates.is_empty() {
                html.push_str(&format!("<span class=\"dates\">{}</span>\n", escape_html(&dates)));
            }
            html.push_str("</div>\n");
            if !degree.is_empty() && !edu.school.is_empty() {
                html.push_str(&format!(
                    "<div class=\"entry-sub\">{}</div>\n",
                    escape_html(&edu.school)
                ));
            }
            if let Some(gpa) = &edu.gpa {
                html.push_str(&format!("<div class=\"entry-sub\">GPA: {}</div>\n", escape_html(gpa)));
            }
            if !edu.description.is_empty() {
                html.push_str(&format!("<p>{}</p>\n", escape_html(&edu.description)));
            }
            push_bullets(html, &edu.achievements);
            html.push_str("</div>\n");
        }
        html.push_str("</section>\n");
    }

    if !doc.skills.is_empty() {
        html.push_str("<section>\n<h2>Skills</h2>\n<div class=\"chips\">");
        for skill in &doc.skills {
            let label = match &skill.proficiency {
                Some(level) => format!("{} ({})", skill.name, level),
                None => skill.name.clone(),
            };
            html.push_str(&format!("<span>{}</span>", escape_html(&label)));
        }
        html.push_str("</div>\n</section>\n");
    }

    if !doc.languages.is_empty() {
        html.push_str("<section>\n<h2>Languages</h2>\n<div class=\"chips\">");
        for language in &doc.languages {
            let label = match &language.proficiency {
                Some(level) => format!("{} ({})", language.name, level),
                None => language.name.clone(),
            };
            html.push_str(&format!("<span>{}</span>", escape_html(&label)));
        }
        html.push_str("</div>\n</section>\n");
    }

    if !doc.certifications.is_empty() {
        html.push_str("<section>\n<h2>Certifications</h2>\n");
        for cert in &doc.certifications {
            html.push_str("<div class=\"entry\">\n<div class=\"entry-head\">\n");
            html.push_str(&format!(
                "<span class=\"entry-title\">{}</span>\n",
                escape_html(&cert.name)
            ));
            let dates = date_range(
                cert.date.as_deref().unwrap_or_default(),
                cert.expiry.as_deref(),
                false,
            );
            if !dates.is_empty() {
                html.push_str(&format!("<span class=\"dates\">{}</span>\n", escape_html(&dates)));
            }
            html.push_str("</div>\n");
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
                let escaped: Vec<String> = sub_parts.iter().map(|p| escape_html(p)).collect();
                html.push_str(&format!(
                    "<div class=\"entry-sub\">{}</div>\n",
                    escaped.join(" &middot; ")
                ));
            }
            html.push_str("</div>\n");
        }
        html.push_str("</section>\n");
    }

    if !doc.projects.is_empty() {
        html.push_str("<section>\n<h2>Projects</h2>\n");
        for project in &doc.projects {
            html.push_str("<div class=\"entry\">\n<div class=\"entry-head\">\n");
            html.push_str(&format!(
                "<span class=\"entry-title\">{}</span>\n",
                escape_html(&project.name)
            ));
            let dates = date_range(
                project.start_date.as_deref().unwrap_or_default(),
                project.end_date.as_deref(),
                false,
            );
            if !dates.is_empty() {
                html.push_str(&format!("<span class=\"dates\">{}</span>\n", escape_html(&dates)));
            }
            html.push_str("</div>\n");
            if !project.technologies.is_empty() {
                html.push_str(&format!(
                    "<div class=\"entry-sub\">{}</div>\n",
                    escape_html(&project.technologies.join(", "))
                ));
            }
            if let Some(url) = &project.url {
                html.push_str(&format!(
                    "<div class=\"entry-sub\"><a href=\"{0}\">{0}</a></div>\n",
                    escape_html(url)
                ));
            }
            if !project.description.is_empty() {
                html.push_str(&format!("<p>{}</p>\n", escape_html(&project.description)));
            }
            push_bullets(html, &project.achievements);
            html.push_str("</div>\n");
        }
        html.push_str("</section>\n");
    }
}

fn push_bullets(html: &mut String, bullets: &[String]) {
    if bullets.is_empty() {
        return;
    }
    html.push_str("<ul>\n");
    for bullet in bullets {
        html.push_str(&format!("<li>{}</li>\n", escape_html(bullet)));
    }
    html.push_str("</ul>\n");
}

fn push_letter_body(html: &mut String, doc: &Document, letter_date: NaiveDate) {
    let empty = CoverLetter::default();
    let letter = doc.cover_letter.as_ref().unwrap_or(&empty);
    let details = &letter.job_details;

    html.push_str("<div class=\"letter\">\n");
    html.push_str(&format!(
        "<div class=\"letter-date\">{}</div>\n",
        letter_date.format("%B %-d, %Y")
    ));

    let mut recipient: Vec<String> = Vec::new();
    if !details.hiring_manager.is_empty() {
        recipient.push(details.hiring_manager.clone());
    }
    if !details.company.is_empty() {
        recipient.push(details.company.clone());
    }
    if !recipient.is_empty() {
        html.push_str("<div class=\"recipient\">\n");
        for line in &recipient {
            html.push_str(&format!("<div>{}</div>\n", escape_html(line)));
        }
        html.push_str("</div>\n");
    }

    let greeting = if details.hiring_manager.is_empty() {
        "Dear Hiring Manager,".to_string()
    } else {
        format!("Dear {},", details.hiring_manager)
    };
    html.push_str(&format!("<p>{}</p>\n", escape_html(&greeting)));

    for paragraph in letter.content.split('\n').map(str::trim).filter(|p| !p.is_empty()) {
        html.push_str(&format!("<p>{}</p>\n", escape_html(paragraph)));
    }

    html.push_str("<p>Sincerely,</p>\n");
    let name = doc.personal.full_name();
    if !name.is_empty() {
        html.push_str(&format!(
            "<div class=\"signature\">{}</div>\n",
            escape_html(&name)
        ));
    }
    html.push_str("</div>\n");
}
