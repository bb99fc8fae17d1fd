// src/normalizer.rs
//! Coerces the loose form state into the canonical [`Document`].
//!
//! The contract is total: missing fields become empty strings or empty
//! vectors, never errors, and shape anomalies are silently resolved. After
//! this pass every renderer can assume a single shape per field.

use serde_json::Value;

use crate::types::document::{
    Certification, CoverLetter, Document, Education, Experience, JobDetails, LanguageSkill,
    Personal, Project, Skill,
};
use crate::types::form_data::{
    LanguageInput, RawCertification, RawCoverLetter, RawEducation, RawExperience, RawFormState,
    RawPersonal, RawProject, SkillInput,
};

/// Build a canonical [`Document`] from whatever the form layer produced.
pub fn normalize(raw: &RawFormState) -> Document {
    Document {
        personal: normalize_personal(raw.personal.as_ref()),
        experience: raw
            .experience
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(normalize_experience)
            .collect(),
        education: raw
            .education
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(normalize_education)
            .collect(),
        skills: raw
            .skills
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(normalize_skill)
            .collect(),
        certifications: raw
            .certifications
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(normalize_certification)
            .collect(),
        languages: raw
            .languages
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(normalize_language)
            .collect(),
        projects: raw
            .projects
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(normalize_project)
            .collect(),
        cover_letter: raw.cover_letter.as_ref().map(normalize_cover_letter),
    }
}

/// Resolve the historically polymorphic summary shape to a single string.
///
/// Resolution order: string as-is, then an object's `text` or `summary`
/// field, then the first element of an array (re-applying the first two
/// rules), then the stringified value as a last resort.
pub fn resolve_summary(value: Option<&Value>) -> String {
    let Some(value) = value else {
        return String::new();
    };
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        Value::Object(_) => resolve_keyed_summary(value),
        Value::Array(items) => match items.first() {
            None => String::new(),
            Some(first @ Value::String(_)) | Some(first @ Value::Object(_)) => {
                resolve_summary(Some(first))
            }
            Some(other) => other.to_string(),
        },
        other => other.to_string(),
    }
}

fn resolve_keyed_summary(value: &Value) -> String {
    value
        .get("text")
        .or_else(|| value.get("summary"))
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| value.to_string())
}

fn text(field: &Option<String>) -> String {
    field.as_deref().map(str::trim).unwrap_or_default().to_string()
}

fn opt_text(field: &Option<String>) -> Option<String> {
    match field.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => Some(s.to_string()),
        _ => None,
    }
}

fn string_list(items: &Option<Vec<String>>) -> Vec<String> {
    items
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn normalize_personal(raw: Option<&RawPersonal>) -> Personal {
    let Some(raw) = raw else {
        return Personal::default();
    };
    Personal {
        first_name: text(&raw.first_name),
        last_name: text(&raw.last_name),
        email: text(&raw.email),
        phone: text(&raw.phone),
        location: text(&raw.location),
        summary: resolve_summary(raw.summary.as_ref()),
        links: raw
            .links
            .clone()
            .unwrap_or_default()
            .into_iter()
            .filter(|(_, url)| !url.trim().is_empty())
            .collect(),
    }
}

fn normalize_experience(raw: &RawExperience) -> Experience {
    Experience {
        position: text(&raw.position),
        company: text(&raw.company),
        location: text(&raw.location),
        start_date: text(&raw.start_date),
        end_date: opt_text(&raw.end_date),
        current: raw.current.unwrap_or(false),
        description: text(&raw.description),
        achievements: string_list(&raw.achievements),
    }
}

fn normalize_education(raw: &RawEducation) -> Education {
    Education {
        school: text(&raw.school),
        degree: text(&raw.degree),
        field: text(&raw.field),
        start_date: text(&raw.start_date),
        end_date: opt_text(&raw.end_date),
        gpa: opt_text(&raw.gpa),
        description: text(&raw.description),
        achievements: string_list(&raw.achievements),
    }
}

fn normalize_skill(raw: &SkillInput) -> Skill {
    match raw {
        SkillInput::Name(name) => Skill {
            name: name.trim().to_string(),
            proficiency: None,
        },
        SkillInput::Detailed { name, proficiency } => Skill {
            name: name.trim().to_string(),
            proficiency: opt_text(proficiency),
        },
    }
}

fn normalize_language(raw: &LanguageInput) -> LanguageSkill {
    match raw {
        LanguageInput::Name(name) => LanguageSkill {
            name: name.trim().to_string(),
            proficiency: None,
        },
        LanguageInput::Detailed { name, proficiency } => LanguageSkill {
            name: name.trim().to_string(),
            proficiency: opt_text(proficiency),
        },
    }
}

fn normalize_certification(raw: &RawCertification) -> Certification {
    Certification {
        name: text(&raw.name),
        issuer: text(&raw.issuer),
        date: opt_text(&raw.date),
        expiry: opt_text(&raw.expiry),
        credential_id: opt_text(&raw.credential_id),
        url: opt_text(&raw.url),
    }
}

fn normalize_project(raw: &RawProject) -> Project {
    Project {
        name: text(&raw.name),
        description: text(&raw.description),
        technologies: string_list(&raw.technologies),
        url: opt_text(&raw.url),
        start_date: opt_text(&raw.start_date),
        end_date: opt_text(&raw.end_date),
        achievements: string_list(&raw.achievements),
    }
}

fn normalize_cover_letter(raw: &RawCoverLetter) -> CoverLetter {
    let details = raw.job_details.as_ref();
    CoverLetter {
        job_details: JobDetails {
            company: details.map(|d| text(&d.company)).unwrap_or_default(),
            position: details.map(|d| text(&d.position)).unwrap_or_default(),
            job_description: details.map(|d| text(&d.job_description)).unwrap_or_default(),
            requirements: details.map(|d| text(&d.requirements)).unwrap_or_default(),
            hiring_manager: details.map(|d| text(&d.hiring_manager)).unwrap_or_default(),
        },
        content: text(&raw.content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_empty_form_state() {
        let doc = normalize(&RawFormState::default());
        assert_eq!(doc.personal.full_name(), "");
        assert!(doc.experience.is_empty());
        assert!(doc.education.is_empty());
        assert!(doc.skills.is_empty());
        assert!(doc.certifications.is_empty());
        assert!(doc.languages.is_empty());
        assert!(doc.projects.is_empty());
        assert!(doc.cover_letter.is_none());
    }

    #[test]
    fn test_summary_four_shapes_same_result() {
        let shapes = [
            json!("Seasoned engineer."),
            json!({ "text": "Seasoned engineer." }),
            json!({ "summary": "Seasoned engineer." }),
            json!([{ "text": "Seasoned engineer." }]),
        ];
        for shape in &shapes {
            assert_eq!(
                resolve_summary(Some(shape)),
                "Seasoned engineer.",
                "shape {shape} did not resolve"
            );
        }
    }

    #[test]
    fn test_summary_array_of_strings() {
        assert_eq!(
            resolve_summary(Some(&json!(["First.", "Second."]))),
            "First."
        );
    }

    #[test]
    fn test_summary_fallbacks() {
        assert_eq!(resolve_summary(None), "");
        assert_eq!(resolve_summary(Some(&json!(null))), "");
        assert_eq!(resolve_summary(Some(&json!([]))), "");
        assert_eq!(resolve_summary(Some(&json!(42))), "42");
        // Object without text/summary stringifies rather than erroring.
        let odd = json!({ "body": "x" });
        assert_eq!(resolve_summary(Some(&odd)), odd.to_string());
    }

    #[test]
    fn test_skills_coerce_to_single_shape() {
        let raw: RawFormState = serde_json::from_value(json!({
            "skills": ["Go", { "name": "Rust", "proficiency": "Expert" }]
        }))
        .unwrap();
        let doc = normalize(&raw);
        assert_eq!(doc.skills.len(), 2);
        assert_eq!(doc.skills[0].name, "Go");
        assert!(doc.skills[0].proficiency.is_none());
        assert_eq!(doc.skills[1].proficiency.as_deref(), Some("Expert"));
    }

    #[test]
    fn test_blank_achievements_dropped() {
        let raw: RawFormState = serde_json::from_value(json!({
            "experience": [{
                "position": "Engineer",
                "achievements": ["Shipped X", "  ", ""]
            }]
        }))
        .unwrap();
        let doc = normalize(&raw);
        assert_eq!(doc.experience[0].achievements, vec!["Shipped X"]);
    }

    #[test]
    fn test_empty_optionals_become_none() {
        let raw: RawFormState = serde_json::from_value(json!({
            "education": [{ "school": "MIT", "gpa": "  " }]
        }))
        .unwrap();
        let doc = normalize(&raw);
        assert!(doc.education[0].gpa.is_none());
    }

    #[test]
    fn test_cover_letter_without_details() {
        let raw: RawFormState = serde_json::from_value(json!({
            "coverLetter": { "content": "Dear team," }
        }))
        .unwrap();
        let doc = normalize(&raw);
        let letter = doc.cover_letter.unwrap();
        assert_eq!(letter.content, "Dear team,");
        assert_eq!(letter.job_details.company, "");
    }
}
