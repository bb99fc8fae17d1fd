// src/types/form_data.rs
//! Loosely-typed form state as it arrives from the outside world.
//!
//! Every field is optional and the two historically polymorphic shapes
//! (`summary`, skill entries) are modeled explicitly so that both JSON and
//! TOML profiles decode without loss. Shape resolution happens in the
//! normalizer, nowhere else.

use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawFormState {
    pub personal: Option<RawPersonal>,
    pub experience: Option<Vec<RawExperience>>,
    pub education: Option<Vec<RawEducation>>,
    pub skills: Option<Vec<SkillInput>>,
    pub certifications: Option<Vec<RawCertification>>,
    pub languages: Option<Vec<LanguageInput>>,
    pub projects: Option<Vec<RawProject>>,
    #[serde(alias = "cover_letter")]
    pub cover_letter: Option<RawCoverLetter>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawPersonal {
    #[serde(alias = "first_name")]
    pub first_name: Option<String>,
    #[serde(alias = "last_name")]
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    /// String, `{text}`, `{summary}`, array, or anything else. Resolved by
    /// the normalizer only.
    pub summary: Option<serde_json::Value>,
    pub links: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawExperience {
    pub position: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    #[serde(alias = "start_date")]
    pub start_date: Option<String>,
    #[serde(alias = "end_date")]
    pub end_date: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
    pub achievements: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawEducation {
    pub school: Option<String>,
    pub degree: Option<String>,
    pub field: Option<String>,
    #[serde(alias = "start_date")]
    pub start_date: Option<String>,
    #[serde(alias = "end_date")]
    pub end_date: Option<String>,
    pub gpa: Option<String>,
    pub description: Option<String>,
    pub achievements: Option<Vec<String>>,
}

/// Skill entries arrive either flat (`"Go"`) or detailed
/// (`{ "name": "Go", "proficiency": "Expert" }`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SkillInput {
    Name(String),
    Detailed {
        name: String,
        #[serde(default)]
        proficiency: Option<String>,
    },
}

/// Same duality as [`SkillInput`]; some form layers key the name as
/// `language` instead of `name`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LanguageInput {
    Name(String),
    Detailed {
        #[serde(alias = "language")]
        name: String,
        #[serde(default)]
        proficiency: Option<String>,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawCertification {
    pub name: Option<String>,
    pub issuer: Option<String>,
    pub date: Option<String>,
    pub expiry: Option<String>,
    #[serde(alias = "credential_id")]
    pub credential_id: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawProject {
    pub name: Option<String>,
    pub description: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub url: Option<String>,
    #[serde(alias = "start_date")]
    pub start_date: Option<String>,
    #[serde(alias = "end_date")]
    pub end_date: Option<String>,
    pub achievements: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawCoverLetter {
    #[serde(alias = "job_details")]
    pub job_details: Option<RawJobDetails>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawJobDetails {
    pub company: Option<String>,
    pub position: Option<String>,
    #[serde(alias = "job_description")]
    pub job_description: Option<String>,
    pub requirements: Option<String>,
    #[serde(alias = "hiring_manager")]
    pub hiring_manager: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_decodes() {
        let raw: RawFormState = serde_json::from_str("{}").unwrap();
        assert!(raw.personal.is_none());
        assert!(raw.experience.is_none());
    }

    #[test]
    fn test_skill_input_both_shapes() {
        let skills: Vec<SkillInput> =
            serde_json::from_str(r#"["Go", {"name": "Rust", "proficiency": "Expert"}]"#).unwrap();
        assert!(matches!(&skills[0], SkillInput::Name(n) if n == "Go"));
        assert!(matches!(
            &skills[1],
            SkillInput::Detailed { name, proficiency: Some(p) } if name == "Rust" && p == "Expert"
        ));
    }

    #[test]
    fn test_language_input_language_key() {
        let langs: Vec<LanguageInput> =
            serde_json::from_str(r#"[{"language": "French", "proficiency": "B2"}]"#).unwrap();
        assert!(matches!(
            &langs[0],
            LanguageInput::Detailed { name, .. } if name == "French"
        ));
    }

    #[test]
    fn test_camel_case_and_snake_case_dates() {
        let camel: RawExperience =
            serde_json::from_str(r#"{"startDate": "2020-01", "current": true}"#).unwrap();
        assert_eq!(camel.start_date.as_deref(), Some("2020-01"));

        let snake: RawExperience =
            serde_json::from_str(r#"{"start_date": "2020-01"}"#).unwrap();
        assert_eq!(snake.start_date.as_deref(), Some("2020-01"));
    }

    #[test]
    fn test_toml_profile_decodes() {
        let profile = r#"
            skills = ["Go", "Rust"]

            [personal]
            firstName = "Jane"
            summary = "Engineer."

            [[experience]]
            position = "Engineer"
            company = "Acme"
            startDate = "2020-01"
            current = true
        "#;
        let raw: RawFormState = toml::from_str(profile).unwrap();
        let personal = raw.personal.unwrap();
        assert_eq!(personal.first_name.as_deref(), Some("Jane"));
        assert_eq!(raw.experience.unwrap().len(), 1);
        assert_eq!(raw.skills.unwrap().len(), 2);
    }
}
