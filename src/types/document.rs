// src/types/document.rs
//! Canonical document model consumed by every renderer.
//!
//! A `Document` is assembled fresh for each export call by the normalizer and
//! discarded once the writer has consumed it. Every section vector is always
//! present (possibly empty) and `summary` is already a plain string, so the
//! renderers never re-check input shapes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub personal: Personal,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<Skill>,
    pub certifications: Vec<Certification>,
    pub languages: Vec<LanguageSkill>,
    pub projects: Vec<Project>,
    pub cover_letter: Option<CoverLetter>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Personal {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub summary: String,
    // BTreeMap keeps platform order stable between renders.
    pub links: BTreeMap<String, String>,
}

impl Personal {
    pub fn full_name(&self) -> String {
        let mut name = String::new();
        if !self.first_name.is_empty() {
            name.push_str(&self.first_name);
        }
        if !self.last_name.is_empty() {
            if !name.is_empty() {
                name.push(' ');
            }
            name.push_str(&self.last_name);
        }
        name
    }

    /// Contact fragments in display order, empty parts dropped.
    pub fn contact_parts(&self) -> Vec<String> {
        [&self.email, &self.phone, &self.location]
            .into_iter()
            .filter(|part| !part.is_empty())
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub position: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub current: bool,
    pub description: String,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub school: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub gpa: Option<String>,
    pub description: String,
    pub achievements: Vec<String>,
}

impl Education {
    /// "Degree in Field" with either part optional.
    pub fn degree_line(&self) -> String {
        match (self.degree.is_empty(), self.field.is_empty()) {
            (false, false) => format!("{} in {}", self.degree, self.field),
            (false, true) => self.degree.clone(),
            (true, false) => self.field.clone(),
            (true, true) => String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub proficiency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub date: Option<String>,
    pub expiry: Option<String>,
    pub credential_id: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LanguageSkill {
    pub name: String,
    pub proficiency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub url: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverLetter {
    pub job_details: JobDetails,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobDetails {
    pub company: String,
    pub position: String,
    pub job_description: String,
    pub requirements: String,
    pub hiring_manager: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_joins_parts() {
        let personal = Personal {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            ..Default::default()
        };
        assert_eq!(personal.full_name(), "Jane Doe");
    }

    #[test]
    fn test_full_name_single_part() {
        let personal = Personal {
            first_name: "Jane".to_string(),
            ..Default::default()
        };
        assert_eq!(personal.full_name(), "Jane");

        let personal = Personal {
            last_name: "Doe".to_string(),
            ..Default::default()
        };
        assert_eq!(personal.full_name(), "Doe");
    }

    #[test]
    fn test_contact_parts_skips_empty() {
        let personal = Personal {
            email: "jane@example.com".to_string(),
            location: "Zurich".to_string(),
            ..Default::default()
        };
        assert_eq!(personal.contact_parts(), vec!["jane@example.com", "Zurich"]);
    }

    #[test]
    fn test_degree_line_variants() {
        let mut edu = Education {
            degree: "BSc".to_string(),
            field: "Computer Science".to_string(),
            ..Default::default()
        };
        assert_eq!(edu.degree_line(), "BSc in Computer Science");

        edu.field.clear();
        assert_eq!(edu.degree_line(), "BSc");

        edu.degree.clear();
        edu.field = "Computer Science".to_string();
        assert_eq!(edu.degree_line(), "Computer Science");
    }
}
