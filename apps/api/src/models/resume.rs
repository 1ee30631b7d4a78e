use serde::{Deserialize, Serialize};

/// Structured résumé record produced by the extraction pipeline for one file.
///
/// Invariant: when `is_resume` is false, every extraction field is
/// `None`/empty and `not_resume_reason` is populated. Use the constructors —
/// they are the only places a record is brought into existence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub is_resume: bool,
    pub not_resume_reason: Option<String>,
    pub filename: String,
    pub contact_info: Option<ContactInfo>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub work_experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<CertificationEntry>,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
    pub summary: Option<String>,
}

impl ResumeRecord {
    /// An accepted record with every extraction field awaiting its step.
    pub fn empty(filename: impl Into<String>) -> Self {
        ResumeRecord {
            is_resume: true,
            not_resume_reason: None,
            filename: filename.into(),
            contact_info: None,
            education: Vec::new(),
            work_experience: Vec::new(),
            skills: Vec::new(),
            certifications: Vec::new(),
            projects: Vec::new(),
            summary: None,
        }
    }

    /// A record for a document the validator rejected. No extraction step
    /// runs for such a file, so all extraction fields stay empty.
    pub fn rejected(filename: impl Into<String>, reason: impl Into<String>) -> Self {
        ResumeRecord {
            is_resume: false,
            not_resume_reason: Some(reason.into()),
            ..ResumeRecord::empty(filename)
        }
    }
}

/// Contact fields are carried exactly as the model emitted them — email and
/// phone are not validated against any format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default)]
    pub institution: Option<String>,
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub field_of_study: Option<String>,
    #[serde(default)]
    pub graduation_year: Option<String>,
    #[serde(default)]
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CertificationEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub link: Option<String>,
}
