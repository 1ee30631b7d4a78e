//! The seven ordered extraction steps.
//!
//! Each step is a narrowly-scoped completion request: one prompt, one JSON
//! shape, one field group on the record. Steps never see each other's
//! output — splitting the extraction this way trades extra round-trips for
//! per-field accuracy and lets a single bad completion degrade one field
//! group instead of the whole file.

use crate::extraction::prompts;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    ContactInfo,
    Education,
    Experience,
    Skills,
    Certifications,
    Projects,
    Summary,
}

impl Section {
    /// Fixed execution order: contact info → education → experience →
    /// skills → certifications → projects → summary.
    pub const ORDER: [Section; 7] = [
        Section::ContactInfo,
        Section::Education,
        Section::Experience,
        Section::Skills,
        Section::Certifications,
        Section::Projects,
        Section::Summary,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Section::ContactInfo => "contact_info",
            Section::Education => "education",
            Section::Experience => "work_experience",
            Section::Skills => "skills",
            Section::Certifications => "certifications",
            Section::Projects => "projects",
            Section::Summary => "summary",
        }
    }

    /// Renders the step prompt with the résumé text embedded.
    pub fn prompt(&self, resume_text: &str) -> String {
        let template = match self {
            Section::ContactInfo => prompts::CONTACT_PROMPT_TEMPLATE,
            Section::Education => prompts::EDUCATION_PROMPT_TEMPLATE,
            Section::Experience => prompts::EXPERIENCE_PROMPT_TEMPLATE,
            Section::Skills => prompts::SKILLS_PROMPT_TEMPLATE,
            Section::Certifications => prompts::CERTIFICATIONS_PROMPT_TEMPLATE,
            Section::Projects => prompts::PROJECTS_PROMPT_TEMPLATE,
            Section::Summary => prompts::SUMMARY_PROMPT_TEMPLATE,
        };
        template.replace("{resume_text}", resume_text)
    }
}
