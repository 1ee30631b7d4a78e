//! Stage orchestration — runs the validation gate and the seven ordered
//! extraction steps for one file's text.
//!
//! Flow: classify → contact info → education → experience → skills →
//!       certifications → projects → summary.
//!
//! Steps are independent: no step's output feeds a later prompt, and a step
//! whose completion stays malformed after the repair retry degrades to its
//! default value without touching the rest of the record. Only transport
//! failures abort the file.

use std::collections::HashSet;

use serde::Deserialize;
use tracing::{debug, info};

use crate::extraction::prompts::PARSE_SYSTEM;
use crate::extraction::response::parse_or_repair;
use crate::extraction::steps::Section;
use crate::extraction::validator::classify;
use crate::llm_client::{ModelClient, ModelError};
use crate::models::resume::{
    CertificationEntry, ContactInfo, EducationEntry, ExperienceEntry, ProjectEntry, ResumeRecord,
};

/// Wire shape of the summary step's completion.
#[derive(Debug, Deserialize)]
struct SummaryPayload {
    #[serde(default)]
    summary: Option<String>,
}

/// Runs the full per-file extraction pipeline against already-extracted text.
///
/// A rejected document comes back as a record with `is_resume == false` and
/// every extraction field empty — no extraction step runs for it.
pub async fn run_pipeline(
    model: &dyn ModelClient,
    filename: &str,
    text: &str,
) -> Result<ResumeRecord, ModelError> {
    let verdict = classify(model, text).await?;
    if !verdict.is_resume {
        let reason = verdict
            .reason
            .unwrap_or_else(|| "The document does not appear to be a resume".to_string());
        info!(filename, "document rejected by resume validator");
        return Ok(ResumeRecord::rejected(filename, reason));
    }

    let mut record = ResumeRecord::empty(filename);
    for section in Section::ORDER {
        debug!(filename, step = section.name(), "running extraction step");
        let prompt = section.prompt(text);
        let raw = model.complete(&prompt, PARSE_SYSTEM).await?;
        apply_step(model, &mut record, section, &prompt, &raw).await?;
    }
    Ok(record)
}

/// Parses one step's completion into its field group on the record.
/// `None` from the parser (malformed after repair) leaves the group at its
/// default value.
async fn apply_step(
    model: &dyn ModelClient,
    record: &mut ResumeRecord,
    section: Section,
    prompt: &str,
    raw: &str,
) -> Result<(), ModelError> {
    match section {
        Section::ContactInfo => {
            record.contact_info = parse_or_repair::<ContactInfo>(model, prompt, raw).await?;
        }
        Section::Education => {
            record.education = parse_or_repair::<Vec<EducationEntry>>(model, prompt, raw)
                .await?
                .unwrap_or_default();
        }
        Section::Experience => {
            record.work_experience = parse_or_repair::<Vec<ExperienceEntry>>(model, prompt, raw)
                .await?
                .unwrap_or_default();
        }
        Section::Skills => {
            let skills = parse_or_repair::<Vec<String>>(model, prompt, raw)
                .await?
                .unwrap_or_default();
            record.skills = dedup_preserving_order(skills);
        }
        Section::Certifications => {
            record.certifications = parse_or_repair::<Vec<CertificationEntry>>(model, prompt, raw)
                .await?
                .unwrap_or_default();
        }
        Section::Projects => {
            record.projects = parse_or_repair::<Vec<ProjectEntry>>(model, prompt, raw)
                .await?
                .unwrap_or_default();
        }
        Section::Summary => {
            record.summary = parse_or_repair::<SummaryPayload>(model, prompt, raw)
                .await?
                .and_then(|p| p.summary);
        }
    }
    Ok(())
}

/// Skills form a set with first-seen order preserved.
fn dedup_preserving_order(skills: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    skills
        .into_iter()
        .filter(|s| seen.insert(s.clone()))
        .collect()
}
