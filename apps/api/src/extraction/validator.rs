//! Résumé classification — the gate in front of the extraction steps.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::extraction::prompts::{PARSE_SYSTEM, VALIDATE_PROMPT_TEMPLATE};
use crate::extraction::response::parse_or_repair;
use crate::llm_client::{ModelClient, ModelError};

/// Outcome of the classification call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeVerdict {
    pub is_resume: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Classifies extracted text as résumé / not-résumé with one model call.
///
/// A malformed verdict (after the repair retry) fails open: the text is
/// treated as a résumé and the steps run — they extract nothing from junk
/// text, whereas failing closed would reject real résumés on a formatting
/// slip. Transport failures propagate as `ModelError`.
pub async fn classify(model: &dyn ModelClient, text: &str) -> Result<ResumeVerdict, ModelError> {
    let prompt = VALIDATE_PROMPT_TEMPLATE.replace("{resume_text}", text);
    let raw = model.complete(&prompt, PARSE_SYSTEM).await?;

    match parse_or_repair::<ResumeVerdict>(model, &prompt, &raw).await? {
        Some(verdict) => Ok(verdict),
        None => {
            warn!("resume verdict unparsable after repair, proceeding with extraction");
            Ok(ResumeVerdict {
                is_resume: true,
                reason: None,
            })
        }
    }
}
