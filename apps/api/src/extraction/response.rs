//! Response parsing and repair for step completions.
//!
//! The model's completion is an untyped text channel: it may wrap the JSON
//! payload in code fences or prose, or emit something unparsable. Parsing
//! strips the wrapping and deserializes; on failure the step is re-issued
//! once with a repair prompt, and a second failure degrades the step to its
//! default value instead of failing the file.

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

use crate::extraction::prompts::{repair_prompt, PARSE_SYSTEM};
use crate::llm_client::{ModelClient, ModelError};

#[derive(Debug, Error)]
#[error("malformed model response: {reason}")]
pub struct MalformedResponse {
    pub reason: String,
    /// The completion as received, kept for the repair prompt.
    pub raw: String,
}

/// Parses one completion into the step's expected shape.
///
/// Strips code fences first, then falls back to slicing the outermost JSON
/// span when the payload is wrapped in prose. Missing optional fields are
/// coerced by the target types' `#[serde(default)]` attributes, so absent
/// keys never fail a parse.
pub fn parse_payload<T: DeserializeOwned>(raw: &str) -> Result<T, MalformedResponse> {
    let cleaned = strip_code_fences(raw);

    match serde_json::from_str(cleaned) {
        Ok(value) => Ok(value),
        Err(first_err) => {
            if let Some(span) = slice_json_span(cleaned) {
                serde_json::from_str(span).map_err(|e| MalformedResponse {
                    reason: e.to_string(),
                    raw: raw.to_string(),
                })
            } else {
                Err(MalformedResponse {
                    reason: first_err.to_string(),
                    raw: raw.to_string(),
                })
            }
        }
    }
}

/// Parses a step completion, re-issuing the step once with a repair prompt
/// when the payload is malformed.
///
/// Returns `Ok(None)` when the repair attempt is also malformed — the caller
/// substitutes the step's default value. Transport failures propagate and
/// are fatal to the file.
pub async fn parse_or_repair<T: DeserializeOwned>(
    model: &dyn ModelClient,
    step_prompt: &str,
    raw: &str,
) -> Result<Option<T>, ModelError> {
    let malformed = match parse_payload::<T>(raw) {
        Ok(value) => return Ok(Some(value)),
        Err(e) => e,
    };

    warn!("step completion malformed ({}), issuing repair retry", malformed.reason);
    let retry = model
        .complete(&repair_prompt(step_prompt, &malformed.raw), PARSE_SYSTEM)
        .await?;

    match parse_payload::<T>(&retry) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!("repair retry still malformed ({}), degrading step to default", e.reason);
            Ok(None)
        }
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from a completion.
fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

/// Slices the outermost `{...}` or `[...]` span out of prose-wrapped text.
/// Whichever bracket opens first wins.
fn slice_json_span(text: &str) -> Option<&str> {
    let obj = text.find('{');
    let arr = text.find('[');
    let (start, close) = match (obj, arr) {
        (Some(o), Some(a)) if o < a => (o, '}'),
        (Some(o), None) => (o, '}'),
        (_, Some(a)) => (a, ']'),
        (None, None) => return None,
    };
    let end = text.rfind(close)?;
    (end > start).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedModel;
    use crate::models::resume::{ContactInfo, EducationEntry};

    #[test]
    fn test_parse_with_json_fence() {
        let raw = "```json\n{\"name\": \"Jane Doe\"}\n```";
        let contact: ContactInfo = parse_payload(raw).unwrap();
        assert_eq!(contact.name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_parse_with_bare_fence() {
        let raw = "```\n{\"name\": \"Jane Doe\"}\n```";
        let contact: ContactInfo = parse_payload(raw).unwrap();
        assert_eq!(contact.name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_parse_clean_payload() {
        let raw = r#"{"name": "Jane Doe", "email": "jane@example.com"}"#;
        let contact: ContactInfo = parse_payload(raw).unwrap();
        assert_eq!(contact.email.as_deref(), Some("jane@example.com"));
    }

    #[test]
    fn test_parse_prose_wrapped_object() {
        let raw = "Here is the extracted contact information:\n{\"name\": \"Jane Doe\"}\nHope that helps!";
        let contact: ContactInfo = parse_payload(raw).unwrap();
        assert_eq!(contact.name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_parse_prose_wrapped_array() {
        let raw = "The skills are: [\"Rust\", \"SQL\"] as requested.";
        let skills: Vec<String> = parse_payload(raw).unwrap();
        assert_eq!(skills, vec!["Rust", "SQL"]);
    }

    #[test]
    fn test_missing_optional_fields_coerce() {
        let raw = r#"[{"institution": "MIT"}]"#;
        let education: Vec<EducationEntry> = parse_payload(raw).unwrap();
        assert_eq!(education[0].institution.as_deref(), Some("MIT"));
        assert!(education[0].gpa.is_none());
    }

    #[test]
    fn test_unparsable_payload_is_malformed() {
        let err = parse_payload::<ContactInfo>("I could not find any contact info.").unwrap_err();
        assert_eq!(err.raw, "I could not find any contact info.");
    }

    /// Round-trip law: reparsing an already-valid payload yields the same value.
    #[test]
    fn test_parse_is_idempotent() {
        let raw = r#"{"name": "Jane Doe", "email": "jane@example.com", "phone": null}"#;
        let first: ContactInfo = parse_payload(raw).unwrap();
        let reserialized = serde_json::to_string(&first).unwrap();
        let second: ContactInfo = parse_payload(&reserialized).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_repair_recovers_from_malformed_first_reply() {
        let model = ScriptedModel::new(vec![Ok(r#"{"name": "Jane Doe"}"#.to_string())]);
        let contact: Option<ContactInfo> =
            parse_or_repair(&model, "step prompt", "sorry, here you go: name Jane")
                .await
                .unwrap();
        assert_eq!(contact.unwrap().name.as_deref(), Some("Jane Doe"));
        assert_eq!(model.remaining(), 0);
    }

    #[tokio::test]
    async fn test_second_malformed_reply_degrades_to_none() {
        let model = ScriptedModel::new(vec![Ok("still not json".to_string())]);
        let contact: Option<ContactInfo> = parse_or_repair(&model, "step prompt", "not json")
            .await
            .unwrap();
        assert!(contact.is_none());
    }

    #[tokio::test]
    async fn test_transport_failure_during_repair_propagates() {
        let model = ScriptedModel::new(vec![Err(ModelError::EmptyContent)]);
        let result: Result<Option<ContactInfo>, ModelError> =
            parse_or_repair(&model, "step prompt", "not json").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_valid_first_reply_skips_repair() {
        // No scripted replies: a repair call would panic the stub.
        let model = ScriptedModel::new(vec![]);
        let skills: Option<Vec<String>> =
            parse_or_repair(&model, "step prompt", r#"["Rust"]"#).await.unwrap();
        assert_eq!(skills.unwrap(), vec!["Rust"]);
    }
}
