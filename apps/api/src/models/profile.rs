//! Typed records parsed from model-generated JSON, with schema-validated
//! deserialization in place of dynamic field access.

use serde::{Deserialize, Serialize};

/// Structured profile summary inferred from the CV text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub title: String,
    pub summary: String,
    pub skills: Vec<String>,
}

impl Profile {
    /// Fallback when the model's answer is not valid profile JSON: the raw
    /// completion text becomes the summary and every other field stays empty.
    pub fn from_raw_summary(content: &str) -> Self {
        Self {
            summary: content.to_string(),
            ..Self::default()
        }
    }
}

/// A recommended job role with a 0–100 match score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub title: String,
    pub description: String,
    #[serde(rename = "matchScore")]
    pub match_score: u8,
}

/// Parses the profile completion answer. A malformed answer is not an error:
/// the raw content is surfaced verbatim as the summary instead.
pub fn parse_profile(content: &str) -> Profile {
    match serde_json::from_str(strip_json_fences(content)) {
        Ok(profile) => profile,
        Err(_) => Profile::from_raw_summary(content),
    }
}

/// Parses the roles completion answer. Unlike profiles there is no usable
/// fallback shape, so a malformed answer is an explicit error.
pub fn parse_roles(content: &str) -> Result<Vec<Role>, serde_json::Error> {
    serde_json::from_str(strip_json_fences(content))
}

/// Strips ```json ... ``` or ``` ... ``` code fences if the model wraps its
/// answer in them.
fn strip_json_fences(text: &str) -> &str {
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

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE_JSON: &str = r#"{
        "name": "Alice Engineer",
        "title": "Senior Software Engineer",
        "summary": "Alice is an engineer with five years of experience.",
        "skills": ["Rust", "PostgreSQL"]
    }"#;

    #[test]
    fn test_parse_profile_valid_json_yields_typed_record() {
        let profile = parse_profile(PROFILE_JSON);
        assert_eq!(profile.name, "Alice Engineer");
        assert_eq!(profile.title, "Senior Software Engineer");
        assert_eq!(
            profile.summary,
            "Alice is an engineer with five years of experience."
        );
        assert_eq!(profile.skills, vec!["Rust", "PostgreSQL"]);
    }

    #[test]
    fn test_parse_profile_invalid_json_falls_back_to_raw_summary() {
        let content = "Alice is an engineer. Not JSON at all.";
        let profile = parse_profile(content);
        assert_eq!(profile.summary, content);
        assert!(profile.name.is_empty());
        assert!(profile.title.is_empty());
        assert!(profile.skills.is_empty());
    }

    #[test]
    fn test_parse_profile_accepts_fenced_json() {
        let fenced = format!("```json\n{PROFILE_JSON}\n```");
        let profile = parse_profile(&fenced);
        assert_eq!(profile.name, "Alice Engineer");
    }

    #[test]
    fn test_parse_profile_missing_field_is_a_parse_failure() {
        // Schema validation: a partial object falls back rather than filling
        // holes silently.
        let content = r#"{"summary": "only a summary"}"#;
        let profile = parse_profile(content);
        assert_eq!(profile.summary, content);
    }

    #[test]
    fn test_parse_roles_valid_array() {
        let content = r#"[
            {"title": "Backend Engineer", "description": "Fits her systems background.", "matchScore": 92},
            {"title": "Platform Engineer", "description": "Close match.", "matchScore": 85}
        ]"#;
        let roles = parse_roles(content).unwrap();
        assert_eq!(roles.len(), 2);
        assert_eq!(roles[0].title, "Backend Engineer");
        assert_eq!(roles[0].match_score, 92);
    }

    #[test]
    fn test_parse_roles_malformed_answer_is_an_error() {
        assert!(parse_roles("I would recommend backend roles.").is_err());
    }

    #[test]
    fn test_role_serializes_match_score_in_wire_casing() {
        let role = Role {
            title: "Backend Engineer".to_string(),
            description: "…".to_string(),
            match_score: 92,
        };
        let value = serde_json::to_value(&role).unwrap();
        assert_eq!(value["matchScore"], 92);
    }

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }
}
