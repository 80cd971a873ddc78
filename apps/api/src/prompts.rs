//! Prompt template store — static JSON resources holding prompt strings with
//! placeholder tokens, loaded on demand from the configured assets directory.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tokio::fs;

/// Resource name of the profile-summary prompt.
pub const PROFILE_PROMPT: &str = "profilePrompt.json";
/// Resource name of the role-recommendation prompt.
pub const ROLES_PROMPT: &str = "rolesPrompt.json";

/// Placeholder replaced with the extracted CV text.
pub const EXTRACTED_TEXT_TOKEN: &str = "{extractedText}";
/// Placeholder replaced with the generated profile summary.
pub const PROFILE_SUMMARY_TOKEN: &str = "{profileSummary}";

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("failed to read prompt template '{name}': {source}")]
    Read {
        name: String,
        source: std::io::Error,
    },

    #[error("prompt template '{name}' is not valid JSON: {source}")]
    Malformed {
        name: String,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct PromptTemplate {
    pub prompt: String,
}

impl PromptTemplate {
    /// Replaces the first occurrence of `token` with `value`. Later
    /// occurrences are left untouched — one substitution per call.
    pub fn substitute(&self, token: &str, value: &str) -> String {
        self.prompt.replacen(token, value, 1)
    }
}

#[derive(Clone)]
pub struct PromptStore {
    dir: PathBuf,
}

impl PromptStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Reads and parses a template resource. Templates are read on every call
    /// so they can be edited without a restart.
    pub async fn load(&self, name: &str) -> Result<PromptTemplate, PromptError> {
        let path = self.dir.join(name);
        let raw = fs::read_to_string(&path)
            .await
            .map_err(|source| PromptError::Read {
                name: name.to_string(),
                source,
            })?;
        serde_json::from_str(&raw).map_err(|source| PromptError::Malformed {
            name: name.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(prompt: &str) -> PromptTemplate {
        PromptTemplate {
            prompt: prompt.to_string(),
        }
    }

    #[test]
    fn test_substitute_replaces_first_occurrence_only() {
        let t = template("Summarize: {extractedText} — end of {extractedText}");
        assert_eq!(
            t.substitute(EXTRACTED_TEXT_TOKEN, "CV BODY"),
            "Summarize: CV BODY — end of {extractedText}"
        );
    }

    #[test]
    fn test_substitute_leaves_unknown_token_untouched() {
        let t = template("Roles for {profileSummary}");
        assert_eq!(
            t.substitute(EXTRACTED_TEXT_TOKEN, "ignored"),
            "Roles for {profileSummary}"
        );
    }

    #[test]
    fn test_template_deserializes_from_resource_shape() {
        let t: PromptTemplate =
            serde_json::from_str(r#"{"prompt": "Analyze {extractedText}"}"#).unwrap();
        assert_eq!(t.prompt, "Analyze {extractedText}");
    }

    #[tokio::test]
    async fn test_load_reads_template_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("profilePrompt.json"),
            r#"{"prompt": "Summarize {extractedText}"}"#,
        )
        .unwrap();

        let store = PromptStore::new(dir.path());
        let t = store.load(PROFILE_PROMPT).await.unwrap();
        assert_eq!(t.prompt, "Summarize {extractedText}");
    }

    #[tokio::test]
    async fn test_load_reports_missing_resource() {
        let dir = tempfile::tempdir().unwrap();
        let store = PromptStore::new(dir.path());
        assert!(matches!(
            store.load(ROLES_PROMPT).await,
            Err(PromptError::Read { .. })
        ));
    }
}
