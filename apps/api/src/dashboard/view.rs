//! The dashboard view — everything the client renders, in one response.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::dashboard::placeholders::{self, CareerStep};
use crate::models::cv::UploadedFile;
use crate::models::profile::{Profile, Role};
use crate::session::{AnalysisPhase, CvSession};

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub status: AnalysisPhase,
    pub file: UploadedFile,
    /// Public retrieval URL, for embedding the document in a preview panel.
    pub file_url: String,
    pub extracted_text: Option<String>,
    pub profile: Option<Profile>,
    /// Displayed summary: the profile's summary, or the raw completion text
    /// when profile parsing fell back.
    pub summary: Option<String>,
    pub roles: Vec<Role>,
    pub suggestions: Vec<String>,
    pub job_matches: Vec<String>,
    pub career_path: Vec<CareerStep>,
    /// Human-readable message for the dedicated error-display area. Derived
    /// state computed before the failure stays populated alongside it.
    pub error: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl DashboardView {
    pub fn from_session(session: &CvSession, file_url: String) -> Self {
        Self {
            status: session.phase,
            file: session.file.clone(),
            file_url,
            extracted_text: session.extracted_text.clone(),
            profile: session.profile.clone(),
            summary: session.summary.clone(),
            roles: session.roles.clone(),
            suggestions: session.suggestions.clone(),
            job_matches: session.job_matches.clone(),
            career_path: placeholders::career_path(),
            error: session.error.clone(),
            expires_at: session.expires_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session() -> CvSession {
        let now = Utc::now();
        CvSession {
            file: UploadedFile {
                path: "cvs/resume.pdf".to_string(),
                name: "resume.pdf".to_string(),
                mime_type: "application/pdf".to_string(),
            },
            expires_at: now + Duration::seconds(3600),
            epoch: 1,
            phase: AnalysisPhase::Ready,
            extracted_text: Some(" Alice Engineer 5 years experience".to_string()),
            profile: Some(Profile {
                name: "Alice Engineer".to_string(),
                title: "Senior Software Engineer".to_string(),
                summary: "Alice is an experienced engineer.".to_string(),
                skills: vec!["Rust".to_string()],
            }),
            summary: Some("Alice is an experienced engineer.".to_string()),
            roles: vec![Role {
                title: "Backend Engineer".to_string(),
                description: "Strong systems background.".to_string(),
                match_score: 92,
            }],
            suggestions: placeholders::suggestions(),
            job_matches: placeholders::job_matches(),
            error: None,
        }
    }

    #[test]
    fn test_displayed_summary_equals_profile_summary() {
        let s = session();
        let view = DashboardView::from_session(&s, "https://x/object/public/b/p".to_string());
        assert_eq!(
            view.summary.as_deref(),
            Some(s.profile.as_ref().unwrap().summary.as_str())
        );
    }

    #[test]
    fn test_career_path_is_always_populated() {
        let view = DashboardView::from_session(&session(), String::new());
        assert_eq!(view.career_path.len(), 3);
    }

    #[test]
    fn test_view_serializes_wire_field_names() {
        let view = DashboardView::from_session(&session(), String::new());
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["status"], "ready");
        assert_eq!(value["roles"][0]["matchScore"], 92);
        assert_eq!(value["file"]["mime_type"], "application/pdf");
    }
}
