//! Server-side replacement for the browser hand-off channel: a typed,
//! expiring session record keyed by UUID, shared between the upload and
//! dashboard surfaces.
//!
//! Supersession rule: `epoch` increments on every re-upload and on every
//! analyze trigger. A pipeline run commits its writes under the epoch it was
//! started with, and a commit from a superseded run is rejected — a stale
//! operation can never overwrite newer state.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::cv::UploadedFile;
use crate::models::profile::{Profile, Role};

/// Orchestration phase of the dashboard pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisPhase {
    Idle,
    Extracting,
    Summarizing,
    RecommendingRoles,
    Ready,
    Errored,
}

#[derive(Debug, Clone)]
pub struct CvSession {
    pub file: UploadedFile,
    pub expires_at: DateTime<Utc>,
    pub epoch: u64,
    pub phase: AnalysisPhase,
    pub extracted_text: Option<String>,
    pub profile: Option<Profile>,
    /// What the dashboard displays as the summary: the parsed profile's
    /// summary, or the raw completion text when parsing fell back.
    pub summary: Option<String>,
    pub roles: Vec<Role>,
    pub suggestions: Vec<String>,
    pub job_matches: Vec<String>,
    pub error: Option<String>,
}

impl CvSession {
    fn new(file: UploadedFile, ttl: Duration) -> Self {
        Self {
            file,
            expires_at: Utc::now() + ttl,
            epoch: 0,
            phase: AnalysisPhase::Idle,
            extracted_text: None,
            profile: None,
            summary: None,
            roles: Vec::new(),
            suggestions: Vec::new(),
            job_matches: Vec::new(),
            error: None,
        }
    }

    /// Drops every piece of state derived from the previous file.
    fn reset_derived(&mut self) {
        self.phase = AnalysisPhase::Idle;
        self.extracted_text = None;
        self.profile = None;
        self.summary = None;
        self.roles.clear();
        self.suggestions.clear();
        self.job_matches.clear();
        self.error = None;
    }

    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[derive(Clone)]
pub struct SessionStore {
    ttl: Duration,
    inner: Arc<RwLock<HashMap<Uuid, CvSession>>>,
}

impl SessionStore {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            ttl: Duration::seconds(ttl_secs as i64),
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Creates a fresh session for a newly uploaded file.
    pub async fn create(&self, file: UploadedFile) -> (Uuid, CvSession) {
        let id = Uuid::new_v4();
        let session = CvSession::new(file, self.ttl);
        self.inner.write().await.insert(id, session.clone());
        (id, session)
    }

    /// Returns the session if it exists and has not expired. Expired sessions
    /// are removed on the way out.
    pub async fn get(&self, id: Uuid) -> Option<CvSession> {
        let now = Utc::now();
        let mut sessions = self.inner.write().await;
        match sessions.get(&id) {
            Some(s) if s.is_expired(now) => {
                sessions.remove(&id);
                None
            }
            Some(s) => Some(s.clone()),
            None => None,
        }
    }

    /// Replaces the file identity of an existing session: derived state is
    /// discarded, the expiry window restarts, and any in-flight pipeline run
    /// is superseded.
    pub async fn replace_file(&self, id: Uuid, file: UploadedFile) -> Option<CvSession> {
        let now = Utc::now();
        let mut sessions = self.inner.write().await;
        let session = sessions.get_mut(&id).filter(|s| !s.is_expired(now))?;
        session.file = file;
        session.epoch += 1;
        session.expires_at = now + self.ttl;
        session.reset_derived();
        Some(session.clone())
    }

    /// Prepares a session for a new pipeline run: bumps the epoch (superseding
    /// any in-flight run) and resets derived state. Returns the epoch the new
    /// run must commit under.
    pub async fn begin_analysis(&self, id: Uuid) -> Option<(u64, CvSession)> {
        let now = Utc::now();
        let mut sessions = self.inner.write().await;
        let session = sessions.get_mut(&id).filter(|s| !s.is_expired(now))?;
        session.epoch += 1;
        session.reset_derived();
        Some((session.epoch, session.clone()))
    }

    /// Applies `apply` only if the session still exists, has not expired, and
    /// is still on `epoch`. Returns whether the write landed.
    pub async fn commit(
        &self,
        id: Uuid,
        epoch: u64,
        apply: impl FnOnce(&mut CvSession),
    ) -> bool {
        let now = Utc::now();
        let mut sessions = self.inner.write().await;
        match sessions.get_mut(&id) {
            Some(s) if !s.is_expired(now) && s.epoch == epoch => {
                apply(s);
                true
            }
            _ => false,
        }
    }

    /// Removes every expired session. Expiry is also enforced lazily on
    /// access; the sweep keeps abandoned sessions from accumulating.
    pub async fn purge_expired(&self) {
        let now = Utc::now();
        self.inner.write().await.retain(|_, s| !s.is_expired(now));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cv_file(name: &str) -> UploadedFile {
        UploadedFile {
            path: format!("cvs/{name}"),
            name: name.to_string(),
            mime_type: "application/pdf".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_round_trip() {
        let store = SessionStore::new(3600);
        let (id, _) = store.create(cv_file("resume.pdf")).await;

        let session = store.get(id).await.unwrap();
        assert_eq!(session.file.name, "resume.pdf");
        assert_eq!(session.phase, AnalysisPhase::Idle);
        assert_eq!(session.epoch, 0);
    }

    #[tokio::test]
    async fn test_expired_session_is_absent() {
        let store = SessionStore::new(0);
        let (id, _) = store.create(cv_file("resume.pdf")).await;
        assert!(store.get(id).await.is_none());
    }

    #[tokio::test]
    async fn test_replace_file_resets_derived_state_and_bumps_epoch() {
        let store = SessionStore::new(3600);
        let (id, _) = store.create(cv_file("resume.pdf")).await;

        let (epoch, _) = store.begin_analysis(id).await.unwrap();
        assert!(
            store
                .commit(id, epoch, |s| {
                    s.phase = AnalysisPhase::Ready;
                    s.extracted_text = Some("text".to_string());
                    s.summary = Some("summary".to_string());
                })
                .await
        );

        let session = store.replace_file(id, cv_file("newer.pdf")).await.unwrap();
        assert_eq!(session.file.name, "newer.pdf");
        assert_eq!(session.phase, AnalysisPhase::Idle);
        assert!(session.extracted_text.is_none());
        assert!(session.summary.is_none());
        assert_eq!(session.epoch, epoch + 1);
    }

    #[tokio::test]
    async fn test_commit_from_superseded_run_is_rejected() {
        let store = SessionStore::new(3600);
        let (id, _) = store.create(cv_file("resume.pdf")).await;

        let (first, _) = store.begin_analysis(id).await.unwrap();
        let (second, _) = store.begin_analysis(id).await.unwrap();
        assert!(second > first);

        // The superseded run cannot write…
        assert!(
            !store
                .commit(id, first, |s| s.summary = Some("stale".to_string()))
                .await
        );
        // …but the current run can.
        assert!(
            store
                .commit(id, second, |s| s.summary = Some("fresh".to_string()))
                .await
        );
        assert_eq!(store.get(id).await.unwrap().summary.as_deref(), Some("fresh"));
    }

    #[tokio::test]
    async fn test_commit_to_unknown_session_is_rejected() {
        let store = SessionStore::new(3600);
        assert!(!store.commit(Uuid::new_v4(), 0, |_| {}).await);
    }

    #[tokio::test]
    async fn test_purge_expired_drops_only_expired_sessions() {
        let long = SessionStore::new(3600);
        let (live, _) = long.create(cv_file("live.pdf")).await;
        long.purge_expired().await;
        assert!(long.get(live).await.is_some());

        let short = SessionStore::new(0);
        let (dead, _) = short.create(cv_file("dead.pdf")).await;
        short.purge_expired().await;
        assert!(short.inner.read().await.get(&dead).is_none());
    }
}
