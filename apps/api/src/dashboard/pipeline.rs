//! Dashboard orchestration: `Idle → Extracting → Summarizing →
//! RecommendingRoles → Ready`, with `Errored` reachable from every step.
//!
//! Every state write goes through the session store's epoch-guarded commit,
//! so a run superseded by a re-upload or a newer analyze trigger stops
//! silently instead of overwriting fresher state. A step failure records one
//! human-readable message and leaves everything derived before it intact.
//! Nothing is retried; the user re-triggers a failed step by analyzing again.

use tracing::{info, warn};
use uuid::Uuid;

use crate::dashboard::placeholders;
use crate::extract;
use crate::metadata;
use crate::models::profile::{parse_profile, parse_roles, Role};
use crate::prompts::{
    EXTRACTED_TEXT_TOKEN, PROFILE_PROMPT, PROFILE_SUMMARY_TOKEN, ROLES_PROMPT,
};
use crate::session::AnalysisPhase;
use crate::state::AppState;

pub async fn run(state: AppState, session_id: Uuid, epoch: u64, file_url: String) {
    // Extracting
    if !set_phase(&state, session_id, epoch, AnalysisPhase::Extracting).await {
        return;
    }

    let text = match fetch_and_extract(&state, &file_url).await {
        Ok(text) => text,
        Err(message) => return fail(&state, session_id, epoch, message).await,
    };

    if !state
        .sessions
        .commit(session_id, epoch, |s| {
            s.extracted_text = Some(text.clone());
        })
        .await
    {
        return;
    }

    // The extracted document is persisted once per extraction. A failed
    // insert stops the pipeline but keeps the text already derived.
    if let Err(e) = metadata::insert_extracted_document(&state.db, &file_url, &text).await {
        return fail(
            &state,
            session_id,
            epoch,
            format!("Failed to store extracted text: {e}"),
        )
        .await;
    }

    // Summarizing
    if !set_phase(&state, session_id, epoch, AnalysisPhase::Summarizing).await {
        return;
    }

    let content = match summarize(&state, &text).await {
        Ok(content) => content,
        Err(message) => return fail(&state, session_id, epoch, message).await,
    };

    // A malformed profile answer is not an error: the raw text becomes the
    // displayed summary and the remaining profile fields stay empty.
    let profile = parse_profile(&content);
    let summary = profile.summary.clone();

    if !state
        .sessions
        .commit(session_id, epoch, {
            let summary = summary.clone();
            move |s| {
                s.summary = Some(summary);
                s.profile = Some(profile);
            }
        })
        .await
    {
        return;
    }

    // RecommendingRoles
    if !set_phase(&state, session_id, epoch, AnalysisPhase::RecommendingRoles).await {
        return;
    }

    let roles = match recommend_roles(&state, &summary).await {
        Ok(roles) => roles,
        // The summary already shown stays; only the role list remains empty.
        Err(message) => return fail(&state, session_id, epoch, message).await,
    };

    // Ready
    state
        .sessions
        .commit(session_id, epoch, |s| {
            s.roles = roles;
            s.suggestions = placeholders::suggestions();
            s.job_matches = placeholders::job_matches();
            s.phase = AnalysisPhase::Ready;
        })
        .await;

    info!("Analysis pipeline completed for session {session_id}");
}

async fn set_phase(state: &AppState, session_id: Uuid, epoch: u64, phase: AnalysisPhase) -> bool {
    state
        .sessions
        .commit(session_id, epoch, |s| s.phase = phase)
        .await
}

async fn fail(state: &AppState, session_id: Uuid, epoch: u64, message: String) {
    warn!("Analysis step failed for session {session_id}: {message}");
    state
        .sessions
        .commit(session_id, epoch, |s| {
            s.phase = AnalysisPhase::Errored;
            s.error = Some(message);
        })
        .await;
}

/// Fetches the file bytes from the public retrieval URL and runs the
/// extraction adapter over them.
async fn fetch_and_extract(state: &AppState, file_url: &str) -> Result<String, String> {
    let response = state
        .http
        .get(file_url)
        .send()
        .await
        .map_err(|e| format!("Failed to download the CV: {e}"))?;

    let status = response.status();
    if !status.is_success() {
        return Err(format!("Failed to download the CV: HTTP {status}"));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| format!("Failed to download the CV: {e}"))?;

    extract::extract_document_text(&bytes).map_err(|e| format!("Failed to extract text: {e}"))
}

async fn summarize(state: &AppState, extracted_text: &str) -> Result<String, String> {
    let template = state
        .prompts
        .load(PROFILE_PROMPT)
        .await
        .map_err(|e| format!("Failed to load the profile prompt: {e}"))?;
    let prompt = template.substitute(EXTRACTED_TEXT_TOKEN, extracted_text);

    state
        .completion
        .complete(&prompt)
        .await
        .map_err(|e| format!("Failed to generate profile summary: {e}"))
}

async fn recommend_roles(state: &AppState, summary: &str) -> Result<Vec<Role>, String> {
    let template = state
        .prompts
        .load(ROLES_PROMPT)
        .await
        .map_err(|e| format!("Failed to load the roles prompt: {e}"))?;
    let prompt = template.substitute(PROFILE_SUMMARY_TOKEN, summary);

    let content = state
        .completion
        .complete(&prompt)
        .await
        .map_err(|e| format!("Failed to generate role recommendations: {e}"))?;

    parse_roles(&content).map_err(|e| format!("Failed to parse role recommendations: {e}"))
}
