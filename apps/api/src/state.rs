use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::completion::CompletionClient;
use crate::config::Config;
use crate::prompts::PromptStore;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum
/// extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    /// Plain HTTP client used to fetch uploaded files back from their public
    /// retrieval URL.
    pub http: reqwest::Client,
    pub completion: CompletionClient,
    pub prompts: PromptStore,
    pub sessions: SessionStore,
    pub config: Config,
}
