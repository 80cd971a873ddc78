use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    /// Base URL under which uploaded objects are publicly retrievable.
    pub storage_public_base: String,
    pub completion_endpoint: String,
    pub completion_api_key: String,
    /// Directory holding the prompt template JSON resources.
    pub prompt_dir: String,
    /// How long an upload session stays valid before the dashboard treats it
    /// as absent.
    pub session_ttl_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            s3_bucket: std::env::var("S3_BUCKET").unwrap_or_else(|_| "cv-uploads".to_string()),
            s3_endpoint: require_env("S3_ENDPOINT")?,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            storage_public_base: require_env("STORAGE_PUBLIC_BASE")?,
            completion_endpoint: require_env("COMPLETION_ENDPOINT")?,
            completion_api_key: require_env("COMPLETION_API_KEY")?,
            prompt_dir: std::env::var("PROMPT_DIR").unwrap_or_else(|_| "assets".to_string()),
            session_ttl_secs: std::env::var("SESSION_TTL_SECS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse::<u64>()
                .context("SESSION_TTL_SECS must be a number of seconds")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
