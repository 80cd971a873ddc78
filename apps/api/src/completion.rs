//! Completion client — the single point of entry for all model calls.
//!
//! Issues one-turn chat completions against a hosted endpoint authenticated
//! with an `api-key` header. Callers receive the first choice's message
//! content as an opaque string and are responsible for parsing it as their
//! own expected JSON shape.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

const MAX_TOKENS: u32 = 4000;
const TEMPERATURE: f64 = 0.3;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("completion endpoint returned {status}: {message}")]
    Endpoint { status: u16, message: String },

    #[error("completion response lacks a usable choices field")]
    ResponseShape,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    messages: Vec<Message<'a>>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Clone)]
pub struct CompletionClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl CompletionClient {
    /// The client sets no request timeout and never retries: a hung endpoint
    /// stalls only the pipeline step that depends on it, and a failed step is
    /// re-triggered by the user, not by the client.
    pub fn new(endpoint: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            api_key,
        }
    }

    /// Sends one fully-substituted prompt and returns the first choice's
    /// message content.
    pub async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let request = CompletionRequest {
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!("Completion endpoint returned {status}");
            return Err(CompletionError::Endpoint {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let content = first_choice_content(&body)?;

        debug!("Completion call succeeded ({} bytes)", content.len());
        Ok(content)
    }
}

/// Extracts the first choice's message content from a success body, failing
/// with `ResponseShape` when the body does not carry one.
fn first_choice_content(body: &str) -> Result<String, CompletionError> {
    let parsed: CompletionResponse =
        serde_json::from_str(body).map_err(|_| CompletionError::ResponseShape)?;
    parsed
        .choices
        .into_iter()
        .next()
        .map(|c| c.message.content)
        .ok_or(CompletionError::ResponseShape)
}
