//! LLM Client — the single point of entry for all generative-text calls.
//!
//! ARCHITECTURAL RULE: no other module talks to OpenAI or Gemini directly.
//! Callers depend on the `TextGenerator` trait so the vendor client can be
//! swapped (or faked in tests) without touching the generation pipeline.
//!
//! One request per call. No retries and no streaming: regeneration is a
//! user-initiated second call.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod gemini;
mod openai;
pub mod prompts;

/// Fixed sampling parameters shared by every generation request.
pub const TEMPERATURE: f32 = 0.7;
pub const TOP_P: f32 = 0.95;
pub const MAX_OUTPUT_TOKENS: u32 = 8192;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAi,
    Gemini,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Gemini => "gemini",
        }
    }

    /// Environment variable holding this provider's API key.
    pub fn api_key_var(&self) -> &'static str {
        match self {
            Provider::OpenAi => "OPENAI_API_KEY",
            Provider::Gemini => "GEMINI_API_KEY",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::OpenAi => "gpt-4o-mini",
            Provider::Gemini => "gemini-1.5-flash",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Provider::OpenAi => "https://api.openai.com/v1",
            Provider::Gemini => "https://generativelanguage.googleapis.com/v1beta",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited: {message}")]
    RateLimited { message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Response blocked: {reason}")]
    Blocked { reason: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Anything that can turn a prompt into a single block of text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn provider(&self) -> Provider;

    fn model(&self) -> &str;

    async fn complete(&self, prompt: &str, system: &str) -> Result<String, LlmError>;
}

/// HTTP client for the configured vendor.
pub struct LlmClient {
    client: Client,
    provider: Provider,
    api_key: String,
    model: String,
    base_url: String,
}

impl LlmClient {
    pub fn new(
        provider: Provider,
        api_key: String,
        model: String,
        base_url: Option<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let base_url = base_url
            .unwrap_or_else(|| provider.default_base_url().to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            provider,
            api_key,
            model,
            base_url,
        })
    }

    /// Makes one call to the vendor API and returns the generated text.
    pub async fn call(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        match self.provider {
            Provider::OpenAi => {
                openai::complete(
                    &self.client,
                    &self.base_url,
                    &self.api_key,
                    &self.model,
                    prompt,
                    system,
                )
                .await
            }
            Provider::Gemini => {
                gemini::complete(
                    &self.client,
                    &self.base_url,
                    &self.api_key,
                    &self.model,
                    prompt,
                    system,
                )
                .await
            }
        }
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    fn provider(&self) -> Provider {
        self.provider
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        self.call(prompt, system).await
    }
}

/// Both vendors wrap errors as `{"error": {"message": "..."}}`.
#[derive(Debug, Deserialize)]
struct VendorError {
    error: VendorErrorBody,
}

#[derive(Debug, Deserialize)]
struct VendorErrorBody {
    message: String,
}

/// Maps a non-2xx response into an `LlmError`, passing successful ones through.
async fn check_status(response: Response) -> Result<Response, LlmError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = vendor_message(&body);

    if status.as_u16() == 429 {
        return Err(LlmError::RateLimited { message });
    }

    Err(LlmError::Api {
        status: status.as_u16(),
        message,
    })
}

fn vendor_message(body: &str) -> String {
    serde_json::from_str::<VendorError>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string())
}
