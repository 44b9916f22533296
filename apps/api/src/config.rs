use anyhow::{bail, Context, Result};

use crate::llm_client::Provider;

/// Application configuration loaded from environment variables.
///
/// The LLM credential is optional: a missing key is reported per generation
/// request as a configuration diagnostic instead of failing startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub provider: Provider,
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let provider = match optional_env("LLM_PROVIDER") {
            Some(raw) => parse_provider(&raw)?,
            None => Provider::Gemini,
        };

        Ok(Config {
            provider,
            api_key: optional_env(provider.api_key_var()),
            model: optional_env("LLM_MODEL").unwrap_or_else(|| provider.default_model().to_string()),
            base_url: optional_env("LLM_BASE_URL"),
            timeout_secs: optional_env("LLM_TIMEOUT_SECS")
                .unwrap_or_else(|| "120".to_string())
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads an env var, treating unset and blank values alike.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_provider(raw: &str) -> Result<Provider> {
    match raw.to_ascii_lowercase().as_str() {
        "openai" => Ok(Provider::OpenAi),
        "gemini" => Ok(Provider::Gemini),
        other => bail!("LLM_PROVIDER must be 'openai' or 'gemini', got '{other}'"),
    }
}
