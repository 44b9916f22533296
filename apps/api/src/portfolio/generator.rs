//! Portfolio Generation: one request/response cycle per call.
//!
//! Flow: credential check → build prompt → one LLM call → length check →
//!       extract HTML/CSS/JS. Any failure along the way becomes a
//!       diagnostic artifact; callers always get an artifact back.
//!
//! At most one generation runs at a time. A second request while one is
//! pending is rejected with `GenerationBusy`, not queued.

use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::llm_client::prompts::WEB_DESIGNER_SYSTEM;
use crate::llm_client::{Provider, TextGenerator};
use crate::models::artifact::GeneratedArtifact;
use crate::models::profile::UserProfile;
use crate::portfolio::extract::parse_response;
use crate::portfolio::failure::GenerationFailure;
use crate::portfolio::fallback::diagnostic_artifact;
use crate::portfolio::prompt_builder::build_portfolio_prompt;

/// A well-formed portfolio page cannot fit in fewer characters than this.
pub const MIN_RESPONSE_CHARS: usize = 100;

#[derive(Debug, Error)]
#[error("a portfolio generation is already in progress; wait for it to finish")]
pub struct GenerationBusy;

/// Where generation requests go.
#[derive(Clone)]
pub enum Backend {
    Ready(Arc<dyn TextGenerator>),
    /// No credential was found; requests produce a configuration diagnostic.
    Unconfigured { provider: Provider },
}

pub struct PortfolioGenerator {
    backend: Backend,
    in_flight: Mutex<()>,
}

impl PortfolioGenerator {
    pub fn new(backend: Backend) -> Self {
        Self {
            backend,
            in_flight: Mutex::new(()),
        }
    }

    /// Generates a portfolio site for `profile`.
    ///
    /// Returns `Err` only when another generation is still running; every
    /// generation failure is reported inside the returned artifact.
    pub async fn generate_website(
        &self,
        profile: &UserProfile,
    ) -> Result<GeneratedArtifact, GenerationBusy> {
        let _permit = self.in_flight.try_lock().map_err(|_| GenerationBusy)?;

        let generation_id = Uuid::new_v4();
        let started = Instant::now();

        match self.request_site(generation_id, profile).await {
            Ok(artifact) => {
                info!(
                    "Generation {generation_id} succeeded in {}ms ({} chars html)",
                    started.elapsed().as_millis(),
                    artifact.html().len()
                );
                Ok(artifact)
            }
            Err(failure) => {
                warn!(
                    "Generation {generation_id} failed ({}): {}",
                    failure.kind(),
                    failure.detail()
                );
                Ok(diagnostic_artifact(&failure, profile))
            }
        }
    }

    async fn request_site(
        &self,
        generation_id: Uuid,
        profile: &UserProfile,
    ) -> Result<GeneratedArtifact, GenerationFailure> {
        let client = match &self.backend {
            Backend::Ready(client) => client,
            Backend::Unconfigured { provider } => {
                return Err(GenerationFailure::Configuration(format!(
                    "{} is not set; set it for the '{provider}' provider and regenerate",
                    provider.api_key_var()
                )));
            }
        };

        let prompt = build_portfolio_prompt(profile);
        info!(
            "Generation {generation_id}: calling {} model {} (prompt {} chars)",
            client.provider(),
            client.model(),
            prompt.len()
        );

        let text = client.complete(&prompt, WEB_DESIGNER_SYSTEM).await?;
        let text = text.trim();

        let length = text.chars().count();
        if length < MIN_RESPONSE_CHARS {
            return Err(GenerationFailure::MalformedResponse(format!(
                "response too short ({length} characters, expected at least {MIN_RESPONSE_CHARS})"
            )));
        }

        Ok(parse_response(text))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use super::*;
    use crate::llm_client::LlmError;
    use crate::models::artifact::{CSS_PLACEHOLDER, JS_PLACEHOLDER};

    const SITE: &str = "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<title>Jane Doe</title>\n\
        <style>body { font-family: sans-serif; }</style>\n</head>\n<body>\n<h1>Jane Doe</h1>\n\
        <script>console.log('ready');</script>\n</body>\n</html>";

    /// Replays a fixed reply and counts calls.
    struct ScriptedGenerator {
        reply: fn() -> Result<String, LlmError>,
        calls: AtomicUsize,
    }

    impl ScriptedGenerator {
        fn new(reply: fn() -> Result<String, LlmError>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        fn provider(&self) -> Provider {
            Provider::OpenAi
        }

        fn model(&self) -> &str {
            "scripted"
        }

        async fn complete(&self, _prompt: &str, _system: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.reply)()
        }
    }

    /// Holds the call open until released.
    struct GatedGenerator {
        started: Notify,
        release: Notify,
    }

    #[async_trait]
    impl TextGenerator for GatedGenerator {
        fn provider(&self) -> Provider {
            Provider::Gemini
        }

        fn model(&self) -> &str {
            "gated"
        }

        async fn complete(&self, _prompt: &str, _system: &str) -> Result<String, LlmError> {
            self.started.notify_one();
            self.release.notified().await;
            Ok(SITE.to_string())
        }
    }

    fn jane() -> UserProfile {
        UserProfile {
            name: "Jane Doe".to_string(),
            title: "Engineer".to_string(),
            skills: vec!["Go".to_string(), "Rust".to_string()],
            ..Default::default()
        }
    }

    fn assert_complete_document(artifact: &GeneratedArtifact) {
        let lower = artifact.html().to_lowercase();
        assert!(lower.contains("<!doctype html"));
        assert!(lower.contains("</html>"));
    }

    #[tokio::test]
    async fn test_missing_credential_yields_configuration_page_without_call() {
        let generator = PortfolioGenerator::new(Backend::Unconfigured {
            provider: Provider::Gemini,
        });

        let artifact = generator.generate_website(&jane()).await.unwrap();

        assert_complete_document(&artifact);
        assert!(artifact.html().contains("Jane Doe"));
        assert!(artifact.html().contains("Configuration is required"));
        assert!(artifact.html().contains("GEMINI_API_KEY"));
        assert_eq!(artifact.css(), CSS_PLACEHOLDER);
        assert_eq!(artifact.js(), JS_PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_successful_generation_extracts_blocks() {
        let client = ScriptedGenerator::new(|| Ok(format!("Here you go:\n{SITE}\n")));
        let generator = PortfolioGenerator::new(Backend::Ready(client.clone()));

        let artifact = generator.generate_website(&jane()).await.unwrap();

        assert_eq!(artifact.html(), SITE);
        assert_eq!(artifact.css(), "body { font-family: sans-serif; }");
        assert_eq!(artifact.js(), "console.log('ready');");
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_transport_error_yields_diagnostic_page() {
        let client = ScriptedGenerator::new(|| {
            Err(LlmError::Api {
                status: 503,
                message: "model overloaded".to_string(),
            })
        });
        let generator = PortfolioGenerator::new(Backend::Ready(client));

        let artifact = generator.generate_website(&jane()).await.unwrap();

        assert_complete_document(&artifact);
        assert!(artifact.html().contains("Portfolio generation failed"));
        assert!(artifact.html().contains("model overloaded"));
    }

    #[tokio::test]
    async fn test_blocked_response_yields_content_policy_page() {
        let client = ScriptedGenerator::new(|| {
            Err(LlmError::Blocked {
                reason: "SAFETY".to_string(),
            })
        });
        let generator = PortfolioGenerator::new(Backend::Ready(client));

        let artifact = generator.generate_website(&jane()).await.unwrap();

        assert!(artifact.html().contains("content policy"));
        assert!(artifact.html().contains("Failure type: content_policy"));
    }

    #[tokio::test]
    async fn test_short_response_is_malformed() {
        let client = ScriptedGenerator::new(|| Ok("<html>tiny</html>".to_string()));
        let generator = PortfolioGenerator::new(Backend::Ready(client));

        let artifact = generator.generate_website(&jane()).await.unwrap();

        assert_complete_document(&artifact);
        assert!(artifact.html().contains("Failure type: malformed_response"));
        assert!(artifact.html().contains("response too short"));
    }

    #[tokio::test]
    async fn test_regenerate_issues_a_new_request() {
        let client = ScriptedGenerator::new(|| Ok(SITE.to_string()));
        let generator = PortfolioGenerator::new(Backend::Ready(client.clone()));
        let profile = jane();

        let first = generator.generate_website(&profile).await.unwrap();
        let second = generator.generate_website(&profile).await.unwrap();

        assert_complete_document(&first);
        assert_complete_document(&second);
        assert_eq!(client.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_second_request_while_pending_is_rejected() {
        let client = Arc::new(GatedGenerator {
            started: Notify::new(),
            release: Notify::new(),
        });
        let generator = Arc::new(PortfolioGenerator::new(Backend::Ready(client.clone())));

        let pending = {
            let generator = generator.clone();
            tokio::spawn(async move { generator.generate_website(&jane()).await })
        };

        client.started.notified().await;
        assert!(generator.generate_website(&jane()).await.is_err());

        client.release.notify_one();
        let artifact = pending.await.unwrap().unwrap();
        assert_eq!(artifact.html(), SITE);

        // Permit is released once the first call completes.
        client.release.notify_one();
        assert!(generator.generate_website(&jane()).await.is_ok());
    }
}
