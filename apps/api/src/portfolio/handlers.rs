//! Axum route handlers for the Portfolio API.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::artifact::GeneratedArtifact;
use crate::models::profile::UserProfile;
use crate::portfolio::generator::GenerationBusy;
use crate::portfolio::highlight::{highlight_artifact, HighlightedCode};
use crate::portfolio::package::{package_artifact, ARCHIVE_NAME};
use crate::portfolio::validation::validate_profile;
use crate::portfolio::workspace::Snapshot;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ArtifactResponse {
    pub artifact: GeneratedArtifact,
    pub generated_at: DateTime<Utc>,
}

impl From<Snapshot> for ArtifactResponse {
    fn from(snapshot: Snapshot) -> Self {
        Self {
            artifact: snapshot.artifact,
            generated_at: snapshot.generated_at,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/portfolio/generate
///
/// Validates the submitted profile and runs one generation. A failed
/// generation still answers 200 with a diagnostic page as the artifact.
pub async fn handle_generate(
    State(state): State<AppState>,
    payload: Result<Json<UserProfile>, JsonRejection>,
) -> Result<Json<ArtifactResponse>, AppError> {
    let Json(profile) = payload?;
    let validation = validate_profile(&profile);
    if !validation.passed {
        return Err(AppError::Validation(validation.issues.join("; ")));
    }

    info!("Generating portfolio for '{}'", profile.name.trim());
    run_generation(&state, profile).await
}

/// POST /api/v1/portfolio/regenerate
///
/// Re-runs generation with the profile from the last request.
pub async fn handle_regenerate(
    State(state): State<AppState>,
) -> Result<Json<ArtifactResponse>, AppError> {
    let profile = state.workspace.profile().await.ok_or_else(|| {
        AppError::NotFound("No profile submitted yet; generate a portfolio first".to_string())
    })?;

    info!("Regenerating portfolio for '{}'", profile.name.trim());
    run_generation(&state, profile).await
}

/// GET /api/v1/portfolio
pub async fn handle_get_portfolio(
    State(state): State<AppState>,
) -> Result<Json<ArtifactResponse>, AppError> {
    Ok(Json(current_snapshot(&state).await?.into()))
}

/// GET /api/v1/portfolio/preview
///
/// Serves the current HTML for an embedded frame, sandboxed so the page
/// cannot reach the API origin.
pub async fn handle_preview(State(state): State<AppState>) -> Result<Response, AppError> {
    let snapshot = current_snapshot(&state).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8"),
            (header::CONTENT_SECURITY_POLICY, "sandbox allow-scripts"),
        ],
        snapshot.artifact.preview().to_string(),
    )
        .into_response())
}

/// GET /api/v1/portfolio/code
pub async fn handle_code(
    State(state): State<AppState>,
) -> Result<Json<HighlightedCode>, AppError> {
    let snapshot = current_snapshot(&state).await?;
    Ok(Json(highlight_artifact(&snapshot.artifact)))
}

/// GET /api/v1/portfolio/download
pub async fn handle_download(State(state): State<AppState>) -> Result<Response, AppError> {
    let snapshot = current_snapshot(&state).await?;
    let archive = package_artifact(&snapshot.artifact)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{ARCHIVE_NAME}\""),
            ),
        ],
        archive,
    )
        .into_response())
}

/// Generates and stores on a separate task so the result lands in the
/// workspace even if the caller disconnects mid-request.
async fn run_generation(
    state: &AppState,
    profile: UserProfile,
) -> Result<Json<ArtifactResponse>, AppError> {
    let generator = state.generator.clone();
    let workspace = state.workspace.clone();

    let snapshot = tokio::spawn(async move {
        let artifact = generator.generate_website(&profile).await?;
        Ok::<_, GenerationBusy>(workspace.replace(profile, artifact).await)
    })
    .await
    .map_err(|e| anyhow::anyhow!("generation task failed: {e}"))??;

    Ok(Json(snapshot.into()))
}

async fn current_snapshot(state: &AppState) -> Result<Snapshot, AppError> {
    state
        .workspace
        .current()
        .await
        .ok_or_else(|| AppError::NotFound("No portfolio generated yet".to_string()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use super::*;
    use crate::config::Config;
    use crate::llm_client::{LlmError, Provider, TextGenerator};
    use crate::portfolio::generator::{Backend, PortfolioGenerator};
    use crate::portfolio::workspace::Workspace;

    const SITE: &str = "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<title>Jane Doe</title>\n\
        </head>\n<body>\n<h1>Jane Doe</h1>\n<p>Engineer building reliable services.</p>\n\
        </body>\n</html>";

    /// Holds the call open until released.
    struct GatedGenerator {
        started: Notify,
        release: Notify,
    }

    #[async_trait]
    impl TextGenerator for GatedGenerator {
        fn provider(&self) -> Provider {
            Provider::OpenAi
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

    fn state_with(client: Arc<GatedGenerator>) -> AppState {
        AppState {
            generator: Arc::new(PortfolioGenerator::new(Backend::Ready(client))),
            workspace: Arc::new(Workspace::default()),
            config: Config {
                provider: Provider::OpenAi,
                api_key: Some("test-key".to_string()),
                model: "gated".to_string(),
                base_url: None,
                timeout_secs: 120,
                port: 8080,
                rust_log: "info".to_string(),
            },
        }
    }

    fn jane() -> UserProfile {
        UserProfile {
            name: "Jane Doe".to_string(),
            title: "Engineer".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_generation_is_stored_after_caller_goes_away() {
        let client = Arc::new(GatedGenerator {
            started: Notify::new(),
            release: Notify::new(),
        });
        let state = state_with(client.clone());

        let request = {
            let state = state.clone();
            tokio::spawn(async move { handle_generate(State(state), Ok(Json(jane()))).await })
        };

        client.started.notified().await;
        request.abort();
        assert!(request.await.unwrap_err().is_cancelled());
        client.release.notify_one();

        let mut stored = None;
        for _ in 0..200 {
            stored = state.workspace.current().await;
            if stored.is_some() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        let snapshot = stored.expect("generation should finish without its caller");
        assert_eq!(snapshot.artifact.html(), SITE);
        assert_eq!(snapshot.profile.name, "Jane Doe");
    }

    #[tokio::test]
    async fn test_generate_stores_and_returns_artifact() {
        let client = Arc::new(GatedGenerator {
            started: Notify::new(),
            release: Notify::new(),
        });
        client.release.notify_one();
        let state = state_with(client);

        let Json(response) = handle_generate(State(state.clone()), Ok(Json(jane())))
            .await
            .unwrap();

        assert_eq!(response.artifact.html(), SITE);
        assert!(state.workspace.profile().await.is_some());
    }
}
