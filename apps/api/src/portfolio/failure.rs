//! Why a generation request produced a diagnostic page instead of a site.

use thiserror::Error;

use crate::llm_client::LlmError;

/// Every expected failure of the generation pipeline. Each variant carries an
/// opaque diagnostic string with vendor detail; none of them escape the
/// generator, they become a fallback document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationFailure {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("content policy error: {0}")]
    ContentPolicy(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl GenerationFailure {
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationFailure::Configuration(_) => "configuration",
            GenerationFailure::Transport(_) => "transport",
            GenerationFailure::ContentPolicy(_) => "content_policy",
            GenerationFailure::MalformedResponse(_) => "malformed_response",
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            GenerationFailure::Configuration(d)
            | GenerationFailure::Transport(d)
            | GenerationFailure::ContentPolicy(d)
            | GenerationFailure::MalformedResponse(d) => d,
        }
    }

    /// One-sentence explanation shown on the diagnostic page.
    pub fn explanation(&self) -> &'static str {
        match self {
            GenerationFailure::Configuration(_) => {
                "Configuration is required: the AI service credential is missing, so no request was sent."
            }
            GenerationFailure::Transport(_) => {
                "The AI service could not be reached or rejected the request (network, authentication or rate limit)."
            }
            GenerationFailure::ContentPolicy(_) => {
                "The AI service declined to produce a result for this request because of its content policy."
            }
            GenerationFailure::MalformedResponse(_) => {
                "The AI service answered, but the response was too short or otherwise unusable as a website."
            }
        }
    }
}

impl From<LlmError> for GenerationFailure {
    fn from(err: LlmError) -> Self {
        let detail = err.to_string();
        match err {
            LlmError::Http(_) | LlmError::Api { .. } | LlmError::RateLimited { .. } => {
                GenerationFailure::Transport(detail)
            }
            LlmError::Blocked { .. } => GenerationFailure::ContentPolicy(detail),
            LlmError::Parse(_) | LlmError::EmptyContent => {
                GenerationFailure::MalformedResponse(detail)
            }
        }
    }
}
