//! OpenAI chat completions wire format.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{check_status, LlmError, MAX_OUTPUT_TOKENS, TEMPERATURE, TOP_P};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

pub(super) async fn complete(
    client: &Client,
    base_url: &str,
    api_key: &str,
    model: &str,
    prompt: &str,
    system: &str,
) -> Result<String, LlmError> {
    let request_body = ChatRequest {
        model,
        messages: vec![
            ChatMessage {
                role: "system",
                content: system,
            },
            ChatMessage {
                role: "user",
                content: prompt,
            },
        ],
        temperature: TEMPERATURE,
        top_p: TOP_P,
        max_tokens: MAX_OUTPUT_TOKENS,
    };

    let response = client
        .post(format!("{base_url}/chat/completions"))
        .bearer_auth(api_key)
        .json(&request_body)
        .send()
        .await?;

    let body = check_status(response).await?.text().await?;
    extract_text(&body)
}

fn extract_text(body: &str) -> Result<String, LlmError> {
    let response: ChatResponse = serde_json::from_str(body)?;

    if let Some(usage) = &response.usage {
        debug!(
            "OpenAI call succeeded: prompt_tokens={}, completion_tokens={}",
            usage.prompt_tokens, usage.completion_tokens
        );
    }

    let choice = response.choices.into_iter().next().ok_or(LlmError::Blocked {
        reason: "no choices returned".to_string(),
    })?;

    if choice.finish_reason.as_deref() == Some("content_filter") {
        return Err(LlmError::Blocked {
            reason: "content_filter".to_string(),
        });
    }

    choice
        .message
        .and_then(|m| m.content)
        .filter(|text| !text.trim().is_empty())
        .ok_or(LlmError::EmptyContent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text_returns_first_choice() {
        let body = r#"{
            "choices": [{"message": {"role": "assistant", "content": "<!DOCTYPE html><html></html>"}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 900, "completion_tokens": 3000}
        }"#;
        assert_eq!(extract_text(body).unwrap(), "<!DOCTYPE html><html></html>");
    }

    #[test]
    fn test_extract_text_without_choices_is_blocked() {
        let body = r#"{"choices": []}"#;
        assert!(matches!(extract_text(body), Err(LlmError::Blocked { .. })));
    }

    #[test]
    fn test_extract_text_content_filter_is_blocked() {
        let body = r#"{"choices": [{"message": {"content": null}, "finish_reason": "content_filter"}]}"#;
        match extract_text(body) {
            Err(LlmError::Blocked { reason }) => assert_eq!(reason, "content_filter"),
            other => panic!("expected Blocked, got {other:?}"),
        }
    }

    #[test]
    fn test_extract_text_null_content_is_empty() {
        let body = r#"{"choices": [{"message": {"content": null}, "finish_reason": "length"}]}"#;
        assert!(matches!(extract_text(body), Err(LlmError::EmptyContent)));
    }

    #[test]
    fn test_extract_text_rejects_non_json() {
        assert!(matches!(extract_text("<html>gateway</html>"), Err(LlmError::Parse(_))));
    }

    #[test]
    fn test_request_serializes_sampling_parameters() {
        let request = ChatRequest {
            model: "gpt-4o-mini",
            messages: vec![ChatMessage {
                role: "user",
                content: "hi",
            }],
            temperature: TEMPERATURE,
            top_p: TOP_P,
            max_tokens: MAX_OUTPUT_TOKENS,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["max_tokens"], 8192);
        assert_eq!(json["messages"][0]["role"], "user");
    }
}
