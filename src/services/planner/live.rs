use super::{CompletionProvider, Prompt};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// OpenAI-compatible chat completion endpoint
#[derive(Clone)]
pub struct LiveCompletionProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl LiveCompletionProvider {
    pub fn new(api_key: String, base_url: String, model: String) -> Self {
        LiveCompletionProvider {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        }
    }
}

#[async_trait]
impl CompletionProvider for LiveCompletionProvider {
    #[tracing::instrument(skip(self, prompt), fields(task = ?prompt.task), level = "debug")]
    async fn complete(&self, prompt: &Prompt) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            temperature: prompt.temperature,
            max_tokens: prompt.max_tokens,
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Planning(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!(status = %status, "Planning service error: {}", error_text);
            return Err(AppError::Planning(format!("HTTP {}: {}", status, error_text)));
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::MalformedProviderResponse(format!("Failed to parse completion: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AppError::MalformedProviderResponse("completion has no choices".to_string()))
    }

    fn kind(&self) -> &'static str {
        "live"
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_shape() {
        let body = ChatRequest {
            model: "nvidia/llama3-8b-instruct",
            messages: [
                ChatMessage {
                    role: "system",
                    content: "be brief",
                },
                ChatMessage {
                    role: "user",
                    content: "hi",
                },
            ],
            temperature: 0.25,
            max_tokens: 300,
            stream: false,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "model": "nvidia/llama3-8b-instruct",
                "messages": [
                    {"role": "system", "content": "be brief"},
                    {"role": "user", "content": "hi"}
                ],
                "temperature": 0.25,
                "max_tokens": 300,
                "stream": false
            })
        );
    }

    #[test]
    fn test_response_parsing() {
        let response: ChatResponse = serde_json::from_value(json!({
            "id": "cmpl-1",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "[]"}}]
        }))
        .unwrap();
        assert_eq!(response.choices[0].message.content, "[]");

        let empty: ChatResponse = serde_json::from_value(json!({"id": "cmpl-2"})).unwrap();
        assert!(empty.choices.is_empty());
    }
}
