//! Chat-completions narrator.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::prompt::{trajectory_prompt, user_prompt, SYSTEM_PROMPT, TRAJECTORY_SYSTEM_PROMPT};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::NarrationConfig;
use crate::domain::ports::{NarrationRequest, Narrator, TrajectoryDigest};
use crate::infrastructure::openai::OpenAiClient;

/// Narrator backed by an OpenAI-compatible chat completions endpoint.
pub struct OpenAiChatNarrator {
    client: OpenAiClient,
    model: String,
    temperature: f64,
    max_tokens: u32,
    top_forces: usize,
}

impl OpenAiChatNarrator {
    pub fn new(client: OpenAiClient, config: &NarrationConfig) -> Self {
        Self {
            client,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            top_forces: config.top_forces,
        }
    }

    async fn complete(&self, system: &str, user: &str) -> DomainResult<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response: ChatResponse = self
            .client
            .post_json("chat/completions", &body)
            .await
            .map_err(|e| DomainError::NarrationFailed(e.to_string()))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| DomainError::NarrationFailed("empty completion".to_string()))
    }
}

#[async_trait]
impl Narrator for OpenAiChatNarrator {
    fn name(&self) -> &'static str {
        "openai-chat"
    }

    async fn narrate(&self, request: &NarrationRequest) -> DomainResult<String> {
        self.complete(SYSTEM_PROMPT, &user_prompt(request, self.top_forces))
            .await
    }

    async fn summarize_trajectory(&self, digest: &TrajectoryDigest) -> DomainResult<String> {
        self.complete(TRAJECTORY_SYSTEM_PROMPT, &trajectory_prompt(digest))
            .await
    }
}

// -- OpenAI API request/response types --

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}
