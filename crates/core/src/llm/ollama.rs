use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, TldwError},
    llm::{ChatMessage, LanguageModel},
};

pub const DEFAULT_HOST: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "llama3.2:1b";

/// Which Ollama instance and model to talk to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OllamaConfig {
    pub host: String,
    pub model: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            model: DEFAULT_MODEL.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: Client,
    config: OllamaConfig,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: Option<ChatMessage>,
}

impl OllamaClient {
    pub fn new(config: OllamaConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &OllamaConfig {
        &self.config
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.config.host.trim_end_matches('/'))
    }

    #[tracing::instrument(skip(self, messages), fields(model = %self.config.model))]
    async fn send_chat_request(&self, messages: &[ChatMessage]) -> Result<ChatResponse> {
        let body = ChatRequest {
            model: &self.config.model,
            messages,
            stream: false,
        };

        let resp = self
            .client
            .post(self.chat_url())
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(TldwError::Api { status, message });
        }

        Ok(resp.json::<ChatResponse>().await?)
    }
}

impl LanguageModel for OllamaClient {
    fn model_name(&self) -> &str {
        &self.config.model
    }

    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let response = self.send_chat_request(&messages).await?;
        content_of(response)
    }
}

fn content_of(response: ChatResponse) -> Result<String> {
    response
        .message
        .map(|m| m.content)
        .ok_or_else(|| TldwError::InvalidResponse {
            service: "ollama",
            reason: "no message in chat response".into(),
        })
}
