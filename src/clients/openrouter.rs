use anyhow::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: String,
}

/// Settings for the completion endpoint. The API key is injected from the
/// environment; there is no baked-in default.
#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub referer: String,
    pub app_title: String,
}

/// Client for an OpenRouter-style chat-completions API.
#[derive(Clone)]
pub struct OpenRouterClient {
    client: Client,
    config: OpenRouterConfig,
}

impl OpenRouterClient {
    pub fn new(config: OpenRouterConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub const fn with_shared_client(client: Client, config: OpenRouterConfig) -> Self {
        Self { client, config }
    }

    /// Send a system + user message pair and return the first choice's
    /// reply text. Any transport failure, non-2xx status, or empty choice
    /// list is an error; callers decide what to do with it.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String> {
        if self.config.api_key.is_empty() {
            return Err(anyhow::anyhow!("OpenRouter API key is not configured"));
        }

        let url = format!("{}/chat/completions", self.config.base_url);

        let request = ChatRequest {
            model: &self.config.model,
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
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .header("HTTP-Referer", &self.config.referer)
            .header("X-Title", &self.config.app_title)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "OpenRouter API error: {} - {}",
                status,
                body
            ));
        }

        let completion: ChatCompletion = response.json().await?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("OpenRouter reply contained no choices"))?;

        Ok(choice.message.content)
    }
}
