use std::time::Duration;

use async_trait::async_trait;
use fairdeal_core::{GenerationError, GenerationRequest, SuggestionGenerator};
use fairdeal_shared::Masked;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct OpenAiChatConfig {
    pub api_key: Option<Masked<String>>,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl OpenAiChatConfig {
    pub fn new(api_key: Option<Masked<String>>) -> Self {
        Self {
            api_key,
            base_url: "https://api.openai.com".to_string(),
            model: "gpt-4o-mini".to_string(),
            timeout: Duration::from_secs(15),
        }
    }
}

/// Chat-completions client for OpenAI and compatible endpoints
#[derive(Clone)]
pub struct OpenAiChatGenerator {
    config: OpenAiChatConfig,
    client: Client,
}

impl OpenAiChatGenerator {
    pub fn new(config: OpenAiChatConfig) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GenerationError::Http(e.to_string()))?;
        Ok(Self { config, client })
    }

    pub fn has_credential(&self) -> bool {
        self.config.api_key.as_ref().is_some_and(|k| !k.is_blank())
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl SuggestionGenerator for OpenAiChatGenerator {
    fn name(&self) -> &'static str {
        "openai-chat"
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        let api_key = match self.config.api_key.as_ref() {
            Some(key) if !key.is_blank() => key,
            _ => return Err(GenerationError::MissingCredential),
        };

        let payload = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage { role: "system", content: &request.system_prompt },
                ChatMessage { role: "user", content: &request.user_prompt },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let res = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key.expose())
            .json(&payload)
            .send()
            .await
            .map_err(|e| GenerationError::Http(e.to_string()))?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(GenerationError::Api { status, body });
        }

        let parsed: ChatCompletionResponse = res
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

        extract_content(parsed)
    }
}

fn extract_content(parsed: ChatCompletionResponse) -> Result<String, GenerationError> {
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .ok_or_else(|| GenerationError::InvalidResponse("no message content in response".to_string()))
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}
