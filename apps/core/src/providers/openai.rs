use crate::config::AdviceConfig;
use crate::providers::traits::AdviceProvider;
use crate::providers::ProviderError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, AUTHORIZATION};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

/// Advice provider backed by an OpenAI-compatible chat-completions endpoint.
///
/// The client carries no per-request state, so a single instance is shared by every
/// consultation. Timeouts are applied by the caller.
pub struct OpenAiAdviceProvider {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

impl OpenAiAdviceProvider {
    pub fn new(api_key: String, config: &AdviceConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }

    fn build_request(&self, endpoint: &str, payload: &serde_json::Value) -> Result<reqwest::RequestBuilder, ProviderError> {
        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", self.api_key)
            .parse()
            .map_err(|_| ProviderError::Http("API key is not a valid header value".to_string()))?;
        headers.insert(AUTHORIZATION, auth_value);

        Ok(self
            .client
            .post(format!("{}/{}", self.base_url, endpoint))
            .headers(headers)
            .json(payload))
    }

    fn build_payload(&self, system_context: &str, user_message: &str) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system_context },
                { "role": "user", "content": user_message }
            ],
            "max_tokens": self.max_tokens,
            "temperature": self.temperature
        })
    }
}

#[async_trait]
impl AdviceProvider for OpenAiAdviceProvider {
    async fn generate_advice(&self, system_context: String, user_message: String) -> Result<String, ProviderError> {
        info!(model = %self.model, "Requesting advice from language model");
        debug!(chars = user_message.chars().count(), "User message received");

        let payload = self.build_payload(&system_context, &user_message);
        let res = self.build_request("chat/completions", &payload)?.send().await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = res
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| ProviderError::Malformed("completion carried no content".to_string()))?;

        Ok(content)
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}
