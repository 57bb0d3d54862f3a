//! Translation: the Google Cloud Translation provider and the fail-open adapter.

use crate::config::{is_supported_language, TranslationConfig};
use crate::providers::traits::TranslationProvider;
use crate::providers::ProviderError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};
use url::Url;

/// Translation provider speaking the Cloud Translation v2 REST API.
pub struct GoogleTranslateProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateData {
    translations: Vec<TranslatedText>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslatedText {
    translated_text: String,
}

impl GoogleTranslateProvider {
    pub fn new(api_key: String, config: &TranslationConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl TranslationProvider for GoogleTranslateProvider {
    async fn translate(&self, text: String, target_language: String) -> Result<String, ProviderError> {
        let endpoint = Url::parse_with_params(
            &format!("{}/language/translate/v2", self.base_url),
            &[("key", self.api_key.as_str())],
        )
        .map_err(|e| ProviderError::Http(e.to_string()))?;

        let res = self
            .client
            .post(endpoint)
            .json(&serde_json::json!({
                "q": text,
                "target": target_language,
                "format": "text"
            }))
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TranslateResponse = res
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        parsed
            .data
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ProviderError::Malformed("no translation returned".to_string()))
    }

    fn name(&self) -> &'static str {
        "google-translate"
    }
}

/// How a translation request ended. `FailedOpen` is a soft failure: the text is unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum TranslationStatus {
    NotRequired,
    Translated,
    FailedOpen(ProviderError),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Translation {
    pub text: String,
    pub status: TranslationStatus,
}

impl Translation {
    fn unchanged(text: &str, status: TranslationStatus) -> Self {
        Self {
            text: text.to_string(),
            status,
        }
    }
}

/// Fail-open wrapper around a `TranslationProvider`.
///
/// Never returns an error: provider failures, timeouts and unsupported targets all yield
/// the original text with `TranslationStatus::FailedOpen`, logged at `warn`.
#[derive(Clone)]
pub struct TranslationAdapter {
    provider: Arc<dyn TranslationProvider>,
    base_language: String,
    timeout: Duration,
}

impl TranslationAdapter {
    pub fn new(provider: Arc<dyn TranslationProvider>, base_language: impl Into<String>, timeout: Duration) -> Self {
        Self {
            provider,
            base_language: base_language.into().to_ascii_lowercase(),
            timeout,
        }
    }

    pub fn base_language(&self) -> &str {
        &self.base_language
    }

    pub fn requires_translation(&self, target_language: &str) -> bool {
        let target = target_language.trim();
        !target.is_empty() && !target.eq_ignore_ascii_case(&self.base_language)
    }

    pub async fn translate(&self, text: &str, target_language: &str) -> Translation {
        if !self.requires_translation(target_language) {
            return Translation::unchanged(text, TranslationStatus::NotRequired);
        }

        let target = target_language.trim().to_ascii_lowercase();
        if !is_supported_language(&target) {
            warn!(target = %target, "Translation skipped: unsupported language");
            return Translation::unchanged(text, TranslationStatus::FailedOpen(ProviderError::UnsupportedLanguage(target)));
        }

        let call = self.provider.translate(text.to_string(), target.clone());
        let result = match timeout(self.timeout, call).await {
            Ok(inner) => inner,
            Err(elapsed) => Err(ProviderError::from(elapsed)),
        };

        match result {
            Ok(translated) => {
                debug!(provider = self.provider.name(), target = %target, "Translated text");
                Translation {
                    text: translated,
                    status: TranslationStatus::Translated,
                }
            }
            Err(e) => {
                warn!(provider = self.provider.name(), target = %target, error = %e, "Translation failed, keeping original text");
                Translation::unchanged(text, TranslationStatus::FailedOpen(e))
            }
        }
    }
}
