//! Runtime configuration.
//!
//! Everything is resolved once at startup from the process environment (optionally seeded
//! from a `.env` file by the binary) and then passed into the providers, the orchestrator and
//! the gateway. Nothing below reads the environment during request handling.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use url::Url;
use validator::Validate;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://medaether.sqlite?mode=rwc";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TRANSLATE_BASE_URL: &str = "https://translation.googleapis.com";
pub const DEFAULT_BASE_LANGUAGE: &str = "en";

/// Language codes the translation adapter accepts, with their display names.
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("hi", "Hindi"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("zh", "Chinese"),
    ("ar", "Arabic"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("ja", "Japanese"),
];

pub fn is_supported_language(code: &str) -> bool {
    SUPPORTED_LANGUAGES.iter().any(|(c, _)| c.eq_ignore_ascii_case(code))
}

/// Settings for the hosted language model.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AdviceConfig {
    /// `None` means fallback mode: the null provider is selected at startup.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    #[validate(length(min = 1))]
    pub model: String,
    pub base_url: String,
    /// Output token budget sent with every request.
    #[validate(range(min = 1, max = 4096))]
    pub max_tokens: u32,
    #[validate(range(min = 0.0, max = 2.0))]
    pub temperature: f32,
    pub timeout: Duration,
}

impl Default for AdviceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_OPENAI_MODEL.to_string(),
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            max_tokens: 500,
            temperature: 0.3,
            timeout: Duration::from_secs(20),
        }
    }
}

/// Settings for the translation backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_TRANSLATE_BASE_URL.to_string(),
            timeout: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" | "bunyan" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!("unknown LOG_FORMAT '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub base_language: String,
    pub advice: AdviceConfig,
    pub translation: TranslationConfig,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            base_language: DEFAULT_BASE_LANGUAGE.to_string(),
            advice: AdviceConfig::default(),
            translation: TranslationConfig::default(),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl AppConfig {
    /// Builds the configuration from the process environment.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = AppConfig::default();

        let advice = AdviceConfig {
            api_key: get("OPENAI_API_KEY"),
            model: get("OPENAI_MODEL").unwrap_or(defaults.advice.model),
            base_url: get("OPENAI_BASE_URL").unwrap_or(defaults.advice.base_url),
            max_tokens: parse_or("AI_MAX_TOKENS", get("AI_MAX_TOKENS"), defaults.advice.max_tokens)?,
            temperature: parse_or("AI_TEMPERATURE", get("AI_TEMPERATURE"), defaults.advice.temperature)?,
            timeout: Duration::from_secs(parse_or(
                "AI_TIMEOUT_SECS",
                get("AI_TIMEOUT_SECS"),
                defaults.advice.timeout.as_secs(),
            )?),
        };

        let translation = TranslationConfig {
            api_key: get("GOOGLE_TRANSLATE_API_KEY"),
            base_url: get("TRANSLATE_BASE_URL").unwrap_or(defaults.translation.base_url),
            timeout: Duration::from_secs(parse_or(
                "TRANSLATE_TIMEOUT_SECS",
                get("TRANSLATE_TIMEOUT_SECS"),
                defaults.translation.timeout.as_secs(),
            )?),
        };

        let config = Self {
            database_url: get("DATABASE_URL").unwrap_or(defaults.database_url),
            base_language: get("BASE_LANGUAGE")
                .map(|l| l.to_ascii_lowercase())
                .unwrap_or(defaults.base_language),
            advice,
            translation,
            log_level: get("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_format: match get("LOG_FORMAT") {
                Some(raw) => raw.parse()?,
                None => defaults.log_format,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Checks the cross-field rules that the `validator` derive cannot express.
    pub fn validate(&self) -> AppResult<()> {
        self.advice.validate()?;
        Url::parse(&self.advice.base_url)?;
        Url::parse(&self.translation.base_url)?;
        // Fallback templates and bot texts are authored in English only.
        if self.base_language != DEFAULT_BASE_LANGUAGE {
            return Err(AppError::Config(format!(
                "BASE_LANGUAGE '{}' is not supported; replies are authored in '{}'",
                self.base_language, DEFAULT_BASE_LANGUAGE
            )));
        }
        if self.advice.timeout.is_zero() || self.translation.timeout.is_zero() {
            return Err(AppError::Config("provider timeouts must be non-zero".to_string()));
        }
        Ok(())
    }

    pub fn ai_configured(&self) -> bool {
        self.advice.api_key.is_some()
    }

    pub fn translation_configured(&self) -> bool {
        self.translation.api_key.is_some()
    }
}

fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> AppResult<T> {
    match raw {
        Some(value) => value
            .parse()
            .map_err(|_| AppError::Config(format!("{} has invalid value '{}'", key, value))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_environment() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.base_language, "en");
        assert_eq!(config.advice.max_tokens, 500);
        assert!(!config.ai_configured());
        assert!(!config.translation_configured());
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_from_env_reads_variables() {
        temp_env::with_vars(
            [
                ("OPENAI_API_KEY", Some("sk-test")),
                ("OPENAI_MODEL", Some("gpt-4o-mini")),
                ("AI_MAX_TOKENS", Some("400")),
                ("GOOGLE_TRANSLATE_API_KEY", Some("")),
                ("LOG_FORMAT", Some("json")),
            ],
            || {
                let config = AppConfig::from_env().unwrap();
                assert!(config.ai_configured());
                assert_eq!(config.advice.model, "gpt-4o-mini");
                assert_eq!(config.advice.max_tokens, 400);
                assert!(!config.translation_configured(), "empty key counts as unset");
                assert_eq!(config.log_format, LogFormat::Json);
            },
        );
    }

    #[test]
    fn test_rejects_out_of_range_temperature() {
        let result = AppConfig::from_lookup(|key| match key {
            "AI_TEMPERATURE" => Some("3.5".to_string()),
            _ => None,
        });
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_rejects_unparseable_number() {
        let result = AppConfig::from_lookup(|key| match key {
            "AI_TIMEOUT_SECS" => Some("soon".to_string()),
            _ => None,
        });
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_base_language_must_be_english() {
        let base = |code: &'static str| {
            AppConfig::from_lookup(move |key| match key {
                "BASE_LANGUAGE" => Some(code.to_string()),
                _ => None,
            })
        };
        assert!(matches!(base("xx"), Err(AppError::Config(_))));
        assert!(matches!(base("hi"), Err(AppError::Config(_))));
        assert_eq!(base("EN").unwrap().base_language, "en");
    }

    #[test]
    fn test_supported_languages() {
        assert!(is_supported_language("hi"));
        assert!(is_supported_language("FR"));
        assert!(!is_supported_language("tlh"));
    }
}
